//! Write a synthetic multi-column time-series CSV for trying out the viewer.
//!
//! Usage: `generate_sample [rows] [path]` (defaults: 500 rows, `sample_timeseries.csv`).

use anyhow::{Context, Result};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Shape of one generated column: `offset + slope*t + amp*sin(2πt/period) + noise`.
struct Signal {
    name: &'static str,
    offset: f64,
    slope: f64,
    amplitude: f64,
    period: f64,
    noise: f64,
}

const SIGNALS: [Signal; 4] = [
    Signal { name: "temperature", offset: 20.0, slope: 0.01, amplitude: 3.0, period: 120.0, noise: 0.4 },
    Signal { name: "pressure", offset: 1013.0, slope: -0.02, amplitude: 5.0, period: 300.0, noise: 0.8 },
    Signal { name: "cpu_load", offset: 0.4, slope: 0.0, amplitude: 0.25, period: 45.0, noise: 0.08 },
    Signal { name: "flow_rate", offset: 12.0, slope: 0.005, amplitude: 0.0, period: 1.0, noise: 1.5 },
];

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let rows: usize = match args.next() {
        Some(s) => s.parse().with_context(|| format!("invalid row count '{s}'"))?,
        None => 500,
    };
    let output_path = args.next().unwrap_or_else(|| "sample_timeseries.csv".to_string());

    let mut rng = SimpleRng::new(42);
    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {output_path}"))?;

    let mut header = vec!["time".to_string()];
    header.extend(SIGNALS.iter().map(|s| s.name.to_string()));
    writer.write_record(&header).context("writing header")?;

    for row in 0..rows {
        let t = row as f64;
        let mut record = vec![format!("t{row:05}")];
        for s in &SIGNALS {
            let value = s.offset
                + s.slope * t
                + s.amplitude * (2.0 * std::f64::consts::PI * t / s.period).sin()
                + rng.gauss(0.0, s.noise);
            record.push(format!("{value:.4}"));
        }
        writer
            .write_record(&record)
            .with_context(|| format!("writing row {row}"))?;
    }
    writer.flush().context("flushing output")?;

    println!(
        "Wrote {rows} rows x {} numeric columns to {output_path}",
        SIGNALS.len()
    );
    Ok(())
}
