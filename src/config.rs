use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Environment variable naming an optional JSON config file.
pub const CONFIG_ENV: &str = "TRENDSCOPE_CONFIG";

// ---------------------------------------------------------------------------
// Startup configuration
// ---------------------------------------------------------------------------

/// Plot margins in points, measured inward from the plot panel edges.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            left: 60.0,
            right: 10.0,
            top: 10.0,
            bottom: 40.0,
        }
    }
}

/// Look and default behaviour of the viewer. Read once at startup; view
/// state chosen by the user is never written back.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub window_size: [f32; 2],
    pub margins: Margins,
    pub line_width: f32,
    pub derivative_dash: f32,
    pub derivative_gap: f32,
    pub marker_radius: f32,
    /// Samples kept per column when "limit recent" is on.
    pub recent_limit: usize,
    pub recent_limit_range: (usize, usize),
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window_size: [1000.0, 700.0],
            margins: Margins::default(),
            line_width: 2.0,
            derivative_dash: 6.0,
            derivative_gap: 4.0,
            marker_radius: 2.5,
            recent_limit: 100,
            recent_limit_range: (10, 1000),
        }
    }
}

impl ViewerConfig {
    /// Parse a JSON config file. Missing fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Config from `$TRENDSCOPE_CONFIG`, or defaults when unset or broken.
    pub fn from_env() -> Self {
        let Ok(path) = std::env::var(CONFIG_ENV) else {
            return Self::default();
        };
        match Self::from_file(Path::new(&path)) {
            Ok(config) => {
                log::info!("Loaded config from {path}");
                config
            }
            Err(e) => {
                log::warn!("Ignoring config: {e:#}");
                Self::default()
            }
        }
    }
}
