use std::path::Path;

use eframe::egui::{Color32, ColorImage, Rect};
use image::{Rgba, RgbaImage};
use thiserror::Error;

use super::model::ColumnTable;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("writing file: {0}")]
    Io(#[from] std::io::Error),
    #[error("writing CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("encoding image: {0}")]
    Image(#[from] image::ImageError),
    #[error("no visible columns to export")]
    NothingVisible,
    #[error("plot area is outside the captured image")]
    InvalidImage,
}

// ---------------------------------------------------------------------------
// CSV export
// ---------------------------------------------------------------------------

/// Write the named columns to `path`: one header row, then one row per
/// sample index up to the longest selected column. Cells past the end of a
/// shorter column are written empty.
pub fn export_csv(table: &ColumnTable, names: &[String], path: &Path) -> Result<(), ExportError> {
    let columns: Vec<_> = names.iter().filter_map(|n| table.get(n)).collect();
    if columns.is_empty() {
        return Err(ExportError::NothingVisible);
    }

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(columns.iter().map(|c| c.name.as_str()))?;

    let rows = columns.iter().map(|c| c.len()).max().unwrap_or(0);
    for row in 0..rows {
        let record: Vec<String> = columns
            .iter()
            .map(|c| c.values.get(row).map(|v| v.to_string()).unwrap_or_default())
            .collect();
        writer.write_record(&record)?;
    }
    writer.flush()?;

    log::info!(
        "Exported {} columns x {rows} rows to {}",
        columns.len(),
        path.display()
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// PNG export
// ---------------------------------------------------------------------------

/// Crop a viewport screenshot to the plot rectangle and save it as PNG.
///
/// `plot_rect` is in points; `pixels_per_point` converts it to the
/// screenshot's physical pixels.
pub fn save_plot_png(
    shot: &ColorImage,
    plot_rect: Rect,
    pixels_per_point: f32,
    path: &Path,
) -> Result<(), ExportError> {
    let region = PixelRegion::from_rect(plot_rect, pixels_per_point);
    let out = crop_pixels(shot.size, &shot.pixels, region)?;
    out.save_with_format(path, image::ImageFormat::Png)?;
    log::info!(
        "Saved {}x{} plot image to {}",
        out.width(),
        out.height(),
        path.display()
    );
    Ok(())
}

/// Pixel-space crop rectangle (inclusive min, exclusive max).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRegion {
    pub x0: usize,
    pub y0: usize,
    pub x1: usize,
    pub y1: usize,
}

impl PixelRegion {
    pub fn from_rect(rect: Rect, pixels_per_point: f32) -> Self {
        let to_px = |v: f32| (v * pixels_per_point).round().max(0.0) as usize;
        PixelRegion {
            x0: to_px(rect.min.x),
            y0: to_px(rect.min.y),
            x1: to_px(rect.max.x),
            y1: to_px(rect.max.y),
        }
    }
}

/// Copy `region` (clamped to the image) out of a row-major pixel buffer.
pub fn crop_pixels(
    size: [usize; 2],
    pixels: &[Color32],
    region: PixelRegion,
) -> Result<RgbaImage, ExportError> {
    let [w, h] = size;
    if pixels.len() != w * h {
        return Err(ExportError::InvalidImage);
    }
    let x1 = region.x1.min(w);
    let y1 = region.y1.min(h);
    if region.x0 >= x1 || region.y0 >= y1 {
        return Err(ExportError::InvalidImage);
    }

    let mut out = RgbaImage::new((x1 - region.x0) as u32, (y1 - region.y0) as u32);
    for y in region.y0..y1 {
        for x in region.x0..x1 {
            let p = pixels[y * w + x];
            out.put_pixel(
                (x - region.x0) as u32,
                (y - region.y0) as u32,
                Rgba([p.r(), p.g(), p.b(), p.a()]),
            );
        }
    }
    Ok(out)
}
