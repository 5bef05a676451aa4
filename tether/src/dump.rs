//! Atlas PNG dump for inspecting the packed bitmap.

use std::path::Path;

use anyhow::{Context, bail};
use image::GrayImage;
use tether_core::Atlas;

/// Convert the atlas coverage to a grayscale image (white ink on black).
pub fn to_image(atlas: &Atlas) -> Option<GrayImage> {
    GrayImage::from_raw(atlas.width(), atlas.height(), atlas.pixels().to_vec())
}

/// Write the atlas to `path` as an 8-bit grayscale PNG.
pub fn save_png(atlas: &Atlas, path: &Path) -> anyhow::Result<()> {
    if atlas.width() == 0 || atlas.height() == 0 {
        bail!("atlas is empty, nothing to write to {}", path.display());
    }
    let img = to_image(atlas).context("atlas buffer does not match its size")?;
    img.save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("failed to write atlas to {}", path.display()))?;
    log::info!("dump: wrote {}x{} atlas to {}", atlas.width(), atlas.height(), path.display());
    Ok(())
}
