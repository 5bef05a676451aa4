//! Single-texture glyph atlas built with two-pass shelf packing.
//!
//! The measure pass asks the rasterizer for every glyph box in the range and
//! lays the boxes out left to right into rows no wider than
//! `max_row_width` (see [`PackPlan`]). The placement pass allocates one
//! transparent single-channel bitmap of the planned size and renders each
//! glyph into its slot, recording a [`GlyphMetrics`] entry per code.
//!
//! By default every row uses the same pitch, the tallest slot in the whole
//! range ([`RowPitch::Uniform`]). This keeps atlas layouts identical to what
//! existing renderers expect. [`RowPitch::PerRow`] packs each row to its own
//! tallest slot instead.

mod plan;

pub use plan::{PackPlan, PackRow};

use std::ops::RangeInclusive;

use crate::error::AtlasError;
use crate::glyph::{GlyphMetrics, GlyphTable};
use crate::raster::{GlyphBox, GlyphCanvas, GlyphRasterizer};

/// Default maximum atlas row width in pixels.
pub const MAX_ROW_WIDTH: u32 = 1024;

/// Default texture dimension limit in pixels.
pub const MAX_TEXTURE_SIZE: u32 = 8192;

/// How tall each atlas row is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RowPitch {
    /// Every row is as tall as the tallest slot in the whole range.
    #[default]
    Uniform,
    /// Every row is as tall as its own tallest slot.
    PerRow,
}

/// Packing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackerConfig {
    pub max_row_width: u32,
    /// Hard limit on either atlas dimension (GPU texture size).
    pub max_texture_size: u32,
    pub row_pitch: RowPitch,
}

impl Default for PackerConfig {
    fn default() -> Self {
        Self {
            max_row_width: MAX_ROW_WIDTH,
            max_texture_size: MAX_TEXTURE_SIZE,
            row_pitch: RowPitch::Uniform,
        }
    }
}

/// Packed glyph coverage, one byte per pixel, rows top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Atlas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Atlas {
    /// A fully transparent atlas.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Raw coverage bytes, `width * height` long.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Hand the pixel buffer over, e.g. to a texture upload.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y * self.width + x) as usize).copied()
    }

    /// One row of pixels.
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let start = (y * self.width) as usize;
        self.pixels.get(start..start + self.width as usize)
    }

    /// Number of pixels with any coverage.
    pub fn coverage(&self) -> usize {
        self.pixels.iter().filter(|&&p| p != 0).count()
    }

    /// Canvas over the `width`×`height` box at `(x, y)`.
    pub fn canvas(&mut self, x: u32, y: u32, width: u32, height: u32) -> GlyphCanvas<'_> {
        GlyphCanvas::new(&mut self.pixels, self.width, x, y, width, height)
    }
}

/// Pack every code of `range` into one atlas.
///
/// Glyphs the rasterizer cannot measure or render become zero-size
/// placeholders advancing by the rasterizer's fallback width; they never
/// fail the build. Only invalid parameters and atlases larger than
/// `config.max_texture_size` are errors.
pub fn build_atlas<R>(
    range: RangeInclusive<u8>,
    rasterizer: &mut R,
    config: &PackerConfig,
) -> Result<(Atlas, GlyphTable), AtlasError>
where
    R: GlyphRasterizer + ?Sized,
{
    if range.is_empty() {
        return Err(AtlasError::EmptyRange);
    }
    let first = *range.start();

    let boxes: Vec<GlyphBox> = range.map(|code| measure_glyph(rasterizer, code)).collect();
    let plan = PackPlan::measure(first, &boxes, config)?;

    let mut atlas = Atlas::new(plan.width(), plan.height());
    let mut entries = Vec::with_capacity(boxes.len());

    for (row_idx, row) in plan.rows().iter().enumerate() {
        let oy = plan.row_top(row_idx);
        let mut ox = 0u32;
        for i in row.glyphs.clone() {
            let code = first + i as u8;
            let glyph = boxes[i];
            entries.push(place_glyph(&mut atlas, rasterizer, code, &glyph, (ox, oy)));
            ox += glyph.slot_width();
        }
    }

    log::debug!(
        "atlas: packed {} glyphs into {}x{} ({} rows, pitch {})",
        entries.len(),
        atlas.width(),
        atlas.height(),
        plan.rows().len(),
        plan.pitch(),
    );

    let table = GlyphTable::new(first, entries, atlas.size());
    Ok((atlas, table))
}

/// Measure one code, falling back to a blank box for missing glyphs.
fn measure_glyph<R: GlyphRasterizer + ?Sized>(rasterizer: &mut R, code: u8) -> GlyphBox {
    match rasterizer.measure(code) {
        Ok(glyph) => glyph,
        Err(e) => {
            log::warn!("atlas: {e}, using placeholder");
            GlyphBox::blank(rasterizer.fallback_advance())
        }
    }
}

/// Render one glyph into its slot at `(ox, oy)` and compute its metrics.
fn place_glyph<R: GlyphRasterizer + ?Sized>(
    atlas: &mut Atlas,
    rasterizer: &mut R,
    code: u8,
    glyph: &GlyphBox,
    (ox, oy): (u32, u32),
) -> GlyphMetrics {
    if glyph.is_empty() {
        return GlyphMetrics::placeholder(code, glyph.advance);
    }

    // The bitmap sits `origin_y` below the slot top; a rasterizer reporting
    // less than the bitmap height is treated as tightly cropped.
    let origin_y = glyph.origin_y.max(glyph.height);
    let top = oy + origin_y - glyph.height;

    let mut canvas = atlas.canvas(ox, top, glyph.width, glyph.height);
    if let Err(e) = rasterizer.render(code, &mut canvas) {
        log::warn!("atlas: {e} during render, using placeholder");
        canvas.fill(0);
        return GlyphMetrics::placeholder(code, glyph.advance);
    }

    let (w, h) = atlas.size();
    GlyphMetrics {
        code,
        atlas_origin: (ox, top),
        bitmap_size: (glyph.width, glyph.height),
        bearing: (glyph.bearing_x, glyph.bearing_y),
        uv: (normalize(ox, w), normalize(h - oy - origin_y, h)),
        uv_size: (normalize(glyph.width, w), normalize(glyph.height, h)),
        advance: glyph.advance,
    }
}

fn normalize(px: u32, extent: u32) -> f32 {
    if extent == 0 {
        0.0
    } else {
        px as f32 / extent as f32
    }
}
