//! Glyph rasterization capability consumed by the atlas packer.
//!
//! The packer never talks to a font system directly. It asks a
//! [`GlyphRasterizer`] to measure each code, then hands it a [`GlyphCanvas`]
//! clipped to the glyph's declared box inside the shared atlas bitmap.

mod synthetic;

pub use synthetic::SyntheticRasterizer;

use crate::error::GlyphUnavailable;

/// Pixel measurements of one glyph at a fixed font and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GlyphBox {
    /// Bitmap width in pixels.
    pub width: u32,
    /// Bitmap height in pixels.
    pub height: u32,
    /// Distance from the top of the glyph's atlas slot to the bottom edge of
    /// its bitmap. Tightly cropped rasterizers report `height`.
    pub origin_y: u32,
    /// Horizontal offset of the bitmap's left edge from the pen.
    pub bearing_x: i32,
    /// Vertical offset of the bitmap's bottom edge from the line bottom (y up).
    pub bearing_y: i32,
    /// Horizontal pen advance in pixels.
    pub advance: u32,
}

impl GlyphBox {
    /// A box with no ink that only moves the pen.
    pub fn blank(advance: u32) -> Self {
        Self {
            advance,
            ..Self::default()
        }
    }

    /// Whether the glyph has no visible bitmap.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Vertical space this glyph needs in an atlas row.
    pub fn slot_height(&self) -> u32 {
        self.height.max(self.origin_y)
    }

    /// Horizontal space this glyph takes in an atlas row: bitmap, advance,
    /// and a one pixel gutter.
    pub fn slot_width(&self) -> u32 {
        self.width.saturating_add(self.advance).saturating_add(1)
    }
}

/// Produces glyph measurements and coverage for a fixed font and size.
///
/// Both operations must be deterministic for a given font and size. Either
/// may report [`GlyphUnavailable`]; the packer then substitutes a zero-size
/// placeholder instead of failing the whole atlas.
pub trait GlyphRasterizer {
    /// Measure the bitmap box and advance of `code`.
    fn measure(&mut self, code: u8) -> Result<GlyphBox, GlyphUnavailable>;

    /// Draw the coverage of `code` into `canvas`.
    ///
    /// The canvas is already positioned at the glyph's box in the atlas and
    /// sized to the width and height returned by [`measure`](Self::measure).
    fn render(&mut self, code: u8, canvas: &mut GlyphCanvas<'_>) -> Result<(), GlyphUnavailable>;

    /// Advance used for codes the font cannot provide.
    fn fallback_advance(&self) -> u32;
}

/// Write access to one glyph's box inside a shared single-channel bitmap.
///
/// Writes outside the box are dropped, so a rasterizer can never touch a
/// neighbouring glyph.
pub struct GlyphCanvas<'a> {
    pixels: &'a mut [u8],
    stride: u32,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
}

impl<'a> GlyphCanvas<'a> {
    /// Create a canvas for the `width`×`height` box at `(x, y)` of a bitmap
    /// with `stride` pixels per row.
    ///
    /// The box is shrunk to whatever part of it lies inside `pixels`.
    pub fn new(
        pixels: &'a mut [u8],
        stride: u32,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    ) -> Self {
        let rows = if stride == 0 {
            0
        } else {
            pixels.len() as u32 / stride
        };
        let width = width.min(stride.saturating_sub(x));
        let height = height.min(rows.saturating_sub(y));
        Self {
            pixels,
            stride,
            x,
            y,
            width,
            height,
        }
    }

    /// Box width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Box height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Top-left corner of the box within the whole bitmap.
    pub fn offset(&self) -> (u32, u32) {
        (self.x, self.y)
    }

    /// Set one coverage value at box-local `(x, y)`.
    pub fn put(&mut self, x: u32, y: u32, value: u8) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = ((self.y + y) * self.stride + self.x + x) as usize;
        self.pixels[idx] = value;
    }

    /// Copy a row-major alpha bitmap into the box, clipped to it.
    pub fn blit(&mut self, src: &[u8], src_width: u32, src_height: u32) {
        if src_width == 0 {
            return;
        }
        let w = src_width.min(self.width) as usize;
        let h = src_height.min(self.height);
        for row in 0..h {
            let src_start = (row * src_width) as usize;
            let Some(src_row) = src.get(src_start..src_start + w) else {
                break;
            };
            let dst_start = ((self.y + row) * self.stride + self.x) as usize;
            self.pixels[dst_start..dst_start + w].copy_from_slice(src_row);
        }
    }

    /// Fill the whole box with one coverage value.
    pub fn fill(&mut self, value: u8) {
        for row in 0..self.height {
            let start = ((self.y + row) * self.stride + self.x) as usize;
            self.pixels[start..start + self.width as usize].fill(value);
        }
    }
}

#[cfg(test)]
mod tests;
