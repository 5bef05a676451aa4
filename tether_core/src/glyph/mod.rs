//! Per-glyph metrics and the immutable code → metrics table.

use std::ops::RangeInclusive;

use crate::error::CodeOutOfRange;

/// Where a glyph lives in the atlas and how it moves the pen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphMetrics {
    /// Character code this entry describes.
    pub code: u8,
    /// Top-left pixel of the glyph bitmap within the atlas.
    pub atlas_origin: (u32, u32),
    /// Bitmap size in pixels. `(0, 0)` for glyphs without ink.
    pub bitmap_size: (u32, u32),
    /// Offset of the bitmap's bottom-left corner from the pen (y up).
    pub bearing: (i32, i32),
    /// Sampling anchor in normalized texture space (v grows upward).
    pub uv: (f32, f32),
    /// `bitmap_size / atlas_size`.
    pub uv_size: (f32, f32),
    /// Horizontal pen advance in pixels.
    pub advance: u32,
}

impl GlyphMetrics {
    /// A glyph that only advances the pen.
    pub fn placeholder(code: u8, advance: u32) -> Self {
        Self {
            code,
            atlas_origin: (0, 0),
            bitmap_size: (0, 0),
            bearing: (0, 0),
            uv: (0.0, 0.0),
            uv_size: (0.0, 0.0),
            advance,
        }
    }

    /// Whether the glyph has no bitmap to draw.
    pub fn is_empty(&self) -> bool {
        self.bitmap_size.0 == 0 || self.bitmap_size.1 == 0
    }

    /// Opposite UV corner: `uv + bitmap_size / atlas_size`.
    pub fn uv_max(&self) -> (f32, f32) {
        (self.uv.0 + self.uv_size.0, self.uv.1 + self.uv_size.1)
    }

    /// The bitmap rectangle in atlas pixels as `(x, y, width, height)`.
    pub fn atlas_rect(&self) -> (u32, u32, u32, u32) {
        (
            self.atlas_origin.0,
            self.atlas_origin.1,
            self.bitmap_size.0,
            self.bitmap_size.1,
        )
    }
}

/// Metrics for every code of a contiguous range, built once per font/size.
///
/// Immutable after construction. Share it behind an `Arc` when the layout
/// engine runs on another thread than the packer.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphTable {
    first: u8,
    entries: Vec<GlyphMetrics>,
    atlas_size: (u32, u32),
    line_height: u32,
}

impl GlyphTable {
    /// Build a table from entries ordered by code, starting at `first`.
    pub(crate) fn new(first: u8, entries: Vec<GlyphMetrics>, atlas_size: (u32, u32)) -> Self {
        debug_assert!(
            entries
                .iter()
                .enumerate()
                .all(|(i, m)| usize::from(m.code) == usize::from(first) + i),
            "glyph entries must be dense and ordered"
        );
        let line_height = entries.iter().map(|m| m.bitmap_size.1).max().unwrap_or(0);
        Self {
            first,
            entries,
            atlas_size,
            line_height,
        }
    }

    /// Look up the metrics of `code`.
    pub fn get(&self, code: u8) -> Result<&GlyphMetrics, CodeOutOfRange> {
        code.checked_sub(self.first)
            .and_then(|i| self.entries.get(usize::from(i)))
            .ok_or(CodeOutOfRange { code })
    }

    /// Whether `code` has an entry.
    pub fn contains(&self, code: u8) -> bool {
        self.get(code).is_ok()
    }

    /// The code range the table covers.
    pub fn range(&self) -> RangeInclusive<u8> {
        let last = self.first + (self.entries.len().saturating_sub(1)) as u8;
        self.first..=last
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in code order.
    pub fn iter(&self) -> impl Iterator<Item = &GlyphMetrics> {
        self.entries.iter()
    }

    /// Size of the atlas the UVs are normalized against.
    pub fn atlas_size(&self) -> (u32, u32) {
        self.atlas_size
    }

    /// Monospace line pitch: the tallest bitmap in the table.
    pub fn line_height(&self) -> u32 {
        self.line_height
    }

    /// Advance of the space glyph, or of the first entry when there is none.
    pub fn space_advance(&self) -> u32 {
        self.get(b' ')
            .or_else(|_| self.entries.first().ok_or(CodeOutOfRange { code: b' ' }))
            .map_or(0, |m| m.advance)
    }
}

#[cfg(test)]
mod tests;
