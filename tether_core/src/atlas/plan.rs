//! Measure pass: shelf layout of measured glyph boxes into atlas rows.

use std::ops::Range;

use super::{PackerConfig, RowPitch};
use crate::error::AtlasError;
use crate::raster::GlyphBox;

/// One shelf of the atlas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackRow {
    /// Indices (into the measured range) of the glyphs on this row.
    pub glyphs: Range<usize>,
    /// Sum of slot widths on this row.
    pub width: u32,
    /// Tallest slot on this row.
    pub height: u32,
}

/// Row layout and final atlas dimensions computed before any pixel is drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackPlan {
    rows: Vec<PackRow>,
    width: u32,
    height: u32,
    pitch: u32,
    mode: RowPitch,
}

impl PackPlan {
    /// Lay `boxes` (one per code, starting at `first`) into rows.
    ///
    /// A glyph that would push a non-empty row past `max_row_width` starts
    /// the next row. Fails if a single bitmap is wider than a row, or if the
    /// result exceeds the texture size limit.
    pub fn measure(
        first: u8,
        boxes: &[GlyphBox],
        config: &PackerConfig,
    ) -> Result<Self, AtlasError> {
        let max = config.max_row_width;
        if max == 0 {
            return Err(AtlasError::ZeroRowWidth);
        }

        let mut rows = Vec::new();
        let mut start = 0;
        let mut row_width = 0u32;
        let mut row_height = 0u32;

        for (i, glyph) in boxes.iter().enumerate() {
            if glyph.width > max {
                return Err(AtlasError::GlyphTooWide {
                    code: first.wrapping_add(i as u8),
                    width: glyph.width,
                    max,
                });
            }
            if row_width > 0 && row_width.saturating_add(glyph.slot_width()) > max {
                rows.push(PackRow {
                    glyphs: start..i,
                    width: row_width,
                    height: row_height,
                });
                start = i;
                row_width = 0;
                row_height = 0;
            }
            row_width = row_width.saturating_add(glyph.slot_width());
            row_height = row_height.max(glyph.slot_height());
        }
        if start < boxes.len() {
            rows.push(PackRow {
                glyphs: start..boxes.len(),
                width: row_width,
                height: row_height,
            });
        }

        // Trailing advance and gutter of the last slot may hang past the row
        // limit; no bitmap pixel does.
        let width = rows.iter().map(|r| r.width).max().unwrap_or(0).min(max);
        let pitch = rows.iter().map(|r| r.height).max().unwrap_or(0);
        let height = match config.row_pitch {
            RowPitch::Uniform => pitch.saturating_mul(rows.len() as u32),
            RowPitch::PerRow => rows.iter().fold(0u32, |acc, r| acc.saturating_add(r.height)),
        };

        let limit = config.max_texture_size;
        if width > limit || height > limit {
            return Err(AtlasError::Overflow {
                width,
                height,
                limit,
            });
        }

        Ok(Self {
            rows,
            width,
            height,
            pitch,
            mode: config.row_pitch,
        })
    }

    pub fn rows(&self) -> &[PackRow] {
        &self.rows
    }

    /// Final atlas width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Final atlas height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Tallest slot across all rows; the uniform row pitch.
    pub fn pitch(&self) -> u32 {
        self.pitch
    }

    /// Height the atlas gives row `idx`.
    pub fn row_height(&self, idx: usize) -> u32 {
        match self.mode {
            RowPitch::Uniform => self.pitch,
            RowPitch::PerRow => self.rows.get(idx).map_or(0, |r| r.height),
        }
    }

    /// Top pixel row of row `idx`.
    pub fn row_top(&self, idx: usize) -> u32 {
        match self.mode {
            RowPitch::Uniform => self.pitch * idx as u32,
            RowPitch::PerRow => self.rows.iter().take(idx).map(|r| r.height).sum(),
        }
    }
}
