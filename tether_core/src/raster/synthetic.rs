//! Font-free rasterizer producing synthetic fixed-size glyphs.
//!
//! Used by tests and benches, and handy for bringing up a renderer before a
//! real font is wired in. Every non-space glyph is a solid block filled with
//! its own character code, so a glyph's pixels can be told apart in the atlas.

use std::collections::BTreeMap;

use super::{GlyphBox, GlyphCanvas, GlyphRasterizer};
use crate::error::GlyphUnavailable;

/// Deterministic rasterizer with configurable glyph shapes.
#[derive(Debug, Clone)]
pub struct SyntheticRasterizer {
    base: GlyphBox,
    space_advance: u32,
    overrides: BTreeMap<u8, GlyphBox>,
    missing: Vec<u8>,
    unrenderable: Vec<u8>,
}

impl SyntheticRasterizer {
    /// Every printable glyph is a `width`×`height` block advancing `advance`;
    /// space is blank with the same advance.
    pub fn new(width: u32, height: u32, advance: u32) -> Self {
        Self {
            base: GlyphBox {
                width,
                height,
                origin_y: height,
                bearing_x: 0,
                bearing_y: 0,
                advance,
            },
            space_advance: advance,
            overrides: BTreeMap::new(),
            missing: Vec::new(),
            unrenderable: Vec::new(),
        }
    }

    /// Give `code` its own box.
    #[must_use]
    pub fn with_glyph(mut self, code: u8, glyph: GlyphBox) -> Self {
        self.overrides.insert(code, glyph);
        self
    }

    /// Pretend the font has no glyph for these codes.
    #[must_use]
    pub fn with_missing(mut self, codes: &[u8]) -> Self {
        self.missing.extend_from_slice(codes);
        self
    }

    /// Measure these codes normally but fail when asked to render them.
    #[must_use]
    pub fn with_unrenderable(mut self, codes: &[u8]) -> Self {
        self.unrenderable.extend_from_slice(codes);
        self
    }

    fn lookup(&self, code: u8) -> Result<GlyphBox, GlyphUnavailable> {
        if self.missing.contains(&code) {
            return Err(GlyphUnavailable { code });
        }
        if let Some(glyph) = self.overrides.get(&code) {
            return Ok(*glyph);
        }
        if code == b' ' {
            return Ok(GlyphBox::blank(self.space_advance));
        }
        Ok(self.base)
    }
}

impl GlyphRasterizer for SyntheticRasterizer {
    fn measure(&mut self, code: u8) -> Result<GlyphBox, GlyphUnavailable> {
        self.lookup(code)
    }

    fn render(&mut self, code: u8, canvas: &mut GlyphCanvas<'_>) -> Result<(), GlyphUnavailable> {
        if self.unrenderable.contains(&code) {
            return Err(GlyphUnavailable { code });
        }
        let glyph = self.lookup(code)?;
        if !glyph.is_empty() {
            canvas.fill(code);
        }
        Ok(())
    }

    fn fallback_advance(&self) -> u32 {
        self.space_advance
    }
}
