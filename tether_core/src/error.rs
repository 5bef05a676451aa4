//! Error taxonomy for atlas construction and glyph lookup.
//!
//! Only [`AtlasError`] ever reaches a caller of [`build_atlas`]. The other two
//! are recovered where they occur: a missing glyph becomes a zero-size
//! placeholder in the packer, an out-of-range byte becomes a placeholder quad
//! (or a blank advance) in the layout engine.
//!
//! [`build_atlas`]: crate::atlas::build_atlas

use std::error::Error;
use std::fmt;

/// The rasterizer cannot produce a glyph for this code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphUnavailable {
    pub code: u8,
}

impl fmt::Display for GlyphUnavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "glyph unavailable for code {}", self.code)
    }
}

impl Error for GlyphUnavailable {}

/// A lookup asked a [`GlyphTable`](crate::glyph::GlyphTable) for a code it
/// was not built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeOutOfRange {
    pub code: u8,
}

impl fmt::Display for CodeOutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "code {} is outside the glyph table range", self.code)
    }
}

impl Error for CodeOutOfRange {}

/// Fatal atlas construction failures.
///
/// These indicate a font size or character range the caller has to change
/// (smaller size, wider rows, or a split into several atlases).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtlasError {
    /// The character range has no codes in it.
    EmptyRange,
    /// `max_row_width` was zero.
    ZeroRowWidth,
    /// A single glyph bitmap is wider than a whole atlas row.
    GlyphTooWide { code: u8, width: u32, max: u32 },
    /// The packed atlas exceeds the texture size limit.
    Overflow { width: u32, height: u32, limit: u32 },
}

impl fmt::Display for AtlasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::EmptyRange => write!(f, "atlas character range is empty"),
            Self::ZeroRowWidth => write!(f, "atlas row width must be non-zero"),
            Self::GlyphTooWide { code, width, max } => write!(
                f,
                "glyph {code} is {width}px wide, wider than the {max}px atlas row"
            ),
            Self::Overflow {
                width,
                height,
                limit,
            } => write!(
                f,
                "packed atlas is {width}x{height}, over the {limit}px texture limit"
            ),
        }
    }
}

impl Error for AtlasError {}
