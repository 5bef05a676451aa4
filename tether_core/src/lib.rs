//! Glyph atlas packing and text layout.
//!
//! This crate turns a font (through the [`GlyphRasterizer`] capability) into
//! a packed single-channel [`Atlas`] plus a [`GlyphTable`], and turns a text
//! buffer into positioned, UV-mapped [`Quad`]s ready for a vertex buffer. It
//! contains no GUI, GPU, or platform-specific code.

#![deny(unsafe_code)]

pub mod atlas;
pub mod error;
pub mod glyph;
pub mod layout;
pub mod raster;

pub use atlas::{Atlas, PackPlan, PackerConfig, RowPitch, build_atlas};
pub use error::{AtlasError, CodeOutOfRange, GlyphUnavailable};
pub use glyph::{GlyphMetrics, GlyphTable};
pub use layout::{LayoutOptions, Quad, Quads, TextLayout, Vertex, VertexWriter, layout};
pub use raster::{GlyphBox, GlyphCanvas, GlyphRasterizer, SyntheticRasterizer};

/// First printable ASCII code (space).
pub const FIRST_PRINTABLE: u8 = 32;

/// Last printable ASCII code (`~`).
pub const LAST_PRINTABLE: u8 = 126;
