//! Text layout: byte buffer → positioned, UV-mapped glyph quads.
//!
//! Layout space has its origin at the bottom-left of the viewport with y
//! growing upward. The pen starts on the first line, one line height below
//! the top edge, and walks the buffer byte by byte:
//!
//! - `\t` moves the pen by `tab_width` space advances.
//! - `\n` returns to the left margin and drops one line.
//! - Glyphs without ink (space) only move the pen.
//! - Everything else emits one [`Quad`] and moves the pen by its advance.
//!
//! Bytes the glyph table does not cover are drawn with a placeholder glyph
//! (`?` by default) or, failing that, skipped with a space advance. Layout is
//! a pure function of its inputs: calling it twice yields the same quads.

mod vertex_writer;

pub use vertex_writer::{VERTEX_STRIDE, VertexWriter};

use std::iter::FusedIterator;

use crate::glyph::{GlyphMetrics, GlyphTable};

const TAB: u8 = b'\t';
const NEWLINE: u8 = b'\n';

/// One corner of a glyph quad.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
    pub color: [f32; 4],
}

/// Two counter-clockwise triangles covering one glyph.
///
/// Vertex order: bottom-left, bottom-right, top-right, then bottom-left,
/// top-right, top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    /// Code of the glyph drawn (the placeholder's code for substitutes).
    pub code: u8,
    pub vertices: [Vertex; 6],
}

impl Quad {
    fn new(
        code: u8,
        min: [f32; 2],
        max: [f32; 2],
        uv_min: [f32; 2],
        uv_max: [f32; 2],
        color: [f32; 4],
    ) -> Self {
        let bl = Vertex {
            position: min,
            uv: uv_min,
            color,
        };
        let br = Vertex {
            position: [max[0], min[1]],
            uv: [uv_max[0], uv_min[1]],
            color,
        };
        let tr = Vertex {
            position: max,
            uv: uv_max,
            color,
        };
        let tl = Vertex {
            position: [min[0], max[1]],
            uv: [uv_min[0], uv_max[1]],
            color,
        };
        Self {
            code,
            vertices: [bl, br, tr, bl, tr, tl],
        }
    }

    /// Bottom-left corner in layout space.
    pub fn min(&self) -> [f32; 2] {
        self.vertices[0].position
    }

    /// Top-right corner in layout space.
    pub fn max(&self) -> [f32; 2] {
        self.vertices[2].position
    }
}

/// Layout parameters that stay fixed across frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutOptions {
    /// Pen x at the start of every line.
    pub left_margin: f32,
    /// Tab stop width in spaces.
    pub tab_width: u32,
    /// Vertex color for every quad.
    pub color: [f32; 4],
    /// Soft-wrap lines that would run past `left_margin + wrap_width`.
    pub wrap_width: Option<f32>,
    /// Glyph drawn for bytes outside the table. `None` skips them.
    pub placeholder: Option<u8>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            left_margin: 0.0,
            tab_width: 4,
            color: [1.0, 1.0, 1.0, 1.0],
            wrap_width: None,
            placeholder: Some(b'?'),
        }
    }
}

/// Pen position while walking a buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutCursor {
    pub x: f32,
    pub y: f32,
    pub line_height: f32,
}

/// Lays text out against one glyph table.
#[derive(Debug, Clone, Copy)]
pub struct TextLayout<'g> {
    glyphs: &'g GlyphTable,
    options: LayoutOptions,
}

impl<'g> TextLayout<'g> {
    pub fn new(glyphs: &'g GlyphTable, options: LayoutOptions) -> Self {
        Self { glyphs, options }
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Lazily produce the quads for `text` in a viewport `viewport_height`
    /// pixels tall. Each call starts a fresh walk.
    pub fn quads<'t>(&self, text: &'t [u8], viewport_height: f32) -> Quads<'g, 't> {
        let line_height = self.glyphs.line_height() as f32;
        Quads {
            glyphs: self.glyphs,
            options: self.options,
            text,
            pos: 0,
            cursor: LayoutCursor {
                x: self.options.left_margin,
                y: viewport_height - line_height,
                line_height,
            },
        }
    }

    /// Materialize every quad for `text`.
    pub fn layout(&self, text: &[u8], viewport_height: f32) -> Vec<Quad> {
        self.quads(text, viewport_height).collect()
    }
}

/// Lay `text` out with default options.
pub fn layout(text: &[u8], glyphs: &GlyphTable, viewport_height: f32) -> Vec<Quad> {
    TextLayout::new(glyphs, LayoutOptions::default()).layout(text, viewport_height)
}

/// Iterator over the quads of one buffer.
#[derive(Debug, Clone)]
pub struct Quads<'g, 't> {
    glyphs: &'g GlyphTable,
    options: LayoutOptions,
    text: &'t [u8],
    pos: usize,
    cursor: LayoutCursor,
}

impl Quads<'_, '_> {
    /// Current pen position: after the last consumed byte.
    pub fn cursor(&self) -> LayoutCursor {
        self.cursor
    }

    fn new_line(&mut self) {
        self.cursor.x = self.options.left_margin;
        self.cursor.y -= self.cursor.line_height;
    }

    /// Wrap first if `advance` would carry a non-empty line past the limit.
    fn fit(&mut self, advance: f32) {
        let Some(width) = self.options.wrap_width else {
            return;
        };
        let left = self.options.left_margin;
        if self.cursor.x > left && self.cursor.x + advance > left + width {
            self.new_line();
        }
    }

    /// Metrics for `byte`, substituting the placeholder for uncovered codes.
    fn resolve(&self, byte: u8) -> Option<&GlyphMetrics> {
        match self.glyphs.get(byte) {
            Ok(m) => Some(m),
            Err(e) => {
                log::trace!("layout: {e}, substituting placeholder");
                self.options
                    .placeholder
                    .and_then(|code| self.glyphs.get(code).ok())
            }
        }
    }

    fn emit(&self, m: &GlyphMetrics) -> Quad {
        let left = self.cursor.x + m.bearing.0 as f32;
        let bottom = self.cursor.y + m.bearing.1 as f32;
        let (w, h) = (m.bitmap_size.0 as f32, m.bitmap_size.1 as f32);
        let (u1, v1) = m.uv_max();
        Quad::new(
            m.code,
            [left, bottom],
            [left + w, bottom + h],
            [m.uv.0, m.uv.1],
            [u1, v1],
            self.options.color,
        )
    }
}

impl Iterator for Quads<'_, '_> {
    type Item = Quad;

    fn next(&mut self) -> Option<Quad> {
        while let Some(&byte) = self.text.get(self.pos) {
            self.pos += 1;
            match byte {
                TAB => {
                    let space = self.glyphs.space_advance() as f32;
                    self.cursor.x += space * self.options.tab_width as f32;
                }
                NEWLINE => self.new_line(),
                _ => {
                    let Some(m) = self.resolve(byte).copied() else {
                        let space = self.glyphs.space_advance() as f32;
                        self.fit(space);
                        self.cursor.x += space;
                        continue;
                    };
                    let advance = m.advance as f32;
                    self.fit(advance);
                    let quad = (!m.is_empty()).then(|| self.emit(&m));
                    self.cursor.x += advance;
                    if quad.is_some() {
                        return quad;
                    }
                }
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.text.len() - self.pos))
    }
}

impl FusedIterator for Quads<'_, '_> {}
