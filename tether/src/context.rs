//! Editor state: the glyph atlas, its table, the text buffer, and the
//! reusable vertex buffer, owned by one explicit context object.

use std::ops::RangeInclusive;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tether_core::layout::LayoutCursor;
use tether_core::{
    Atlas, GlyphRasterizer, GlyphTable, LayoutOptions, PackerConfig, TextLayout, VertexWriter,
    build_atlas,
};

/// Outcome of a background atlas build.
pub type AtlasBuild = anyhow::Result<(Atlas, GlyphTable)>;

/// Build an atlas on a worker thread.
///
/// `make` constructs the rasterizer on the worker, so it need not be `Send`
/// itself. The returned handle is the only synchronization point: join it to
/// get the atlas and table.
pub fn spawn_atlas_build<R, F>(
    make: F,
    range: RangeInclusive<u8>,
    config: PackerConfig,
) -> std::io::Result<JoinHandle<AtlasBuild>>
where
    R: GlyphRasterizer + 'static,
    F: FnOnce() -> anyhow::Result<R> + Send + 'static,
{
    thread::Builder::new()
        .name("atlas-build".into())
        .spawn(move || {
            let mut rasterizer = make()?;
            let (atlas, table) = build_atlas(range, &mut rasterizer, &config)?;
            log::info!(
                "atlas: built {}x{} with {} glyphs",
                atlas.width(),
                atlas.height(),
                table.len()
            );
            Ok((atlas, table))
        })
}

/// Owns everything one editor overlay needs to draw a frame.
pub struct EditorContext {
    atlas: Atlas,
    glyphs: Arc<GlyphTable>,
    options: LayoutOptions,
    text: Vec<u8>,
    vertices: Vec<u8>,
    quad_count: usize,
}

impl EditorContext {
    pub fn new(atlas: Atlas, glyphs: GlyphTable, options: LayoutOptions) -> Self {
        Self {
            atlas,
            glyphs: Arc::new(glyphs),
            options,
            text: Vec::new(),
            vertices: Vec::new(),
            quad_count: 0,
        }
    }

    pub fn atlas(&self) -> &Atlas {
        &self.atlas
    }

    /// Shared handle to the glyph table, for other threads or renderers.
    pub fn glyphs(&self) -> Arc<GlyphTable> {
        Arc::clone(&self.glyphs)
    }

    pub fn text(&self) -> &[u8] {
        &self.text
    }

    pub fn set_text(&mut self, text: &[u8]) {
        self.text.clear();
        self.text.extend_from_slice(text);
    }

    /// Append typed text at the end of the buffer.
    pub fn insert(&mut self, text: &str) {
        self.text.extend_from_slice(text.as_bytes());
    }

    /// Delete the last character, including all bytes of a multi-byte
    /// UTF-8 sequence.
    pub fn backspace(&mut self) {
        while let Some(byte) = self.text.pop() {
            if byte & 0xC0 != 0x80 {
                break;
            }
        }
    }

    /// Lay out the buffer and return the packed vertex bytes for this frame.
    ///
    /// The vertex buffer is reused across frames.
    pub fn frame(&mut self, viewport_height: f32) -> &[u8] {
        let engine = TextLayout::new(&self.glyphs, self.options);
        let mut writer = VertexWriter::from_buffer(std::mem::take(&mut self.vertices));
        writer.push_quads(engine.quads(&self.text, viewport_height));
        self.quad_count = writer.count() / 6;
        self.vertices = writer.into_buffer();
        &self.vertices
    }

    /// Quads produced by the last [`frame`](Self::frame).
    pub fn quad_count(&self) -> usize {
        self.quad_count
    }

    /// Pen position after the last byte of the buffer.
    pub fn caret(&self, viewport_height: f32) -> LayoutCursor {
        let engine = TextLayout::new(&self.glyphs, self.options);
        let mut quads = engine.quads(&self.text, viewport_height);
        quads.by_ref().for_each(drop);
        quads.cursor()
    }
}
