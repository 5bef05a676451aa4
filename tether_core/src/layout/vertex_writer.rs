//! Vertex byte buffer writer: packs quads for a vertex buffer upload.

use super::{Quad, Vertex};

/// Vertex stride in bytes: 32 bytes per vertex.
///
/// Layout:
///   [0..8]   position: vec2<f32>  (layout-space pixels)
///   [8..16]  uv:       vec2<f32>  (atlas UV, v up)
///   [16..32] color:    vec4<f32>  (RGBA)
pub const VERTEX_STRIDE: usize = 32;

/// Writes quad vertices to a byte buffer without unsafe code.
pub struct VertexWriter {
    data: Vec<u8>,
}

impl Default for VertexWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl VertexWriter {
    pub fn new() -> Self {
        Self {
            data: Vec::with_capacity(4096),
        }
    }

    /// Reuse an existing byte buffer, clearing its contents but keeping its allocation.
    pub fn from_buffer(mut buf: Vec<u8>) -> Self {
        buf.clear();
        Self { data: buf }
    }

    /// Consume the writer, returning the underlying byte buffer for reuse.
    pub fn into_buffer(self) -> Vec<u8> {
        self.data
    }

    /// Append all six vertices of a quad.
    pub fn push_quad(&mut self, quad: &Quad) {
        for vertex in &quad.vertices {
            self.push_vertex(vertex);
        }
    }

    /// Append every quad from an iterator.
    pub fn push_quads<I: IntoIterator<Item = Quad>>(&mut self, quads: I) {
        for quad in quads {
            self.push_quad(&quad);
        }
    }

    fn push_vertex(&mut self, vertex: &Vertex) {
        for &v in vertex.position.iter().chain(&vertex.uv).chain(&vertex.color) {
            self.data.extend_from_slice(&v.to_ne_bytes());
        }
    }

    /// Number of vertices written.
    pub fn count(&self) -> usize {
        self.data.len() / VERTEX_STRIDE
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}
