//! Font loading and swash-backed glyph rasterization.
//!
//! [`SwashRasterizer`] owns the raw font bytes and a swash `ScaleContext`,
//! and implements the [`GlyphRasterizer`] capability the atlas packer
//! consumes. Each glyph is rendered once: the bitmap produced while
//! measuring is kept until the packer asks for it.

pub mod discovery;

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use swash::scale::{Render, ScaleContext, Source};
use swash::zeno::Format;
use swash::{CacheKey, FontRef};
use tether_core::{GlyphBox, GlyphCanvas, GlyphRasterizer, GlyphUnavailable};

/// Failure to locate or load a font file.
#[derive(Debug)]
pub enum FontError {
    /// No configured or candidate font exists on this system.
    NotFound { family: Option<String> },
    /// The file could not be read.
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The bytes are not a font swash can parse.
    Invalid { path: Option<PathBuf> },
}

impl fmt::Display for FontError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { family: Some(family) } => {
                write!(f, "font family {family:?} not found and no fallback font installed")
            }
            Self::NotFound { family: None } => write!(f, "no monospace font found"),
            Self::Read { path, source } => {
                write!(f, "failed to read font {}: {source}", path.display())
            }
            Self::Invalid { path: Some(path) } => {
                write!(f, "{} is not a valid font file", path.display())
            }
            Self::Invalid { path: None } => write!(f, "invalid font data"),
        }
    }
}

impl std::error::Error for FontError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// One rendered alpha bitmap, kept between `measure` and `render`.
struct Bitmap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

/// A [`GlyphRasterizer`] for one font face at one pixel size.
pub struct SwashRasterizer {
    bytes: Vec<u8>,
    /// Byte offset to the font table directory (from `FontRef::from_index`).
    offset: u32,
    key: CacheKey,
    size: f32,
    /// Pixels between the line bottom and the baseline.
    descent: i32,
    fallback_advance: u32,
    scale: ScaleContext,
    rendered: HashMap<u8, Bitmap>,
}

impl SwashRasterizer {
    /// Parse the first face of `bytes` for rendering at `size` pixels per em.
    pub fn from_bytes(bytes: Vec<u8>, size: f32) -> Result<Self, FontError> {
        let fr = FontRef::from_index(&bytes, 0).ok_or(FontError::Invalid { path: None })?;
        let (offset, key) = (fr.offset, fr.key);
        let descent = fr.metrics(&[]).scale(size).descent.abs().ceil() as i32;
        let glyphs = fr.glyph_metrics(&[]).scale(size);
        let charmap = fr.charmap();
        let fallback_advance = [' ', 'M']
            .into_iter()
            .map(|ch| charmap.map(ch))
            .find(|&gid| gid != 0)
            .map_or(0, |gid| glyphs.advance_width(gid).ceil() as u32);

        Ok(Self {
            bytes,
            offset,
            key,
            size,
            descent,
            fallback_advance,
            scale: ScaleContext::new(),
            rendered: HashMap::new(),
        })
    }

    /// Read and parse a font file.
    pub fn load(path: &Path, size: f32) -> Result<Self, FontError> {
        let bytes = std::fs::read(path).map_err(|source| FontError::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::from_bytes(bytes, size).map_err(|_| FontError::Invalid {
            path: Some(path.to_owned()),
        })
    }

    /// Pixel size this rasterizer renders at.
    pub fn size(&self) -> f32 {
        self.size
    }

    fn font_ref(&self) -> FontRef<'_> {
        FontRef {
            data: &self.bytes,
            offset: self.offset,
            key: self.key,
        }
    }

    /// Glyph id for `code`, or `None` when the font has no glyph for it.
    fn glyph_id(&self, code: u8) -> Option<u16> {
        let gid = self.font_ref().charmap().map(char::from(code));
        (gid != 0).then_some(gid)
    }

    /// Rasterize `gid` as hinted alpha coverage. `None` for glyphs without
    /// an outline.
    fn rasterize(&mut self, gid: u16) -> Option<(Bitmap, i32, i32)> {
        let fr = FontRef {
            data: &self.bytes,
            offset: self.offset,
            key: self.key,
        };
        let mut scaler = self.scale.builder(fr).size(self.size).hint(true).build();
        let image = Render::new(&[Source::Outline])
            .format(Format::Alpha)
            .render(&mut scaler, gid)?;
        let placement = image.placement;
        let bitmap = Bitmap {
            width: placement.width,
            height: placement.height,
            data: image.data,
        };
        Some((bitmap, placement.left, placement.top))
    }
}

impl GlyphRasterizer for SwashRasterizer {
    fn measure(&mut self, code: u8) -> Result<GlyphBox, GlyphUnavailable> {
        let gid = self.glyph_id(code).ok_or(GlyphUnavailable { code })?;
        let advance = self
            .font_ref()
            .glyph_metrics(&[])
            .scale(self.size)
            .advance_width(gid)
            .ceil() as u32;

        let Some((bitmap, left, top)) = self.rasterize(gid) else {
            return Ok(GlyphBox::blank(advance));
        };
        if bitmap.width == 0 || bitmap.height == 0 {
            return Ok(GlyphBox::blank(advance));
        }
        let glyph = GlyphBox {
            width: bitmap.width,
            height: bitmap.height,
            origin_y: bitmap.height,
            bearing_x: left,
            // `top` is measured up from the baseline.
            bearing_y: self.descent + top - bitmap.height as i32,
            advance,
        };
        self.rendered.insert(code, bitmap);
        Ok(glyph)
    }

    fn render(&mut self, code: u8, canvas: &mut GlyphCanvas<'_>) -> Result<(), GlyphUnavailable> {
        let bitmap = match self.rendered.remove(&code) {
            Some(bitmap) => bitmap,
            None => {
                let gid = self.glyph_id(code).ok_or(GlyphUnavailable { code })?;
                self.rasterize(gid).ok_or(GlyphUnavailable { code })?.0
            }
        };
        canvas.blit(&bitmap.data, bitmap.width, bitmap.height);
        Ok(())
    }

    fn fallback_advance(&self) -> u32 {
        self.fallback_advance
    }
}

#[cfg(test)]
mod tests;
