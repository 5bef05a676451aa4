//! Configuration structures and loading logic.

mod io;

pub use io::{config_dir, config_path};

use std::ops::RangeInclusive;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tether_core::{FIRST_PRINTABLE, LAST_PRINTABLE, LayoutOptions, PackerConfig, RowPitch};

/// Default font size in pixels per em.
pub const FONT_SIZE: f32 = 24.0;
pub const MIN_FONT_SIZE: f32 = 6.0;
pub const MAX_FONT_SIZE: f32 = 96.0;

/// Top-level configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub font: FontConfig,
    pub atlas: AtlasConfig,
    pub layout: LayoutConfig,
    pub log: LogConfig,
}

/// Font selection and the character range packed into the atlas.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Explicit font file. Takes priority over `family`.
    pub path: Option<PathBuf>,
    /// Font file base name to look up in the platform font directories,
    /// e.g. `"Menlo"` or `"JetBrainsMono"`.
    pub family: Option<String>,
    pub size: f32,
    pub first_char: u8,
    pub last_char: u8,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            path: None,
            family: None,
            size: FONT_SIZE,
            first_char: FIRST_PRINTABLE,
            last_char: LAST_PRINTABLE,
        }
    }
}

impl FontConfig {
    /// Returns `size` clamped to [`MIN_FONT_SIZE`, `MAX_FONT_SIZE`].
    pub fn effective_size(&self) -> f32 {
        self.size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE)
    }

    /// Character range for the atlas. Empty when `first_char > last_char`.
    pub fn range(&self) -> RangeInclusive<u8> {
        self.first_char..=self.last_char
    }
}

/// Row pitch mode as spelled in the config file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowPitchMode {
    /// Every row as tall as the tallest glyph (compatible layout).
    #[default]
    Uniform,
    /// Every row as tall as its own tallest glyph.
    PerRow,
}

/// Atlas packing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AtlasConfig {
    pub max_row_width: u32,
    pub max_texture_size: u32,
    pub row_pitch: RowPitchMode,
    /// Write the packed atlas to this PNG file after building it.
    pub dump_path: Option<PathBuf>,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        let packer = PackerConfig::default();
        Self {
            max_row_width: packer.max_row_width,
            max_texture_size: packer.max_texture_size,
            row_pitch: RowPitchMode::Uniform,
            dump_path: None,
        }
    }
}

impl AtlasConfig {
    pub fn packer_config(&self) -> PackerConfig {
        PackerConfig {
            max_row_width: self.max_row_width,
            max_texture_size: self.max_texture_size,
            row_pitch: match self.row_pitch {
                RowPitchMode::Uniform => RowPitch::Uniform,
                RowPitchMode::PerRow => RowPitch::PerRow,
            },
        }
    }
}

/// Text layout configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub viewport_height: f32,
    pub tab_width: u32,
    pub left_margin: f32,
    /// Text color as "#RRGGBB" or "#RGB" hex.
    pub color: String,
    /// Soft-wrap width in pixels. Unset disables wrapping.
    pub wrap_width: Option<f32>,
    /// Character drawn for bytes the atlas does not cover. Empty disables it.
    pub placeholder: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            viewport_height: 600.0,
            tab_width: 4,
            left_margin: 0.0,
            color: "#ffffff".to_owned(),
            wrap_width: None,
            placeholder: "?".to_owned(),
        }
    }
}

impl LayoutConfig {
    /// Convert to engine options, falling back to white for a bad color and
    /// to no placeholder for a non-ASCII one.
    pub fn options(&self) -> LayoutOptions {
        let color = parse_hex_color(&self.color).unwrap_or_else(|| {
            log::warn!("config: invalid layout color {:?}, using white", self.color);
            [1.0, 1.0, 1.0, 1.0]
        });
        let placeholder = self.placeholder.bytes().next().filter(u8::is_ascii_graphic);
        LayoutOptions {
            left_margin: self.left_margin,
            tab_width: self.tab_width,
            color,
            wrap_width: self.wrap_width.filter(|w| *w > 0.0),
            placeholder,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`.
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
        }
    }
}

impl LogConfig {
    /// Parsed level, `Info` when unrecognized.
    pub fn level_filter(&self) -> log::LevelFilter {
        self.level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

/// Parse "#RRGGBB" or "#RGB" to opaque linear RGBA in `0.0..=1.0`.
pub fn parse_hex_color(s: &str) -> Option<[f32; 4]> {
    let hex = s.strip_prefix('#').unwrap_or(s);
    if !hex.is_ascii() {
        return None;
    }
    let channel = |digits: &str| u8::from_str_radix(digits, 16).ok();
    let (r, g, b) = match hex.len() {
        6 => (channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?),
        3 => (
            channel(&hex[0..1])? * 17,
            channel(&hex[1..2])? * 17,
            channel(&hex[2..3])? * 17,
        ),
        _ => return None,
    };
    Some([
        f32::from(r) / 255.0,
        f32::from(g) / 255.0,
        f32::from(b) / 255.0,
        1.0,
    ])
}

#[cfg(test)]
mod tests;
