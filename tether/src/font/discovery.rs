//! Platform-specific font discovery: finding a font file on disk.
//!
//! Pure discovery: no font loading or rasterizing.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::FontError;
use crate::config::FontConfig;

/// Monospace fonts tried in priority order when no font is configured.
const CANDIDATES: &[&str] = &[
    "JetBrainsMono-Regular.ttf",
    "JetBrainsMonoNerdFont-Regular.ttf",
    "CascadiaMono.ttf",
    "Menlo.ttc",
    "SFNSMono.ttf",
    "Monaco.ttf",
    "UbuntuMono-Regular.ttf",
    "DejaVuSansMono.ttf",
    "LiberationMono-Regular.ttf",
    "NotoSansMono-Regular.ttf",
    "consola.ttf",
    "cour.ttf",
];

/// Extensions tried after a configured family name.
const FAMILY_SUFFIXES: &[&str] = &[
    ".ttf",
    "-Regular.ttf",
    ".otf",
    "-Regular.otf",
    ".ttc",
];

/// Directories scanned for font files on this platform.
pub fn font_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    #[cfg(target_os = "windows")]
    {
        if let Some(windir) = std::env::var_os("WINDIR") {
            dirs.push(PathBuf::from(windir).join("Fonts"));
        } else {
            dirs.push(PathBuf::from(r"C:\Windows\Fonts"));
        }
        if let Some(local) = std::env::var_os("LOCALAPPDATA") {
            dirs.push(PathBuf::from(local).join(r"Microsoft\Windows\Fonts"));
        }
    }
    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            dirs.push(PathBuf::from(home).join("Library/Fonts"));
        }
        dirs.push(PathBuf::from("/Library/Fonts"));
        dirs.push(PathBuf::from("/System/Library/Fonts"));
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(home) = std::env::var_os("HOME") {
            dirs.push(PathBuf::from(&home).join(".local/share/fonts"));
            dirs.push(PathBuf::from(home).join(".fonts"));
        }
        dirs.push(PathBuf::from("/usr/share/fonts"));
        dirs.push(PathBuf::from("/usr/local/share/fonts"));
    }
    dirs
}

/// Build a lowercase filename → full path index by scanning `dirs` once.
///
/// The first directory that contains a name wins.
pub fn build_font_index(dirs: &[PathBuf]) -> HashMap<String, PathBuf> {
    let mut index = HashMap::new();
    for dir in dirs {
        index_font_dir(dir, &mut index);
    }
    index
}

fn index_font_dir(dir: &Path, index: &mut HashMap<String, PathBuf>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            index_font_dir(&path, index);
        } else if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            index.entry(name.to_ascii_lowercase()).or_insert(path);
        } else {
            // Non-UTF-8 filename: skip
        }
    }
}

/// Look up the first of `names` present in `index`.
pub fn find_in_index<'a, I>(names: I, index: &HashMap<String, PathBuf>) -> Option<PathBuf>
where
    I: IntoIterator<Item = &'a str>,
{
    names
        .into_iter()
        .find_map(|name| index.get(&name.to_ascii_lowercase()).cloned())
}

/// Resolve the font file to load.
///
/// An explicit `path` wins. Otherwise `family` is matched against file names
/// in the platform font directories, then the built-in monospace candidates
/// are tried.
pub fn resolve(font: &FontConfig) -> Result<PathBuf, FontError> {
    if let Some(path) = &font.path {
        return Ok(path.clone());
    }
    let index = build_font_index(&font_dirs());
    log::debug!("font: indexed {} files", index.len());
    resolve_in(font.family.as_deref(), &index)
}

/// Resolve against a prebuilt index.
pub fn resolve_in(
    family: Option<&str>,
    index: &HashMap<String, PathBuf>,
) -> Result<PathBuf, FontError> {
    if let Some(family) = family {
        let names: Vec<String> = FAMILY_SUFFIXES
            .iter()
            .map(|suffix| format!("{family}{suffix}"))
            .collect();
        if let Some(path) = find_in_index(names.iter().map(String::as_str), index) {
            return Ok(path);
        }
        log::warn!("font: family {family:?} not found, trying defaults");
    }
    find_in_index(CANDIDATES.iter().copied(), index).ok_or_else(|| FontError::NotFound {
        family: family.map(str::to_owned),
    })
}
