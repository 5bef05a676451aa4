//! Font discovery and rasterizer tests.
//!
//! Rasterizer tests need a real font; they return early on systems without
//! any of the candidate fonts installed.

use std::collections::HashMap;
use std::path::PathBuf;

use tether_core::{
    FIRST_PRINTABLE, GlyphRasterizer, LAST_PRINTABLE, PackerConfig, build_atlas,
};

use super::discovery::{self, build_font_index, find_in_index, resolve_in};
use super::{FontError, SwashRasterizer};
use crate::config::FontConfig;

fn system_font() -> Option<SwashRasterizer> {
    let path = discovery::resolve(&FontConfig::default()).ok()?;
    SwashRasterizer::load(&path, 20.0).ok()
}

fn index(names: &[&str]) -> HashMap<String, PathBuf> {
    names
        .iter()
        .map(|n| (n.to_ascii_lowercase(), PathBuf::from("/fonts").join(n)))
        .collect()
}

#[test]
fn family_lookup_tries_suffixes() {
    let idx = index(&["Hack-Regular.ttf", "DejaVuSansMono.ttf"]);
    let path = resolve_in(Some("Hack"), &idx).expect("found");
    assert_eq!(path, PathBuf::from("/fonts/Hack-Regular.ttf"));
}

#[test]
fn family_lookup_ignores_case() {
    let idx = index(&["Hack-Regular.ttf"]);
    assert!(resolve_in(Some("hack"), &idx).is_ok());
}

#[test]
fn unknown_family_falls_back_to_candidates() {
    let idx = index(&["DejaVuSansMono.ttf"]);
    let path = resolve_in(Some("NoSuchFont"), &idx).expect("fallback");
    assert_eq!(path, PathBuf::from("/fonts/DejaVuSansMono.ttf"));
}

#[test]
fn candidates_follow_priority_order() {
    let idx = index(&["LiberationMono-Regular.ttf", "JetBrainsMono-Regular.ttf"]);
    let path = resolve_in(None, &idx).expect("found");
    assert_eq!(path, PathBuf::from("/fonts/JetBrainsMono-Regular.ttf"));
}

#[test]
fn empty_index_is_not_found() {
    let err = resolve_in(Some("Hack"), &HashMap::new()).expect_err("nothing installed");
    assert!(matches!(err, FontError::NotFound { family: Some(_) }));
}

#[test]
fn explicit_path_wins_without_scanning() {
    let font = FontConfig {
        path: Some(PathBuf::from("/somewhere/else.ttf")),
        ..FontConfig::default()
    };
    assert_eq!(
        discovery::resolve(&font).expect("explicit"),
        PathBuf::from("/somewhere/else.ttf")
    );
}

#[test]
fn index_scans_nested_directories() {
    let root = std::env::temp_dir().join(format!("tether-font-index-{}", std::process::id()));
    let nested = root.join("truetype").join("mono");
    std::fs::create_dir_all(&nested).expect("create dirs");
    std::fs::write(nested.join("Fake-Regular.ttf"), b"not a font").expect("write");

    let idx = build_font_index(&[root.clone()]);
    let found = find_in_index(["fake-regular.ttf"], &idx);
    let _ = std::fs::remove_dir_all(&root);
    assert_eq!(found, Some(nested.join("Fake-Regular.ttf")));
}

#[test]
fn garbage_bytes_are_rejected() {
    let err = SwashRasterizer::from_bytes(b"definitely not a font".to_vec(), 16.0)
        .err()
        .expect("invalid");
    assert!(matches!(err, FontError::Invalid { path: None }));
}

#[test]
fn missing_file_is_a_read_error() {
    let err = SwashRasterizer::load(std::path::Path::new("/nonexistent/font.ttf"), 16.0)
        .err()
        .expect("missing");
    assert!(matches!(err, FontError::Read { .. }));
    assert!(err.to_string().contains("/nonexistent/font.ttf"));
}

#[test]
fn measures_ink_and_blank_glyphs() {
    let Some(mut raster) = system_font() else {
        return;
    };
    let a = raster.measure(b'A').expect("A");
    assert!(a.width > 0 && a.height > 0);
    assert_eq!(a.origin_y, a.height);
    assert!(a.advance > 0);

    let space = raster.measure(b' ').expect("space");
    assert!(space.is_empty());
    assert!(space.advance > 0);
    assert!(raster.fallback_advance() > 0);
}

#[test]
fn descenders_sit_below_baseline_glyphs() {
    let Some(mut raster) = system_font() else {
        return;
    };
    let x = raster.measure(b'x').expect("x");
    let p = raster.measure(b'p').expect("p");
    assert!(p.bearing_y < x.bearing_y);
}

#[test]
fn packs_printable_ascii_from_a_real_font() {
    let Some(mut raster) = system_font() else {
        return;
    };
    let (atlas, table) = build_atlas(
        FIRST_PRINTABLE..=LAST_PRINTABLE,
        &mut raster,
        &PackerConfig::default(),
    )
    .expect("atlas builds");
    assert_eq!(table.len(), 95);
    assert!(atlas.coverage() > 0);
    let m = table.get(b'M').expect("M");
    assert!(!m.is_empty());
    assert!(table.line_height() >= m.bitmap_size.1);
}
