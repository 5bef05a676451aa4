use super::{GlyphMetrics, GlyphTable};
use crate::error::CodeOutOfRange;

fn entry(code: u8, height: u32, advance: u32) -> GlyphMetrics {
    GlyphMetrics {
        code,
        atlas_origin: (0, 0),
        bitmap_size: (4, height),
        bearing: (0, 0),
        uv: (0.25, 0.5),
        uv_size: (0.125, 0.25),
        advance,
    }
}

fn table() -> GlyphTable {
    let entries = vec![
        GlyphMetrics::placeholder(b' ', 7),
        entry(b'!', 9, 7),
        entry(b'"', 12, 7),
    ];
    GlyphTable::new(b' ', entries, (32, 48))
}

#[test]
fn lookup_inside_range() {
    let t = table();
    assert_eq!(t.get(b'!').map(|m| m.code), Ok(b'!'));
    assert!(t.contains(b'"'));
    assert_eq!(t.len(), 3);
    assert_eq!(t.range(), b' '..=b'"');
}

#[test]
fn lookup_outside_range_fails() {
    let t = table();
    assert_eq!(t.get(b'A'), Err(CodeOutOfRange { code: b'A' }));
    assert_eq!(t.get(b'\n'), Err(CodeOutOfRange { code: b'\n' }));
    assert!(!t.contains(0));
}

#[test]
fn line_height_is_tallest_bitmap() {
    assert_eq!(table().line_height(), 12);
}

#[test]
fn space_advance_reads_space_entry() {
    assert_eq!(table().space_advance(), 7);
    let no_space = GlyphTable::new(b'A', vec![entry(b'A', 10, 9)], (16, 16));
    assert_eq!(no_space.space_advance(), 9);
}

#[test]
fn uv_max_adds_uv_size() {
    let m = entry(b'x', 8, 5);
    assert_eq!(m.uv_max(), (0.375, 0.75));
    assert_eq!(m.atlas_rect(), (0, 0, 4, 8));
}

#[test]
fn placeholder_is_empty() {
    let m = GlyphMetrics::placeholder(b'#', 6);
    assert!(m.is_empty());
    assert_eq!(m.advance, 6);
    assert!(!entry(b'a', 3, 3).is_empty());
}

#[test]
fn table_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GlyphTable>();
}
