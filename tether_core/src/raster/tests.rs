use super::{GlyphBox, GlyphCanvas, GlyphRasterizer, SyntheticRasterizer};
use crate::error::GlyphUnavailable;

#[test]
fn canvas_put_stays_inside_box() {
    let mut pixels = vec![0u8; 8 * 4];
    let mut canvas = GlyphCanvas::new(&mut pixels, 8, 2, 1, 3, 2);
    canvas.put(0, 0, 9);
    canvas.put(2, 1, 9);
    // Outside the box on both axes.
    canvas.put(3, 0, 7);
    canvas.put(0, 2, 7);
    assert_eq!(pixels[8 + 2], 9);
    assert_eq!(pixels[2 * 8 + 4], 9);
    assert!(!pixels.contains(&7));
}

#[test]
fn canvas_box_is_clipped_to_bitmap() {
    let mut pixels = vec![0u8; 4 * 4];
    let canvas = GlyphCanvas::new(&mut pixels, 4, 3, 2, 5, 5);
    assert_eq!(canvas.width(), 1);
    assert_eq!(canvas.height(), 2);
    assert_eq!(canvas.offset(), (3, 2));
}

#[test]
fn canvas_blit_clips_larger_source() {
    let mut pixels = vec![0u8; 6 * 3];
    let src: Vec<u8> = (1..=12).collect();
    let mut canvas = GlyphCanvas::new(&mut pixels, 6, 1, 1, 2, 2);
    canvas.blit(&src, 4, 3);
    assert_eq!(&pixels[6..12], &[0, 1, 2, 0, 0, 0]);
    assert_eq!(&pixels[12..18], &[0, 5, 6, 0, 0, 0]);
    assert!(pixels[..6].iter().all(|&p| p == 0));
}

#[test]
fn canvas_fill_covers_exactly_the_box() {
    let mut pixels = vec![0u8; 5 * 5];
    GlyphCanvas::new(&mut pixels, 5, 1, 1, 3, 2).fill(4);
    let filled = pixels.iter().filter(|&&p| p == 4).count();
    assert_eq!(filled, 6);
    assert_eq!(pixels[5 + 1], 4);
    assert_eq!(pixels[2 * 5 + 3], 4);
    assert_eq!(pixels[3 * 5 + 1], 0);
}

#[test]
fn synthetic_space_is_blank() {
    let mut raster = SyntheticRasterizer::new(6, 10, 8);
    let space = raster.measure(b' ').expect("space");
    assert!(space.is_empty());
    assert_eq!(space.advance, 8);
    let a = raster.measure(b'A').expect("A");
    assert_eq!((a.width, a.height, a.origin_y, a.advance), (6, 10, 10, 8));
}

#[test]
fn synthetic_missing_and_overrides() {
    let tall = GlyphBox {
        width: 4,
        height: 14,
        origin_y: 14,
        bearing_x: 1,
        bearing_y: -3,
        advance: 8,
    };
    let mut raster = SyntheticRasterizer::new(6, 10, 8)
        .with_glyph(b'g', tall)
        .with_missing(&[b'#']);
    assert_eq!(raster.measure(b'g'), Ok(tall));
    assert_eq!(raster.measure(b'#'), Err(GlyphUnavailable { code: b'#' }));
    assert_eq!(raster.fallback_advance(), 8);
}

#[test]
fn synthetic_render_fills_with_code() {
    let mut raster = SyntheticRasterizer::new(2, 2, 3);
    let mut pixels = vec![0u8; 4 * 2];
    let mut canvas = GlyphCanvas::new(&mut pixels, 4, 1, 0, 2, 2);
    raster.render(b'A', &mut canvas).expect("render");
    assert_eq!(pixels, vec![0, 65, 65, 0, 0, 65, 65, 0]);
}

#[test]
fn slot_height_covers_origin_offset() {
    let glyph = GlyphBox {
        width: 3,
        height: 5,
        origin_y: 8,
        ..GlyphBox::default()
    };
    assert_eq!(glyph.slot_height(), 8);
    assert_eq!(GlyphBox::blank(4).slot_height(), 0);
}
