use super::*;

fn px(pixmap: &vello_cpu::Pixmap, x: u32, y: u32) -> [u8; 4] {
    let w = u32::from(pixmap.width());
    let i = ((y * w + x) * 4) as usize;
    let d = pixmap.data_as_u8_slice();
    [d[i], d[i + 1], d[i + 2], d[i + 3]]
}

fn solid(w: u32, h: u32, rgba: [u8; 4]) -> PreparedImage {
    let mut bytes = Vec::with_capacity((w * h * 4) as usize);
    for _ in 0..w * h {
        bytes.extend_from_slice(&rgba);
    }
    PreparedImage {
        width: w,
        height: h,
        rgba8_premul: Arc::new(bytes),
    }
}

#[test]
fn fill_rect_covers_only_its_area() {
    let mut p = Painter::new(Canvas::new(20, 20).unwrap());
    p.fill_rect(Rect::new(0.0, 0.0, 10.0, 20.0), Color::rgb(255, 0, 0));
    let pixmap = p.finish().unwrap();
    assert_eq!(px(&pixmap, 5, 5), [255, 0, 0, 255]);
    assert_eq!(px(&pixmap, 15, 5), [0, 0, 0, 0]);
}

#[test]
fn clip_keeps_image_inside_rect() {
    let img = ImagePaint::from_prepared(&solid(4, 4, [0, 0, 255, 255])).unwrap();
    let mut p = Painter::new(Canvas::new(40, 40).unwrap());
    p.push_clip(Rect::new(10.0, 10.0, 20.0, 20.0));
    p.draw_image(&img, img.stretch_into(Rect::new(0.0, 0.0, 40.0, 40.0)));
    p.pop_layer();
    let pixmap = p.finish().unwrap();
    assert_eq!(px(&pixmap, 15, 15), [0, 0, 255, 255]);
    assert_eq!(px(&pixmap, 5, 5)[3], 0);
    assert_eq!(px(&pixmap, 30, 30)[3], 0);
}

#[test]
fn stroke_rect_leaves_interior_empty() {
    let mut p = Painter::new(Canvas::new(40, 40).unwrap());
    p.stroke_rect(Rect::new(10.0, 10.0, 30.0, 30.0), 4.0, Color::BLACK);
    let pixmap = p.finish().unwrap();
    assert_eq!(px(&pixmap, 10, 20), [0, 0, 0, 255]);
    assert_eq!(px(&pixmap, 20, 20)[3], 0);
}

#[test]
fn unbalanced_layers_fail_finish() {
    let mut p = Painter::new(Canvas::new(8, 8).unwrap());
    p.push_opacity(0.5);
    assert!(matches!(p.finish(), Err(SnapError::Render(_))));
}

#[test]
fn straight_conversion_unpremultiplies() {
    let mut p = Painter::new(Canvas::new(2, 2).unwrap());
    p.fill_rect(Rect::new(0.0, 0.0, 2.0, 2.0), Color::rgba(200, 100, 0, 255));
    let img = pixmap_to_straight(&p.finish().unwrap()).unwrap();
    assert_eq!(img.get_pixel(1, 1).0, [200, 100, 0, 255]);
}

#[test]
fn oversized_images_are_rejected() {
    let img = PreparedImage {
        width: 70_000,
        height: 1,
        rgba8_premul: Arc::new(Vec::new()),
    };
    assert!(ImagePaint::from_prepared(&img).is_err());
}

fn glyph_block(color: Color) -> TextBlock {
    let font = std::fs::read("tests/data/fonts/DejaVuSans-Bold.ttf").unwrap();
    crate::assets::text::Typesetter::new()
        .with_font(crate::assets::text::FontRole::Overlay, font)
        .unwrap()
        .layout(crate::assets::text::FontRole::Overlay, "I", 60.0, color)
        .unwrap()
        .unwrap()
}

#[test]
fn fill_text_paints_with_the_layout_color() {
    let block = glyph_block(Color::rgb(0, 0, 255));
    let mut p = Painter::new(Canvas::new(80, 80).unwrap());
    p.fill_text(&block, Affine::translate((10.0, 10.0)));
    let pixmap = p.finish().unwrap();

    let row = 40;
    let inked: Vec<u32> = (0..80).filter(|&x| px(&pixmap, x, row)[3] == 255).collect();
    assert!(!inked.is_empty());
    assert_eq!(px(&pixmap, inked[inked.len() / 2], row), [0, 0, 255, 255]);
    assert_eq!(px(&pixmap, 2, 2), [0, 0, 0, 0]);
}

#[test]
fn stroke_text_outlines_outside_the_fill() {
    let block = glyph_block(Color::rgb(255, 0, 0));
    let at = Affine::translate((10.0, 10.0));

    let mut filled = Painter::new(Canvas::new(80, 80).unwrap());
    filled.fill_text(&block, at);
    let filled = filled.finish().unwrap();

    let mut outlined = Painter::new(Canvas::new(80, 80).unwrap());
    outlined.stroke_text(&block, at, 6.0, Color::BLACK);
    outlined.fill_text(&block, at);
    let outlined = outlined.finish().unwrap();

    let row = 40;
    let first = |pm: &vello_cpu::Pixmap| (0..80).find(|&x| px(pm, x, row)[3] > 0).unwrap();
    let fill_left = first(&filled);
    let outline_left = first(&outlined);
    assert!((2..=4).contains(&(fill_left - outline_left)), "{fill_left} vs {outline_left}");
    assert_eq!(px(&outlined, outline_left + 1, row), [0, 0, 0, 255]);
    // Fill was painted last, so the glyph interior stays red.
    let mid = (0..80).filter(|&x| px(&filled, x, row)[3] == 255).nth(2).unwrap();
    assert_eq!(px(&outlined, mid, row), [255, 0, 0, 255]);
}
