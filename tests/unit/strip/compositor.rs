use std::io::Cursor;
use std::sync::Arc;

use super::*;
use crate::assets::color::Color;
use crate::strip::template::find_template;

fn png(w: u32, h: u32, rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba(rgba));
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

fn capture(id: u64, w: u32, h: u32, rgba: [u8; 4]) -> Capture {
    Capture::new(id, png(w, h, rgba))
}

fn decode(strip: &ComposedStrip) -> image::RgbaImage {
    image::load_from_memory(&strip.png).unwrap().to_rgba8()
}

fn assert_near(actual: [u8; 4], expected: [u8; 4]) {
    for (a, e) in actual.iter().zip(expected) {
        assert!(
            (i16::from(*a) - i16::from(e)).abs() <= 2,
            "got {actual:?}, want {expected:?}"
        );
    }
}

fn rgba(c: Color) -> [u8; 4] {
    [c.r, c.g, c.b, c.a]
}

fn compose_default(photos: &[Capture], template: &Template) -> ComposedStrip {
    compose(
        photos,
        "Summer Party",
        "15 Oktober 2026",
        template,
        &mut Typesetter::new(),
        &StripGeometry::default(),
    )
    .unwrap()
}

#[test]
fn empty_strip_keeps_layout_and_borders() {
    let classic = find_template("classic").unwrap();
    let strip = compose_default(&[], &classic);
    assert_eq!((strip.width, strip.height), (600, 1490));

    let img = decode(&strip);
    assert_eq!(img.dimensions(), (600, 1490));
    assert_near(img.get_pixel(5, 5).0, [255, 255, 255, 255]);
    assert_near(img.get_pixel(300, 130).0, rgba(classic.accent_color));
    for y in [300, 700, 1200] {
        assert_near(img.get_pixel(40, y).0, rgba(classic.border()));
        assert_near(img.get_pixel(300, y).0, [255, 255, 255, 255]);
    }
}

#[test]
fn photos_cover_their_slots_without_bleeding() {
    let classic = find_template("classic").unwrap();
    let photos = [
        capture(1, 640, 480, [255, 0, 0, 255]),
        capture(2, 300, 900, [0, 255, 0, 255]),
        capture(3, 1920, 1080, [0, 0, 255, 255]),
    ];
    let img = decode(&compose_default(&photos, &classic));

    let inside = [(45, 165), (300, 355), (555, 545)];
    for (slot_y, color) in [
        (0, [255, 0, 0, 255]),
        (420, [0, 255, 0, 255]),
        (840, [0, 0, 255, 255]),
    ] {
        for (x, y) in inside {
            assert_near(img.get_pixel(x, y + slot_y).0, color);
        }
        // Outside the slot horizontally, and in the gap below it.
        assert_near(img.get_pixel(20, 355 + slot_y).0, [255, 255, 255, 255]);
        assert_near(img.get_pixel(580, 355 + slot_y).0, [255, 255, 255, 255]);
        assert_near(img.get_pixel(300, 565 + slot_y).0, [255, 255, 255, 255]);
    }
}

#[test]
fn extra_photos_are_ignored() {
    let classic = find_template("classic").unwrap();
    let photos: Vec<Capture> = (0..5)
        .map(|i| capture(i, 8, 6, [10, 20, 30, 255]))
        .collect();
    let strip = compose_default(&photos, &classic);
    assert_eq!((strip.width, strip.height), (600, 1490));
    assert!(!strip.report.contains(Layer::Photo(3)));
    assert_near(decode(&strip).get_pixel(300, 1440).0, [255, 255, 255, 255]);
}

#[test]
fn background_image_suppresses_accent_and_thins_border() {
    let bg = crate::assets::import::import_image_bytes(png(60, 149, [0, 200, 0, 255])).unwrap();
    let custom = Template::custom_with_id(&bg, "custom-1");
    let img = decode(&compose_default(&[], &custom));

    assert_near(img.get_pixel(5, 5).0, [0, 200, 0, 255]);
    assert_near(img.get_pixel(300, 130).0, [0, 200, 0, 255]);
    assert_ne!(img.get_pixel(40, 300).0, [0, 200, 0, 255]);
    assert_near(img.get_pixel(42, 300).0, [0, 200, 0, 255]);
}

#[test]
fn undecodable_layers_are_reported_not_fatal() {
    let mut t = find_template("midnight").unwrap();
    t.backdrop = Backdrop::Image(Arc::from(b"not an image".to_vec()));
    let photos = [
        capture(1, 4, 3, [255, 0, 0, 255]),
        Capture::new(2, b"garbage".to_vec()),
    ];
    let strip = compose_default(&photos, &t);
    assert!(strip.report.contains(Layer::Background));
    assert!(strip.report.contains(Layer::Photo(1)));
    assert!(!strip.report.contains(Layer::Photo(0)));

    let img = decode(&strip);
    assert_eq!(img.get_pixel(5, 5).0[3], 0);
    assert_near(img.get_pixel(300, 355).0, [255, 0, 0, 255]);
    // Border of the failed slot is still there.
    assert_near(img.get_pixel(40, 700).0, rgba(t.border()));
}

#[test]
fn text_without_fonts_is_reported() {
    let strip = compose_default(&[], &find_template("vintage").unwrap());
    assert!(strip.report.contains(Layer::Title));
    assert!(strip.report.contains(Layer::Footer));
    assert_eq!(strip.report.skipped.len(), 2);
}

#[test]
fn invalid_geometry_is_an_error() {
    let geometry = StripGeometry {
        width: 0,
        ..StripGeometry::default()
    };
    let err = compose(
        &[],
        "x",
        "y",
        &find_template("classic").unwrap(),
        &mut Typesetter::new(),
        &geometry,
    )
    .unwrap_err();
    assert!(matches!(err, crate::foundation::error::SnapError::Validation(_)));
}

fn fixture_font() -> Vec<u8> {
    std::fs::read("tests/data/fonts/DejaVuSans-Bold.ttf").unwrap()
}

fn compose_with_font(template: &Template) -> ComposedStrip {
    let mut ts = Typesetter::new()
        .with_font(FontRole::Display, fixture_font())
        .unwrap();
    compose(
        &[],
        "Summer Party",
        "15 Oktober 2026",
        template,
        &mut ts,
        &StripGeometry::default(),
    )
    .unwrap()
}

/// Bounding box of non-background pixels within rows `ys`, plus the darkest red channel seen.
fn ink_in_rows(img: &image::RgbaImage, ys: std::ops::Range<u32>) -> ((u32, u32, u32, u32), u8) {
    let (mut x0, mut y0, mut x1, mut y1) = (u32::MAX, u32::MAX, 0, 0);
    let mut darkest = u8::MAX;
    for y in ys {
        for x in 0..img.width() {
            let p = img.get_pixel(x, y).0;
            if p[0] < 200 {
                x0 = x0.min(x);
                y0 = y0.min(y);
                x1 = x1.max(x);
                y1 = y1.max(y);
                darkest = darkest.min(p[0]);
            }
        }
    }
    assert!(x0 <= x1, "no ink found");
    ((x0, y0, x1, y1), darkest)
}

fn center((x0, y0, x1, y1): (u32, u32, u32, u32)) -> (f64, f64) {
    (f64::from(x0 + x1) / 2.0, f64::from(y0 + y1) / 2.0)
}

#[test]
fn title_and_footer_ink_is_centered_on_their_anchors() {
    let strip = compose_with_font(&find_template("classic").unwrap());
    assert!(strip.report.is_clean(), "{:?}", strip.report);
    let img = decode(&strip);

    // Rows above the accent rule hold only the title.
    let (title, _) = ink_in_rows(&img, 0..120);
    let (tx, ty) = center(title);
    assert!((tx - 300.0).abs() <= 6.0 && (ty - 80.0).abs() <= 6.0, "title at ({tx}, {ty})");

    let (footer, _) = ink_in_rows(&img, 1400..1490);
    let (fx, fy) = center(footer);
    assert!((fx - 300.0).abs() <= 6.0 && (fy - 1440.0).abs() <= 6.0, "footer at ({fx}, {fy})");

    // The footer is narrower than the uppercased title.
    assert!(footer.2 - footer.0 < title.2 - title.0);
}

#[test]
fn footer_is_drawn_at_reduced_opacity() {
    let t = find_template("classic").unwrap();
    let img = decode(&compose_with_font(&t));

    // Solid title strokes carry the text color as is.
    let (_, title_darkest) = ink_in_rows(&img, 0..120);
    assert!(title_darkest.abs_diff(t.text_color.r) <= 3, "title {title_darkest}");

    // 0.8 of the text color over the white background.
    let (_, footer_darkest) = ink_in_rows(&img, 1400..1490);
    let expected = 0.8 * f64::from(t.text_color.r) + 0.2 * 255.0;
    assert!(
        (f64::from(footer_darkest) - expected).abs() <= 6.0,
        "footer {footer_darkest}, want about {expected}"
    );
}
