use super::*;
use crate::foundation::report::Layer;

#[test]
fn parses_and_builds_arena() {
    let dir = std::env::temp_dir().join(format!("snapstrip-doc-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("s.png"), [1u8, 2, 3]).unwrap();

    let doc = OverlayDocument::from_json(
        r##"{
            "reference_width": 300,
            "stickers": [{ "source": "s.png", "x": 10, "y": 20, "scale": 9 }],
            "texts": [{ "content": "Yay", "color": "#ff0055", "x": 1, "y": 2, "rotation": -15 }]
        }"##,
    )
    .unwrap();
    assert_eq!(doc.reference_width.display_width(), 300.0);

    let arena = doc.into_arena(&dir).unwrap();
    assert_eq!(arena.len(), 2);
    assert_eq!(arena.selected(), None);

    let sticker = arena.stickers().next().unwrap();
    assert_eq!(&*sticker.source, &[1u8, 2, 3]);
    assert_eq!(sticker.transform.scale, 3.0);

    let text = arena.texts().next().unwrap();
    assert_eq!(text.color, Color::rgb(0xff, 0x00, 0x55));
    assert_eq!(text.transform.rotation, -15.0);
    assert_eq!(text.transform.scale, 1.0);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn missing_sticker_file_is_skipped_when_resolving() {
    let dir = std::env::temp_dir().join(format!("snapstrip-doc-missing-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let mut good = Vec::new();
    image::RgbaImage::from_pixel(8, 8, image::Rgba([0, 0, 255, 255]))
        .write_to(&mut std::io::Cursor::new(&mut good), image::ImageFormat::Png)
        .unwrap();
    std::fs::write(dir.join("good.png"), good).unwrap();

    let doc = OverlayDocument::from_json(
        r#"{
            "reference_width": 100,
            "stickers": [
                { "source": "missing.png", "x": 0, "y": 0 },
                { "source": "good.png", "x": 18, "y": 18 }
            ]
        }"#,
    )
    .unwrap();
    let reference = doc.reference_width;
    let arena = doc.into_arena(&dir).unwrap();
    assert_eq!(arena.len(), 2);
    let stickers: Vec<_> = arena.stickers().cloned().collect();
    assert!(stickers[0].source.is_empty());

    let mut base = Vec::new();
    image::RgbaImage::from_pixel(100, 100, image::Rgba([255, 255, 255, 255]))
        .write_to(&mut std::io::Cursor::new(&mut base), image::ImageFormat::Png)
        .unwrap();
    let out = crate::overlay::resolver::resolve(
        &base,
        reference,
        &stickers,
        &[],
        &mut crate::assets::text::Typesetter::new(),
    )
    .unwrap();
    assert!(out.report.contains(Layer::Sticker(stickers[0].id.get())));
    assert!(!out.report.contains(Layer::Sticker(stickers[1].id.get())));
    let img = image::load_from_memory(&out.png).unwrap().to_rgba8();
    // Second sticker spans 18..82 at ratio 1.
    let center = img.get_pixel(50, 50).0;
    assert!(center[2] > 250 && center[0] < 5, "{center:?}");
    assert_eq!(img.get_pixel(5, 5).0, [255, 255, 255, 255]);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn blank_text_fails() {
    let doc =
        OverlayDocument::from_json(r#"{ "reference_width": 300, "texts": [{ "content": " " }] }"#)
            .unwrap();
    assert!(doc.into_arena(Path::new(".")).is_err());
}

#[test]
fn zero_reference_width_is_rejected() {
    assert!(OverlayDocument::from_json(r#"{ "reference_width": 0 }"#).is_err());
}

#[test]
fn emoji_sticker_needs_no_file() {
    let doc = OverlayDocument::from_json(
        r#"{ "reference_width": 300, "stickers": [{ "emoji": "🦄", "x": 40, "y": 90 }] }"#,
    )
    .unwrap();
    let arena = doc.into_arena(Path::new("/nonexistent")).unwrap();
    let sticker = arena.stickers().next().unwrap();
    let svg = std::str::from_utf8(&sticker.source).unwrap();
    assert!(svg.starts_with("<svg") && svg.contains('🦄'));
    assert_eq!(sticker.transform.x, 40.0);
}

#[test]
fn sticker_with_both_or_neither_source_fails() {
    for json in [
        r#"{ "reference_width": 300, "stickers": [{ "x": 1, "y": 2 }] }"#,
        r#"{ "reference_width": 300, "stickers": [{ "source": "a.png", "emoji": "⭐", "x": 1, "y": 2 }] }"#,
        r#"{ "reference_width": 300, "stickers": [{ "emoji": "  ", "x": 1, "y": 2 }] }"#,
    ] {
        let doc = OverlayDocument::from_json(json).unwrap();
        let err = doc.into_arena(Path::new(".")).unwrap_err();
        assert!(matches!(err, SnapError::Validation(_)), "{json}: {err}");
    }
}
