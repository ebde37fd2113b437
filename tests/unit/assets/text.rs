use super::*;

#[test]
fn typesetter_without_fonts_yields_none() {
    let mut ts = Typesetter::new();
    assert!(!ts.has_fonts());
    assert!(ts.face_for(FontRole::Body).is_none());
    let block = ts
        .layout(FontRole::Display, "SUMMER PARTY", 52.0, Color::BLACK)
        .unwrap();
    assert!(block.is_none());
}

#[test]
fn garbage_font_bytes_are_rejected() {
    let mut engine = TextEngine::new();
    assert!(engine.register_font(b"definitely not a font".to_vec()).is_err());
    assert!(Typesetter::new()
        .with_font(FontRole::Overlay, Vec::new())
        .is_err());
}

#[test]
fn missing_font_file_names_the_path() {
    let cfg = FontConfig {
        display: Some("/nonexistent/snapstrip-font.ttf".into()),
        body: None,
        overlay: None,
    };
    let err = Typesetter::from_config(&cfg).err().unwrap();
    assert!(matches!(err, SnapError::Other(_)));
    assert!(err.to_string().contains("snapstrip-font.ttf"), "{err}");
}

#[test]
fn unknown_face_is_rejected_before_shaping() {
    let mut engine = TextEngine::new();
    assert!(engine.layout("hi", FaceId(3), 12.0, Color::WHITE).is_err());
    assert!(engine.family_name(FaceId(0)).is_none());
}

#[test]
fn brush_tracks_color_channels() {
    let b = TextBrushRgba8::from(Color::rgba(1, 2, 3, 4));
    assert_eq!((b.r, b.g, b.b, b.a), (1, 2, 3, 4));
}
