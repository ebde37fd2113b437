use serde_json::json;

use super::*;

#[test]
fn parses_hex_forms() {
    assert_eq!(Color::parse("#ffffff").unwrap(), Color::WHITE);
    assert_eq!(Color::parse("#1e293b").unwrap(), Color::rgb(0x1e, 0x29, 0x3b));
    assert_eq!(Color::parse("#f0a").unwrap(), Color::rgb(0xff, 0x00, 0xaa));
    assert_eq!(
        Color::parse("#0000ff80").unwrap(),
        Color::rgba(0, 0, 255, 128)
    );
    assert!(Color::parse("#12345").is_err());
    assert!(Color::parse("#gg0000").is_err());
}

#[test]
fn parses_css_functional_notation() {
    assert_eq!(
        Color::parse("rgba(255,255,255,0.5)").unwrap(),
        Color::rgba(255, 255, 255, 128)
    );
    assert_eq!(
        Color::parse("RGB( 10, 20, 30 )").unwrap(),
        Color::rgb(10, 20, 30)
    );
    assert!(Color::parse("rgba(1,2)").is_err());
    assert!(Color::parse("slateblue").is_err());
}

#[test]
fn display_roundtrips_through_parse() {
    for c in [Color::rgb(1, 2, 3), Color::rgba(200, 100, 50, 7)] {
        assert_eq!(Color::parse(&c.to_string()).unwrap(), c);
    }
}

#[test]
fn deserializes_strings_objects_and_arrays() {
    let c: Color = serde_json::from_value(json!("#ec4899")).unwrap();
    assert_eq!(c, Color::rgb(0xec, 0x48, 0x99));

    let c: Color = serde_json::from_value(json!({"r": 1, "g": 2, "b": 3})).unwrap();
    assert_eq!(c, Color::rgb(1, 2, 3));

    let c: Color = serde_json::from_value(json!([1, 2, 3, 4])).unwrap();
    assert_eq!(c, Color::rgba(1, 2, 3, 4));

    assert!(serde_json::from_value::<Color>(json!([1, 2])).is_err());
}
