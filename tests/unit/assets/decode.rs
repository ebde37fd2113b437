use super::*;

fn png_1x1(px: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_raw(1, 1, px.to_vec()).unwrap();
    encode_png(&img).unwrap()
}

#[test]
fn decode_image_png_dimensions_and_premul() {
    let prepared = decode_image(&png_1x1([100, 50, 200, 128])).unwrap();
    assert_eq!(prepared.width, 1);
    assert_eq!(prepared.height, 1);
    assert_eq!(
        prepared.rgba8_premul.as_slice(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn decode_rejects_garbage_and_empty() {
    assert!(matches!(decode_image(b"not an image"), Err(SnapError::Decode(_))));
    assert!(matches!(decode_straight(&[]), Err(SnapError::Decode(_))));
}

#[test]
fn decode_svg_parse_ok_and_err() {
    let ok = br#"<svg xmlns="http://www.w3.org/2000/svg" width="1" height="1"></svg>"#;
    parse_svg(ok).unwrap();

    let bad = br#"<svg"#;
    assert!(parse_svg(bad).is_err());
}

#[test]
fn sniff_distinguishes_svg_from_raster() {
    assert_eq!(
        sniff_kind(br#"<svg xmlns="http://www.w3.org/2000/svg"/>"#),
        SourceKind::Svg
    );
    assert_eq!(
        sniff_kind(b"<?xml version=\"1.0\"?>\n<svg></svg>"),
        SourceKind::Svg
    );
    assert_eq!(sniff_kind(&png_1x1([0, 0, 0, 255])), SourceKind::Raster);
}

#[test]
fn jpeg_encoding_produces_decodable_bytes() {
    let img = image::RgbaImage::from_pixel(8, 6, image::Rgba([10, 200, 30, 255]));
    let jpeg = encode_jpeg(&img, 90).unwrap();
    assert_eq!(
        image::guess_format(&jpeg).unwrap(),
        image::ImageFormat::Jpeg
    );
    let back = decode_straight(&jpeg).unwrap();
    assert_eq!(back.dimensions(), (8, 6));
}
