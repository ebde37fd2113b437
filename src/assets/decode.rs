use std::io::Cursor;
use std::sync::{Arc, OnceLock};

use crate::foundation::error::{SnapError, SnapResult};
use crate::foundation::math::premultiply_rgba8_in_place;

/// Decoded raster in premultiplied RGBA8, ready to become a paint.
#[derive(Clone, Debug)]
pub struct PreparedImage {
    pub width: u32,
    pub height: u32,
    /// Premultiplied RGBA8, row-major, tightly packed.
    pub rgba8_premul: Arc<Vec<u8>>,
}

/// Parsed SVG document.
#[derive(Clone, Debug)]
pub struct PreparedSvg {
    pub tree: Arc<usvg::Tree>,
}

/// What an opaque image payload turned out to be.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceKind {
    Raster,
    Svg,
}

/// Guess whether `bytes` hold an SVG document or a raster format.
pub fn sniff_kind(bytes: &[u8]) -> SourceKind {
    let head = &bytes[..bytes.len().min(512)];
    let text = String::from_utf8_lossy(head);
    let trimmed = text.trim_start_matches('\u{feff}').trim_start();
    if trimmed.starts_with("<svg") || (trimmed.starts_with("<?xml") && text.contains("<svg")) {
        SourceKind::Svg
    } else {
        SourceKind::Raster
    }
}

/// Decode encoded image bytes (PNG, JPEG, ...) and convert to premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> SnapResult<PreparedImage> {
    let rgba = decode_straight(bytes)?;
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

/// Decode encoded image bytes into straight-alpha RGBA8.
pub fn decode_straight(bytes: &[u8]) -> SnapResult<image::RgbaImage> {
    if bytes.is_empty() {
        return Err(SnapError::decode("image payload is empty"));
    }
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| SnapError::decode(format!("decode image from memory: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    if rgba.width() == 0 || rgba.height() == 0 {
        return Err(SnapError::decode("decoded image has zero size"));
    }
    Ok(rgba)
}

/// Parse SVG bytes into a prepared `usvg` tree.
///
/// `<text>` elements resolve against the system fonts, so emoji stickers render wherever the
/// host has a color emoji face installed.
pub fn parse_svg(bytes: &[u8]) -> SnapResult<PreparedSvg> {
    let opts = usvg::Options {
        fontdb: svg_fontdb(),
        font_resolver: make_svg_font_resolver(),
        ..Default::default()
    };
    let tree = usvg::Tree::from_data(bytes, &opts)
        .map_err(|e| SnapError::decode(format!("parse svg tree: {e}")))?;
    Ok(PreparedSvg {
        tree: Arc::new(tree),
    })
}

fn svg_fontdb() -> Arc<usvg::fontdb::Database> {
    static DB: OnceLock<Arc<usvg::fontdb::Database>> = OnceLock::new();
    DB.get_or_init(|| {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        tracing::debug!(faces = db.len(), "loaded system fonts for svg text");
        Arc::new(db)
    })
    .clone()
}

fn make_svg_font_resolver() -> usvg::FontResolver<'static> {
    use usvg::FontResolver;

    FontResolver {
        select_font: Box::new(|font, fontdb| {
            let mut families = Vec::<usvg::fontdb::Family<'_>>::new();
            for family in font.families() {
                families.push(match family {
                    usvg::FontFamily::Serif => usvg::fontdb::Family::Serif,
                    usvg::FontFamily::SansSerif => usvg::fontdb::Family::SansSerif,
                    usvg::FontFamily::Cursive => usvg::fontdb::Family::Cursive,
                    usvg::FontFamily::Fantasy => usvg::fontdb::Family::Fantasy,
                    usvg::FontFamily::Monospace => usvg::fontdb::Family::Monospace,
                    usvg::FontFamily::Named(s) => usvg::fontdb::Family::Name(s),
                });
            }
            families.push(usvg::fontdb::Family::SansSerif);

            let style = match font.style() {
                usvg::FontStyle::Normal => usvg::fontdb::Style::Normal,
                usvg::FontStyle::Italic => usvg::fontdb::Style::Italic,
                usvg::FontStyle::Oblique => usvg::fontdb::Style::Oblique,
            };
            let query = usvg::fontdb::Query {
                families: &families,
                weight: usvg::fontdb::Weight(font.weight()),
                stretch: usvg::fontdb::Stretch::Normal,
                style,
            };
            fontdb
                .query(&query)
                .or_else(|| fontdb.faces().next().map(|f| f.id))
        }),
        // Glyphs missing from the chosen face (emoji under a serif request) fall back per char.
        select_fallback: FontResolver::default_fallback_selector(),
    }
}

/// Encode straight-alpha RGBA8 as PNG.
pub fn encode_png(img: &image::RgbaImage) -> SnapResult<Vec<u8>> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| SnapError::render(format!("encode png: {e}")))?;
    Ok(buf)
}

/// Encode an RGB frame as JPEG at the given quality (1..=100).
pub fn encode_jpeg(img: &image::RgbaImage, quality: u8) -> SnapResult<Vec<u8>> {
    let rgb = image::DynamicImage::ImageRgba8(img.clone()).to_rgb8();
    let mut buf = Vec::new();
    let mut encoder =
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, quality.clamp(1, 100));
    encoder
        .encode_image(&rgb)
        .map_err(|e| SnapError::render(format!("encode jpeg: {e}")))?;
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
