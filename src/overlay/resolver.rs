use crate::assets::color::Color;
use crate::assets::decode::{
    PreparedImage, SourceKind, decode_image, decode_straight, encode_png, parse_svg, sniff_kind,
};
use crate::assets::svg_raster::{rasterize_svg, svg_raster_size};
use crate::assets::text::{FontRole, Typesetter};
use crate::foundation::core::Canvas;
use crate::foundation::error::{SnapError, SnapResult};
use crate::foundation::report::{Layer, RenderReport};
use crate::overlay::item::{Sticker, StickerPlacement, TextItem, TextPlacement};
use crate::overlay::reference::ReferenceFrame;
use crate::render::canvas::{ImagePaint, Painter};
use crate::render::composite::over_straight_in_place;

/// Final image with overlays burned in.
#[derive(Clone, Debug)]
pub struct ResolvedImage {
    /// PNG bytes.
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub report: RenderReport,
}

/// Re-project overlay items from `reference` space onto `base_png` and burn them in.
///
/// The output has the base image's native size. Stickers are painted first, then text items,
/// each in the given order. A base image that does not decode fails the whole call; a sticker or
/// text item that cannot be drawn is skipped and listed in the report.
///
/// Overlays are rasterized on a separate transparent layer and then blended onto the decoded
/// base, so pixels no item touches keep their exact base value.
#[tracing::instrument(
    skip(base_png, stickers, texts, typesetter),
    fields(stickers = stickers.len(), texts = texts.len(), reference = reference.display_width())
)]
pub fn resolve(
    base_png: &[u8],
    reference: ReferenceFrame,
    stickers: &[Sticker],
    texts: &[TextItem],
    typesetter: &mut Typesetter,
) -> SnapResult<ResolvedImage> {
    let mut base = decode_straight(base_png)?;
    let (width, height) = base.dimensions();
    let canvas = Canvas::new(width, height)?;
    let ratio = reference.ratio(width);
    tracing::debug!(ratio, "resolved reference ratio");

    let mut report = RenderReport::default();
    let mut painter = Painter::new(canvas);

    for sticker in stickers {
        let layer = Layer::Sticker(sticker.id.get());
        let placement = StickerPlacement::resolve(&sticker.transform, ratio);
        match prepare_sticker(sticker, &placement) {
            Ok(paint) => {
                let local = paint.stretch_into(placement.local_rect());
                painter.draw_image(&paint, placement.transform() * local);
            }
            Err(e) => report.skip(layer, e),
        }
    }

    for text in texts {
        let layer = Layer::Text(text.id.get());
        let placement = TextPlacement::resolve(&text.transform, ratio);
        match typesetter.layout(
            FontRole::Overlay,
            &text.content,
            placement.font_size as f32,
            text.color,
        ) {
            Ok(Some(block)) => {
                let at = placement.transform();
                painter.stroke_text(&block, at, placement.stroke_width, Color::BLACK);
                painter.fill_text(&block, at);
            }
            Ok(None) => report.skip(layer, "no font configured"),
            Err(e) => report.skip(layer, e),
        }
    }

    let layer = painter.finish()?;
    over_straight_in_place(&mut base, layer.data_as_u8_slice())?;
    let png = encode_png(&base)?;
    Ok(ResolvedImage {
        png,
        width,
        height,
        report,
    })
}

fn prepare_sticker(sticker: &Sticker, placement: &StickerPlacement) -> SnapResult<ImagePaint> {
    if !placement.size.is_finite() || placement.size <= 0.0 {
        return Err(SnapError::validation(format!(
            "sticker size {} is not drawable",
            placement.size
        )));
    }
    let image: PreparedImage = match sniff_kind(&sticker.source) {
        SourceKind::Svg => {
            let svg = parse_svg(&sticker.source)?;
            let (w, h) = svg_raster_size(placement.size, placement.size)?;
            rasterize_svg(&svg, w, h)?
        }
        SourceKind::Raster => decode_image(&sticker.source)?,
    };
    ImagePaint::from_prepared(&image)
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/resolver.rs"]
mod tests;
