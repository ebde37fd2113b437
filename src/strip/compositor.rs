use crate::assets::decode::{decode_image, encode_png};
use crate::assets::text::{FontRole, TextBlock, Typesetter};
use crate::capture::frame::Capture;
use crate::foundation::core::{Affine, Point};
use crate::foundation::error::SnapResult;
use crate::foundation::report::{Layer, RenderReport};
use crate::render::canvas::{ImagePaint, Painter, pixmap_to_straight};
use crate::strip::geometry::{SLOT_COUNT, StripGeometry, cover_fit};
use crate::strip::template::{Backdrop, Template};

/// Encoded base strip plus whatever had to be left out of it.
#[derive(Clone, Debug)]
pub struct ComposedStrip {
    /// PNG bytes.
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub report: RenderReport,
}

/// Draw up to three captures into the fixed strip layout.
///
/// Layers are painted back to front: backdrop, title, accent rule (solid backdrops only), photos
/// clipped to their slots, slot borders, footer date. Photos past the third are ignored and
/// missing ones leave their slot showing the backdrop inside its border.
///
/// Only a bad geometry or a failed encode is an error. Undecodable backdrop or photos, and text
/// with no font configured, are recorded in [`ComposedStrip::report`].
#[tracing::instrument(skip(photos, template, typesetter, geometry), fields(photos = photos.len(), template = %template.id))]
pub fn compose(
    photos: &[Capture],
    event_name: &str,
    date_str: &str,
    template: &Template,
    typesetter: &mut Typesetter,
    geometry: &StripGeometry,
) -> SnapResult<ComposedStrip> {
    geometry.validate()?;
    let canvas = geometry.canvas()?;
    let mut report = RenderReport::default();
    let mut painter = Painter::new(canvas);

    match &template.backdrop {
        Backdrop::Solid(color) => painter.fill_rect(canvas.rect(), *color),
        Backdrop::Image(bytes) => {
            match decode_image(bytes).and_then(|img| ImagePaint::from_prepared(&img)) {
                Ok(paint) => painter.draw_image(&paint, paint.stretch_into(canvas.rect())),
                Err(e) => report.skip(Layer::Background, e),
            }
        }
    }

    let title = event_name.to_uppercase();
    match typesetter.layout(
        FontRole::Display,
        &title,
        geometry.title_font_px,
        template.text_color,
    ) {
        Ok(Some(block)) => painter.fill_text(&block, centered_on(&block, geometry.title_anchor())),
        Ok(None) => report.skip(Layer::Title, "no font configured"),
        Err(e) => report.skip(Layer::Title, e),
    }

    if !template.has_background_image() {
        let (from, to) = geometry.accent_rule();
        painter.stroke_line(from, to, geometry.accent_width, template.accent_color);
    }

    let border_width = if template.has_background_image() {
        geometry.border_width_on_image
    } else {
        geometry.border_width
    };

    for index in 0..SLOT_COUNT {
        let Some(slot) = geometry.slot_rect(index) else {
            continue;
        };
        if let Some(photo) = photos.get(index) {
            match decode_image(&photo.bytes).and_then(|img| ImagePaint::from_prepared(&img)) {
                Ok(paint) => {
                    let placed = cover_fit(paint.w, paint.h, slot);
                    painter.push_clip(slot);
                    painter.draw_image(&paint, paint.stretch_into(placed));
                    painter.pop_layer();
                }
                Err(e) => report.skip(Layer::Photo(index), e),
            }
        }
        painter.stroke_rect(slot, border_width, template.border());
    }
    if photos.len() > SLOT_COUNT {
        tracing::debug!(extra = photos.len() - SLOT_COUNT, "ignoring photos past the last slot");
    }

    match typesetter.layout(
        FontRole::Body,
        date_str,
        geometry.footer_font_px,
        template.text_color,
    ) {
        Ok(Some(block)) => {
            painter.push_opacity(geometry.footer_opacity);
            painter.fill_text(&block, centered_on(&block, geometry.footer_anchor()));
            painter.pop_layer();
        }
        Ok(None) => report.skip(Layer::Footer, "no font configured"),
        Err(e) => report.skip(Layer::Footer, e),
    }

    let pixmap = painter.finish()?;
    let png = encode_png(&pixmap_to_straight(&pixmap)?)?;
    Ok(ComposedStrip {
        png,
        width: canvas.width,
        height: canvas.height,
        report,
    })
}

/// Transform placing `block` so its line box is centered on `anchor`.
pub(crate) fn centered_on(block: &TextBlock, anchor: Point) -> Affine {
    Affine::translate((
        anchor.x - f64::from(block.width()) / 2.0,
        anchor.y - f64::from(block.height()) / 2.0,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/strip/compositor.rs"]
mod tests;
