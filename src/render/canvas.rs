use std::sync::Arc;

use crate::assets::color::Color;
use crate::assets::decode::PreparedImage;
use crate::assets::text::TextBlock;
use crate::foundation::core::{Affine, Canvas, Point, Rect};
use crate::foundation::error::{SnapError, SnapResult};
use crate::foundation::math::unpremultiply_rgba8_in_place;

/// An image ready to be used as a `vello_cpu` paint.
#[derive(Clone)]
pub(crate) struct ImagePaint {
    paint: vello_cpu::Image,
    pub(crate) w: u32,
    pub(crate) h: u32,
}

impl ImagePaint {
    pub(crate) fn from_prepared(img: &PreparedImage) -> SnapResult<Self> {
        let pixmap =
            image_premul_bytes_to_pixmap(img.rgba8_premul.as_slice(), img.width, img.height)?;
        Ok(Self {
            paint: vello_cpu::Image {
                image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
                sampler: vello_cpu::peniko::ImageSampler::default(),
            },
            w: img.width,
            h: img.height,
        })
    }

    /// Transform mapping the image's own pixel box onto `dest`, stretching both axes.
    pub(crate) fn stretch_into(&self, dest: Rect) -> Affine {
        let sx = dest.width() / f64::from(self.w);
        let sy = dest.height() / f64::from(self.h);
        Affine::translate((dest.x0, dest.y0)) * Affine::scale_non_uniform(sx, sy)
    }
}

/// Immediate-mode drawing onto one raster, painted in call order.
///
/// Everything recorded here is rasterized by [`Painter::finish`] into a fresh premultiplied
/// pixmap. Layers (clip, opacity) must be balanced before finishing.
pub(crate) struct Painter {
    ctx: vello_cpu::RenderContext,
    canvas: Canvas,
    open_layers: usize,
}

impl Painter {
    pub(crate) fn new(canvas: Canvas) -> Self {
        let (w, h) = canvas.as_u16();
        Self {
            ctx: vello_cpu::RenderContext::new(w, h),
            canvas,
            open_layers: 0,
        }
    }

    pub(crate) fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(color.to_cpu());
        self.ctx.fill_rect(&rect_to_cpu(rect));
    }

    pub(crate) fn stroke_line(&mut self, from: Point, to: Point, width: f64, color: Color) {
        let mut path = vello_cpu::kurbo::BezPath::new();
        path.move_to(point_to_cpu(from));
        path.line_to(point_to_cpu(to));

        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_stroke(vello_cpu::kurbo::Stroke::new(width));
        self.ctx.set_paint(color.to_cpu());
        self.ctx.stroke_path(&path);
    }

    /// Stroke centered on the rectangle's edges, like a canvas `strokeRect`.
    pub(crate) fn stroke_rect(&mut self, rect: Rect, width: f64, color: Color) {
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_stroke(vello_cpu::kurbo::Stroke::new(width));
        self.ctx.set_paint(color.to_cpu());
        self.ctx.stroke_rect(&rect_to_cpu(rect));
    }

    /// Paint `image` through `transform`, which maps image pixel space to canvas space.
    pub(crate) fn draw_image(&mut self, image: &ImagePaint, transform: Affine) {
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(affine_to_cpu(transform));
        self.ctx.set_paint(image.paint.clone());
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(image.w),
            f64::from(image.h),
        ));
    }

    /// Restrict subsequent drawing to `rect` until the matching [`Painter::pop_layer`].
    pub(crate) fn push_clip(&mut self, rect: Rect) {
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        let mut path = vello_cpu::kurbo::BezPath::new();
        path.move_to((rect.x0, rect.y0));
        path.line_to((rect.x1, rect.y0));
        path.line_to((rect.x1, rect.y1));
        path.line_to((rect.x0, rect.y1));
        path.close_path();
        self.ctx.push_clip_layer(&path);
        self.open_layers += 1;
    }

    pub(crate) fn push_opacity(&mut self, opacity: f32) {
        self.ctx.push_opacity_layer(opacity.clamp(0.0, 1.0));
        self.open_layers += 1;
    }

    pub(crate) fn pop_layer(&mut self) {
        if self.open_layers > 0 {
            self.ctx.pop_layer();
            self.open_layers -= 1;
        }
    }

    /// Fill every glyph run with its layout brush.
    pub(crate) fn fill_text(&mut self, block: &TextBlock, transform: Affine) {
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(affine_to_cpu(transform));
        for line in block.layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                self.ctx
                    .glyph_run(&block.font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
    }

    /// Outline every glyph with a round-joined stroke of `width` in `color`.
    pub(crate) fn stroke_text(
        &mut self,
        block: &TextBlock,
        transform: Affine,
        width: f64,
        color: Color,
    ) {
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(affine_to_cpu(transform));
        self.ctx.set_stroke(
            vello_cpu::kurbo::Stroke::new(width).with_join(vello_cpu::kurbo::Join::Round),
        );
        self.ctx.set_paint(color.to_cpu());
        for line in block.layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                self.ctx
                    .glyph_run(&block.font)
                    .font_size(run.run().font_size())
                    .stroke_glyphs(glyphs);
            }
        }
    }

    /// Rasterize everything recorded so far into a premultiplied pixmap.
    pub(crate) fn finish(mut self) -> SnapResult<vello_cpu::Pixmap> {
        if self.open_layers != 0 {
            return Err(SnapError::render(format!(
                "{} layer(s) still open at finish",
                self.open_layers
            )));
        }
        let (w, h) = self.canvas.as_u16();
        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        Ok(pixmap)
    }
}

/// Premultiplied pixmap to straight-alpha `RgbaImage`.
pub(crate) fn pixmap_to_straight(pixmap: &vello_cpu::Pixmap) -> SnapResult<image::RgbaImage> {
    let mut data = pixmap.data_as_u8_slice().to_vec();
    unpremultiply_rgba8_in_place(&mut data);
    image::RgbaImage::from_raw(u32::from(pixmap.width()), u32::from(pixmap.height()), data)
        .ok_or_else(|| SnapError::render("pixmap byte length mismatch"))
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn image_premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> SnapResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| SnapError::render("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| SnapError::render("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(SnapError::render("prepared image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/canvas.rs"]
mod tests;
