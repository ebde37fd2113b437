use crate::assets::decode::{PreparedImage, PreparedSvg};
use crate::foundation::error::{SnapError, SnapResult};

const MAX_DIM: u32 = 16_384;

/// Raster size for drawing an SVG into a `target_w x target_h` box at device resolution.
///
/// Rasterizing at the final size keeps vector stickers sharp after the reference-frame ratio
/// scales them up.
pub fn svg_raster_size(target_w: f64, target_h: f64) -> SnapResult<(u32, u32)> {
    fn to_px(v: f64) -> SnapResult<u32> {
        if !v.is_finite() || v <= 0.0 {
            return Err(SnapError::render("svg target size must be finite and > 0"));
        }
        Ok((v.ceil() as u32).max(1))
    }

    let w = to_px(target_w)?;
    let h = to_px(target_h)?;
    if w > MAX_DIM || h > MAX_DIM {
        return Err(SnapError::render(format!(
            "svg raster size too large: {w}x{h} (max {MAX_DIM}x{MAX_DIM})"
        )));
    }
    Ok((w, h))
}

/// Render the whole SVG stretched into `width x height` premultiplied RGBA8.
pub fn rasterize_svg(svg: &PreparedSvg, width: u32, height: u32) -> SnapResult<PreparedImage> {
    let tree = svg.tree.as_ref();
    let size = tree.size();
    if !(size.width() > 0.0 && size.height() > 0.0) {
        return Err(SnapError::render("svg has invalid width/height"));
    }

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| SnapError::render("failed to allocate svg pixmap"))?;

    let sx = (width as f32) / size.width();
    let sy = (height as f32) / size.height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(tree, xform, &mut pixmap.as_mut());

    // tiny-skia stores premultiplied RGBA8, matching `PreparedImage`.
    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: std::sync::Arc::new(pixmap.data().to_vec()),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/svg_raster.rs"]
mod tests;
