use crate::foundation::error::{SnapError, SnapResult};

pub use kurbo::{Affine, Point, Rect};

/// Raster dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a validated canvas size.
    ///
    /// The CPU rasterizer addresses pixels with `u16`, so both sides must fit.
    pub fn new(width: u32, height: u32) -> SnapResult<Self> {
        if width == 0 || height == 0 {
            return Err(SnapError::validation("canvas width/height must be > 0"));
        }
        if width > u32::from(u16::MAX) || height > u32::from(u16::MAX) {
            return Err(SnapError::validation(format!(
                "canvas {width}x{height} exceeds {}x{}",
                u16::MAX,
                u16::MAX
            )));
        }
        Ok(Self { width, height })
    }

    /// Full-canvas rectangle in pixel space.
    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }

    pub(crate) fn as_u16(self) -> (u16, u16) {
        // `new` guarantees the range; struct literals are clamped rather than wrapped.
        (
            self.width.min(u32::from(u16::MAX)) as u16,
            self.height.min(u32::from(u16::MAX)) as u16,
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
