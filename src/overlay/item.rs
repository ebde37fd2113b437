use std::fmt;
use std::sync::Arc;

use crate::assets::color::Color;
use crate::foundation::core::{Affine, Point, Rect};
use crate::foundation::math::deg_to_rad;

/// Side of the square a sticker occupies at scale 1, in reference units.
pub const STICKER_BASE_SIZE: f64 = 64.0;
/// Overlay text size at scale 1, in reference units.
pub const TEXT_BASE_FONT_SIZE: f64 = 40.0;
/// Outline width drawn under overlay text at scale 1, in reference units.
pub const TEXT_STROKE_BASE_WIDTH: f64 = 4.0;

pub const STICKER_SCALE_RANGE: (f64, f64) = (0.5, 3.0);
pub const TEXT_SCALE_RANGE: (f64, f64) = (0.5, 4.0);

/// Colors offered for new text items.
pub const TEXT_PALETTE: [Color; 7] = [
    Color::rgb(0xff, 0xff, 0xff),
    Color::rgb(0x00, 0x00, 0x00),
    Color::rgb(0xff, 0x00, 0x55),
    Color::rgb(0x00, 0x99, 0xff),
    Color::rgb(0xff, 0xcc, 0x00),
    Color::rgb(0x00, 0xcc, 0x66),
    Color::rgb(0x99, 0x00, 0xff),
];

/// Stable handle of an overlay item. Ids grow with insertion order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl ItemId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Position, scale, and rotation of an item in reference coordinates.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ItemTransform {
    /// Top-left corner.
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    /// Clockwise degrees. Not wrapped.
    pub rotation: f64,
}

impl Default for ItemTransform {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale: 1.0,
            rotation: 0.0,
        }
    }
}

impl ItemTransform {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemKind {
    Sticker,
    Text,
}

impl ItemKind {
    pub fn scale_range(self) -> (f64, f64) {
        match self {
            Self::Sticker => STICKER_SCALE_RANGE,
            Self::Text => TEXT_SCALE_RANGE,
        }
    }

    pub fn clamp_scale(self, scale: f64) -> f64 {
        let (lo, hi) = self.scale_range();
        if scale.is_nan() {
            return lo;
        }
        scale.clamp(lo, hi)
    }
}

/// A decorative image. `source` is encoded PNG, JPEG, or SVG.
#[derive(Clone, Debug, PartialEq)]
pub struct Sticker {
    pub id: ItemId,
    pub source: Arc<[u8]>,
    pub transform: ItemTransform,
}

/// A line of user text, outlined in black under its fill color.
#[derive(Clone, Debug, PartialEq)]
pub struct TextItem {
    pub id: ItemId,
    pub content: String,
    pub color: Color,
    pub transform: ItemTransform,
}

#[derive(Clone, Debug, PartialEq)]
pub enum OverlayItem {
    Sticker(Sticker),
    Text(TextItem),
}

impl OverlayItem {
    pub fn id(&self) -> ItemId {
        match self {
            Self::Sticker(s) => s.id,
            Self::Text(t) => t.id,
        }
    }

    pub fn kind(&self) -> ItemKind {
        match self {
            Self::Sticker(_) => ItemKind::Sticker,
            Self::Text(_) => ItemKind::Text,
        }
    }

    pub fn transform(&self) -> &ItemTransform {
        match self {
            Self::Sticker(s) => &s.transform,
            Self::Text(t) => &t.transform,
        }
    }

    pub fn transform_mut(&mut self) -> &mut ItemTransform {
        match self {
            Self::Sticker(s) => &mut s.transform,
            Self::Text(t) => &mut t.transform,
        }
    }
}

/// Where a sticker lands in output pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StickerPlacement {
    pub center: Point,
    /// Side length of the drawn square.
    pub size: f64,
    pub rotation_rad: f64,
}

impl StickerPlacement {
    pub fn resolve(t: &ItemTransform, ratio: f64) -> Self {
        let size = STICKER_BASE_SIZE * t.scale * ratio;
        Self {
            center: Point::new(t.x * ratio + size / 2.0, t.y * ratio + size / 2.0),
            size,
            rotation_rad: deg_to_rad(t.rotation),
        }
    }

    /// Local square `(0,0)-(size,size)` to output pixels, rotating about the center.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.center.to_vec2())
            * Affine::rotate(self.rotation_rad)
            * Affine::translate((-self.size / 2.0, -self.size / 2.0))
    }

    pub fn local_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.size, self.size)
    }
}

/// Where a text item lands in output pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextPlacement {
    /// Top-left anchor and rotation pivot.
    pub origin: Point,
    pub font_size: f64,
    pub stroke_width: f64,
    pub rotation_rad: f64,
}

impl TextPlacement {
    pub fn resolve(t: &ItemTransform, ratio: f64) -> Self {
        Self {
            origin: Point::new(t.x * ratio, t.y * ratio),
            font_size: TEXT_BASE_FONT_SIZE * t.scale * ratio,
            stroke_width: TEXT_STROKE_BASE_WIDTH * t.scale * ratio,
            rotation_rad: deg_to_rad(t.rotation),
        }
    }

    pub fn transform(&self) -> Affine {
        Affine::translate(self.origin.to_vec2()) * Affine::rotate(self.rotation_rad)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/item.rs"]
mod tests;
