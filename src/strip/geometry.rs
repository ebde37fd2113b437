use crate::foundation::core::{Canvas, Point, Rect};
use crate::foundation::error::{SnapError, SnapResult};

/// Number of photo slots on a strip.
pub const SLOT_COUNT: usize = 3;

/// Every layout constant of the printed strip.
///
/// The defaults reproduce the 600x1490 print layout that existing templates are drawn for;
/// changing them is supported but breaks compatibility with custom background artwork.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StripGeometry {
    pub width: u32,
    pub height: u32,

    /// Header zone spans `0..header_height`.
    pub header_height: u32,
    pub title_center_y: f64,
    pub title_font_px: f32,

    /// Horizontal inset of the accent rule from both canvas edges.
    pub accent_inset: f64,
    pub accent_y: f64,
    pub accent_width: f64,

    pub slot_width: u32,
    pub slot_height: u32,
    /// Top edge of each slot. Slots are centered horizontally.
    pub slot_ys: [u32; SLOT_COUNT],

    pub border_width: f64,
    /// Border width used when the template has a background image.
    pub border_width_on_image: f64,

    /// Footer zone spans `footer_top..height`.
    pub footer_top: u32,
    pub footer_center_y: f64,
    pub footer_font_px: f32,
    pub footer_opacity: f32,
}

impl Default for StripGeometry {
    fn default() -> Self {
        Self {
            width: 600,
            height: 1490,
            header_height: 160,
            title_center_y: 80.0,
            title_font_px: 52.0,
            accent_inset: 40.0,
            accent_y: 130.0,
            accent_width: 4.0,
            slot_width: 520,
            slot_height: 390,
            slot_ys: [160, 580, 1000],
            border_width: 4.0,
            border_width_on_image: 2.0,
            footer_top: 1390,
            footer_center_y: 1440.0,
            footer_font_px: 28.0,
            footer_opacity: 0.8,
        }
    }
}

impl StripGeometry {
    pub fn validate(&self) -> SnapResult<()> {
        Canvas::new(self.width, self.height)?;
        if self.slot_width == 0 || self.slot_height == 0 {
            return Err(SnapError::validation("slot width/height must be > 0"));
        }
        if self.slot_width > self.width {
            return Err(SnapError::validation(format!(
                "slot width {} exceeds strip width {}",
                self.slot_width, self.width
            )));
        }
        for (i, y) in self.slot_ys.iter().enumerate() {
            if u64::from(*y) + u64::from(self.slot_height) > u64::from(self.height) {
                return Err(SnapError::validation(format!(
                    "slot {i} at y={y} extends past strip height {}",
                    self.height
                )));
            }
        }
        if self.header_height > self.height || self.footer_top > self.height {
            return Err(SnapError::validation("header/footer zones must lie inside the strip"));
        }
        if !(self.title_font_px.is_finite() && self.title_font_px > 0.0)
            || !(self.footer_font_px.is_finite() && self.footer_font_px > 0.0)
        {
            return Err(SnapError::validation("font sizes must be finite and > 0"));
        }
        if !(0.0..=1.0).contains(&self.footer_opacity) {
            return Err(SnapError::validation("footer_opacity must be in [0, 1]"));
        }
        if !(self.border_width >= 0.0 && self.border_width_on_image >= 0.0 && self.accent_width >= 0.0)
        {
            return Err(SnapError::validation("stroke widths must be >= 0"));
        }
        Ok(())
    }

    pub fn canvas(&self) -> SnapResult<Canvas> {
        Canvas::new(self.width, self.height)
    }

    /// Bounds of slot `index`, or `None` past the last slot.
    pub fn slot_rect(&self, index: usize) -> Option<Rect> {
        let y = f64::from(*self.slot_ys.get(index)?);
        let x = f64::from(self.width.saturating_sub(self.slot_width)) / 2.0;
        Some(Rect::new(
            x,
            y,
            x + f64::from(self.slot_width),
            y + f64::from(self.slot_height),
        ))
    }

    pub fn title_anchor(&self) -> Point {
        Point::new(f64::from(self.width) / 2.0, self.title_center_y)
    }

    pub fn footer_anchor(&self) -> Point {
        Point::new(f64::from(self.width) / 2.0, self.footer_center_y)
    }

    /// Endpoints of the header accent rule.
    pub fn accent_rule(&self) -> (Point, Point) {
        (
            Point::new(self.accent_inset, self.accent_y),
            Point::new(f64::from(self.width) - self.accent_inset, self.accent_y),
        )
    }
}

/// Scale `src_w`x`src_h` uniformly so it fully covers `slot`, centered.
///
/// The returned rectangle may overflow the slot on one axis; callers clip to the slot.
pub fn cover_fit(src_w: u32, src_h: u32, slot: Rect) -> Rect {
    let sw = f64::from(src_w.max(1));
    let sh = f64::from(src_h.max(1));
    let scale = (slot.width() / sw).max(slot.height() / sh);
    let w = sw * scale;
    let h = sh * scale;
    let center = slot.center();
    Rect::new(
        center.x - w / 2.0,
        center.y - h / 2.0,
        center.x + w / 2.0,
        center.y + h / 2.0,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/strip/geometry.rs"]
mod tests;
