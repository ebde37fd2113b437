use crate::foundation::error::{SnapError, SnapResult};

/// Displayed width of the base strip at the time overlay items were placed.
///
/// Overlay coordinates only mean something relative to the exact base image they were placed
/// on; the ratio must be taken against that same image's native width.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct ReferenceFrame {
    display_width: f64,
}

impl ReferenceFrame {
    pub fn new(display_width: f64) -> SnapResult<Self> {
        if !display_width.is_finite() || display_width <= 0.0 {
            return Err(SnapError::validation(format!(
                "reference display width must be finite and > 0, got {display_width}"
            )));
        }
        Ok(Self { display_width })
    }

    /// Frame for items recorded directly in output pixels of a `native_width`-wide image.
    pub fn native(native_width: u32) -> SnapResult<Self> {
        Self::new(f64::from(native_width))
    }

    pub fn display_width(self) -> f64 {
        self.display_width
    }

    /// Output pixels per reference unit.
    pub fn ratio(self, native_width: u32) -> f64 {
        f64::from(native_width) / self.display_width
    }
}

impl TryFrom<f64> for ReferenceFrame {
    type Error = SnapError;

    fn try_from(value: f64) -> SnapResult<Self> {
        Self::new(value)
    }
}

impl From<ReferenceFrame> for f64 {
    fn from(frame: ReferenceFrame) -> Self {
        frame.display_width
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/reference.rs"]
mod tests;
