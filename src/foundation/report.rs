use std::fmt;

/// A drawable part of a strip or of the final image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "layer", content = "index", rename_all = "snake_case")]
pub enum Layer {
    Background,
    Title,
    Footer,
    /// Photo slot, zero-based.
    Photo(usize),
    /// Overlay item id.
    Sticker(u64),
    /// Overlay item id.
    Text(u64),
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Background => f.write_str("background"),
            Self::Title => f.write_str("title"),
            Self::Footer => f.write_str("footer"),
            Self::Photo(i) => write!(f, "photo #{i}"),
            Self::Sticker(id) => write!(f, "sticker {id}"),
            Self::Text(id) => write!(f, "text {id}"),
        }
    }
}

/// A layer left out of the output, and why.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Skipped {
    pub layer: Layer,
    pub reason: String,
}

/// Soft failures collected while drawing.
///
/// Drawing continues past these; the output is still produced without the listed layers.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct RenderReport {
    pub skipped: Vec<Skipped>,
}

impl RenderReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    pub(crate) fn skip(&mut self, layer: Layer, reason: impl fmt::Display) {
        let reason = reason.to_string();
        tracing::warn!(%layer, %reason, "layer skipped");
        self.skipped.push(Skipped { layer, reason });
    }

    pub fn contains(&self, layer: Layer) -> bool {
        self.skipped.iter().any(|s| s.layer == layer)
    }
}
