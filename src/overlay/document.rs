use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;

use crate::assets::color::Color;
use crate::foundation::error::{SnapError, SnapResult};
use crate::overlay::arena::OverlayArena;
use crate::overlay::item::{ItemKind, ItemTransform};
use crate::overlay::palette::emoji_sticker;
use crate::overlay::reference::ReferenceFrame;

/// Overlay placements saved as JSON, with stickers referenced by file path.
///
/// ```json
/// {
///   "reference_width": 300,
///   "stickers": [
///     { "source": "heart.png", "x": 118, "y": 340, "rotation": 15 },
///     { "emoji": "🦄", "x": 40, "y": 90 }
///   ],
///   "texts": [{ "content": "Yay!", "color": "#ff0055", "x": 100, "y": 352, "scale": 1.5 }]
/// }
/// ```
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OverlayDocument {
    pub reference_width: ReferenceFrame,
    #[serde(default)]
    pub stickers: Vec<StickerSpec>,
    #[serde(default)]
    pub texts: Vec<TextSpec>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StickerSpec {
    /// Image file, relative to the document's directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
    /// Emoji drawn as a 64px sticker instead of a file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    #[serde(flatten)]
    pub transform: ItemTransform,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextSpec {
    pub content: String,
    #[serde(default = "default_text_color")]
    pub color: Color,
    #[serde(flatten)]
    pub transform: ItemTransform,
}

fn default_text_color() -> Color {
    Color::WHITE
}

impl OverlayDocument {
    pub fn from_json(json: &str) -> SnapResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> SnapResult<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read overlay document '{}'", path.display()))?;
        Self::from_json(&json)
    }

    /// Build an arena with stickers first, then texts, each in document order.
    ///
    /// Scales are clamped to each kind's range. Blank text and stickers naming neither (or both)
    /// a file and an emoji are rejected. A sticker file that
    /// cannot be read still takes its slot with empty bytes, so resolving skips and reports it
    /// like any other undecodable sticker.
    pub fn into_arena(self, base_dir: &Path) -> SnapResult<OverlayArena> {
        let mut arena = OverlayArena::new();
        for spec in self.stickers {
            let source: Arc<[u8]> = match (&spec.source, &spec.emoji) {
                (Some(file), None) => {
                    let path = base_dir.join(file);
                    let bytes = std::fs::read(&path).unwrap_or_else(|e| {
                        tracing::warn!(
                            path = %path.display(),
                            error = %e,
                            "sticker file unreadable"
                        );
                        Vec::new()
                    });
                    Arc::from(bytes)
                }
                (None, Some(emoji)) if !emoji.trim().is_empty() => emoji_sticker(emoji),
                _ => {
                    return Err(SnapError::validation(
                        "sticker needs exactly one of `source` or a non-blank `emoji`",
                    ));
                }
            };
            let mut t = spec.transform;
            t.scale = ItemKind::Sticker.clamp_scale(t.scale);
            arena.insert_sticker(source, t);
        }
        for spec in self.texts {
            let mut t = spec.transform;
            t.scale = ItemKind::Text.clamp_scale(t.scale);
            arena.insert_text(&spec.content, spec.color, t)?;
        }
        arena.select(None)?;
        Ok(arena)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/document.rs"]
mod tests;
