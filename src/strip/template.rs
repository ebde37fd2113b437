use std::sync::Arc;

use crate::assets::color::Color;
use crate::assets::import::ImportedImage;

/// What fills the strip behind the header, photos, and footer.
#[derive(Clone, Debug, PartialEq)]
pub enum Backdrop {
    Solid(Color),
    /// Encoded image stretched to the full canvas. Suppresses the header accent rule.
    Image(Arc<[u8]>),
}

/// Visual theme of a strip.
#[derive(Clone, Debug, PartialEq)]
pub struct Template {
    pub id: String,
    pub name: String,
    pub backdrop: Backdrop,
    pub text_color: Color,
    pub accent_color: Color,
    pub border_color: Option<Color>,
}

impl Template {
    pub fn has_background_image(&self) -> bool {
        matches!(self.backdrop, Backdrop::Image(_))
    }

    /// Border stroke color, falling back to the accent color.
    pub fn border(&self) -> Color {
        self.border_color.unwrap_or(self.accent_color)
    }

    /// Template built around an imported background image.
    pub fn custom(image: &ImportedImage) -> Self {
        Self::custom_with_id(
            image,
            format!("custom-{}", chrono::Utc::now().timestamp_millis()),
        )
    }

    pub fn custom_with_id(image: &ImportedImage, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: "Custom".to_owned(),
            backdrop: Backdrop::Image(Arc::clone(&image.bytes)),
            text_color: Color::WHITE,
            accent_color: Color::WHITE,
            border_color: Some(Color::rgba(255, 255, 255, 128)),
        }
    }
}

fn solid(
    id: &str,
    name: &str,
    background: Color,
    text: Color,
    accent: Color,
    border: Color,
) -> Template {
    Template {
        id: id.to_owned(),
        name: name.to_owned(),
        backdrop: Backdrop::Solid(background),
        text_color: text,
        accent_color: accent,
        border_color: Some(border),
    }
}

/// The stock templates, in display order.
pub fn builtin_templates() -> Vec<Template> {
    vec![
        solid(
            "classic",
            "Classic",
            Color::rgb(0xff, 0xff, 0xff),
            Color::rgb(0x1e, 0x29, 0x3b),
            Color::rgb(0x33, 0x41, 0x55),
            Color::rgb(0xcb, 0xd5, 0xe1),
        ),
        solid(
            "midnight",
            "Midnight",
            Color::rgb(0x0f, 0x17, 0x2a),
            Color::rgb(0xf8, 0xfa, 0xfc),
            Color::rgb(0xec, 0x48, 0x99),
            Color::rgb(0x33, 0x41, 0x55),
        ),
        solid(
            "vintage",
            "Vintage",
            Color::rgb(0xff, 0xfb, 0xeb),
            Color::rgb(0x78, 0x35, 0x0f),
            Color::rgb(0xb4, 0x53, 0x09),
            Color::rgb(0xd6, 0xd3, 0xd1),
        ),
        solid(
            "pop",
            "Pop Art",
            Color::rgb(0xfe, 0xf0, 0x8a),
            Color::rgb(0x1e, 0x40, 0xaf),
            Color::rgb(0xef, 0x44, 0x44),
            Color::rgb(0x1e, 0x40, 0xaf),
        ),
        solid(
            "bw",
            "Mono",
            Color::rgb(0x17, 0x17, 0x17),
            Color::rgb(0xff, 0xff, 0xff),
            Color::rgb(0x52, 0x52, 0x52),
            Color::rgb(0x40, 0x40, 0x40),
        ),
    ]
}

pub fn find_template(id: &str) -> Option<Template> {
    builtin_templates().into_iter().find(|t| t.id == id)
}

#[cfg(test)]
#[path = "../../tests/unit/strip/template.rs"]
mod tests;
