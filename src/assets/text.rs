use std::path::Path;

use anyhow::Context as _;

use crate::assets::color::Color;
use crate::config::FontConfig;
use crate::foundation::error::{SnapError, SnapResult};

/// RGBA8 brush color carried through Parley layouts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextBrushRgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl From<Color> for TextBrushRgba8 {
    fn from(c: Color) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// Handle to a font registered with a [`TextEngine`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FaceId(usize);

struct RegisteredFace {
    family: String,
    data: vello_cpu::peniko::FontData,
}

/// A shaped single-paragraph text block plus the font needed to paint it.
///
/// Glyph positions are relative to the block's top-left corner; the first line's ascent sits
/// below `y = 0`, matching a `top` text baseline.
pub struct TextBlock {
    pub(crate) layout: parley::Layout<TextBrushRgba8>,
    pub(crate) font: vello_cpu::peniko::FontData,
}

impl std::fmt::Debug for TextBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextBlock")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish_non_exhaustive()
    }
}

impl TextBlock {
    /// Advance width of the widest line.
    pub fn width(&self) -> f32 {
        self.layout.width()
    }

    /// Total line-box height.
    pub fn height(&self) -> f32 {
        self.layout.height()
    }
}

/// Stateful helper for building Parley text layouts from raw font bytes.
pub struct TextEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    faces: Vec<RegisteredFace>,
}

impl Default for TextEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextEngine {
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            faces: Vec::new(),
        }
    }

    /// Register a TrueType/OpenType font from memory.
    pub fn register_font(&mut self, font_bytes: Vec<u8>) -> SnapResult<FaceId> {
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.clone()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| SnapError::validation("no font families registered from font bytes"))?;

        let family = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| SnapError::validation("registered font family has no name"))?
            .to_string();

        let data = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(font_bytes), 0);
        self.faces.push(RegisteredFace { family, data });
        Ok(FaceId(self.faces.len() - 1))
    }

    pub fn register_font_file(&mut self, path: &Path) -> SnapResult<FaceId> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read font '{}'", path.display()))?;
        self.register_font(bytes)
    }

    pub fn family_name(&self, face: FaceId) -> Option<&str> {
        self.faces.get(face.0).map(|f| f.family.as_str())
    }

    /// Shape and lay out a single unwrapped line of text.
    pub fn layout(
        &mut self,
        text: &str,
        face: FaceId,
        size_px: f32,
        color: Color,
    ) -> SnapResult<TextBlock> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(SnapError::validation(
                "text size_px must be finite and > 0",
            ));
        }
        let registered = self
            .faces
            .get(face.0)
            .ok_or_else(|| SnapError::validation(format!("unknown font face {face:?}")))?;
        let family_name = registered.family.clone();
        let font = registered.data.clone();

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(TextBrushRgba8::from(
            color,
        )));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);

        Ok(TextBlock { layout, font })
    }
}

/// Which part of the strip a piece of text belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontRole {
    /// Event title in the header.
    Display,
    /// Date line in the footer.
    Body,
    /// User-placed text items.
    Overlay,
}

/// Font roles mapped onto a shared [`TextEngine`].
///
/// A role without its own face borrows the first registered one; with no fonts at all
/// [`Typesetter::layout`] yields `None` and callers skip the text layer.
#[derive(Default)]
pub struct Typesetter {
    engine: TextEngine,
    display: Option<FaceId>,
    body: Option<FaceId>,
    overlay: Option<FaceId>,
}

impl Typesetter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every font file named in `cfg`.
    pub fn from_config(cfg: &FontConfig) -> SnapResult<Self> {
        let mut out = Self::new();
        for (role, path) in [
            (FontRole::Display, cfg.display.as_deref()),
            (FontRole::Body, cfg.body.as_deref()),
            (FontRole::Overlay, cfg.overlay.as_deref()),
        ] {
            if let Some(path) = path {
                let face = out.engine.register_font_file(path)?;
                out.assign(role, face);
            }
        }
        Ok(out)
    }

    /// Register `font_bytes` for `role`.
    pub fn with_font(mut self, role: FontRole, font_bytes: Vec<u8>) -> SnapResult<Self> {
        let face = self.engine.register_font(font_bytes)?;
        self.assign(role, face);
        Ok(self)
    }

    fn assign(&mut self, role: FontRole, face: FaceId) {
        match role {
            FontRole::Display => self.display = Some(face),
            FontRole::Body => self.body = Some(face),
            FontRole::Overlay => self.overlay = Some(face),
        }
    }

    pub fn face_for(&self, role: FontRole) -> Option<FaceId> {
        let own = match role {
            FontRole::Display => self.display,
            FontRole::Body => self.body,
            FontRole::Overlay => self.overlay,
        };
        own.or(self.display).or(self.body).or(self.overlay)
    }

    pub fn has_fonts(&self) -> bool {
        self.face_for(FontRole::Display).is_some()
    }

    pub fn layout(
        &mut self,
        role: FontRole,
        text: &str,
        size_px: f32,
        color: Color,
    ) -> SnapResult<Option<TextBlock>> {
        let Some(face) = self.face_for(role) else {
            return Ok(None);
        };
        self.engine.layout(text, face, size_px, color).map(Some)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/text.rs"]
mod tests;
