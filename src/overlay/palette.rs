use std::sync::Arc;

use crate::assets::color::Color;

/// Emoji offered as stickers out of the box, in picker order.
pub const DEFAULT_STICKERS: [&str; 10] = [
    "\u{2764}\u{fe0f}",
    "\u{1f389}",
    "\u{1f60e}",
    "\u{1f525}",
    "\u{1f451}",
    "\u{1f382}",
    "\u{2b50}",
    "\u{1f48b}",
    "\u{1f436}",
    "\u{1f984}",
];

/// Text colors offered by the editor, in picker order.
pub const TEXT_COLORS: [Color; 7] = [
    Color::rgb(0xff, 0xff, 0xff),
    Color::rgb(0x00, 0x00, 0x00),
    Color::rgb(0xff, 0x00, 0x55),
    Color::rgb(0x00, 0x99, 0xff),
    Color::rgb(0xff, 0xcc, 0x00),
    Color::rgb(0x00, 0xcc, 0x66),
    Color::rgb(0x99, 0x00, 0xff),
];

/// Side of the square emoji sticker canvas.
pub const EMOJI_CANVAS: u32 = 64;

/// A 64x64 SVG drawing `emoji` centered at 54px, usable as a sticker source.
///
/// The glyph comes from whatever emoji face the host has; the sticker keeps its nominal size
/// either way.
pub fn emoji_svg(emoji: &str) -> String {
    let mut escaped = String::with_capacity(emoji.len());
    for ch in emoji.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            c => escaped.push(c),
        }
    }
    format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{s}" height="{s}" viewBox="0 0 {s} {s}">"#,
            r#"<text x="32" y="34" font-size="54" font-family="serif" "#,
            r#"text-anchor="middle" dominant-baseline="middle">{e}</text></svg>"#
        ),
        s = EMOJI_CANVAS,
        e = escaped
    )
}

/// Sticker source bytes for an emoji.
pub fn emoji_sticker(emoji: &str) -> Arc<[u8]> {
    Arc::from(emoji_svg(emoji).into_bytes())
}

/// Sticker sources for every entry of [`DEFAULT_STICKERS`].
pub fn default_stickers() -> Vec<Arc<[u8]>> {
    DEFAULT_STICKERS.into_iter().map(emoji_sticker).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/palette.rs"]
mod tests;
