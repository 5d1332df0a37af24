use serde::{Deserialize, Serialize};

use super::Color;

/// How glyph coverage is turned into texture pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextQuality {
    /// Foreground and background, per-channel subpixel coverage
    Lcd,

    /// Foreground over an opaque background
    Shaded,

    /// Foreground only, coverage becomes alpha
    Blended,

    /// Foreground only, coverage thresholded to fully opaque or fully transparent.
    /// Fastest, and the look you get when nothing else is configured
    #[default]
    Solid,
}
impl TextQuality {
    /// `true` if the texture is filled with the background colour before glyphs are drawn
    pub fn has_background(&self) -> bool {
        matches!(self, Self::Lcd | Self::Shaded)
    }
}

/// Everything besides the font that determines what rasterized text looks like
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub quality: TextQuality,
    pub foreground: Color,
    pub background: Color,
}
impl Default for TextStyle {
    fn default() -> Self {
        Self {
            quality: TextQuality::default(),
            foreground: Color::new(0, 0, 0, 255),
            background: Color::new(255, 255, 255, 255),
        }
    }
}

/// When wrapping by word, this value is the minimum proportion of the line length that can be left by word wrapping.
/// That is, if the resulting line is less than this value times the maximum length,
/// we will fall back to character wrapping.
///
/// This also handles the strange case where a single word is several lines long
pub const WORD_WRAP_LENGTH_THRESHOLD: f32 = 0.5;
