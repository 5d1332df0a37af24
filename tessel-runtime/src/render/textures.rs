use std::collections::HashMap;
use std::path::Path;

use super::text::rasterize_text;
use super::{Pixel, RenderError};
use crate::graphics::text::{TextQuality, TextStyle};
use crate::graphics::typeface::Typeface;
use crate::graphics::{Color, Texture};
use crate::layout::SizeConstraint;

/// Owns every texture a game has created, by name, plus the font and style used to
/// turn strings into new textures.
///
/// Drawing is done through [`super::RenderContext`], which borrows this manager for one frame.
#[derive(Default)]
pub struct TextureManager {
    textures: HashMap<String, Texture>,
    font: Option<Typeface>,
    font_size: Pixel,
    style: TextStyle,
}
impl TextureManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a texture, replacing any texture already using `name`
    pub fn insert(&mut self, name: impl Into<String>, texture: Texture) {
        let name = name.into();
        if self.textures.insert(name.clone(), texture).is_some() {
            log::debug!("replaced texture '{name}'");
        }
    }

    pub fn get(&self, name: &str) -> Option<&Texture> {
        self.textures.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.textures.contains_key(name)
    }

    pub fn erase(&mut self, name: &str) -> Option<Texture> {
        self.textures.remove(name)
    }

    pub fn clear(&mut self) {
        self.textures.clear();
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    pub fn set_font(&mut self, typeface: Typeface, size: Pixel) {
        self.font = Some(typeface);
        self.font_size = size;
    }

    /// Loads a font file to render text with, at `size` pixels
    pub fn open_font(&mut self, path: impl AsRef<Path>, size: Pixel) -> eyre::Result<()> {
        if size <= 0 {
            return Err(RenderError::InvalidFontSize(size).into());
        }
        let typeface = Typeface::load(path)?;
        self.set_font(typeface, size);
        Ok(())
    }

    /// Replaces the current font; the previous one stays in place if loading fails
    pub fn change_font(&mut self, path: impl AsRef<Path>, size: Pixel) -> eyre::Result<()> {
        self.open_font(path, size)
    }

    pub fn change_font_size(&mut self, size: Pixel) -> Result<(), RenderError> {
        if self.font.is_none() {
            return Err(RenderError::NoFont);
        }
        if size <= 0 {
            return Err(RenderError::InvalidFontSize(size));
        }
        self.font_size = size;
        Ok(())
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    pub fn font_size(&self) -> Pixel {
        self.font_size
    }

    pub fn text_quality(&self) -> TextQuality {
        self.style.quality
    }

    pub fn set_text_quality(&mut self, quality: TextQuality) {
        self.style.quality = quality;
    }

    pub fn foreground(&self) -> Color {
        self.style.foreground
    }

    pub fn set_foreground(&mut self, color: Color) {
        self.style.foreground = color;
    }

    pub fn background(&self) -> Color {
        self.style.background
    }

    pub fn set_background(&mut self, color: Color) {
        self.style.background = color;
    }

    pub fn style(&self) -> TextStyle {
        self.style
    }

    /// Rasterizes `text` into a new texture, wrapping only at newlines
    pub fn load_from_text(&mut self, name: impl Into<String>, text: &str) -> Result<(), RenderError> {
        self.load_from_text_wrapped(name, text, 0)
    }

    /// Rasterizes `text` into a new texture, wrapping lines wider than `width`.
    /// A `width` of zero wraps only at newlines.
    pub fn load_from_text_wrapped(
        &mut self,
        name: impl Into<String>,
        text: &str,
        width: Pixel,
    ) -> Result<(), RenderError> {
        let max_size = match width {
            0 => SizeConstraint::auto(),
            width => SizeConstraint::intrinsic_width(width),
        };
        let texture = self.rasterize(text, max_size)?;
        self.insert(name, texture);
        Ok(())
    }

    pub(crate) fn rasterize(&self, text: &str, max_size: SizeConstraint) -> Result<Texture, RenderError> {
        let typeface = self.font.as_ref().ok_or(RenderError::NoFont)?;
        Ok(rasterize_text(
            typeface,
            self.font_size,
            text,
            max_size,
            &self.style,
        ))
    }
}
