use std::path::{Path, PathBuf};

use eyre::WrapErr;
use palette::Srgb;
use serde::{Deserialize, Serialize};

use crate::graphics::text::TextQuality;
use crate::graphics::Color;
use crate::render::Pixel;

pub const CONFIG_PATH: &str = "config/tessel.ron";

/// Startup settings for a [`crate::game::Game`]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub font: Option<FontConfig>,
    pub text: TextConfig,
    /// Colour the frame is cleared to before each render, as `(r, g, b)`
    pub clear_color: (u8, u8, u8),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FontConfig {
    pub path: PathBuf,
    pub size: Pixel,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    pub quality: TextQuality,
    /// `(r, g, b, a)`
    pub foreground: (u8, u8, u8, u8),
    /// `(r, g, b, a)`
    pub background: (u8, u8, u8, u8),
}

impl GameConfig {
    pub fn load(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("reading config {}", path.display()))?;
        Self::from_ron(&contents).wrap_err_with(|| format!("parsing config {}", path.display()))
    }

    /// Like [`GameConfig::load`], but a missing or malformed file falls back to the defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("no config at {}, using defaults", path.display());
            return Self::default();
        }
        Self::load(path).unwrap_or_else(|err| {
            log::warn!("failed to load config, using defaults: {err:#}");
            Self::default()
        })
    }

    pub fn from_ron(contents: &str) -> eyre::Result<Self> {
        Ok(ron::from_str(contents)?)
    }

    pub fn to_ron(&self) -> eyre::Result<String> {
        let pretty = ron::ser::PrettyConfig::new().depth_limit(3);
        Ok(ron::ser::to_string_pretty(self, pretty)?)
    }

    pub fn clear_color(&self) -> Srgb<u8> {
        let (r, g, b) = self.clear_color;
        Srgb::new(r, g, b)
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "tessel".to_owned(),
            width: 640,
            height: 360,
            resizable: true,
        }
    }
}

impl TextConfig {
    pub fn foreground(&self) -> Color {
        let (r, g, b, a) = self.foreground;
        Color::new(r, g, b, a)
    }

    pub fn background(&self) -> Color {
        let (r, g, b, a) = self.background;
        Color::new(r, g, b, a)
    }
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            quality: TextQuality::Solid,
            foreground: (0, 0, 0, 255),
            background: (255, 255, 255, 255),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let config = GameConfig::from_ron(
            r#"(
                window: (title: "demo", width: 320, height: 240, resizable: false),
                font: Some((path: "assets/font.ttf", size: 24)),
                text: (quality: Blended, foreground: (1, 2, 3, 4), background: (5, 6, 7, 8)),
                clear_color: (9, 10, 11),
            )"#,
        )
        .unwrap();

        assert_eq!(config.window.title, "demo");
        assert_eq!((config.window.width, config.window.height), (320, 240));
        assert!(!config.window.resizable);
        assert_eq!(
            config.font,
            Some(FontConfig {
                path: PathBuf::from("assets/font.ttf"),
                size: 24
            })
        );
        assert_eq!(config.text.quality, TextQuality::Blended);
        assert_eq!(config.text.foreground(), Color::new(1, 2, 3, 4));
        assert_eq!(config.clear_color(), Srgb::new(9, 10, 11));
    }

    #[test]
    fn missing_fields_use_defaults() {
        let config = GameConfig::from_ron("(window: (title: \"x\"))").unwrap();
        assert_eq!(config.window.title, "x");
        assert_eq!(config.window.width, 640);
        assert_eq!(config.font, None);
        assert_eq!(config.text, TextConfig::default());
    }

    #[test]
    fn serialized_config_parses_back() {
        let mut config = GameConfig::default();
        config.font = Some(FontConfig {
            path: PathBuf::from("a.ttf"),
            size: 12,
        });
        let text = config.to_ron().unwrap();
        assert_eq!(GameConfig::from_ron(&text).unwrap(), config);
    }

    #[test]
    fn malformed_config_is_an_error() {
        assert!(GameConfig::from_ron("(window: 3)").is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = GameConfig::load_or_default("/nonexistent/tessel/config.ron");
        assert_eq!(config, GameConfig::default());
        assert!(GameConfig::load("/nonexistent/tessel/config.ron").is_err());
    }
}
