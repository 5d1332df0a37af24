use std::fmt::Display;
use std::path::Path;

use eyre::WrapErr;
use fontdue::{Font as FontData, FontSettings, LineMetrics};

/// Simple wrapper for the `&'static str` returned by `fontdue`;
/// we need something that implements `Error` for `eyre`
#[derive(Debug)]
pub struct FontError(&'static str);
impl Display for FontError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FontError: {}", self.0)
    }
}
impl std::error::Error for FontError {}

/// A parsed font face. Rasterization happens per text texture, see [`crate::render::text`].
pub struct Typeface {
    data: FontData,
}
impl Typeface {
    pub fn from_bytes(bytes: &[u8]) -> eyre::Result<Self> {
        let data = FontData::from_bytes(bytes, FontSettings::default())
            .map_err(FontError)
            .wrap_err("processing font data")?;

        Ok(Self { data })
    }

    pub fn load(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .wrap_err_with(|| format!("reading font file {}", path.display()))?;
        Self::from_bytes(&bytes).wrap_err_with(|| format!("loading font {}", path.display()))
    }

    pub(crate) fn font(&self) -> &FontData {
        &self.data
    }

    pub(crate) fn line_metrics(&self, size: f32) -> Option<LineMetrics> {
        self.data.horizontal_line_metrics(size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_are_an_error() {
        let err = Typeface::from_bytes(b"definitely not a font").err().unwrap();
        assert!(format!("{err:#}").contains("processing font data"));
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = Typeface::load("/nonexistent/tessel/font.ttf").err().unwrap();
        assert!(format!("{err:#}").contains("/nonexistent/tessel/font.ttf"));
    }
}
