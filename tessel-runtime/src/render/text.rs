use unicode_segmentation::UnicodeSegmentation;

use super::Pixel;
use crate::graphics::text::{TextQuality, TextStyle, WORD_WRAP_LENGTH_THRESHOLD};
use crate::graphics::typeface::Typeface;
use crate::graphics::{mix, pack, Color, Texture};
use crate::layout::{Size, SizeConstraint};

use fontdue::Font;

/// A grapheme together with its advance width.
///
/// The `width` described here is the entire block size;
/// `Unit`s are assumed to be placed right next to each other.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Unit<'t> {
    grapheme: &'t str,
    width: Pixel,
}
impl Unit<'_> {
    fn is_whitespace(&self) -> bool {
        self.grapheme.chars().all(char::is_whitespace)
    }
}

#[derive(Default)]
struct TextLine<'t> {
    contents: Vec<Unit<'t>>,
    width: Pixel,

    /// Index just after the last whitespace unit; a word break can happen here
    last_break: Option<usize>,
}
impl<'t> TextLine<'t> {
    fn push(&mut self, unit: Unit<'t>) {
        self.width += unit.width;
        self.contents.push(unit);
        if unit.is_whitespace() {
            self.last_break = Some(self.contents.len());
        }
    }

    /// `true` if the provided `unit` would fit at the end of the current line
    /// subject to the `max_size` constraint.
    #[inline]
    fn would_fit(&self, max_size: SizeConstraint, unit: &Unit) -> bool {
        max_size.fits_width(self.width + unit.width)
    }

    /// Whitespace is not preserved when it causes a line break
    fn trim_end(mut self) -> Self {
        while let Some(unit) = self.contents.last() {
            if !unit.is_whitespace() {
                break;
            }
            self.width -= unit.width;
            self.contents.pop();
        }
        self
    }

    /// Splits this full line into the part that stays and the part that moves to the next line.
    ///
    /// Tries the last word boundary first, unless what would stay is narrower than
    /// [`WORD_WRAP_LENGTH_THRESHOLD`] of the line; then it breaks right here, by grapheme.
    fn split(mut self, max_size: SizeConstraint) -> (Self, Self) {
        let min_width = max_size
            .width
            .map(|mw| (mw as f32 * WORD_WRAP_LENGTH_THRESHOLD) as Pixel);

        if let Some(at) = self.last_break {
            let kept: Pixel = self.contents[..at].iter().map(|unit| unit.width).sum();
            if !matches!(min_width, Some(min_width) if kept < min_width) {
                let rest = self.contents.split_off(at);
                self.width = kept;
                self.last_break = None;

                let mut next = TextLine::default();
                rest.into_iter().for_each(|unit| next.push(unit));
                return (self.trim_end(), next);
            }
        }

        (self.trim_end(), TextLine::default())
    }
}

/// Breaks `text` into lines of graphemes.
///
/// Newlines always break. With a width constraint, lines are broken at the last whitespace
/// that keeps them inside it, or by grapheme when a word is too long for that.
/// A single grapheme wider than the constraint still gets a line of its own.
fn wrap_lines<'t>(
    text: &'t str,
    max_size: SizeConstraint,
    advance: impl Fn(&str) -> Pixel,
) -> Vec<Vec<&'t str>> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = TextLine::default();
        // Set after a wrap, so that the next line doesn't begin with whitespace
        let mut wrapped = false;

        for grapheme in paragraph.graphemes(true) {
            let unit = Unit {
                grapheme,
                width: advance(grapheme),
            };

            if unit.is_whitespace() {
                if !(wrapped && current.contents.is_empty()) {
                    // Always pushed, even past the limit; it is trimmed if it ends up ending a line
                    current.push(unit);
                }
                continue;
            }

            while !current.contents.is_empty() && !current.would_fit(max_size, &unit) {
                let (line, rest) = current.split(max_size);
                lines.push(line);
                current = rest;
                wrapped = true;
            }

            current.push(unit);
            wrapped = false;
        }

        lines.push(current.trim_end());
    }

    lines
        .into_iter()
        .map(|line| line.contents.into_iter().map(|unit| unit.grapheme).collect())
        .collect()
}

/// Output of rasterization, for a given font and size.
/// This currently only represents a single glyph.
///
/// -----
///
/// Ultimately this stuff comes from `fontdue`,
/// but we're keeping some computed intermediate data here.
/// Particularly noteworthy is the conversions from subpixel floats to integer pixels.
struct Raster {
    /// One coverage byte per pixel, or three (red, green, blue) for [`TextQuality::Lcd`]
    bitmap: Vec<u8>,
    bitmap_width: usize,
    bitmap_height: usize,

    /// Offset of the bitmap's top edge below the baseline's line top
    top: Pixel,
    left: Pixel,
}
impl Raster {
    fn rasterize(font: &Font, font_size: f32, ascent: Pixel, character: char, subpixel: bool) -> Self {
        let (metrics, bitmap) = match subpixel {
            true => font.rasterize_subpixel(character, font_size),
            false => font.rasterize(character, font_size),
        };

        let bottom = ascent - metrics.ymin;
        Self {
            bitmap,
            bitmap_width: metrics.width,
            bitmap_height: metrics.height,

            top: bottom - metrics.height as Pixel,
            left: metrics.xmin,
        }
    }

    /// Writes this glyph into `texture` with its pen position at (`x`, `line_top`)
    fn draw_into(&self, texture: &mut Texture, x: Pixel, line_top: Pixel, style: &TextStyle) {
        let size = texture.size();
        let channels = match style.quality {
            TextQuality::Lcd => 3,
            _ => 1,
        };

        for row in 0..self.bitmap_height {
            for col in 0..self.bitmap_width {
                let tx = x + self.left + col as Pixel;
                let ty = line_top + self.top + row as Pixel;
                if tx < 0 || ty < 0 || tx >= size.width || ty >= size.height {
                    continue;
                }

                let offset = (row * self.bitmap_width + col) * channels;
                let coverage = &self.bitmap[offset..offset + channels];
                let index = ty as usize * size.width as usize + tx as usize;
                let pixel = &mut texture.pixels_mut()[index];
                *pixel = shade(*pixel, coverage, style);
            }
        }
    }
}

/// Combines glyph coverage with what is already in the text texture
fn shade(existing: u32, coverage: &[u8], style: &TextStyle) -> u32 {
    let foreground = style.foreground;
    match style.quality {
        TextQuality::Solid => match coverage[0] >= 128 {
            true => pack(Color::new(foreground.red, foreground.green, foreground.blue, 255)),
            false => existing,
        },
        TextQuality::Blended => {
            let alpha = (coverage[0] as u32 * foreground.alpha as u32 / 255) as u8;
            // Overlapping glyphs keep the strongest coverage
            match alpha > (existing >> 24) as u8 {
                true => pack(Color::new(foreground.red, foreground.green, foreground.blue, alpha)),
                false => existing,
            }
        }
        TextQuality::Shaded => {
            let under = crate::graphics::unpack(existing);
            let mut over = foreground;
            over.alpha = 255;
            pack(mix(under, over, coverage[0]))
        }
        TextQuality::Lcd => {
            let under = crate::graphics::unpack(existing);
            pack(Color::new(
                mix(under, foreground, coverage[0]).red,
                mix(under, foreground, coverage[1]).green,
                mix(under, foreground, coverage[2]).blue,
                255,
            ))
        }
    }
}

/// Lays `text` out with `typeface` at `font_size` pixels and rasterizes it into a texture
/// just large enough to hold every line.
///
/// Empty text produces a texture of zero width.
pub fn rasterize_text(
    typeface: &Typeface,
    font_size: Pixel,
    text: &str,
    max_size: SizeConstraint,
    style: &TextStyle,
) -> Texture {
    let font = typeface.font();
    let px = font_size as f32;

    let (ascent, line_height) = match typeface.line_metrics(px) {
        Some(metrics) => (
            metrics.ascent.round() as Pixel,
            metrics.new_line_size.ceil() as Pixel,
        ),
        None => (font_size, font_size),
    };

    // We only rasterize the first `char` of a cluster for now
    let first_char = |grapheme: &str| grapheme.chars().next().unwrap_or(' ');
    let advance =
        |grapheme: &str| font.metrics(first_char(grapheme), px).advance_width.round() as Pixel;

    let lines = wrap_lines(text, max_size, &advance);
    let width = lines
        .iter()
        .map(|line| line.iter().map(|&grapheme| advance(grapheme)).sum::<Pixel>())
        .max()
        .unwrap_or(0);
    let height = match width {
        0 => 0,
        _ => line_height * lines.len() as Pixel,
    };

    let fill = match style.quality.has_background() {
        true => style.background,
        false => Color::new(0, 0, 0, 0),
    };
    let mut texture = Texture::filled(Size::new(width, height), fill);
    let subpixel = style.quality == TextQuality::Lcd;

    for (row, line) in lines.iter().enumerate() {
        let line_top = row as Pixel * line_height;
        let mut cursor = 0;
        for &grapheme in line {
            let character = first_char(grapheme);
            if !character.is_whitespace() {
                Raster::rasterize(font, px, ascent, character, subpixel)
                    .draw_into(&mut texture, cursor, line_top, style);
            }
            cursor += advance(grapheme);
        }
    }

    texture
}
