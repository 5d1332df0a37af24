use super::{pack, Color};
use crate::layout::{Rect, Size};
use crate::render::{Pixel, RenderError};

/// A decoded image held in memory, ready to be blitted.
///
/// Pixels are `0xAARRGGBB`, row-major, with straight alpha.
/// Zero-sized textures are allowed; the layer clipper skips them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Texture {
    width: Pixel,
    height: Pixel,
    pixels: Vec<u32>,
}
impl Texture {
    pub fn new(width: Pixel, height: Pixel, pixels: Vec<u32>) -> Result<Self, RenderError> {
        let (width, height) = (width.max(0), height.max(0));
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(RenderError::PixelCount {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// A texture of a single colour
    pub fn filled(size: Size, color: Color) -> Self {
        let (width, height) = (size.width.max(0), size.height.max(0));
        Self {
            width,
            height,
            pixels: vec![pack(color); width as usize * height as usize],
        }
    }

    /// Builds a texture by evaluating `f(x, y)` for every pixel
    pub fn from_fn(size: Size, mut f: impl FnMut(Pixel, Pixel) -> Color) -> Self {
        let (width, height) = (size.width.max(0), size.height.max(0));
        let pixels = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| pack(f(x, y)))
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.size())
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.pixels
    }

    /// `None` outside the texture
    pub fn pixel(&self, x: Pixel, y: Pixel) -> Option<u32> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }
}
