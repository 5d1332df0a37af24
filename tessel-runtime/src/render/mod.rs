/// Fitting texture layers inside a widget's bounds
pub mod clip;

/// Everything involving text rasterization lives here.
pub mod text;

/// Named texture storage and the text settings used to create text textures
pub mod textures;

use std::fmt::Display;

use palette::Srgb;

use crate::graphics::{blend_over, to_frame, Texture};
use crate::layout::{Position, Rect, Size, SizeConstraint};
use textures::TextureManager;

/// Integer pixels; signed so destination rectangles can hang off the top-left of the window
pub type Pixel = i32;

#[derive(Debug)]
pub enum RenderError {
    /// No texture is registered under this name
    UnknownTexture(String),

    /// Text was requested before any font was opened
    NoFont,

    InvalidFontSize(Pixel),

    /// A pixel buffer doesn't match the dimensions it was paired with
    PixelCount { expected: usize, actual: usize },
}
impl Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownTexture(name) => write!(f, "unknown texture '{name}'"),
            Self::NoFont => write!(f, "no font is open"),
            Self::InvalidFontSize(size) => write!(f, "invalid font size {size}"),
            Self::PixelCount { expected, actual } => {
                write!(f, "expected {expected} pixels, got {actual}")
            }
        }
    }
}
impl std::error::Error for RenderError {}

/// Submits a region of a named texture to a region of the screen
pub trait Renderer {
    fn render(&mut self, texture: &str, src: Rect, dest: Rect) -> Result<(), RenderError>;
}

/// Native size of a named texture
pub trait TextureQuery {
    fn texture_size(&self, texture: &str) -> Result<Size, RenderError>;
}

/// Current drawable area of the window
pub trait WindowSize {
    fn window_size(&self) -> Size;
}

/// Mirroring applied to the source before it is placed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Flip {
    #[default]
    None,
    Horizontal,
    Vertical,
    Both,
}
impl Flip {
    fn mirrors_x(self) -> bool {
        matches!(self, Self::Horizontal | Self::Both)
    }

    fn mirrors_y(self) -> bool {
        matches!(self, Self::Vertical | Self::Both)
    }
}

/// Rotation and mirroring for [`RenderContext::render_ex`]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Transform {
    /// Clockwise, in degrees
    pub angle: f64,

    /// Pivot relative to the destination's top left corner; `None` pivots around its middle
    pub center: Option<Position>,

    pub flip: Flip,
}
impl Transform {
    pub fn rotated(angle: f64) -> Self {
        Self {
            angle,
            ..Self::default()
        }
    }

    pub fn flipped(flip: Flip) -> Self {
        Self {
            flip,
            ..Self::default()
        }
    }

    fn is_rotated(&self) -> bool {
        self.angle.rem_euclid(360.0) != 0.0
    }
}

/// Everything a widget needs to paint itself
pub trait RenderTarget: Renderer + TextureQuery + WindowSize {}
impl<T: Renderer + TextureQuery + WindowSize> RenderTarget for T {}

/// Simple structure that encapsulates the frame buffer and relevant metadata.
/// Render methods are implemented to take this structure, to keep them separate from the event loop.
///
/// Pixels are `0x00RRGGBB`, the layout `softbuffer` presents.
pub struct DrawHandle<'a> {
    pub buffer: &'a mut [u32],
    pub width: usize,
    pub height: usize,
}
impl<'a> DrawHandle<'a> {
    pub fn new(buffer: &'a mut [u32], width: usize, height: usize) -> Self {
        debug_assert!(buffer.len() >= width * height);
        Self {
            buffer,
            width,
            height,
        }
    }

    #[inline]
    fn index(&self, position: Position) -> Option<usize> {
        if position.x < 0
            || position.y < 0
            || position.x as usize >= self.width
            || position.y as usize >= self.height
        {
            return None;
        }
        Some(position.y as usize * self.width + position.x as usize)
    }

    /// Composites a texture pixel; positions outside the frame are discarded
    fn blend(&mut self, position: Position, value: u32) {
        if let Some(index) = self.index(position) {
            self.buffer[index] = blend_over(self.buffer[index], value);
        }
    }

    pub fn get(&self, position: Position) -> Option<u32> {
        self.index(position).map(|index| self.buffer[index])
    }

    pub fn fill(&mut self, color: Srgb<u8>) {
        let value = to_frame(color);
        let len = self.width * self.height;
        self.buffer[..len].iter_mut().for_each(|pixel| *pixel = value);
    }

    pub fn size(&self) -> Size {
        Size::new(self.width as Pixel, self.height as Pixel)
    }
}

/// One frame's worth of drawing: the textures to read from and the buffer to write to.
pub struct RenderContext<'t, 'b> {
    textures: &'t TextureManager,
    handle: DrawHandle<'b>,
}
impl<'t, 'b> RenderContext<'t, 'b> {
    pub fn new(textures: &'t TextureManager, handle: DrawHandle<'b>) -> Self {
        Self { textures, handle }
    }

    pub fn textures(&self) -> &TextureManager {
        self.textures
    }

    pub fn handle(&self) -> &DrawHandle<'b> {
        &self.handle
    }

    pub fn clear(&mut self, color: Srgb<u8>) {
        self.handle.fill(color);
    }

    /// Like [`Renderer::render`], but a missing source covers the whole texture
    /// and a missing destination covers the whole frame.
    pub fn render_full(
        &mut self,
        texture: &str,
        src: Option<Rect>,
        dest: Option<Rect>,
    ) -> Result<(), RenderError> {
        let src = match src {
            Some(src) => src,
            None => Rect::from_size(self.texture_size(texture)?),
        };
        let dest = dest.unwrap_or_else(|| Rect::from_size(self.window_size()));
        self.render(texture, src, dest)
    }

    /// Draws the whole texture at its native size
    pub fn render_at(&mut self, texture: &str, position: Position) -> Result<(), RenderError> {
        let size = self.texture_size(texture)?;
        let dest = Rect::new(position.x, position.y, size.width, size.height);
        self.render(texture, Rect::from_size(size), dest)
    }

    /// Rasterizes `text` with the manager's current font and style and draws it immediately,
    /// without keeping the texture around
    pub fn render_text(
        &mut self,
        text: &str,
        position: Position,
        max_size: SizeConstraint,
    ) -> Result<(), RenderError> {
        self.render_text_ex(text, position, max_size, Transform::default())
    }

    /// [`RenderContext::render_text`] with rotation and mirroring
    pub fn render_text_ex(
        &mut self,
        text: &str,
        position: Position,
        max_size: SizeConstraint,
        transform: Transform,
    ) -> Result<(), RenderError> {
        let texture = self.textures.rasterize(text, max_size)?;
        let size = texture.size();
        blit(
            &mut self.handle,
            &texture,
            Rect::from_size(size),
            Rect::new(position.x, position.y, size.width, size.height),
            &transform,
        );
        Ok(())
    }

    /// Like [`Renderer::render`], with the source mirrored by `transform.flip` and the
    /// destination rotated by `transform.angle` around `transform.center`
    pub fn render_ex(
        &mut self,
        texture: &str,
        src: Rect,
        dest: Rect,
        transform: Transform,
    ) -> Result<(), RenderError> {
        let texture = self
            .textures
            .get(texture)
            .ok_or_else(|| RenderError::UnknownTexture(texture.to_owned()))?;
        blit(&mut self.handle, texture, src, dest, &transform);
        Ok(())
    }
}
impl Renderer for RenderContext<'_, '_> {
    fn render(&mut self, texture: &str, src: Rect, dest: Rect) -> Result<(), RenderError> {
        self.render_ex(texture, src, dest, Transform::default())
    }
}
impl TextureQuery for RenderContext<'_, '_> {
    fn texture_size(&self, texture: &str) -> Result<Size, RenderError> {
        self.textures
            .get(texture)
            .map(|texture| texture.size())
            .ok_or_else(|| RenderError::UnknownTexture(texture.to_owned()))
    }
}
impl WindowSize for RenderContext<'_, '_> {
    fn window_size(&self) -> Size {
        self.handle.size()
    }
}

/// Nearest-neighbour stretch of `src` onto `dest`.
///
/// `src` is first cut down to the texture's bounds; what remains is stretched over the
/// whole of `dest`, mirrored and rotated as `transform` says. Destination pixels outside the
/// frame are skipped.
fn blit(
    handle: &mut DrawHandle,
    texture: &Texture,
    src: Rect,
    dest: Rect,
    transform: &Transform,
) {
    let Some(src) = texture.bounds().intersection(&src) else {
        return;
    };
    if dest.is_empty() {
        return;
    }

    let (width, height) = (dest.width as i64, dest.height as i64);
    // Texture pixel under the destination-local pixel (dx, dy)
    let sample = |dx: i64, dy: i64| {
        let dx = if transform.flip.mirrors_x() { width - 1 - dx } else { dx };
        let dy = if transform.flip.mirrors_y() { height - 1 - dy } else { dy };
        let sx = src.x as i64 + dx * src.width as i64 / width;
        let sy = src.y as i64 + dy * src.height as i64 / height;
        texture.pixel(sx as Pixel, sy as Pixel)
    };

    if !transform.is_rotated() {
        // Only walk the part of `dest` that lands inside the frame
        let Some(visible) = Rect::from_size(handle.size()).intersection(&dest) else {
            return;
        };
        for y in visible.y..visible.bottom() {
            for x in visible.x..visible.right() {
                if let Some(value) = sample(x as i64 - dest.x as i64, y as i64 - dest.y as i64) {
                    handle.blend(Position { x, y }, value);
                }
            }
        }
        return;
    }

    let (cx, cy) = match transform.center {
        Some(center) => (
            dest.x as f64 + center.x as f64,
            dest.y as f64 + center.y as f64,
        ),
        None => (
            dest.x as f64 + width as f64 / 2.0,
            dest.y as f64 + height as f64 / 2.0,
        ),
    };
    let (sin, cos) = transform.angle.to_radians().sin_cos();

    // Screen-space box around the rotated corners
    let corners = [
        (dest.x as f64, dest.y as f64),
        (dest.x as f64 + width as f64, dest.y as f64),
        (dest.x as f64, dest.y as f64 + height as f64),
        (dest.x as f64 + width as f64, dest.y as f64 + height as f64),
    ]
    .map(|(x, y)| {
        let (x, y) = (x - cx, y - cy);
        (cx + x * cos - y * sin, cy + x * sin + y * cos)
    });
    let (mut left, mut top, mut right, mut bottom) = (f64::MAX, f64::MAX, f64::MIN, f64::MIN);
    for (x, y) in corners {
        left = left.min(x);
        top = top.min(y);
        right = right.max(x);
        bottom = bottom.max(y);
    }
    let frame = handle.size();
    let (left, top) = (left.floor().max(0.0) as i64, top.floor().max(0.0) as i64);
    let right = (right.ceil() as i64).min(frame.width as i64);
    let bottom = (bottom.ceil() as i64).min(frame.height as i64);

    for y in top..bottom {
        for x in left..right {
            // Undo the rotation at the pixel centre
            let (px, py) = (x as f64 + 0.5 - cx, y as f64 + 0.5 - cy);
            let u = cx + px * cos + py * sin - dest.x as f64;
            let v = cy - px * sin + py * cos - dest.y as f64;
            if u < 0.0 || v < 0.0 || u >= width as f64 || v >= height as f64 {
                continue;
            }
            if let Some(value) = sample(u as i64, v as i64) {
                handle.blend(
                    Position {
                        x: x as Pixel,
                        y: y as Pixel,
                    },
                    value,
                );
            }
        }
    }
}
