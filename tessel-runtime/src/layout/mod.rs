use crate::render::Pixel;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Size {
    pub width: Pixel,
    pub height: Pixel,
}
impl Size {
    pub const fn new(width: Pixel, height: Pixel) -> Self {
        Self { width, height }
    }

    /// `true` if either side is zero or negative; nothing can be drawn from or into it
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

/// Position from the top left of the screen
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Position {
    pub x: Pixel,
    pub y: Pixel,
}

/// Axis-aligned box, either in texture space (a source rectangle)
/// or in screen space (a destination rectangle).
///
/// The right and bottom edges are exclusive: `x + width` is the first column outside the box.
/// Edges saturate at the ends of the `i32` range instead of wrapping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: Pixel,
    pub y: Pixel,
    pub width: Pixel,
    pub height: Pixel,
}
impl Rect {
    pub const fn new(x: Pixel, y: Pixel, width: Pixel, height: Pixel) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A rectangle anchored at the origin covering `size`
    pub const fn from_size(size: Size) -> Self {
        Self::new(0, 0, size.width, size.height)
    }

    #[inline]
    pub fn right(&self) -> Pixel {
        self.x.saturating_add(self.width)
    }

    #[inline]
    pub fn bottom(&self) -> Pixel {
        self.y.saturating_add(self.height)
    }

    pub fn position(&self) -> Position {
        Position {
            x: self.x,
            y: self.y,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.size().is_degenerate()
    }

    /// `true` if `inner` lies entirely within this rectangle; shared edges count as inside.
    pub fn contains_rect(&self, inner: &Rect) -> bool {
        inner.x >= self.x
            && inner.y >= self.y
            && inner.right() <= self.right()
            && inner.bottom() <= self.bottom()
    }

    pub fn contains_point(&self, point: Position) -> bool {
        point.x >= self.x && point.y >= self.y && point.x < self.right() && point.y < self.bottom()
    }

    /// `true` if `other` is strictly beyond one of this rectangle's edges.
    ///
    /// Touching edges do **not** count as disjoint; a rectangle ending exactly
    /// where this one starts is treated as straddling the boundary.
    pub fn is_disjoint(&self, other: &Rect) -> bool {
        other.right() < self.x
            || other.bottom() < self.y
            || other.x > self.right()
            || other.y > self.bottom()
    }

    /// The overlapping area of both rectangles, `None` if they share no pixel.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let x = Pixel::max(self.x, other.x);
        let y = Pixel::max(self.y, other.y);
        let right = Pixel::min(self.right(), other.right());
        let bottom = Pixel::min(self.bottom(), other.bottom());

        let result = Rect::new(x, y, right.saturating_sub(x), bottom.saturating_sub(y));
        (!result.is_empty()).then_some(result)
    }
}

#[derive(Clone, Copy)]
pub struct SizeConstraint {
    pub width: Option<Pixel>,
    pub height: Option<Pixel>,
}
impl SizeConstraint {
    pub fn auto() -> Self {
        Self {
            height: None,
            width: None,
        }
    }
    pub fn intrinsic_width(width: Pixel) -> Self {
        Self {
            width: Some(width),
            height: None,
        }
    }

    pub fn fits_width(&self, width: Pixel) -> bool {
        self.width.map(|cw| width <= cw).unwrap_or(true)
    }
}
