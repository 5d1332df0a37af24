use super::Pixel;
use crate::layout::{Rect, Size};
use crate::widget::Layer;

/// Where a destination rectangle sits relative to a widget's bounds
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Containment {
    /// Every pixel is inside; shared edges count as inside
    Inside,

    /// Strictly past one of the edges; touching an edge is not enough
    Outside,

    /// Partly inside, needs clipping
    Straddling,
}
impl Containment {
    pub fn classify(dest: &Rect, bounds: &Rect) -> Self {
        if bounds.contains_rect(dest) {
            Self::Inside
        } else if bounds.is_disjoint(dest) {
            Self::Outside
        } else {
            Self::Straddling
        }
    }
}

/// Computes the `(source, destination)` pair to draw one layer inside `bounds`.
///
/// A missing source rectangle covers the whole texture, as reported by `texture_size`;
/// a missing destination covers the whole window, as reported by `window_size`.
/// Each resolver is only called when its rectangle is missing.
///
/// Destinations inside `bounds` are returned as they are. Destinations that straddle an edge are
/// cut down to `bounds`, and the source is cut by the same proportion so the visible part of the
/// texture keeps its scale. Returns `None` when there is nothing to draw: a zero-sized texture,
/// window or rectangle, a destination outside `bounds`, or a texture whose size can't be queried.
pub fn clip_layer(
    layer: &Layer,
    bounds: Rect,
    texture_size: impl FnOnce(&str) -> Option<Size>,
    window_size: impl FnOnce() -> Size,
) -> Option<(Rect, Rect)> {
    let src = match layer.source {
        Some(src) => src,
        None => Rect::from_size(texture_size(&layer.texture)?),
    };
    let dest = layer
        .destination
        .unwrap_or_else(|| Rect::from_size(window_size()));

    // Also keeps the scale factors below away from a division by zero
    if src.is_empty() || dest.is_empty() {
        return None;
    }

    match Containment::classify(&dest, &bounds) {
        Containment::Inside => Some((src, dest)),
        Containment::Outside => None,
        Containment::Straddling => {
            let (src, dest) = clip_straddling(src, dest, bounds);
            (!src.is_empty() && !dest.is_empty()).then_some((src, dest))
        }
    }
}

/// Source pixels per destination pixel, from the sizes before any clipping
fn scale(src: Pixel, dest: Pixel) -> f32 {
    src as f32 / dest as f32
}

/// Moving the left or top edge only shifts the origins; widths and heights shrink
/// exclusively through the right and bottom edges, which are checked against the
/// already-shifted destination.
///
/// Deltas are truncated toward zero, so a large scale ratio can leave a one pixel seam.
/// Edge distances are taken in `i64` so rectangles near the ends of the `i32` range can't overflow.
fn clip_straddling(src: Rect, dest: Rect, bounds: Rect) -> (Rect, Rect) {
    let x_scale = scale(src.width, dest.width);
    let y_scale = scale(src.height, dest.height);

    let mut clipped_src = src;
    let mut clipped_dest = dest;

    // left
    if clipped_dest.x < bounds.x {
        let delta = (distance(clipped_dest.x, bounds.x) as f32 * x_scale) as Pixel;
        clipped_src.x = clipped_src.x.saturating_add(delta);
        clipped_dest.x = bounds.x;
    }
    // top
    if clipped_dest.y < bounds.y {
        let delta = (distance(clipped_dest.y, bounds.y) as f32 * y_scale) as Pixel;
        clipped_src.y = clipped_src.y.saturating_add(delta);
        clipped_dest.y = bounds.y;
    }
    // right
    if clipped_dest.right() > bounds.right() {
        let delta = (distance(bounds.right(), clipped_dest.right()) as f32 * x_scale) as Pixel;
        clipped_src.width = clipped_src.width.saturating_sub(delta);
        clipped_dest.width = bounds.right().saturating_sub(clipped_dest.x);
    }
    // bottom
    if clipped_dest.bottom() > bounds.bottom() {
        let delta = (distance(bounds.bottom(), clipped_dest.bottom()) as f32 * y_scale) as Pixel;
        clipped_src.height = clipped_src.height.saturating_sub(delta);
        clipped_dest.height = bounds.bottom().saturating_sub(clipped_dest.y);
    }

    (clipped_src, clipped_dest)
}

#[inline]
fn distance(from: Pixel, to: Pixel) -> i64 {
    to as i64 - from as i64
}
