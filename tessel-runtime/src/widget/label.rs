use super::{Layer, Widget};
use crate::layout::Rect;
use crate::render::RenderTarget;

/// Static layers drawn exactly where they say, without clipping.
///
/// The area is kept for layout code; rendering ignores it.
#[derive(Default)]
pub struct Label {
    area: Rect,
    layers: Vec<Layer>,
}
impl Label {
    pub fn new(layers: Vec<Layer>) -> Self {
        Self {
            layers,
            ..Self::default()
        }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn set_area(&mut self, area: Rect) {
        self.area = area;
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn set_layers(&mut self, layers: Vec<Layer>) {
        self.layers = layers;
    }

    /// Lets `f` add, remove or modify layers in place
    pub fn update(&mut self, f: impl FnOnce(&mut Vec<Layer>)) {
        f(&mut self.layers);
    }
}
impl Widget for Label {
    fn render<T: RenderTarget>(&self, target: &mut T) {
        for layer in &self.layers {
            let src = match layer.source {
                Some(src) => src,
                None => match target.texture_size(&layer.texture) {
                    Ok(size) => Rect::from_size(size),
                    Err(err) => {
                        log::warn!("skipping label layer: {err}");
                        continue;
                    }
                },
            };
            let dest = layer
                .destination
                .unwrap_or_else(|| Rect::from_size(target.window_size()));

            if let Err(err) = target.render(&layer.texture, src, dest) {
                log::warn!("failed to render label layer '{}': {err}", layer.texture);
            }
        }
    }
}
