use winit::event::WindowEvent;

use super::{render_layers, Layer, Widget};
use crate::event::EventListener;
use crate::layout::Rect;
use crate::render::RenderTarget;

/// A rectangular area whose layers are clipped to it, with its own event callbacks.
///
/// Layers that reach past the area are cut at its edges and their source rectangles are
/// scaled to match, see [`crate::render::clip::clip_layer`].
#[derive(Default)]
pub struct Button {
    area: Rect,
    layers: Vec<Layer>,
    listener: EventListener,
}
impl Button {
    pub fn new(area: Rect) -> Self {
        Self {
            area,
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

    pub fn listener(&self) -> &EventListener {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut EventListener {
        &mut self.listener
    }

    pub fn set_listener(&mut self, listener: EventListener) {
        self.listener = listener;
    }

    pub fn handle_event(&mut self, event: &WindowEvent) {
        self.listener.handle_event(event);
    }
}
impl Widget for Button {
    fn render<T: RenderTarget>(&self, target: &mut T) {
        render_layers(target, &self.layers, self.area);
    }
}
