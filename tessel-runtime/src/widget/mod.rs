mod button;
mod label;

pub use button::Button;
pub use label::Label;

use crate::layout::Rect;
use crate::render::clip::clip_layer;
use crate::render::RenderTarget;

/// One texture in a widget's paint sequence.
///
/// A missing `source` covers the whole texture; a missing `destination` covers the whole window.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layer {
    pub texture: String,
    pub source: Option<Rect>,
    pub destination: Option<Rect>,
}
impl Layer {
    pub fn new(texture: impl Into<String>) -> Self {
        Self {
            texture: texture.into(),
            source: None,
            destination: None,
        }
    }

    pub fn with_source(mut self, source: Rect) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_destination(mut self, destination: Rect) -> Self {
        self.destination = Some(destination);
        self
    }
}

pub trait Widget {
    fn render<T: RenderTarget>(&self, target: &mut T);
}

/// The widgets this crate knows how to draw
pub enum AnyWidget {
    Label(Label),
    Button(Button),
}
impl Widget for AnyWidget {
    fn render<T: RenderTarget>(&self, target: &mut T) {
        match self {
            Self::Label(label) => label.render(target),
            Self::Button(button) => button.render(target),
        }
    }
}
impl From<Label> for AnyWidget {
    fn from(value: Label) -> Self {
        Self::Label(value)
    }
}
impl From<Button> for AnyWidget {
    fn from(value: Button) -> Self {
        Self::Button(value)
    }
}

/// Paints `layers` in order, each clipped to `bounds`.
///
/// Layers with nothing to show are skipped. A layer the target fails to draw is logged and
/// skipped too; one bad texture never blanks the rest of the widget.
pub fn render_layers<T: RenderTarget>(target: &mut T, layers: &[Layer], bounds: Rect) {
    for layer in layers {
        let clipped = clip_layer(
            layer,
            bounds,
            |texture| match target.texture_size(texture) {
                Ok(size) => Some(size),
                Err(err) => {
                    log::warn!("skipping layer: failed to query texture: {err}");
                    None
                }
            },
            || target.window_size(),
        );

        let Some((src, dest)) = clipped else {
            continue;
        };
        if let Err(err) = target.render(&layer.texture, src, dest) {
            log::warn!("failed to render layer '{}': {err}", layer.texture);
        }
    }
}
