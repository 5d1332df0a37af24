use std::collections::HashMap;

use tessel::graphics::{Color, Texture};
use tessel::layout::{Rect, Size};
use tessel::render::textures::TextureManager;
use tessel::render::{DrawHandle, RenderContext, RenderError, Renderer, TextureQuery, WindowSize};
use tessel::widget::{render_layers, AnyWidget, Button, Label, Layer, Widget};

/// Records every submission instead of drawing it
#[derive(Default)]
struct Recorder {
    sizes: HashMap<String, Size>,
    window: Size,
    /// Textures whose render calls fail
    broken: Vec<String>,
    submitted: Vec<(String, Rect, Rect)>,
}
impl Recorder {
    fn new(window: Size) -> Self {
        Self {
            window,
            ..Self::default()
        }
    }

    fn with_texture(mut self, name: &str, size: Size) -> Self {
        self.sizes.insert(name.to_owned(), size);
        self
    }

    fn names(&self) -> Vec<&str> {
        self.submitted.iter().map(|(name, _, _)| name.as_str()).collect()
    }
}
impl Renderer for Recorder {
    fn render(&mut self, texture: &str, src: Rect, dest: Rect) -> Result<(), RenderError> {
        if self.broken.iter().any(|name| name == texture) {
            return Err(RenderError::UnknownTexture(texture.to_owned()));
        }
        self.submitted.push((texture.to_owned(), src, dest));
        Ok(())
    }
}
impl TextureQuery for Recorder {
    fn texture_size(&self, texture: &str) -> Result<Size, RenderError> {
        self.sizes
            .get(texture)
            .copied()
            .ok_or_else(|| RenderError::UnknownTexture(texture.to_owned()))
    }
}
impl WindowSize for Recorder {
    fn window_size(&self) -> Size {
        self.window
    }
}

const BOUNDS: Rect = Rect::new(0, 0, 100, 100);

#[test]
fn layers_paint_in_order_and_skip_invisible_ones() {
    let mut target = Recorder::new(Size::new(640, 480));
    let layers = vec![
        Layer::new("back")
            .with_source(Rect::new(0, 0, 100, 100))
            .with_destination(Rect::new(50, 50, 100, 100)),
        Layer::new("gone")
            .with_source(Rect::new(0, 0, 10, 10))
            .with_destination(Rect::new(200, 200, 10, 10)),
        Layer::new("front")
            .with_source(Rect::new(0, 0, 40, 40))
            .with_destination(Rect::new(10, 10, 20, 20)),
    ];

    render_layers(&mut target, &layers, BOUNDS);

    assert_eq!(
        target.submitted,
        vec![
            (
                "back".to_owned(),
                Rect::new(0, 0, 50, 50),
                Rect::new(50, 50, 50, 50)
            ),
            (
                "front".to_owned(),
                Rect::new(0, 0, 40, 40),
                Rect::new(10, 10, 20, 20)
            ),
        ]
    );
}

#[test]
fn missing_rectangles_default_to_texture_and_window() {
    let mut target =
        Recorder::new(Size::new(320, 240)).with_texture("background", Size::new(64, 64));
    let layers = vec![Layer::new("background")];

    render_layers(&mut target, &layers, Rect::new(0, 0, 320, 240));

    assert_eq!(
        target.submitted,
        vec![(
            "background".to_owned(),
            Rect::new(0, 0, 64, 64),
            Rect::new(0, 0, 320, 240)
        )]
    );
}

#[test]
fn failures_do_not_stop_the_pass() {
    let mut target = Recorder::new(Size::new(100, 100))
        .with_texture("a", Size::new(8, 8))
        .with_texture("b", Size::new(8, 8))
        .with_texture("empty", Size::new(0, 0));
    target.broken.push("b".to_owned());
    let layers = vec![
        Layer::new("unknown"),
        Layer::new("b"),
        Layer::new("empty"),
        Layer::new("a"),
    ];

    render_layers(&mut target, &layers, BOUNDS);

    assert_eq!(target.names(), vec!["a"]);
}

#[test]
fn zero_sized_window_skips_window_sized_layers() {
    let mut target = Recorder::new(Size::new(0, 0)).with_texture("a", Size::new(8, 8));
    let layers = vec![
        Layer::new("a"),
        Layer::new("a").with_destination(Rect::new(0, 0, 8, 8)),
    ];

    render_layers(&mut target, &layers, BOUNDS);

    assert_eq!(target.submitted.len(), 1);
    assert_eq!(target.submitted[0].2, Rect::new(0, 0, 8, 8));
}

#[test]
fn button_clips_to_its_area() {
    let mut target = Recorder::new(Size::new(640, 480)).with_texture("wide", Size::new(200, 50));
    let mut button = Button::new(Rect::new(100, 100, 100, 50));
    button.set_layers(vec![
        Layer::new("wide").with_destination(Rect::new(100, 100, 200, 50))
    ]);

    button.render(&mut target);

    assert_eq!(
        target.submitted,
        vec![(
            "wide".to_owned(),
            Rect::new(0, 0, 100, 50),
            Rect::new(100, 100, 100, 50)
        )]
    );
}

#[test]
fn button_update_and_set_layers() {
    let mut button = Button::new(BOUNDS);
    button.set_layers(vec![Layer::new("a"), Layer::new("b")]);
    button.update(|layers| {
        layers.remove(0);
        layers.push(Layer::new("c"));
        layers[0].destination = Some(Rect::new(1, 2, 3, 4));
    });

    let names: Vec<_> = button.layers().iter().map(|l| l.texture.as_str()).collect();
    assert_eq!(names, vec!["b", "c"]);
    assert_eq!(button.layers()[0].destination, Some(Rect::new(1, 2, 3, 4)));

    button.set_area(Rect::new(5, 5, 5, 5));
    assert_eq!(button.area(), Rect::new(5, 5, 5, 5));

    button.set_layers(Vec::new());
    assert!(button.layers().is_empty());
}

#[test]
fn label_draws_without_clipping() {
    let mut target = Recorder::new(Size::new(640, 480)).with_texture("text", Size::new(30, 10));
    let mut label = Label::default();
    label.set_layers(vec![
        Layer::new("text").with_destination(Rect::new(-10, -10, 30, 10)),
        Layer::new("text"),
        Layer::new("missing"),
    ]);

    label.render(&mut target);

    assert_eq!(
        target.submitted,
        vec![
            (
                "text".to_owned(),
                Rect::new(0, 0, 30, 10),
                Rect::new(-10, -10, 30, 10)
            ),
            (
                "text".to_owned(),
                Rect::new(0, 0, 30, 10),
                Rect::new(0, 0, 640, 480)
            ),
        ]
    );
}

#[test]
fn label_area_does_not_clip() {
    let mut target = Recorder::new(Size::new(640, 480)).with_texture("text", Size::new(30, 10));
    let mut label = Label::new(vec![
        Layer::new("text").with_destination(Rect::new(0, 0, 30, 10))
    ]);
    assert_eq!(label.area(), Rect::default());
    label.set_area(Rect::new(5, 5, 10, 5));
    assert_eq!(label.area(), Rect::new(5, 5, 10, 5));

    label.render(&mut target);

    assert_eq!(
        target.submitted,
        vec![(
            "text".to_owned(),
            Rect::new(0, 0, 30, 10),
            Rect::new(0, 0, 30, 10)
        )]
    );
}

#[test]
fn any_widget_dispatches_to_the_variant() {
    let mut target = Recorder::new(Size::new(640, 480)).with_texture("t", Size::new(10, 10));
    let mut button = Button::new(Rect::new(0, 0, 5, 5));
    button.set_layers(vec![Layer::new("t").with_destination(Rect::new(0, 0, 10, 10))]);
    let label = Label::new(vec![Layer::new("t").with_destination(Rect::new(0, 0, 10, 10))]);

    let widgets: Vec<AnyWidget> = vec![button.into(), label.into()];
    widgets.iter().for_each(|widget| widget.render(&mut target));

    let dests: Vec<_> = target.submitted.iter().map(|(_, _, dest)| *dest).collect();
    assert_eq!(dests, vec![Rect::new(0, 0, 5, 5), Rect::new(0, 0, 10, 10)]);
}

#[test]
fn button_paints_clipped_pixels_into_the_frame() {
    let red = Color::new(255, 0, 0, 255);
    let mut textures = TextureManager::new();
    textures.insert("red", Texture::filled(Size::new(4, 4), red));

    let mut button = Button::new(Rect::new(2, 2, 4, 4));
    button.set_layers(vec![
        Layer::new("red").with_destination(Rect::new(0, 0, 8, 8))
    ]);

    let mut buffer = vec![0; 8 * 8];
    let mut target = RenderContext::new(&textures, DrawHandle::new(&mut buffer, 8, 8));
    button.render(&mut target);

    for y in 0..8 {
        for x in 0..8 {
            let inside = (2..6).contains(&x) && (2..6).contains(&y);
            let expected = if inside { 0x00ff_0000 } else { 0 };
            assert_eq!(buffer[y * 8 + x], expected, "pixel ({x}, {y})");
        }
    }
}
