use tessel::config::{GameConfig, CONFIG_PATH};
use tessel::context::Context;
use tessel::event::EventCategory;
use tessel::game::Game;
use tessel::graphics::{Color, Texture};
use tessel::layout::{Position, Rect, Size, SizeConstraint};
use tessel::render::{RenderContext, Transform};
use tessel::state::{GameState, Transition};
use tessel::widget::{AnyWidget, Button, Label, Layer, Widget};

use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{Key, NamedKey};

/// Horizontal speed of the scrolling stripes, in pixels per second
const STRIPE_SPEED: f32 = 120.0;

const BUTTON_AREA: Rect = Rect::new(220, 120, 200, 120);

/// A button with a layer sliding through it, to show off the clipping
struct Showcase {
    widgets: Vec<AnyWidget>,
    stripe_x: f32,
}
impl Showcase {
    fn new(ctx: &mut Context) -> Self {
        let textures = &mut ctx.textures;
        textures.insert(
            "backdrop",
            Texture::from_fn(Size::new(64, 64), |x, y| {
                Color::new((x * 4) as u8, (y * 4) as u8, 160, 255)
            }),
        );
        textures.insert(
            "stripes",
            Texture::from_fn(Size::new(32, 32), |x, _| match (x / 4) % 2 {
                0 => Color::new(255, 255, 255, 200),
                _ => Color::new(255, 120, 0, 200),
            }),
        );
        textures.insert(
            "badge",
            Texture::filled(Size::new(16, 16), Color::new(40, 200, 90, 255)),
        );

        let mut layers = vec![
            Layer::new("backdrop").with_destination(BUTTON_AREA),
            Layer::new("stripes").with_destination(Rect::new(0, 140, 96, 80)),
        ];
        match textures.load_from_text("caption", "tessel") {
            Ok(()) => layers.push(
                Layer::new("caption").with_destination(Rect::new(
                    BUTTON_AREA.x + 12,
                    BUTTON_AREA.y + 12,
                    120,
                    32,
                )),
            ),
            Err(err) => log::info!("no caption: {err}"),
        }

        let mut button = Button::new(BUTTON_AREA);
        button.set_layers(layers);
        button
            .listener_mut()
            .add_listener(EventCategory::MouseButton, |event| {
                if let WindowEvent::MouseInput { state, button, .. } = event {
                    log::info!("{button:?} {state:?}");
                }
            });

        ctx.events
            .add_listener("window")
            .add_listener(EventCategory::Window, |event| {
                if let WindowEvent::Resized(size) = event {
                    log::debug!("resized to {}x{}", size.width, size.height);
                }
            });

        let label = Label::new(vec![
            Layer::new("badge").with_destination(Rect::new(16, 16, 32, 32)),
        ]);

        Self {
            widgets: vec![button.into(), label.into()],
            stripe_x: -96.0,
        }
    }
}
impl GameState for Showcase {
    fn handle_event(&mut self, _ctx: &mut Context, event: &WindowEvent) -> Transition {
        if let WindowEvent::KeyboardInput { event, .. } = event {
            if event.state == ElementState::Pressed
                && event.logical_key == Key::Named(NamedKey::Escape)
            {
                return Transition::Quit;
            }
        }

        self.widgets.iter_mut().for_each(|widget| {
            if let AnyWidget::Button(button) = widget {
                button.handle_event(event);
            }
        });
        Transition::None
    }

    fn update(&mut self, ctx: &mut Context) -> Transition {
        let window_width = ctx.window_size.width as f32;
        self.stripe_x += STRIPE_SPEED * ctx.delta.as_secs_f32();
        if self.stripe_x > window_width {
            self.stripe_x = -96.0;
        }

        let x = self.stripe_x as i32;
        for widget in &mut self.widgets {
            if let AnyWidget::Button(button) = widget {
                button.update(|layers| {
                    if let Some(stripes) = layers.iter_mut().find(|layer| layer.texture == "stripes") {
                        stripes.destination = Some(Rect::new(x, 140, 96, 80));
                    }
                });
            }
        }
        Transition::None
    }

    fn render(&mut self, target: &mut RenderContext<'_, '_>) {
        self.widgets
            .iter()
            .for_each(|widget| widget.render(target));

        // spins with the stripes' progress
        let spin = Transform::rotated(self.stripe_x as f64);
        if let Err(err) = target.render_ex(
            "badge",
            Rect::new(0, 0, 16, 16),
            Rect::new(64, 16, 32, 32),
            spin,
        ) {
            log::warn!("{err}");
        }

        if target.textures().has_font() {
            if let Err(err) = target.render_text(
                "Esc to quit",
                Position { x: 16, y: 300 },
                SizeConstraint::auto(),
            ) {
                log::warn!("{err}");
            }
        }
    }
}

fn main() -> eyre::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let path = std::env::args().nth(1).unwrap_or_else(|| CONFIG_PATH.to_owned());
    let config = GameConfig::load_or_default(path);

    let mut game = Game::new(config)?;
    let showcase = Showcase::new(game.context_mut());
    game.run(Box::new(showcase))
}
