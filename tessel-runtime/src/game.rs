use std::num::NonZeroU32;
use std::rc::Rc;

use eyre::{eyre, WrapErr};
use softbuffer::Surface;
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{Window, WindowBuilder};

use crate::config::GameConfig;
use crate::context::Context;
use crate::layout::Size;
use crate::render::textures::TextureManager;
use crate::render::{DrawHandle, Pixel, RenderContext};
use crate::state::{GameState, GameStateManager};
use crate::timer::Timer;

type WindowSurface = Surface<Rc<Window>, Rc<Window>>;

/// Owns every service and drives the window loop until the state stack runs out.
pub struct Game {
    config: GameConfig,
    ctx: Context,
    states: GameStateManager,
}
impl Game {
    /// Sets up the texture manager from `config`; fails if the configured font can't be opened
    pub fn new(config: GameConfig) -> eyre::Result<Self> {
        let mut textures = TextureManager::new();
        textures.set_text_quality(config.text.quality);
        textures.set_foreground(config.text.foreground());
        textures.set_background(config.text.background());
        if let Some(font) = &config.font {
            textures
                .open_font(&font.path, font.size)
                .wrap_err("opening the configured font")?;
        }

        let window_size = Size::new(
            config.window.width as Pixel,
            config.window.height as Pixel,
        );
        Ok(Self {
            ctx: Context::new(textures, window_size),
            states: GameStateManager::new(),
            config,
        })
    }

    /// Services available before the loop starts, to register textures and listeners
    pub fn context_mut(&mut self) -> &mut Context {
        &mut self.ctx
    }

    /// Opens the window and runs `initial` until the last state is gone or the window is closed
    pub fn run(mut self, initial: Box<dyn GameState>) -> eyre::Result<()> {
        self.states.set_state(Some(initial));

        let event_loop = EventLoop::new().map_err(|err| eyre!("creating event loop: {err}"))?;
        let window = WindowBuilder::new()
            .with_title(&self.config.window.title)
            .with_inner_size(LogicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ))
            .with_resizable(self.config.window.resizable)
            .build(&event_loop)
            .map_err(|err| eyre!("creating window: {err}"))?;
        let window = Rc::new(window);

        let context = softbuffer::Context::new(window.clone())
            .map_err(|err| eyre!("creating softbuffer context: {err}"))?;
        let mut surface = Surface::new(&context, window.clone())
            .map_err(|err| eyre!("creating softbuffer surface: {err}"))?;

        let mut frame_timer = Timer::new();
        let mut occluded = false;
        log::info!("game initialized");

        event_loop
            .run(move |event, elwt| {
                elwt.set_control_flow(ControlFlow::Poll);

                match event {
                    Event::WindowEvent { window_id, event } if window_id == window.id() => {
                        match event {
                            WindowEvent::RedrawRequested => {
                                // Nothing to show while hidden
                                if occluded {
                                    return;
                                }
                                if let Err(err) = self.redraw(&window, &mut surface) {
                                    log::error!("{err:#}");
                                    elwt.exit();
                                }
                            }
                            event => {
                                match &event {
                                    WindowEvent::Resized(size) => {
                                        self.ctx.window_size =
                                            Size::new(size.width as Pixel, size.height as Pixel);
                                    }
                                    WindowEvent::Occluded(hidden) => occluded = *hidden,
                                    _ => (),
                                }

                                self.ctx.events.handle_event(&event);
                                self.states.handle_event(&mut self.ctx, &event);

                                if matches!(event, WindowEvent::CloseRequested) {
                                    self.states.set_state(None);
                                }
                            }
                        }
                    }
                    Event::AboutToWait => {
                        self.ctx.delta = frame_timer.restart();
                        self.states.update(&mut self.ctx);
                        window.request_redraw();
                    }
                    Event::LoopExiting => {
                        self.states.set_state(None);
                        log::info!("game deinitialized");
                    }
                    _ => (),
                }

                if !self.states.is_running() {
                    elwt.exit();
                }
            })
            .map_err(|err| eyre!("running event loop: {err}"))
    }

    fn redraw(&mut self, window: &Window, surface: &mut WindowSurface) -> eyre::Result<()> {
        let size = window.inner_size();
        let (Some(width), Some(height)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            // Minimized
            return Ok(());
        };
        surface
            .resize(width, height)
            .map_err(|err| eyre!("resizing surface: {err}"))?;

        let mut buffer = surface
            .buffer_mut()
            .map_err(|err| eyre!("acquiring frame buffer: {err}"))?;
        {
            let handle = DrawHandle::new(&mut buffer, size.width as usize, size.height as usize);
            let mut target = RenderContext::new(&self.ctx.textures, handle);
            target.clear(self.config.clear_color());
            self.states.render(&mut target);
        }
        buffer
            .present()
            .map_err(|err| eyre!("presenting frame: {err}"))
    }
}
