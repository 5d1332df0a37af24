use std::time::Duration;

use crate::event::EventHandler;
use crate::layout::Size;
use crate::render::textures::TextureManager;

/// The services a game state can reach while handling events and updating
#[derive(Default)]
pub struct Context {
    pub textures: TextureManager,
    pub events: EventHandler,

    /// Inner size of the window, as of the last resize
    pub window_size: Size,

    /// Time between the start of the previous update and the start of this one
    pub delta: Duration,
}
impl Context {
    pub fn new(textures: TextureManager, window_size: Size) -> Self {
        Self {
            textures,
            window_size,
            ..Self::default()
        }
    }
}
