/// Startup settings, stored as RON
pub mod config;

pub mod context;

/// Event categories and the listeners keyed by them
pub mod event;

pub mod game;

/// Graphics primitives, such as textures, typeface and color
pub mod graphics;

pub mod layout;

/// Rendering engine implementation
pub mod render;

/// The stack of game states
pub mod state;

pub mod timer;

/// Labels, buttons and the layers they paint
pub mod widget;
