use std::collections::HashMap;

use winit::event::{Ime, WindowEvent};

/// Coarse grouping of window events; listeners subscribe to a whole category at once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventCategory {
    Keyboard,
    MouseMotion,
    MouseButton,
    MouseWheel,
    Touch,
    /// Touchpad pinch, rotate, pressure and double-tap
    Gesture,
    /// Raw analog axis motion
    Axis,
    /// Files dragged over or dropped on the window
    Drop,
    /// Composition in progress in an input method
    TextEditing,
    /// Text committed by an input method
    TextInput,
    /// The window is being closed
    Quit,
    /// Everything about the window itself: size, position, focus, visibility, theme
    Window,
}
impl EventCategory {
    pub fn of(event: &WindowEvent) -> Self {
        match event {
            WindowEvent::KeyboardInput { .. } | WindowEvent::ModifiersChanged(_) => Self::Keyboard,
            WindowEvent::CursorMoved { .. }
            | WindowEvent::CursorEntered { .. }
            | WindowEvent::CursorLeft { .. } => Self::MouseMotion,
            WindowEvent::MouseInput { .. } => Self::MouseButton,
            WindowEvent::MouseWheel { .. } => Self::MouseWheel,
            WindowEvent::Touch(_) => Self::Touch,
            WindowEvent::TouchpadMagnify { .. }
            | WindowEvent::SmartMagnify { .. }
            | WindowEvent::TouchpadRotate { .. }
            | WindowEvent::TouchpadPressure { .. } => Self::Gesture,
            WindowEvent::AxisMotion { .. } => Self::Axis,
            WindowEvent::DroppedFile(_)
            | WindowEvent::HoveredFile(_)
            | WindowEvent::HoveredFileCancelled => Self::Drop,
            WindowEvent::Ime(Ime::Commit(_)) => Self::TextInput,
            WindowEvent::Ime(_) => Self::TextEditing,
            WindowEvent::CloseRequested | WindowEvent::Destroyed => Self::Quit,
            _ => Self::Window,
        }
    }
}

type Callback = Box<dyn FnMut(&WindowEvent)>;

/// One callback per event category.
///
/// Callbacks own whatever state they need; capture it in the closure.
#[derive(Default)]
pub struct EventListener {
    callbacks: HashMap<EventCategory, Callback>,
}
impl EventListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the callback for `category`, replacing any previous one
    pub fn add_listener(
        &mut self,
        category: EventCategory,
        callback: impl FnMut(&WindowEvent) + 'static,
    ) {
        self.callbacks.insert(category, Box::new(callback));
    }

    pub fn remove_listener(&mut self, category: EventCategory) {
        self.callbacks.remove(&category);
    }

    pub fn has_listener(&self, category: EventCategory) -> bool {
        self.callbacks.contains_key(&category)
    }

    /// Calls the callback registered for the event's category, if any
    pub fn handle_event(&mut self, event: &WindowEvent) {
        if let Some(callback) = self.callbacks.get_mut(&EventCategory::of(event)) {
            callback(event);
        }
    }
}

/// Named [`EventListener`]s that all see every event.
#[derive(Default)]
pub struct EventHandler {
    listeners: HashMap<String, EventListener>,
}
impl EventHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the listener registered as `id`, creating an empty one first if needed
    pub fn add_listener(&mut self, id: impl Into<String>) -> &mut EventListener {
        self.listeners.entry(id.into()).or_default()
    }

    pub fn get(&self, id: &str) -> Option<&EventListener> {
        self.listeners.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut EventListener> {
        self.listeners.get_mut(id)
    }

    pub fn erase(&mut self, id: &str) -> Option<EventListener> {
        self.listeners.remove(id)
    }

    pub fn clear(&mut self) {
        self.listeners.clear();
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn handle_event(&mut self, event: &WindowEvent) {
        self.listeners
            .values_mut()
            .for_each(|listener| listener.handle_event(event));
    }
}
