use winit::event::WindowEvent;

use crate::context::Context;
use crate::render::RenderContext;

/// One screen of a game: a menu, a level, a pause overlay.
///
/// Only the state on top of the [`GameStateManager`] stack receives events, updates and renders.
/// Cleanup belongs in `Drop`; a state is dropped when it is popped or replaced.
pub trait GameState {
    fn handle_event(&mut self, _ctx: &mut Context, _event: &WindowEvent) -> Transition {
        Transition::None
    }

    fn update(&mut self, ctx: &mut Context) -> Transition;

    fn render(&mut self, target: &mut RenderContext<'_, '_>);
}

/// What a state wants to happen to the stack after an event or update
#[derive(Default)]
pub enum Transition {
    #[default]
    None,
    /// Put a new state on top, keeping this one underneath
    Push(Box<dyn GameState>),
    /// Drop this state and return to the one below
    Pop,
    /// Drop every state and start over with this one
    Replace(Box<dyn GameState>),
    /// Drop every state and stop the game
    Quit,
}

/// Owns the stack of game states.
///
/// The game keeps running while the stack is non-empty; popping the last state or replacing
/// the stack with nothing requests exit.
#[derive(Default)]
pub struct GameStateManager {
    states: Vec<Box<dyn GameState>>,
    exit_requested: bool,
}
impl GameStateManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every state, top first, then starts over with `state`.
    /// With `None` the stack is left empty and exit is requested.
    pub fn set_state(&mut self, state: Option<Box<dyn GameState>>) {
        self.drain();
        match state {
            Some(state) => self.states.push(state),
            None => self.request_exit(),
        }
    }

    pub fn push_state(&mut self, state: Box<dyn GameState>) {
        self.states.push(state);
        log::debug!("pushed game state, {} on the stack", self.states.len());
    }

    pub fn pop_state(&mut self) {
        if self.states.pop().is_some() {
            log::debug!("popped game state, {} on the stack", self.states.len());
        }
        if self.states.is_empty() {
            self.request_exit();
        }
    }

    pub fn apply(&mut self, transition: Transition) {
        match transition {
            Transition::None => (),
            Transition::Push(state) => self.push_state(state),
            Transition::Pop => self.pop_state(),
            Transition::Replace(state) => self.set_state(Some(state)),
            Transition::Quit => self.set_state(None),
        }
    }

    pub fn handle_event(&mut self, ctx: &mut Context, event: &WindowEvent) {
        if let Some(top) = self.top() {
            let transition = top.handle_event(ctx, event);
            self.apply(transition);
        }
    }

    pub fn update(&mut self, ctx: &mut Context) {
        if let Some(top) = self.top() {
            let transition = top.update(ctx);
            self.apply(transition);
        }
    }

    pub fn render(&mut self, target: &mut RenderContext<'_, '_>) {
        if let Some(top) = self.top() {
            top.render(target);
        }
    }

    pub fn is_running(&self) -> bool {
        !self.exit_requested
    }

    pub fn request_exit(&mut self) {
        if !self.exit_requested {
            log::info!("exit requested");
        }
        self.exit_requested = true;
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// The state that should receive work, `None` once exit has been requested
    fn top(&mut self) -> Option<&mut Box<dyn GameState>> {
        match self.exit_requested {
            true => None,
            false => self.states.last_mut(),
        }
    }

    fn drain(&mut self) {
        while self.states.pop().is_some() {}
    }
}
impl Drop for GameStateManager {
    fn drop(&mut self) {
        self.drain();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::render::textures::TextureManager;
    use crate::render::DrawHandle;

    type Log = Rc<RefCell<Vec<String>>>;

    /// Logs every call, and hands out a queued transition on update
    struct Probe {
        name: &'static str,
        log: Log,
        next: Option<Transition>,
    }
    impl Probe {
        fn boxed(name: &'static str, log: &Log) -> Box<dyn GameState> {
            Box::new(Self {
                name,
                log: log.clone(),
                next: None,
            })
        }

        fn then(name: &'static str, log: &Log, next: Transition) -> Box<dyn GameState> {
            Box::new(Self {
                name,
                log: log.clone(),
                next: Some(next),
            })
        }
    }
    impl GameState for Probe {
        fn handle_event(&mut self, _ctx: &mut Context, _event: &WindowEvent) -> Transition {
            self.log.borrow_mut().push(format!("{} event", self.name));
            Transition::None
        }

        fn update(&mut self, _ctx: &mut Context) -> Transition {
            self.log.borrow_mut().push(format!("{} update", self.name));
            self.next.take().unwrap_or_default()
        }

        fn render(&mut self, _target: &mut RenderContext<'_, '_>) {
            self.log.borrow_mut().push(format!("{} render", self.name));
        }
    }
    impl Drop for Probe {
        fn drop(&mut self) {
            self.log.borrow_mut().push(format!("{} drop", self.name));
        }
    }

    fn entries(log: &Log) -> Vec<String> {
        log.borrow_mut().drain(..).collect()
    }

    #[test]
    fn only_the_top_state_runs() {
        let log = Log::default();
        let mut ctx = Context::default();
        let mut states = GameStateManager::new();
        states.push_state(Probe::boxed("menu", &log));
        states.push_state(Probe::boxed("pause", &log));

        states.update(&mut ctx);
        states.handle_event(&mut ctx, &WindowEvent::Focused(true));
        let textures = TextureManager::new();
        let mut buffer = vec![0; 1];
        states.render(&mut RenderContext::new(&textures, DrawHandle::new(&mut buffer, 1, 1)));

        assert_eq!(entries(&log), vec!["pause update", "pause event", "pause render"]);
    }

    #[test]
    fn popping_the_last_state_requests_exit() {
        let log = Log::default();
        let mut states = GameStateManager::new();
        states.push_state(Probe::boxed("menu", &log));
        states.push_state(Probe::boxed("level", &log));

        states.pop_state();
        assert!(states.is_running());
        states.pop_state();
        assert!(!states.is_running());
        assert!(states.is_empty());
        assert_eq!(entries(&log), vec!["level drop", "menu drop"]);
    }

    #[test]
    fn set_state_drops_top_first() {
        let log = Log::default();
        let mut states = GameStateManager::new();
        states.push_state(Probe::boxed("menu", &log));
        states.push_state(Probe::boxed("level", &log));

        states.set_state(Some(Probe::boxed("credits", &log)));
        assert_eq!(entries(&log), vec!["level drop", "menu drop"]);
        assert_eq!(states.len(), 1);
        assert!(states.is_running());

        states.set_state(None);
        assert_eq!(entries(&log), vec!["credits drop"]);
        assert!(!states.is_running());
    }

    #[test]
    fn transitions_from_update_are_applied() {
        let log = Log::default();
        let mut ctx = Context::default();
        let mut states = GameStateManager::new();
        states.push_state(Probe::then(
            "menu",
            &log,
            Transition::Push(Probe::then("level", &log, Transition::Pop)),
        ));

        states.update(&mut ctx);
        assert_eq!(states.len(), 2);
        states.update(&mut ctx);
        assert_eq!(states.len(), 1);
        assert!(states.is_running());

        assert_eq!(
            entries(&log),
            vec!["menu update", "level update", "level drop"]
        );
    }

    #[test]
    fn nothing_runs_after_quit() {
        let log = Log::default();
        let mut ctx = Context::default();
        let mut states = GameStateManager::new();
        states.push_state(Probe::then("menu", &log, Transition::Quit));

        states.update(&mut ctx);
        states.update(&mut ctx);
        assert!(!states.is_running());
        assert_eq!(entries(&log), vec!["menu update", "menu drop"]);
    }

    #[test]
    fn replace_swaps_the_whole_stack() {
        let log = Log::default();
        let mut ctx = Context::default();
        let mut states = GameStateManager::new();
        states.push_state(Probe::boxed("title", &log));
        states.push_state(Probe::then(
            "menu",
            &log,
            Transition::Replace(Probe::boxed("level", &log)),
        ));

        states.update(&mut ctx);
        states.update(&mut ctx);
        assert_eq!(states.len(), 1);
        assert_eq!(
            entries(&log),
            vec!["menu update", "menu drop", "title drop", "level update"]
        );
    }
}
