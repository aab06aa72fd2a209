//! Navigation engine: three nested cursors behind one animation lock.

pub mod actions;
pub mod logic;
pub mod render;
pub mod state;

use crate::input::InputEvent;
use crate::time::Clock;

use render::RenderOp;
use state::{DeckShape, NavState, Timing, Viewport};

/// Outcome of one input event.
#[derive(Debug, Default, PartialEq)]
pub struct Handled {
    /// The host should suppress the browser's default action.
    pub consumed: bool,
    pub ops: Vec<RenderOp>,
}

/// Stateful engine façade. Owns the cursors, gating flags and timers;
/// callers only submit intents and execute the render ops they get back.
pub struct Navigator<C> {
    state: NavState,
    clock: C,
}

impl<C: Clock> Navigator<C> {
    pub fn new(shape: DeckShape, timing: Timing, viewport: Viewport, clock: C) -> Self {
        Self {
            state: NavState::new(shape, timing, viewport),
            clock,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &NavState {
        &self.state
    }

    /// Initial unanimated render of every cursor.
    pub fn start(&mut self) -> Vec<RenderOp> {
        let mut ops = Vec::new();
        logic::start(&mut self.state, self.clock.now_ms(), &mut ops);
        ops
    }

    pub fn handle(&mut self, event: &InputEvent) -> Handled {
        let now = self.clock.now_ms();
        let state = &mut self.state;
        let mut ops = Vec::new();

        let consumed = match *event {
            // Wheel events are always swallowed so the page never scrolls natively.
            InputEvent::Wheel { delta_y } => {
                logic::wheel(state, delta_y, now, &mut ops);
                true
            }
            // Keys dropped by the lock keep their browser default.
            InputEvent::Key(key) => {
                let locked = state.animating;
                logic::key(state, key, now, &mut ops);
                !locked
            }
            InputEvent::TouchStart { x, y } => {
                logic::touch_start(state, x, y, now);
                false
            }
            InputEvent::TouchEnd { x, y } => {
                logic::touch_end(state, x, y, now, &mut ops);
                false
            }
            InputEvent::Click(control) => {
                logic::click(state, control, now, &mut ops);
                true
            }
            InputEvent::Resize { width, height } => {
                logic::resize(state, width, height, now, &mut ops);
                false
            }
        };

        Handled { consumed, ops }
    }

    /// Run every deferred task that is due.
    pub fn tick(&mut self) -> Vec<RenderOp> {
        let mut ops = Vec::new();
        logic::tick(&mut self.state, self.clock.now_ms(), &mut ops);
        ops
    }

    /// When the host should call [`Navigator::tick`] next.
    pub fn next_deadline(&self) -> Option<f64> {
        self.state.timers.next_deadline()
    }

    /// Milliseconds until the next deadline, never negative.
    pub fn next_delay_ms(&self) -> Option<u32> {
        let deadline = self.next_deadline()?;
        let delay = (deadline - self.clock.now_ms()).max(0.0).ceil();
        Some(delay as u32)
    }
}
