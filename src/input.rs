//! Input normalization: event types, key mapping, wheel and touch bookkeeping.
//!
//! This module is DOM-agnostic. The DOM layer converts `WheelEvent`,
//! `KeyboardEvent`, `TouchEvent` and control clicks into [`InputEvent`]s and
//! the engine decides what they mean.

use crate::nav::actions::Control;

/// All engine inputs, normalized from wheel, keyboard, touch, click and resize sources.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Vertical wheel delta; positive scrolls down.
    Wheel { delta_y: f64 },
    Key(NavKey),
    TouchStart { x: f64, y: f64 },
    TouchEnd { x: f64, y: f64 },
    /// A click on one of the navigation controls.
    Click(Control),
    Resize { width: f64, height: f64 },
}

/// Keys the deck reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavKey {
    Down,
    PageDown,
    Up,
    PageUp,
    Left,
    Right,
    Home,
    End,
}

impl NavKey {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_key_name(key: &str) -> Option<Self> {
        match key {
            "ArrowDown" => Some(NavKey::Down),
            "PageDown" => Some(NavKey::PageDown),
            "ArrowUp" => Some(NavKey::Up),
            "PageUp" => Some(NavKey::PageUp),
            "ArrowLeft" => Some(NavKey::Left),
            "ArrowRight" => Some(NavKey::Right),
            "Home" => Some(NavKey::Home),
            "End" => Some(NavKey::End),
            _ => None,
        }
    }
}

/// Running sum of wheel delta magnitudes.
///
/// One physical flick produces a stream of small wheel events; the engine
/// only acts once their magnitudes add up past a threshold.
#[derive(Debug, Default)]
pub struct WheelAccumulator {
    accumulated: f64,
}

impl WheelAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one event's magnitude. Returns true when the sum reaches `threshold`,
    /// in which case the sum is reset to zero.
    pub fn push(&mut self, delta_y: f64, threshold: f64) -> bool {
        self.accumulated += delta_y.abs();
        if self.accumulated < threshold {
            return false;
        }
        self.accumulated = 0.0;
        true
    }

    pub fn reset(&mut self) {
        self.accumulated = 0.0;
    }

    #[cfg(test)]
    pub fn accumulated(&self) -> f64 {
        self.accumulated
    }
}

/// A classified swipe. Directions are +1 (advance) / -1 (retreat).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Swipe {
    Vertical(isize),
    Horizontal(isize),
}

#[derive(Clone, Copy, Debug)]
struct TouchStart {
    x: f64,
    y: f64,
    at_ms: f64,
}

/// Remembers where and when the current touch began.
#[derive(Debug, Default)]
pub struct TouchTracker {
    start: Option<TouchStart>,
}

impl TouchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, x: f64, y: f64, at_ms: f64) {
        self.start = Some(TouchStart { x, y, at_ms });
    }

    /// Finish the gesture and classify it.
    ///
    /// Displacement is measured start minus end, so a finger moving up the
    /// screen (positive `dy`) advances and a finger moving left (positive
    /// `dx`) moves to the next stage or page. Gestures slower than
    /// `max_ms` or shorter than `min_px` on their dominant axis are not swipes.
    pub fn finish(&mut self, x: f64, y: f64, at_ms: f64, min_px: f64, max_ms: f64) -> Option<Swipe> {
        let start = self.start.take()?;
        if at_ms - start.at_ms > max_ms {
            return None;
        }

        let dx = start.x - x;
        let dy = start.y - y;
        let direction = |d: f64| if d > 0.0 { 1 } else { -1 };

        if dy.abs() >= dx.abs() {
            (dy.abs() > min_px).then(|| Swipe::Vertical(direction(dy)))
        } else {
            (dx.abs() > min_px).then(|| Swipe::Horizontal(direction(dx)))
        }
    }
}
