//! Clock and fire-once timer queue for the navigation engine.
//!
//! The browser hands us wall-clock timestamps from `performance.now()`.
//! The engine never calls `setTimeout` itself: it records deadlines in a
//! [`Timers`] queue and the host wakes it up at [`Timers::next_deadline`].
//! That keeps lock/cooldown behavior deterministic and fully testable with
//! a [`ManualClock`].

#[cfg(test)]
use std::cell::Cell;
#[cfg(test)]
use std::rc::Rc;

/// Source of the current time in milliseconds.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// `performance.now()` backed clock, falling back to `Date.now()`.
pub struct PerformanceClock {
    performance: Option<web_sys::Performance>,
}

impl PerformanceClock {
    pub fn new() -> Self {
        Self {
            performance: web_sys::window().and_then(|w| w.performance()),
        }
    }
}

impl Clock for PerformanceClock {
    fn now_ms(&self) -> f64 {
        match &self.performance {
            Some(p) => p.now(),
            None => js_sys::Date::now(),
        }
    }
}

/// Hand-driven clock. Clones share the same time source.
#[cfg(test)]
#[derive(Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

#[cfg(test)]
impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, now_ms: f64) {
        self.now.set(now_ms);
    }

    pub fn advance(&self, delta_ms: f64) {
        self.now.set(self.now.get() + delta_ms);
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

/// Keyed fire-once tasks.
///
/// At most one task per key is pending: scheduling a key again replaces the
/// previous deadline (last writer wins), which is how the wheel idle reset
/// and the cooldown release cancel their predecessors.
#[derive(Debug)]
pub struct Timers<K> {
    pending: Vec<(K, f64)>,
}

impl<K: Copy + PartialEq> Timers<K> {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    pub fn schedule(&mut self, key: K, at_ms: f64) {
        self.cancel(key);
        self.pending.push((key, at_ms));
    }

    /// Drop the pending task for `key`. Returns true if one was pending.
    pub fn cancel(&mut self, key: K) -> bool {
        let before = self.pending.len();
        self.pending.retain(|(k, _)| *k != key);
        self.pending.len() != before
    }

    #[cfg(test)]
    pub fn is_pending(&self, key: K) -> bool {
        self.pending.iter().any(|(k, _)| *k == key)
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<f64> {
        self.pending
            .iter()
            .map(|&(_, at)| at)
            .min_by(|a, b| a.total_cmp(b))
    }

    /// Remove and return the earliest task due at `now_ms`, if any.
    ///
    /// Callers loop on this instead of draining a batch because firing one
    /// task may schedule or cancel others.
    pub fn pop_due(&mut self, now_ms: f64) -> Option<K> {
        let (idx, _) = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, (_, at))| *at <= now_ms)
            .min_by(|(_, (_, a)), (_, (_, b))| a.total_cmp(b))?;
        Some(self.pending.remove(idx).0)
    }
}

impl<K: Copy + PartialEq> Default for Timers<K> {
    fn default() -> Self {
        Self::new()
    }
}
