//! Navigation engine state.

use crate::input::{TouchTracker, WheelAccumulator};
use crate::layout::{JobsLayout, LayoutMode};
use crate::time::Timers;

/// Durations and thresholds the engine runs on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timing {
    /// Animation lock duration.
    pub anim_ms: f64,
    pub wheel_cooldown_ms: f64,
    /// Summed |deltaY| needed before the wheel triggers a transition.
    pub wheel_threshold: f64,
    /// Idle gap after which a partial wheel sum is discarded.
    pub wheel_idle_ms: f64,
    pub swipe_min_px: f64,
    pub swipe_max_ms: f64,
    pub breakpoint_px: f64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            anim_ms: 400.0,
            wheel_cooldown_ms: 500.0,
            wheel_threshold: 50.0,
            wheel_idle_ms: 50.0,
            swipe_min_px: 50.0,
            swipe_max_ms: 500.0,
            breakpoint_px: 900.0,
        }
    }
}

/// What the document contains. Counts of zero mean the structure is absent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeckShape {
    pub sections: usize,
    pub stages: usize,
    /// Section index hosting the roadmap.
    pub roadmap_section: usize,
    /// Section index hosting the jobs listing.
    pub jobs_section: usize,
    pub jobs: JobsLayout,
}

impl Default for DeckShape {
    /// Hero, roadmap, clubs, jobs, destination; four roadmap years; four job groups of three.
    fn default() -> Self {
        Self {
            sections: 5,
            stages: 4,
            roadmap_section: 1,
            jobs_section: 3,
            jobs: JobsLayout::new(4, 3),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

/// Which cursor a transition moved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Section,
    Stage,
    JobsPage,
}

/// Deferred engine work.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Task {
    ReleaseLock,
    ReleaseCooldown,
    /// Discard a partial wheel sum after an idle gap.
    ResetWheel,
    /// Move keyboard focus to the current section mid-transition.
    FocusSection,
}

pub struct NavState {
    pub shape: DeckShape,
    pub timing: Timing,
    pub viewport: Viewport,
    pub mode: LayoutMode,

    pub section: usize,
    pub stage: usize,
    pub jobs_page: usize,

    /// Animation lock.
    pub animating: bool,
    /// Wheel cooldown.
    pub cooldown: bool,
    /// Axis whose transition holds the lock; re-asserted on release.
    pub settling: Option<Axis>,

    pub wheel: WheelAccumulator,
    pub touch: TouchTracker,
    pub timers: Timers<Task>,
}

impl NavState {
    pub fn new(shape: DeckShape, timing: Timing, viewport: Viewport) -> Self {
        Self {
            shape,
            timing,
            viewport,
            mode: LayoutMode::from_width(viewport.width, timing.breakpoint_px),
            section: 0,
            stage: 0,
            jobs_page: 0,
            animating: false,
            cooldown: false,
            settling: None,
            wheel: WheelAccumulator::new(),
            touch: TouchTracker::new(),
            timers: Timers::new(),
        }
    }

    pub fn jobs_page_count(&self) -> usize {
        self.shape.jobs.page_count(self.mode)
    }

    /// True when the section cursor sits on a roadmap with at least one stage.
    pub fn on_roadmap(&self) -> bool {
        self.section == self.shape.roadmap_section && self.shape.stages > 0
    }

    /// True when the section cursor sits on a jobs listing with at least one page.
    pub fn on_jobs(&self) -> bool {
        self.section == self.shape.jobs_section && self.jobs_page_count() > 0
    }
}
