//! Navigation logic: pure functions over `NavState`, fully testable.
//!
//! Every function takes the current time explicitly and appends the render
//! instructions it produces to `ops`. Functions that move a cursor return
//! whether a change was committed.

use super::actions::Control;
use super::render::{Button, Group, RenderOp, Track};
use super::state::{Axis, NavState, Task};
use crate::input::{NavKey, Swipe};
use crate::layout::LayoutMode;

/// Clamp a possibly out-of-range target into `[0, count-1]`.
/// `None` when there is nothing to index.
pub fn clamp_index(target: isize, count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }
    Some(target.clamp(0, count as isize - 1) as usize)
}

fn offset(index: usize, unit: f64) -> f64 {
    // `0.0 - x` keeps index 0 at +0.0 so transforms never read "-0px".
    0.0 - index as f64 * unit
}

pub fn section_offset(state: &NavState) -> RenderOp {
    RenderOp::SetOffset {
        track: Track::Sections,
        offset: offset(state.section, state.viewport.height),
    }
}

fn stage_offset(state: &NavState) -> RenderOp {
    RenderOp::SetOffset {
        track: Track::Roadmap,
        offset: offset(state.stage, 100.0),
    }
}

fn jobs_offset(state: &NavState) -> RenderOp {
    RenderOp::SetOffset {
        track: Track::Jobs,
        offset: offset(state.jobs_page, 100.0),
    }
}

/// Check the lock and the no-op rule shared by all three cursors.
fn accepts(state: &NavState, axis: Axis, current: usize, target: usize, skip_animation: bool) -> bool {
    if skip_animation {
        return true;
    }
    if target == current {
        return false;
    }
    if state.animating {
        log::trace!("{axis:?} -> {target} rejected: animation lock held");
        return false;
    }
    true
}

fn begin_lock(state: &mut NavState, axis: Axis, now: f64, ops: &mut Vec<RenderOp>) {
    state.animating = true;
    state.settling = Some(axis);
    state.timers.schedule(Task::ReleaseLock, now + state.timing.anim_ms);
    ops.push(RenderOp::Animating(true));
}

/// Move the section cursor. `skip_animation` re-applies the position
/// immediately, even when unchanged and even while the lock is held.
pub fn set_section(
    state: &mut NavState,
    target: isize,
    skip_animation: bool,
    now: f64,
    ops: &mut Vec<RenderOp>,
) -> bool {
    let Some(index) = clamp_index(target, state.shape.sections) else {
        return false;
    };
    if !accepts(state, Axis::Section, state.section, index, skip_animation) {
        return false;
    }

    state.section = index;
    if !skip_animation {
        log::debug!("section -> {index}");
        begin_lock(state, Axis::Section, now, ops);
    }
    // Forced re-applies move focus too, so the first frame and a mode switch
    // leave keyboard focus on the visible section.
    state
        .timers
        .schedule(Task::FocusSection, now + state.timing.anim_ms / 2.0);
    ops.push(section_offset(state));
    true
}

pub fn set_stage(
    state: &mut NavState,
    target: isize,
    skip_animation: bool,
    now: f64,
    ops: &mut Vec<RenderOp>,
) -> bool {
    let Some(index) = clamp_index(target, state.shape.stages) else {
        return false;
    };
    if !accepts(state, Axis::Stage, state.stage, index, skip_animation) {
        return false;
    }

    state.stage = index;
    if !skip_animation {
        log::debug!("roadmap stage -> {index}");
        begin_lock(state, Axis::Stage, now, ops);
    }
    ops.push(stage_offset(state));
    ops.push(RenderOp::SetActive {
        group: Group::Stages,
        index,
    });
    ops.push(RenderOp::SetActive {
        group: Group::StageDots,
        index,
    });
    true
}

pub fn set_jobs_page(
    state: &mut NavState,
    target: isize,
    skip_animation: bool,
    now: f64,
    ops: &mut Vec<RenderOp>,
) -> bool {
    let count = state.jobs_page_count();
    let Some(index) = clamp_index(target, count) else {
        return false;
    };
    if !accepts(state, Axis::JobsPage, state.jobs_page, index, skip_animation) {
        return false;
    }

    state.jobs_page = index;
    if !skip_animation {
        log::debug!("jobs page -> {index}");
        begin_lock(state, Axis::JobsPage, now, ops);
    }
    ops.push(jobs_offset(state));
    ops.push(RenderOp::SetActive {
        group: Group::JobsDots,
        index: state.shape.jobs.dot_for_page(state.mode, index),
    });
    ops.push(RenderOp::SetDisabled {
        button: Button::JobsPrev,
        disabled: index == 0,
    });
    ops.push(RenderOp::SetDisabled {
        button: Button::JobsNext,
        disabled: index == count - 1,
    });
    true
}

/// Directional intent: sub-paginate inside the roadmap or jobs section and
/// hand off to the section cursor at either end; move sections elsewhere.
pub fn step(state: &mut NavState, direction: isize, now: f64, ops: &mut Vec<RenderOp>) -> bool {
    let next_section = state.section as isize + direction;

    if state.on_roadmap() {
        let next = state.stage as isize + direction;
        if (0..state.shape.stages as isize).contains(&next) {
            return set_stage(state, next, false, now, ops);
        }
        return set_section(state, next_section, false, now, ops);
    }

    if state.on_jobs() {
        let next = state.jobs_page as isize + direction;
        if (0..state.jobs_page_count() as isize).contains(&next) {
            return set_jobs_page(state, next, false, now, ops);
        }
        return set_section(state, next_section, false, now, ops);
    }

    set_section(state, next_section, false, now, ops)
}

/// Sideways intent: roadmap or jobs only, never crosses into another section.
pub fn step_lateral(state: &mut NavState, direction: isize, now: f64, ops: &mut Vec<RenderOp>) -> bool {
    if state.on_roadmap() {
        let next = state.stage as isize + direction;
        return set_stage(state, next, false, now, ops);
    }
    if state.on_jobs() {
        let next = state.jobs_page as isize + direction;
        return set_jobs_page(state, next, false, now, ops);
    }
    false
}

/// Feed one wheel event. Returns true when it triggered a transition attempt.
pub fn wheel(state: &mut NavState, delta_y: f64, now: f64, ops: &mut Vec<RenderOp>) -> bool {
    if !delta_y.is_finite() || state.animating || state.cooldown {
        return false;
    }

    state.timers.cancel(Task::ResetWheel);
    if !state.wheel.push(delta_y, state.timing.wheel_threshold) {
        state
            .timers
            .schedule(Task::ResetWheel, now + state.timing.wheel_idle_ms);
        return false;
    }

    let direction = if delta_y > 0.0 { 1 } else { -1 };
    // Cooldown starts even if the step turns out to be a no-op at a boundary.
    state.cooldown = true;
    state
        .timers
        .schedule(Task::ReleaseCooldown, now + state.timing.wheel_cooldown_ms);
    step(state, direction, now, ops);
    true
}

/// Handle a navigation key. Ignored entirely while the lock is held.
pub fn key(state: &mut NavState, key: NavKey, now: f64, ops: &mut Vec<RenderOp>) -> bool {
    if state.animating {
        return false;
    }
    match key {
        NavKey::Down | NavKey::PageDown => step(state, 1, now, ops),
        NavKey::Up | NavKey::PageUp => step(state, -1, now, ops),
        NavKey::Left => step_lateral(state, -1, now, ops),
        NavKey::Right => step_lateral(state, 1, now, ops),
        NavKey::Home => set_section(state, 0, false, now, ops),
        NavKey::End => {
            let last = state.shape.sections as isize - 1;
            set_section(state, last, false, now, ops)
        }
    }
}

pub fn touch_start(state: &mut NavState, x: f64, y: f64, now: f64) {
    state.touch.begin(x, y, now);
}

pub fn touch_end(state: &mut NavState, x: f64, y: f64, now: f64, ops: &mut Vec<RenderOp>) -> bool {
    let timing = state.timing;
    match state
        .touch
        .finish(x, y, now, timing.swipe_min_px, timing.swipe_max_ms)
    {
        Some(Swipe::Vertical(direction)) => step(state, direction, now, ops),
        Some(Swipe::Horizontal(direction)) => step_lateral(state, direction, now, ops),
        None => false,
    }
}

pub fn click(state: &mut NavState, control: Control, now: f64, ops: &mut Vec<RenderOp>) -> bool {
    match control {
        Control::StageDot(dot) => set_stage(state, dot as isize, false, now, ops),
        Control::JobsDot(dot) => {
            let page = state.shape.jobs.page_for_dot(state.mode, dot);
            set_jobs_page(state, page as isize, false, now, ops)
        }
        Control::JobsPrev => {
            let target = state.jobs_page as isize - 1;
            set_jobs_page(state, target, false, now, ops)
        }
        Control::JobsNext => {
            let target = state.jobs_page as isize + 1;
            set_jobs_page(state, target, false, now, ops)
        }
        Control::SectionPrev => {
            let target = state.section as isize - 1;
            set_section(state, target, false, now, ops)
        }
        Control::SectionNext => {
            let target = state.section as isize + 1;
            set_section(state, target, false, now, ops)
        }
    }
}

/// Re-render every cursor at its current position without animation.
pub fn reapply_all(state: &mut NavState, now: f64, ops: &mut Vec<RenderOp>) {
    let (section, stage, page) = (state.section, state.stage, state.jobs_page);
    set_section(state, section as isize, true, now, ops);
    set_stage(state, stage as isize, true, now, ops);
    set_jobs_page(state, page as isize, true, now, ops);
}

/// Observe a new viewport size.
///
/// Crossing the breakpoint resets the jobs cursor, switches its page count
/// and re-applies everything immediately, whatever the lock state. Otherwise
/// only the section offset is re-asserted for the new height.
pub fn resize(state: &mut NavState, width: f64, height: f64, now: f64, ops: &mut Vec<RenderOp>) {
    state.viewport.width = width;
    state.viewport.height = height;

    let mode = LayoutMode::from_width(width, state.timing.breakpoint_px);
    if mode == state.mode {
        ops.push(section_offset(state));
        return;
    }

    log::debug!("layout mode {:?} -> {:?}", state.mode, mode);
    state.mode = mode;
    state.jobs_page = 0;
    ops.push(RenderOp::Mode(mode));
    reapply_all(state, now, ops);
}

/// First render: apply the layout mode and every cursor.
pub fn start(state: &mut NavState, now: f64, ops: &mut Vec<RenderOp>) {
    ops.push(RenderOp::Mode(state.mode));
    reapply_all(state, now, ops);
}

/// Fire every task due at `now`.
pub fn tick(state: &mut NavState, now: f64, ops: &mut Vec<RenderOp>) {
    while let Some(task) = state.timers.pop_due(now) {
        match task {
            Task::ReleaseLock => {
                state.animating = false;
                ops.push(RenderOp::Animating(false));
                // Re-assert the final position in case the viewport changed mid-flight.
                match state.settling.take() {
                    Some(Axis::Section) => ops.push(section_offset(state)),
                    Some(Axis::Stage) => ops.push(stage_offset(state)),
                    Some(Axis::JobsPage) => ops.push(jobs_offset(state)),
                    None => {}
                }
            }
            Task::ReleaseCooldown => state.cooldown = false,
            Task::ResetWheel => state.wheel.reset(),
            Task::FocusSection => ops.push(RenderOp::FocusSection(state.section)),
        }
    }
}
