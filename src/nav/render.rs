//! Render instructions emitted by the engine.
//!
//! The engine never touches the document. Every visible consequence of a
//! transition is described by a [`RenderOp`] and executed by the DOM layer.

use crate::layout::LayoutMode;

/// A translated strip of slides.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Track {
    /// Vertical strip of full-screen sections, offset in pixels.
    Sections,
    /// Horizontal roadmap stages, offset in viewport widths.
    Roadmap,
    /// Horizontal jobs pages, offset in percent of the track.
    Jobs,
}

impl Track {
    /// CSS transform placing the track at `offset` (already negated).
    pub fn transform(self, offset: f64) -> String {
        match self {
            Track::Sections => format!("translate3d(0, {offset}px, 0)"),
            Track::Roadmap => format!("translate3d({offset}vw, 0, 0)"),
            Track::Jobs => format!("translate3d({offset}%, 0, 0)"),
        }
    }
}

/// Element groups whose members carry an active state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Group {
    Stages,
    StageDots,
    JobsDots,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Button {
    JobsPrev,
    JobsNext,
}

#[derive(Clone, Debug, PartialEq)]
pub enum RenderOp {
    SetOffset { track: Track, offset: f64 },
    /// Mark member `index` of `group` active and every other member inactive.
    SetActive { group: Group, index: usize },
    SetDisabled { button: Button, disabled: bool },
    /// Animation lock taken (true) or released (false).
    Animating(bool),
    /// Layout mode applied: body class and control visibility.
    Mode(LayoutMode),
    FocusSection(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_transform_is_vertical_pixels() {
        assert_eq!(Track::Sections.transform(-1600.0), "translate3d(0, -1600px, 0)");
    }

    #[test]
    fn roadmap_transform_uses_viewport_width() {
        assert_eq!(Track::Roadmap.transform(-200.0), "translate3d(-200vw, 0, 0)");
    }

    #[test]
    fn jobs_transform_uses_percent() {
        assert_eq!(Track::Jobs.transform(-300.0), "translate3d(-300%, 0, 0)");
        assert_eq!(Track::Jobs.transform(0.0), "translate3d(0%, 0, 0)");
    }
}
