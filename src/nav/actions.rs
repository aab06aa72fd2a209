//! Navigation controls that emit click intents.

/// A clickable control on the page. Dot variants carry their position
/// in document order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    StageDot(usize),
    JobsDot(usize),
    JobsPrev,
    JobsNext,
    /// Compact layout only.
    SectionPrev,
    /// Compact layout only.
    SectionNext,
}
