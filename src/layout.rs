//! Responsive layout mode and jobs pagination granularity.

/// Coarse viewport classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutMode {
    /// Wide viewport: jobs are shown a group per page.
    Grouped,
    /// Narrow viewport: one job per page, section prev/next buttons visible.
    Compact,
}

impl LayoutMode {
    /// Anything wider than the breakpoint is grouped; the breakpoint itself is compact.
    pub fn from_width(width: f64, breakpoint_px: f64) -> Self {
        if width > breakpoint_px {
            LayoutMode::Grouped
        } else {
            LayoutMode::Compact
        }
    }

    pub fn shows_section_buttons(self) -> bool {
        self == LayoutMode::Compact
    }

    pub fn body_class(self) -> &'static str {
        match self {
            LayoutMode::Grouped => "layout-grouped",
            LayoutMode::Compact => "layout-compact",
        }
    }
}

/// Shape of the jobs listing: `groups` pages in grouped mode, each holding
/// `items_per_group` jobs that become individual pages in compact mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct JobsLayout {
    pub groups: usize,
    pub items_per_group: usize,
}

impl JobsLayout {
    pub fn new(groups: usize, items_per_group: usize) -> Self {
        Self {
            groups,
            items_per_group: items_per_group.max(1),
        }
    }

    pub fn page_count(&self, mode: LayoutMode) -> usize {
        self.groups * self.pages_per_dot(mode)
    }

    /// How many pages one pagination dot stands for.
    pub fn pages_per_dot(&self, mode: LayoutMode) -> usize {
        match mode {
            LayoutMode::Grouped => 1,
            LayoutMode::Compact => self.items_per_group,
        }
    }

    /// First page of the group a dot represents.
    pub fn page_for_dot(&self, mode: LayoutMode, dot: usize) -> usize {
        dot * self.pages_per_dot(mode)
    }

    pub fn dot_for_page(&self, mode: LayoutMode, page: usize) -> usize {
        page / self.pages_per_dot(mode)
    }
}
