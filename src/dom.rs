//! Document bindings: element lookup and render op execution.
//!
//! Every element except `<body>` is optional. A missing element turns the
//! render ops aimed at it into no-ops so a partial page still navigates.

use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement};

use crate::config::NavConfig;
use crate::error::{DeckError, Result};
use crate::layout::{JobsLayout, LayoutMode};
use crate::nav::render::{Button, Group, RenderOp, Track};
use crate::nav::state::DeckShape;

const SLIDES_WRAPPER: &str = ".slides-wrapper";
const ROADMAP_TRACK: &str = ".roadmap-track";
const ROADMAP_STAGES: &str = ".roadmap-stage";
const ROADMAP_DOTS: &str = ".roadmap-nav .nav-dot";
const JOBS_TRACK: &str = ".jobs-track";
const JOBS_PAGES: &str = ".jobs-page";
const JOBS_DOTS: &str = ".jobs-pagination .jobs-dot";
const JOBS_PREV: &str = ".jobs-prev";
const JOBS_NEXT: &str = ".jobs-next";
const SECTION_PREV: &str = ".section-prev";
const SECTION_NEXT: &str = ".section-next";
const LOADING_SCREEN: &str = ".loading-screen";

fn query<T: JsCast>(document: &Document, selector: &str) -> Option<T> {
    let found = document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<T>().ok());
    if found.is_none() {
        log::debug!("{selector} not found");
    }
    found
}

fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Every element the deck reads or writes.
pub struct DomTargets {
    pub body: HtmlElement,
    pub slides: Option<HtmlElement>,
    pub sections: Vec<Option<HtmlElement>>,
    pub roadmap_track: Option<HtmlElement>,
    pub stages: Vec<Element>,
    pub stage_dots: Vec<Element>,
    pub jobs_track: Option<HtmlElement>,
    pub jobs_groups: usize,
    pub jobs_dots: Vec<Element>,
    pub jobs_prev: Option<HtmlButtonElement>,
    pub jobs_next: Option<HtmlButtonElement>,
    pub section_prev: Option<HtmlElement>,
    pub section_next: Option<HtmlElement>,
    pub loading_screen: Option<HtmlElement>,
}

impl DomTargets {
    pub fn bind(document: &Document, config: &NavConfig) -> Result<Self> {
        let body = document.body().ok_or(DeckError::NoBody)?;
        let sections = config
            .sections
            .iter()
            .map(|selector| query::<HtmlElement>(document, selector))
            .collect();

        Ok(Self {
            body,
            slides: query(document, SLIDES_WRAPPER),
            sections,
            roadmap_track: query(document, ROADMAP_TRACK),
            stages: query_all(document, ROADMAP_STAGES),
            stage_dots: query_all(document, ROADMAP_DOTS),
            jobs_track: query(document, JOBS_TRACK),
            jobs_groups: query_all(document, JOBS_PAGES).len(),
            jobs_dots: query_all(document, JOBS_DOTS),
            jobs_prev: query(document, JOBS_PREV),
            jobs_next: query(document, JOBS_NEXT),
            section_prev: query(document, SECTION_PREV),
            section_next: query(document, SECTION_NEXT),
            loading_screen: query(document, LOADING_SCREEN),
        })
    }

    /// Counts the engine indexes into.
    pub fn shape(&self, config: &NavConfig) -> DeckShape {
        DeckShape {
            sections: self.sections.len(),
            stages: self.stages.len(),
            roadmap_section: config.roadmap_section,
            jobs_section: config.jobs_section,
            jobs: JobsLayout::new(self.jobs_groups, config.jobs_items_per_group),
        }
    }
}

fn set_style(el: &HtmlElement, property: &str, value: &str) {
    if let Err(e) = el.style().set_property(property, value) {
        log::debug!("style {property}={value} failed: {e:?}");
    }
}

fn toggle_class(el: &Element, class: &str, on: bool) {
    if let Err(e) = el.class_list().toggle_with_force(class, on) {
        log::debug!("class {class} toggle failed: {e:?}");
    }
}

fn set_attribute(el: &Element, name: &str, value: &str) {
    if let Err(e) = el.set_attribute(name, value) {
        log::debug!("attribute {name}={value} failed: {e:?}");
    }
}

/// Executes [`RenderOp`]s against the bound elements.
pub struct DomRenderer {
    targets: DomTargets,
}

impl DomRenderer {
    pub fn new(targets: DomTargets) -> Self {
        Self { targets }
    }

    pub fn targets(&self) -> &DomTargets {
        &self.targets
    }

    /// Hint the compositor before the first transform.
    pub fn prepare(&self) {
        let tracks = [
            &self.targets.slides,
            &self.targets.roadmap_track,
            &self.targets.jobs_track,
        ];
        for track in tracks.into_iter().flatten() {
            set_style(track, "will-change", "transform");
        }
        set_style(&self.targets.body, "overflow", "hidden");
    }

    pub fn apply_all(&self, ops: &[RenderOp]) {
        for op in ops {
            self.apply(op);
        }
    }

    pub fn apply(&self, op: &RenderOp) {
        let t = &self.targets;
        match *op {
            RenderOp::SetOffset { track, offset } => {
                let el = match track {
                    Track::Sections => &t.slides,
                    Track::Roadmap => &t.roadmap_track,
                    Track::Jobs => &t.jobs_track,
                };
                if let Some(el) = el {
                    set_style(el, "transform", &track.transform(offset));
                }
            }
            RenderOp::SetActive { group, index } => {
                let (members, class) = match group {
                    Group::Stages => (&t.stages, "is-active"),
                    Group::StageDots => (&t.stage_dots, "active"),
                    Group::JobsDots => (&t.jobs_dots, "active"),
                };
                for (i, el) in members.iter().enumerate() {
                    toggle_class(el, class, i == index);
                    if group == Group::JobsDots {
                        let selected = if i == index { "true" } else { "false" };
                        set_attribute(el, "aria-selected", selected);
                    }
                }
            }
            RenderOp::SetDisabled { button, disabled } => {
                let el = match button {
                    Button::JobsPrev => &t.jobs_prev,
                    Button::JobsNext => &t.jobs_next,
                };
                if let Some(el) = el {
                    el.set_disabled(disabled);
                }
            }
            RenderOp::Animating(on) => toggle_class(&t.body, "is-animating", on),
            RenderOp::Mode(mode) => {
                for m in [LayoutMode::Grouped, LayoutMode::Compact] {
                    toggle_class(&t.body, m.body_class(), m == mode);
                }
                let hidden = !mode.shows_section_buttons();
                for el in [&t.section_prev, &t.section_next].into_iter().flatten() {
                    el.set_hidden(hidden);
                }
            }
            RenderOp::FocusSection(index) => {
                if let Some(Some(section)) = t.sections.get(index) {
                    if let Err(e) = section.focus() {
                        log::debug!("focus section {index} failed: {e:?}");
                    }
                }
            }
        }
    }

    pub fn show_loader(&self) {
        if let Some(loader) = &self.targets.loading_screen {
            set_style(loader, "display", "flex");
        }
    }

    /// Fade the loading screen out, then take it out of the layout.
    pub fn hide_loader(&self, fade_ms: u32) {
        let Some(loader) = self.targets.loading_screen.clone() else {
            return;
        };
        toggle_class(&loader, "hidden", true);
        Timeout::new(fade_ms, move || set_style(&loader, "display", "none")).forget();
    }
}
