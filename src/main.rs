mod config;
mod dom;
mod error;
mod input;
mod layout;
mod logging;
mod nav;
mod preload;
mod time;

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, KeyboardEvent, TouchEvent, WheelEvent, Window};

use config::NavConfig;
use dom::{DomRenderer, DomTargets};
use error::{DeckError, Result};
use input::{InputEvent, NavKey};
use nav::actions::Control;
use nav::state::Viewport;
use nav::Navigator;
use time::PerformanceClock;

/// Engine plus the DOM it drives, shared by every listener.
struct App {
    nav: Navigator<PerformanceClock>,
    renderer: DomRenderer,
    /// Single pending wake-up for the engine's next deadline.
    wake: Option<Timeout>,
}

type SharedApp = Rc<RefCell<App>>;

fn viewport(window: &Window) -> Viewport {
    let read = |v: std::result::Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
    };
    Viewport {
        width: read(window.inner_width()),
        height: read(window.inner_height()),
    }
}

/// Feed one event to the engine and render the outcome.
/// Returns whether the browser default should be suppressed.
fn dispatch(app: &SharedApp, event: InputEvent) -> bool {
    let consumed = {
        let mut a = app.borrow_mut();
        let handled = a.nav.handle(&event);
        a.renderer.apply_all(&handled.ops);
        handled.consumed
    };
    arm_wake(app);
    consumed
}

/// Replace the pending wake-up with one for the current next deadline.
fn arm_wake(app: &SharedApp) {
    let delay = app.borrow().nav.next_delay_ms();
    let wake = delay.map(|ms| {
        let app = app.clone();
        Timeout::new(ms, move || {
            {
                let a = &mut *app.borrow_mut();
                let ops = a.nav.tick();
                a.renderer.apply_all(&ops);
            }
            arm_wake(&app);
        })
    });
    app.borrow_mut().wake = wake;
}

fn on_click(app: &SharedApp, el: &Element, control: Control, listeners: &mut Vec<EventListener>) {
    let app = app.clone();
    listeners.push(EventListener::new(el, "click", move |event: &Event| {
        event.prevent_default();
        dispatch(&app, InputEvent::Click(control));
    }));
}

fn install_listeners(app: &SharedApp, window: &Window) -> Vec<EventListener> {
    let mut listeners = Vec::new();

    let a = app.clone();
    listeners.push(EventListener::new_with_options(
        window,
        "wheel",
        EventListenerOptions::enable_prevent_default(),
        move |event: &Event| {
            let Some(event) = event.dyn_ref::<WheelEvent>() else {
                return;
            };
            if dispatch(&a, InputEvent::Wheel { delta_y: event.delta_y() }) {
                event.prevent_default();
                event.stop_propagation();
            }
        },
    ));

    let a = app.clone();
    listeners.push(EventListener::new_with_options(
        window,
        "keydown",
        EventListenerOptions::enable_prevent_default(),
        move |event: &Event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let Some(key) = NavKey::from_key_name(&event.key()) else {
                return;
            };
            if dispatch(&a, InputEvent::Key(key)) {
                event.prevent_default();
            }
        },
    ));

    let a = app.clone();
    listeners.push(EventListener::new(window, "touchstart", move |event: &Event| {
        let Some(touch) = event
            .dyn_ref::<TouchEvent>()
            .and_then(|e| e.touches().get(0))
        else {
            return;
        };
        dispatch(
            &a,
            InputEvent::TouchStart {
                x: touch.client_x() as f64,
                y: touch.client_y() as f64,
            },
        );
    }));

    let a = app.clone();
    listeners.push(EventListener::new(window, "touchend", move |event: &Event| {
        let Some(touch) = event
            .dyn_ref::<TouchEvent>()
            .and_then(|e| e.changed_touches().get(0))
        else {
            return;
        };
        dispatch(
            &a,
            InputEvent::TouchEnd {
                x: touch.client_x() as f64,
                y: touch.client_y() as f64,
            },
        );
    }));

    let a = app.clone();
    let w = window.clone();
    listeners.push(EventListener::new(window, "resize", move |_| {
        let Viewport { width, height } = viewport(&w);
        dispatch(&a, InputEvent::Resize { width, height });
    }));

    let targets = {
        let app = app.borrow();
        let t = app.renderer.targets();
        (
            t.stage_dots.clone(),
            t.jobs_dots.clone(),
            t.jobs_prev.clone(),
            t.jobs_next.clone(),
            t.section_prev.clone(),
            t.section_next.clone(),
        )
    };
    let (stage_dots, jobs_dots, jobs_prev, jobs_next, section_prev, section_next) = targets;

    for (i, dot) in stage_dots.iter().enumerate() {
        on_click(app, dot, Control::StageDot(i), &mut listeners);
    }
    for (i, dot) in jobs_dots.iter().enumerate() {
        on_click(app, dot, Control::JobsDot(i), &mut listeners);
    }
    if let Some(el) = &jobs_prev {
        on_click(app, el, Control::JobsPrev, &mut listeners);
    }
    if let Some(el) = &jobs_next {
        on_click(app, el, Control::JobsNext, &mut listeners);
    }
    if let Some(el) = &section_prev {
        on_click(app, el, Control::SectionPrev, &mut listeners);
    }
    if let Some(el) = &section_next {
        on_click(app, el, Control::SectionNext, &mut listeners);
    }

    listeners
}

fn start(config: NavConfig, renderer: DomRenderer, window: Window) {
    let shape = renderer.targets().shape(&config);
    let viewport = viewport(&window);
    log::info!(
        "starting: {} sections, {} stages, {} job groups, {}x{}",
        shape.sections,
        shape.stages,
        shape.jobs.groups,
        viewport.width,
        viewport.height
    );

    let nav = Navigator::new(shape, config.timing(), viewport, PerformanceClock::new());
    let app = Rc::new(RefCell::new(App {
        nav,
        renderer,
        wake: None,
    }));

    {
        let a = &mut *app.borrow_mut();
        a.renderer.prepare();
        let ops = a.nav.start();
        a.renderer.apply_all(&ops);
    }

    // Listeners stay installed for the lifetime of the page.
    for listener in install_listeners(&app, &window) {
        listener.forget();
    }
}

/// Load config, bind the document and start once assets are warm.
fn boot(window: Window, document: Document) -> Result<()> {
    let config = NavConfig::load(&document);
    logging::init(logging::parse_level(&config.log_level));

    let renderer = DomRenderer::new(DomTargets::bind(&document, &config)?);
    renderer.show_loader();

    let images = config.preload_images.clone();
    let timeout_ms = config.preload_timeout_ms;
    preload::preload_images(&images, timeout_ms, move |_| {
        renderer.hide_loader(config.loader_fade_ms);
        start(config, renderer, window);
    })
}

/// `document.readyState` before `DOMContentLoaded` has fired.
fn still_parsing(ready_state: &str) -> bool {
    ready_state == "loading"
}

fn main() -> Result<()> {
    console_error_panic_hook::set_once();
    logging::init(log::LevelFilter::Info);

    let window = web_sys::window().ok_or(DeckError::NoWindow)?;
    let document = window.document().ok_or(DeckError::NoDocument)?;

    if still_parsing(&document.ready_state()) {
        let doc = document.clone();
        EventListener::once(&document, "DOMContentLoaded", move |_| {
            if let Err(e) = boot(window, doc) {
                log::error!("{e}");
            }
        })
        .forget();
        return Ok(());
    }

    boot(window, document)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn waits_only_while_the_document_is_parsing() {
        assert!(still_parsing("loading"));
        assert!(!still_parsing("interactive"));
        assert!(!still_parsing("complete"));
    }
}
