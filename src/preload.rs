//! Best-effort image preloading before the first render.
//!
//! Load errors count the same as loads: the goal is only to warm the cache
//! before the loading screen goes away, never to block on a broken asset.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use web_sys::HtmlImageElement;

use crate::error::Result;

/// Why preloading finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    AllSettled,
    TimedOut,
}

/// Counts settled images and reports completion exactly once.
///
/// Nothing completes before [`PreloadTracker::begin`]: a preload that failed
/// while its images were still being created never reports.
#[derive(Debug)]
pub struct PreloadTracker {
    total: usize,
    settled: usize,
    started: bool,
    done: bool,
}

impl PreloadTracker {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            settled: 0,
            started: false,
            done: false,
        }
    }

    /// Every request is out. Completes immediately when nothing is pending.
    pub fn begin(&mut self) -> Option<Completion> {
        self.started = true;
        if self.settled >= self.total {
            return self.complete(Completion::AllSettled);
        }
        None
    }

    /// One image loaded or failed.
    pub fn settle(&mut self) -> Option<Completion> {
        self.settled += 1;
        if self.started && self.settled >= self.total {
            return self.complete(Completion::AllSettled);
        }
        None
    }

    pub fn expire(&mut self) -> Option<Completion> {
        if !self.started {
            return None;
        }
        self.complete(Completion::TimedOut)
    }

    #[cfg(test)]
    pub fn is_done(&self) -> bool {
        self.done
    }

    fn complete(&mut self, how: Completion) -> Option<Completion> {
        if self.done {
            return None;
        }
        self.done = true;
        Some(how)
    }
}

type DoneFn = Box<dyn FnOnce(Completion)>;

struct Preload {
    tracker: PreloadTracker,
    on_done: Option<DoneFn>,
    timeout: Option<Timeout>,
    // Kept alive until the browser has fetched them.
    images: Vec<HtmlImageElement>,
}

fn finish(shared: &Rc<RefCell<Preload>>, completion: Option<Completion>) {
    let Some(completion) = completion else {
        return;
    };
    let on_done = {
        let mut preload = shared.borrow_mut();
        if completion == Completion::AllSettled {
            if let Some(timeout) = preload.timeout.take() {
                timeout.cancel();
            }
        }
        preload.images.clear();
        preload.on_done.take()
    };
    match completion {
        Completion::AllSettled => log::info!("assets preloaded"),
        Completion::TimedOut => log::info!("asset preload timed out; continuing"),
    }
    if let Some(on_done) = on_done {
        on_done(completion);
    }
}

/// Request every URL and call `on_done` once they have all settled or
/// `timeout_ms` has elapsed, whichever happens first.
///
/// Fails without ever calling `on_done` if an image element cannot be
/// created; the timeout is armed only once every request is out.
pub fn preload_images<F>(urls: &[String], timeout_ms: u32, on_done: F) -> Result<()>
where
    F: FnOnce(Completion) + 'static,
{
    let shared = Rc::new(RefCell::new(Preload {
        tracker: PreloadTracker::new(urls.len()),
        on_done: Some(Box::new(on_done)),
        timeout: None,
        images: Vec::with_capacity(urls.len()),
    }));

    for url in urls {
        let img = HtmlImageElement::new()?;
        for kind in ["load", "error"] {
            let shared = shared.clone();
            // Each image fires exactly one of the two; the listeners live as
            // long as the page.
            EventListener::once(&img, kind, move |_| {
                let completion = shared.borrow_mut().tracker.settle();
                finish(&shared, completion);
            })
            .forget();
        }
        img.set_src(url);
        shared.borrow_mut().images.push(img);
    }

    let immediate = shared.borrow_mut().tracker.begin();
    if immediate.is_some() {
        finish(&shared, immediate);
        return Ok(());
    }

    let timeout = {
        let shared = shared.clone();
        Timeout::new(timeout_ms, move || {
            let completion = shared.borrow_mut().tracker.expire();
            finish(&shared, completion);
        })
    };
    shared.borrow_mut().timeout = Some(timeout);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_completes_before_requests_are_out() {
        let mut tracker = PreloadTracker::new(2);
        assert_eq!(tracker.settle(), None);
        assert_eq!(tracker.expire(), None);
        assert!(!tracker.is_done());
    }

    #[test]
    fn begin_completes_when_everything_already_settled() {
        let mut tracker = PreloadTracker::new(1);
        assert_eq!(tracker.settle(), None);
        assert_eq!(tracker.begin(), Some(Completion::AllSettled));
    }

    #[test]
    fn empty_list_completes_immediately() {
        let mut tracker = PreloadTracker::new(0);
        assert_eq!(tracker.begin(), Some(Completion::AllSettled));
        assert_eq!(tracker.expire(), None);
    }

    #[test]
    fn completes_when_every_image_settles() {
        let mut tracker = PreloadTracker::new(3);
        assert_eq!(tracker.begin(), None);
        assert_eq!(tracker.settle(), None);
        assert_eq!(tracker.settle(), None);
        assert_eq!(tracker.settle(), Some(Completion::AllSettled));
        assert!(tracker.is_done());
    }

    #[test]
    fn timeout_wins_over_stragglers() {
        let mut tracker = PreloadTracker::new(2);
        tracker.begin();
        tracker.settle();
        assert_eq!(tracker.expire(), Some(Completion::TimedOut));
        assert_eq!(tracker.settle(), None);
    }

    #[test]
    fn late_timeout_is_ignored() {
        let mut tracker = PreloadTracker::new(1);
        tracker.begin();
        assert_eq!(tracker.settle(), Some(Completion::AllSettled));
        assert_eq!(tracker.expire(), None);
    }
}
