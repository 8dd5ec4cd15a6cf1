//! Effects triggered by elements entering the viewport.
//!
//! - `.fade-in` elements get `appear` on their first intersection and are
//!   then unobserved.
//! - The `.stats` block starts every `.counter[data-target]` count-up the
//!   first time it becomes visible.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo::console;
use gloo::timers::callback::Interval;
use js_sys::Array;
use trattoria_core::counter::{CounterAnimation, DEFAULT_DURATION};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, Window,
};
use web_time::Duration;

use crate::Page;
use crate::dom;

pub const APPEAR_CLASS: &str = "appear";
const FADE_THRESHOLD: f64 = 0.5;
const FADE_ROOT_MARGIN: &str = "0px 0px -100px 0px";

type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

/// Observers and their callbacks, kept alive for the page's lifetime.
#[derive(Default)]
struct Observers {
    live: RefCell<Vec<(IntersectionObserver, ObserverCallback)>>,
}

impl Observers {
    fn observe(
        &self,
        targets: &[Element],
        init: Option<&IntersectionObserverInit>,
        mut on_visible: impl FnMut(&Element, &IntersectionObserver) + 'static,
    ) {
        if targets.is_empty() {
            return;
        }

        let callback: ObserverCallback =
            Closure::new(move |entries: Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    if entry.is_intersecting() {
                        on_visible(&entry.target(), &observer);
                    }
                }
            });

        let observer = match init {
            Some(init) => {
                IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), init)
            }
            None => IntersectionObserver::new(callback.as_ref().unchecked_ref()),
        };
        let observer = match observer {
            Ok(observer) => observer,
            Err(err) => {
                console::error!("trattoria: IntersectionObserver unavailable", err);
                return;
            }
        };

        for target in targets {
            observer.observe(target);
        }
        self.live.borrow_mut().push((observer, callback));
    }
}

thread_local! {
    static OBSERVERS: Observers = Observers::default();
}

/// Interval delay in whole milliseconds for a counter step.
#[must_use]
pub fn interval_millis(step: Duration) -> u32 {
    u32::try_from(step.as_millis()).unwrap_or(u32::MAX)
}

/// Start one counter's count-up. A zero target shows 0 at once.
fn run_counter(window: &Window, element: Element, animation: CounterAnimation) {
    let Some(step) = animation.step_delay() else {
        element.set_text_content(Some("0"));
        return;
    };

    let steps = Cell::new(0_u64);
    let handle = Rc::new(Cell::new(None::<i32>));
    let stop = Rc::clone(&handle);
    let window = window.clone();

    let interval = Interval::new(interval_millis(step), move || {
        let next = steps.get() + 1;
        steps.set(next);
        element.set_text_content(Some(&animation.value_after(next).to_string()));
        if animation.is_finished(next)
            && let Some(id) = stop.get()
        {
            window.clear_interval_with_handle(id);
        }
    });

    // The interval clears itself once finished, so its closure is handed to JS
    let id = interval.forget();
    handle.set(id.as_f64().map(|id| id as i32));
}

/// Observe fade-in elements and the stats block.
pub fn install(page: &Rc<Page>) {
    let document = &page.document;

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(FADE_THRESHOLD));
    init.set_root_margin(FADE_ROOT_MARGIN);
    let fade_targets = dom::query_all(document, ".fade-in");

    let stats = dom::query_all(document, ".stats");
    let counters: Vec<(Element, CounterAnimation)> = dom::query_all(document, ".counter")
        .into_iter()
        .filter_map(|element| {
            let raw = element.get_attribute("data-target")?;
            let animation = CounterAnimation::from_attribute(&raw, DEFAULT_DURATION)?;
            Some((element, animation))
        })
        .collect();

    let started = Cell::new(false);
    let window = page.window.clone();
    let pending = RefCell::new(counters);

    OBSERVERS.with(|observers| {
        observers.observe(&fade_targets, Some(&init), |element, observer| {
            dom::set_class(element, APPEAR_CLASS, true);
            observer.unobserve(element);
        });

        observers.observe(&stats, None, move |_element, observer| {
            if started.replace(true) {
                return;
            }
            observer.disconnect();
            for (element, animation) in pending.borrow_mut().drain(..) {
                run_counter(&window, element, animation);
            }
        });
    });
}
