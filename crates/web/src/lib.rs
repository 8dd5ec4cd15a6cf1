//! Trattoria Web - browser client.
//!
//! Loaded by `base.html` as a wasm module. It owns the page effects that
//! have no server round trip:
//! - [`scroll`] - header style, back-to-top, active nav link and hero parallax
//! - [`overlays`] - mobile nav and cart panel toggles with body scroll lock
//! - [`reveal`] - fade-in on first intersection and the stats count-up
//!
//! The cart itself is server-rendered and driven by HTMX; nothing here
//! touches cart state.

#![cfg_attr(not(test), forbid(unsafe_code))]

mod dom;
pub mod overlays;
pub mod reveal;
pub mod scroll;

use std::cell::RefCell;
use std::rc::Rc;

use gloo::console;
use gloo::events::EventListener;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement, Window};

thread_local! {
    static PAGE: RefCell<Option<Rc<Page>>> = const { RefCell::new(None) };
}

/// Handles to the document shared by every effect.
pub struct Page {
    window: Window,
    document: Document,
    body: HtmlElement,
    listeners: RefCell<Vec<EventListener>>,
}

impl Page {
    fn new() -> Option<Rc<Self>> {
        let window = web_sys::window()?;
        let document = window.document()?;
        let body = document.body()?;
        Some(Rc::new(Self {
            window,
            document,
            body,
            listeners: RefCell::new(Vec::new()),
        }))
    }

    fn keep(&self, listener: EventListener) {
        self.listeners.borrow_mut().push(listener);
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    let Some(page) = Page::new() else {
        console::error!("trattoria: no window, document or body");
        return;
    };

    scroll::install(&page);
    overlays::install(&page);
    reveal::install(&page);

    PAGE.with(|slot| *slot.borrow_mut() = Some(page));
}
