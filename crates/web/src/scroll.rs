//! Scroll-driven page effects.
//!
//! Every `scroll` event goes through a leading-edge [`Debouncer`]; the events
//! that pass are turned into a [`ScrollState`] by the core reactor and
//! applied to the header, back-to-top button, nav links and hero image.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use trattoria_core::debounce::{DEFAULT_WINDOW, Debouncer};
use trattoria_core::scroll::{HeaderStyle, ScrollConfig, ScrollReactor, ScrollState, SectionAnchor};
use trattoria_core::toggle::ACTIVE_CLASS;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlElement, ScrollBehavior, ScrollToOptions};
use web_time::Instant;

use crate::Page;
use crate::dom;

const SECTION_SELECTOR: &str = "main section[id]";

/// Elements the scroll state is rendered onto.
struct ScrollTargets {
    header: Option<Element>,
    back_to_top: Option<HtmlElement>,
    hero_image: Option<HtmlElement>,
    nav_links: Vec<Element>,
}

struct ScrollEffects {
    page: Rc<Page>,
    targets: ScrollTargets,
    reactor: RefCell<ScrollReactor>,
    debouncer: RefCell<Debouncer<f64>>,
}

impl ScrollEffects {
    /// Feed one scroll event through the rate limiter.
    fn on_scroll(&self) {
        let offset = self.page.window.scroll_y().unwrap_or(0.0);
        let fired = self
            .debouncer
            .borrow_mut()
            .on_event(Instant::now(), offset);
        if let Some(offset) = fired {
            self.react(offset);
        }
    }

    fn react(&self, offset: f64) {
        // Sections shift once the menu grid loads; re-measure each pass
        let mut reactor = self.reactor.borrow_mut();
        reactor.set_sections(self.measure_sections());
        let state = reactor.react(offset);
        drop(reactor);
        self.apply(&state);
    }

    fn measure_sections(&self) -> Vec<SectionAnchor> {
        dom::query_all(&self.page.document, SECTION_SELECTOR)
            .into_iter()
            .filter_map(|section| section.dyn_into::<HtmlElement>().ok())
            .map(|section| SectionAnchor::new(section.id(), f64::from(section.offset_top())))
            .collect()
    }

    fn apply(&self, state: &ScrollState) {
        if let Some(header) = &self.targets.header {
            dom::set_class(header, HeaderStyle::SCROLLED_CLASS, state.header.is_scrolled());
        }

        if let Some(button) = &self.targets.back_to_top {
            dom::set_style(button, "visibility", state.back_to_top.visibility());
            dom::set_style(button, "opacity", state.back_to_top.opacity());
        }

        for link in &self.targets.nav_links {
            let href = link.get_attribute("href").unwrap_or_default();
            dom::set_class(link, ACTIVE_CLASS, state.active_link.matches_href(&href));
        }

        if let Some(image) = &self.targets.hero_image {
            dom::set_style(image, "transform", &parallax_transform(state.parallax_offset));
        }
    }
}

/// CSS transform for a parallax offset in pixels.
#[must_use]
pub fn parallax_transform(offset: f64) -> String {
    format!("translateY({offset}px)")
}

/// Wire the scroll listener and the back-to-top button.
pub fn install(page: &Rc<Page>) {
    let document = &page.document;
    let targets = ScrollTargets {
        header: dom::query(document, ".site-header"),
        back_to_top: dom::query_html(document, ".back-to-top"),
        hero_image: dom::query_html(document, ".hero-image"),
        nav_links: dom::query_all(document, ".nav-link"),
    };

    let effects = Rc::new(ScrollEffects {
        page: Rc::clone(page),
        targets,
        reactor: RefCell::new(ScrollReactor::new(ScrollConfig::default(), Vec::new())),
        debouncer: RefCell::new(Debouncer::leading(DEFAULT_WINDOW)),
    });

    // Render the initial state for pages restored mid-scroll
    effects.react(page.window.scroll_y().unwrap_or(0.0));

    let handler = Rc::clone(&effects);
    page.keep(EventListener::new(&page.window, "scroll", move |_event: &Event| {
        handler.on_scroll();
    }));

    if let Some(button) = &effects.targets.back_to_top {
        let window = page.window.clone();
        page.keep(EventListener::new(button, "click", move |_event: &Event| {
            let options = ScrollToOptions::new();
            options.set_top(0.0);
            options.set_behavior(ScrollBehavior::Smooth);
            window.scroll_to_with_scroll_to_options(&options);
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parallax_transform() {
        assert_eq!(parallax_transform(0.0), "translateY(0px)");
        assert_eq!(parallax_transform(30.0), "translateY(30px)");
        assert_eq!(parallax_transform(37.5), "translateY(37.5px)");
    }
}
