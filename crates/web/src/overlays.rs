//! Mobile nav and cart panel toggles.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use trattoria_core::toggle::{ACTIVE_CLASS, BODY_NO_SCROLL_CLASS, OverlayKind, PageOverlays};
use web_sys::{Element, Event};

use crate::Page;
use crate::dom;

struct OverlayEffects {
    page: Rc<Page>,
    state: RefCell<PageOverlays>,
    hamburger: Option<Element>,
    nav_menu: Option<Element>,
    cart_panel: Option<Element>,
    cart_overlay: Option<Element>,
}

impl OverlayEffects {
    fn toggle(&self, kind: OverlayKind) {
        self.state.borrow_mut().toggle(kind);
        self.render();
    }

    fn close(&self, kind: OverlayKind) {
        if self.state.borrow_mut().close(kind) {
            self.render();
        }
    }

    fn render(&self) {
        let state = self.state.borrow();
        let nav_open = state.is_open(OverlayKind::NavMenu);
        let cart_open = state.is_open(OverlayKind::CartPanel);

        for element in [&self.hamburger, &self.nav_menu].into_iter().flatten() {
            dom::set_class(element, ACTIVE_CLASS, nav_open);
        }
        for element in [&self.cart_panel, &self.cart_overlay].into_iter().flatten() {
            dom::set_class(element, ACTIVE_CLASS, cart_open);
        }
        dom::set_class(&self.page.body, BODY_NO_SCROLL_CLASS, state.scroll_locked());
    }
}

fn on_click(page: &Page, element: &Element, callback: impl FnMut(&Event) + 'static) {
    page.keep(EventListener::new(element, "click", callback));
}

/// Wire the hamburger, nav links, cart icon, close button and overlay.
pub fn install(page: &Rc<Page>) {
    let document = &page.document;
    let effects = Rc::new(OverlayEffects {
        page: Rc::clone(page),
        state: RefCell::new(PageOverlays::new()),
        hamburger: dom::query(document, ".hamburger"),
        nav_menu: dom::query(document, ".nav-menu"),
        cart_panel: dom::query(document, ".cart-panel"),
        cart_overlay: dom::query(document, ".cart-overlay"),
    });

    if let Some(hamburger) = &effects.hamburger {
        let handler = Rc::clone(&effects);
        on_click(page, hamburger, move |_event| {
            handler.toggle(OverlayKind::NavMenu);
        });
    }

    for link in dom::query_all(document, ".nav-link") {
        let handler = Rc::clone(&effects);
        on_click(page, &link, move |_event| {
            handler.close(OverlayKind::NavMenu);
        });
    }

    let cart_toggles = [
        dom::query(document, ".cart-icon"),
        dom::query(document, ".close-cart-btn"),
        effects.cart_overlay.clone(),
    ];
    for element in cart_toggles.iter().flatten() {
        let handler = Rc::clone(&effects);
        on_click(page, element, move |_event| {
            handler.toggle(OverlayKind::CartPanel);
        });
    }
}
