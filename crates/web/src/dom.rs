//! Small DOM helpers.

use gloo::console;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

/// First element matching `selector`.
pub fn query(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

/// First element matching `selector` as an `HtmlElement`.
pub fn query_html(document: &Document, selector: &str) -> Option<HtmlElement> {
    query(document, selector).and_then(|element| element.dyn_into().ok())
}

/// Every element matching `selector`, in document order.
pub fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(nodes) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|index| nodes.get(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Add or remove `class` on `element`.
pub fn set_class(element: &Element, class: &str, on: bool) {
    if let Err(err) = element.class_list().toggle_with_force(class, on) {
        console::error!("trattoria: class toggle failed", err);
    }
}

/// Set one inline style property.
pub fn set_style(element: &HtmlElement, property: &str, value: &str) {
    if let Err(err) = element.style().set_property(property, value) {
        console::error!("trattoria: style update failed", err);
    }
}
