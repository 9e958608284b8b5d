//! Thin `web-sys` helpers shared by the hydrate-only page glue.
//!
//! DOM mutators return `Result<_, JsValue>` for failures that are never
//! actionable on this page (a detached node, a frozen class list). They are
//! funneled through [`warn_on_err`] so nothing is dropped silently.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, Window};

/// Best-effort string form of a thrown JS value.
pub fn js_error_message(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

/// Log a failed DOM call at `warn` level.
pub fn warn_on_err<T>(result: Result<T, JsValue>, what: &str) {
    if let Err(e) = result {
        log::warn!("{what} failed: {}", js_error_message(&e));
    }
}

pub fn window() -> Option<Window> {
    web_sys::window()
}

pub fn document() -> Option<Document> {
    window().and_then(|w| w.document())
}

/// All elements matching `selector`, in document order.
pub fn query_all(root: &Document, selector: &str) -> Vec<Element> {
    let list = match root.query_selector_all(selector) {
        Ok(list) => list,
        Err(e) => {
            log::warn!("bad selector {selector}: {}", js_error_message(&e));
            return Vec::new();
        }
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok_or_log())
        .collect()
}

/// First element matching `selector` under `root`.
pub fn query_in(root: &Element, selector: &str) -> Option<Element> {
    match root.query_selector(selector) {
        Ok(found) => found,
        Err(e) => {
            log::warn!("bad selector {selector}: {}", js_error_message(&e));
            None
        }
    }
}

/// First element matching `selector` in the document.
pub fn query(doc: &Document, selector: &str) -> Option<Element> {
    match doc.query_selector(selector) {
        Ok(found) => found,
        Err(e) => {
            log::warn!("bad selector {selector}: {}", js_error_message(&e));
            None
        }
    }
}

/// Nearest ancestor-or-self of the event target matching `selector`.
pub fn closest_from_event(event: &web_sys::Event, selector: &str) -> Option<Element> {
    let target = event.target()?.dyn_into::<Element>().ok_or_log()?;
    closest(&target, selector)
}

pub fn closest(el: &Element, selector: &str) -> Option<Element> {
    match el.closest(selector) {
        Ok(found) => found,
        Err(e) => {
            log::warn!("bad selector {selector}: {}", js_error_message(&e));
            None
        }
    }
}

pub fn add_class(el: &Element, class: &str) {
    warn_on_err(el.class_list().add_1(class), "classList.add");
}

pub fn remove_class(el: &Element, class: &str) {
    warn_on_err(el.class_list().remove_1(class), "classList.remove");
}

pub fn set_class(el: &Element, class: &str, on: bool) {
    if on {
        add_class(el, class);
    } else {
        remove_class(el, class);
    }
}

pub fn set_attribute(el: &Element, name: &str, value: &str) {
    warn_on_err(el.set_attribute(name, value), "setAttribute");
}

pub fn remove_attribute(el: &Element, name: &str) {
    warn_on_err(el.remove_attribute(name), "removeAttribute");
}

pub fn set_display(el: &Element, value: &str) {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        warn_on_err(html.style().set_property("display", value), "style.display");
    }
}

/// Blocking browser alert.
pub fn alert(message: &str) {
    if let Some(w) = window() {
        warn_on_err(w.alert_with_message(message), "alert");
    }
}

/// Blocking browser confirm; a failed dialog counts as "cancel".
pub fn confirm(message: &str) -> bool {
    window()
        .map(|w| w.confirm_with_message(message))
        .is_some_and(|answer| matches!(answer, Ok(true)))
}

pub fn reload() {
    if let Some(w) = window() {
        warn_on_err(w.location().reload(), "location.reload");
    }
}

/// Log a failed downcast and turn it into `None`.
pub trait OkOrLog<T> {
    fn ok_or_log(self) -> Option<T>;
}

impl<T, E: std::fmt::Debug> OkOrLog<T> for Result<T, E> {
    fn ok_or_log(self) -> Option<T> {
        match self {
            Ok(v) => Some(v),
            Err(e) => {
                log::debug!("unexpected node type: {e:?}");
                None
            }
        }
    }
}
