//! Modal dialogs: open/close, Escape handling, and focus return.
//!
//! Only one modal is open at a time. Opening remembers what had focus and
//! closing hands it back; focus is not trapped inside the dialog.

#[cfg(test)]
#[path = "modal_test.rs"]
mod modal_test;

pub const OPEN_CLASS: &str = "isOpen";
pub const BODY_OPEN_CLASS: &str = "modalOpen";
pub const CONTAINER_SELECTOR: &str = ".modalContainer";
pub const OPENER_SELECTOR: &str = "[data-modal-target]";
pub const OPENER_ATTRIBUTE: &str = "data-modal-target";
pub const CLOSE_SELECTOR: &str = "[data-modal-close]";

/// Keys that dismiss the open modal.
pub fn is_dismiss_key(key: &str) -> bool {
    key == "Escape"
}

/// Which modal is open and where focus goes back to.
///
/// `M` is the modal handle and `F` the focus target; both are DOM elements
/// in the browser and plain values in tests.
#[derive(Clone, Debug)]
pub struct ModalState<M, F> {
    open: Option<M>,
    restore_focus: Option<F>,
}

impl<M, F> Default for ModalState<M, F> {
    fn default() -> Self {
        Self { open: None, restore_focus: None }
    }
}

impl<M, F> ModalState<M, F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `modal` as open. `focused` is whatever had focus before; a
    /// modal opened over another one keeps the newer focus target.
    pub fn open(&mut self, modal: M, focused: Option<F>) {
        self.open = Some(modal);
        self.restore_focus = focused;
    }

    /// Forget the open modal and return the element to refocus.
    pub fn close(&mut self) -> Option<F> {
        self.open = None;
        self.restore_focus.take()
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn current(&self) -> Option<&M> {
        self.open.as_ref()
    }
}

#[cfg(feature = "hydrate")]
pub use dom_modal::ModalController;

#[cfg(feature = "hydrate")]
mod dom_modal {
    use std::cell::RefCell;

    use wasm_bindgen::JsCast;
    use web_sys::{Document, Element, HtmlElement};

    use super::{BODY_OPEN_CLASS, CONTAINER_SELECTOR, ModalState, OPEN_CLASS};
    use crate::util::dom::{self, OkOrLog as _, warn_on_err};

    /// Shows and hides `.modalContainer` elements on one document.
    pub struct ModalController {
        document: Document,
        state: RefCell<ModalState<Element, HtmlElement>>,
    }

    impl ModalController {
        pub fn new(document: Document) -> Self {
            Self { document, state: RefCell::new(ModalState::new()) }
        }

        pub fn open(&self, modal: &Element) {
            let focused = self
                .document
                .active_element()
                .and_then(|el| el.dyn_into::<HtmlElement>().ok_or_log());
            self.state.borrow_mut().open(modal.clone(), focused);
            dom::add_class(modal, OPEN_CLASS);
            dom::set_attribute(modal, "aria-hidden", "false");
            if let Some(body) = self.document.body() {
                dom::add_class(&body, BODY_OPEN_CLASS);
            }
        }

        pub fn close(&self, modal: &Element) {
            dom::remove_class(modal, OPEN_CLASS);
            dom::set_attribute(modal, "aria-hidden", "true");
            if let Some(body) = self.document.body() {
                dom::remove_class(&body, BODY_OPEN_CLASS);
            }
            let restore = self.state.borrow_mut().close();
            if let Some(target) = restore {
                warn_on_err(target.focus(), "focus");
            }
        }

        /// Close whichever modal is currently shown, if any.
        pub fn close_open(&self) {
            let selector = format!("{CONTAINER_SELECTOR}.{OPEN_CLASS}");
            if let Some(modal) = dom::query(&self.document, &selector) {
                self.close(&modal);
            }
        }

        /// Close the modal enclosing `inner`.
        pub fn close_enclosing(&self, inner: &Element) {
            if let Some(modal) = dom::closest(inner, CONTAINER_SELECTOR) {
                self.close(&modal);
            }
        }
    }
}
