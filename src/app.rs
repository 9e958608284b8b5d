//! Page boot: build the shared state once and wire every component to the
//! document.

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, HtmlFormElement, KeyboardEvent};

use crate::components::modal::{self, ModalController};
use crate::components::{dish_filter, dish_form, favorite_controls, image_choice};
use crate::config::{self, DishFormConfig};
use crate::exports;
use crate::state::favorites::FavoritesStore;
use crate::util::dom::{self, OkOrLog as _, warn_on_err};
use crate::util::storage::LocalStorage;

/// Mount now, or once the document has finished parsing.
pub fn boot() {
    let Some(document) = dom::document() else {
        log::error!("no document; page glue not installed");
        return;
    };
    if document.ready_state() == "loading" {
        let doc = document.clone();
        let on_ready = Closure::once_into_js(move || mount(&doc));
        warn_on_err(
            document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref()),
            "addEventListener(DOMContentLoaded)",
        );
    } else {
        mount(&document);
    }
}

fn mount(document: &Document) {
    let page = config::load_from_document();
    let favorites_config = Rc::new(page.favorites);
    let dish_config = Rc::new(page.dish_form);

    let mut store = FavoritesStore::open(LocalStorage, &favorites_config);
    let surface = Rc::new(favorite_controls::DomSurface::new(
        document.clone(),
        Rc::clone(&favorites_config),
    ));
    favorite_controls::attach(&mut store, surface, Rc::clone(&favorites_config));
    let store = Rc::new(store);
    exports::register(Rc::clone(&store));
    favorite_controls::install_click_listener(document, store, favorites_config);

    let modals = Rc::new(ModalController::new(document.clone()));
    install_click_delegation(document, Rc::clone(&dish_config), Rc::clone(&modals));
    install_escape(document, Rc::clone(&modals));
    image_choice::install(document, &dish_config);
    dish_filter::install(document, &dish_config);
    dish_form::install_submit(document, dish_config, modals);
}

/// Openers reset the form inside their modal to "create" mode first.
fn open_from(document: &Document, opener: &Element, config: &DishFormConfig, modals: &ModalController) {
    let Some(target) = opener.get_attribute(modal::OPENER_ATTRIBUTE) else {
        return;
    };
    let Some(container) = dom::query(document, &target) else {
        log::warn!("modal {target} not found");
        return;
    };
    if let Some(form) = dom::query_in(&container, "form").and_then(|el| el.dyn_into::<HtmlFormElement>().ok_or_log()) {
        form.reset();
        dom::remove_attribute(&form, &config.edit_attribute);
        image_choice::apply(document, config);
    }
    modals.open(&container);
}

fn install_click_delegation(document: &Document, config: Rc<DishFormConfig>, modals: Rc<ModalController>) {
    let doc = document.clone();
    let on_click = Closure::<dyn FnMut(web_sys::Event)>::new(move |ev: web_sys::Event| {
        if let Some(opener) = dom::closest_from_event(&ev, modal::OPENER_SELECTOR) {
            ev.prevent_default();
            open_from(&doc, &opener, &config, &modals);
            return;
        }
        if let Some(close) = dom::closest_from_event(&ev, modal::CLOSE_SELECTOR) {
            modals.close_enclosing(&close);
            return;
        }
        dish_form::handle_click(&doc, &ev, &config, &modals);
    });
    warn_on_err(
        document.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref()),
        "addEventListener(click)",
    );
    on_click.forget();
}

fn install_escape(document: &Document, modals: Rc<ModalController>) {
    let on_key = Closure::<dyn FnMut(KeyboardEvent)>::new(move |ev: KeyboardEvent| {
        if modal::is_dismiss_key(&ev.key()) {
            modals.close_open();
        }
    });
    warn_on_err(
        document.add_event_listener_with_callback("keydown", on_key.as_ref().unchecked_ref()),
        "addEventListener(keydown)",
    );
    on_key.forget();
}
