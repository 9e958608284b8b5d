//! Dish create/edit form and the per-card edit and delete buttons.
//!
//! The form is posted in the background; on success the page reloads to
//! show the new list, on failure the server message is alerted and the
//! modal stays open. A second submit while one is in flight is not blocked.

#[cfg(test)]
#[path = "dish_form_test.rs"]
mod dish_form_test;

use crate::net::types::Dish;

pub const EDIT_BUTTON_SELECTOR: &str = ".btnEditar[data-dish-id]";
pub const DELETE_BUTTON_SELECTOR: &str = ".btn-outline-danger[data-dish-id]";
pub const DISH_ID_ATTRIBUTE: &str = "data-dish-id";
pub const CARD_SELECTOR: &str = ".card";
pub const CARD_TITLE_SELECTOR: &str = ".card-title";
pub const CSRF_SELECTOR: &str = "[name=csrfmiddlewaretoken]";

/// Form inputs filled from a fetched dish, by element ID.
pub fn edit_field_values(dish: &Dish) -> [(&'static str, &str); 5] {
    [
        ("campoRestaurante", dish.restaurant_id.as_str()),
        ("campoNome", dish.name.as_str()),
        ("campoDescricao", dish.description.as_str()),
        ("campoCategoria", dish.category.as_str()),
        ("campoPreco", dish.price.as_str()),
    ]
}

/// Where the form posts: its `action`, or the current page without one.
pub fn submit_url<'a>(action: &'a str, current_page: &'a str) -> &'a str {
    if action.trim().is_empty() { current_page } else { action }
}

pub fn delete_confirmation(dish_name: &str) -> String {
    format!("Are you sure you want to delete \"{}\"?", dish_name.trim())
}

#[cfg(feature = "hydrate")]
pub use dom_form::{handle_click, install_submit, reset_form};

#[cfg(feature = "hydrate")]
mod dom_form {
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen_futures::spawn_local;
    use web_sys::{Document, Element, FormData, HtmlFormElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

    use super::{
        CARD_SELECTOR, CARD_TITLE_SELECTOR, CSRF_SELECTOR, DELETE_BUTTON_SELECTOR, DISH_ID_ATTRIBUTE,
        EDIT_BUTTON_SELECTOR, delete_confirmation, edit_field_values, submit_url,
    };
    use crate::components::image_choice;
    use crate::components::modal::ModalController;
    use crate::config::DishFormConfig;
    use crate::net::api;
    use crate::util::dom::{self, OkOrLog as _, js_error_message, warn_on_err};

    fn form(document: &Document, config: &DishFormConfig) -> Option<HtmlFormElement> {
        document
            .get_element_by_id(&config.form_id)
            .and_then(|el| el.dyn_into::<HtmlFormElement>().ok_or_log())
    }

    /// Clear the form back to "create" mode.
    pub fn reset_form(document: &Document, config: &DishFormConfig) {
        let Some(form) = form(document, config) else {
            return;
        };
        form.reset();
        dom::remove_attribute(&form, &config.edit_attribute);
        image_choice::apply(document, config);
    }

    fn set_field_value(document: &Document, id: &str, value: &str) {
        let Some(el) = document.get_element_by_id(id) else {
            log::warn!("form field #{id} not found");
            return;
        };
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        } else if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
            select.set_value(value);
        } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
            area.set_value(value);
        }
    }

    fn build_form_data(document: &Document, form: &HtmlFormElement, config: &DishFormConfig) -> Option<FormData> {
        image_choice::strip_field_names(document, config);
        let built = FormData::new_with_form(form);
        image_choice::restore_field_names(document, config);
        let form_data = match built {
            Ok(data) => data,
            Err(e) => {
                log::error!("could not read dish form: {}", js_error_message(&e));
                return None;
            }
        };
        if let Some(dish_id) = form.get_attribute(&config.edit_attribute) {
            warn_on_err(form_data.append_with_str(&config.edit_field, &dish_id), "FormData.append");
        }
        Some(form_data)
    }

    /// Intercept the dish form submit and post it in the background.
    pub fn install_submit(document: &Document, config: Rc<DishFormConfig>, modals: Rc<ModalController>) {
        let Some(form) = form(document, &config) else {
            return;
        };
        let doc = document.clone();
        let form_for_cb = form.clone();
        let on_submit = Closure::<dyn FnMut(web_sys::Event)>::new(move |ev: web_sys::Event| {
            ev.prevent_default();
            ev.stop_propagation();
            let Some(form_data) = build_form_data(&doc, &form_for_cb, &config) else {
                dom::alert("Error: could not read the form");
                return;
            };
            let current_page = doc.location().and_then(|l| l.href().ok_or_log()).unwrap_or_default();
            let url = submit_url(&form_for_cb.action(), &current_page).to_owned();
            let doc = doc.clone();
            let form = form_for_cb.clone();
            let config = Rc::clone(&config);
            let modals = Rc::clone(&modals);
            spawn_local(async move {
                match api::save_dish(&url, &form_data).await {
                    Ok(()) => {
                        modals.close_enclosing(&form);
                        reset_form(&doc, &config);
                        dom::reload();
                    }
                    Err(e) => {
                        log::warn!("dish save failed: {e}");
                        dom::alert(&api::alert_message("save", &e));
                    }
                }
            });
        });
        warn_on_err(
            form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref()),
            "addEventListener(submit)",
        );
        on_submit.forget();
    }

    fn start_edit(document: &Document, button: &Element, config: &Rc<DishFormConfig>, modals: &Rc<ModalController>) {
        let Some(dish_id) = button.get_attribute(DISH_ID_ATTRIBUTE) else {
            return;
        };
        let doc = document.clone();
        let config = Rc::clone(config);
        let modals = Rc::clone(modals);
        spawn_local(async move {
            match api::fetch_dish(&config.endpoint_prefix, &dish_id).await {
                Ok(dish) => {
                    for (id, value) in edit_field_values(&dish) {
                        set_field_value(&doc, id, value);
                    }
                    if let Some(form) = form(&doc, &config) {
                        dom::set_attribute(&form, &config.edit_attribute, &dish_id);
                    }
                    if let Some(modal) = doc.get_element_by_id(&config.modal_id) {
                        modals.open(&modal);
                    }
                }
                Err(e) => {
                    log::warn!("dish {dish_id} load failed: {e}");
                    dom::alert(&api::alert_message("load dish", &e));
                }
            }
        });
    }

    fn start_delete(document: &Document, button: &Element, config: &Rc<DishFormConfig>) {
        let Some(dish_id) = button.get_attribute(DISH_ID_ATTRIBUTE) else {
            return;
        };
        let dish_name = dom::closest(button, CARD_SELECTOR)
            .and_then(|card| dom::query_in(&card, CARD_TITLE_SELECTOR))
            .and_then(|title| title.text_content())
            .unwrap_or_default();
        if !dom::confirm(&delete_confirmation(&dish_name)) {
            return;
        }
        let csrf_token = dom::query(document, CSRF_SELECTOR)
            .and_then(|el| el.dyn_ref::<HtmlInputElement>().map(HtmlInputElement::value));
        let config = Rc::clone(config);
        spawn_local(async move {
            match api::delete_dish(&config.endpoint_prefix, &dish_id, csrf_token.as_deref()).await {
                Ok(()) => dom::reload(),
                Err(e) => {
                    log::warn!("dish {dish_id} delete failed: {e}");
                    dom::alert(&api::alert_message("delete", &e));
                }
            }
        });
    }

    /// Delegated click handling for edit and delete buttons.
    pub fn handle_click(document: &Document, ev: &web_sys::Event, config: &Rc<DishFormConfig>, modals: &Rc<ModalController>) {
        if let Some(button) = dom::closest_from_event(ev, EDIT_BUTTON_SELECTOR) {
            ev.prevent_default();
            start_edit(document, &button, config, modals);
        } else if let Some(button) = dom::closest_from_event(ev, DELETE_BUTTON_SELECTOR) {
            ev.prevent_default();
            start_delete(document, &button, config);
        }
    }
}
