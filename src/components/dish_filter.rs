//! Client-side dish list filter (search box plus category select).

#[cfg(test)]
#[path = "dish_filter_test.rs"]
mod dish_filter_test;

/// Current filter inputs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DishFilter {
    term: String,
    category: String,
}

impl DishFilter {
    pub fn new(term: &str, category: &str) -> Self {
        Self { term: term.to_lowercase(), category: category.to_owned() }
    }

    /// Case-insensitive substring match on the name and exact match on the
    /// category. An empty term or empty category matches everything.
    ///
    /// Both the term and the item name are lowercased, so a mixed-case
    /// `data-name` still matches.
    pub fn matches(&self, name: &str, category: &str) -> bool {
        let name_ok = self.term.is_empty() || name.to_lowercase().contains(&self.term);
        let category_ok = self.category.is_empty() || category == self.category;
        name_ok && category_ok
    }
}

#[cfg(feature = "hydrate")]
pub use dom_filter::{apply, install};

#[cfg(feature = "hydrate")]
mod dom_filter {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;
    use web_sys::{Document, HtmlInputElement, HtmlSelectElement};

    use super::DishFilter;
    use crate::config::DishFormConfig;
    use crate::util::dom::{self, warn_on_err};

    fn read_filter(document: &Document, config: &DishFormConfig) -> DishFilter {
        let term = document
            .get_element_by_id(&config.search_input_id)
            .and_then(|el| el.dyn_ref::<HtmlInputElement>().map(HtmlInputElement::value))
            .unwrap_or_default();
        let category = document
            .get_element_by_id(&config.category_filter_id)
            .and_then(|el| el.dyn_ref::<HtmlSelectElement>().map(HtmlSelectElement::value))
            .unwrap_or_default();
        DishFilter::new(&term, &category)
    }

    /// Show matching `.dish-item`s and hide the rest.
    pub fn apply(document: &Document, config: &DishFormConfig) {
        let filter = read_filter(document, config);
        for item in dom::query_all(document, &config.dish_item_selector) {
            let name = item.get_attribute("data-name").unwrap_or_default();
            let category = item.get_attribute("data-category").unwrap_or_default();
            let display = if filter.matches(&name, &category) { "" } else { "none" };
            dom::set_display(&item, display);
        }
    }

    fn listen(document: &Document, config: &DishFormConfig, id: &str, event: &str) {
        let Some(el) = document.get_element_by_id(id) else {
            return;
        };
        let doc = document.clone();
        let config = config.clone();
        let on_event = Closure::<dyn FnMut(web_sys::Event)>::new(move |_ev: web_sys::Event| {
            apply(&doc, &config);
        });
        warn_on_err(
            el.add_event_listener_with_callback(event, on_event.as_ref().unchecked_ref()),
            "addEventListener(filter)",
        );
        on_event.forget();
    }

    pub fn install(document: &Document, config: &DishFormConfig) {
        listen(document, config, &config.search_input_id, "input");
        listen(document, config, &config.category_filter_id, "change");
    }
}
