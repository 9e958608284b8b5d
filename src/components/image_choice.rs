//! Dish image source picker: URL field, file upload, or no image.
//!
//! Exactly one of the two image inputs is live at a time. The other is
//! hidden, disabled, and cleared so a stale value is never submitted.

#[cfg(test)]
#[path = "image_choice_test.rs"]
mod image_choice_test;

pub const CHOICE_SELECTOR: &str = "[data-image-choice]";
pub const CHECKED_CHOICE_SELECTOR: &str = "[data-image-choice]:checked";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageChoice {
    Url,
    Upload,
    /// No image; neither input is submitted.
    Omit,
}

impl ImageChoice {
    /// Parse a radio value. The form uses `nenhuma` for "no image".
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "url" => Some(Self::Url),
            "upload" => Some(Self::Upload),
            "nenhuma" => Some(Self::Omit),
            _ => None,
        }
    }

    pub fn submits_image(self) -> bool {
        !matches!(self, Self::Omit)
    }
}

/// Desired state of one image input and its wrapper group.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldState {
    pub visible: bool,
    pub enabled: bool,
    pub clear: bool,
}

impl FieldState {
    const LIVE: Self = Self { visible: true, enabled: true, clear: false };
    const DEAD: Self = Self { visible: false, enabled: false, clear: true };
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageFieldPlan {
    pub url: FieldState,
    pub upload: FieldState,
}

impl ImageFieldPlan {
    /// Neither input is ever `required`; the plan only governs visibility,
    /// enablement, and clearing.
    pub fn for_choice(choice: ImageChoice) -> Self {
        match choice {
            ImageChoice::Url => Self { url: FieldState::LIVE, upload: FieldState::DEAD },
            ImageChoice::Upload => Self { url: FieldState::DEAD, upload: FieldState::LIVE },
            ImageChoice::Omit => Self { url: FieldState::DEAD, upload: FieldState::DEAD },
        }
    }
}

#[cfg(feature = "hydrate")]
pub use dom_image_choice::{apply, checked_choice, install, restore_field_names, strip_field_names};

#[cfg(feature = "hydrate")]
mod dom_image_choice {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;
    use web_sys::{Document, Element, HtmlInputElement};

    use super::{CHECKED_CHOICE_SELECTOR, CHOICE_SELECTOR, FieldState, ImageChoice, ImageFieldPlan};
    use crate::config::DishFormConfig;
    use crate::util::dom::{self, warn_on_err};

    /// The currently checked radio, if any.
    pub fn checked_choice(document: &Document) -> Option<ImageChoice> {
        let checked = dom::query(document, CHECKED_CHOICE_SELECTOR)?;
        let value = checked.dyn_ref::<HtmlInputElement>()?.value();
        ImageChoice::parse(&value)
    }

    fn apply_field(group: Option<Element>, input: Option<Element>, state: FieldState, hidden_class: &str) {
        if let Some(group) = group {
            dom::set_class(&group, hidden_class, !state.visible);
        }
        let Some(input) = input else {
            return;
        };
        dom::remove_attribute(&input, "required");
        if state.enabled {
            dom::remove_attribute(&input, "disabled");
        } else {
            dom::set_attribute(&input, "disabled", "disabled");
        }
        if state.clear {
            if let Some(field) = input.dyn_ref::<HtmlInputElement>() {
                field.set_value("");
            }
        }
    }

    /// Bring both image inputs in line with the checked radio.
    pub fn apply(document: &Document, config: &DishFormConfig) {
        let Some(choice) = checked_choice(document) else {
            return;
        };
        let plan = ImageFieldPlan::for_choice(choice);
        apply_field(
            document.get_element_by_id(&config.url_group_id),
            document.get_element_by_id(&config.url_input_id),
            plan.url,
            &config.hidden_class,
        );
        apply_field(
            document.get_element_by_id(&config.upload_group_id),
            document.get_element_by_id(&config.upload_input_id),
            plan.upload,
            &config.hidden_class,
        );
    }

    /// Re-apply on every radio change, and once now.
    pub fn install(document: &Document, config: &DishFormConfig) {
        for radio in dom::query_all(document, CHOICE_SELECTOR) {
            let doc = document.clone();
            let config = config.clone();
            let on_change = Closure::<dyn FnMut(web_sys::Event)>::new(move |_ev: web_sys::Event| {
                apply(&doc, &config);
            });
            warn_on_err(
                radio.add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref()),
                "addEventListener(change)",
            );
            on_change.forget();
        }
        apply(document, config);
    }

    /// Drop the `name` of both image inputs so `FormData` skips them.
    /// Returns `true` if names were removed and must be restored.
    pub fn strip_field_names(document: &Document, config: &DishFormConfig) -> bool {
        if checked_choice(document).is_none_or(ImageChoice::submits_image) {
            return false;
        }
        for id in [&config.url_input_id, &config.upload_input_id] {
            if let Some(input) = document.get_element_by_id(id) {
                dom::remove_attribute(&input, "required");
                dom::remove_attribute(&input, "name");
            }
        }
        true
    }

    pub fn restore_field_names(document: &Document, config: &DishFormConfig) {
        for (id, name) in [
            (&config.url_input_id, &config.url_input_name),
            (&config.upload_input_id, &config.upload_input_name),
        ] {
            if let Some(input) = document.get_element_by_id(id) {
                if !input.has_attribute("name") {
                    dom::set_attribute(&input, "name", name);
                }
            }
        }
    }
}
