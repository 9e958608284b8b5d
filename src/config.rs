//! Page configuration: selectors, classes, labels, and endpoints.
//!
//! Defaults match the server-rendered templates. A page may override any
//! subset by embedding a JSON object in
//! `<script id="puceats-config" type="application/json">`; missing fields
//! keep their defaults.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

pub const DEFAULT_STORAGE_KEY: &str = "pucEatsFavorites";
pub const DEFAULT_PULSE_MS: u32 = 600;
pub const CONFIG_ELEMENT_ID: &str = "puceats-config";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid page config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Everything the page glue needs to find and restyle elements.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub favorites: FavoritesConfig,
    pub dish_form: DishFormConfig,
}

impl PageConfig {
    /// Parse an override blob, merging it onto the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when `raw` is not a JSON object of the
    /// expected shape.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Parse an optional override blob, logging and falling back to defaults
    /// when it is malformed.
    pub fn from_json_or_default(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
            return Self::default();
        };
        match Self::from_json(raw) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{e}; using defaults");
                Self::default()
            }
        }
    }
}

/// Favorites store and favorite-control DOM contract.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FavoritesConfig {
    pub storage_key: String,
    pub badge_selector: String,
    pub control_selector: String,
    pub id_attribute: String,
    pub icon_selector: String,
    pub active_class: String,
    pub pulse_class: String,
    pub pulse_ms: u32,
    pub label_favorite: String,
    pub label_not_favorite: String,
    pub event_name: String,
}

impl Default for FavoritesConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
            badge_selector: ".favorites-badge".to_owned(),
            control_selector: ".favorite-btn".to_owned(),
            id_attribute: "data-restaurant-id".to_owned(),
            icon_selector: ".material-icons".to_owned(),
            active_class: "active".to_owned(),
            pulse_class: "heartbeat".to_owned(),
            pulse_ms: DEFAULT_PULSE_MS,
            label_favorite: "favorite".to_owned(),
            label_not_favorite: "favorite_border".to_owned(),
            event_name: "favoriteChanged".to_owned(),
        }
    }
}

/// Dish modal, form, and list contract.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DishFormConfig {
    pub form_id: String,
    pub modal_id: String,
    pub edit_attribute: String,
    pub edit_field: String,
    pub endpoint_prefix: String,
    pub url_group_id: String,
    pub upload_group_id: String,
    pub url_input_id: String,
    pub upload_input_id: String,
    pub url_input_name: String,
    pub upload_input_name: String,
    pub hidden_class: String,
    pub search_input_id: String,
    pub category_filter_id: String,
    pub dish_item_selector: String,
}

impl Default for DishFormConfig {
    fn default() -> Self {
        Self {
            form_id: "dishForm".to_owned(),
            modal_id: "adicionarModal".to_owned(),
            edit_attribute: "data-dish-id".to_owned(),
            edit_field: "dish_id".to_owned(),
            endpoint_prefix: "/puceats/dish".to_owned(),
            url_group_id: "grupoImagemUrl".to_owned(),
            upload_group_id: "grupoImagemUpload".to_owned(),
            url_input_id: "campoImagemUrl".to_owned(),
            upload_input_id: "campoImagemUpload".to_owned(),
            url_input_name: "imagemUrl".to_owned(),
            upload_input_name: "imagemArquivo".to_owned(),
            hidden_class: "d-none".to_owned(),
            search_input_id: "searchInput".to_owned(),
            category_filter_id: "categoryFilter".to_owned(),
            dish_item_selector: ".dish-item".to_owned(),
        }
    }
}

/// Read the override blob from the current document, if any.
#[cfg(feature = "hydrate")]
pub fn load_from_document() -> PageConfig {
    let raw = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|el| el.text_content());
    PageConfig::from_json_or_default(raw.as_deref())
}
