//! Favorite toggle controls and their synchronization with the store.
//!
//! DESIGN
//! ======
//! A restaurant can have several favorite controls on one page (card,
//! header, list row). None of them owns state: [`attach`] subscribes the
//! page surface to the store, and every persisted change re-renders every
//! control plus the badge and announces the change to the rest of the page.
//! Clicks are handled by one delegated document listener that only has to
//! toggle and restyle the clicked control.
//!
//! The sync logic is written against [`FavoritesSurface`] and
//! [`FavoriteControl`] so it runs natively in tests; the `hydrate` build
//! supplies the `web-sys` implementations.

#[cfg(test)]
#[path = "favorite_controls_test.rs"]
mod favorite_controls_test;

use std::rc::Rc;

use crate::components::favorites_badge::BadgeView;
use crate::config::FavoritesConfig;
use crate::state::favorites::{FavoriteChanged, FavoriteSet, FavoritesStore, ListenerId, RestaurantId};
use crate::util::storage::KeyValueStorage;

/// Visual state of one control.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControlView<'a> {
    pub active: bool,
    pub icon_label: &'a str,
}

impl<'a> ControlView<'a> {
    pub fn new(config: &'a FavoritesConfig, is_favorite: bool) -> Self {
        let icon_label = if is_favorite { config.label_favorite.as_str() } else { config.label_not_favorite.as_str() };
        Self { active: is_favorite, icon_label }
    }
}

/// One on-page favorite toggle.
pub trait FavoriteControl {
    /// The ID the control represents; `None` when the attribute is missing
    /// or not numeric.
    fn restaurant_id(&self) -> Option<RestaurantId>;

    fn render(&self, view: &ControlView<'_>);

    /// Cosmetic feedback after a click.
    fn pulse(&self) {}
}

/// The page as seen by the favorites layer.
pub trait FavoritesSurface {
    type Control: FavoriteControl;

    /// Every favorite control currently on the page.
    fn controls(&self) -> Vec<Self::Control>;

    fn render_badge(&self, view: &BadgeView);

    /// Publish a single-id change to unrelated page logic.
    fn announce(&self, event: &FavoriteChanged);
}

/// Render each control from `favorites`. Controls without a usable ID are
/// left alone. Returns the number of controls rendered.
pub fn sync_controls<C: FavoriteControl>(controls: &[C], favorites: &FavoriteSet, config: &FavoritesConfig) -> usize {
    let mut rendered = 0;
    for control in controls {
        let Some(id) = control.restaurant_id() else {
            continue;
        };
        control.render(&ControlView::new(config, favorites.contains(id)));
        rendered += 1;
    }
    rendered
}

/// Re-render the badge and every control.
pub fn refresh<V: FavoritesSurface>(surface: &V, favorites: &FavoriteSet, config: &FavoritesConfig) {
    surface.render_badge(&BadgeView::for_count(favorites.len()));
    sync_controls(&surface.controls(), favorites, config);
}

/// Render the current state once and keep `surface` in sync with `store`.
pub fn attach<S, V>(store: &mut FavoritesStore<S>, surface: Rc<V>, config: Rc<FavoritesConfig>) -> ListenerId
where
    S: KeyValueStorage,
    V: FavoritesSurface + 'static,
{
    refresh(&*surface, &store.snapshot(), &config);
    store.subscribe(move |change, favorites| {
        refresh(&*surface, favorites, &config);
        if let Some(event) = change.as_event() {
            surface.announce(&event);
        }
    })
}

/// Toggle the restaurant behind `clicked`.
///
/// By the time `toggle` returns, the listener installed by [`attach`] has
/// re-rendered every control and announced the change. The clicked control
/// is rendered again from the toggle result, so it is correct even if it is
/// not (or no longer) part of the surface, then pulsed.
pub fn handle_click<S, C>(store: &FavoritesStore<S>, clicked: &C, config: &FavoritesConfig) -> Option<FavoriteChanged>
where
    S: KeyValueStorage,
    C: FavoriteControl,
{
    let restaurant_id = clicked.restaurant_id()?;
    let is_favorite = store.toggle(restaurant_id);
    clicked.render(&ControlView::new(config, is_favorite));
    clicked.pulse();
    Some(FavoriteChanged { restaurant_id, is_favorite })
}

#[cfg(feature = "hydrate")]
pub use dom_surface::{DomControl, DomSurface, install_click_listener};

#[cfg(feature = "hydrate")]
mod dom_surface {
    use std::rc::Rc;

    use gloo_timers::callback::Timeout;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;
    use web_sys::{CustomEvent, CustomEventInit, Document, Element};

    use super::{ControlView, FavoriteControl, FavoritesSurface, handle_click};
    use crate::components::favorites_badge::{self, BadgeView};
    use crate::config::FavoritesConfig;
    use crate::state::favorites::{FavoriteChanged, FavoritesStore, RestaurantId};
    use crate::util::dom::{self, js_error_message, warn_on_err};
    use crate::util::storage::KeyValueStorage;

    /// A `.favorite-btn` element.
    #[derive(Clone)]
    pub struct DomControl {
        el: Element,
        config: Rc<FavoritesConfig>,
    }

    impl DomControl {
        pub fn new(el: Element, config: Rc<FavoritesConfig>) -> Self {
            Self { el, config }
        }
    }

    impl FavoriteControl for DomControl {
        fn restaurant_id(&self) -> Option<RestaurantId> {
            self.el
                .get_attribute(&self.config.id_attribute)
                .as_deref()
                .and_then(RestaurantId::parse)
        }

        fn render(&self, view: &ControlView<'_>) {
            dom::set_class(&self.el, &self.config.active_class, view.active);
            if let Some(icon) = dom::query_in(&self.el, &self.config.icon_selector) {
                icon.set_text_content(Some(view.icon_label));
            }
        }

        fn pulse(&self) {
            dom::add_class(&self.el, &self.config.pulse_class);
            let el = self.el.clone();
            let class = self.config.pulse_class.clone();
            Timeout::new(self.config.pulse_ms, move || dom::remove_class(&el, &class)).forget();
        }
    }

    /// The live document.
    pub struct DomSurface {
        document: Document,
        config: Rc<FavoritesConfig>,
    }

    impl DomSurface {
        pub fn new(document: Document, config: Rc<FavoritesConfig>) -> Self {
            Self { document, config }
        }
    }

    impl FavoritesSurface for DomSurface {
        type Control = DomControl;

        fn controls(&self) -> Vec<DomControl> {
            dom::query_all(&self.document, &self.config.control_selector)
                .into_iter()
                .map(|el| DomControl::new(el, Rc::clone(&self.config)))
                .collect()
        }

        fn render_badge(&self, view: &BadgeView) {
            if let Some(badge) = dom::query(&self.document, &self.config.badge_selector) {
                favorites_badge::render(&badge, view);
            }
        }

        fn announce(&self, event: &FavoriteChanged) {
            let detail = match serde_json::to_string(event) {
                Ok(json) => match js_sys::JSON::parse(&json) {
                    Ok(detail) => detail,
                    Err(e) => {
                        log::warn!("favorite event detail rejected: {}", js_error_message(&e));
                        return;
                    }
                },
                Err(e) => {
                    log::warn!("favorite event detail not serializable: {e}");
                    return;
                }
            };
            let init = CustomEventInit::new();
            init.set_bubbles(true);
            init.set_detail(&detail);
            match CustomEvent::new_with_event_init_dict(&self.config.event_name, &init) {
                Ok(custom) => warn_on_err(self.document.dispatch_event(&custom), "dispatchEvent"),
                Err(e) => log::warn!("could not create {}: {}", self.config.event_name, js_error_message(&e)),
            }
        }
    }

    /// One delegated click listener for every favorite control, present or
    /// added later.
    pub fn install_click_listener<S>(document: &Document, store: Rc<FavoritesStore<S>>, config: Rc<FavoritesConfig>)
    where
        S: KeyValueStorage + 'static,
    {
        let on_click = Closure::<dyn FnMut(web_sys::Event)>::new(move |ev: web_sys::Event| {
            let Some(el) = dom::closest_from_event(&ev, &config.control_selector) else {
                return;
            };
            let control = DomControl::new(el, Rc::clone(&config));
            if handle_click(&*store, &control, &config).is_none() {
                log::debug!("favorite control without a restaurant id");
            }
        });
        warn_on_err(
            document.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref()),
            "addEventListener(click)",
        );
        on_click.forget();
    }
}
