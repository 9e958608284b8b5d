//! `FavoritesManager`: the page's favorites store exported to other scripts.
//!
//! The page's module loader publishes the class as
//! `window.FavoritesManager` after init. Every call goes
//! through the store mounted by [`crate::app`], so its listeners keep the
//! badge and the favorite controls in sync. IDs may be numbers or strings;
//! strings use the same lenient parse as `data-restaurant-id`.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::wasm_bindgen;

use crate::state::favorites::{FavoritesStore, RestaurantId};
use crate::util::storage::LocalStorage;

thread_local! {
    static PAGE_STORE: RefCell<Option<Rc<FavoritesStore<LocalStorage>>>> = const { RefCell::new(None) };
}

/// Make `store` the target of every exported call.
pub fn register(store: Rc<FavoritesStore<LocalStorage>>) {
    PAGE_STORE.with(|slot| *slot.borrow_mut() = Some(store));
}

/// Run `f` against the mounted store. The slot borrow is released first so
/// listeners fired by `f` may call back in.
fn with_store<T>(fallback: T, f: impl FnOnce(&FavoritesStore<LocalStorage>) -> T) -> T {
    let Some(store) = PAGE_STORE.with(|slot| slot.borrow().clone()) else {
        log::warn!("FavoritesManager called before the page was mounted");
        return fallback;
    };
    f(&store)
}

fn coerce_id(value: &JsValue) -> Option<RestaurantId> {
    let id = value
        .as_f64()
        .and_then(RestaurantId::from_number)
        .or_else(|| value.as_string().and_then(|raw| RestaurantId::parse(&raw)));
    if id.is_none() {
        log::warn!("ignoring non-numeric restaurant id {value:?}");
    }
    id
}

#[wasm_bindgen]
pub struct FavoritesManager;

#[wasm_bindgen]
impl FavoritesManager {
    /// Favorite IDs in insertion order.
    #[allow(clippy::cast_precision_loss)]
    pub fn list() -> Vec<f64> {
        with_store(Vec::new(), |store| {
            store.snapshot().iter().map(|id| id.get() as f64).collect()
        })
    }

    pub fn contains(id: &JsValue) -> bool {
        coerce_id(id).is_some_and(|id| with_store(false, |store| store.contains(id)))
    }

    pub fn add(id: &JsValue) -> bool {
        coerce_id(id).is_some_and(|id| with_store(false, |store| store.add(id)))
    }

    pub fn remove(id: &JsValue) -> bool {
        coerce_id(id).is_some_and(|id| with_store(false, |store| store.remove(id)))
    }

    /// Membership after the call.
    pub fn toggle(id: &JsValue) -> bool {
        coerce_id(id).is_some_and(|id| with_store(false, |store| store.toggle(id)))
    }

    pub fn count() -> usize {
        with_store(0, FavoritesStore::count)
    }

    pub fn clear() {
        with_store((), FavoritesStore::clear);
    }
}
