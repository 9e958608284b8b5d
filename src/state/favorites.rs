//! Favorite restaurants, persisted as a JSON array of IDs.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every operation re-reads storage and writes the full set back before
//! returning, all inside one event-handler turn, so two mutations on one
//! page never interleave. Two tabs writing the same key are last-write-wins.
//!
//! ERROR HANDLING
//! ==============
//! [`FavoritesStore::load`] reports storage failures. Everything else is
//! fail-soft: unreadable or malformed storage reads as the empty set, and a
//! failed write turns the mutation into a logged no-op with no notification.

#[cfg(test)]
#[path = "favorites_test.rs"]
mod favorites_test;

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::config::FavoritesConfig;
use crate::util::storage::{KeyValueStorage, StorageError, load_json, save_json};

/// Non-negative restaurant identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RestaurantId(u64);

impl RestaurantId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> u64 {
        self.0
    }

    /// Lenient integer coercion for attribute values.
    ///
    /// Skips leading whitespace and an optional `+`, then reads the leading
    /// run of ASCII digits: `" 12abc"` is 12. Returns `None` when there are
    /// no digits, the value is negative, or it overflows.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim_start();
        let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
        let end = unsigned
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(unsigned.len());
        match unsigned[..end].parse::<u64>() {
            Ok(id) => Some(Self(id)),
            Err(_) => None,
        }
    }

    /// Coercion for IDs passed as JS numbers: truncates toward zero and
    /// rejects negatives, non-finite values, and anything past 2^53.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_number(value: f64) -> Option<Self> {
        const MAX_EXACT: f64 = 9_007_199_254_740_992.0;
        let whole = value.trunc();
        if whole.is_finite() && (0.0..=MAX_EXACT).contains(&whole) {
            Some(Self(whole as u64))
        } else {
            None
        }
    }
}

impl From<u64> for RestaurantId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for RestaurantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Insertion-ordered set of favorite restaurant IDs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FavoriteSet {
    ids: Vec<RestaurantId>,
}

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from `ids`, keeping the first occurrence of each.
    pub fn from_ids(ids: impl IntoIterator<Item = RestaurantId>) -> Self {
        let mut set = Self::new();
        for id in ids {
            set.insert(id);
        }
        set
    }

    pub fn contains(&self, id: RestaurantId) -> bool {
        self.ids.contains(&id)
    }

    /// Returns `true` if `id` was absent.
    pub fn insert(&mut self, id: RestaurantId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Returns `true` if `id` was present.
    pub fn remove(&mut self, id: RestaurantId) -> bool {
        let Some(index) = self.ids.iter().position(|&existing| existing == id) else {
            return false;
        };
        self.ids.remove(index);
        true
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = RestaurantId> + '_ {
        self.ids.iter().copied()
    }

    pub fn as_slice(&self) -> &[RestaurantId] {
        &self.ids
    }

    pub fn into_vec(self) -> Vec<RestaurantId> {
        self.ids
    }
}

impl<'de> Deserialize<'de> for FavoriteSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let ids = Vec::<RestaurantId>::deserialize(deserializer)?;
        Ok(Self::from_ids(ids))
    }
}

/// What a mutation did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FavoriteChange {
    Added(RestaurantId),
    Removed(RestaurantId),
    Cleared,
}

impl FavoriteChange {
    /// Page-level notification for a single-id change. `Cleared` has none.
    pub fn as_event(self) -> Option<FavoriteChanged> {
        match self {
            Self::Added(restaurant_id) => Some(FavoriteChanged { restaurant_id, is_favorite: true }),
            Self::Removed(restaurant_id) => Some(FavoriteChanged { restaurant_id, is_favorite: false }),
            Self::Cleared => None,
        }
    }
}

/// Detail payload of the `favoriteChanged` DOM event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteChanged {
    pub restaurant_id: RestaurantId,
    pub is_favorite: bool,
}

pub type ListenerId = u64;

type Listener = Box<dyn Fn(FavoriteChange, &FavoriteSet)>;

/// Persistent favorites with change subscription.
///
/// Mutations take `&self`, so listeners may read the store while they run.
pub struct FavoritesStore<S> {
    storage: S,
    key: String,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: ListenerId,
}

impl<S: KeyValueStorage> FavoritesStore<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// Initialize a store for the page and log what it found.
    pub fn open(storage: S, config: &FavoritesConfig) -> Self {
        let store = Self::new(storage, config.storage_key.clone());
        match store.load() {
            Ok(set) => log::info!("favorites initialized: {} saved", set.len()),
            Err(e) => log::warn!("favorites initialized without saved data: {e}"),
        }
        store
    }

    /// Tear down: drop every listener and hand back the storage adapter.
    pub fn close(self) -> S {
        log::debug!("favorites store closed with {} listeners", self.listeners.len());
        self.storage
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the persisted set. An absent key is the empty set.
    ///
    /// # Errors
    ///
    /// Returns the storage failure, or [`StorageError::Malformed`] when the
    /// stored value is not a JSON array of non-negative integers.
    pub fn load(&self) -> Result<FavoriteSet, StorageError> {
        Ok(load_json(&self.storage, &self.key)?.unwrap_or_default())
    }

    /// Fail-soft read used by every other operation.
    pub fn snapshot(&self) -> FavoriteSet {
        match self.load() {
            Ok(set) => set,
            Err(e) => {
                log::error!("failed to read favorites: {e}");
                FavoriteSet::new()
            }
        }
    }

    pub fn list(&self) -> Vec<RestaurantId> {
        self.snapshot().into_vec()
    }

    pub fn contains(&self, id: RestaurantId) -> bool {
        self.snapshot().contains(id)
    }

    /// Membership test for an unparsed ID; non-numeric input is never a member.
    pub fn contains_raw(&self, raw: &str) -> bool {
        RestaurantId::parse(raw).is_some_and(|id| self.contains(id))
    }

    pub fn count(&self) -> usize {
        self.snapshot().len()
    }

    /// Read for a mutation. Unreadable storage yields `None` so nothing is
    /// written over it; a malformed value is replaced by the next write.
    fn snapshot_for_write(&self) -> Option<FavoriteSet> {
        match self.load() {
            Ok(set) => Some(set),
            Err(StorageError::Malformed(e)) => {
                log::warn!("discarding malformed favorites: {e}");
                Some(FavoriteSet::new())
            }
            Err(e) => {
                log::error!("failed to read favorites, change skipped: {e}");
                None
            }
        }
    }

    /// Returns `true` if this call added `id`.
    pub fn add(&self, id: RestaurantId) -> bool {
        let Some(mut set) = self.snapshot_for_write() else {
            return false;
        };
        if !set.insert(id) {
            log::info!("restaurant {id} is already a favorite");
            return false;
        }
        if !self.persist(&set) {
            return false;
        }
        log::info!("restaurant {id} added to favorites");
        self.notify(FavoriteChange::Added(id), &set);
        true
    }

    /// Returns `true` if this call removed `id`.
    pub fn remove(&self, id: RestaurantId) -> bool {
        let Some(mut set) = self.snapshot_for_write() else {
            return false;
        };
        if !set.remove(id) {
            log::info!("restaurant {id} is not a favorite");
            return false;
        }
        if !self.persist(&set) {
            return false;
        }
        log::info!("restaurant {id} removed from favorites");
        self.notify(FavoriteChange::Removed(id), &set);
        true
    }

    /// Flip membership and return whether `id` is a favorite afterwards.
    ///
    /// A failed write leaves membership unchanged and the return value says so.
    /// Unreadable storage reports `false`.
    pub fn toggle(&self, id: RestaurantId) -> bool {
        let Some(set) = self.snapshot_for_write() else {
            return false;
        };
        if set.contains(id) {
            !self.remove(id)
        } else {
            self.add(id)
        }
    }

    /// Delete the persisted entry entirely.
    pub fn clear(&self) {
        if let Err(e) = self.storage.remove_item(&self.key) {
            log::error!("failed to clear favorites: {e}");
            return;
        }
        log::info!("all favorites removed");
        self.notify(FavoriteChange::Cleared, &FavoriteSet::new());
    }

    /// Register a listener called after every persisted mutation.
    pub fn subscribe(&mut self, listener: impl Fn(FavoriteChange, &FavoriteSet) + 'static) -> ListenerId {
        let id = self.next_listener;
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns `true` if `id` was registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    fn persist(&self, set: &FavoriteSet) -> bool {
        match save_json(&self.storage, &self.key, set) {
            Ok(()) => true,
            Err(e) => {
                log::error!("failed to save favorites: {e}");
                false
            }
        }
    }

    fn notify(&self, change: FavoriteChange, set: &FavoriteSet) {
        for (_, listener) in &self.listeners {
            listener(change, set);
        }
    }
}
