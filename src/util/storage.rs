//! Key-value storage adapters and JSON helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! The favorites store only talks to [`KeyValueStorage`]. In the browser the
//! adapter is `localStorage`; tests use [`MemoryStorage`], which can also be
//! told to fail so degraded paths are exercised without a browser.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// No storage backend exists (no window, storage disabled by the user).
    #[error("storage unavailable")]
    Unavailable,
    #[error("storage read failed: {0}")]
    Read(String),
    /// Includes quota exceeded.
    #[error("storage write failed: {0}")]
    Write(String),
    #[error("stored value is malformed: {0}")]
    Malformed(String),
    #[error("value could not be serialized: {0}")]
    Serialize(String),
}

/// Minimal string key-value store with `localStorage` semantics.
pub trait KeyValueStorage {
    /// # Errors
    ///
    /// Fails when the backend cannot be reached or read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// # Errors
    ///
    /// Fails when the backend rejects the write.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Fails when the backend cannot be reached.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for Rc<S> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}

/// Load and decode a JSON value stored under `key`.
///
/// `Ok(None)` means the key is absent.
///
/// # Errors
///
/// Propagates backend failures and reports undecodable values as
/// [`StorageError::Malformed`].
pub fn load_json<T: DeserializeOwned>(storage: &impl KeyValueStorage, key: &str) -> Result<Option<T>, StorageError> {
    let Some(raw) = storage.get_item(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| StorageError::Malformed(e.to_string()))
}

/// Encode `value` as JSON and store it under `key`.
///
/// # Errors
///
/// Propagates backend failures and serializer failures.
pub fn save_json<T: Serialize + ?Sized>(storage: &impl KeyValueStorage, key: &str, value: &T) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value).map_err(|e| StorageError::Serialize(e.to_string()))?;
    storage.set_item(key, &raw)
}

/// In-process storage. Clones share the same map, so two stores built over
/// clones behave like two page loads over one browser profile.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    items: Rc<RefCell<HashMap<String, String>>>,
    fail_reads: Rc<Cell<bool>>,
    fail_writes: Rc<Cell<bool>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent read fail with [`StorageError::Read`].
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.set(fail);
    }

    /// Make every subsequent write or remove fail with [`StorageError::Write`].
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Raw stored value, bypassing failure injection.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    /// Store a raw value, bypassing failure injection.
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.items.borrow_mut().insert(key.to_owned(), value.to_owned());
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.fail_reads.get() {
            return Err(StorageError::Read("injected read failure".to_owned()));
        }
        Ok(self.raw(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.get() {
            return Err(StorageError::Write("quota exceeded".to_owned()));
        }
        self.insert_raw(key, value);
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        if self.fail_writes.get() {
            return Err(StorageError::Write("injected remove failure".to_owned()));
        }
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

/// Browser `localStorage`. The handle is looked up on every call so a page
/// that disables storage mid-session degrades instead of holding a stale one.
#[cfg(feature = "hydrate")]
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

#[cfg(feature = "hydrate")]
impl LocalStorage {
    fn handle() -> Result<web_sys::Storage, StorageError> {
        let window = web_sys::window().ok_or(StorageError::Unavailable)?;
        window
            .local_storage()
            .map_err(|e| StorageError::Read(crate::util::dom::js_error_message(&e)))?
            .ok_or(StorageError::Unavailable)
    }
}

#[cfg(feature = "hydrate")]
impl KeyValueStorage for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::handle()?
            .get_item(key)
            .map_err(|e| StorageError::Read(crate::util::dom::js_error_message(&e)))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::handle()?
            .set_item(key, value)
            .map_err(|e| StorageError::Write(crate::util::dom::js_error_message(&e)))
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        Self::handle()?
            .remove_item(key)
            .map_err(|e| StorageError::Write(crate::util::dom::js_error_message(&e)))
    }
}
