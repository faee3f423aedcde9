//! Key-value persistence seam.
//!
//! Everything the engine persists goes through [`KeyValueStore`]. Values are
//! JSON text. Stores never fail loudly: a missing backend reads as empty and
//! swallows writes, which is what a server-rendered pass without a browser
//! needs.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Synchronous string-keyed storage.
pub trait KeyValueStore {
    /// Raw stored text for `key`, if any.
    fn read(&self, key: &str) -> Option<String>;

    /// Replace the text stored under `key`.
    fn write(&self, key: &str, value: &str);

    /// Delete `key`; absent keys are ignored.
    fn remove(&self, key: &str);

    /// Deserialize the JSON stored under `key`.
    ///
    /// Returns `None` when the key is absent or the stored text does not
    /// parse as `T`.
    fn get<T>(&self, key: &str) -> Option<T>
    where
        T: DeserializeOwned,
    {
        let raw = self.read(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                log::warn!("ignoring unreadable value under {key}: {err}");
                None
            }
        }
    }

    /// Serialize `value` as JSON and store it under `key`.
    fn set<T>(&self, key: &str, value: &T)
    where
        T: Serialize + ?Sized,
    {
        match serde_json::to_string(value) {
            Ok(text) => self.write(key, &text),
            Err(err) => log::warn!("could not serialize value for {key}: {err}"),
        }
    }
}

impl<S> KeyValueStore for &S
where
    S: KeyValueStore + ?Sized,
{
    fn read(&self, key: &str) -> Option<String> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) {
        (**self).write(key, value);
    }

    fn remove(&self, key: &str) {
        (**self).remove(key);
    }
}

/// In-memory store. Clones share the same entries, like two handles on one
/// browser storage area.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with raw JSON text, e.g. a record written by an older release.
    #[must_use]
    pub fn with_entry(key: &str, raw: &str) -> Self {
        let store = Self::new();
        store.write(key, raw);
        store
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }

    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.entries.borrow().keys().cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

/// Store for contexts with no storage at all. Reads are empty, writes vanish.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnavailableStore;

impl KeyValueStore for UnavailableStore {
    fn read(&self, _key: &str) -> Option<String> {
        None
    }

    fn write(&self, _key: &str, _value: &str) {}

    fn remove(&self, _key: &str) {}
}
