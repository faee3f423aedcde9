//! Browser `localStorage` behind the core [`KeyValueStore`] seam.

use yazboz_core::KeyValueStore;

/// Handle on the page's `localStorage`.
///
/// Outside a browser (native builds, server-side rendering) every read is
/// empty and every write is dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BrowserStore;

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|win| win.local_storage().ok().flatten())
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for BrowserStore {
    fn read(&self, key: &str) -> Option<String> {
        local_storage().and_then(|storage| storage.get_item(key).ok().flatten())
    }

    fn write(&self, key: &str, value: &str) {
        if let Some(storage) = local_storage() {
            if storage.set_item(key, value).is_err() {
                log::warn!("localStorage refused write for {key}");
            }
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = local_storage() {
            if storage.remove_item(key).is_err() {
                log::warn!("localStorage refused removal of {key}");
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl KeyValueStore for BrowserStore {
    fn read(&self, _key: &str) -> Option<String> {
        None
    }

    fn write(&self, _key: &str, _value: &str) {}

    fn remove(&self, _key: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use yazboz_core::{GameKind, ScoreKeeper};

    #[test]
    fn native_store_behaves_as_unavailable() {
        assert!(BrowserStore.read(&GameKind::Okey.storage_key()).is_none());
        let keeper = ScoreKeeper::new(BrowserStore);
        let table = keeper.start_table(GameKind::Okey, &["A", "B"]).unwrap();
        assert_eq!(table.record().player_count(), 2);
        assert!(keeper.open_table(GameKind::Okey).is_none());
    }
}
