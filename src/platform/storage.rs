//! Browser LocalStorage backend (wasm32 only)
//!
//! Fields are stored as decimal strings under `<namespace>.<key>`. The
//! storage handle is looked up per call so the store itself stays `Send`.

use web_sys::Storage;

use crate::error::{GameError, Result};
use crate::persistence::KeyValueStore;

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    fn storage() -> Result<Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| GameError::StorageUnavailable("no LocalStorage".into()))
    }

    fn item_key(namespace: &str, key: &str) -> String {
        format!("{namespace}.{key}")
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get_int(&self, namespace: &str, key: &str) -> Result<Option<i64>> {
        let storage = Self::storage()?;
        let item = storage
            .get_item(&Self::item_key(namespace, key))
            .map_err(|e| GameError::StorageUnavailable(format!("{e:?}")))?;
        match item {
            Some(text) => text.trim().parse::<i64>().map(Some).map_err(|_| {
                GameError::StorageUnavailable(format!("'{key}' is not an integer: {text}"))
            }),
            None => Ok(None),
        }
    }

    fn set_ints(&mut self, namespace: &str, entries: &[(&str, i64)]) -> Result<()> {
        let storage = Self::storage()?;
        for &(key, value) in entries {
            storage
                .set_item(&Self::item_key(namespace, key), &value.to_string())
                .map_err(|e| GameError::StorageUnavailable(format!("{e:?}")))?;
        }
        Ok(())
    }
}
