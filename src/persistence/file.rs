//! JSON-file backend for native builds
//!
//! Each namespace is one `<namespace>.json` object of integer fields inside
//! the store directory. Writes go to a temp file first and are renamed over
//! the old document so a crash mid-write leaves the previous save intact.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use super::KeyValueStore;
use crate::error::Result;

/// Directory of per-namespace JSON documents
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, namespace: &str) -> PathBuf {
        self.dir.join(format!("{namespace}.json"))
    }

    fn read_namespace(&self, namespace: &str) -> Result<BTreeMap<String, i64>> {
        match fs::read_to_string(self.path_for(namespace)) {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get_int(&self, namespace: &str, key: &str) -> Result<Option<i64>> {
        Ok(self.read_namespace(namespace)?.get(key).copied())
    }

    fn set_ints(&mut self, namespace: &str, entries: &[(&str, i64)]) -> Result<()> {
        // A corrupt document gets replaced rather than blocking every save
        let mut fields = self.read_namespace(namespace).unwrap_or_else(|e| {
            log::warn!("Discarding unreadable {} store: {}", namespace, e);
            BTreeMap::new()
        });
        for &(key, value) in entries {
            fields.insert(key.to_string(), value);
        }

        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(namespace);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(&fields)?)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}
