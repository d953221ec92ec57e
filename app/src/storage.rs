//! # Local Storage
//!
//! Device-local key-value persistence for the favorites and local-recipe
//! collections.
//!
//! ## Keys
//! - `fav_recipe_ids`: the serialized favorite-id list
//! - `my_recipes_v1`: the serialized local-recipe list
//!
//! Each collection is rewritten in full on every mutation, no partial writes.
//!
//! ## Failure Policy
//! Storage is best-effort and never interrupts a session. A read failure or
//! malformed value loads as the empty collection; a write failure is logged and
//! dropped, leaving the in-memory state authoritative until the next successful
//! write.

use std::{collections::HashMap, fs, io::ErrorKind, path::PathBuf, sync::Mutex};

use serde::{Serialize, de::DeserializeOwned};
use tracing::warn;

pub const FAVORITES_KEY: &str = "fav_recipe_ids";
pub const MY_RECIPES_KEY: &str = "my_recipes_v1";

pub trait Storage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

/// One JSON file per key under a data directory.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn open(dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Some(raw),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                warn!("Failed to read {key}: {e}");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(e) = fs::write(self.path_for(key), value) {
            warn!("Failed to write {key}: {e}");
        }
    }
}

/// Backing for tests, and the fallback when no writable data directory exists.
#[derive(Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }
}

pub(crate) fn load_collection<T>(storage: &dyn Storage, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    storage
        .get(key)
        .and_then(|raw| match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Discarding malformed {key}: {e}");
                None
            }
        })
        .unwrap_or_default()
}

pub(crate) fn save_collection<T: Serialize>(storage: &dyn Storage, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(json) => storage.set(key, &json),
        Err(e) => warn!("Failed to serialize {key}: {e}"),
    }
}
