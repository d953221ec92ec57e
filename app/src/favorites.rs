//! Bookmarked recipe ids, persisted on every mutation.

use std::sync::Arc;

use catalog::models::RecipeId;

use crate::storage::{FAVORITES_KEY, Storage, load_collection, save_collection};

/// Ordered, de-duplicated set of favorite ids. Ids are normalized to their
/// string form so numeric catalog ids and local string ids compare uniformly.
pub struct Favorites {
    ids: Vec<String>,
    storage: Arc<dyn Storage>,
}

impl Favorites {
    pub fn load(storage: Arc<dyn Storage>) -> Self {
        let ids = load_collection(storage.as_ref(), FAVORITES_KEY);
        Self { ids, storage }
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn is_favorite(&self, id: &RecipeId) -> bool {
        let key = id.to_string();
        self.ids.iter().any(|v| *v == key)
    }

    /// No-op when already present; existing entries keep their order.
    pub fn add(&mut self, id: &RecipeId) {
        let key = id.to_string();
        if !self.ids.contains(&key) {
            self.ids.push(key);
            self.persist();
        }
    }

    /// Persists even when the id was absent, keeping storage in step with the
    /// in-memory set.
    pub fn remove(&mut self, id: &RecipeId) {
        let key = id.to_string();
        self.ids.retain(|v| *v != key);
        self.persist();
    }

    /// Returns the new membership.
    pub fn toggle(&mut self, id: &RecipeId) -> bool {
        if self.is_favorite(id) {
            self.remove(id);
            false
        } else {
            self.add(id);
            true
        }
    }

    /// Bulk replacement, normalizing and de-duplicating the incoming ids.
    pub fn set(&mut self, ids: impl IntoIterator<Item = RecipeId>) {
        self.ids.clear();
        for id in ids {
            let key = id.to_string();
            if !self.ids.contains(&key) {
                self.ids.push(key);
            }
        }
        self.persist();
    }

    pub fn clear(&mut self) {
        self.ids.clear();
        self.persist();
    }

    /// The numeric ids, for bulk catalog lookups. Local ids have nothing to
    /// resolve upstream and are skipped.
    pub fn remote_ids(&self) -> Vec<u64> {
        self.ids.iter().filter_map(|v| v.parse().ok()).collect()
    }

    fn persist(&self) {
        save_collection(self.storage.as_ref(), FAVORITES_KEY, &self.ids);
    }
}
