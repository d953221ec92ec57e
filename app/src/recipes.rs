//! User-authored recipes, device-only, persisted on every mutation.

use std::sync::Arc;

use catalog::models::RecipeId;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::storage::{MY_RECIPES_KEY, Storage, load_collection, save_collection};

pub const LOCAL_ID_PREFIX: &str = "local-";

/// Stored with camelCase keys, matching the persisted format of the ids it
/// carries (`local-<epoch millis>`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalRecipe {
    pub id: RecipeId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ready_in_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub servings: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    pub created_at: i64,
}

#[derive(Debug, Clone, Default)]
pub struct NewRecipe {
    pub title: String,
    pub image: Option<String>,
    pub summary: Option<String>,
    pub ready_in_minutes: Option<u32>,
    pub servings: Option<u32>,
    pub source_url: Option<String>,
}

/// Partial update; only the provided fields are overwritten.
#[derive(Debug, Clone, Default)]
pub struct RecipeUpdate {
    pub title: Option<String>,
    pub image: Option<String>,
    pub summary: Option<String>,
    pub ready_in_minutes: Option<u32>,
    pub servings: Option<u32>,
    pub source_url: Option<String>,
}

/// Newest-first collection of local recipes.
pub struct LocalRecipes {
    items: Vec<LocalRecipe>,
    storage: Arc<dyn Storage>,
    last_id_millis: i64,
}

impl LocalRecipes {
    pub fn load(storage: Arc<dyn Storage>) -> Self {
        let items: Vec<LocalRecipe> = load_collection(storage.as_ref(), MY_RECIPES_KEY);

        // Seed the id allocator past everything already on disk.
        let last_id_millis = items.iter().map(|r| r.created_at).max().unwrap_or(0);

        Self {
            items,
            storage,
            last_id_millis,
        }
    }

    pub fn items(&self) -> &[LocalRecipe] {
        &self.items
    }

    pub fn find(&self, id: &RecipeId) -> Option<&LocalRecipe> {
        self.items.iter().find(|r| r.id == *id)
    }

    /// Rejects titles that trim to empty. Returns the assigned id.
    pub fn add(&mut self, input: NewRecipe) -> Option<RecipeId> {
        let title = input.title.trim();
        if title.is_empty() {
            return None;
        }

        let millis = self.next_id_millis();
        let id = RecipeId::Local(format!("{LOCAL_ID_PREFIX}{millis}"));

        self.items.insert(
            0,
            LocalRecipe {
                id: id.clone(),
                title: title.to_string(),
                image: input.image,
                summary: input.summary,
                ready_in_minutes: input.ready_in_minutes,
                servings: input.servings,
                source_url: input.source_url,
                created_at: millis,
            },
        );
        self.persist();

        Some(id)
    }

    pub fn remove(&mut self, id: &RecipeId) {
        self.items.retain(|r| r.id != *id);
        self.persist();
    }

    /// No-op when the id is unknown. Returns whether a record was touched.
    pub fn update(&mut self, id: &RecipeId, update: RecipeUpdate) -> bool {
        let Some(recipe) = self.items.iter_mut().find(|r| r.id == *id) else {
            return false;
        };

        if let Some(title) = update.title {
            recipe.title = title;
        }
        if let Some(image) = update.image {
            recipe.image = Some(image);
        }
        if let Some(summary) = update.summary {
            recipe.summary = Some(summary);
        }
        if let Some(minutes) = update.ready_in_minutes {
            recipe.ready_in_minutes = Some(minutes);
        }
        if let Some(servings) = update.servings {
            recipe.servings = Some(servings);
        }
        if let Some(url) = update.source_url {
            recipe.source_url = Some(url);
        }

        self.persist();
        true
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.persist();
    }

    // Ids are creation timestamps; when the clock has not advanced past the
    // last issued id, bump by one so same-millisecond creations stay distinct.
    fn next_id_millis(&mut self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let millis = if now > self.last_id_millis {
            now
        } else {
            self.last_id_millis + 1
        };
        self.last_id_millis = millis;
        millis
    }

    fn persist(&self) {
        save_collection(self.storage.as_ref(), MY_RECIPES_KEY, &self.items);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn store() -> LocalRecipes {
        LocalRecipes::load(Arc::new(MemoryStorage::default()))
    }

    fn titled(title: &str) -> NewRecipe {
        NewRecipe {
            title: title.to_string(),
            ..NewRecipe::default()
        }
    }

    #[test]
    fn whitespace_only_title_is_rejected() {
        let mut recipes = store();
        assert!(recipes.add(titled("   ")).is_none());
        assert!(recipes.items().is_empty());
    }

    #[test]
    fn add_assigns_id_and_creation_time() {
        let mut recipes = store();

        let id = recipes.add(titled("Soup")).unwrap();

        assert_eq!(recipes.items().len(), 1);
        let recipe = &recipes.items()[0];
        assert_eq!(recipe.id, id);
        assert!(id.to_string().starts_with(LOCAL_ID_PREFIX));
        assert!(recipe.created_at > 0);
        assert_eq!(recipe.title, "Soup");
    }

    #[test]
    fn newest_recipe_comes_first() {
        let mut recipes = store();
        recipes.add(titled("First"));
        recipes.add(titled("Second"));

        let titles: Vec<_> = recipes.items().iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["Second", "First"]);
    }

    #[test]
    fn rapid_creations_get_distinct_ids() {
        let mut recipes = store();
        let a = recipes.add(titled("A")).unwrap();
        let b = recipes.add(titled("B")).unwrap();
        let c = recipes.add(titled("C")).unwrap();

        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_ne!(a, c);
    }

    #[test]
    fn update_overwrites_only_provided_fields() {
        let mut recipes = store();
        let id = recipes
            .add(NewRecipe {
                title: "Curry".to_string(),
                servings: Some(2),
                ready_in_minutes: Some(30),
                ..NewRecipe::default()
            })
            .unwrap();

        let touched = recipes.update(
            &id,
            RecipeUpdate {
                servings: Some(4),
                ..RecipeUpdate::default()
            },
        );
        assert!(touched);

        let recipe = recipes.find(&id).unwrap();
        assert_eq!(recipe.title, "Curry");
        assert_eq!(recipe.servings, Some(4));
        assert_eq!(recipe.ready_in_minutes, Some(30));
        assert!(recipe.image.is_none());
    }

    #[test]
    fn update_of_unknown_id_mutates_nothing() {
        let mut recipes = store();
        recipes.add(titled("Soup"));

        let touched = recipes.update(
            &RecipeId::Local("local-0".to_string()),
            RecipeUpdate {
                title: Some("Stew".to_string()),
                ..RecipeUpdate::default()
            },
        );

        assert!(!touched);
        assert_eq!(recipes.items()[0].title, "Soup");
    }

    #[test]
    fn remove_deletes_by_exact_id() {
        let mut recipes = store();
        let keep = recipes.add(titled("Keep")).unwrap();
        let gone = recipes.add(titled("Gone")).unwrap();

        recipes.remove(&gone);

        assert_eq!(recipes.items().len(), 1);
        assert!(recipes.find(&keep).is_some());
        assert!(recipes.find(&gone).is_none());
    }

    #[test]
    fn collection_reloads_from_storage() {
        let storage = Arc::new(MemoryStorage::default());

        let mut recipes = LocalRecipes::load(storage.clone());
        recipes.add(titled("Soup"));
        drop(recipes);

        let reloaded = LocalRecipes::load(storage);
        assert_eq!(reloaded.items().len(), 1);
        assert_eq!(reloaded.items()[0].title, "Soup");
    }

    #[test]
    fn persisted_json_uses_camel_case_keys() {
        let storage = Arc::new(MemoryStorage::default());
        let mut recipes = LocalRecipes::load(storage.clone());
        recipes.add(NewRecipe {
            title: "Soup".to_string(),
            ready_in_minutes: Some(45),
            ..NewRecipe::default()
        });

        let raw = storage.get(MY_RECIPES_KEY).unwrap();
        assert!(raw.contains(r#""readyInMinutes":45"#));
        assert!(raw.contains(r#""createdAt":"#));
    }
}
