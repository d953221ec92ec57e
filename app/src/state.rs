use std::sync::{Arc, Mutex};

use catalog::{
    Client,
    models::{RecipeDetail, RecipeId, RecipeSummary},
};
use tracing::{info, warn};

use crate::{
    compose::{compose_view, local_detail},
    config::Config,
    error::AppError,
    favorites::Favorites,
    recipes::LocalRecipes,
    search::SearchStore,
    storage::{FileStorage, MemoryStorage, Storage},
};

/// Shared state container. Each store is an explicit handle here; nothing in
/// the crate mutates state except through the store operations.
pub struct AppState {
    pub config: Config,
    pub favorites: Mutex<Favorites>,
    pub recipes: Mutex<LocalRecipes>,
    pub search: SearchStore,
    catalog: Client,
}

impl AppState {
    pub fn new(config: Config) -> Arc<Self> {
        let storage: Arc<dyn Storage> = match FileStorage::open(&config.data_dir) {
            Ok(files) => Arc::new(files),
            Err(e) => {
                warn!("Local storage unavailable ({e}), keeping this session in memory only");
                Arc::new(MemoryStorage::default())
            }
        };

        Self::with_storage(config, storage)
    }

    pub fn with_storage(config: Config, storage: Arc<dyn Storage>) -> Arc<Self> {
        let catalog = Client::new(config.api_key.clone());

        let favorites = Favorites::load(storage.clone());
        let recipes = LocalRecipes::load(storage);
        info!(
            "Loaded {} favorites and {} local recipes",
            favorites.ids().len(),
            recipes.items().len()
        );

        Arc::new(Self {
            config,
            favorites: Mutex::new(favorites),
            recipes: Mutex::new(recipes),
            search: SearchStore::new(catalog.clone()),
            catalog,
        })
    }

    /// The display list: local recipes, then the current result page, filtered
    /// by the active query.
    pub fn composed_view(&self) -> Vec<RecipeSummary> {
        let state = self.search.snapshot();
        let recipes = self.recipes.lock().unwrap();
        compose_view(&state.results, recipes.items(), &state.query)
    }

    /// Full record for one recipe: local ids resolve from the local store,
    /// remote ids from the catalog.
    pub async fn recipe_detail(&self, id: &RecipeId) -> Result<RecipeDetail, AppError> {
        match id {
            RecipeId::Local(_) => {
                let recipes = self.recipes.lock().unwrap();
                recipes
                    .find(id)
                    .map(local_detail)
                    .ok_or(AppError::LocalRecipeNotFound)
            }
            RecipeId::Remote(remote) => Ok(self.catalog.information(*remote).await?),
        }
    }

    /// Summaries for the bookmarked catalog recipes, resolved in one bulk
    /// request. No favorites means no request.
    pub async fn favorites_view(&self) -> Result<Vec<RecipeSummary>, AppError> {
        let remote_ids = self.favorites.lock().unwrap().remote_ids();
        if remote_ids.is_empty() {
            return Ok(Vec::new());
        }

        let details = self.catalog.information_bulk(&remote_ids).await?;
        Ok(details
            .into_iter()
            .map(|d| RecipeSummary {
                id: d.id,
                title: d.title,
                image: d.image,
                image_type: None,
            })
            .collect())
    }
}
