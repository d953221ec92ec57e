//! Merges local recipes with catalog results into one display list.

use catalog::models::{RecipeDetail, RecipeSummary};

use crate::recipes::LocalRecipe;

pub const LIST_PLACEHOLDER: &str = "https://via.placeholder.com/600x400?text=Local+Recipe";
pub const DETAIL_PLACEHOLDER: &str = "https://via.placeholder.com/800x500?text=Local+Recipe";

/// List projection of a local recipe.
pub fn local_summary(recipe: &LocalRecipe) -> RecipeSummary {
    RecipeSummary {
        id: recipe.id.clone(),
        title: recipe.title.clone(),
        image: recipe
            .image
            .clone()
            .unwrap_or_else(|| LIST_PLACEHOLDER.to_string()),
        image_type: None,
    }
}

/// Detail projection of a local recipe.
pub fn local_detail(recipe: &LocalRecipe) -> RecipeDetail {
    RecipeDetail {
        id: recipe.id.clone(),
        title: recipe.title.clone(),
        image: recipe
            .image
            .clone()
            .unwrap_or_else(|| DETAIL_PLACEHOLDER.to_string()),
        summary: recipe.summary.clone(),
        ready_in_minutes: recipe.ready_in_minutes,
        servings: recipe.servings,
        source_url: recipe.source_url.clone(),
    }
}

/// Local recipes first (their stored newest-first order), then the catalog
/// page. A non-empty query filters the merged list by case-insensitive
/// substring match on the title; the same string also drove the remote fetch,
/// so local and remote entries get filtered alike.
pub fn compose_view(
    results: &[RecipeSummary],
    local: &[LocalRecipe],
    query: &str,
) -> Vec<RecipeSummary> {
    let mut merged: Vec<RecipeSummary> = local.iter().map(local_summary).collect();
    merged.extend_from_slice(results);

    if query.is_empty() {
        return merged;
    }

    let needle = query.to_lowercase();
    merged.retain(|m| m.title.to_lowercase().contains(&needle));
    merged
}
