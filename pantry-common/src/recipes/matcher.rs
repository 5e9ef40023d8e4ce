//! Ingredient matcher
//!
//! A recipe is a hit when at least one user tag is a case-insensitive
//! substring of at least one of its ingredient names. Hits are then narrowed
//! by diet and cuisine equality and ranked by how many tags they matched.
//! Ties keep catalog order.

use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use thiserror::Error;

use super::{CuisineFilter, DietaryFilter, FavoritesStore, IngredientList, Recipe, RecipeCatalog};

/// Search input: the user's tags plus both single-select filters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeQuery {
    #[serde(default)]
    pub ingredients: IngredientList,
    #[serde(default)]
    pub diet: DietaryFilter,
    #[serde(default)]
    pub cuisine: CuisineFilter,
}

/// A recipe card in a result set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeMatch {
    #[serde(flatten)]
    pub recipe: Recipe,
    /// User tags that hit this recipe, in the user's order
    pub matched_ingredients: Vec<String>,
    pub is_favorite: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("Please add at least one ingredient to search for recipes.")]
    NoIngredients,
}

/// Result notification shown after a search
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchSummary {
    pub title: String,
    pub description: String,
}

/// Run an ingredient search over the catalog
pub fn search(
    catalog: &RecipeCatalog,
    query: &RecipeQuery,
    favorites: &FavoritesStore,
) -> Result<Vec<RecipeMatch>, MatchError> {
    if query.ingredients.is_empty() {
        return Err(MatchError::NoIngredients);
    }

    let needles: Vec<(&str, String)> = query
        .ingredients
        .iter()
        .map(|tag| (tag, tag.to_lowercase()))
        .collect();

    let mut matches: Vec<RecipeMatch> = catalog
        .iter()
        .filter(|recipe| matches_diet(recipe, query.diet) && matches_cuisine(recipe, query.cuisine))
        .filter_map(|recipe| {
            let matched = matched_tags(recipe, &needles);
            (!matched.is_empty()).then(|| RecipeMatch {
                recipe: recipe.clone(),
                matched_ingredients: matched,
                is_favorite: favorites.contains(&recipe.id),
            })
        })
        .collect();

    // sort_by_key is stable, so equal counts stay in catalog order
    matches.sort_by_key(|m| Reverse(m.matched_ingredients.len()));

    Ok(matches)
}

/// Re-apply only the diet and cuisine filters to an existing result set
pub fn refine(matches: &[RecipeMatch], diet: DietaryFilter, cuisine: CuisineFilter) -> Vec<RecipeMatch> {
    matches
        .iter()
        .filter(|m| matches_diet(&m.recipe, diet) && matches_cuisine(&m.recipe, cuisine))
        .cloned()
        .collect()
}

pub fn matches_diet(recipe: &Recipe, diet: DietaryFilter) -> bool {
    diet.accepts(&recipe.diets)
}

pub fn matches_cuisine(recipe: &Recipe, cuisine: CuisineFilter) -> bool {
    cuisine.accepts(&recipe.cuisines)
}

/// Notification text for a finished search
pub fn summarize(found: usize, ingredient_count: usize) -> SearchSummary {
    let plural = if ingredient_count == 1 { "" } else { "s" };
    SearchSummary {
        title: format!("Found {found} recipes"),
        description: format!("Based on your {ingredient_count} ingredient{plural} and filters."),
    }
}

fn matched_tags(recipe: &Recipe, needles: &[(&str, String)]) -> Vec<String> {
    let names: Vec<String> = recipe
        .ingredients
        .iter()
        .map(|i| i.name.to_lowercase())
        .collect();

    needles
        .iter()
        .filter(|(_, needle)| names.iter().any(|name| name.contains(needle.as_str())))
        .map(|(tag, _)| tag.to_string())
        .collect()
}
