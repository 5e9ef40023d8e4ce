//! Recipe discovery endpoints

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use pantry_common::db::favorites::load_favorites;
use pantry_common::recipes::matcher::{summarize, SearchSummary};
use pantry_common::recipes::{
    refine, search, suggest, CuisineFilter, DietaryFilter, FavoritesStore, Recipe, RecipeMatch,
    RecipeQuery,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::OptionalUser;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: Vec<RecipeMatch>,
    pub summary: SearchSummary,
}

#[derive(Debug, Deserialize)]
pub struct RefineRequest {
    pub recipe_ids: Vec<String>,
    #[serde(default)]
    pub diet: DietaryFilter,
    #[serde(default)]
    pub cuisine: CuisineFilter,
}

/// Ids that survive the filters, in request order
#[derive(Debug, Serialize)]
pub struct RefineResponse {
    pub recipe_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct SuggestionQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct SuggestionResponse {
    pub suggestions: Vec<&'static str>,
}

/// Recipe detail view
#[derive(Debug, Serialize)]
pub struct RecipeDetail {
    #[serde(flatten)]
    pub recipe: Recipe,
    pub steps: Vec<String>,
    pub is_favorite: bool,
}

async fn favorites_for(state: &AppState, viewer: &OptionalUser) -> ApiResult<FavoritesStore> {
    match viewer.id() {
        Some(user_id) => Ok(load_favorites(&state.db, user_id).await?),
        None => Ok(FavoritesStore::new()),
    }
}

/// POST /api/recipes/search
pub async fn search_recipes(
    State(state): State<AppState>,
    viewer: OptionalUser,
    payload: Result<Json<RecipeQuery>, JsonRejection>,
) -> ApiResult<Json<SearchResponse>> {
    let Json(query) = payload?;
    let favorites = favorites_for(&state, &viewer).await?;

    let results = search(&state.catalog, &query, &favorites).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    debug!(
        "Search for {} ingredient(s), diet={}, cuisine={}: {} hits",
        query.ingredients.len(),
        query.diet,
        query.cuisine,
        results.len()
    );

    let summary = summarize(results.len(), query.ingredients.len());
    Ok(Json(SearchResponse { results, summary }))
}

/// POST /api/recipes/refine
///
/// Re-applies diet and cuisine to recipes the client already shows, without
/// repeating the ingredient search. Unknown ids are dropped.
pub async fn refine_recipes(
    State(state): State<AppState>,
    payload: Result<Json<RefineRequest>, JsonRejection>,
) -> ApiResult<Json<RefineResponse>> {
    let Json(request) = payload?;

    let shown: Vec<RecipeMatch> = request
        .recipe_ids
        .iter()
        .filter_map(|id| state.catalog.get(id))
        .map(|recipe| RecipeMatch {
            recipe: recipe.clone(),
            matched_ingredients: Vec::new(),
            is_favorite: false,
        })
        .collect();

    let recipe_ids = refine(&shown, request.diet, request.cuisine)
        .into_iter()
        .map(|m| m.recipe.id)
        .collect();

    Ok(Json(RefineResponse { recipe_ids }))
}

/// GET /api/recipes/suggestions?q=
pub async fn ingredient_suggestions(
    query: Result<Query<SuggestionQuery>, QueryRejection>,
) -> ApiResult<Json<SuggestionResponse>> {
    let Query(query) = query?;
    Ok(Json(SuggestionResponse {
        suggestions: suggest(&query.q),
    }))
}

/// GET /api/recipes/:id
pub async fn get_recipe(
    State(state): State<AppState>,
    viewer: OptionalUser,
    Path(id): Path<String>,
) -> ApiResult<Json<RecipeDetail>> {
    let recipe = state
        .catalog
        .get(&id)
        .ok_or_else(|| ApiError::NotFound(format!("Recipe {id}")))?;
    let favorites = favorites_for(&state, &viewer).await?;

    Ok(Json(RecipeDetail {
        steps: recipe.steps().into_iter().map(str::to_string).collect(),
        is_favorite: favorites.contains(&recipe.id),
        recipe: recipe.clone(),
    }))
}
