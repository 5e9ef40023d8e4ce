//! Saved recipes of the logged-in user

use axum::extract::{Path, State};
use axum::Json;
use pantry_common::db::favorites as store;
use pantry_common::recipes::Recipe;
use serde::Serialize;
use tracing::{debug, warn};

use super::CurrentUser;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Favorites, oldest first
#[derive(Debug, Serialize)]
pub struct FavoriteList {
    pub recipes: Vec<Recipe>,
}

/// Membership after a change
#[derive(Debug, Serialize)]
pub struct FavoriteStatus {
    pub recipe_id: String,
    pub is_favorite: bool,
    /// False when the request did not change anything
    pub changed: bool,
}

/// GET /api/favorites
pub async fn list_favorites(State(state): State<AppState>, current: CurrentUser) -> ApiResult<Json<FavoriteList>> {
    let favorites = store::load_favorites(&state.db, current.user.id).await?;

    let recipes = favorites
        .ids()
        .iter()
        .filter_map(|id| {
            let recipe = state.catalog.get(id);
            if recipe.is_none() {
                warn!("Favorite {} is no longer in the catalog", id);
            }
            recipe.cloned()
        })
        .collect();

    Ok(Json(FavoriteList { recipes }))
}

/// PUT /api/favorites/:recipe_id
pub async fn add_favorite(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(recipe_id): Path<String>,
) -> ApiResult<Json<FavoriteStatus>> {
    if !state.catalog.contains(&recipe_id) {
        return Err(ApiError::NotFound(format!("Recipe {recipe_id}")));
    }

    let changed = store::add_favorite(&state.db, current.user.id, &recipe_id).await?;
    debug!("User {} saved recipe {}", current.user.id, recipe_id);

    Ok(Json(FavoriteStatus {
        recipe_id,
        is_favorite: true,
        changed,
    }))
}

/// DELETE /api/favorites/:recipe_id
pub async fn remove_favorite(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(recipe_id): Path<String>,
) -> ApiResult<Json<FavoriteStatus>> {
    let changed = store::remove_favorite(&state.db, current.user.id, &recipe_id).await?;
    debug!("User {} removed recipe {}", current.user.id, recipe_id);

    Ok(Json(FavoriteStatus {
        recipe_id,
        is_favorite: false,
        changed,
    }))
}
