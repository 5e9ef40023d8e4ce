//! Per-user favorites persistence

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::recipes::FavoritesStore;
use crate::{time, Result};

/// Load a user's saved recipe ids, oldest first
pub async fn load_favorites(pool: &SqlitePool, user_id: Uuid) -> Result<FavoritesStore> {
    let ids: Vec<String> =
        sqlx::query_scalar("SELECT recipe_id FROM favorites WHERE user_id = ? ORDER BY rowid ASC")
            .bind(user_id.to_string())
            .fetch_all(pool)
            .await?;

    Ok(FavoritesStore::from_ids(ids))
}

/// Save a recipe; returns false if it was already saved
pub async fn add_favorite(pool: &SqlitePool, user_id: Uuid, recipe_id: &str) -> Result<bool> {
    let result = sqlx::query(
        r#"
        INSERT OR IGNORE INTO favorites (user_id, recipe_id, created_at)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(user_id.to_string())
    .bind(recipe_id)
    .bind(time::now_rfc3339())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Unsave a recipe; returns false if it was not saved
pub async fn remove_favorite(pool: &SqlitePool, user_id: Uuid, recipe_id: &str) -> Result<bool> {
    let result = sqlx::query("DELETE FROM favorites WHERE user_id = ? AND recipe_id = ?")
        .bind(user_id.to_string())
        .bind(recipe_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
