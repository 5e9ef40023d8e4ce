//! Post likes
//!
//! A like is a `(post_id, user_id)` row; `recipe_posts.like_count` mirrors the
//! number of such rows. Both change inside one transaction.

use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::wall::LikeOutcome;
use crate::{time, Error, Result};

/// Like the post if the user has not, otherwise unlike it
pub async fn toggle_like(pool: &SqlitePool, user_id: Uuid, post_id: Uuid) -> Result<LikeOutcome> {
    let post = post_id.to_string();
    let user = user_id.to_string();

    let mut tx = pool.begin().await?;

    // Start with a write so the transaction holds the write lock from here on
    let removed = sqlx::query("DELETE FROM post_likes WHERE post_id = ? AND user_id = ?")
        .bind(&post)
        .bind(&user)
        .execute(&mut *tx)
        .await?
        .rows_affected()
        > 0;

    let liked = if removed {
        sqlx::query("UPDATE recipe_posts SET like_count = MAX(like_count - 1, 0) WHERE guid = ?")
            .bind(&post)
            .execute(&mut *tx)
            .await?;
        false
    } else {
        let updated = sqlx::query("UPDATE recipe_posts SET like_count = like_count + 1 WHERE guid = ?")
            .bind(&post)
            .execute(&mut *tx)
            .await?;
        if updated.rows_affected() == 0 {
            return Err(Error::NotFound(format!("Post {post_id}")));
        }

        sqlx::query("INSERT INTO post_likes (post_id, user_id, created_at) VALUES (?, ?, ?)")
            .bind(&post)
            .bind(&user)
            .bind(time::now_rfc3339())
            .execute(&mut *tx)
            .await?;
        true
    };

    let like_count: i64 = sqlx::query_scalar("SELECT like_count FROM recipe_posts WHERE guid = ?")
        .bind(&post)
        .fetch_one(&mut *tx)
        .await?;

    tx.commit().await?;

    debug!("User {user_id} {} post {post_id} ({like_count} likes)", if liked { "liked" } else { "unliked" });
    Ok(LikeOutcome { liked, like_count })
}

/// Number of like rows for a post
pub async fn count_likes(pool: &SqlitePool, post_id: Uuid) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM post_likes WHERE post_id = ?")
        .bind(post_id.to_string())
        .fetch_one(pool)
        .await?;
    Ok(count)
}
