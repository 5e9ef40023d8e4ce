//! Post comments

use sqlx::{Row, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use super::posts::ensure_post_exists;
use super::users::User;
use super::{parse_guid, parse_timestamp};
use crate::wall::{validate_comment, Comment, PostAuthor};
use crate::{time, Error, Result};

/// Add a comment and bump the post's `comment_count` in the same transaction
pub async fn add_comment(pool: &SqlitePool, author: &User, post_id: Uuid, body: &str) -> Result<Comment> {
    let body = validate_comment(body)?;
    let comment = Comment {
        id: Uuid::new_v4(),
        post_id,
        author: author.author(),
        body,
        created_at: time::now(),
    };

    let mut tx = pool.begin().await?;

    let updated = sqlx::query("UPDATE recipe_posts SET comment_count = comment_count + 1 WHERE guid = ?")
        .bind(post_id.to_string())
        .execute(&mut *tx)
        .await?;
    if updated.rows_affected() == 0 {
        return Err(Error::NotFound(format!("Post {post_id}")));
    }

    sqlx::query(
        r#"
        INSERT INTO post_comments (guid, post_id, user_id, body, created_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(comment.id.to_string())
    .bind(post_id.to_string())
    .bind(author.id.to_string())
    .bind(&comment.body)
    .bind(time::to_rfc3339(comment.created_at))
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    debug!("User {} commented on post {post_id}", author.id);
    Ok(comment)
}

/// Comments on a post, oldest first
pub async fn list_comments(pool: &SqlitePool, post_id: Uuid) -> Result<Vec<Comment>> {
    ensure_post_exists(pool, post_id).await?;

    let rows = sqlx::query(
        r#"
        SELECT c.guid, c.body, c.created_at, c.user_id, u.email AS author_email
        FROM post_comments c
        JOIN users u ON u.guid = c.user_id
        WHERE c.post_id = ?
        ORDER BY c.created_at ASC, c.rowid ASC
        "#,
    )
    .bind(post_id.to_string())
    .fetch_all(pool)
    .await?;

    rows.iter()
        .map(|row| {
            let guid: String = row.get("guid");
            let author_id: String = row.get("user_id");
            let created_at: String = row.get("created_at");
            Ok(Comment {
                id: parse_guid(&guid)?,
                post_id,
                author: PostAuthor {
                    id: parse_guid(&author_id)?,
                    email: row.get("author_email"),
                },
                body: row.get("body"),
                created_at: parse_timestamp(&created_at)?,
            })
        })
        .collect()
}
