//! Wall post queries

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::info;
use uuid::Uuid;

use super::users::User;
use super::{parse_guid, parse_timestamp};
use crate::wall::{NewPost, Post, PostAuthor, WallFilter};
use crate::{time, Error, Result};

/// Columns shared by every post query; the single bind is the viewer's guid
const POST_SELECT: &str = r#"
    SELECT p.guid, p.title, p.description, p.image_url, p.recipe_id,
           p.like_count, p.comment_count, p.created_at,
           p.user_id, u.email AS author_email,
           EXISTS (
               SELECT 1 FROM post_likes l
               WHERE l.post_id = p.guid AND l.user_id = ?
           ) AS liked_by_me
    FROM recipe_posts p
    JOIN users u ON u.guid = p.user_id
"#;

fn order_clause(filter: WallFilter) -> &'static str {
    // rowid breaks ties so equal keys list the newest insert first
    match filter {
        WallFilter::Popular => "ORDER BY p.like_count DESC, p.rowid DESC",
        WallFilter::All | WallFilter::Recent => "ORDER BY p.created_at DESC, p.rowid DESC",
    }
}

fn post_from_row(row: &SqliteRow) -> Result<Post> {
    let guid: String = row.get("guid");
    let author_id: String = row.get("user_id");
    let created_at: String = row.get("created_at");
    let liked_by_me: i64 = row.get("liked_by_me");

    Ok(Post {
        id: parse_guid(&guid)?,
        title: row.get("title"),
        description: row.get("description"),
        image_url: row.get("image_url"),
        recipe_id: row.get("recipe_id"),
        like_count: row.get("like_count"),
        comment_count: row.get("comment_count"),
        author: PostAuthor {
            id: parse_guid(&author_id)?,
            email: row.get("author_email"),
        },
        created_at: parse_timestamp(&created_at)?,
        liked_by_me: liked_by_me != 0,
    })
}

fn viewer_param(viewer: Option<Uuid>) -> String {
    viewer.map(|id| id.to_string()).unwrap_or_default()
}

/// Publish a post; counters start at zero
pub async fn create_post(pool: &SqlitePool, author: &User, new_post: NewPost) -> Result<Post> {
    let new_post = new_post.validated()?;
    let post = Post {
        id: Uuid::new_v4(),
        title: new_post.title,
        description: new_post.description,
        image_url: new_post.image_url,
        recipe_id: new_post.recipe_id,
        like_count: 0,
        comment_count: 0,
        author: author.author(),
        created_at: time::now(),
        liked_by_me: false,
    };

    sqlx::query(
        r#"
        INSERT INTO recipe_posts (
            guid, user_id, title, description, image_url, recipe_id,
            like_count, comment_count, created_at
        ) VALUES (?, ?, ?, ?, ?, ?, 0, 0, ?)
        "#,
    )
    .bind(post.id.to_string())
    .bind(author.id.to_string())
    .bind(&post.title)
    .bind(&post.description)
    .bind(&post.image_url)
    .bind(&post.recipe_id)
    .bind(time::to_rfc3339(post.created_at))
    .execute(pool)
    .await?;

    info!("User {} created post {}", author.id, post.id);
    Ok(post)
}

/// One page of the wall in the requested order
///
/// Callers paginate with `count_posts`, so the page and its totals come from
/// a single count.
pub async fn list_posts(
    pool: &SqlitePool,
    filter: WallFilter,
    viewer: Option<Uuid>,
    limit: i64,
    offset: i64,
) -> Result<Vec<Post>> {
    let sql = format!("{POST_SELECT} {} LIMIT ? OFFSET ?", order_clause(filter));
    let rows = sqlx::query(&sql)
        .bind(viewer_param(viewer))
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

    rows.iter().map(post_from_row).collect()
}

pub async fn count_posts(pool: &SqlitePool) -> Result<i64> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM recipe_posts")
        .fetch_one(pool)
        .await?;
    Ok(total)
}

pub async fn get_post(pool: &SqlitePool, post_id: Uuid, viewer: Option<Uuid>) -> Result<Option<Post>> {
    let sql = format!("{POST_SELECT} WHERE p.guid = ?");
    let row = sqlx::query(&sql)
        .bind(viewer_param(viewer))
        .bind(post_id.to_string())
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(post_from_row).transpose()
}

/// Delete a post and, through cascades, its likes and comments
///
/// Only the author may delete.
pub async fn delete_post(pool: &SqlitePool, user_id: Uuid, post_id: Uuid) -> Result<()> {
    let owner: Option<String> = sqlx::query_scalar("SELECT user_id FROM recipe_posts WHERE guid = ?")
        .bind(post_id.to_string())
        .fetch_optional(pool)
        .await?;

    match owner {
        None => Err(Error::NotFound(format!("Post {post_id}"))),
        Some(owner) if owner != user_id.to_string() => {
            Err(Error::Forbidden("Only the author can delete this post".to_string()))
        }
        Some(_) => {
            sqlx::query("DELETE FROM recipe_posts WHERE guid = ?")
                .bind(post_id.to_string())
                .execute(pool)
                .await?;
            info!("User {user_id} deleted post {post_id}");
            Ok(())
        }
    }
}

/// Fail with `NotFound` unless the post exists
pub(crate) async fn ensure_post_exists<'e, E>(executor: E, post_id: Uuid) -> Result<()>
where
    E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
{
    let exists: Option<i64> = sqlx::query_scalar("SELECT 1 FROM recipe_posts WHERE guid = ?")
        .bind(post_id.to_string())
        .fetch_optional(executor)
        .await?;

    exists
        .map(|_| ())
        .ok_or_else(|| Error::NotFound(format!("Post {post_id}")))
}
