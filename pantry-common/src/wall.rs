//! Community wall types
//!
//! Recipe posts are user-submitted photos of home-cooked dishes. They are
//! unrelated to catalog recipes except for an optional `recipe_id` link.
//! Queries live in [`crate::db::posts`], [`crate::db::likes`] and
//! [`crate::db::comments`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::{Error, Result};

/// Longest accepted post title, in characters
pub const MAX_TITLE_LEN: usize = 120;
/// Longest accepted post description or comment body, in characters
pub const MAX_BODY_LEN: usize = 2000;

/// Wall ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WallFilter {
    /// Newest first
    #[default]
    All,
    /// Most liked first
    Popular,
    /// Newest first
    Recent,
}

impl WallFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            WallFilter::All => "all",
            WallFilter::Popular => "popular",
            WallFilter::Recent => "recent",
        }
    }
}

impl fmt::Display for WallFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WallFilter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(WallFilter::All),
            "popular" => Ok(WallFilter::Popular),
            "recent" => Ok(WallFilter::Recent),
            other => Err(format!("Unknown wall filter: {other}")),
        }
    }
}

/// Public view of a user attached to posts and comments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostAuthor {
    pub id: Uuid,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub image_url: String,
    pub recipe_id: Option<String>,
    pub like_count: i64,
    pub comment_count: i64,
    pub author: PostAuthor,
    pub created_at: DateTime<Utc>,
    /// Whether the requesting user likes this post; false when anonymous
    #[serde(default)]
    pub liked_by_me: bool,
}

/// Input for a new post
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub image_url: String,
    #[serde(default)]
    pub recipe_id: Option<String>,
}

impl NewPost {
    /// Trim fields, drop a blank description, and check required values
    pub fn validated(self) -> Result<NewPost> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(Error::InvalidInput("Post title is required".to_string()));
        }
        if title.chars().count() > MAX_TITLE_LEN {
            return Err(Error::InvalidInput(format!(
                "Post title must be at most {MAX_TITLE_LEN} characters"
            )));
        }

        let image_url = self.image_url.trim().to_string();
        if image_url.is_empty() {
            return Err(Error::InvalidInput("An image is required".to_string()));
        }

        let description = self
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        if let Some(d) = &description {
            check_body_len(d)?;
        }

        let recipe_id = self
            .recipe_id
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());

        Ok(NewPost {
            title,
            description,
            image_url,
            recipe_id,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author: PostAuthor,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Trimmed comment body, rejecting blank or oversized text
pub fn validate_comment(body: &str) -> Result<String> {
    let body = body.trim();
    if body.is_empty() {
        return Err(Error::InvalidInput("Comment cannot be empty".to_string()));
    }
    check_body_len(body)?;
    Ok(body.to_string())
}

/// State after a like toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeOutcome {
    pub liked: bool,
    pub like_count: i64,
}

fn check_body_len(body: &str) -> Result<()> {
    if body.chars().count() > MAX_BODY_LEN {
        return Err(Error::InvalidInput(format!(
            "Text must be at most {MAX_BODY_LEN} characters"
        )));
    }
    Ok(())
}
