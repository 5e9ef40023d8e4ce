//! Community wall endpoints

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use pantry_common::db::{comments, likes, posts};
use pantry_common::wall::{Comment, LikeOutcome, NewPost, Post, WallFilter};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{CurrentUser, OptionalUser};
use crate::error::{ApiError, ApiResult};
use crate::pagination::{Pagination, PAGE_SIZE};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct WallQuery {
    #[serde(default)]
    pub filter: WallFilter,
    #[serde(default = "first_page")]
    pub page: i64,
}

fn first_page() -> i64 {
    1
}

#[derive(Debug, Serialize)]
pub struct WallPage {
    pub filter: WallFilter,
    pub page: i64,
    pub total_pages: i64,
    pub total: i64,
    pub has_next: bool,
    pub posts: Vec<Post>,
}

#[derive(Debug, Deserialize)]
pub struct NewComment {
    pub body: String,
}

#[derive(Debug, Serialize)]
pub struct CommentList {
    pub comments: Vec<Comment>,
}

/// GET /api/wall/posts?filter=all|popular|recent&page=N
pub async fn list_posts(
    State(state): State<AppState>,
    viewer: OptionalUser,
    query: Result<Query<WallQuery>, QueryRejection>,
) -> ApiResult<Json<WallPage>> {
    let Query(query) = query?;

    let total = posts::count_posts(&state.db).await?;
    let pagination = Pagination::clamp(total, query.page, PAGE_SIZE);
    let posts = posts::list_posts(&state.db, query.filter, viewer.id(), pagination.limit, pagination.offset).await?;

    Ok(Json(WallPage {
        filter: query.filter,
        page: pagination.page,
        total_pages: pagination.total_pages,
        total,
        has_next: pagination.has_next(),
        posts,
    }))
}

/// POST /api/wall/posts
pub async fn create_post(
    State(state): State<AppState>,
    current: CurrentUser,
    payload: Result<Json<NewPost>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Post>)> {
    let Json(new_post) = payload?;
    let post = posts::create_post(&state.db, &current.user, new_post).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

/// GET /api/wall/posts/:id
pub async fn get_post(
    State(state): State<AppState>,
    viewer: OptionalUser,
    id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<Post>> {
    let Path(id) = id?;
    posts::get_post(&state.db, id, viewer.id())
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Post {id}")))
}

/// DELETE /api/wall/posts/:id
pub async fn delete_post(
    State(state): State<AppState>,
    current: CurrentUser,
    id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = id?;
    posts::delete_post(&state.db, current.user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/wall/posts/:id/like
pub async fn toggle_like(
    State(state): State<AppState>,
    current: CurrentUser,
    id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<LikeOutcome>> {
    let Path(id) = id?;
    Ok(Json(likes::toggle_like(&state.db, current.user.id, id).await?))
}

/// GET /api/wall/posts/:id/comments
pub async fn list_comments(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<CommentList>> {
    let Path(id) = id?;
    let comments = comments::list_comments(&state.db, id).await?;
    Ok(Json(CommentList { comments }))
}

/// POST /api/wall/posts/:id/comments
pub async fn add_comment(
    State(state): State<AppState>,
    current: CurrentUser,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<NewComment>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Comment>)> {
    let Path(id) = id?;
    let Json(new_comment) = payload?;
    let comment = comments::add_comment(&state.db, &current.user, id, &new_comment.body).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}
