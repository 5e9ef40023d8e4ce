//! Image upload endpoint
//!
//! The raw request body is the image; its type comes from `Content-Type` and
//! its name from the `filename` query parameter.

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, QueryRejection},
        Query, State,
    },
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    Json,
};
use serde::Deserialize;

use super::CurrentUser;
use crate::error::ApiResult;
use crate::storage::StoredImage;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct UploadQuery {
    pub filename: String,
}

/// POST /api/uploads?filename=dish.jpg
pub async fn upload_image(
    State(state): State<AppState>,
    current: CurrentUser,
    query: Result<Query<UploadQuery>, QueryRejection>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<(StatusCode, Json<StoredImage>)> {
    let Query(query) = query?;
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    let body = body?;

    let stored = state.images.save(&query.filename, content_type, &body).await?;
    tracing::info!("User {} uploaded {}", current.user.id, stored.url);

    Ok((StatusCode::CREATED, Json(stored)))
}
