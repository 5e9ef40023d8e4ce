//! pantry-server library - PantryPal HTTP API
//!
//! Recipe discovery over an in-memory catalog, per-user favorites, and the
//! community wall, all stored in one SQLite database.

use axum::extract::DefaultBodyLimit;
use axum::Router;
use pantry_common::recipes::RecipeCatalog;
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;
pub mod pagination;
pub mod storage;

use storage::{ImageStore, MAX_IMAGE_BYTES, UPLOADS_URL_PREFIX};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Read-only recipe catalog
    pub catalog: Arc<RecipeCatalog>,
    /// Image upload store
    pub images: Arc<ImageStore>,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, catalog: RecipeCatalog, images: ImageStore) -> Self {
        Self {
            db,
            catalog: Arc::new(catalog),
            images: Arc::new(images),
        }
    }
}

/// Build application router
///
/// Handlers that need a login take the `CurrentUser` extractor, which answers
/// 401 on its own; `OptionalUser` handlers also serve anonymous callers.
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post, put};

    let uploads_dir = state.images.dir().to_path_buf();

    let auth = Router::new()
        .route("/api/auth/signup", post(api::signup))
        .route("/api/auth/login", post(api::login))
        .route("/api/auth/logout", post(api::logout))
        .route("/api/auth/me", get(api::me));

    let recipes = Router::new()
        .route("/api/recipes/search", post(api::search_recipes))
        .route("/api/recipes/refine", post(api::refine_recipes))
        .route("/api/recipes/suggestions", get(api::ingredient_suggestions))
        .route("/api/recipes/:id", get(api::get_recipe))
        .route("/api/favorites", get(api::list_favorites))
        .route(
            "/api/favorites/:recipe_id",
            put(api::add_favorite).delete(api::remove_favorite),
        );

    let wall = Router::new()
        .route("/api/wall/posts", get(api::list_posts).post(api::create_post))
        .route("/api/wall/posts/:id", get(api::get_post).delete(api::delete_post))
        .route("/api/wall/posts/:id/like", post(api::toggle_like))
        .route(
            "/api/wall/posts/:id/comments",
            get(api::list_comments).post(api::add_comment),
        );

    // Body limit sits above MAX_IMAGE_BYTES; ImageStore enforces the real cap
    let uploads = Router::new()
        .route("/api/uploads", post(api::upload_image))
        .layer(DefaultBodyLimit::max(MAX_IMAGE_BYTES * 2));

    Router::new()
        .merge(api::status_routes())
        .merge(auth)
        .merge(recipes)
        .merge(wall)
        .merge(uploads)
        .nest_service(UPLOADS_URL_PREFIX, ServeDir::new(uploads_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
