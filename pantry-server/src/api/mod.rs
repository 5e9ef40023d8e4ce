//! HTTP API handlers for pantry-server

pub mod auth;
pub mod favorites;
pub mod recipes;
pub mod status;
pub mod uploads;
pub mod wall;

pub use auth::{login, logout, me, signup, CurrentUser, OptionalUser};
pub use favorites::{add_favorite, list_favorites, remove_favorite};
pub use recipes::{get_recipe, ingredient_suggestions, refine_recipes, search_recipes};
pub use status::status_routes;
pub use uploads::upload_image;
pub use wall::{add_comment, create_post, delete_post, get_post, list_comments, list_posts, toggle_like};
