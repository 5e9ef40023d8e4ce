//! # PantryPal Common Library
//!
//! Shared code for the PantryPal recipe service including:
//! - Recipe catalog and the ingredient matcher
//! - Favorites store and ingredient tag list
//! - Community wall types
//! - Account helpers (password hashing, session tokens)
//! - SQLite schema and queries
//! - Configuration loading

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod recipes;
pub mod time;
pub mod wall;

pub use error::{Error, Result};
