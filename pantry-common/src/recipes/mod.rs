//! Recipe catalog and discovery logic
//!
//! The catalog is a fixed, in-memory list of recipes loaded once at startup.
//! Discovery runs over it in three steps:
//! - [`ingredients`]: the user's free-text ingredient tags
//! - [`matcher`]: substring matching on ingredients, then diet/cuisine narrowing
//! - [`favorites`]: marking results the user has saved

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::{Error, Result};

pub mod favorites;
pub mod filters;
pub mod ingredients;
pub mod matcher;

pub use favorites::FavoritesStore;
pub use filters::{CuisineFilter, DietaryFilter};
pub use ingredients::{suggest, IngredientList, TagRejected};
pub use matcher::{refine, search, MatchError, RecipeMatch, RecipeQuery};

/// Seed catalog bundled into the binary
const BUILTIN_CATALOG: &str = include_str!("../../data/recipes.json");

/// One ingredient line of a recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub name: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub unit: String,
}

/// Catalog recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub image: String,
    #[serde(alias = "readyInMinutes")]
    pub ready_in_minutes: u32,
    pub servings: u32,
    #[serde(default)]
    pub cuisines: Vec<String>,
    #[serde(default, alias = "dishTypes")]
    pub dish_types: Vec<String>,
    #[serde(default)]
    pub diets: Vec<String>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub instructions: String,
    pub ingredients: Vec<RecipeIngredient>,
}

impl Recipe {
    /// Instruction steps: one per non-blank line, trimmed
    pub fn steps(&self) -> Vec<&str> {
        self.instructions
            .lines()
            .map(str::trim)
            .filter(|step| !step.is_empty())
            .collect()
    }
}

/// Immutable recipe collection with lookup by id
#[derive(Debug, Clone, Default)]
pub struct RecipeCatalog {
    recipes: Vec<Recipe>,
    by_id: HashMap<String, usize>,
}

impl RecipeCatalog {
    /// Build a catalog, rejecting duplicate ids
    pub fn new(recipes: Vec<Recipe>) -> Result<Self> {
        let mut by_id = HashMap::with_capacity(recipes.len());
        for (index, recipe) in recipes.iter().enumerate() {
            if by_id.insert(recipe.id.clone(), index).is_some() {
                return Err(Error::InvalidInput(format!(
                    "Duplicate recipe id in catalog: {}",
                    recipe.id
                )));
            }
        }

        Ok(Self { recipes, by_id })
    }

    /// Parse a JSON array of recipes
    pub fn from_json(content: &str) -> Result<Self> {
        let recipes: Vec<Recipe> = serde_json::from_str(content)?;
        Self::new(recipes)
    }

    /// Read a catalog file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// The bundled seed catalog
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_CATALOG)
    }

    pub fn get(&self, id: &str) -> Option<&Recipe> {
        self.by_id.get(id).map(|&index| &self.recipes[index])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Recipes in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.iter()
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}
