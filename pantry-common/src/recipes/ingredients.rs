//! The user's ingredient tags and the suggestion vocabulary

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixed vocabulary offered while the user types
pub const INGREDIENT_SUGGESTIONS: &[&str] = &[
    "Tomato", "Onion", "Garlic", "Potato", "Carrot", "Chicken", "Beef", "Rice",
    "Pasta", "Egg", "Milk", "Cheese", "Butter", "Olive Oil", "Flour", "Sugar",
    "Salt", "Pepper", "Basil", "Cilantro", "Lemon", "Lime", "Bell Pepper",
];

/// Why a tag was not added
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagRejected {
    #[error("Ingredient is blank")]
    Blank,

    #[error("{0} is already in your list.")]
    Duplicate(String),
}

/// Ordered list of trimmed, distinct ingredient tags
///
/// Duplicates are detected on the trimmed text exactly, so "Tomato" and
/// "tomato" are distinct tags. Matching against recipes is case-insensitive
/// regardless.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct IngredientList {
    tags: Vec<String>,
}

impl From<Vec<String>> for IngredientList {
    fn from(tags: Vec<String>) -> Self {
        Self::from_tags(tags)
    }
}

impl From<IngredientList> for Vec<String> {
    fn from(list: IngredientList) -> Self {
        list.tags
    }
}

impl IngredientList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list, dropping blanks and duplicates
    pub fn from_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Self::new();
        for tag in tags {
            let _ = list.add(tag.as_ref());
        }
        list
    }

    /// Add a tag; returns the stored (trimmed) form
    pub fn add(&mut self, tag: &str) -> Result<&str, TagRejected> {
        let formatted = tag.trim();
        if formatted.is_empty() {
            return Err(TagRejected::Blank);
        }
        if self.tags.iter().any(|t| t == formatted) {
            return Err(TagRejected::Duplicate(formatted.to_string()));
        }

        self.tags.push(formatted.to_string());
        Ok(self.tags.last().map(String::as_str).unwrap_or_default())
    }

    /// Remove a tag; returns whether it was present
    pub fn remove(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// Suggestions containing `input`, ignoring case; empty input suggests nothing
pub fn suggest(input: &str) -> Vec<&'static str> {
    let needle = input.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    INGREDIENT_SUGGESTIONS
        .iter()
        .copied()
        .filter(|s| s.to_lowercase().contains(&needle))
        .collect()
}
