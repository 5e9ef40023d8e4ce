//! Favorites store
//!
//! Set of saved recipe ids, kept in insertion order. Every mutation has a
//! `_and_mark` twin that also updates the `is_favorite` flag of the matching
//! entry in a displayed result list, so the flag always mirrors membership.

use std::collections::HashSet;

use super::RecipeMatch;

#[derive(Debug, Clone, Default)]
pub struct FavoritesStore {
    order: Vec<String>,
    members: HashSet<String>,
}

impl FavoritesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from persisted ids, ignoring repeats
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut store = Self::new();
        for id in ids {
            store.insert(id.into());
        }
        store
    }

    /// Add a recipe id; returns false if it was already saved
    pub fn add(&mut self, recipe_id: &str) -> bool {
        self.insert(recipe_id.to_string())
    }

    /// Remove a recipe id; returns false if it was not saved
    pub fn remove(&mut self, recipe_id: &str) -> bool {
        if !self.members.remove(recipe_id) {
            return false;
        }
        self.order.retain(|id| id != recipe_id);
        true
    }

    /// Flip membership; returns the new state
    pub fn toggle(&mut self, recipe_id: &str) -> bool {
        if self.contains(recipe_id) {
            self.remove(recipe_id);
            false
        } else {
            self.add(recipe_id);
            true
        }
    }

    pub fn contains(&self, recipe_id: &str) -> bool {
        self.members.contains(recipe_id)
    }

    /// Saved ids, oldest first
    pub fn ids(&self) -> &[String] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn add_and_mark(&mut self, recipe_id: &str, displayed: &mut [RecipeMatch]) -> bool {
        let added = self.add(recipe_id);
        self.sync_flags(displayed);
        added
    }

    pub fn remove_and_mark(&mut self, recipe_id: &str, displayed: &mut [RecipeMatch]) -> bool {
        let removed = self.remove(recipe_id);
        self.sync_flags(displayed);
        removed
    }

    pub fn toggle_and_mark(&mut self, recipe_id: &str, displayed: &mut [RecipeMatch]) -> bool {
        let now_favorite = self.toggle(recipe_id);
        self.sync_flags(displayed);
        now_favorite
    }

    /// Set every display flag from membership
    pub fn sync_flags(&self, displayed: &mut [RecipeMatch]) {
        for entry in displayed {
            entry.is_favorite = self.contains(&entry.recipe.id);
        }
    }

    fn insert(&mut self, recipe_id: String) -> bool {
        if !self.members.insert(recipe_id.clone()) {
            return false;
        }
        self.order.push(recipe_id);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipes::test_support::catalog;
    use crate::recipes::{search, CuisineFilter, DietaryFilter, IngredientList, RecipeQuery};

    fn displayed() -> Vec<RecipeMatch> {
        let query = RecipeQuery {
            ingredients: IngredientList::from_tags(["tomato", "rice"]),
            diet: DietaryFilter::All,
            cuisine: CuisineFilter::All,
        };
        search(&catalog(), &query, &FavoritesStore::new()).unwrap()
    }

    fn flags_match(store: &FavoritesStore, list: &[RecipeMatch]) -> bool {
        list.iter().all(|m| m.is_favorite == store.contains(&m.recipe.id))
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut store = FavoritesStore::new();
        assert!(store.add("1"));
        assert!(!store.add("1"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut store = FavoritesStore::from_ids(["1", "2"]);
        assert!(store.remove("1"));
        assert!(!store.remove("1"));
        assert_eq!(store.ids(), &["2".to_string()]);
    }

    #[test]
    fn test_insertion_order_kept() {
        let store = FavoritesStore::from_ids(["3", "1", "3", "2"]);
        assert_eq!(store.ids(), &["3".to_string(), "1".to_string(), "2".to_string()]);
    }

    #[test]
    fn test_toggle_alternates() {
        let mut store = FavoritesStore::new();
        assert!(store.toggle("5"));
        assert!(!store.toggle("5"));
        assert!(store.toggle("5"));
        assert!(store.contains("5"));
    }

    #[test]
    fn test_flags_follow_membership() {
        let mut store = FavoritesStore::new();
        let mut list = displayed();

        store.add_and_mark("4", &mut list);
        assert!(flags_match(&store, &list));
        assert!(list.iter().any(|m| m.recipe.id == "4" && m.is_favorite));

        store.add_and_mark("3", &mut list);
        store.remove_and_mark("4", &mut list);
        assert!(flags_match(&store, &list));
        assert!(list.iter().all(|m| m.recipe.id != "4" || !m.is_favorite));

        assert!(store.toggle_and_mark("4", &mut list));
        assert!(flags_match(&store, &list));
        assert!(!store.toggle_and_mark("4", &mut list));
        assert!(flags_match(&store, &list));
    }

    #[test]
    fn test_favoriting_hidden_recipe_keeps_flags_consistent() {
        // A recipe not in the displayed list can still be saved
        let mut store = FavoritesStore::new();
        let mut list = displayed();
        assert!(store.add_and_mark("not-shown", &mut list));
        assert!(list.iter().all(|m| !m.is_favorite));
        assert!(store.contains("not-shown"));
    }
}
