//! In-memory recipe collection.
//!
//! The store keeps recipes in insertion order and hands out ids from a
//! counter that only ever grows. Saving and re-rendering after a mutation
//! are the caller's job (see [`RecipeBook`](crate::RecipeBook)).

use crate::model::{NewRecipe, Recipe, RecipeId};
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, warn};

/// Largest id the store accepts from persisted data.
///
/// Stored ids are JSON numbers, so they are kept within the range a
/// double represents exactly (2^53 - 1).
pub const MAX_RECIPE_ID: RecipeId = (1 << 53) - 1;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Recipe id {0} is out of range")]
    IdOutOfRange(RecipeId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeStore {
    recipes: Vec<Recipe>,
    next_id: RecipeId,
}

impl Default for RecipeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecipeStore {
    /// Creates an empty store. The first recipe gets id 1.
    pub fn new() -> Self {
        RecipeStore {
            recipes: Vec::new(),
            next_id: 1,
        }
    }

    /// Rebuilds a store from persisted parts.
    ///
    /// `next_id` is raised above every existing id so that a stale or
    /// missing counter can never produce a duplicate. Data written with
    /// length-derived ids can hold the same id twice; every repeat after the
    /// first keeps its position but is given a fresh id from the counter.
    pub fn from_parts(
        mut recipes: Vec<Recipe>,
        next_id: Option<RecipeId>,
    ) -> Result<Self, StoreError> {
        if let Some(id) = next_id.filter(|&id| id > MAX_RECIPE_ID + 1) {
            return Err(StoreError::IdOutOfRange(id));
        }
        if let Some(recipe) = recipes.iter().find(|r| r.id > MAX_RECIPE_ID) {
            return Err(StoreError::IdOutOfRange(recipe.id));
        }

        let floor = recipes.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        let mut next_id = next_id.map_or(floor, |id| id.max(floor));

        let mut seen = HashSet::with_capacity(recipes.len());
        for recipe in &mut recipes {
            if seen.insert(recipe.id) {
                continue;
            }
            if next_id > MAX_RECIPE_ID {
                return Err(StoreError::IdOutOfRange(next_id));
            }
            warn!(
                old_id = recipe.id,
                new_id = next_id,
                title = %recipe.title,
                "reassigning duplicate recipe id"
            );
            recipe.id = next_id;
            seen.insert(next_id);
            next_id += 1;
        }

        Ok(RecipeStore { recipes, next_id })
    }

    /// Appends a new, non-favorite recipe and returns it.
    pub fn add(&mut self, input: NewRecipe) -> &Recipe {
        let id = self.next_id;
        // next_id starts at most at MAX_RECIPE_ID + 1, far below u64::MAX
        self.next_id = self.next_id.saturating_add(1);
        debug!(id, title = %input.title, "adding recipe");

        self.recipes.push(Recipe::new(id, input));
        &self.recipes[self.recipes.len() - 1]
    }

    /// Removes the recipe with the given id.
    ///
    /// Returns the removed recipe, or `None` (leaving the store untouched)
    /// when no recipe has that id.
    pub fn remove(&mut self, id: RecipeId) -> Option<Recipe> {
        let index = self.recipes.iter().position(|r| r.id == id)?;
        Some(self.recipes.remove(index))
    }

    /// Flips the favorite flag of a recipe.
    pub fn toggle_favorite(&mut self, id: RecipeId) -> Option<&Recipe> {
        let recipe = self.recipes.iter_mut().find(|r| r.id == id)?;
        recipe.favorite = !recipe.favorite;
        Some(recipe)
    }

    pub fn find_by_id(&self, id: RecipeId) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    /// All recipes in insertion order.
    pub fn all(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// The id the next added recipe will receive.
    pub fn next_id(&self) -> RecipeId {
        self.next_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_recipe(title: &str, ingredients: &str) -> NewRecipe {
        NewRecipe {
            title: title.to_string(),
            ingredients: ingredients.to_string(),
            steps: "Cook it".to_string(),
            tags: String::new(),
        }
    }

    #[test]
    fn test_add_then_find() {
        let mut store = RecipeStore::new();
        let id = store.add(new_recipe("Omelette", "3 eggs, salt")).id;

        let found = store.find_by_id(id).unwrap();
        assert_eq!(found.title, "Omelette");
        assert_eq!(found.ingredients, "3 eggs, salt");
        assert_eq!(found.steps, "Cook it");
        assert_eq!(found.tags, "");
        assert!(!found.favorite);
    }

    #[test]
    fn test_ids_are_sequential() {
        let mut store = RecipeStore::new();
        let ids: Vec<_> = ["a", "b", "c"]
            .iter()
            .map(|t| store.add(new_recipe(t, "x")).id)
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(store.next_id(), 4);
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let mut store = RecipeStore::new();
        for title in ["a", "b", "c"] {
            store.add(new_recipe(title, "x"));
        }

        store.remove(2).unwrap();
        let id = store.add(new_recipe("d", "x")).id;

        assert_eq!(id, 4);
        let ids: Vec<_> = store.all().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3, 4]);
    }

    #[test]
    fn test_remove() {
        let mut store = RecipeStore::new();
        let id = store.add(new_recipe("Toast", "bread")).id;

        let removed = store.remove(id).unwrap();
        assert_eq!(removed.title, "Toast");
        assert!(store.find_by_id(id).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut store = RecipeStore::new();
        store.add(new_recipe("Toast", "bread"));
        let before = store.clone();

        assert!(store.remove(42).is_none());
        assert_eq!(store, before);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_toggle_favorite_twice_restores() {
        let mut store = RecipeStore::new();
        let id = store.add(new_recipe("Toast", "bread")).id;

        assert!(store.toggle_favorite(id).unwrap().favorite);
        assert!(!store.toggle_favorite(id).unwrap().favorite);
        assert!(!store.find_by_id(id).unwrap().favorite);
    }

    #[test]
    fn test_toggle_favorite_missing() {
        let mut store = RecipeStore::new();
        assert!(store.toggle_favorite(1).is_none());
    }

    #[test]
    fn test_all_keeps_insertion_order() {
        let mut store = RecipeStore::new();
        for title in ["Zucchini bread", "Apple pie", "Miso soup"] {
            store.add(new_recipe(title, "x"));
        }
        let titles: Vec<_> = store.all().iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Zucchini bread", "Apple pie", "Miso soup"]);
    }

    #[test]
    fn test_from_parts_counter() {
        let mut seed = RecipeStore::new();
        for title in ["a", "b", "c"] {
            seed.add(new_recipe(title, "x"));
        }
        seed.remove(3);
        let recipes = seed.all().to_vec();

        // No stored counter: resume after the highest id
        assert_eq!(RecipeStore::from_parts(recipes.clone(), None).unwrap().next_id(), 3);
        // Stored counter wins when it is ahead
        assert_eq!(RecipeStore::from_parts(recipes.clone(), Some(9)).unwrap().next_id(), 9);
        // A counter behind the data is raised
        assert_eq!(RecipeStore::from_parts(recipes, Some(1)).unwrap().next_id(), 3);
        assert_eq!(RecipeStore::from_parts(Vec::new(), None).unwrap().next_id(), 1);
    }

    fn stored(id: RecipeId, title: &str) -> Recipe {
        Recipe {
            id,
            title: title.to_string(),
            ingredients: "x".to_string(),
            steps: "y".to_string(),
            tags: String::new(),
            favorite: false,
        }
    }

    #[test]
    fn test_from_parts_reassigns_duplicate_ids() {
        let recipes = vec![stored(1, "A"), stored(3, "C"), stored(3, "D")];
        let mut store = RecipeStore::from_parts(recipes, None).unwrap();

        let ids: Vec<_> = store.all().iter().map(|r| (r.id, r.title.as_str())).collect();
        assert_eq!(ids, vec![(1, "A"), (3, "C"), (4, "D")]);
        assert_eq!(store.next_id(), 5);

        assert!(store.toggle_favorite(4).unwrap().favorite);
        assert_eq!(store.find_by_id(4).unwrap().title, "D");
        assert!(!store.find_by_id(3).unwrap().favorite);
    }

    #[test]
    fn test_from_parts_duplicates_use_stored_counter() {
        let recipes = vec![stored(2, "B"), stored(2, "B again"), stored(1, "A")];
        let store = RecipeStore::from_parts(recipes, Some(10)).unwrap();

        let ids: Vec<_> = store.all().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 10, 1]);
        assert_eq!(store.next_id(), 11);
    }

    #[test]
    fn test_from_parts_rejects_huge_ids() {
        let result = RecipeStore::from_parts(vec![stored(u64::MAX, "Big")], None);
        assert_eq!(result, Err(StoreError::IdOutOfRange(u64::MAX)));

        let result = RecipeStore::from_parts(Vec::new(), Some(u64::MAX));
        assert_eq!(result, Err(StoreError::IdOutOfRange(u64::MAX)));
    }

    #[test]
    fn test_from_parts_accepts_max_id() {
        let mut store = RecipeStore::from_parts(vec![stored(MAX_RECIPE_ID, "Last")], None).unwrap();
        assert_eq!(store.add(new_recipe("Next", "x")).id, MAX_RECIPE_ID + 1);
    }

    #[test]
    fn test_from_parts_duplicate_past_max_id() {
        let recipes = vec![stored(MAX_RECIPE_ID, "A"), stored(MAX_RECIPE_ID, "B")];
        let result = RecipeStore::from_parts(recipes, None);
        assert_eq!(result, Err(StoreError::IdOutOfRange(MAX_RECIPE_ID + 1)));
    }
}
