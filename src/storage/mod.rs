//! Snapshot persistence of the recipe collection.
//!
//! The whole collection is written on every save; there are no partial
//! updates. Two keys are used:
//!
//! - `recipes`: JSON array of recipes
//! - `recipes.next_id`: the id counter, so ids survive deletions
//!
//! Data written without a counter is still accepted; the counter then
//! resumes after the highest stored id, and repeated ids are renumbered.

use crate::model::{Recipe, RecipeId};
use crate::store::{RecipeStore, StoreError};
use thiserror::Error;
use tracing::debug;

mod backend;

pub use backend::{FileStore, KeyValueStore, MemoryStore};

pub const RECIPES_KEY: &str = "recipes";
pub const NEXT_ID_KEY: &str = "recipes.next_id";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to access storage: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored value under '{key}' is malformed: {source}")]
    Malformed {
        key: &'static str,
        source: serde_json::Error,
    },

    #[error("Failed to serialize recipes: {0}")]
    Serialize(serde_json::Error),

    #[error("Stored recipes are invalid: {0}")]
    Invalid(#[from] StoreError),
}

/// Saves and loads a [`RecipeStore`] through a [`KeyValueStore`].
#[derive(Debug)]
pub struct Persistence<S> {
    backend: S,
}

impl<S: KeyValueStore> Persistence<S> {
    pub fn new(backend: S) -> Self {
        Persistence { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Writes the full collection and its id counter.
    pub fn save(&mut self, store: &RecipeStore) -> Result<(), StorageError> {
        let recipes = serde_json::to_string(store.all()).map_err(StorageError::Serialize)?;
        self.backend.set(RECIPES_KEY, &recipes)?;
        self.backend.set(NEXT_ID_KEY, &store.next_id().to_string())?;

        debug!(count = store.len(), "saved recipes");
        Ok(())
    }

    /// Reads the collection back. A missing key yields an empty store.
    pub fn load(&self) -> Result<RecipeStore, StorageError> {
        let recipes: Vec<Recipe> = match self.backend.get(RECIPES_KEY)? {
            Some(raw) => serde_json::from_str(&raw).map_err(|source| StorageError::Malformed {
                key: RECIPES_KEY,
                source,
            })?,
            None => Vec::new(),
        };

        let next_id: Option<RecipeId> = match self.backend.get(NEXT_ID_KEY)? {
            Some(raw) => Some(serde_json::from_str(&raw).map_err(|source| {
                StorageError::Malformed {
                    key: NEXT_ID_KEY,
                    source,
                }
            })?),
            None => None,
        };

        debug!(count = recipes.len(), "loaded recipes");
        Ok(RecipeStore::from_parts(recipes, next_id)?)
    }
}
