//! Detail view of a single recipe.
//!
//! Showing a recipe spans an asynchronous metadata lookup. Each selection is
//! stamped with a [`SelectionToken`]; a lookup that completes after the
//! selection changed, or after its recipe was deleted, is discarded instead
//! of being rendered. The panel keeps the metadata of the last completed
//! lookup so the view can be rebuilt after a local edit without another
//! request.

use crate::lookup::LookupError;
use crate::model::{MealMetadata, RecipeId};
use crate::store::RecipeStore;
use tracing::debug;

mod model;

pub use model::{DetailView, MetadataState};

/// Identifies one selection of the detail panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionToken {
    generation: u64,
    id: RecipeId,
}

impl SelectionToken {
    pub fn id(&self) -> RecipeId {
        self.id
    }
}

#[derive(Debug, Default)]
pub struct DetailPanel {
    generation: u64,
    current: Option<SelectionToken>,
    metadata: Option<MetadataState>,
}

impl DetailPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new selection, invalidating every earlier token.
    pub fn select(&mut self, id: RecipeId) -> SelectionToken {
        self.generation += 1;
        let token = SelectionToken {
            generation: self.generation,
            id,
        };
        self.current = Some(token);
        self.metadata = None;
        token
    }

    /// Recipe currently shown, if any.
    pub fn selected(&self) -> Option<RecipeId> {
        self.current.map(|token| token.id)
    }

    pub fn clear(&mut self) {
        self.current = None;
        self.metadata = None;
    }

    pub fn is_current(&self, token: SelectionToken) -> bool {
        self.current == Some(token)
    }

    /// Finishes a selection once its lookup has resolved.
    ///
    /// Returns `None` when the token is no longer current or the recipe has
    /// left the store. Local fields are read from the store now, not from
    /// when the lookup started.
    pub fn complete(
        &mut self,
        token: SelectionToken,
        store: &RecipeStore,
        lookup: Result<Option<MealMetadata>, LookupError>,
    ) -> Option<DetailView> {
        if !self.is_current(token) {
            debug!(id = token.id, "discarding stale detail lookup");
            return None;
        }
        let recipe = store.find_by_id(token.id)?.clone();

        let metadata = match lookup {
            Ok(Some(meta)) => MetadataState::Found(meta),
            Ok(None) => MetadataState::NotFound,
            Err(e) => MetadataState::Unavailable(e.to_string()),
        };

        self.metadata = Some(metadata.clone());
        Some(DetailView { recipe, metadata })
    }

    /// Rebuilds the shown view from the store, reusing the metadata of the
    /// completed lookup.
    ///
    /// `None` when nothing is shown, the lookup has not completed yet, or
    /// the recipe has left the store.
    pub fn refresh(&self, store: &RecipeStore) -> Option<DetailView> {
        let token = self.current?;
        let metadata = self.metadata.clone()?;
        let recipe = store.find_by_id(token.id)?.clone();
        Some(DetailView { recipe, metadata })
    }
}
