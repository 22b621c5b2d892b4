//! The recipe book: store, persistence and detail panel wired together.
//!
//! Every mutation saves the full collection before returning. Callers
//! re-render from the returned values.

use crate::detail::{DetailPanel, DetailView, SelectionToken};
use crate::lookup::LookupError;
use crate::list::{render_list, ListQuery, ListView};
use crate::lookup::MetadataLookup;
use crate::model::{MealMetadata, Recipe, RecipeForm, RecipeId, ValidationError};
use crate::storage::{KeyValueStore, Persistence, StorageError};
use crate::store::RecipeStore;
use thiserror::Error;
use tracing::{info, warn};

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this recipe?";

#[derive(Error, Debug)]
pub enum BookError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Asks the user to confirm a destructive action.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[derive(Debug)]
pub struct RecipeBook<S> {
    store: RecipeStore,
    persistence: Persistence<S>,
    panel: DetailPanel,
}

impl<S: KeyValueStore> RecipeBook<S> {
    /// Loads the collection from `backend`.
    pub fn open(backend: S) -> Result<Self, BookError> {
        let persistence = Persistence::new(backend);
        let store = persistence.load()?;
        Ok(RecipeBook {
            store,
            persistence,
            panel: DetailPanel::new(),
        })
    }

    pub fn store(&self) -> &RecipeStore {
        &self.store
    }

    pub fn panel(&self) -> &DetailPanel {
        &self.panel
    }

    /// Validates the form, adds the recipe and saves.
    pub fn add(&mut self, form: RecipeForm) -> Result<Recipe, BookError> {
        let input = form.validate()?;
        let recipe = self.store.add(input).clone();
        self.persistence.save(&self.store)?;

        info!(id = recipe.id, title = %recipe.title, "recipe added");
        Ok(recipe)
    }

    pub fn list(&self, query: &ListQuery) -> ListView {
        render_list(&self.store, query)
    }

    /// Selects a recipe and looks up its metadata.
    ///
    /// Returns `None` for an unknown id. Lookup failures do not fail the
    /// call; they show up in [`DetailView::metadata`].
    pub async fn show<L>(&mut self, id: RecipeId, lookup: &L) -> Option<DetailView>
    where
        L: MetadataLookup + ?Sized,
    {
        // The book stays mutably borrowed across the lookup, so nothing can
        // reselect or delete in between. Front ends that keep handling input
        // while a lookup runs use begin_show / finish_show instead.
        let (token, title) = self.begin_show(id)?;
        let result = lookup.fetch_details(&title).await;
        self.finish_show(token, result)
    }

    /// Selects a recipe and returns the title to look up.
    ///
    /// The returned token invalidates every earlier one. `None` for an
    /// unknown id, leaving the current selection alone.
    pub fn begin_show(&mut self, id: RecipeId) -> Option<(SelectionToken, String)> {
        let title = self.store.find_by_id(id)?.title.clone();
        Some((self.panel.select(id), title))
    }

    /// Completes a selection started with [`begin_show`](Self::begin_show).
    ///
    /// `None` when the selection changed or the recipe was deleted while the
    /// lookup was in flight.
    pub fn finish_show(
        &mut self,
        token: SelectionToken,
        result: Result<Option<MealMetadata>, LookupError>,
    ) -> Option<DetailView> {
        if let Err(e) = &result {
            warn!(id = token.id(), error = %e, "metadata lookup failed");
        }
        self.panel.complete(token, &self.store, result)
    }

    /// The shown recipe rebuilt from the current store, e.g. after its
    /// favorite flag changed. Metadata is not fetched again.
    pub fn detail(&self) -> Option<DetailView> {
        self.panel.refresh(&self.store)
    }

    /// Flips the favorite flag and saves. `None` for an unknown id, in
    /// which case nothing is written. When the recipe is shown, re-render it
    /// with [`detail`](Self::detail).
    pub fn toggle_favorite(&mut self, id: RecipeId) -> Result<Option<Recipe>, BookError> {
        let Some(recipe) = self.store.toggle_favorite(id).cloned() else {
            return Ok(None);
        };
        self.persistence.save(&self.store)?;

        info!(id, favorite = recipe.favorite, "favorite toggled");
        Ok(Some(recipe))
    }

    /// Deletes a recipe after confirmation.
    ///
    /// Returns `false` when the user declines or the id is unknown. The
    /// detail panel is cleared when it was showing the deleted recipe.
    pub fn delete<C>(&mut self, id: RecipeId, confirm: &mut C) -> Result<bool, BookError>
    where
        C: Confirm + ?Sized,
    {
        if !confirm.confirm(DELETE_PROMPT) {
            return Ok(false);
        }

        let removed = self.store.remove(id);
        if self.panel.selected() == Some(id) {
            self.panel.clear();
        }
        self.persistence.save(&self.store)?;

        if let Some(recipe) = &removed {
            info!(id, title = %recipe.title, "recipe deleted");
        }
        Ok(removed.is_some())
    }
}
