use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of a recipe inside a [`RecipeStore`](crate::RecipeStore).
///
/// Ids are handed out from a monotonically increasing counter and are never
/// reused, even after the recipe that held one is deleted.
pub type RecipeId = u64;

/// A single stored recipe.
///
/// The serialized field names are the persisted layout:
/// `{id, title, ingredients, steps, tags, favorite}`.
///
/// # Examples
///
/// ```
/// use recipe_box::{NewRecipe, RecipeStore};
///
/// let mut store = RecipeStore::new();
/// let recipe = store.add(NewRecipe {
///     title: "Toast".into(),
///     ingredients: "bread, butter".into(),
///     steps: "Toast the bread".into(),
///     tags: "breakfast, quick".into(),
/// });
///
/// assert!(!recipe.favorite);
/// assert_eq!(recipe.tag_list(), vec!["breakfast", "quick"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub title: String,
    /// Free text, usually one ingredient per line or comma separated
    pub ingredients: String,
    pub steps: String,
    /// Free text, may be empty
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub favorite: bool,
}

impl Recipe {
    pub(crate) fn new(id: RecipeId, input: NewRecipe) -> Self {
        Recipe {
            id,
            title: input.title,
            ingredients: input.ingredients,
            steps: input.steps,
            tags: input.tags,
            favorite: false,
        }
    }

    /// Returns the tags as a list.
    ///
    /// The `tags` field is split by comma, each tag is trimmed and empty
    /// entries are dropped.
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// Validated input for [`RecipeStore::add`](crate::RecipeStore::add).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecipe {
    pub title: String,
    pub ingredients: String,
    pub steps: String,
    pub tags: String,
}

/// Raw add-recipe input as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeForm {
    pub title: String,
    pub ingredients: String,
    pub steps: String,
    pub tags: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in all fields: {0} is required")]
    MissingField(&'static str),
}

impl RecipeForm {
    /// Trims every field and checks that title, ingredients and steps are
    /// present. Tags are optional.
    pub fn validate(self) -> Result<NewRecipe, ValidationError> {
        let title = self.title.trim();
        let ingredients = self.ingredients.trim();
        let steps = self.steps.trim();

        if title.is_empty() {
            return Err(ValidationError::MissingField("title"));
        }
        if ingredients.is_empty() {
            return Err(ValidationError::MissingField("ingredients"));
        }
        if steps.is_empty() {
            return Err(ValidationError::MissingField("steps"));
        }

        Ok(NewRecipe {
            title: title.to_string(),
            ingredients: ingredients.to_string(),
            steps: steps.to_string(),
            tags: self.tags.trim().to_string(),
        })
    }
}
