mod metadata;
mod recipe;

pub use metadata::MealMetadata;
pub(crate) use metadata::MealSearchResponse;
pub use recipe::{NewRecipe, Recipe, RecipeForm, RecipeId, ValidationError};
