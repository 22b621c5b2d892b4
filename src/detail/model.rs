use crate::model::{MealMetadata, Recipe, RecipeId};
use std::fmt;

/// Outcome of the metadata lookup for a detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataState {
    Found(MealMetadata),
    /// The lookup succeeded but nothing matched the title
    NotFound,
    /// The lookup failed; holds the error message
    Unavailable(String),
}

/// Full view of one recipe, local fields plus looked-up metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub recipe: Recipe,
    pub metadata: MetadataState,
}

impl DetailView {
    pub fn id(&self) -> RecipeId {
        self.recipe.id
    }

    /// Label of the favorite action button.
    pub fn favorite_label(&self) -> &'static str {
        if self.recipe.favorite {
            "Unfavorite"
        } else {
            "Favorite"
        }
    }
}

impl fmt::Display for DetailView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let recipe = &self.recipe;
        writeln!(f, "{}", recipe.title)?;
        writeln!(f, "{}", "=".repeat(recipe.title.chars().count()))?;

        match &self.metadata {
            MetadataState::Found(meta) => {
                let unknown = "-";
                writeln!(f, "Image:    {}", meta.thumbnail.as_deref().unwrap_or(unknown))?;
                writeln!(f, "Category: {}", meta.category.as_deref().unwrap_or(unknown))?;
                writeln!(f, "Area:     {}", meta.area.as_deref().unwrap_or(unknown))?;
            }
            MetadataState::NotFound => writeln!(f, "No metadata found.")?,
            MetadataState::Unavailable(reason) => {
                writeln!(f, "Metadata unavailable: {reason}")?
            }
        }

        writeln!(f)?;
        writeln!(f, "Ingredients:")?;
        writeln!(f, "{}", recipe.ingredients)?;
        writeln!(f)?;
        writeln!(f, "Steps:")?;
        writeln!(f, "{}", recipe.steps)?;
        writeln!(f)?;
        writeln!(f, "Tags: {}", recipe.tag_list().join(", "))?;
        writeln!(
            f,
            "[{}] recipe-box favorite {}   [Delete] recipe-box delete {}",
            self.favorite_label(),
            recipe.id,
            recipe.id
        )
    }
}
