use crate::model::{Recipe, RecipeId};
use std::fmt;
use std::str::FromStr;

/// Message shown instead of a list when there are no recipes at all.
pub const PLACEHOLDER: &str = "No recipes found.";

/// Ordering applied to the recipe list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortMode {
    /// Keep insertion order
    #[default]
    None,
    /// Alphabetical by title, ignoring case
    Title,
    /// Most recently added first
    Date,
}

impl FromStr for SortMode {
    type Err = std::convert::Infallible;

    /// Unknown values fall back to [`SortMode::None`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "title" => SortMode::Title,
            "date" => SortMode::Date,
            _ => SortMode::None,
        })
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortMode::None => "none",
            SortMode::Title => "title",
            SortMode::Date => "date",
        })
    }
}

/// Current search and sort inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub search: String,
    pub sort: SortMode,
}

impl ListQuery {
    pub fn new(search: impl Into<String>, sort: SortMode) -> Self {
        ListQuery {
            search: search.into(),
            sort,
        }
    }
}

/// One selectable line of the recipe list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub id: RecipeId,
    pub title: String,
    pub favorite: bool,
}

impl From<&Recipe> for ListEntry {
    fn from(recipe: &Recipe) -> Self {
        ListEntry {
            id: recipe.id,
            title: recipe.title.clone(),
            favorite: recipe.favorite,
        }
    }
}

/// What the list area shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    /// The store holds no recipes
    Placeholder,
    /// Matching recipes in display order; empty when the search excludes
    /// every recipe
    Entries(Vec<ListEntry>),
}

impl ListView {
    pub fn entries(&self) -> &[ListEntry] {
        match self {
            ListView::Placeholder => &[],
            ListView::Entries(entries) => entries,
        }
    }
}

impl fmt::Display for ListView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListView::Placeholder => writeln!(f, "{PLACEHOLDER}"),
            ListView::Entries(entries) => {
                for entry in entries {
                    write!(f, "{:>4}  {}", entry.id, entry.title)?;
                    if entry.favorite {
                        f.write_str(" ★")?;
                    }
                    writeln!(f)?;
                }
                Ok(())
            }
        }
    }
}
