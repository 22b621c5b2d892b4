use serde::{Deserialize, Serialize};

/// Supplementary recipe data returned by TheMealDB.
///
/// This record is read-only and transient: it is shown next to a recipe but
/// never merged into it or persisted with it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealMetadata {
    /// Thumbnail image URL
    #[serde(rename = "strMealThumb", default)]
    pub thumbnail: Option<String>,
    #[serde(rename = "strCategory", default)]
    pub category: Option<String>,
    /// Area (cuisine origin), e.g. "Italian"
    #[serde(rename = "strArea", default)]
    pub area: Option<String>,
}

/// Body of a `search.php` response.
///
/// TheMealDB answers `{"meals": null}` when nothing matches.
#[derive(Debug, Deserialize)]
pub(crate) struct MealSearchResponse {
    #[serde(default)]
    pub meals: Option<Vec<MealMetadata>>,
}

impl MealSearchResponse {
    /// Returns the first match, if any.
    pub(crate) fn into_first(self) -> Option<MealMetadata> {
        self.meals.and_then(|meals| meals.into_iter().next())
    }
}
