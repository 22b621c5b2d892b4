use crate::model::Recipe;
use crate::store::RecipeStore;
use icu_collator::{Collator, CollatorOptions, Strength};
use std::cmp::Ordering;
use tracing::warn;

mod model;

pub use model::*;

/// Build the list view for the given store and inputs.
///
/// An empty store always yields [`ListView::Placeholder`]. Otherwise the
/// recipes are sorted, then filtered by the search text against title and
/// ingredients. A search that excludes everything yields an empty
/// [`ListView::Entries`], not the placeholder.
pub fn render_list(store: &RecipeStore, query: &ListQuery) -> ListView {
    if store.is_empty() {
        return ListView::Placeholder;
    }

    let mut recipes: Vec<&Recipe> = store.all().iter().collect();
    sort_recipes(&mut recipes, query.sort);

    let needle = query.search.trim().to_lowercase();
    let entries = recipes
        .into_iter()
        .filter(|recipe| matches_search(recipe, &needle))
        .map(ListEntry::from)
        .collect();

    ListView::Entries(entries)
}

/// Sort in place. The sort is stable, so equal keys keep insertion order.
fn sort_recipes(recipes: &mut [&Recipe], mode: SortMode) {
    match mode {
        SortMode::Title => {
            let collator = title_collator();
            recipes.sort_by(|a, b| compare_titles(collator.as_ref(), &a.title, &b.title));
        }
        SortMode::Date => recipes.sort_by(|a, b| b.id.cmp(&a.id)),
        SortMode::None => {}
    }
}

/// Root-locale collator, so accented letters sort next to their base letter.
fn title_collator() -> Option<Collator> {
    let mut options = CollatorOptions::new();
    options.strength = Some(Strength::Tertiary);

    match Collator::try_new(&Default::default(), options) {
        Ok(collator) => Some(collator),
        Err(e) => {
            warn!(error = %e, "collation data unavailable, sorting titles by lowercase text");
            None
        }
    }
}

/// Dictionary order, exact text breaks ties.
fn compare_titles(collator: Option<&Collator>, a: &str, b: &str) -> Ordering {
    let primary = match collator {
        Some(collator) => collator.compare(a, b),
        None => a.to_lowercase().cmp(&b.to_lowercase()),
    };
    primary.then_with(|| a.cmp(b))
}

/// `needle` is the trimmed, lowercased search; empty matches everything.
fn matches_search(recipe: &Recipe, needle: &str) -> bool {
    needle.is_empty()
        || recipe.title.to_lowercase().contains(needle)
        || recipe.ingredients.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewRecipe;

    fn store_with(recipes: &[(&str, &str)]) -> RecipeStore {
        let mut store = RecipeStore::new();
        for (title, ingredients) in recipes {
            store.add(NewRecipe {
                title: title.to_string(),
                ingredients: ingredients.to_string(),
                steps: "Cook".to_string(),
                tags: String::new(),
            });
        }
        store
    }

    fn titles(view: &ListView) -> Vec<&str> {
        view.entries().iter().map(|e| e.title.as_str()).collect()
    }

    #[test]
    fn test_empty_store_placeholder() {
        let store = RecipeStore::new();
        let view = render_list(&store, &ListQuery::new("anything", SortMode::Title));
        assert_eq!(view, ListView::Placeholder);
        assert_eq!(view.to_string(), "No recipes found.\n");
    }

    #[test]
    fn test_sort_by_title_ignores_case() {
        let store = store_with(&[("Banana", "x"), ("apple", "x")]);
        let view = render_list(&store, &ListQuery::new("", SortMode::Title));
        assert_eq!(titles(&view), vec!["apple", "Banana"]);
    }

    #[test]
    fn test_sort_by_title_accented() {
        let store = store_with(&[("zucchini bread", "x"), ("Éclair", "x"), ("apple pie", "x")]);
        let view = render_list(&store, &ListQuery::new("", SortMode::Title));
        assert_eq!(titles(&view), vec!["apple pie", "Éclair", "zucchini bread"]);
    }

    #[test]
    fn test_sort_by_title_lowercase_fallback() {
        assert_eq!(compare_titles(None, "apple", "Banana"), Ordering::Less);
        assert_eq!(compare_titles(None, "Toast", "toast"), Ordering::Less);
    }

    #[test]
    fn test_sort_by_date_newest_first() {
        let store = store_with(&[("one", "x"), ("two", "x"), ("three", "x")]);
        let view = render_list(&store, &ListQuery::new("", SortMode::Date));
        let ids: Vec<_> = view.entries().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_default_sort_keeps_order() {
        let store = store_with(&[("Zucchini", "x"), ("apple", "x"), ("Mango", "x")]);
        let view = render_list(&store, &ListQuery::default());
        assert_eq!(titles(&view), vec!["Zucchini", "apple", "Mango"]);
    }

    #[test]
    fn test_render_does_not_reorder_store() {
        let store = store_with(&[("b", "x"), ("a", "x")]);
        render_list(&store, &ListQuery::new("", SortMode::Title));
        let stored: Vec<_> = store.all().iter().map(|r| r.title.as_str()).collect();
        assert_eq!(stored, vec!["b", "a"]);
    }

    #[test]
    fn test_filter_matches_ingredients() {
        let store = store_with(&[("Pancakes", "2 eggs, flour"), ("Custard", "milk, sugar")]);
        let view = render_list(&store, &ListQuery::new("egg", SortMode::None));
        assert_eq!(titles(&view), vec!["Pancakes"]);
    }

    #[test]
    fn test_filter_case_insensitive_title() {
        let store = store_with(&[("Egg Fried Rice", "rice"), ("Soup", "water")]);
        let view = render_list(&store, &ListQuery::new("  eGG ", SortMode::None));
        assert_eq!(titles(&view), vec!["Egg Fried Rice"]);
    }

    #[test]
    fn test_filter_treats_search_literally() {
        let store = store_with(&[("Mac (n) cheese", "pasta"), ("Macaroni", "pasta")]);
        let view = render_list(&store, &ListQuery::new("(n)", SortMode::None));
        assert_eq!(titles(&view), vec!["Mac (n) cheese"]);
    }

    #[test]
    fn test_filter_long_search_matches_nothing() {
        let store = store_with(&[("Toast", "bread")]);
        let search = "ǅ".repeat(200_000);
        let view = render_list(&store, &ListQuery::new(search, SortMode::None));
        assert_eq!(view, ListView::Entries(vec![]));
    }

    #[test]
    fn test_filter_unicode_case() {
        let store = store_with(&[("Crème BRÛLÉE", "cream"), ("Flan", "eggs")]);
        let view = render_list(&store, &ListQuery::new("brûlée", SortMode::None));
        assert_eq!(titles(&view), vec!["Crème BRÛLÉE"]);
    }

    #[test]
    fn test_filter_no_matches_is_empty_list() {
        let store = store_with(&[("Toast", "bread")]);
        let view = render_list(&store, &ListQuery::new("caviar", SortMode::None));
        assert_eq!(view, ListView::Entries(vec![]));
        assert_eq!(view.to_string(), "");
    }

    #[test]
    fn test_sort_then_filter() {
        let store = store_with(&[
            ("Scrambled eggs", "eggs"),
            ("Apple pie", "apples, flour"),
            ("Deviled eggs", "eggs, mayo"),
        ]);
        let view = render_list(&store, &ListQuery::new("eggs", SortMode::Title));
        assert_eq!(titles(&view), vec!["Deviled eggs", "Scrambled eggs"]);
    }

    #[test]
    fn test_entries_show_favorite() {
        let mut store = store_with(&[("Toast", "bread"), ("Tea", "leaves")]);
        store.toggle_favorite(2);

        let view = render_list(&store, &ListQuery::default());
        assert!(!view.entries()[0].favorite);
        assert!(view.entries()[1].favorite);
        assert_eq!(view.to_string(), "   1  Toast\n   2  Tea ★\n");
    }

    #[test]
    fn test_sort_mode_from_str() {
        assert_eq!("title".parse::<SortMode>().unwrap(), SortMode::Title);
        assert_eq!("DATE".parse::<SortMode>().unwrap(), SortMode::Date);
        assert_eq!("rating".parse::<SortMode>().unwrap(), SortMode::None);
        assert_eq!("".parse::<SortMode>().unwrap(), SortMode::None);
    }
}
