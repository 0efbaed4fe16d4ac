use std::fmt::Display;

use crate::data::Recipe;

/// A search term as typed into the search box, normalized for matching.
///
/// Leading and trailing whitespace is dropped before lower-casing, so a term
/// of only spaces behaves like an empty box and selects every recipe.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchTerm(String);

impl SearchTerm {
    pub fn new(raw: &str) -> Self {
        SearchTerm(raw.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the recipe's title contains this term, ignoring case.
    pub fn matches(&self, recipe: &Recipe) -> bool {
        recipe.search_key().contains(&self.0)
    }
}

impl Display for SearchTerm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Select the recipes whose title contains `term`, in index order.
pub fn filter<'a>(
    recipes: &'a [Recipe],
    term: &'a SearchTerm,
) -> impl Iterator<Item = &'a Recipe> + 'a {
    recipes.iter().filter(move |recipe| term.matches(recipe))
}
