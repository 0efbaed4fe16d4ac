use serde::Deserialize;

use super::*;

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    q: String,
}

/// The results list for the search box's current value.
pub async fn recipe_list(
    Query(params): Query<SearchParams>,
    State(state): State<AppState>,
) -> Markup {
    let term = SearchTerm::new(&params.q);
    let found: Vec<_> = search::filter(state.index.recipes(), &term).collect();
    log::debug!("{} recipes match {:?}", found.len(), term.as_str());
    html::components::recipe_list(found)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::config::Config;
    use crate::data::{Recipe, RecipeIndex};

    use super::*;

    fn state() -> AppState {
        AppState {
            index: Arc::new(RecipeIndex::new(vec![
                Recipe::new("1", "Apple Pie", Some("1h")),
                Recipe::new("2", "Banana Bread", Some("45m")),
                Recipe::new("3", "<img src=x id='xss-trigger'>", Some("10 mins")),
            ])),
            config: Arc::new(Config::default()),
        }
    }

    async fn fragment(q: &str) -> String {
        let params = SearchParams { q: q.to_owned() };
        recipe_list(Query(params), State(state())).await.into_string()
    }

    #[tokio::test]
    async fn empty_query_lists_everything() {
        let html = fragment("").await;
        assert_eq!(html.matches("<li ").count(), 3);
    }

    #[tokio::test]
    async fn query_filters_by_title() {
        let html = fragment("  apple ").await;
        assert_eq!(html.matches("<li ").count(), 1);
        assert!(html.contains("recipe/1.html"));
        assert_eq!(fragment("xyz").await, "");
    }

    #[tokio::test]
    async fn matching_markup_in_titles_is_escaped() {
        let html = fragment("img").await;
        assert!(html.contains("&lt;img"));
        assert!(!html.contains("<img"));
    }
}
