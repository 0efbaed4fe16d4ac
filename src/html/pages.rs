use super::*;

use crate::config::{SiteConfig, WidgetConfig};
use crate::dom::{RECIPE_LIST_ID, SEARCH_INPUT_ID};

/// The recipe listing page, with every recipe listed until the user types.
pub fn recipes(site: &SiteConfig, widget: &WidgetConfig, index: &RecipeIndex) -> Markup {
    let quiet_ms = widget.quiet().as_millis();
    let trigger = if quiet_ms > 0 {
        format!("input changed delay:{quiet_ms}ms")
    } else {
        "input changed".to_owned()
    };

    let body = html! {
        h1 #title { (site.title) }
        #search-container {
            input #(SEARCH_INPUT_ID)
                type="search"
                name="q"
                placeholder="Search recipes..."
                autocomplete="off"
                data-search-index=(site.index)
                hx-get="components/recipe-list"
                hx-trigger=(trigger)
                hx-target={ "#" (RECIPE_LIST_ID) };
        }
        ul.recipe-list #(RECIPE_LIST_ID) {
            (components::recipe_list(index.recipes()))
        }
    };
    wrappers::universal(body, &site.title)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> RecipeIndex {
        RecipeIndex::new(vec![
            Recipe::new("1", "Apple Pie", Some("1h")),
            Recipe::new("2", "Banana Bread", Some("45m")),
        ])
    }

    #[test]
    fn page_lists_everything_and_wires_the_input() {
        let html = recipes(&SiteConfig::default(), &WidgetConfig::default(), &index()).into_string();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"id="search-input""#));
        assert!(html.contains(r#"data-search-index="search.json""#));
        assert!(html.contains(r#"hx-trigger="input changed delay:300ms""#));
        assert!(html.contains(r##"hx-target="#recipe-list""##));
        assert!(html.contains(r#"id="recipe-list""#));
        assert_eq!(html.matches(r#"<li class="recipe-card">"#).count(), 2);
    }

    #[test]
    fn undebounced_page_triggers_on_every_input() {
        let widget = WidgetConfig {
            debounce: false,
            ..Default::default()
        };
        let html = recipes(&SiteConfig::default(), &widget, &index()).into_string();
        assert!(html.contains(r#"hx-trigger="input changed""#));
    }

    #[test]
    fn title_is_escaped() {
        let site = SiteConfig {
            title: "Mom & Dad <Kitchen>".to_owned(),
            ..Default::default()
        };
        let html = recipes(&site, &WidgetConfig::default(), &RecipeIndex::default()).into_string();
        assert!(html.contains("Mom &amp; Dad &lt;Kitchen&gt;"));
    }
}
