use super::*;

/// The list items for a set of recipes.
///
/// Titles and times go through maud's escaping, so a title like
/// `<img onerror=...>` shows up as text instead of becoming an element.
pub fn recipe_list<'a>(recipes: impl IntoIterator<Item = &'a Recipe>) -> Markup {
    html! {
        @for recipe in recipes {
            (recipe_card(recipe))
        }
    }
}

pub fn recipe_card(recipe: &Recipe) -> Markup {
    html! {
        li.recipe-card {
            a href=(recipe.href()) {
                h3 { (recipe.title()) }
                span.meta { (recipe.total_time().unwrap_or("")) }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_links_to_detail_page() {
        let recipe = Recipe::new("1", "Apple Pie", Some("1h"));
        assert_eq!(
            recipe_card(&recipe).into_string(),
            r#"<li class="recipe-card"><a href="recipe/1.html"><h3>Apple Pie</h3><span class="meta">1h</span></a></li>"#
        );
    }

    #[test]
    fn missing_time_renders_empty_meta() {
        let html = recipe_card(&Recipe::new("2", "Toast", None)).into_string();
        assert!(html.contains(r#"<span class="meta"></span>"#));
        assert!(!html.contains("None"));
        assert!(!html.contains("null"));
        assert!(!html.contains("undefined"));
    }

    #[test]
    fn record_content_is_text_not_markup() {
        let recipe = Recipe::new(
            "1",
            "<img src=x onerror=console.log('XSS') id='xss-trigger'>",
            Some("<b>10 mins</b>"),
        );
        let html = recipe_card(&recipe).into_string();
        assert!(!html.contains("<img"));
        assert!(!html.contains("<b>"));
        assert!(html.contains("&lt;img src=x"));
        assert!(html.contains("&lt;b&gt;10 mins&lt;/b&gt;"));
    }

    #[test]
    fn ids_cannot_break_out_of_the_link() {
        let recipe = Recipe::new(r#"x" onclick="alert(1)"#, "Soup", None);
        let html = recipe_card(&recipe).into_string();
        assert!(html.contains(r#"href="recipe/x&quot; onclick=&quot;alert(1).html""#));
    }

    #[test]
    fn list_has_one_item_per_recipe() {
        let recipes = [
            Recipe::new("1", "Apple Pie", Some("1h")),
            Recipe::new("2", "Banana Bread", Some("45m")),
        ];
        let html = recipe_list(&recipes).into_string();
        assert_eq!(html.matches("<li ").count(), 2);
        assert!(html.find("Apple Pie") < html.find("Banana Bread"));
        assert_eq!(recipe_list(std::iter::empty::<&Recipe>()).into_string(), "");
    }
}
