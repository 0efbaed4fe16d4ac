use super::*;

/// Script that turns the search input's `hx-*` attributes into live requests.
const HTMX_SRC: &str = "https://unpkg.com/htmx.org@1.9.12";

pub(super) fn universal(body: Markup, title: &str) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                link type="text/css" rel="stylesheet" href="static/style.css";
                script src=(HTMX_SRC) {}
            }
            body {
                (body)
            }
        }
    }
}
