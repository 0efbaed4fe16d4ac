use super::*;

pub async fn home(State(state): State<AppState>) -> Markup {
    html::pages::recipes(&state.config.site, &state.config.widget, &state.index)
}
