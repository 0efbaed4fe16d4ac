use std::path::{Component, Path, PathBuf};

use super::*;

/// The search index the listing page advertises.
pub async fn search_index(State(state): State<AppState>) -> Response {
    let site = &state.config.site;
    match site_path(&site.dir, &site.index) {
        Some(path) => static_file(path, "application/json").await,
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

pub async fn asset(
    State(state): State<AppState>,
    ReqPath(file_name): ReqPath<String>,
) -> Response {
    let content_type = match Path::new(&file_name).extension().and_then(|e| e.to_str()) {
        Some("css") => "text/css",
        Some("js") => "text/javascript",
        Some("json") => "application/json",
        Some("svg") => "image/svg+xml",
        _ => "text/plain",
    };
    match site_path(&state.config.site.dir.join("static"), &file_name) {
        Some(path) => static_file(path, content_type).await,
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// A recipe's detail page, as linked from the results list.
pub async fn recipe(
    State(state): State<AppState>,
    ReqPath(page): ReqPath<String>,
) -> Response {
    if !page.ends_with(".html") {
        return StatusCode::NOT_FOUND.into_response();
    }
    match site_path(&state.config.site.dir.join("recipe"), &page) {
        Some(path) => static_file(path, "text/html; charset=utf-8").await,
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Join a request path onto `dir`, refusing anything that would leave it.
fn site_path(dir: &Path, relative: &str) -> Option<PathBuf> {
    let relative = Path::new(relative);
    let inside = relative
        .components()
        .all(|c| matches!(c, Component::Normal(_)));
    (inside && relative.components().next().is_some()).then(|| dir.join(relative))
}

async fn static_file(path: PathBuf, content_type: &'static str) -> Response {
    match tokio::fs::read(&path).await {
        Ok(content) => ([(header::CONTENT_TYPE, content_type)], content).into_response(),
        Err(e) => {
            log::warn!("Invalid path {}: {e}", path.display());
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::to_bytes;

    use crate::config::Config;
    use crate::data::RecipeIndex;

    use super::*;

    fn state(dir: &Path) -> AppState {
        let mut config = Config::default();
        config.site.dir = dir.to_owned();
        AppState {
            index: Arc::new(RecipeIndex::default()),
            config: Arc::new(config),
        }
    }

    async fn body(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn site_paths_stay_inside() {
        let dir = Path::new("dist");
        assert_eq!(site_path(dir, "search.json"), Some(dir.join("search.json")));
        assert_eq!(site_path(dir, "../secret.json"), None);
        assert_eq!(site_path(dir, "/etc/passwd"), None);
        assert_eq!(site_path(dir, ""), None);
    }

    #[tokio::test]
    async fn serves_index_and_pages() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("search.json"), "[]").unwrap();
        std::fs::create_dir(dir.path().join("recipe")).unwrap();
        std::fs::write(dir.path().join("recipe").join("1.html"), "<h1>Apple Pie</h1>").unwrap();

        let response = search_index(State(state(dir.path()))).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
        assert_eq!(body(response).await, "[]");

        let response = recipe(State(state(dir.path())), ReqPath("1.html".to_owned())).await;
        assert_eq!(body(response).await, "<h1>Apple Pie</h1>");
    }

    #[tokio::test]
    async fn missing_files_are_not_found() {
        let dir = tempfile::tempdir().unwrap();

        let response = search_index(State(state(dir.path()))).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = recipe(State(state(dir.path())), ReqPath("2.html".to_owned())).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = asset(State(state(dir.path())), ReqPath("..".to_owned())).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
