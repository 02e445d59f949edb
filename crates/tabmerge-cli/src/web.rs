//! Upload page for the web UI.

use axum::response::Html;

const INDEX_HTML: &str = include_str!("../assets/index.html");

/// Serve the upload page.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
