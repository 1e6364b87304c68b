//! Frontend file serving
//!
//! Assets are served from the configured directory, both under `/static`
//! and at the root. Paths that match no file fall back to `index.html` so
//! client-side routing keeps working.

use std::path::Path;

use axum::Router;
use tower_http::services::{ServeDir, ServeFile};

pub fn mount(router: Router, static_dir: &Path) -> Router {
    let index = static_dir.join("index.html");

    if !index.is_file() {
        tracing::warn!(path = %index.display(), "frontend index not found");
    }

    router
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback_service(ServeDir::new(static_dir).fallback(ServeFile::new(index)))
}
