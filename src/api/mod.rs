use axum::{
    Router,
    routing::{get_service, post},
};
use std::path::Path;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
};

use crate::seo::SeoKeywordGenerator;

pub mod handlers;
pub mod models;

/// Informational pages served straight from the templates directory.
pub const PAGES: &[&str] = &[
    "about_us",
    "blog",
    "contact",
    "privacy_policy",
    "terms_of_service",
];

pub fn create_router(
    generator: Arc<SeoKeywordGenerator>,
    templates_dir: &Path,
    static_dir: &Path,
) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .route(
            "/",
            get_service(ServeFile::new(templates_dir.join("index.html")))
                .post(handlers::keywords_handler),
        )
        .route("/api/keywords", post(handlers::keywords_handler));

    for page in PAGES {
        router = router.route_service(
            &format!("/{page}"),
            ServeFile::new(templates_dir.join(format!("{page}.html"))),
        );
    }

    router
        .route_service("/favicon.ico", ServeFile::new(static_dir.join("favicon.ico")))
        .route_service("/favicon.png", ServeFile::new(static_dir.join("favicon.png")))
        .with_state(generator)
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(cors)
}
