use axum::{Router, routing::post};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
};

use crate::search::SearchClient;

pub mod handlers;
pub mod models;

/// `client` is `None` when the process started without provider
/// credentials; the search endpoint then answers 503.
pub fn create_router(client: Option<Arc<SearchClient>>) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // API routes
        .route("/api/search", post(handlers::search_handler))
        .with_state(client)
        // Static landing page and assets
        .route_service("/", ServeFile::new("static/index.html"))
        .nest_service("/static", ServeDir::new("static"))
        .layer(cors)
}
