use std::sync::Arc;

use axum::{http::HeaderValue, routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::handlers;
use crate::state::AppState;

/// Create the API router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health
        .route("/health", get(handlers::health_check))

        // Search
        .route("/search", get(handlers::search))

        // Countries
        .route("/api/countries", get(handlers::list_countries))
        .route("/api/countries/{code}", get(handlers::get_country))

        .with_state(state)
}

/// Full application: API routes, static files, CORS and request tracing
pub fn create_app(state: Arc<AppState>, config: &ApiConfig) -> anyhow::Result<Router> {
    let cors = match &config.cors_origin {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin.parse::<HeaderValue>()?)
            .allow_methods(tower_http::cors::Any)
            .allow_headers(tower_http::cors::Any),
        None => CorsLayer::permissive(),
    };

    Ok(create_router(state)
        .fallback_service(ServeDir::new(&config.static_dir))
        .layer(cors)
        .layer(TraceLayer::new_for_http()))
}
