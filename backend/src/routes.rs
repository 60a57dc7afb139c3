// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::{
    handlers::{health, quiz},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Mounts the API routes under `/api`.
/// * When a public directory is configured, serves it and answers every other
///   GET with its `index.html` so the front end can do its own routing.
/// * Applies global middleware (Trace, and CORS when origins are configured).
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/generate-quiz", post(quiz::generate_quiz))
        .route("/health", get(health::health_check));

    let mut router = Router::new().nest("/api", api_routes);

    if let Some(dir) = &state.config.public_dir {
        tracing::info!("Serving static files from {}", dir.display());
        let index = ServeFile::new(dir.join("index.html"));
        router = router.fallback_service(ServeDir::new(dir).fallback(index));
    }

    // Global Middleware (applied from outside in)
    router = router.layer(TraceLayer::new_for_http());

    if let Some(cors) = cors_layer(&state.config.cors_allowed_origins) {
        router = router.layer(cors);
    }

    router.with_state(state)
}

fn cors_layer(allowed: &[String]) -> Option<CorsLayer> {
    let origins: Vec<HeaderValue> = allowed
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}: {}", origin, e);
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE]),
    )
}
