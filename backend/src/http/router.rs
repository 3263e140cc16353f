//! Router configuration for the HTTP API.
//!
//! Sets up all routes and middleware (CORS, compression, tracing) and returns
//! an axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // The browser UI is served from a different origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        // Model catalog
        .route("/models", get(handlers::list_models))
        .route("/models/{id}", get(handlers::get_model))
        .route("/model", post(handlers::create_model))
        .route("/model-families", get(handlers::list_model_families))
        // Candidate features
        .route("/profiles", get(handlers::list_profiles))
        .route("/features/random", get(handlers::random_features))
        // Classification and synthesis
        .route("/predict", post(handlers::predict))
        .route("/light-curve", post(handlers::light_curve));

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api", api)
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::LocalRepository;
    use std::sync::Arc;

    #[test]
    fn test_router_creation() {
        let state = AppState::without_predictor(Arc::new(LocalRepository::new()));
        let _router = create_router(state);
    }
}
