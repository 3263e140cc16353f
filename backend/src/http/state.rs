//! Application state for the HTTP server.

use std::sync::Arc;

use crate::db::ModelRepository;
use crate::services::prediction::{Predictor, UnconfiguredPredictor};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn ModelRepository>,
    /// Gateway to the external classification service
    pub predictor: Arc<dyn Predictor>,
}

impl AppState {
    pub fn new(repository: Arc<dyn ModelRepository>, predictor: Arc<dyn Predictor>) -> Self {
        Self {
            repository,
            predictor,
        }
    }

    /// State whose prediction endpoint answers 503.
    pub fn without_predictor(repository: Arc<dyn ModelRepository>) -> Self {
        Self::new(repository, Arc::new(UnconfiguredPredictor))
    }
}
