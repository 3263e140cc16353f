//! Catalog repository trait.
//!
//! Implementations must be `Send + Sync`; the HTTP layer shares one instance
//! across handlers behind an `Arc<dyn ModelRepository>`.

use async_trait::async_trait;

use crate::models::{ModelId, ModelRecord, NewModel};

mod error;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

#[async_trait]
pub trait ModelRepository: Send + Sync {
    /// `Ok(true)` when the backend can serve requests.
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// All registered models ordered by id.
    async fn list_models(&self) -> RepositoryResult<Vec<ModelRecord>>;

    /// One model by id. `Err(NotFound)` when it does not exist.
    async fn get_model(&self, id: ModelId) -> RepositoryResult<ModelRecord>;

    /// Store a new configuration and return the stored record with its id.
    /// Hyperparameters are validated before anything is stored.
    async fn create_model(&self, model: NewModel) -> RepositoryResult<ModelRecord>;

    /// Artifact path for `id`. `None` and unknown ids fall back to the base
    /// model.
    async fn resolve_model_path(&self, id: Option<ModelId>) -> RepositoryResult<String>;
}
