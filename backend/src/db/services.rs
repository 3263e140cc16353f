//! High-level catalog service layer.
//!
//! Repository-agnostic operations used by the HTTP handlers. Functions are
//! generic over `R: ModelRepository + ?Sized` so they accept both concrete
//! repositories and `dyn ModelRepository` behind an `Arc`.
//!
//! ```no_run
//! use transit_lab::db::{services, LocalRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = LocalRepository::new();
//!     let models = services::list_models(&repo).await?;
//!     println!("Found {} models", models.len());
//!     Ok(())
//! }
//! ```

use log::{info, warn};

use super::repository::{ModelRepository, RepositoryResult};
use crate::models::{ModelId, ModelRecord, ModelSummary, NewModel};

// ==================== Health & Connection ====================

pub async fn health_check<R: ModelRepository + ?Sized>(repo: &R) -> RepositoryResult<bool> {
    repo.health_check().await
}

// ==================== Catalog Operations ====================

/// Listing form of every registered model, ordered by id.
pub async fn list_models<R: ModelRepository + ?Sized>(
    repo: &R,
) -> RepositoryResult<Vec<ModelSummary>> {
    let models = repo.list_models().await?;
    Ok(models.iter().map(ModelRecord::summary).collect())
}

pub async fn get_model<R: ModelRepository + ?Sized>(
    repo: &R,
    id: ModelId,
) -> RepositoryResult<ModelRecord> {
    repo.get_model(id).await
}

/// Validate and store a new model configuration.
///
/// Hyperparameters are checked here so invalid input is rejected before it
/// reaches any backend.
pub async fn register_model<R: ModelRepository + ?Sized>(
    repo: &R,
    model: NewModel,
) -> RepositoryResult<ModelRecord> {
    if let Err(e) = model.params.validate() {
        warn!("Rejected model registration: {}", e);
        return Err(e.into());
    }

    let record = repo.create_model(model).await?;
    info!(
        "Registered model {} ({}) at {}",
        record.id,
        record.model_type().display_name(),
        record.path
    );
    Ok(record)
}

/// Artifact path handed to the classifier. Unknown ids resolve to the base
/// model.
pub async fn resolve_model_path<R: ModelRepository + ?Sized>(
    repo: &R,
    id: Option<ModelId>,
) -> RepositoryResult<String> {
    repo.resolve_model_path(id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::LocalRepository;
    use crate::db::RepositoryError;
    use crate::models::{LightGbmParams, ModelFamily, ModelType, BASE_MODEL_ID};

    #[tokio::test]
    async fn test_list_models_returns_summaries() {
        let repo = LocalRepository::new();
        let summaries = list_models(&repo).await.unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].id, BASE_MODEL_ID);
        assert_eq!(summaries[0].model_type, ModelType::LightGbm);
    }

    #[tokio::test]
    async fn test_register_model_rejects_invalid_params() {
        let repo = LocalRepository::new();
        let params = ModelFamily::LightGbm(LightGbmParams {
            learning_rate: 0.0,
            ..LightGbmParams::default()
        });

        let err = register_model(&repo, NewModel::new(params)).await.unwrap_err();
        assert!(matches!(err, RepositoryError::ValidationError { .. }));
        assert_eq!(repo.model_count(), 1);
    }

    #[tokio::test]
    async fn test_register_then_resolve() {
        let repo = LocalRepository::new();
        let record = register_model(&repo, NewModel::new(ModelType::Xgboost.default_params()))
            .await
            .unwrap();

        let path = resolve_model_path(&repo, Some(record.id)).await.unwrap();
        assert_eq!(path, record.path);
        assert!(path.ends_with("exoplanet_xgboost_model_v2.joblib"));
    }

    #[tokio::test]
    async fn test_works_through_trait_object() {
        let repo: std::sync::Arc<dyn ModelRepository> = std::sync::Arc::new(LocalRepository::new());
        assert!(health_check(repo.as_ref()).await.unwrap());
        assert_eq!(list_models(repo.as_ref()).await.unwrap().len(), 1);
    }
}
