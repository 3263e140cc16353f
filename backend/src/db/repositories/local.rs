//! In-memory catalog repository.
//!
//! Holds every record in a `BTreeMap` behind a `parking_lot::RwLock`. Suitable
//! for local development and tests; contents are lost on restart.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::db::repository::{ErrorContext, ModelRepository, RepositoryError, RepositoryResult};
use crate::models::{ModelFamily, ModelId, ModelMetrics, ModelRecord, NewModel, BASE_MODEL_ID};

/// File name of the model shipped with the service.
pub const BASE_MODEL_FILE: &str = "exoplanet_kepler_model.joblib";

#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
    models_dir: PathBuf,
}

struct LocalData {
    models: BTreeMap<ModelId, ModelRecord>,
    next_id: i64,
    is_healthy: bool,
}

impl LocalRepository {
    /// Repository rooted at `models/`, seeded with the base model.
    pub fn new() -> Self {
        Self::with_models_dir("models")
    }

    /// Repository whose artifact paths live under `models_dir`, seeded with
    /// the base model as id 1.
    pub fn with_models_dir(models_dir: impl AsRef<Path>) -> Self {
        let models_dir = models_dir.as_ref().to_path_buf();
        let base = ModelRecord {
            id: BASE_MODEL_ID,
            name: "exoplanet_kepler_model".to_string(),
            path: artifact_path(&models_dir, BASE_MODEL_FILE),
            metrics: ModelMetrics::default(),
            params: ModelFamily::default(),
            created_at: Utc::now(),
        };

        let mut models = BTreeMap::new();
        models.insert(base.id, base);

        Self {
            data: Arc::new(RwLock::new(LocalData {
                models,
                next_id: BASE_MODEL_ID.value() + 1,
                is_healthy: true,
            })),
            models_dir,
        }
    }

    /// Repository restored from previously stored records. The base model is
    /// re-seeded when absent, and new ids continue after the largest stored id.
    pub fn from_records(models_dir: impl AsRef<Path>, records: Vec<ModelRecord>) -> Self {
        let repo = Self::with_models_dir(models_dir);
        {
            let mut data = repo.data.write();
            for record in records {
                data.next_id = data.next_id.max(record.id.value() + 1);
                data.models.insert(record.id, record);
            }
        }
        repo
    }

    /// Copy of every stored record, ordered by id.
    pub fn snapshot(&self) -> Vec<ModelRecord> {
        self.data.read().models.values().cloned().collect()
    }

    /// Drop a stored record. Used to undo an insert whose persistence failed.
    pub fn remove(&self, id: ModelId) -> Option<ModelRecord> {
        self.data.write().models.remove(&id)
    }

    /// Simulate a backend outage in tests.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    pub fn model_count(&self) -> usize {
        self.data.read().models.len()
    }

    pub fn base_model_path(&self) -> String {
        artifact_path(&self.models_dir, BASE_MODEL_FILE)
    }

    fn check_health(&self) -> RepositoryResult<()> {
        if self.data.read().is_healthy {
            Ok(())
        } else {
            Err(RepositoryError::connection("Model catalog is not healthy"))
        }
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn artifact_path(dir: &Path, file: &str) -> String {
    dir.join(file).to_string_lossy().into_owned()
}

#[async_trait]
impl ModelRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn list_models(&self) -> RepositoryResult<Vec<ModelRecord>> {
        self.check_health()?;
        Ok(self.data.read().models.values().cloned().collect())
    }

    async fn get_model(&self, id: ModelId) -> RepositoryResult<ModelRecord> {
        self.check_health()?;
        self.data.read().models.get(&id).cloned().ok_or_else(|| {
            RepositoryError::not_found_with_context(
                format!("Model {} not found", id),
                ErrorContext::new("get_model")
                    .with_entity("model")
                    .with_entity_id(id),
            )
        })
    }

    async fn create_model(&self, model: NewModel) -> RepositoryResult<ModelRecord> {
        self.check_health()?;
        model
            .params
            .validate()
            .map_err(|e| RepositoryError::from(e).with_operation("create_model"))?;

        let mut data = self.data.write();
        let id = ModelId::new(data.next_id);
        data.next_id += 1;

        let model_type = model.params.model_type();
        let name = model
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| format!("exoplanet_{}_model_v{}", model_type, id));
        let record = ModelRecord {
            id,
            path: artifact_path(
                &self.models_dir,
                &format!("exoplanet_{}_model_v{}.joblib", model_type, id),
            ),
            name,
            metrics: model.metrics,
            params: model.params,
            created_at: Utc::now(),
        };

        data.models.insert(id, record.clone());
        Ok(record)
    }

    async fn resolve_model_path(&self, id: Option<ModelId>) -> RepositoryResult<String> {
        self.check_health()?;
        let data = self.data.read();
        let path = id
            .and_then(|id| data.models.get(&id))
            .or_else(|| data.models.get(&BASE_MODEL_ID))
            .map(|record| record.path.clone())
            .unwrap_or_else(|| self.base_model_path());
        Ok(path)
    }
}
