//! JSON-file backed catalog repository.
//!
//! Keeps the working set in a [`LocalRepository`] and rewrites the catalog
//! file after every insert. Inserts are serialized by a writer lock held
//! across insert, snapshot, write and rename, so the file on disk always
//! reflects the latest insert. Writes go to a per-insert temporary file and
//! are renamed into place; an insert whose write fails is rolled back.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

use super::local::LocalRepository;
use crate::db::repository::{ErrorContext, ModelRepository, RepositoryError, RepositoryResult};
use crate::models::{ModelId, ModelRecord, NewModel};

#[derive(Clone)]
pub struct FileRepository {
    inner: LocalRepository,
    catalog_path: PathBuf,
    writer: Arc<Mutex<()>>,
}

impl FileRepository {
    /// Open the catalog at `catalog_path`, starting from the seeded base model
    /// when the file does not exist yet.
    pub async fn open(
        catalog_path: impl AsRef<Path>,
        models_dir: impl AsRef<Path>,
    ) -> RepositoryResult<Self> {
        let catalog_path = catalog_path.as_ref().to_path_buf();

        let records: Vec<ModelRecord> = match tokio::fs::read_to_string(&catalog_path).await {
            Ok(content) => serde_json::from_str(&content).map_err(|e| {
                RepositoryError::ConfigurationError {
                    message: format!("Failed to parse catalog file: {}", e),
                    context: ErrorContext::new("open")
                        .with_details(catalog_path.display().to_string()),
                }
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                return Err(RepositoryError::ConfigurationError {
                    message: format!("Failed to read catalog file: {}", e),
                    context: ErrorContext::new("open")
                        .with_details(catalog_path.display().to_string()),
                })
            }
        };

        log::info!(
            "Opened model catalog {} ({} stored records)",
            catalog_path.display(),
            records.len()
        );

        Ok(Self {
            inner: LocalRepository::from_records(models_dir, records),
            catalog_path,
            writer: Arc::new(Mutex::new(())),
        })
    }

    pub fn catalog_path(&self) -> &Path {
        &self.catalog_path
    }

    /// Write the current snapshot. Callers must hold `writer`.
    async fn persist(&self, id: ModelId) -> RepositoryResult<()> {
        let json = serde_json::to_string_pretty(&self.inner.snapshot())
            .map_err(|e| RepositoryError::internal(format!("Failed to encode catalog: {}", e)))?;

        if let Some(parent) = self.catalog_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                RepositoryError::internal(format!("Failed to create catalog directory: {}", e))
            })?;
        }

        let tmp = self
            .catalog_path
            .with_extension(format!("json.{}.tmp", id));
        if let Err(e) = tokio::fs::write(&tmp, json).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(RepositoryError::internal(format!(
                "Failed to write catalog: {}",
                e
            )));
        }
        if let Err(e) = tokio::fs::rename(&tmp, &self.catalog_path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(RepositoryError::internal(format!(
                "Failed to replace catalog: {}",
                e
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl ModelRepository for FileRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        self.inner.health_check().await
    }

    async fn list_models(&self) -> RepositoryResult<Vec<ModelRecord>> {
        self.inner.list_models().await
    }

    async fn get_model(&self, id: ModelId) -> RepositoryResult<ModelRecord> {
        self.inner.get_model(id).await
    }

    async fn create_model(&self, model: NewModel) -> RepositoryResult<ModelRecord> {
        let _writer = self.writer.lock().await;

        let record = self.inner.create_model(model).await?;
        if let Err(e) = self.persist(record.id).await {
            self.inner.remove(record.id);
            log::warn!("Rolled back model {}: {}", record.id, e);
            return Err(e.with_operation("create_model"));
        }
        Ok(record)
    }

    async fn resolve_model_path(&self, id: Option<ModelId>) -> RepositoryResult<String> {
        self.inner.resolve_model_path(id).await
    }
}
