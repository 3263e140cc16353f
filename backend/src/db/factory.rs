//! Repository factory for dependency injection.
//!
//! Picks a catalog backend from [`CatalogSettings`] so the server and tests
//! only ever see an `Arc<dyn ModelRepository>`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

#[cfg(feature = "file-repo")]
use super::repositories::FileRepository;
use super::repositories::LocalRepository;
use super::repository::{ModelRepository, RepositoryResult};
#[cfg(not(feature = "file-repo"))]
use super::repository::RepositoryError;
use crate::config::CatalogSettings;

/// Repository type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepositoryType {
    /// In-memory catalog, lost on restart
    #[default]
    Local,
    /// JSON catalog file
    File,
}

impl FromStr for RepositoryType {
    type Err = String;

    /// Accepts "local"/"memory" and "file"/"json", case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" | "memory" => Ok(Self::Local),
            "file" | "json" => Ok(Self::File),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

impl fmt::Display for RepositoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::File => write!(f, "file"),
        }
    }
}

pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create the repository described by `settings`.
    pub async fn create(settings: &CatalogSettings) -> RepositoryResult<Arc<dyn ModelRepository>> {
        log::info!(
            "Creating {} model catalog (models dir: {})",
            settings.repository,
            settings.models_dir.display()
        );

        match settings.repository {
            RepositoryType::Local => Ok(Self::create_local(&settings.models_dir)),
            RepositoryType::File => {
                #[cfg(feature = "file-repo")]
                {
                    Self::create_file(&settings.path, &settings.models_dir).await
                }
                #[cfg(not(feature = "file-repo"))]
                {
                    Err(RepositoryError::configuration(
                        "File repository feature not enabled",
                    ))
                }
            }
        }
    }

    /// In-memory repository seeded with the base model.
    pub fn create_local(models_dir: impl AsRef<Path>) -> Arc<dyn ModelRepository> {
        Arc::new(LocalRepository::with_models_dir(models_dir))
    }

    #[cfg(feature = "file-repo")]
    pub async fn create_file(
        catalog_path: impl AsRef<Path>,
        models_dir: impl AsRef<Path>,
    ) -> RepositoryResult<Arc<dyn ModelRepository>> {
        let repo = FileRepository::open(catalog_path, models_dir).await?;
        Ok(Arc::new(repo))
    }
}
