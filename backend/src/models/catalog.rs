//! Registered classifier models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::hyperparams::{ModelFamily, ModelType};
use crate::define_id_type;

define_id_type!(i64, ModelId);

/// Id of the model every request falls back to.
pub const BASE_MODEL_ID: ModelId = ModelId::new(1);

/// Evaluation scores reported by training. All optional: a freshly
/// registered configuration has not been evaluated yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelMetrics {
    pub accuracy: Option<f64>,
    pub roc_auc: Option<f64>,
    pub pr_auc: Option<f64>,
}

/// Full catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelRecord {
    pub id: ModelId,
    pub name: String,
    /// Artifact location handed to the prediction service.
    pub path: String,
    #[serde(flatten)]
    pub metrics: ModelMetrics,
    pub params: ModelFamily,
    pub created_at: DateTime<Utc>,
}

impl ModelRecord {
    pub fn model_type(&self) -> ModelType {
        self.params.model_type()
    }

    pub fn summary(&self) -> ModelSummary {
        ModelSummary {
            id: self.id,
            name: self.name.clone(),
            accuracy: self.metrics.accuracy,
            roc_auc: self.metrics.roc_auc,
            pr_auc: self.metrics.pr_auc,
            model_type: self.model_type(),
        }
    }
}

/// Listing row, the shape the model dropdown consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSummary {
    pub id: ModelId,
    pub name: String,
    pub accuracy: Option<f64>,
    pub roc_auc: Option<f64>,
    pub pr_auc: Option<f64>,
    pub model_type: ModelType,
}

/// Input for registering a model configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct NewModel {
    /// Explicit name; generated from the family and id when `None`.
    pub name: Option<String>,
    pub params: ModelFamily,
    pub metrics: ModelMetrics,
}

impl NewModel {
    pub fn new(params: ModelFamily) -> Self {
        Self {
            name: None,
            params,
            metrics: ModelMetrics::default(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_metrics(mut self, metrics: ModelMetrics) -> Self {
        self.metrics = metrics;
        self
    }
}
