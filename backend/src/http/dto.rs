//! Data Transfer Objects for the HTTP API.
//!
//! Request and reply bodies that exist only at the HTTP boundary. Domain
//! types that already serialize the right way (`ModelRecord`,
//! `PredictionOutcome`, `FieldSpec`, ...) are returned directly.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{CandidateFeatures, FieldSpec, ModelFamily, ModelId, ModelMetrics, ModelSummary, NewModel};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Catalog status: "connected", "disconnected" or "error: ..."
    pub database: String,
    /// Whether an upstream classifier is configured
    pub predictor: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelListResponse {
    pub models: Vec<ModelSummary>,
}

/// Body of `POST /api/model`: a tagged hyperparameter set plus optional
/// display name and evaluation metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateModelRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub metrics: Option<ModelMetrics>,
    #[serde(flatten)]
    pub params: ModelFamily,
}

impl From<CreateModelRequest> for NewModel {
    fn from(request: CreateModelRequest) -> Self {
        NewModel {
            name: request.name,
            params: request.params,
            metrics: request.metrics.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateModelResponse {
    pub status: String,
    pub model_id: ModelId,
}

/// Default hyperparameters of each supported family.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelFamiliesResponse {
    pub families: Vec<ModelFamilyInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelFamilyInfo {
    pub display_name: String,
    pub defaults: ModelFamily,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfilesResponse {
    pub profiles: BTreeMap<String, Vec<FieldSpec>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomCandidateResponse {
    pub profile: String,
    pub features: CandidateFeatures,
}
