//! Request and response shapes of the classification round-trip.

use serde::{Deserialize, Serialize};

use super::catalog::ModelId;
use super::features::CandidateFeatures;

/// Body of `POST /api/predict`. A `null` model selects the base model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictRequest {
    #[serde(default)]
    pub model: Option<ModelId>,
    pub features: CandidateFeatures,
}

/// Classifier decision as reported by the prediction service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Confirmed,
    #[serde(alias = "FALSE POSITIVE")]
    FalsePositive,
}

/// Normalized reply handed to the UI.
///
/// `ok == false` always carries `error`; a successful reply carries
/// `prediction` and usually `score`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionOutcome {
    pub ok: bool,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prediction: Option<Verdict>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PredictionOutcome {
    pub fn success(verdict: Verdict, score: Option<f64>) -> Self {
        Self {
            ok: true,
            status: "success".to_string(),
            prediction: Some(verdict),
            score,
            details: None,
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            status: "error".to_string(),
            prediction: None,
            score: None,
            details: None,
            error: Some(message.into()),
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}
