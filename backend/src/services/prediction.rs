//! Prediction gateway to the external classification service.
//!
//! The classifier itself lives outside this crate. [`HttpPredictor`] forwards
//! a candidate as `{ model_path, features }` to `<base>/predict` and turns
//! whatever comes back into a [`PredictionOutcome`]. One request per call,
//! bounded by the configured timeout, never retried.

use async_trait::async_trait;
use log::{debug, warn};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::db::{services as catalog, ModelRepository, RepositoryError};
use crate::models::features::kepler_profile;
use crate::models::{CandidateFeatures, PredictRequest, PredictionOutcome, Verdict};

#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("prediction service is not configured")]
    NotConfigured,

    #[error("prediction service unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("prediction service returned HTTP {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("unexpected reply from prediction service: {0}")]
    Decode(String),

    #[error(transparent)]
    Catalog(#[from] RepositoryError),
}

impl PredictionError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }
}

#[async_trait]
pub trait Predictor: Send + Sync {
    /// Classify `features` with the model stored at `model_path`.
    async fn predict(
        &self,
        model_path: &str,
        features: &CandidateFeatures,
    ) -> Result<PredictionOutcome, PredictionError>;

    fn is_configured(&self) -> bool {
        true
    }
}

/// Stand-in used when no upstream URL is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredPredictor;

#[async_trait]
impl Predictor for UnconfiguredPredictor {
    async fn predict(
        &self,
        _model_path: &str,
        _features: &CandidateFeatures,
    ) -> Result<PredictionOutcome, PredictionError> {
        Err(PredictionError::NotConfigured)
    }

    fn is_configured(&self) -> bool {
        false
    }
}

#[derive(Serialize)]
struct UpstreamRequest<'a> {
    model_path: &'a str,
    features: &'a CandidateFeatures,
}

#[derive(Debug, Clone)]
pub struct HttpPredictor {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpPredictor {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, PredictionError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/predict", base_url.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Predictor for HttpPredictor {
    async fn predict(
        &self,
        model_path: &str,
        features: &CandidateFeatures,
    ) -> Result<PredictionOutcome, PredictionError> {
        debug!("POST {} (model {})", self.endpoint, model_path);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&UpstreamRequest {
                model_path,
                features,
            })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("Prediction service answered {}", status);
            return Err(PredictionError::Upstream {
                status: status.as_u16(),
                body: error_message(&body),
            });
        }

        let reply: Value = serde_json::from_str(&body)
            .map_err(|e| PredictionError::Decode(format!("invalid JSON: {}", e)))?;
        normalize_reply(reply)
    }
}

/// Resolve the model artifact and ask the predictor about the candidate.
pub async fn predict_candidate<R, P>(
    repo: &R,
    predictor: &P,
    request: &PredictRequest,
) -> Result<PredictionOutcome, PredictionError>
where
    R: ModelRepository + ?Sized,
    P: Predictor + ?Sized,
{
    if !predictor.is_configured() {
        return Err(PredictionError::NotConfigured);
    }

    let profile = kepler_profile();
    let missing = request.features.missing_keys(&profile);
    if !missing.is_empty() {
        debug!("Candidate has no value for {}", missing.join(", "));
    }

    let model_path = catalog::resolve_model_path(repo, request.model).await?;
    predictor.predict(&model_path, &request.features).await
}

/// Turn an upstream reply into the UI envelope.
///
/// Accepts the nested `{ status, prediction: { verdict, confidence } }` shape
/// as well as a flat `{ prediction, score }` one. Verdicts may be labels,
/// `0`/`1`, or booleans.
pub fn normalize_reply(reply: Value) -> Result<PredictionOutcome, PredictionError> {
    if reply.get("status").and_then(Value::as_str) == Some("error") || reply.get("detail").is_some()
    {
        let message = reply
            .get("detail")
            .or_else(|| reply.get("error"))
            .map(value_text)
            .unwrap_or_else(|| "prediction failed".to_string());
        return Ok(PredictionOutcome::failure(message).with_details(reply));
    }

    let prediction = reply
        .get("prediction")
        .ok_or_else(|| PredictionError::Decode("missing `prediction`".to_string()))?;

    let (verdict_value, score) = match prediction {
        Value::Object(inner) => (
            inner.get("verdict").unwrap_or(&Value::Null),
            inner.get("confidence").or_else(|| inner.get("score")),
        ),
        other => (other, reply.get("score").or_else(|| reply.get("confidence"))),
    };

    let verdict = parse_verdict(verdict_value).ok_or_else(|| {
        PredictionError::Decode(format!("unrecognized verdict {}", verdict_value))
    })?;
    let score = score.and_then(Value::as_f64).filter(|s| s.is_finite());

    Ok(PredictionOutcome::success(verdict, score).with_details(reply))
}

fn parse_verdict(value: &Value) -> Option<Verdict> {
    match value {
        Value::String(label) => {
            match label.trim().to_uppercase().replace(['_', '-'], " ").as_str() {
                "CONFIRMED" | "1" => Some(Verdict::Confirmed),
                "FALSE POSITIVE" | "0" => Some(Verdict::FalsePositive),
                _ => None,
            }
        }
        Value::Bool(true) => Some(Verdict::Confirmed),
        Value::Bool(false) => Some(Verdict::FalsePositive),
        Value::Number(n) => match n.as_f64() {
            Some(v) if v == 1.0 => Some(Verdict::Confirmed),
            Some(v) if v == 0.0 => Some(Verdict::FalsePositive),
            _ => None,
        },
        _ => None,
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// `detail`/`error` from a JSON error body, otherwise the raw text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("detail").or_else(|| v.get("error")).map(value_text))
        .unwrap_or_else(|| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::LocalRepository;
    use crate::models::ModelId;
    use parking_lot::Mutex;
    use serde_json::json;

    #[derive(Default)]
    struct RecordingPredictor {
        paths: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Predictor for RecordingPredictor {
        async fn predict(
            &self,
            model_path: &str,
            _features: &CandidateFeatures,
        ) -> Result<PredictionOutcome, PredictionError> {
            self.paths.lock().push(model_path.to_string());
            Ok(PredictionOutcome::success(Verdict::Confirmed, Some(0.9)))
        }
    }

    #[test]
    fn test_nested_reply() {
        let reply = json!({
            "status": "success",
            "prediction": {"verdict": "FALSE POSITIVE", "confidence": 0.83}
        });
        let outcome = normalize_reply(reply).unwrap();
        assert!(outcome.ok);
        assert_eq!(outcome.prediction, Some(Verdict::FalsePositive));
        assert_eq!(outcome.score, Some(0.83));
        assert!(outcome.details.is_some());
    }

    #[test]
    fn test_flat_reply_with_numeric_verdict() {
        let outcome = normalize_reply(json!({"prediction": 1, "score": 0.7})).unwrap();
        assert_eq!(outcome.prediction, Some(Verdict::Confirmed));
        assert_eq!(outcome.score, Some(0.7));
    }

    #[test]
    fn test_float_verdicts() {
        let outcome = normalize_reply(json!({"prediction": 1.0, "score": 0.6})).unwrap();
        assert_eq!(outcome.prediction, Some(Verdict::Confirmed));
        let outcome = normalize_reply(json!({"prediction": 0.0})).unwrap();
        assert_eq!(outcome.prediction, Some(Verdict::FalsePositive));
        let err = normalize_reply(json!({"prediction": 0.5})).unwrap_err();
        assert!(matches!(err, PredictionError::Decode(_)));
    }

    #[test]
    fn test_error_reply_becomes_failure() {
        let outcome = normalize_reply(json!({"detail": "model file missing"})).unwrap();
        assert!(!outcome.ok);
        assert_eq!(outcome.error.as_deref(), Some("model file missing"));
    }

    #[test]
    fn test_unrecognized_verdict() {
        let err = normalize_reply(json!({"prediction": "MAYBE"})).unwrap_err();
        assert!(matches!(err, PredictionError::Decode(_)));
        let err = normalize_reply(json!({"status": "success"})).unwrap_err();
        assert!(matches!(err, PredictionError::Decode(_)));
    }

    #[test]
    fn test_error_message_prefers_detail() {
        assert_eq!(error_message(r#"{"detail": "boom"}"#), "boom");
        assert_eq!(error_message("  Bad Gateway \n"), "Bad Gateway");
    }

    #[tokio::test]
    async fn test_predict_candidate_resolves_base_for_unknown_model() {
        let repo = LocalRepository::with_models_dir("m");
        let predictor = RecordingPredictor::default();
        let request = PredictRequest {
            model: Some(ModelId::new(42)),
            features: CandidateFeatures::default(),
        };

        let outcome = predict_candidate(&repo, &predictor, &request).await.unwrap();
        assert!(outcome.ok);
        assert_eq!(predictor.paths.lock().as_slice(), [repo.base_model_path()]);
    }

    #[tokio::test]
    async fn test_predict_candidate_with_partial_features() {
        let repo = LocalRepository::new();
        let predictor = RecordingPredictor::default();
        let mut features = CandidateFeatures::new();
        features.insert("koi_period", Some(3.5));
        features.insert("koi_depth", None);
        let request = PredictRequest {
            model: None,
            features,
        };

        let outcome = predict_candidate(&repo, &predictor, &request).await.unwrap();
        assert!(outcome.ok);
        assert_eq!(predictor.paths.lock().len(), 1);
    }

    #[tokio::test]
    async fn test_unconfigured_predictor() {
        let repo = LocalRepository::new();
        let err = predict_candidate(&repo, &UnconfiguredPredictor, &PredictRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, PredictionError::NotConfigured));
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let predictor = HttpPredictor::new("http://localhost:8000/", Duration::from_secs(1)).unwrap();
        assert_eq!(predictor.endpoint(), "http://localhost:8000/predict");
    }
}
