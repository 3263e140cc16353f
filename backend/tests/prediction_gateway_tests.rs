//! `HttpPredictor` against a throwaway upstream bound to an ephemeral port.

#![cfg(feature = "http-server")]

use std::net::SocketAddr;
use std::time::Duration;

use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

use transit_lab::db::LocalRepository;
use transit_lab::models::{CandidateFeatures, ModelId, PredictRequest, Verdict};
use transit_lab::services::prediction::{predict_candidate, HttpPredictor, PredictionError, Predictor};

async fn spawn_upstream(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

fn candidate() -> CandidateFeatures {
    let mut features = CandidateFeatures::new();
    features.insert("koi_period", Some(9.48));
    features.insert("koi_depth", Some(615.8));
    features
}

#[tokio::test]
async fn test_forwards_model_path_and_features() {
    let router = Router::new().route(
        "/predict",
        post(|Json(body): Json<Value>| async move {
            assert_eq!(body["model_path"], "models/exoplanet_kepler_model.joblib");
            assert_eq!(body["features"]["koi_period"], 9.48);
            Json(json!({
                "status": "success",
                "prediction": {"verdict": "CONFIRMED", "confidence": 0.97}
            }))
        }),
    );
    let addr = spawn_upstream(router).await;

    let predictor = HttpPredictor::new(&format!("http://{}", addr), Duration::from_secs(5)).unwrap();
    let repo = LocalRepository::with_models_dir("models");
    let request = PredictRequest {
        model: Some(ModelId::new(1)),
        features: candidate(),
    };

    let outcome = predict_candidate(&repo, &predictor, &request).await.unwrap();
    assert!(outcome.ok);
    assert_eq!(outcome.prediction, Some(Verdict::Confirmed));
    assert_eq!(outcome.score, Some(0.97));
}

#[tokio::test]
async fn test_upstream_error_carries_detail() {
    let router = Router::new().route(
        "/predict",
        post(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"detail": "La predicción falló."})),
            )
        }),
    );
    let addr = spawn_upstream(router).await;

    let predictor = HttpPredictor::new(&format!("http://{}/", addr), Duration::from_secs(5)).unwrap();
    let err = predictor
        .predict("models/m.joblib", &candidate())
        .await
        .unwrap_err();

    match err {
        PredictionError::Upstream { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "La predicción falló.");
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[tokio::test]
async fn test_non_json_reply_is_decode_error() {
    let router = Router::new().route("/predict", post(|| async { "definitely not json" }));
    let addr = spawn_upstream(router).await;

    let predictor = HttpPredictor::new(&format!("http://{}", addr), Duration::from_secs(5)).unwrap();
    let err = predictor
        .predict("models/m.joblib", &candidate())
        .await
        .unwrap_err();
    assert!(matches!(err, PredictionError::Decode(_)));
}

#[tokio::test]
async fn test_slow_upstream_times_out() {
    let router = Router::new().route(
        "/predict",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(2)).await;
            Json(json!({"prediction": "CONFIRMED"}))
        }),
    );
    let addr = spawn_upstream(router).await;

    let predictor =
        HttpPredictor::new(&format!("http://{}", addr), Duration::from_millis(100)).unwrap();
    let err = predictor
        .predict("models/m.joblib", &candidate())
        .await
        .unwrap_err();
    assert!(err.is_timeout());
}

#[tokio::test]
async fn test_unreachable_upstream_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let predictor = HttpPredictor::new(&format!("http://{}", addr), Duration::from_secs(2)).unwrap();
    let err = predictor
        .predict("models/m.joblib", &candidate())
        .await
        .unwrap_err();
    assert!(matches!(err, PredictionError::Transport(_)));
}
