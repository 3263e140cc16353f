//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the service
//! layer for business logic.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};

use super::dto::{
    CreateModelRequest, CreateModelResponse, HealthResponse, ModelFamiliesResponse,
    ModelFamilyInfo, ModelListResponse, ProfilesResponse, RandomCandidateResponse,
};
use super::error::AppError;
use super::state::AppState;
use crate::db::services as db_services;
use crate::models::features::{kepler_profile, profiles, KEPLER_PROFILE};
use crate::models::{ModelId, ModelRecord, ModelType, PredictRequest, PredictionOutcome};
use crate::services::{feature_sampler, prediction, synthesis};

/// Upper bound on samples in one synthesized curve.
pub const MAX_CURVE_SAMPLES: usize = 200_000;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: db_status,
        predictor: state.predictor.is_configured(),
    }))
}

// =============================================================================
// Model Catalog
// =============================================================================

/// GET /api/models
pub async fn list_models(State(state): State<AppState>) -> HandlerResult<ModelListResponse> {
    let models = db_services::list_models(state.repository.as_ref()).await?;
    Ok(Json(ModelListResponse { models }))
}

/// GET /api/models/{id}
pub async fn get_model(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> HandlerResult<ModelRecord> {
    let Path(id) = id?;
    let model = db_services::get_model(state.repository.as_ref(), ModelId::new(id)).await?;
    Ok(Json(model))
}

/// POST /api/model
///
/// Register a hyperparameter configuration. Returns 201 with the new id.
pub async fn create_model(
    State(state): State<AppState>,
    payload: Result<Json<CreateModelRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateModelResponse>), AppError> {
    let Json(request) = payload?;
    let record = db_services::register_model(state.repository.as_ref(), request.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateModelResponse {
            status: "success".to_string(),
            model_id: record.id,
        }),
    ))
}

/// GET /api/model-families
pub async fn list_model_families() -> HandlerResult<ModelFamiliesResponse> {
    let families = ModelType::ALL
        .iter()
        .map(|t| ModelFamilyInfo {
            display_name: t.display_name().to_string(),
            defaults: t.default_params(),
        })
        .collect();
    Ok(Json(ModelFamiliesResponse { families }))
}

// =============================================================================
// Candidate Features
// =============================================================================

/// GET /api/profiles
pub async fn list_profiles() -> HandlerResult<ProfilesResponse> {
    Ok(Json(ProfilesResponse {
        profiles: profiles(),
    }))
}

/// GET /api/features/random
///
/// Random Kepler candidate, one uniform draw per field.
pub async fn random_features() -> HandlerResult<RandomCandidateResponse> {
    let features = feature_sampler::sample_candidate(&kepler_profile(), &mut rand::thread_rng());
    Ok(Json(RandomCandidateResponse {
        profile: KEPLER_PROFILE.to_string(),
        features,
    }))
}

// =============================================================================
// Prediction
// =============================================================================

/// POST /api/predict
///
/// Forward the candidate to the classification service. Gateway failures
/// answer 502/503 with `{ ok: false, error }`.
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> HandlerResult<PredictionOutcome> {
    let Json(request) = payload?;
    let outcome = prediction::predict_candidate(
        state.repository.as_ref(),
        state.predictor.as_ref(),
        &request,
    )
    .await?;
    Ok(Json(outcome))
}

// =============================================================================
// Light Curves
// =============================================================================

/// POST /api/light-curve
pub async fn light_curve(
    payload: Result<Json<synthesis::LightCurveRequest>, JsonRejection>,
) -> HandlerResult<synthesis::SynthesizedCurve> {
    let Json(request) = payload?;

    let samples = request.transit.sample_count();
    if samples > MAX_CURVE_SAMPLES {
        return Err(AppError::BadRequest(format!(
            "point_count x period_count = {} exceeds the limit of {}",
            samples, MAX_CURVE_SAMPLES
        )));
    }

    Ok(Json(synthesis::synthesize_seeded(&request)))
}
