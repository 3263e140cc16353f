pub mod catalog;
pub mod features;
pub mod hyperparams;
pub mod macros;
pub mod prediction;
pub mod transit;

pub use catalog::{ModelId, ModelMetrics, ModelRecord, ModelSummary, NewModel, BASE_MODEL_ID};
pub use features::{CandidateFeatures, FieldSpec};
pub use hyperparams::{
    HyperparameterError, LightGbmParams, ModelFamily, ModelType, RandomForestParams,
    XgboostParams,
};
pub use prediction::{PredictRequest, PredictionOutcome, Verdict};
pub use transit::{
    LightCurveSample, NoiseModel, OutputMode, RedNoise, SnrSettings, TransitParameters,
};
