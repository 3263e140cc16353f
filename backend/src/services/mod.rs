//! Service layer: light-curve synthesis, candidate sampling and the
//! prediction gateway.
//!
//! The synthesis modules are synchronous and pure apart from the random
//! source handed in by the caller. Catalog operations live in
//! [`crate::db::services`].

pub mod feature_sampler;
pub mod light_curve;
pub mod noise;
pub mod prediction;
pub mod synthesis;

pub use feature_sampler::{sample_candidate, sample_value};
pub use light_curve::generate;
pub use noise::{add_gaussian_noise, add_gaussian_noise_default, add_red_noise, sigma_from_snr};
pub use prediction::{
    predict_candidate, HttpPredictor, PredictionError, Predictor, UnconfiguredPredictor,
};
pub use synthesis::{synthesize, synthesize_seeded, LightCurveRequest, SynthesizedCurve};
