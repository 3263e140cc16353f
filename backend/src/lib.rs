//! # Transit Lab
//!
//! Backend for an exoplanet-candidate classification demo.
//!
//! The core is a light-curve synthesizer: a trapezoidal transit model,
//! SNR-derived noise amplitude, and Gaussian and red noise injection. Around
//! it sits a small service the browser UI talks to: a model catalog with
//! typed hyperparameters, candidate-feature profiles with a random-candidate
//! generator, and a gateway to an external classification service.
//!
//! ## Architecture
//!
//! - [`models`]: domain types (transit parameters, hyperparameters, catalog
//!   records, feature profiles, prediction envelopes)
//! - [`services`]: synthesis, sampling and the prediction gateway
//! - [`db`]: model catalog repository pattern
//! - [`config`]: TOML configuration with environment overrides
//! - [`http`]: axum REST API (`http-server` feature)
//!
//! ```
//! use qtty::{Days, Hours};
//! use transit_lab::models::{OutputMode, TransitParameters};
//! use transit_lab::services::generate;
//!
//! let params = TransitParameters::new(Days::new(3.0), Hours::new(2.0), 1000.0, 0.3);
//! let curve = generate(&params, OutputMode::Time);
//! assert_eq!(curve.len(), 1000);
//! ```

// RepositoryError carries rich context for debugging
#![allow(clippy::result_large_err)]

pub mod config;
pub mod db;
pub mod models;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
