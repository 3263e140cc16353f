//! HTTP server module.
//!
//! An axum-based REST API over the catalog, the candidate sampler, the
//! prediction gateway and the light-curve synthesizer.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                              │
//! │  - Request parsing and validation                        │
//! │  - CORS, compression, error handling                     │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  services/ and db::services                              │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//!          ┌──────────┴───────────┐
//!          │                      │
//! ┌────────▼─────────┐  ┌─────────▼────────────┐
//! │ ModelRepository  │  │ Predictor (upstream) │
//! └──────────────────┘  └──────────────────────┘
//! ```

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use error::{ApiError, AppError};
pub use router::create_router;
pub use state::AppState;
