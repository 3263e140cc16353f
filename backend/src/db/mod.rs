//! Model catalog storage.
//!
//! Follows the repository pattern so storage backends can be swapped:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  HTTP handlers                                          │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services.rs)                            │
//! │  - Hyperparameter validation                            │
//! │  - Listing summaries, logging                           │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Trait (repository/) - ModelRepository       │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────┴────────────────┐
//!     │                                │
//! ┌───▼──────────────┐     ┌───────────▼─────────────┐
//! │ Local Repository │     │ File Repository         │
//! │ (in-memory)      │     │ (JSON catalog file)     │
//! └──────────────────┘     └─────────────────────────┘
//! ```
//!
//! Use [`factory::RepositoryFactory`] to build the backend named in
//! [`crate::config::CatalogSettings`].

pub mod factory;
pub mod repositories;
pub mod repository;
pub mod services;

pub use factory::{RepositoryFactory, RepositoryType};
#[cfg(feature = "file-repo")]
pub use repositories::FileRepository;
pub use repositories::LocalRepository;
pub use repository::{ErrorContext, ModelRepository, RepositoryError, RepositoryResult};
pub use services::{get_model, health_check, list_models, register_model, resolve_model_path};
