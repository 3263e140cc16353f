//! Catalog repository implementations.

#[cfg(feature = "file-repo")]
pub mod file;
pub mod local;

#[cfg(feature = "file-repo")]
pub use file::FileRepository;
pub use local::LocalRepository;
