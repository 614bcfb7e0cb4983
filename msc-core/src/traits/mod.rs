//! Abstract interfaces shared by the MSC backends
//!
//! Traits are pure interfaces - no concrete implementations.

pub mod backend;
pub mod source;

pub use backend::StorageBackend;
pub use source::PointSource;
