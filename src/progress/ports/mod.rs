//! Port contracts for checklist progress persistence.

pub mod repository;

pub use repository::{ProgressRepository, ProgressRepositoryError, ProgressRepositoryResult};
