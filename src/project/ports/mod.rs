//! Port contracts for project catalog lookup.

pub mod directory;

pub use directory::{ProjectDirectory, ProjectDirectoryError, ProjectDirectoryResult};
