//! In-memory project directory.

mod directory;

pub use directory::InMemoryProjectDirectory;
