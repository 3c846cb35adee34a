//! In-memory adapters for collaboration ports.

mod application;

pub use application::InMemoryApplicationRepository;
