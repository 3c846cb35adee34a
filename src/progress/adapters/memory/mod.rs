//! In-memory adapters for progress ports.

mod progress;

pub use progress::InMemoryProgressRepository;
