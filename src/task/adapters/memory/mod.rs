//! In-memory adapters for task lifecycle ports.

mod events;
mod task;

pub use events::InMemoryEventLog;
pub use task::InMemoryTaskRepository;
