//! Adapter implementations for task lifecycle ports.

pub mod log_publisher;
pub mod memory;

pub use log_publisher::TracingEventPublisher;
