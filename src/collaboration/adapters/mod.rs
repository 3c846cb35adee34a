//! Adapter implementations for collaboration ports.

pub mod memory;
