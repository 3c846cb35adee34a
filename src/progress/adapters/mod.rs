//! Adapter implementations for progress ports.

pub mod memory;
