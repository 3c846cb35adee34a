//! Adapter implementations for the project directory port.

pub mod memory;
