//! Ambassador: task and collaboration lifecycle engine.
//!
//! This crate implements the rules that govern how work moves through a
//! project-collaboration platform: organizations publish projects, recruit
//! ambassadors, assign tasks, negotiate their terms, and award points for
//! completed checklist items. Page rendering, HTTP routing, and
//! authentication are external collaborators that call into the services
//! exposed here and render the state they return.
//!
//! # Architecture
//!
//! Ambassador follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory stores,
//!   event sinks)
//!
//! # Modules
//!
//! - [`task`]: Task lifecycle, negotiation ledger, and dual-party acceptance
//! - [`progress`]: Checklist progress and point accounting
//! - [`collaboration`]: Ambassador application state machine
//! - [`project`]: Read-side project catalog consumed by the services
//! - [`identity`]: Caller identity and role capability
//! - [`config`]: Engine policy configuration
//! - [`error`]: Crate-wide error classification

pub mod collaboration;
pub mod config;
pub mod error;
pub mod identity;
pub mod progress;
pub mod project;
pub mod revision;
pub mod task;
