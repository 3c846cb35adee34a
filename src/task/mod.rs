//! Task lifecycle management.
//!
//! A task is an assignable unit of work owned by a project and assigned to a
//! single ambassador. This module enforces how it moves from assignment to
//! verified completion: submission, negotiation of terms through the
//! modification ledger, dual-party acceptance, and the permissive status
//! reset escape hatch. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
