//! Checklist progress aggregation.
//!
//! Projects publish a catalog of discord and social checklist items. Unlike
//! negotiated tasks these are not assigned individually: every user working
//! on a project gets one progress record, seeded from the catalog on first
//! submission, that tracks each item's approval status together with the
//! running point total and completed-item count.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
