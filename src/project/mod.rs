//! Read-side project catalog.
//!
//! Project publishing and editing live outside the engine. The services in
//! this crate only need to know whether a project accepts ambassador
//! applications and which checklist items it offers, so this module exposes
//! that view through the [`ports::ProjectDirectory`] port.

pub mod adapters;
pub mod domain;
pub mod ports;
