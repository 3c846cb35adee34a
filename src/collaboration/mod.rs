//! Ambassador collaboration applications.
//!
//! Before working on a project a user applies once, describing their reach
//! and interests. An admin approves or rejects the application; both outcomes
//! are final and a pair never gets a second application.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
