//! Unit tests for the collaboration module.

mod support;
