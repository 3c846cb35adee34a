//! Unit tests for the checklist progress module.

mod support;
