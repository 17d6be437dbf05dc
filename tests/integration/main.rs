//! Cross-layer integration tests
//!
//! End-to-end story scenarios from initial state to validation report.

mod scenarios;
