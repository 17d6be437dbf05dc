//! Integration tests for Layer 1: Storage
//!
//! Tests for world state snapshots, state diffs, and serialization.

mod diffs;
mod serialization;
mod world_state;
