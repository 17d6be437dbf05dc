//! Immutable world state snapshots and state diffs for Storyline.
//!
//! This crate provides:
//! - [`WorldState`] - Who is where, who owns what, who knows what, at one instant
//! - [`StateChange`] / [`diff_states`] - Field-level differences between two snapshots

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod diff;
pub mod state;

pub use diff::{ChangeKind, ChangeValue, StateChange, diff_states, format_changes};
pub use state::WorldState;
