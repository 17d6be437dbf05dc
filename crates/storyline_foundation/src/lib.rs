//! Identifiers, errors, and persistent collections for Storyline.
//!
//! This crate provides:
//! - [`EntityId`] - Untyped identifiers shared by persons, locations, items, and information
//! - [`ActId`] and [`LinkId`] - Identifiers for acts and causal links
//! - [`Timestamp`] - The story clock
//! - [`Error`] - Operational errors with context
//! - Persistent collections ([`LtVec`], [`LtMap`])

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod collections;
pub mod entity;
pub mod error;

pub use collections::{LtMap, LtVec};
pub use entity::{ActId, EntityId, LinkId};
pub use error::{Error, ErrorContext, ErrorKind};

/// Position on the story clock.
///
/// Signed so that "the instant before `t`" is always `t - 1`, even at zero.
pub type Timestamp = i64;

/// Result type alias using Storyline's [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;
