//! Acts, causality engine, and causal links for Storyline.
//!
//! This crate provides:
//! - [`Act`] - The seven act kinds with their precondition checks and effects
//! - [`CausalityEngine`] - Act storage, timeline replay, validation, and causal tracing
//! - [`CausalLink`] - Typed relations between acts
//! - [`TransitionLog`] - Recorded state transitions
//! - [`ValidationResult`] - Precondition failures as data

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod act;
pub mod engine;
pub mod history;
pub mod link;
pub mod validation;

pub use act::{
    Act, ActKind, ActType, CombineItems, GiveItem, Move, PlaceItem, Speak, TakeItem, TargetType,
    UseItem,
};
pub use engine::{
    ActOutcome, CausalTrace, CausalityEngine, ConflictInfo, ConflictKind, EngineConfig, Replay,
    SkippedAct, SuggestionInfo, TimelineValidation,
};
pub use history::{StateTransition, TransitionLog};
pub use link::{CausalLink, Dependency, LinkType};
pub use validation::{ErrorCode, ValidationError, ValidationResult};
