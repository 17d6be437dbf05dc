//! Storyline - Causality and validation core for narrative timelines
//!
//! This crate re-exports all layers of the Storyline system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: storyline_debug      - Validation reporter, diagnostic passes, fix suggestions
//! Layer 2: storyline_engine     - Acts, causality engine, causal links, state history
//! Layer 1: storyline_storage    - World state snapshots, state diffs
//! Layer 0: storyline_foundation - Core types (EntityId, ActId, Timestamp, Error)
//! ```

pub use storyline_debug as debug;
pub use storyline_engine as engine;
pub use storyline_foundation as foundation;
pub use storyline_storage as storage;
