//! Integration tests for Layer 2: Engine
//!
//! Tests for act contracts, timeline replay, validation, links, and causal tracing.

mod acts;
mod causality;
mod timeline;
