//! Integration tests for Layer 3: Debug
//!
//! Tests for the validation reporter and its passes.

mod passes;
