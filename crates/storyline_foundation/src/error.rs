//! Error types for the Storyline system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//!
//! These are operational errors (bookkeeping on the act store, diagnostic
//! passes that cannot complete). Precondition failures are not errors in
//! this sense: they are returned as validation data by the engine.

use std::fmt;

use thiserror::Error;

use crate::entity::{ActId, LinkId};

/// The main error type for Storyline operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates an act not found error.
    #[must_use]
    pub fn act_not_found(id: ActId) -> Self {
        Self::new(ErrorKind::ActNotFound(id))
    }

    /// Creates a link not found error.
    #[must_use]
    pub fn link_not_found(id: LinkId) -> Self {
        Self::new(ErrorKind::LinkNotFound(id))
    }

    /// Creates a duplicate link error.
    #[must_use]
    pub fn duplicate_link(id: LinkId) -> Self {
        Self::new(ErrorKind::DuplicateLink(id))
    }

    /// Creates a diagnostic pass failure.
    #[must_use]
    pub fn pass_failed(pass: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::PassFailed {
            pass: pass.into(),
            message: message.into(),
        })
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Act was not found in the engine.
    #[error("act not found: {0}")]
    ActNotFound(ActId),

    /// Causal link was not found.
    #[error("causal link not found: {0}")]
    LinkNotFound(LinkId),

    /// A causal link with this id is already stored.
    #[error("duplicate causal link id: {0}")]
    DuplicateLink(LinkId),

    /// A diagnostic pass could not complete.
    #[error("validation pass {pass} failed: {message}")]
    PassFailed {
        /// Name of the pass.
        pass: String,
        /// What went wrong.
        message: String,
    },
}

/// Where an error occurred, as a stack of named frames.
///
/// The reporter pushes the failing pass's name, so a failure can be traced
/// back to the pass that produced it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// Operation stack, outermost first.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }

    /// The innermost frame.
    #[must_use]
    pub fn innermost(&self) -> Option<&str> {
        self.stack.last().map(String::as_str)
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "in {}", self.stack.join(" > "))
    }
}
