//! Structured, recoverable validation results.
//!
//! A failed precondition is data, not an error: checks return a
//! [`ValidationResult`] listing every violated rule, and the caller decides
//! what to do with it. Error codes are stable strings that tooling and tests
//! match on verbatim.

use std::fmt;

use storyline_foundation::EntityId;

/// Stable identifier for a violated rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorCode {
    /// The actor (or another named person) does not exist in the world.
    PersonNotFound,
    /// The actor is not where the act requires.
    NotAtLocation,
    /// The required person does not own the item.
    ItemNotOwned,
    /// Two persons that must share a location do not.
    NotSameLocation,
    /// An act that needs two different persons names the same one twice.
    SamePerson,
    /// A take names neither or both of its possible sources.
    InvalidSource,
    /// The item is not lying at the named location.
    ItemNotAtLocation,
    /// The speaker does not know what they are trying to say.
    InfoNotKnown,
    /// A speak act addresses nobody.
    NoRecipients,
    /// The speaker is among their own recipients.
    SpeakingToSelf,
    /// A use target does not exist.
    TargetNotFound,
    /// A use target exists but is out of the actor's reach.
    TargetNotReachable,
    /// A combine lists fewer than two distinct items.
    InsufficientItems,
    /// A combine lists the same item more than once.
    DuplicateItems,
    /// No act with the given id is stored.
    ActNotFound,
    /// Another act depends on the one being removed.
    HasDependencies,
    /// An act with the same id is already stored.
    DuplicateActId,
}

impl ErrorCode {
    /// The stable string form of this code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PersonNotFound => "PERSON_NOT_FOUND",
            Self::NotAtLocation => "NOT_AT_LOCATION",
            Self::ItemNotOwned => "ITEM_NOT_OWNED",
            Self::NotSameLocation => "NOT_SAME_LOCATION",
            Self::SamePerson => "SAME_PERSON",
            Self::InvalidSource => "INVALID_SOURCE",
            Self::ItemNotAtLocation => "ITEM_NOT_AT_LOCATION",
            Self::InfoNotKnown => "INFO_NOT_KNOWN",
            Self::NoRecipients => "NO_RECIPIENTS",
            Self::SpeakingToSelf => "SPEAKING_TO_SELF",
            Self::TargetNotFound => "TARGET_NOT_FOUND",
            Self::TargetNotReachable => "TARGET_NOT_REACHABLE",
            Self::InsufficientItems => "INSUFFICIENT_ITEMS",
            Self::DuplicateItems => "DUPLICATE_ITEMS",
            Self::ActNotFound => "ACT_NOT_FOUND",
            Self::HasDependencies => "HAS_DEPENDENCIES",
            Self::DuplicateActId => "DUPLICATE_ACT_ID",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One violated rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationError {
    /// Stable code.
    pub code: ErrorCode,
    /// Human-readable explanation.
    pub message: String,
    /// Entities involved in the violation.
    pub affected_entities: Vec<EntityId>,
    /// A corrective edit, when one is obvious.
    pub suggestion: Option<String>,
}

impl ValidationError {
    /// Creates an error without a suggestion.
    #[must_use]
    pub fn new(
        code: ErrorCode,
        message: impl Into<String>,
        affected_entities: Vec<EntityId>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            affected_entities,
            suggestion: None,
        }
    }

    /// Attaches a suggestion.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

/// Outcome of a check: valid, or every rule that was violated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationResult {
    /// True when `errors` is empty.
    pub valid: bool,
    /// Every violated rule, in check order.
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// A passing result.
    #[must_use]
    pub fn ok() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }

    /// Builds a result from collected errors; valid iff there are none.
    #[must_use]
    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// A failing result with a single error.
    #[must_use]
    pub fn fail(error: ValidationError) -> Self {
        Self::from_errors(vec![error])
    }

    /// Returns true if any error carries the code.
    #[must_use]
    pub fn has_code(&self, code: ErrorCode) -> bool {
        self.errors.iter().any(|e| e.code == code)
    }

    /// Number of errors carrying the code.
    #[must_use]
    pub fn count_code(&self, code: ErrorCode) -> usize {
        self.errors.iter().filter(|e| e.code == code).count()
    }

    /// The codes of all errors, in order.
    #[must_use]
    pub fn codes(&self) -> Vec<ErrorCode> {
        self.errors.iter().map(|e| e.code).collect()
    }

    /// Joins every error message into one line.
    #[must_use]
    pub fn summary(&self) -> String {
        let messages: Vec<_> = self.errors.iter().map(|e| e.message.as_str()).collect();
        messages.join("; ")
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::ok()
    }
}
