//! Configuration for the validation reporter.

use std::time::Duration;

/// Configuration for a [`ValidationReporter`](crate::ValidationReporter).
///
/// Each built-in pass can be switched off on its own. Suggestions below the
/// confidence threshold are dropped from the report; issues never are.
#[derive(Clone, Debug)]
pub struct ReporterConfig {
    /// Run the timeline pass (precondition failures along the timeline).
    pub enable_timeline_validation: bool,

    /// Run the paradox pass (dependency cycles, temporal paradoxes).
    pub enable_paradox_detection: bool,

    /// Run the deadlock pass.
    pub enable_deadlock_detection: bool,

    /// Run the redundancy pass.
    pub enable_redundancy_detection: bool,

    /// Run the state consistency pass.
    pub enable_consistency_check: bool,

    /// Minimum confidence for a suggestion to appear in the report.
    pub suggestion_confidence_threshold: f64,

    /// Expected upper bound on a run. Exceeding it is logged, never enforced.
    pub max_validation_time: Duration,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            enable_timeline_validation: true,
            enable_paradox_detection: true,
            enable_deadlock_detection: true,
            enable_redundancy_detection: true,
            enable_consistency_check: true,
            suggestion_confidence_threshold: 0.6,
            max_validation_time: Duration::from_secs(5),
        }
    }
}

impl ReporterConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every pass, and every suggestion regardless of confidence.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            suggestion_confidence_threshold: 0.0,
            ..Self::default()
        }
    }

    /// Only the timeline pass, and only high-confidence suggestions.
    #[must_use]
    pub fn minimal() -> Self {
        Self {
            enable_timeline_validation: true,
            enable_paradox_detection: false,
            enable_deadlock_detection: false,
            enable_redundancy_detection: false,
            enable_consistency_check: false,
            suggestion_confidence_threshold: 0.8,
            max_validation_time: Duration::from_secs(1),
        }
    }

    /// Builder method to toggle the timeline pass.
    #[must_use]
    pub fn with_timeline_validation(mut self, enabled: bool) -> Self {
        self.enable_timeline_validation = enabled;
        self
    }

    /// Builder method to toggle the paradox pass.
    #[must_use]
    pub fn with_paradox_detection(mut self, enabled: bool) -> Self {
        self.enable_paradox_detection = enabled;
        self
    }

    /// Builder method to toggle the deadlock pass.
    #[must_use]
    pub fn with_deadlock_detection(mut self, enabled: bool) -> Self {
        self.enable_deadlock_detection = enabled;
        self
    }

    /// Builder method to toggle the redundancy pass.
    #[must_use]
    pub fn with_redundancy_detection(mut self, enabled: bool) -> Self {
        self.enable_redundancy_detection = enabled;
        self
    }

    /// Builder method to toggle the consistency pass.
    #[must_use]
    pub fn with_consistency_check(mut self, enabled: bool) -> Self {
        self.enable_consistency_check = enabled;
        self
    }

    /// Builder method to set the suggestion confidence threshold.
    #[must_use]
    pub fn with_suggestion_confidence_threshold(mut self, threshold: f64) -> Self {
        self.suggestion_confidence_threshold = threshold;
        self
    }

    /// Builder method to set the expected run time.
    #[must_use]
    pub fn with_max_validation_time(mut self, limit: Duration) -> Self {
        self.max_validation_time = limit;
        self
    }
}
