//! The validation reporter.
//!
//! Runs the enabled passes over an engine's timeline, attaches fix
//! suggestions to every issue, and assembles a [`ValidationReport`].
//!
//! If any pass returns an error, the reporter throws away what it has and
//! returns the failure report (see [`ValidationReport::did_run`]). The error
//! carries the failing pass's name in its [`ErrorContext`]. Panics are not
//! caught: see [`ValidationPass`].

use std::time::Instant;

use storyline_engine::CausalityEngine;
use storyline_foundation::{ErrorContext, Result};
use storyline_storage::WorldState;
use tracing::{debug, error, info, warn};

use crate::config::ReporterConfig;
use crate::issue::ValidationIssue;
use crate::passes::{
    ConsistencyPass, DeadlockPass, ParadoxPass, PassContext, RedundancyPass, TimelinePass,
    ValidationPass,
};
use crate::report::ValidationReport;
use crate::suggest::suggest_fixes;

/// Produces validation reports for one engine.
///
/// The reporter borrows the engine, so the timeline cannot change while a
/// reporter is alive.
pub struct ValidationReporter<'a> {
    engine: &'a CausalityEngine,
    initial_state: WorldState,
    config: ReporterConfig,
    extra_passes: Vec<Box<dyn ValidationPass + 'a>>,
}

impl<'a> ValidationReporter<'a> {
    /// Creates a reporter with the default configuration.
    #[must_use]
    pub fn new(engine: &'a CausalityEngine, initial_state: WorldState) -> Self {
        Self::with_config(engine, initial_state, ReporterConfig::default())
    }

    /// Creates a reporter with explicit configuration.
    #[must_use]
    pub fn with_config(
        engine: &'a CausalityEngine,
        initial_state: WorldState,
        config: ReporterConfig,
    ) -> Self {
        Self {
            engine,
            initial_state,
            config,
            extra_passes: Vec::new(),
        }
    }

    /// Registers a pass to run after the built-in ones.
    #[must_use]
    pub fn with_pass(mut self, pass: Box<dyn ValidationPass + 'a>) -> Self {
        self.extra_passes.push(pass);
        self
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &ReporterConfig {
        &self.config
    }

    fn passes(&self) -> Vec<&dyn ValidationPass> {
        let toggles: [(bool, &dyn ValidationPass); 5] = [
            (self.config.enable_timeline_validation, &TimelinePass),
            (self.config.enable_paradox_detection, &ParadoxPass),
            (self.config.enable_deadlock_detection, &DeadlockPass),
            (self.config.enable_redundancy_detection, &RedundancyPass),
            (self.config.enable_consistency_check, &ConsistencyPass),
        ];
        let mut passes: Vec<&dyn ValidationPass> = toggles
            .into_iter()
            .filter_map(|(enabled, pass)| enabled.then_some(pass))
            .collect();
        for pass in &self.extra_passes {
            passes.push(&**pass);
        }
        passes
    }

    fn collect_issues(&self) -> Result<Vec<ValidationIssue>> {
        let ctx = PassContext::new(self.engine, &self.initial_state);
        let mut issues = Vec::new();
        for pass in self.passes() {
            let found = pass.run(&ctx).map_err(|err| {
                err.with_context(
                    ErrorContext::new()
                        .with_frame("validation report")
                        .with_frame(pass.name()),
                )
            })?;
            debug!(pass = pass.name(), issues = found.len(), "pass complete");
            issues.extend(found);
        }
        for issue in &mut issues {
            issue.suggestions = suggest_fixes(issue);
        }
        Ok(issues)
    }

    /// Runs every enabled pass and builds the report.
    #[must_use]
    pub fn run(&self) -> ValidationReport {
        let started = Instant::now();
        let outcome = self.collect_issues();
        let elapsed = started.elapsed();

        if elapsed > self.config.max_validation_time {
            warn!(
                elapsed_ms = elapsed.as_millis(),
                limit_ms = self.config.max_validation_time.as_millis(),
                "validation exceeded its time budget"
            );
        }

        match outcome {
            Ok(issues) => {
                let report = ValidationReport::from_issues(
                    issues,
                    self.config.suggestion_confidence_threshold,
                    elapsed,
                );
                info!(
                    acts = self.engine.len(),
                    issues = report.total_issues,
                    suggestions = report.suggestions.len(),
                    elapsed_ms = elapsed.as_millis(),
                    "validation report generated"
                );
                report
            }
            Err(err) => {
                let reason = match &err.context {
                    Some(context) => format!("{err} ({context})"),
                    None => err.to_string(),
                };
                error!(error = %reason, "validation failed");
                ValidationReport::failed(reason, elapsed)
            }
        }
    }

    /// Awaitable form of [`ValidationReporter::run`].
    ///
    /// The work is the same and happens synchronously when polled; the
    /// future never yields.
    pub async fn generate_report(&self) -> ValidationReport {
        self.run()
    }
}
