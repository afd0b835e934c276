//! Escalation observation and logging
//!
//! This module provides the `ReauthObserver` trait for monitoring each step
//! of an invocation and a `TracingObserver` implementation that logs using
//! the `tracing` crate. The executor itself logs nothing unless an observer
//! is installed.

use std::fmt::Display;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use super::ladder::{Escalation, Rung, Stage, MAX_ATTEMPTS};
use crate::types::ReauthConfig;

/// Observer trait for escalation events
///
/// # Example
///
/// ```rust
/// use retriable_core::retry::{Escalation, ReauthObserver, Rung, Stage};
/// use std::fmt::Display;
/// use std::time::Duration;
///
/// struct MetricsObserver;
///
/// impl ReauthObserver for MetricsObserver {
///     fn on_attempt_start(&self, attempt: u32, rung: Rung) {}
///
///     fn on_escalation(&self, attempt: u32, escalation: Escalation, error: &dyn Display) {
///         // Count renewals and forced re-logins
///     }
///
///     fn on_success(&self, attempt: u32, total_duration: Duration) {}
///
///     fn on_failed(&self, stage: Stage, error: &dyn Display) {}
/// }
/// ```
pub trait ReauthObserver: Send + Sync {
    /// Called before each workflow execution
    ///
    /// # Arguments
    ///
    /// * `attempt` - The execution number (1-indexed)
    /// * `rung` - The ladder rung the execution runs on
    fn on_attempt_start(&self, attempt: u32, rung: Rung);

    /// Called when an authorization failure moves the invocation down the ladder
    ///
    /// `attempt` is the number of workflow executions so far.
    fn on_escalation(&self, attempt: u32, escalation: Escalation, error: &dyn Display);

    /// Called when the workflow succeeds
    fn on_success(&self, attempt: u32, total_duration: Duration);

    /// Called when the invocation settles with a failure from `stage`
    fn on_failed(&self, stage: Stage, error: &dyn Display);

    /// Called when the pre-flight prompt or the notification hook vetoes
    fn on_cancelled(&self, stage: Stage, error: &dyn Display) {
        let _ = (stage, error);
    }
}

/// A no-op observer
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpObserver;

impl ReauthObserver for NoOpObserver {
    fn on_attempt_start(&self, _attempt: u32, _rung: Rung) {}

    fn on_escalation(&self, _attempt: u32, _escalation: Escalation, _error: &dyn Display) {}

    fn on_success(&self, _attempt: u32, _total_duration: Duration) {}

    fn on_failed(&self, _stage: Stage, _error: &dyn Display) {}
}

/// An observer that logs escalation events using the `tracing` crate
///
/// # Log Levels
///
/// - `on_attempt_start`: DEBUG
/// - `on_escalation`: WARN
/// - `on_success`: INFO (after an escalation) or DEBUG (first attempt)
/// - `on_failed`: ERROR
/// - `on_cancelled`: WARN
#[derive(Debug, Clone)]
pub struct TracingObserver {
    /// Name of the wrapped operation (for log context)
    operation: String,
}

impl TracingObserver {
    /// Create a new tracing observer
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
        }
    }

    /// Create an observer named after `config.operation`
    pub fn from_config(config: &ReauthConfig) -> Self {
        Self::new(config.operation.clone())
    }

    /// Get the operation name
    pub fn operation(&self) -> &str {
        &self.operation
    }
}

impl Default for TracingObserver {
    fn default() -> Self {
        Self::new("workflow")
    }
}

impl ReauthObserver for TracingObserver {
    fn on_attempt_start(&self, attempt: u32, rung: Rung) {
        tracing::debug!(
            operation = %self.operation,
            attempt = attempt,
            max_attempts = MAX_ATTEMPTS,
            rung = %rung,
            "starting attempt"
        );
    }

    fn on_escalation(&self, attempt: u32, escalation: Escalation, error: &dyn Display) {
        tracing::warn!(
            operation = %self.operation,
            attempt = attempt,
            escalation = %escalation,
            error = %error,
            "authorization failure, escalating"
        );
    }

    fn on_success(&self, attempt: u32, total_duration: Duration) {
        if attempt > 1 {
            tracing::info!(
                operation = %self.operation,
                attempt = attempt,
                total_duration_ms = total_duration.as_millis() as u64,
                "succeeded after re-authentication"
            );
        } else {
            tracing::debug!(
                operation = %self.operation,
                duration_ms = total_duration.as_millis() as u64,
                "succeeded on first attempt"
            );
        }
    }

    fn on_failed(&self, stage: Stage, error: &dyn Display) {
        tracing::error!(
            operation = %self.operation,
            stage = %stage,
            error = %error,
            "invocation failed"
        );
    }

    fn on_cancelled(&self, stage: Stage, error: &dyn Display) {
        tracing::warn!(
            operation = %self.operation,
            stage = %stage,
            error = %error,
            "re-authentication declined"
        );
    }
}

/// An observer that counts events
///
/// Useful for testing and metrics collection.
#[derive(Debug, Default)]
pub struct StatsObserver {
    /// Workflow executions started
    pub attempt_starts: AtomicU32,
    /// Silent renewals triggered
    pub renewals: AtomicU32,
    /// Full re-authentications triggered
    pub reauthentications: AtomicU32,
    /// Successful settlements
    pub successes: AtomicU32,
    /// Failed settlements
    pub failures: AtomicU32,
    /// Vetoes from the pre-flight prompt or notification hook
    pub cancellations: AtomicU32,
}

impl StatsObserver {
    /// Create a new stats observer
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attempt_starts(&self) -> u32 {
        self.attempt_starts.load(Ordering::SeqCst)
    }

    pub fn renewals(&self) -> u32 {
        self.renewals.load(Ordering::SeqCst)
    }

    pub fn reauthentications(&self) -> u32 {
        self.reauthentications.load(Ordering::SeqCst)
    }

    pub fn successes(&self) -> u32 {
        self.successes.load(Ordering::SeqCst)
    }

    pub fn failures(&self) -> u32 {
        self.failures.load(Ordering::SeqCst)
    }

    pub fn cancellations(&self) -> u32 {
        self.cancellations.load(Ordering::SeqCst)
    }

    /// Total settlements, successful or not
    pub fn settlements(&self) -> u32 {
        self.successes() + self.failures() + self.cancellations()
    }
}

impl ReauthObserver for StatsObserver {
    fn on_attempt_start(&self, _attempt: u32, _rung: Rung) {
        self.attempt_starts.fetch_add(1, Ordering::SeqCst);
    }

    fn on_escalation(&self, _attempt: u32, escalation: Escalation, _error: &dyn Display) {
        match escalation {
            Escalation::Renew => self.renewals.fetch_add(1, Ordering::SeqCst),
            Escalation::Reauthenticate => self.reauthentications.fetch_add(1, Ordering::SeqCst),
        };
    }

    fn on_success(&self, _attempt: u32, _total_duration: Duration) {
        self.successes.fetch_add(1, Ordering::SeqCst);
    }

    fn on_failed(&self, _stage: Stage, _error: &dyn Display) {
        self.failures.fetch_add(1, Ordering::SeqCst);
    }

    fn on_cancelled(&self, _stage: Stage, _error: &dyn Display) {
        self.cancellations.fetch_add(1, Ordering::SeqCst);
    }
}

impl<T: ReauthObserver + ?Sized> ReauthObserver for std::sync::Arc<T> {
    fn on_attempt_start(&self, attempt: u32, rung: Rung) {
        (**self).on_attempt_start(attempt, rung)
    }

    fn on_escalation(&self, attempt: u32, escalation: Escalation, error: &dyn Display) {
        (**self).on_escalation(attempt, escalation, error)
    }

    fn on_success(&self, attempt: u32, total_duration: Duration) {
        (**self).on_success(attempt, total_duration)
    }

    fn on_failed(&self, stage: Stage, error: &dyn Display) {
        (**self).on_failed(stage, error)
    }

    fn on_cancelled(&self, stage: Stage, error: &dyn Display) {
        (**self).on_cancelled(stage, error)
    }
}

impl<T: ReauthObserver + ?Sized> ReauthObserver for Box<T> {
    fn on_attempt_start(&self, attempt: u32, rung: Rung) {
        (**self).on_attempt_start(attempt, rung)
    }

    fn on_escalation(&self, attempt: u32, escalation: Escalation, error: &dyn Display) {
        (**self).on_escalation(attempt, escalation, error)
    }

    fn on_success(&self, attempt: u32, total_duration: Duration) {
        (**self).on_success(attempt, total_duration)
    }

    fn on_failed(&self, stage: Stage, error: &dyn Display) {
        (**self).on_failed(stage, error)
    }

    fn on_cancelled(&self, stage: Stage, error: &dyn Display) {
        (**self).on_cancelled(stage, error)
    }
}
