//! Error types used by the ringcast runtime.
//!
//! This module defines two error enums:
//!
//! - [`RingError`] — failures of the per-processor growing buffer.
//! - [`DispatchError`] — errors raised by the dispatcher and its processors.
//!
//! Both types provide helper methods (`as_label`, `as_message`) for logging/metrics.

use std::time::Duration;
use thiserror::Error;

/// # Errors produced by [`GrowingRing`](crate::GrowingRing).
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RingError {
    /// The slot array could not be doubled (allocation failure or capacity overflow).
    #[error("failed to grow ring buffer to {requested} slots")]
    Grow {
        /// The capacity that was requested.
        requested: usize,
    },
}

impl RingError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use ringcast::RingError;
    ///
    /// let err = RingError::Grow { requested: 2048 };
    /// assert_eq!(err.as_label(), "ring_grow_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RingError::Grow { .. } => "ring_grow_failed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            RingError::Grow { requested } => format!("grow failed: requested={requested}"),
        }
    }
}

/// # Errors produced by the dispatcher.
///
/// Buffer failures are fatal to a single processor; contract violations
/// (`UseAfterShutdown`, `AlreadyRunning`, `NotStarted`, `NotStopped`) are never retried.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum DispatchError {
    /// A payload was dispatched after the dispatcher was stopped.
    #[error("dispatch after shutdown")]
    UseAfterShutdown,

    /// The processor's intake is closed because the processor terminated on its own.
    #[error("processor '{processor}' is closed")]
    ProcessorClosed {
        /// Name of the closed processor.
        processor: &'static str,
    },

    /// A processor's buffer could not grow; the processor has terminated.
    #[error("processor '{processor}' failed: {source}")]
    BufferGrowth {
        /// Name of the failed processor.
        processor: &'static str,
        /// The underlying buffer error.
        #[source]
        source: RingError,
    },

    /// `run` was called more than once.
    #[error("dispatcher is already running")]
    AlreadyRunning,

    /// `wait_stopped` was called before `run`.
    #[error("dispatcher was never started")]
    NotStarted,

    /// `wait_stopped` was called while the dispatcher was still running.
    #[error("dispatcher has not been stopped")]
    NotStopped,

    /// Processors did not terminate within the configured grace period.
    #[error("shutdown timeout {grace:?} exceeded; stuck: {stuck:?}")]
    GraceExceeded {
        /// The configured grace duration.
        grace: Duration,
        /// Names of processors whose tasks were still running.
        stuck: Vec<String>,
    },
}

impl DispatchError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use ringcast::DispatchError;
    ///
    /// assert_eq!(DispatchError::UseAfterShutdown.as_label(), "dispatch_after_shutdown");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            DispatchError::UseAfterShutdown => "dispatch_after_shutdown",
            DispatchError::ProcessorClosed { .. } => "processor_closed",
            DispatchError::BufferGrowth { .. } => "processor_buffer_growth",
            DispatchError::AlreadyRunning => "dispatcher_already_running",
            DispatchError::NotStarted => "dispatcher_not_started",
            DispatchError::NotStopped => "dispatcher_not_stopped",
            DispatchError::GraceExceeded { .. } => "dispatcher_grace_exceeded",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            DispatchError::UseAfterShutdown => "dispatch after shutdown".to_string(),
            DispatchError::ProcessorClosed { processor } => {
                format!("closed: processor={processor}")
            }
            DispatchError::BufferGrowth { processor, source } => {
                format!("processor={processor} {}", source.as_message())
            }
            DispatchError::AlreadyRunning => "already running".to_string(),
            DispatchError::NotStarted => "not started".to_string(),
            DispatchError::NotStopped => "not stopped".to_string(),
            DispatchError::GraceExceeded { grace, stuck } => {
                format!("grace exceeded after {grace:?}; stuck processors={stuck:?}")
            }
        }
    }

    /// True for errors caused by misuse of the dispatcher API rather than a runtime failure.
    ///
    /// # Example
    /// ```
    /// use ringcast::DispatchError;
    ///
    /// assert!(DispatchError::UseAfterShutdown.is_contract_violation());
    /// assert!(!DispatchError::ProcessorClosed { processor: "audit" }.is_contract_violation());
    /// ```
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            DispatchError::UseAfterShutdown
                | DispatchError::AlreadyRunning
                | DispatchError::NotStarted
                | DispatchError::NotStopped
        )
    }
}
