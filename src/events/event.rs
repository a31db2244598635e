//! # Runtime events emitted by the dispatcher and its processors.
//!
//! The [`EventKind`] enum classifies diagnostics in three groups:
//! - **Processor lifecycle**: started, stopped, failed
//! - **Delivery**: callback panics, buffer growth
//! - **Shutdown**: stop requested, all stopped, grace exceeded
//!
//! These are diagnostics *about* the broadcaster; they are unrelated to the
//! payloads being broadcast.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//!
//! ## Example
//! ```rust
//! use ringcast::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::CallbackPanicked)
//!     .with_processor("audit")
//!     .with_reason("boom")
//!     .with_offset(7);
//!
//! assert_eq!(ev.kind, EventKind::CallbackPanicked);
//! assert_eq!(ev.processor.as_deref(), Some("audit"));
//! assert_eq!(ev.offset, Some(7));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of runtime events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Processor lifecycle ===
    /// Pump and delivery tasks were spawned.
    ///
    /// Sets:
    /// - `processor`: processor name
    /// - `capacity`: initial ring capacity
    ProcessorStarted,

    /// Pump task exited and closed the delivery handoff.
    ///
    /// Sets:
    /// - `processor`: processor name
    /// - `reason`: `"drained"`, `"discarded"` or `"failed"`
    ProcessorStopped,

    /// Buffer growth failed; the processor terminates.
    ///
    /// Sets:
    /// - `processor`: processor name
    /// - `reason`: error message
    ProcessorFailed,

    // === Delivery ===
    /// Subscriber callback panicked; delivery continues with the next payload.
    ///
    /// Sets:
    /// - `processor`: processor name
    /// - `offset`: per-processor sequence number of the offending payload
    /// - `reason`: panic message
    CallbackPanicked,

    /// Processor ring doubled its capacity.
    ///
    /// Sets:
    /// - `processor`: processor name
    /// - `capacity`: new capacity
    BufferGrown,

    // === Shutdown ===
    /// Stop signal observed; intakes are being closed.
    ShutdownRequested,

    /// All processor tasks exited within the configured grace period.
    AllStoppedWithin,

    /// Grace period exceeded; some processors did not stop in time.
    GraceExceeded,
}

/// Runtime event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,
    /// Name of the processor, if applicable.
    pub processor: Option<Arc<str>>,
    /// Human-readable reason (panic message, error, stop reason).
    pub reason: Option<Arc<str>>,
    /// Per-processor payload sequence number.
    pub offset: Option<u64>,
    /// Ring capacity.
    pub capacity: Option<usize>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            processor: None,
            reason: None,
            offset: None,
            capacity: None,
        }
    }

    /// Attaches a processor name.
    #[inline]
    pub fn with_processor(mut self, processor: impl Into<Arc<str>>) -> Self {
        self.processor = Some(processor.into());
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attaches a payload sequence number.
    #[inline]
    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Attaches a ring capacity.
    #[inline]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Creates a callback panic event.
    #[inline]
    pub fn callback_panicked(processor: &'static str, offset: u64, info: String) -> Self {
        Event::new(EventKind::CallbackPanicked)
            .with_processor(processor)
            .with_offset(offset)
            .with_reason(info)
    }

    /// Creates a processor stopped event.
    #[inline]
    pub fn processor_stopped(processor: &'static str, reason: &'static str) -> Self {
        Event::new(EventKind::ProcessorStopped)
            .with_processor(processor)
            .with_reason(reason)
    }

    /// True if this event reports a subscriber callback panic.
    #[inline]
    pub fn is_callback_panic(&self) -> bool {
        matches!(self.kind, EventKind::CallbackPanicked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seq_is_monotonic() {
        let a = Event::new(EventKind::ShutdownRequested);
        let b = Event::new(EventKind::ShutdownRequested);
        assert!(b.seq > a.seq);
    }

    #[test]
    fn test_helpers_set_fields() {
        let ev = Event::callback_panicked("metrics", 42, "boom".to_string());
        assert!(ev.is_callback_panic());
        assert_eq!(ev.processor.as_deref(), Some("metrics"));
        assert_eq!(ev.offset, Some(42));
        assert_eq!(ev.reason.as_deref(), Some("boom"));

        let ev = Event::processor_stopped("metrics", "drained");
        assert_eq!(ev.kind, EventKind::ProcessorStopped);
        assert_eq!(ev.reason.as_deref(), Some("drained"));
    }
}
