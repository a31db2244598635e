//! # Subscriber trait.
//!
//! Provides [`Subscribe`] the extension point for plugging payload handlers into a
//! [`Dispatcher`](crate::Dispatcher).
//!
//! Each subscriber gets:
//! - **Dedicated processor** (pump task + delivery task)
//! - **Unbounded growing buffer** (initial size via [`Subscribe::initial_capacity`])
//! - **Panic isolation** (panics are caught and reported as `EventKind::CallbackPanicked`)
//!
//! ## Architecture
//! ```text
//! Dispatcher ──► [intake] ──► pump ──► [ring] ──► delivery ──► subscriber.on_event()
//!                                                          └─► panic caught → CallbackPanicked
//! ```
//!
//! ## Rules
//! - A slow subscriber only grows its own buffer; nothing is dropped.
//! - Payloads are processed sequentially (FIFO) per subscriber.
//! - Subscribers do not block the dispatcher or each other.
//!
//! ## Example
//! ```rust
//! use async_trait::async_trait;
//! use ringcast::Subscribe;
//!
//! struct Audit;
//!
//! #[async_trait]
//! impl Subscribe<String> for Audit {
//!     async fn on_event(&self, item: &String) {
//!         let _ = item.len();
//!     }
//!
//!     fn name(&self) -> &'static str { "audit" }
//!     fn initial_capacity(&self) -> Option<usize> { Some(64) }
//! }
//! ```

use async_trait::async_trait;

/// Payload subscriber.
///
/// ### Implementation requirements
/// - Use async I/O; avoid blocking the executor.
/// - Handle errors internally; do not panic.
/// - Slow processing affects only this subscriber's backlog.
#[async_trait]
pub trait Subscribe<T>: Send + Sync + 'static {
    /// Processes a single payload.
    ///
    /// Called from the processor's delivery task, never in the dispatcher's context.
    /// The next payload is not delivered until this future completes.
    async fn on_event(&self, item: &T);

    /// Returns the subscriber name used in logs and diagnostics events.
    ///
    /// The default uses `type_name::<Self>()`, which can be verbose - override it when possible.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Initial ring capacity for this subscriber.
    ///
    /// `None` falls back to [`Config::initial_capacity`](crate::Config::initial_capacity).
    fn initial_capacity(&self) -> Option<usize> {
        None
    }
}
