//! # Payload subscribers.
//!
//! This module provides the [`Subscribe`] trait, the closure adapter
//! [`SubscriberFn`], and (behind the `logging` feature) the built-in [`LogWriter`].
//!
//! ## Architecture
//! ```text
//! Dispatcher::dispatch(item) ──► every Processor
//!                                   │
//!                                   └──► Subscribe::on_event(&item)
//!                                            │
//!                                   ┌────────┴────────┬───────────┐
//!                                   ▼                 ▼           ▼
//!                               LogWriter       SubscriberFn    Custom
//! ```

#[cfg(feature = "logging")]
mod embedded;
mod subscriber;
mod subscriber_fn;

#[cfg(feature = "logging")]
pub use embedded::LogWriter;
pub use subscriber::Subscribe;
pub use subscriber_fn::SubscriberFn;
