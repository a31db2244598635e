//! Runtime diagnostics: event types and broadcast bus.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and metadata
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: `Dispatcher` (shutdown), processor pumps (lifecycle, growth,
//!   failure), delivery workers (callback panics).
//! - **Consumers**: anything holding a receiver from `Dispatcher::subscribe_events()`.

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
