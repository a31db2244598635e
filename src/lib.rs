//! # ringcast
//!
//! **ringcast** is an in-process fan-out broadcaster for Rust.
//!
//! A single stream of payloads is delivered, in order, to any number of
//! independently paced subscribers. A slow subscriber never blocks a fast one,
//! and nothing is dropped when a subscriber falls behind: each one gets its own
//! unbounded, auto-growing ring buffer.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!                      event source
//!                           │ dispatch(item)   (once per item, in order)
//!                           ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Dispatcher                                                       │
//! │  - Processors (registration order)                                │
//! │  - Bus (runtime diagnostics)                                      │
//! │  - shutdown token (closes every intake)                           │
//! └──────┬──────────────────┬──────────────────┬──────────────────────┘
//!        ▼                  ▼                  ▼
//!   [intake 1]         [intake 2]         [intake N]      bounded, accepted fast
//!        ▼                  ▼                  ▼
//!   ┌─────────┐        ┌─────────┐        ┌─────────┐
//!   │ pump 1  │        │ pump 2  │        │ pump N  │     pending slot + GrowingRing
//!   └────┬────┘        └────┬────┘        └────┬────┘
//!        ▼ (1-slot handoff) ▼                  ▼
//!   delivery 1         delivery 2         delivery N      catch_unwind per call
//!        ▼                  ▼                  ▼
//!   sub1.on_event      sub2.on_event      subN.on_event
//! ```
//!
//! ### Lifecycle
//! ```text
//! Dispatcher::new / builder ──► add_processor(sub)...  (before run)
//!
//! run(stop):
//!   ├─► spawn pump + delivery per processor
//!   ├─► wait stop.cancelled()
//!   └─► publish ShutdownRequested, close all intakes, return
//!
//! pump on closed intake:
//!   ├─ ShutdownMode::Drain   ─► deliver everything accepted, close handoff
//!   └─ ShutdownMode::Discard ─► close handoff now, count dropped backlog
//!
//! wait_stopped():
//!   join all tasks within Config::grace ─► AllStoppedWithin | GraceExceeded
//! ```
//!
//! ## Features
//! | Area              | Description                                                | Key types / traits                         |
//! |-------------------|------------------------------------------------------------|--------------------------------------------|
//! | **Fan-out**       | Broadcast one stream to many ordered subscribers.          | [`Dispatcher`], [`ProcessorHandle`]        |
//! | **Subscribers**   | Async trait or plain closure callbacks.                    | [`Subscribe`], [`SubscriberFn`]            |
//! | **Buffering**     | Unbounded doubling ring per subscriber.                    | [`GrowingRing`]                            |
//! | **Diagnostics**   | Lifecycle, growth and panic events on a broadcast bus.     | [`Event`], [`EventKind`]                   |
//! | **Errors**        | Typed errors for buffers and dispatch.                     | [`RingError`], [`DispatchError`]           |
//! | **Configuration** | Capacities, shutdown mode and grace.                       | [`Config`], [`ShutdownMode`]               |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use tokio_util::sync::CancellationToken;
//! use ringcast::{Config, Dispatcher};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let seen = Arc::new(Mutex::new(Vec::new()));
//!
//!     let mut dispatcher = Dispatcher::new(Config::default());
//!     let s = Arc::clone(&seen);
//!     dispatcher.add_fn("collector", move |item: &String| {
//!         s.lock().unwrap().push(item.clone());
//!     })?;
//!     let dispatcher = Arc::new(dispatcher);
//!
//!     let stop = CancellationToken::new();
//!     let runner = tokio::spawn({
//!         let dispatcher = Arc::clone(&dispatcher);
//!         let stop = stop.clone();
//!         async move { dispatcher.run(stop).await }
//!     });
//!
//!     for name in ["a", "b", "c"] {
//!         dispatcher.dispatch(name.to_string()).await?;
//!     }
//!
//!     stop.cancel();
//!     runner.await??;
//!     dispatcher.wait_stopped().await?;
//!
//!     assert_eq!(*seen.lock().unwrap(), vec!["a", "b", "c"]);
//!     Ok(())
//! }
//! ```
mod core;
mod error;
mod events;
mod subscribers;

// ---- Public re-exports ----

pub use crate::core::{
    Config, Dispatcher, DispatcherBuilder, GrowingRing, ProcessorHandle, ShutdownMode,
};
pub use error::{DispatchError, RingError};
pub use events::{Event, EventKind};
pub use subscribers::{Subscribe, SubscriberFn};

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
