//! Runtime core: buffer, processors and the dispatcher.
//!
//! The public API from this module is [`Dispatcher`] (with its builder),
//! [`ProcessorHandle`], [`GrowingRing`] and the configuration types.
//!
//! Internal modules:
//! - [`ring`]: doubling circular FIFO owned by one pump;
//! - [`processor`]: pump + delivery tasks for one subscriber;
//! - [`dispatcher`]: fan-out, lifecycle and shutdown;
//! - [`builder`]: up-front subscriber registration;
//! - [`config`]: runtime settings.

mod builder;
mod config;
mod dispatcher;
mod processor;
mod ring;

pub use builder::DispatcherBuilder;
pub use config::{Config, ShutdownMode};
pub use dispatcher::Dispatcher;
pub use processor::ProcessorHandle;
pub use ring::GrowingRing;
