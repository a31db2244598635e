//! # Built-in subscribers
//!
//! Small, self-contained implementations useful for demos.
//!
//! - [`LogWriter`]: logs every payload through `tracing` (demo/debug).

mod log;

pub use log::LogWriter;
