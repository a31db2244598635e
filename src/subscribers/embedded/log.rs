//! # LogWriter — payload logger
//!
//! A minimal subscriber that logs every payload it receives through `tracing`.
//! Use it for tests or demos.
//!
//! ## Example output
//! ```text
//! INFO ringcast::subscribers::embedded::log: payload processor="LogWriter" item=Added("pod-a")
//! ```

use std::fmt::Debug;

use async_trait::async_trait;

use crate::subscribers::Subscribe;

/// Payload writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl<T> Subscribe<T> for LogWriter
where
    T: Debug + Send + Sync + 'static,
{
    async fn on_event(&self, item: &T) {
        tracing::info!(processor = "LogWriter", ?item, "payload");
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
