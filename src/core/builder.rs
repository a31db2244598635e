use std::sync::Arc;

use crate::{
    core::{Config, Dispatcher, ProcessorHandle},
    error::DispatchError,
    subscribers::Subscribe,
};

/// Builder for constructing a Dispatcher with its subscribers registered up front.
pub struct DispatcherBuilder<T> {
    cfg: Config,
    subscribers: Vec<Arc<dyn Subscribe<T>>>,
}

impl<T> DispatcherBuilder<T>
where
    T: Send + Sync + 'static,
{
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            subscribers: Vec::new(),
        }
    }

    /// Appends one subscriber; registration order is dispatch order.
    pub fn with_subscriber(mut self, subscriber: Arc<dyn Subscribe<T>>) -> Self {
        self.subscribers.push(subscriber);
        self
    }

    /// Appends subscribers in the given order.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe<T>>>) -> Self {
        self.subscribers.extend(subscribers);
        self
    }

    /// Builds the dispatcher and returns it together with one handle per subscriber.
    ///
    /// Nothing is spawned until [`Dispatcher::run`].
    pub fn build(self) -> Result<(Dispatcher<T>, Vec<ProcessorHandle>), DispatchError> {
        let mut dispatcher = Dispatcher::new(self.cfg);
        let handles = self
            .subscribers
            .into_iter()
            .map(|sub| dispatcher.add_processor(sub))
            .collect::<Result<Vec<_>, _>>()?;
        Ok((dispatcher, handles))
    }
}
