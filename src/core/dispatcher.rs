//! # Dispatcher: fans one payload stream out to every registered processor.
//!
//! The [`Dispatcher`] owns an ordered set of processors, the diagnostics [`Bus`]
//! and the shutdown token shared by every processor's pump.
//!
//! ## High-level architecture
//! ```text
//! Setup (before run):
//!   add_processor(sub) ──► Processor { intake tx } + worker { intake rx, subscriber }
//!
//! run(stop):
//!   for each worker ──► spawn pump + delivery
//!   stop.cancelled()
//!       └─► Bus.publish(ShutdownRequested)
//!       └─► shutdown.cancel()   → every pump closes its intake
//!
//! dispatch(item):
//!   Arc::new(item)
//!     ├──► P1.add ──► [intake 1] ──► pump 1 ──► delivery 1 ──► sub1.on_event()
//!     ├──► P2.add ──► [intake 2] ──► pump 2 ──► delivery 2 ──► sub2.on_event()
//!     └──► PN.add ──► [intake N] ──► pump N ──► delivery N ──► subN.on_event()
//!
//! wait_stopped():
//!   join every pump + delivery within cfg.grace
//!       ├─ Ok       → Bus.publish(AllStoppedWithin)
//!       └─ Timeout  → Bus.publish(GraceExceeded), abort stuck tasks
//! ```
//!
//! ## Rules
//! - `dispatch` returns once every processor has **accepted** the item, never after
//!   the callbacks ran.
//! - Per-processor FIFO; no ordering across processors.
//! - Processors are registered before `run` only (`&mut self`); share the dispatcher
//!   through `Arc` afterwards.
//! - After stop, `dispatch` fails with [`DispatchError::UseAfterShutdown`].
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//! use ringcast::{Config, Dispatcher, SubscriberFn};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut dispatcher = Dispatcher::new(Config::default());
//!     let printer = dispatcher.add_processor(SubscriberFn::arc("printer", |n: &u32| {
//!         println!("got {n}");
//!     }))?;
//!
//!     let dispatcher = Arc::new(dispatcher);
//!     let stop = CancellationToken::new();
//!     let runner = tokio::spawn({
//!         let dispatcher = Arc::clone(&dispatcher);
//!         let stop = stop.clone();
//!         async move { dispatcher.run(stop).await }
//!     });
//!
//!     for n in 0..3 {
//!         dispatcher.dispatch(n).await?;
//!     }
//!     stop.cancel();
//!     runner.await??;
//!     dispatcher.wait_stopped().await?;
//!
//!     assert_eq!(printer.delivered(), 3);
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

use tokio::sync::{Mutex, broadcast};
use tokio_util::sync::CancellationToken;

use crate::core::builder::DispatcherBuilder;
use crate::core::config::Config;
use crate::core::processor::{
    Processor, ProcessorHandle, ProcessorTasks, ProcessorWorker, processor,
};
use crate::error::DispatchError;
use crate::events::{Bus, Event, EventKind};
use crate::subscribers::{Subscribe, SubscriberFn};

/// Lifecycle of the processor tasks.
enum State<T> {
    /// Registered, not spawned yet.
    Idle(Vec<ProcessorWorker<T>>),
    /// Spawned; join handles kept for `wait_stopped`.
    Running(Vec<ProcessorTasks>),
    /// Tasks joined (or abandoned after grace).
    Stopped,
}

/// Fan-out coordinator for one payload stream.
pub struct Dispatcher<T> {
    cfg: Config,
    bus: Bus,
    processors: Vec<Processor<T>>,
    handles: Vec<ProcessorHandle>,
    state: Mutex<State<T>>,
    shutdown: CancellationToken,
}

impl<T> Dispatcher<T>
where
    T: Send + Sync + 'static,
{
    /// Creates an empty dispatcher.
    pub fn new(cfg: Config) -> Self {
        let bus = Bus::new(cfg.bus_capacity_clamped());
        Self {
            cfg,
            bus,
            processors: Vec::new(),
            handles: Vec::new(),
            state: Mutex::new(State::Idle(Vec::new())),
            shutdown: CancellationToken::new(),
        }
    }

    /// Returns a builder for registering subscribers up front.
    pub fn builder(cfg: Config) -> DispatcherBuilder<T> {
        DispatcherBuilder::new(cfg)
    }

    /// Registers a subscriber and returns a handle to its processor.
    ///
    /// Fails with [`DispatchError::AlreadyRunning`] once `run` has started.
    pub fn add_processor(
        &mut self,
        subscriber: Arc<dyn Subscribe<T>>,
    ) -> Result<ProcessorHandle, DispatchError> {
        let State::Idle(workers) = self.state.get_mut() else {
            return Err(DispatchError::AlreadyRunning);
        };
        let (front, worker, handle) = processor(subscriber, &self.cfg, self.shutdown.clone());
        workers.push(worker);
        self.processors.push(front);
        self.handles.push(handle.clone());
        Ok(handle)
    }

    /// Registers a plain closure as a subscriber.
    pub fn add_fn<F>(&mut self, name: &'static str, f: F) -> Result<ProcessorHandle, DispatchError>
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.add_processor(SubscriberFn::arc(name, f))
    }

    /// Broadcasts one item to every processor, in registration order.
    ///
    /// Returns after each processor's intake accepted the item. If some processor
    /// has terminated, the item is still offered to the others and the first error
    /// is returned afterwards.
    ///
    /// Items dispatched before `run` wait in the intake until the pumps start;
    /// beyond `intake_capacity` this call waits for `run`.
    pub async fn dispatch(&self, item: T) -> Result<(), DispatchError> {
        self.dispatch_arc(Arc::new(item)).await
    }

    /// Broadcasts a pre-allocated `Arc<T>`.
    pub async fn dispatch_arc(&self, item: Arc<T>) -> Result<(), DispatchError> {
        if self.shutdown.is_cancelled() {
            return Err(DispatchError::UseAfterShutdown);
        }
        let mut first_err = None;
        for p in &self.processors {
            match p.add(Arc::clone(&item)).await {
                Ok(()) => {}
                Err(DispatchError::UseAfterShutdown) => return Err(DispatchError::UseAfterShutdown),
                Err(err) => {
                    tracing::warn!(processor = p.name(), error = %err, "dispatch skipped processor");
                    first_err.get_or_insert(err);
                }
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    /// Blocking variant of [`dispatch`](Self::dispatch) for synchronous producers.
    ///
    /// Must not be called from within an async execution context.
    pub fn dispatch_blocking(&self, item: T) -> Result<(), DispatchError> {
        if self.shutdown.is_cancelled() {
            return Err(DispatchError::UseAfterShutdown);
        }
        let item = Arc::new(item);
        let mut first_err = None;
        for p in &self.processors {
            match p.add_blocking(Arc::clone(&item)) {
                Ok(()) => {}
                Err(DispatchError::UseAfterShutdown) => return Err(DispatchError::UseAfterShutdown),
                Err(err) => {
                    tracing::warn!(processor = p.name(), error = %err, "dispatch skipped processor");
                    first_err.get_or_insert(err);
                }
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    /// Starts every processor, waits for `stop`, then closes all intakes.
    ///
    /// Returns once shutdown has been initiated; use [`wait_stopped`](Self::wait_stopped)
    /// or [`ProcessorHandle::stopped`] to wait for the processors to finish.
    pub async fn run(&self, stop: CancellationToken) -> Result<(), DispatchError> {
        self.start().await?;
        tokio::select! {
            _ = stop.cancelled() => {}
            _ = self.shutdown.cancelled() => {}
        }
        self.close();
        Ok(())
    }

    /// Waits for every pump and delivery task to exit, bounded by [`Config::grace`].
    ///
    /// Call it once `run` has returned. Before that it fails with
    /// [`DispatchError::NotStopped`] and leaves the processors running.
    ///
    /// Returns the first buffer growth failure, if any processor died of one.
    pub async fn wait_stopped(&self) -> Result<(), DispatchError> {
        let mut tasks = {
            let mut state = self.state.lock().await;
            match std::mem::replace(&mut *state, State::Stopped) {
                running @ State::Running(_) if !self.shutdown.is_cancelled() => {
                    *state = running;
                    return Err(DispatchError::NotStopped);
                }
                State::Running(tasks) => tasks,
                State::Stopped => return Ok(()),
                idle @ State::Idle(_) => {
                    *state = idle;
                    return Err(DispatchError::NotStarted);
                }
            }
        };

        let mut failure = None;
        let join_all = async {
            for t in tasks.iter_mut() {
                match (&mut t.pump).await {
                    Ok(Ok(())) => {}
                    Ok(Err(source)) => {
                        failure.get_or_insert(DispatchError::BufferGrowth {
                            processor: t.name,
                            source,
                        });
                    }
                    Err(join_err) => {
                        tracing::warn!(processor = t.name, error = %join_err, "pump task did not complete");
                    }
                }
                if let Err(join_err) = (&mut t.delivery).await {
                    tracing::warn!(processor = t.name, error = %join_err, "delivery task did not complete");
                }
            }
        };

        let joined = match self.cfg.shutdown_grace() {
            Some(grace) => tokio::time::timeout(grace, join_all).await.is_ok(),
            None => {
                join_all.await;
                true
            }
        };

        if joined {
            self.bus.publish(Event::new(EventKind::AllStoppedWithin));
            tracing::debug!(processors = tasks.len(), "all processors stopped");
            return failure.map_or(Ok(()), Err);
        }

        let stuck: Vec<String> = tasks
            .iter()
            .filter(|t| !t.is_finished())
            .map(|t| t.name.to_string())
            .collect();
        for t in &tasks {
            t.abort();
        }
        self.bus.publish(Event::new(EventKind::GraceExceeded));
        tracing::warn!(grace = ?self.cfg.grace, ?stuck, "processors did not stop within grace");
        Err(DispatchError::GraceExceeded {
            grace: self.cfg.grace,
            stuck,
        })
    }

    /// Handles of all registered processors, in registration order.
    pub fn handles(&self) -> &[ProcessorHandle] {
        &self.handles
    }

    /// Number of registered processors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.processors.len()
    }

    /// True if no processor is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }

    /// True once the dispatcher has been stopped.
    pub fn is_shut_down(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    /// Receiver of runtime diagnostics (lifecycle, panics, growth).
    pub fn subscribe_events(&self) -> broadcast::Receiver<Event> {
        self.bus.subscribe()
    }

    /// Effective configuration.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Spawns pump and delivery tasks for every registered processor.
    async fn start(&self) -> Result<(), DispatchError> {
        let mut state = self.state.lock().await;
        let workers = match std::mem::replace(&mut *state, State::Stopped) {
            State::Idle(workers) => workers,
            other => {
                *state = other;
                return Err(DispatchError::AlreadyRunning);
            }
        };
        let tasks: Vec<ProcessorTasks> = workers
            .into_iter()
            .map(|w| w.spawn(self.shutdown.clone(), self.cfg.shutdown, self.bus.clone()))
            .collect();
        tracing::debug!(processors = tasks.len(), "dispatcher started");
        *state = State::Running(tasks);
        Ok(())
    }

    /// Closes every intake (idempotent).
    fn close(&self) {
        if self.shutdown.is_cancelled() {
            return;
        }
        self.bus.publish(Event::new(EventKind::ShutdownRequested));
        tracing::debug!(processors = self.processors.len(), "dispatcher stopping");
        self.shutdown.cancel();
    }
}
