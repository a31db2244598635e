//! # Processor: one independent subscriber pipeline.
//!
//! A processor turns a bounded intake channel into an unbounded, ordered stream
//! for a single subscriber. Two tasks cooperate:
//!
//! ```text
//!                        ┌──────────────── pump task ────────────────┐
//! add(item) ──► [intake] ─► recv ─┬─ pending empty ─► pending = item   │
//!   (bounded)                     └─ pending full  ─► ring.push(item)  │
//!                                                                     │
//!                         pending ──reserve/send──► [handoff: 1 slot] ─┼─► delivery task
//!                         pending = ring.pop()                        │      │
//!                        └────────────────────────────────────────────┘      ▼
//!                                                                  subscriber.on_event(&item)
//!                                                                  (panic → CallbackPanicked)
//! ```
//!
//! ## Pump step
//! Each iteration waits on whichever is ready first:
//! 1. *offer*: only while `pending` holds a value; once the handoff slot frees up the
//!    value moves to the delivery task and `pending` is refilled from the ring.
//! 2. *accept*: a new item from intake becomes `pending`, or goes to the ring tail if
//!    `pending` is occupied.
//! 3. *stop*: the dispatcher closed; intake stops accepting new items.
//!
//! Accepting never waits on the subscriber: a slow callback grows the ring, it never
//! stalls `add`.
//!
//! ## Shutdown
//! - [`ShutdownMode::Drain`]: everything accepted before the intake closed is delivered,
//!   then the handoff is closed and the delivery task exits.
//! - [`ShutdownMode::Discard`]: the handoff is closed at once; the item already handed
//!   over finishes, the rest is dropped and counted in [`ProcessorHandle::discarded`].
//!
//! ## Failure
//! A ring growth failure ends the processor: intake and handoff close, the pump
//! returns the [`RingError`] and the dispatcher reports it from `wait_stopped`.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use futures::FutureExt;
use tokio::{sync::mpsc, task::JoinHandle};
use tokio_util::sync::{CancellationToken, DropGuard};

use crate::core::config::{Config, ShutdownMode};
use crate::core::ring::GrowingRing;
use crate::error::{DispatchError, RingError};
use crate::events::{Bus, Event, EventKind};
use crate::subscribers::Subscribe;

/// Counters shared between a running processor and its handles.
#[derive(Debug, Default)]
struct ProcessorStats {
    accepted: AtomicU64,
    delivered: AtomicU64,
    panicked: AtomicU64,
    discarded: AtomicU64,
    backlog: AtomicUsize,
    capacity: AtomicUsize,
}

/// Read-only view of one registered processor.
///
/// Returned by [`Dispatcher::add_processor`](crate::Dispatcher::add_processor).
/// Cloning is cheap; all clones observe the same processor.
#[derive(Clone, Debug)]
pub struct ProcessorHandle {
    name: &'static str,
    stats: Arc<ProcessorStats>,
    done: CancellationToken,
}

impl ProcessorHandle {
    /// Subscriber name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Items accepted into intake.
    pub fn accepted(&self) -> u64 {
        self.stats.accepted.load(Ordering::Acquire)
    }

    /// Items whose callback returned normally.
    pub fn delivered(&self) -> u64 {
        self.stats.delivered.load(Ordering::Acquire)
    }

    /// Items whose callback panicked.
    pub fn panicked(&self) -> u64 {
        self.stats.panicked.load(Ordering::Acquire)
    }

    /// Items dropped by [`ShutdownMode::Discard`] or by a processor failure.
    pub fn discarded(&self) -> u64 {
        self.stats.discarded.load(Ordering::Acquire)
    }

    /// Items held by the pump (pending slot plus ring) at its last step.
    pub fn backlog(&self) -> usize {
        self.stats.backlog.load(Ordering::Acquire)
    }

    /// Ring capacity at the pump's last step.
    pub fn capacity(&self) -> usize {
        self.stats.capacity.load(Ordering::Acquire)
    }

    /// True once the delivery task has exited; the pump closes the handoff before that.
    pub fn is_stopped(&self) -> bool {
        self.done.is_cancelled()
    }

    /// Waits until the delivery task has exited.
    pub async fn stopped(&self) {
        self.done.cancelled().await
    }
}

/// Dispatcher-side half of a processor: the intake sender.
pub(crate) struct Processor<T> {
    name: &'static str,
    intake: mpsc::Sender<Arc<T>>,
    shutdown: CancellationToken,
    stats: Arc<ProcessorStats>,
}

/// Task-side half of a processor, consumed when the dispatcher starts.
///
/// Dropping a worker that was never spawned marks its handle stopped.
pub(crate) struct ProcessorWorker<T> {
    name: &'static str,
    intake: mpsc::Receiver<Arc<T>>,
    subscriber: Arc<dyn Subscribe<T>>,
    initial_capacity: usize,
    ring_limit: Option<usize>,
    stats: Arc<ProcessorStats>,
    done: DropGuard,
}

/// Join handles of a started processor.
pub(crate) struct ProcessorTasks {
    pub(crate) name: &'static str,
    pub(crate) pump: JoinHandle<Result<(), RingError>>,
    pub(crate) delivery: JoinHandle<()>,
}

impl ProcessorTasks {
    pub(crate) fn is_finished(&self) -> bool {
        self.pump.is_finished() && self.delivery.is_finished()
    }

    pub(crate) fn abort(&self) {
        self.pump.abort();
        self.delivery.abort();
    }
}

/// Builds both halves of a processor plus its handle.
pub(crate) fn processor<T>(
    subscriber: Arc<dyn Subscribe<T>>,
    cfg: &Config,
    shutdown: CancellationToken,
) -> (Processor<T>, ProcessorWorker<T>, ProcessorHandle)
where
    T: Send + Sync + 'static,
{
    let name = subscriber.name();
    let initial_capacity = subscriber
        .initial_capacity()
        .unwrap_or(cfg.initial_capacity);
    let (tx, rx) = mpsc::channel::<Arc<T>>(cfg.intake_capacity_clamped());
    let stats = Arc::new(ProcessorStats::default());
    stats.capacity.store(initial_capacity, Ordering::Release);
    let done = CancellationToken::new();

    let handle = ProcessorHandle {
        name,
        stats: Arc::clone(&stats),
        done: done.clone(),
    };
    let front = Processor {
        name,
        intake: tx,
        shutdown,
        stats: Arc::clone(&stats),
    };
    let worker = ProcessorWorker {
        name,
        intake: rx,
        subscriber,
        initial_capacity,
        ring_limit: None,
        stats,
        done: done.drop_guard(),
    };
    (front, worker, handle)
}

impl<T> Processor<T> {
    pub(crate) fn name(&self) -> &'static str {
        self.name
    }

    /// Accepts one item into intake.
    ///
    /// Waits only while the intake channel is full, i.e. until the pump's next step.
    pub(crate) async fn add(&self, item: Arc<T>) -> Result<(), DispatchError> {
        if self.shutdown.is_cancelled() {
            return Err(DispatchError::UseAfterShutdown);
        }
        match self.intake.send(item).await {
            Ok(()) => {
                self.stats.accepted.fetch_add(1, Ordering::AcqRel);
                Ok(())
            }
            Err(_) => Err(self.closed_error()),
        }
    }

    /// Blocking variant of [`add`](Self::add) for synchronous producers.
    ///
    /// Panics if called from within an async execution context (tokio restriction).
    pub(crate) fn add_blocking(&self, item: Arc<T>) -> Result<(), DispatchError> {
        if self.shutdown.is_cancelled() {
            return Err(DispatchError::UseAfterShutdown);
        }
        match self.intake.blocking_send(item) {
            Ok(()) => {
                self.stats.accepted.fetch_add(1, Ordering::AcqRel);
                Ok(())
            }
            Err(_) => Err(self.closed_error()),
        }
    }

    fn closed_error(&self) -> DispatchError {
        if self.shutdown.is_cancelled() {
            DispatchError::UseAfterShutdown
        } else {
            DispatchError::ProcessorClosed {
                processor: self.name,
            }
        }
    }
}

/// Why the pump loop ended.
enum PumpExit {
    /// Intake closed and fully received.
    IntakeDrained,
    /// Stop observed in discard mode.
    Discard,
    /// Delivery task is gone.
    HandoffClosed,
}

impl<T> ProcessorWorker<T>
where
    T: Send + Sync + 'static,
{
    /// Caps the ring so that growth past `max_capacity` fails the processor.
    #[cfg(test)]
    pub(crate) fn with_ring_limit(mut self, max_capacity: usize) -> Self {
        self.ring_limit = Some(max_capacity);
        self
    }

    /// Spawns the pump and delivery tasks.
    pub(crate) fn spawn(
        self,
        shutdown: CancellationToken,
        mode: ShutdownMode,
        bus: Bus,
    ) -> ProcessorTasks {
        let (handoff_tx, handoff_rx) = mpsc::channel::<Arc<T>>(1);
        let name = self.name;
        let done = self.done.disarm();
        let ring = match self.ring_limit {
            Some(max) => GrowingRing::with_limit(self.initial_capacity, max),
            None => GrowingRing::with_capacity(self.initial_capacity),
        };

        bus.publish(
            Event::new(EventKind::ProcessorStarted)
                .with_processor(name)
                .with_capacity(self.initial_capacity),
        );
        tracing::debug!(processor = name, capacity = self.initial_capacity, "processor started");

        let delivery = tokio::spawn(deliver(
            name,
            Arc::clone(&self.subscriber),
            handoff_rx,
            Arc::clone(&self.stats),
            bus.clone(),
            done,
        ));

        let pump = tokio::spawn(pump(
            name,
            self.intake,
            handoff_tx,
            ring,
            self.stats,
            shutdown,
            mode,
            bus,
        ));

        ProcessorTasks {
            name,
            pump,
            delivery,
        }
    }
}

/// Owns the ring; moves items from intake to the handoff without waiting on the callback.
#[allow(clippy::too_many_arguments)]
async fn pump<T>(
    name: &'static str,
    mut intake: mpsc::Receiver<Arc<T>>,
    handoff: mpsc::Sender<Arc<T>>,
    mut ring: GrowingRing<Arc<T>>,
    stats: Arc<ProcessorStats>,
    shutdown: CancellationToken,
    mode: ShutdownMode,
    bus: Bus,
) -> Result<(), RingError>
where
    T: Send + Sync + 'static,
{
    let mut pending: Option<Arc<T>> = None;
    let mut closing = false;

    let exit = loop {
        tokio::select! {
            permit = handoff.reserve(), if pending.is_some() => match permit {
                Ok(permit) => {
                    if let Some(item) = pending.take() {
                        permit.send(item);
                    }
                    pending = ring.pop();
                }
                Err(_) => break PumpExit::HandoffClosed,
            },
            msg = intake.recv() => match msg {
                Some(item) if pending.is_none() => pending = Some(item),
                Some(item) => {
                    let before = ring.capacity();
                    if let Err(err) = ring.push(item) {
                        intake.close();
                        // The rejected item is lost along with the backlog.
                        let lost = 1
                            + usize::from(pending.take().is_some())
                            + ring.len()
                            + drain_intake(&mut intake);
                        stats.discarded.fetch_add(lost as u64, Ordering::AcqRel);
                        stats.backlog.store(0, Ordering::Release);
                        tracing::error!(processor = name, error = %err, lost, "processor buffer growth failed");
                        bus.publish(
                            Event::new(EventKind::ProcessorFailed)
                                .with_processor(name)
                                .with_reason(err.as_message()),
                        );
                        bus.publish(Event::processor_stopped(name, "failed"));
                        return Err(err);
                    }
                    if ring.capacity() != before {
                        stats.capacity.store(ring.capacity(), Ordering::Release);
                        tracing::debug!(processor = name, capacity = ring.capacity(), "processor buffer grew");
                        bus.publish(
                            Event::new(EventKind::BufferGrown)
                                .with_processor(name)
                                .with_capacity(ring.capacity()),
                        );
                    }
                }
                None => break PumpExit::IntakeDrained,
            },
            _ = shutdown.cancelled(), if !closing => {
                closing = true;
                intake.close();
                if mode == ShutdownMode::Discard {
                    break PumpExit::Discard;
                }
            }
        }
        stats
            .backlog
            .store(ring.len() + usize::from(pending.is_some()), Ordering::Release);
    };

    let reason = match exit {
        PumpExit::IntakeDrained if mode == ShutdownMode::Drain => {
            // Intake is exhausted; hand over what is left in order.
            while let Some(item) = pending.take().or_else(|| ring.pop()) {
                if let Err(mpsc::error::SendError(item)) = handoff.send(item).await {
                    pending = Some(item);
                    break;
                }
                stats.backlog.store(ring.len(), Ordering::Release);
            }
            "drained"
        }
        _ => "discarded",
    };

    let lost = usize::from(pending.take().is_some()) + ring.len() + drain_intake(&mut intake);
    if lost > 0 {
        stats.discarded.fetch_add(lost as u64, Ordering::AcqRel);
        tracing::warn!(processor = name, lost, "processor stopped with undelivered items");
    }
    stats.backlog.store(0, Ordering::Release);

    drop(handoff);
    tracing::debug!(processor = name, reason, "processor pump stopped");
    bus.publish(Event::processor_stopped(name, reason));
    Ok(())
}

/// Counts and drops whatever is still queued in a closed intake.
fn drain_intake<T>(intake: &mut mpsc::Receiver<Arc<T>>) -> usize {
    let mut n = 0;
    while intake.try_recv().is_ok() {
        n += 1;
    }
    n
}

/// Invokes the subscriber once per handed-over item, isolating panics.
async fn deliver<T>(
    name: &'static str,
    subscriber: Arc<dyn Subscribe<T>>,
    mut handoff: mpsc::Receiver<Arc<T>>,
    stats: Arc<ProcessorStats>,
    bus: Bus,
    done: CancellationToken,
) where
    T: Send + Sync + 'static,
{
    let _done = done.drop_guard();
    let mut offset: u64 = 0;

    while let Some(item) = handoff.recv().await {
        let fut = subscriber.on_event(item.as_ref());

        match AssertUnwindSafe(fut).catch_unwind().await {
            Ok(()) => {
                stats.delivered.fetch_add(1, Ordering::AcqRel);
            }
            Err(panic_err) => {
                let info = {
                    let any = &*panic_err;
                    if let Some(msg) = any.downcast_ref::<&'static str>() {
                        (*msg).to_string()
                    } else if let Some(msg) = any.downcast_ref::<String>() {
                        msg.clone()
                    } else {
                        "unknown panic".to_string()
                    }
                };
                stats.panicked.fetch_add(1, Ordering::AcqRel);
                tracing::error!(processor = name, offset, panic = %info, "subscriber callback panicked");
                bus.publish(Event::callback_panicked(name, offset, info));
            }
        }
        offset += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;

    use crate::subscribers::SubscriberFn;

    fn recorder() -> (Arc<Mutex<Vec<u32>>>, Arc<dyn Subscribe<u32>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let s = Arc::clone(&seen);
        let sub: Arc<dyn Subscribe<u32>> =
            SubscriberFn::arc("recorder", move |n: &u32| s.lock().unwrap().push(*n));
        (seen, sub)
    }

    fn cfg(initial_capacity: usize, shutdown: ShutdownMode) -> Config {
        Config {
            initial_capacity,
            shutdown,
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn test_delivers_in_order_and_drains_on_stop() {
        let (seen, sub) = recorder();
        let cfg = cfg(2, ShutdownMode::Drain);
        let shutdown = CancellationToken::new();
        let (front, worker, handle) = processor(sub, &cfg, shutdown.clone());
        let tasks = worker.spawn(shutdown.clone(), cfg.shutdown, Bus::new(16));

        for i in 0..100 {
            front.add(Arc::new(i)).await.unwrap();
        }
        shutdown.cancel();
        assert!(tasks.pump.await.unwrap().is_ok());
        tasks.delivery.await.unwrap();

        assert_eq!(*seen.lock().unwrap(), (0..100).collect::<Vec<_>>());
        assert_eq!(handle.accepted(), 100);
        assert_eq!(handle.delivered(), 100);
        assert_eq!(handle.discarded(), 0);
        assert!(handle.is_stopped());
    }

    #[tokio::test]
    async fn test_slow_callback_grows_ring_without_blocking_add() {
        let gate = Arc::new(tokio::sync::Semaphore::new(0));
        let seen = Arc::new(Mutex::new(Vec::new()));

        struct Gated {
            gate: Arc<tokio::sync::Semaphore>,
            seen: Arc<Mutex<Vec<u32>>>,
        }

        #[async_trait::async_trait]
        impl Subscribe<u32> for Gated {
            async fn on_event(&self, item: &u32) {
                let permit = self.gate.acquire().await.unwrap();
                permit.forget();
                self.seen.lock().unwrap().push(*item);
            }
            fn name(&self) -> &'static str {
                "gated"
            }
        }

        let sub: Arc<dyn Subscribe<u32>> = Arc::new(Gated {
            gate: Arc::clone(&gate),
            seen: Arc::clone(&seen),
        });
        let cfg = cfg(1, ShutdownMode::Drain);
        let shutdown = CancellationToken::new();
        let (front, worker, handle) = processor(sub, &cfg, shutdown.clone());
        let tasks = worker.spawn(shutdown.clone(), cfg.shutdown, Bus::new(16));

        // The callback is stuck on the first item; every add must still complete.
        tokio::time::timeout(Duration::from_secs(5), async {
            for i in 0..50 {
                front.add(Arc::new(i)).await.unwrap();
            }
        })
        .await
        .expect("add blocked on a stalled callback");

        gate.add_permits(50);
        shutdown.cancel();
        tasks.pump.await.unwrap().unwrap();
        tasks.delivery.await.unwrap();

        assert_eq!(*seen.lock().unwrap(), (0..50).collect::<Vec<_>>());
        assert!(handle.capacity() >= 32);
    }

    #[tokio::test]
    async fn test_discard_mode_drops_backlog() {
        let gate = Arc::new(tokio::sync::Semaphore::new(0));
        let delivered = Arc::new(AtomicU64::new(0));

        struct Blocked {
            gate: Arc<tokio::sync::Semaphore>,
            delivered: Arc<AtomicU64>,
        }

        #[async_trait::async_trait]
        impl Subscribe<u32> for Blocked {
            async fn on_event(&self, _item: &u32) {
                self.gate.acquire().await.unwrap().forget();
                self.delivered.fetch_add(1, Ordering::SeqCst);
            }
        }

        let sub: Arc<dyn Subscribe<u32>> = Arc::new(Blocked {
            gate: Arc::clone(&gate),
            delivered: Arc::clone(&delivered),
        });
        let cfg = cfg(4, ShutdownMode::Discard);
        let shutdown = CancellationToken::new();
        let (front, worker, handle) = processor(sub, &cfg, shutdown.clone());
        let tasks = worker.spawn(shutdown.clone(), cfg.shutdown, Bus::new(16));

        for i in 0..10 {
            front.add(Arc::new(i)).await.unwrap();
        }
        shutdown.cancel();
        tasks.pump.await.unwrap().unwrap();

        // Release whatever made it into the delivery task.
        gate.add_permits(10);
        tasks.delivery.await.unwrap();

        let delivered = delivered.load(Ordering::SeqCst);
        assert!(delivered <= 2, "delivered {delivered}");
        assert_eq!(delivered + handle.discarded(), 10);
    }

    #[tokio::test]
    async fn test_add_after_shutdown_is_rejected() {
        let (_seen, sub) = recorder();
        let cfg = Config::default();
        let shutdown = CancellationToken::new();
        let (front, _worker, _handle) = processor(sub, &cfg, shutdown.clone());

        shutdown.cancel();
        let err = front.add(Arc::new(1)).await.unwrap_err();
        assert!(matches!(err, DispatchError::UseAfterShutdown));
    }

    #[tokio::test]
    async fn test_add_to_dead_processor_reports_closed() {
        let (_seen, sub) = recorder();
        let cfg = Config::default();
        let shutdown = CancellationToken::new();
        let (front, worker, _handle) = processor(sub, &cfg, shutdown);
        drop(worker);

        let err = front.add(Arc::new(1)).await.unwrap_err();
        assert!(matches!(
            err,
            DispatchError::ProcessorClosed { processor: "recorder" }
        ));
    }

    #[tokio::test]
    async fn test_buffer_growth_failure_ends_processor() {
        struct Stalled(Arc<tokio::sync::Semaphore>);

        #[async_trait::async_trait]
        impl Subscribe<u32> for Stalled {
            async fn on_event(&self, _item: &u32) {
                self.0.acquire().await.unwrap().forget();
            }
            fn name(&self) -> &'static str {
                "stalled"
            }
        }

        let gate = Arc::new(tokio::sync::Semaphore::new(0));
        let sub: Arc<dyn Subscribe<u32>> = Arc::new(Stalled(Arc::clone(&gate)));
        let bus = Bus::new(64);
        let mut events = bus.subscribe();
        let cfg = cfg(1, ShutdownMode::Drain);
        let shutdown = CancellationToken::new();
        let (front, worker, handle) = processor(sub, &cfg, shutdown.clone());
        let tasks = worker
            .with_ring_limit(1)
            .spawn(shutdown.clone(), cfg.shutdown, bus);

        // The callback never returns, so the one-slot ring overflows within a few items.
        let mut rejected = None;
        for i in 0..50 {
            if let Err(err) = front.add(Arc::new(i)).await {
                rejected = Some(err);
                break;
            }
        }
        assert!(matches!(
            rejected,
            Some(DispatchError::ProcessorClosed { processor: "stalled" })
        ));
        assert!(matches!(
            front.add(Arc::new(99)).await.unwrap_err(),
            DispatchError::ProcessorClosed { .. }
        ));

        let err = tasks.pump.await.unwrap().unwrap_err();
        assert_eq!(err, RingError::Grow { requested: 2 });

        gate.add_permits(50);
        tasks.delivery.await.unwrap();
        assert!(handle.is_stopped());
        assert!(handle.discarded() >= 1);
        assert_eq!(handle.accepted(), handle.delivered() + handle.discarded());
        assert_eq!(handle.backlog(), 0);

        let mut failed = false;
        let mut stop_reason = None;
        while let Ok(ev) = events.try_recv() {
            match ev.kind {
                EventKind::ProcessorFailed => {
                    assert_eq!(ev.processor.as_deref(), Some("stalled"));
                    failed = true;
                }
                EventKind::ProcessorStopped => stop_reason = ev.reason.clone(),
                _ => {}
            }
        }
        assert!(failed, "no ProcessorFailed event");
        assert_eq!(stop_reason.as_deref(), Some("failed"));
        shutdown.cancel();
    }

    #[tokio::test]
    async fn test_dropped_worker_marks_handle_stopped() {
        let (_seen, sub) = recorder();
        let cfg = Config::default();
        let (_front, worker, handle) = processor(sub, &cfg, CancellationToken::new());
        assert!(!handle.is_stopped());

        drop(worker);
        tokio::time::timeout(Duration::from_secs(1), handle.stopped())
            .await
            .expect("handle never reported stopped");
    }

    #[tokio::test]
    async fn test_callback_panic_is_isolated() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let s = Arc::clone(&seen);
        let sub: Arc<dyn Subscribe<u32>> = SubscriberFn::arc("flaky", move |n: &u32| {
            if *n == 3 {
                panic!("bad item");
            }
            s.lock().unwrap().push(*n);
        });
        let bus = Bus::new(64);
        let mut events = bus.subscribe();
        let cfg = Config::default();
        let shutdown = CancellationToken::new();
        let (front, worker, handle) = processor(sub, &cfg, shutdown.clone());
        let tasks = worker.spawn(shutdown.clone(), cfg.shutdown, bus);

        for i in 0..6 {
            front.add(Arc::new(i)).await.unwrap();
        }
        shutdown.cancel();
        tasks.pump.await.unwrap().unwrap();
        tasks.delivery.await.unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![0, 1, 2, 4, 5]);
        assert_eq!(handle.panicked(), 1);
        assert_eq!(handle.delivered(), 5);

        let mut panic_event = None;
        while let Ok(ev) = events.try_recv() {
            if ev.is_callback_panic() {
                panic_event = Some(ev);
            }
        }
        let ev = panic_event.expect("no CallbackPanicked event");
        assert_eq!(ev.processor.as_deref(), Some("flaky"));
        assert_eq!(ev.offset, Some(3));
        assert_eq!(ev.reason.as_deref(), Some("bad item"));
    }
}
