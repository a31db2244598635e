//! # Example: fanout
//!
//! A watch-style event source broadcasting object changes to three subscribers
//! of different speeds.
//!
//! Shows how to:
//! - Register subscribers with [`Dispatcher::builder`].
//! - Run the dispatcher in the background and feed it from a producer task.
//! - Stop it and wait for every processor to drain.
//!
//! ## Flow
//! ```text
//! producer ──► dispatch(WatchEvent) ──► LogWriter   (fast)
//!                                  ├──► counter     (fast)
//!                                  └──► indexer     (slow: backlog grows, nothing lost)
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=debug cargo run --example fanout --features logging
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use ringcast::{Config, Dispatcher, LogWriter, Subscribe, SubscriberFn};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[allow(dead_code)]
#[derive(Debug)]
enum WatchEvent {
    Added(String),
    Modified(String),
    Deleted(String),
}

/// Simulates an expensive consumer.
struct Indexer {
    indexed: AtomicUsize,
}

#[async_trait]
impl Subscribe<WatchEvent> for Indexer {
    async fn on_event(&self, ev: &WatchEvent) {
        tokio::time::sleep(Duration::from_millis(20)).await;
        if !matches!(ev, WatchEvent::Deleted(_)) {
            self.indexed.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn name(&self) -> &'static str {
        "indexer"
    }

    fn initial_capacity(&self) -> Option<usize> {
        Some(4)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let count = Arc::new(AtomicUsize::new(0));
    let c = Arc::clone(&count);
    let indexer = Arc::new(Indexer {
        indexed: AtomicUsize::new(0),
    });

    let (dispatcher, handles) = Dispatcher::<WatchEvent>::builder(Config::default())
        .with_subscriber(Arc::new(LogWriter::new()))
        .with_subscriber(SubscriberFn::arc("counter", move |_: &WatchEvent| {
            c.fetch_add(1, Ordering::Relaxed);
        }))
        .with_subscriber(indexer.clone())
        .build()?;
    let dispatcher = Arc::new(dispatcher);

    let stop = CancellationToken::new();
    let runner = tokio::spawn({
        let dispatcher = Arc::clone(&dispatcher);
        let stop = stop.clone();
        async move { dispatcher.run(stop).await }
    });

    for i in 0..30 {
        let name = format!("pod-{}", i % 10);
        let ev = match i / 10 {
            0 => WatchEvent::Added(name),
            1 => WatchEvent::Modified(name),
            _ => WatchEvent::Deleted(name),
        };
        dispatcher.dispatch(ev).await?;
    }

    stop.cancel();
    runner.await??;
    dispatcher.wait_stopped().await?;

    for h in &handles {
        println!(
            "{:<10} delivered={} capacity={} discarded={}",
            h.name(),
            h.delivered(),
            h.capacity(),
            h.discarded()
        );
    }
    println!(
        "{} events counted, {} indexed",
        count.load(Ordering::Relaxed),
        indexer.indexed.load(Ordering::Relaxed)
    );
    Ok(())
}
