//! # Dispatcher configuration.
//!
//! Provides [`Config`] centralized settings for a [`Dispatcher`](crate::Dispatcher)
//! and its processors.
//!
//! ## Sentinel values
//! - `initial_capacity = 0` → buffer starts empty and grows on the first backlog item
//! - `grace = 0s` → `wait_stopped` waits without a deadline

use std::time::Duration;

/// What a processor does with its backlog once its intake is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShutdownMode {
    /// Deliver every accepted payload (intake queue, pending slot, buffer), then stop.
    #[default]
    Drain,
    /// Stop immediately; the payload already handed to the callback finishes,
    /// everything still pending or buffered is dropped.
    Discard,
}

/// Configuration for the dispatcher runtime.
///
/// ## Field semantics
/// - `initial_capacity`: Slots in each processor's ring before the first growth
/// - `intake_capacity`: Depth of each processor's intake channel (min 1)
/// - `bus_capacity`: Diagnostics bus ring size (min 1; clamped by Bus)
/// - `grace`: Maximum wait in `wait_stopped` (`0s` = no deadline)
/// - `shutdown`: Backlog handling on stop
#[derive(Clone, Debug)]
pub struct Config {
    /// Initial ring capacity for every processor.
    ///
    /// Overridden per subscriber by [`Subscribe::initial_capacity`](crate::Subscribe::initial_capacity).
    pub initial_capacity: usize,

    /// Intake channel depth.
    ///
    /// `dispatch` waits only while this many payloads are queued and the pump
    /// has not picked them up yet. The pump never waits on the callback, so a
    /// small value keeps the intake close to a direct handoff.
    pub intake_capacity: usize,

    /// Capacity of the diagnostics broadcast channel.
    ///
    /// Receivers lagging more than `bus_capacity` events observe `Lagged`.
    pub bus_capacity: usize,

    /// Maximum time `wait_stopped` waits for all processor tasks to exit.
    pub grace: Duration,

    /// Backlog handling once intake is closed.
    pub shutdown: ShutdownMode,
}

impl Config {
    /// Returns the intake depth clamped to a minimum of 1.
    #[inline]
    pub fn intake_capacity_clamped(&self) -> usize {
        self.intake_capacity.max(1)
    }

    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }

    /// Returns the shutdown grace as an `Option`.
    ///
    /// - `None` → wait without deadline
    /// - `Some(d)` → give up after `d`
    #[inline]
    pub fn shutdown_grace(&self) -> Option<Duration> {
        if self.grace == Duration::ZERO {
            None
        } else {
            Some(self.grace)
        }
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `initial_capacity = 1024`
    /// - `intake_capacity = 1` (closest to a direct handoff)
    /// - `bus_capacity = 1024`
    /// - `grace = 60s`
    /// - `shutdown = ShutdownMode::Drain`
    fn default() -> Self {
        Self {
            initial_capacity: 1024,
            intake_capacity: 1,
            bus_capacity: 1024,
            grace: Duration::from_secs(60),
            shutdown: ShutdownMode::Drain,
        }
    }
}
