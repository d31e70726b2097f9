//! Fixed-period tick driver
//!
//! Accumulates wall-clock time and runs whole simulation steps, so regions
//! always advance by exactly one step per period whatever the caller's
//! frame rate.

use std::time::Duration;

use crate::consts::{MAX_SUBSTEPS, TICK_PERIOD_MS};
use crate::sim::{EventSink, RegionGraph};

pub struct TickDriver {
    period: Duration,
    max_substeps: u32,
    accumulator: Duration,
    ticks: u64,
}

impl Default for TickDriver {
    fn default() -> Self {
        Self::new(Duration::from_millis(TICK_PERIOD_MS), MAX_SUBSTEPS)
    }
}

impl TickDriver {
    pub fn new(period: Duration, max_substeps: u32) -> Self {
        Self {
            period,
            max_substeps: max_substeps.max(1),
            accumulator: Duration::ZERO,
            ticks: 0,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Steps run so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Time banked toward the next step
    pub fn pending(&self) -> Duration {
        self.accumulator
    }

    /// Bank `elapsed` and run as many whole steps as it covers.
    ///
    /// Elapsed time beyond `max_substeps` periods is dropped. Returns the
    /// number of steps run.
    pub fn advance<S: EventSink + ?Sized>(
        &mut self,
        elapsed: Duration,
        graph: &mut RegionGraph,
        sink: &mut S,
    ) -> u32 {
        if self.period.is_zero() {
            return 0;
        }
        let cap = self.period * self.max_substeps;
        self.accumulator += elapsed.min(cap);

        let mut substeps = 0;
        while self.accumulator >= self.period && substeps < self.max_substeps {
            self.step(graph, sink);
            self.accumulator -= self.period;
            substeps += 1;
        }
        substeps
    }

    /// Run exactly one step
    pub fn step<S: EventSink + ?Sized>(&mut self, graph: &mut RegionGraph, sink: &mut S) {
        let delivered = graph.tick(sink);
        self.ticks += 1;
        if delivered > 0 {
            log::trace!("tick {}: {} ball(s) changed region", self.ticks, delivered);
        }
    }

    /// Run `count` steps back to back, ignoring wall-clock time
    pub fn run_for<S: EventSink + ?Sized>(
        &mut self,
        count: u64,
        graph: &mut RegionGraph,
        sink: &mut S,
    ) {
        for _ in 0..count {
            self.step(graph, sink);
        }
    }
}
