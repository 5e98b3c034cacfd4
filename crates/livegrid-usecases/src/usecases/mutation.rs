//! Periodic random mutation of one grid cell per tick.

use std::time::{Duration, Instant};

use rand::Rng;

use crate::domain::{CellPosition, GridError, GridModel};
use crate::usecases::timer::IntervalTimer;

/// Inclusive bounds of the integers written into cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueRange {
    pub min: u32,
    pub max: u32,
}

impl ValueRange {
    pub fn new(min: u32, max: u32) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }
}

impl Default for ValueRange {
    fn default() -> Self {
        Self { min: 0, max: 100 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    Mutated {
        position: CellPosition,
        value: String,
    },
    /// The grid had nothing to mutate; the tick was dropped.
    Skipped(GridError),
    /// The driver is stopped.
    Stopped,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DriverStats {
    pub ticks: u64,
    pub mutations: u64,
    pub skipped: u64,
}

pub struct MutationDriver<R: Rng> {
    timer: IntervalTimer,
    rng: R,
    values: ValueRange,
    stats: DriverStats,
}

impl<R: Rng> MutationDriver<R> {
    pub fn new(interval: Duration, rng: R) -> Self {
        Self {
            timer: IntervalTimer::new(interval),
            rng,
            values: ValueRange::default(),
            stats: DriverStats::default(),
        }
    }

    pub fn with_values(mut self, values: ValueRange) -> Self {
        self.values = values;
        self
    }

    pub fn start(&mut self, now: Instant) {
        self.timer.start(now);
    }

    pub fn stop(&mut self) {
        self.timer.stop();
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    pub fn interval(&self) -> Duration {
        self.timer.interval()
    }

    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.timer.time_until_due(now)
    }

    /// Runs one tick if the timer is due at `now`.
    pub fn poll(&mut self, grid: &GridModel, now: Instant) -> Option<TickOutcome> {
        if self.timer.poll(now) {
            Some(self.tick(grid))
        } else {
            None
        }
    }

    /// Writes a fresh random value into a random cell.
    ///
    /// An empty grid is not an error for the driver: the tick is reported as
    /// skipped and nothing changes.
    pub fn tick(&mut self, grid: &GridModel) -> TickOutcome {
        if !self.timer.is_running() {
            return TickOutcome::Stopped;
        }
        self.stats.ticks += 1;

        let value = self
            .rng
            .random_range(self.values.min..=self.values.max)
            .to_string();
        match grid.random_item(&mut self.rng) {
            Ok((position, item)) => {
                item.set_value(value.clone());
                self.stats.mutations += 1;
                TickOutcome::Mutated { position, value }
            }
            Err(err) => {
                self.stats.skipped += 1;
                TickOutcome::Skipped(err)
            }
        }
    }

    pub fn stats(&self) -> DriverStats {
        self.stats
    }
}
