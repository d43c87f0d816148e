// src/scheduler.rs
//
// Tick-budget tracking for the transport loop: a one-shot measurement the
// caller takes around a tick rather than a reusable stateful timer object.

use std::time::{Duration, Instant};

use crate::velocity_planner::FREQUENCY_HZ;

/// Wall-clock budget for one tick, derived from the pipeline's tick rate.
pub fn tick_budget() -> Duration {
    Duration::from_secs_f64(1.0 / FREQUENCY_HZ)
}

/// Measures one tick's wall-clock duration and warns if it exceeded budget.
/// Not fatal — there is no per-stage timeout; a slow tick just means the
/// transport may coalesce the next inbound message.
pub struct TickTimer {
    start: Instant,
}

impl TickTimer {
    pub fn start() -> Self {
        Self { start: Instant::now() }
    }

    /// Ends the measurement, logging a warning if the budget was exceeded.
    pub fn stop(self) -> Duration {
        let elapsed = self.start.elapsed();
        let budget = tick_budget();
        if elapsed > budget {
            tracing::warn!(?elapsed, ?budget, "tick exceeded its wall-clock budget");
        }
        elapsed
    }
}
