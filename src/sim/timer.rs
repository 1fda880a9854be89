//! Wall-clock interval timer
//!
//! The spawner runs on elapsed milliseconds rather than display frames.
//! `advance` reports how many periods completed and keeps the remainder.

/// Repeating timer measured in milliseconds
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalTimer {
    period_ms: f64,
    elapsed_ms: f64,
    active: bool,
}

impl IntervalTimer {
    /// Active timer with nothing elapsed
    pub fn new(period_ms: f64) -> Self {
        Self {
            period_ms,
            elapsed_ms: 0.0,
            active: true,
        }
    }

    /// Feed elapsed time, returns the number of completed periods
    pub fn advance(&mut self, dt_ms: f64) -> u32 {
        if !self.active || !dt_ms.is_finite() || dt_ms <= 0.0 || self.period_ms <= 0.0 {
            return 0;
        }
        self.elapsed_ms += dt_ms;
        let mut fired = 0;
        while self.elapsed_ms >= self.period_ms {
            self.elapsed_ms -= self.period_ms;
            fired += 1;
        }
        fired
    }

    /// Stop firing; further `advance` calls are ignored
    pub fn cancel(&mut self) {
        self.active = false;
        self.elapsed_ms = 0.0;
    }

    /// Fresh active timer with the same period
    pub fn restart(&mut self) {
        self.elapsed_ms = 0.0;
        self.active = true;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}
