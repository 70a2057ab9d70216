//! Time sources for frame pacing.

use std::cell::Cell;
use std::time::{Duration, Instant};

/// Monotonic time source and the only way the loop blocks.
pub trait Clock {
    /// Time since an arbitrary fixed origin.
    fn now(&self) -> Duration;
    /// Block for `d`.
    fn sleep(&mut self, d: Duration);
}

/// Wall clock backed by [`Instant`] and [`std::thread::sleep`].
#[derive(Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Clock whose origin is now.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep(&mut self, d: Duration) {
        std::thread::sleep(d);
    }
}

/// Virtual clock for tests.
///
/// Time only moves on `sleep`, by `advance`, or by `tick` on every `now` call.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
    tick: Duration,
    sleeps: Vec<Duration>,
}

impl ManualClock {
    /// Clock stopped at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by `tick` every time `now` is read.
    pub fn with_tick(tick: Duration) -> Self {
        Self {
            tick,
            ..Self::default()
        }
    }

    /// Move time forward by `d` without recording a sleep.
    pub fn advance(&self, d: Duration) {
        self.now.set(self.now.get() + d);
    }

    /// Every duration passed to `sleep`, in order.
    pub fn sleeps(&self) -> &[Duration] {
        &self.sleeps
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        let t = self.now.get();
        self.now.set(t + self.tick);
        t
    }

    fn sleep(&mut self, d: Duration) {
        self.sleeps.push(d);
        self.advance(d);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/clock.rs"]
mod tests;
