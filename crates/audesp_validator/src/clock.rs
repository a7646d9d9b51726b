//! Time source for measuring validation passes.
//!
//! The validator reads elapsed time through the `Clock` trait so that tests
//! and reproducible reports can pin `duration` to a known value.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Monotonic time source in milliseconds.
pub trait Clock: Send + Sync {
    /// Milliseconds since an arbitrary fixed origin.
    fn now_ms(&self) -> f64;
}

/// Wall clock backed by `std::time::Instant`.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Creates a clock whose origin is now.
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
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Deterministic clock that advances by a fixed step on every reading.
///
/// A validation pass reads the clock twice, so its reported duration equals
/// `step_ms`.
///
/// # Example
///
/// ```rust
/// use audesp_validator::{Clock, StepClock};
///
/// let clock = StepClock::new(2.5);
/// let start = clock.now_ms();
/// assert_eq!(clock.now_ms() - start, 2.5);
/// ```
#[derive(Debug)]
pub struct StepClock {
    step_ms: f64,
    ticks: AtomicU64,
}

impl StepClock {
    /// Creates a clock advancing `step_ms` per reading.
    pub fn new(step_ms: f64) -> Self {
        Self {
            step_ms,
            ticks: AtomicU64::new(0),
        }
    }
}

impl Clock for StepClock {
    fn now_ms(&self) -> f64 {
        let tick = self.ticks.fetch_add(1, Ordering::Relaxed);
        tick as f64 * self.step_ms
    }
}
