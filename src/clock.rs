//! Monotonic time source injected into every time-gated component.
//!
//! There is no scheduler and no interrupts: display refresh, input sampling
//! and the game tick all self-throttle by comparing elapsed time against
//! their own last-execution timestamp. Routing those comparisons through a
//! trait lets tests run the same code against a simulated clock instead of
//! waiting out real animation holds.

use std::cell::Cell;
use std::time::Instant;

/// Monotonic microsecond clock.
pub trait Clock {
    fn now_us(&self) -> u64;

    fn now_ms(&self) -> u64 {
        self.now_us() / 1_000
    }
}

/// Wall-clock implementation anchored at construction time.
#[derive(Debug)]
pub struct MonotonicClock {
    epoch: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_us(&self) -> u64 {
        self.epoch.elapsed().as_micros() as u64
    }
}

/// Hand-driven clock for tests and the simulator.
///
/// With a non-zero `auto_advance_us`, every reading steps time forward, so
/// code that busy-waits on the clock (animation pump loops, settle holds)
/// terminates without real delays.
#[derive(Debug)]
pub struct ManualClock {
    now_us: Cell<u64>,
    auto_advance_us: u64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now_us: Cell::new(0),
            auto_advance_us: 0,
        }
    }

    pub fn with_auto_advance_us(auto_advance_us: u64) -> Self {
        Self {
            now_us: Cell::new(0),
            auto_advance_us,
        }
    }

    pub fn advance_us(&self, us: u64) {
        self.now_us.set(self.now_us.get() + us);
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance_us(ms * 1_000);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now_us(&self) -> u64 {
        let now = self.now_us.get();
        self.now_us.set(now + self.auto_advance_us);
        now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_advances_by_hand() {
        let clock = ManualClock::new();
        assert_eq!(clock.now_us(), 0);
        clock.advance_ms(3);
        assert_eq!(clock.now_us(), 3_000);
        assert_eq!(clock.now_ms(), 3);
    }

    #[test]
    fn test_manual_clock_auto_advance_steps_per_reading() {
        let clock = ManualClock::with_auto_advance_us(500);
        assert_eq!(clock.now_us(), 0);
        assert_eq!(clock.now_us(), 500);
        assert_eq!(clock.now_us(), 1_000);
    }

    #[test]
    fn test_monotonic_clock_does_not_go_backwards() {
        let clock = MonotonicClock::new();
        let a = clock.now_us();
        let b = clock.now_us();
        assert!(b >= a);
    }
}
