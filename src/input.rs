//! Button debouncing for the two direction switches.
//!
//! Mechanical switches bounce: a single press shows up as a noisy burst of
//! samples. Each direction keeps a run-length counter of consecutive
//! pressed samples plus a latch, yielding level-triggered, single-shot
//! semantics: a press held across many samples fires exactly once and
//! re-arms only after a full release. The start/restart switch is handled
//! separately by the orchestrator (a raw read plus a settle delay).

use arrayvec::ArrayVec;

use crate::clock::Clock;
use crate::hal::Level;
use crate::types::{GameAction, DEBOUNCE_THRESHOLD, SAMPLE_INTERVAL_MS};

/// Per-switch debounce state: consecutive-pressed run length and a
/// fired-already latch.
#[derive(Debug, Clone, Copy, Default)]
pub struct DebounceState {
    run: u8,
    latched: bool,
}

impl DebounceState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one raw sample; returns true when a move event fires.
    ///
    /// The counter resets on any released sample, so the press must
    /// persist across the whole debounce window. The latch clears on
    /// release, re-arming for the next press.
    pub fn sample(&mut self, pressed: bool) -> bool {
        if pressed {
            self.run = self.run.saturating_add(1);
        } else {
            self.run = 0;
        }

        if self.run >= DEBOUNCE_THRESHOLD {
            if !self.latched {
                self.latched = true;
                return true;
            }
        } else {
            self.latched = false;
        }
        false
    }
}

/// Samples both direction switches at most once per [`SAMPLE_INTERVAL_MS`].
#[derive(Debug, Default)]
pub struct Debouncer {
    left: DebounceState,
    right: DebounceState,
    last_sample_us: Option<u64>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sample the raw switch levels if the interval has elapsed.
    ///
    /// Pressed reads electrically low (pulled-up inputs). Returns the move
    /// events fired this sample; empty when throttled or nothing fired.
    pub fn poll(
        &mut self,
        left: Level,
        right: Level,
        clock: &impl Clock,
    ) -> ArrayVec<GameAction, 2> {
        let mut actions = ArrayVec::new();

        let now = clock.now_us();
        if let Some(last) = self.last_sample_us {
            if now.wrapping_sub(last) < SAMPLE_INTERVAL_MS * 1_000 {
                return actions;
            }
        }
        self.last_sample_us = Some(now);

        if self.left.sample(left.is_low()) {
            actions.push(GameAction::MoveLeft);
        }
        if self.right.sample(right.is_low()) {
            actions.push(GameAction::MoveRight);
        }
        actions
    }
}
