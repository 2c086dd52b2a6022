//! Shared constants and plain data types
//! Everything here is dependency-free; timing values are the board's
//! measured intervals, positions are signed so reflection math can go
//! transiently off-grid.

/// Matrix dimensions (the board is square).
pub const MATRIX_SIZE: i8 = 8;

/// Minimum interval between multiplexer row strobes (microseconds).
pub const REFRESH_INTERVAL_US: u64 = 1_000;

/// Button sampling interval for the debouncer (milliseconds).
pub const SAMPLE_INTERVAL_MS: u64 = 10;
/// Consecutive pressed samples required before a move event fires.
pub const DEBOUNCE_THRESHOLD: u8 = 5;

/// Game tick timing (milliseconds)
pub const TICK_START_MS: u64 = 350;
pub const TICK_STEP_MS: u64 = 10;
pub const TICK_FLOOR_MS: u64 = 60;

/// Paddle geometry: 3 cells wide, so its center stays in [1, 6].
pub const PADDLE_MIN_X: i8 = 1;
pub const PADDLE_MAX_X: i8 = 6;
pub const PADDLE_ROW: i8 = MATRIX_SIZE - 1;

/// Buzzer pulse durations (milliseconds)
pub const PULSE_SCORE_MS: u64 = 40;
pub const PULSE_GAME_OVER_MS: u64 = 120;

/// Animation frame holds (milliseconds)
pub const RING_HOLD_MS: u64 = 80;
pub const FLASH_HOLD_MS: u64 = 100;
pub const FLASH_CYCLES: u32 = 3;
pub const SCROLL_HOLD_MS: u64 = 120;

/// Settle delay after a restart press, to ride out contact bounce (milliseconds).
pub const RESTART_SETTLE_MS: u64 = 150;

/// A cell on the 8x8 grid, (0, 0) = top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i8,
    pub y: i8,
}

impl Position {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another cell.
    pub fn distance(&self, other: Position) -> i8 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

/// Discrete paddle actions produced by the debouncer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
}

/// What a physics advance did, consumed by the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Ball in flight, nothing to signal.
    Advanced,
    /// Paddle hit: score incremented, interval tightened.
    Scored,
    /// Paddle miss at the given impact cell: terminal state entered.
    Missed(Position),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manhattan_distance() {
        let a = Position::new(3, 4);
        assert_eq!(a.distance(Position::new(3, 4)), 0);
        assert_eq!(a.distance(Position::new(0, 0)), 7);
        assert_eq!(a.distance(Position::new(5, 1)), 5);
    }

    #[test]
    fn test_paddle_bounds_fit_on_board() {
        assert!(PADDLE_MIN_X - 1 >= 0);
        assert!(PADDLE_MAX_X + 1 <= MATRIX_SIZE - 1);
    }
}
