//! Hardware seams consumed by the core.
//!
//! The game logic never touches pins directly: it drives rows and columns
//! through [`MatrixDriver`] (which maps logical on/off to electrical levels
//! per the configured polarity), reads buttons as raw levels, and pulses a
//! single buzzer line. Frontends implement the traits; tests use mocks.

use std::time::Duration;

/// Electrical line level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

impl Level {
    /// Level that realizes `active` under the given polarity.
    pub fn from_active(active: bool, active_high: bool) -> Self {
        if active == active_high {
            Level::High
        } else {
            Level::Low
        }
    }

    pub fn is_low(self) -> bool {
        self == Level::Low
    }
}

/// Per-axis active polarity of the matrix wiring.
///
/// Rows and columns are independently configurable; the reference board
/// drives rows active-high and sinks columns active-low.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Polarity {
    pub row_active_high: bool,
    pub col_active_high: bool,
}

impl Default for Polarity {
    fn default() -> Self {
        Self {
            row_active_high: true,
            col_active_high: false,
        }
    }
}

/// Raw row/column line writes. Implementations own the pins.
pub trait MatrixPins {
    fn write_row(&mut self, row: usize, level: Level);
    fn write_col(&mut self, col: usize, level: Level);
}

/// Logical matrix drive over raw pins: "activate this row",
/// "make this column lit", with polarity applied here and nowhere else.
#[derive(Debug)]
pub struct MatrixDriver<P> {
    pins: P,
    polarity: Polarity,
}

impl<P: MatrixPins> MatrixDriver<P> {
    pub fn new(pins: P, polarity: Polarity) -> Self {
        Self { pins, polarity }
    }

    pub fn set_row_active(&mut self, row: usize, active: bool) {
        self.pins
            .write_row(row, Level::from_active(active, self.polarity.row_active_high));
    }

    pub fn set_col_lit(&mut self, col: usize, lit: bool) {
        self.pins
            .write_col(col, Level::from_active(lit, self.polarity.col_active_high));
    }

    pub fn pins(&self) -> &P {
        &self.pins
    }

    pub fn pins_mut(&mut self) -> &mut P {
        &mut self.pins
    }
}

/// Raw reads of the three momentary switches. Pulled up: pressed reads low.
pub trait Buttons {
    fn left(&mut self) -> Level;
    fn right(&mut self) -> Level;
    fn start(&mut self) -> Level;
}

/// Single on/off audible drive line.
///
/// `pulse` is intentionally synchronous: nothing else progresses while the
/// buzzer sounds, matching the rest of the run-to-completion sequences.
pub trait Buzzer {
    fn pulse(&mut self, duration: Duration);
}

/// Fire-and-forget score delivery, invoked once per completed game.
///
/// Implementations must swallow transport failures; the game-over sequence
/// is not gated on delivery.
pub trait ScoreSink {
    fn report(&mut self, score: u32);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_active_high_polarity() {
        assert_eq!(Level::from_active(true, true), Level::High);
        assert_eq!(Level::from_active(false, true), Level::Low);
    }

    #[test]
    fn test_level_from_active_low_polarity() {
        assert_eq!(Level::from_active(true, false), Level::Low);
        assert_eq!(Level::from_active(false, false), Level::High);
    }

    struct RecordingPins {
        rows: [Level; 8],
        cols: [Level; 8],
    }

    impl RecordingPins {
        fn new() -> Self {
            Self {
                rows: [Level::Low; 8],
                cols: [Level::Low; 8],
            }
        }
    }

    impl MatrixPins for RecordingPins {
        fn write_row(&mut self, row: usize, level: Level) {
            self.rows[row] = level;
        }

        fn write_col(&mut self, col: usize, level: Level) {
            self.cols[col] = level;
        }
    }

    #[test]
    fn test_driver_applies_reference_board_polarity() {
        // Rows active-high, columns active-low.
        let mut driver = MatrixDriver::new(RecordingPins::new(), Polarity::default());

        driver.set_row_active(2, true);
        driver.set_col_lit(5, true);
        assert_eq!(driver.pins().rows[2], Level::High);
        assert_eq!(driver.pins().cols[5], Level::Low);

        driver.set_row_active(2, false);
        driver.set_col_lit(5, false);
        assert_eq!(driver.pins().rows[2], Level::Low);
        assert_eq!(driver.pins().cols[5], Level::High);
    }
}
