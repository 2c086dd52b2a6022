//! Display buffer and row multiplexer.
//!
//! A real multiplexed matrix only ever shows one row: the multiplexer
//! strobes rows in sequence and relies on persistence of vision, so
//! `refresh` must be called far more often than the strobe interval or rows
//! dim and flicker unevenly. Any loop spanning more than a trivial duration
//! (notably animation holds) has to keep pumping it; see [`Multiplexer::hold`].

use crate::clock::Clock;
use crate::hal::{MatrixDriver, MatrixPins};
use crate::types::{MATRIX_SIZE, REFRESH_INTERVAL_US};

const SIZE: usize = MATRIX_SIZE as usize;

/// 8x8 bitmap of logical pixel state, row-major, (0, 0) top-left.
///
/// Shared between the engine (overlay), the renderer (animations) and the
/// multiplexer (read-only). It reflects exactly the last write: a `clear`
/// with no redraw behind it blanks the screen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DisplayBuffer {
    cells: [[bool; SIZE]; SIZE],
}

impl DisplayBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a pixel. Out-of-range coordinates are silently ignored: ball
    /// deflection arithmetic transiently computes off-board positions and
    /// glyph scrolling deliberately renders past the viewport.
    pub fn set(&mut self, x: i8, y: i8, on: bool) {
        if x < 0 || x >= MATRIX_SIZE || y < 0 || y >= MATRIX_SIZE {
            return;
        }
        self.cells[y as usize][x as usize] = on;
    }

    pub fn get(&self, x: i8, y: i8) -> bool {
        if x < 0 || x >= MATRIX_SIZE || y < 0 || y >= MATRIX_SIZE {
            return false;
        }
        self.cells[y as usize][x as usize]
    }

    pub fn clear(&mut self) {
        self.cells = [[false; SIZE]; SIZE];
    }

    pub fn fill(&mut self) {
        self.cells = [[true; SIZE]; SIZE];
    }

    /// Row view used by the multiplexer when strobing.
    pub fn row(&self, y: usize) -> &[bool; SIZE] {
        &self.cells[y]
    }

    /// Number of lit cells (test and status helper).
    pub fn lit_count(&self) -> usize {
        self.cells
            .iter()
            .map(|row| row.iter().filter(|&&c| c).count())
            .sum()
    }
}

/// Strobes one matrix row per execution, at most once per
/// [`REFRESH_INTERVAL_US`], measured from its own last execution.
#[derive(Debug)]
pub struct Multiplexer {
    cursor: usize,
    last_refresh_us: Option<u64>,
}

impl Multiplexer {
    pub fn new() -> Self {
        Self {
            cursor: 0,
            last_refresh_us: None,
        }
    }

    /// Currently-strobed row index.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// One multiplexing step. Calls inside the throttle window are no-ops.
    ///
    /// When due: deactivate every row, drive all columns to the cursor
    /// row's lit state, activate exactly the cursor row, advance the cursor
    /// modulo the row count. Returns whether the body executed.
    pub fn refresh<P: MatrixPins>(
        &mut self,
        fb: &DisplayBuffer,
        driver: &mut MatrixDriver<P>,
        clock: &impl Clock,
    ) -> bool {
        let now = clock.now_us();
        if let Some(last) = self.last_refresh_us {
            if now.wrapping_sub(last) < REFRESH_INTERVAL_US {
                return false;
            }
        }
        self.last_refresh_us = Some(now);

        for row in 0..SIZE {
            driver.set_row_active(row, false);
        }
        let row = fb.row(self.cursor);
        for (col, &lit) in row.iter().enumerate() {
            driver.set_col_lit(col, lit);
        }
        driver.set_row_active(self.cursor, true);
        self.cursor = (self.cursor + 1) % SIZE;
        true
    }

    /// Pump loop: keep refreshing until `hold_ms` elapses on the clock.
    ///
    /// This is the synchronous wait used by every animation phase and the
    /// restart settle delay; the matrix stays serviced while time passes.
    pub fn hold<P: MatrixPins>(
        &mut self,
        hold_ms: u64,
        fb: &DisplayBuffer,
        driver: &mut MatrixDriver<P>,
        clock: &impl Clock,
    ) {
        let deadline = clock.now_us() + hold_ms * 1_000;
        while clock.now_us() < deadline {
            self.refresh(fb, driver, clock);
        }
    }
}

impl Default for Multiplexer {
    fn default() -> Self {
        Self::new()
    }
}
