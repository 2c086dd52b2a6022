//! Full-screen sequences: the death animation and the scrolling score.
//!
//! Both run to completion before returning. Every timed phase goes through
//! [`Multiplexer::hold`], so the matrix keeps strobing while the sequence
//! owns the thread; button input is not serviced and is lost, not queued.

use crate::clock::Clock;
use crate::display::{DisplayBuffer, Multiplexer};
use crate::hal::{MatrixDriver, MatrixPins};
use crate::types::{
    Position, FLASH_CYCLES, FLASH_HOLD_MS, MATRIX_SIZE, RING_HOLD_MS, SCROLL_HOLD_MS,
};

/// Glyph geometry: 5 columns of 7 rows, plus one spacing column.
pub const GLYPH_COLS: i32 = 5;
pub const GLYPH_ADVANCE: i32 = GLYPH_COLS + 1;

/// 5x7 digit bitmaps, one byte per column, bit `y` = row `y` (top = 0).
const DIGIT_GLYPHS: [[u8; 5]; 10] = [
    [0x1E, 0x21, 0x21, 0x21, 0x1E],
    [0x00, 0x22, 0x3F, 0x20, 0x00],
    [0x32, 0x29, 0x29, 0x29, 0x26],
    [0x12, 0x21, 0x25, 0x25, 0x1A],
    [0x0C, 0x0A, 0x09, 0x3F, 0x08],
    [0x17, 0x25, 0x25, 0x25, 0x19],
    [0x1E, 0x25, 0x25, 0x25, 0x18],
    [0x01, 0x01, 0x39, 0x05, 0x03],
    [0x1A, 0x25, 0x25, 0x25, 0x1A],
    [0x06, 0x29, 0x29, 0x29, 0x1E],
];

/// Column bitmaps for a decimal digit.
fn glyph(digit: u8) -> &'static [u8; 5] {
    &DIGIT_GLYPHS[digit as usize % 10]
}

/// Total scroll width of a digit string in columns.
pub fn text_width(text: &str) -> i32 {
    text.len() as i32 * GLYPH_ADVANCE
}

/// Render one scroll frame: every digit's glyph at the given horizontal
/// offset. Pixels outside the 8x8 viewport are skipped.
pub fn draw_score_frame(fb: &mut DisplayBuffer, text: &str, offset: i32) {
    fb.clear();
    let mut cx = offset;
    for ch in text.chars() {
        let Some(digit) = ch.to_digit(10) else {
            cx += GLYPH_ADVANCE;
            continue;
        };
        let columns = glyph(digit as u8);
        for (c, &bits) in columns.iter().enumerate() {
            let x = cx + c as i32;
            if !(0..MATRIX_SIZE as i32).contains(&x) {
                continue;
            }
            for y in 0..7 {
                if bits & (1 << y) != 0 {
                    fb.set(x as i8, y, true);
                }
            }
        }
        cx += GLYPH_ADVANCE;
    }
}

/// Light every cell at the given Manhattan distance from the center.
pub fn draw_ring(fb: &mut DisplayBuffer, center: Position, radius: i8) {
    fb.clear();
    for y in 0..MATRIX_SIZE {
        for x in 0..MATRIX_SIZE {
            if Position::new(x, y).distance(center) == radius {
                fb.set(x, y, true);
            }
        }
    }
}

/// Expanding-diamond death animation seeded with the impact cell, followed
/// by full-board flash cycles. Synchronous; pumps the multiplexer throughout.
pub fn death_animation<P: MatrixPins>(
    impact: Position,
    fb: &mut DisplayBuffer,
    mux: &mut Multiplexer,
    driver: &mut MatrixDriver<P>,
    clock: &impl Clock,
) {
    for radius in 0..6 {
        draw_ring(fb, impact, radius);
        mux.hold(RING_HOLD_MS, fb, driver, clock);
    }
    for _ in 0..FLASH_CYCLES {
        fb.fill();
        mux.hold(FLASH_HOLD_MS, fb, driver, clock);
        fb.clear();
        mux.hold(FLASH_HOLD_MS, fb, driver, clock);
    }
}

/// Scroll the score right-to-left through the 8-wide viewport, one column
/// per frame, from just past the right edge until the text has fully left.
pub fn scroll_score<P: MatrixPins>(
    score: u32,
    fb: &mut DisplayBuffer,
    mux: &mut Multiplexer,
    driver: &mut MatrixDriver<P>,
    clock: &impl Clock,
) {
    let text = score.to_string();
    let total = text_width(&text);
    for offset in (-total..=MATRIX_SIZE as i32).rev() {
        draw_score_frame(fb, &text, offset);
        mux.hold(SCROLL_HOLD_MS, fb, driver, clock);
    }
}
