//! Terminal frontend: stands in for the LED matrix, buttons and buzzer.
//!
//! The matrix view latches what the multiplexer actually drives: a row's
//! column pattern is captured at the instant the row line goes active, the
//! same way persistence of vision samples a strobed display. Keyboard keys
//! emulate the momentary switches; terminals do not reliably deliver
//! key-release events, so a held key is modelled as "pressed until no
//! repeat arrives within a timeout".

use std::io::{self, Write};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    style::Print,
    terminal, QueueableCommand,
};

use crate::hal::{Buttons, Buzzer, Level, MatrixPins, Polarity};
use crate::types::MATRIX_SIZE;

const SIZE: usize = MATRIX_SIZE as usize;

/// How long a key counts as held after its last press/repeat event.
const KEY_HOLD_TIMEOUT_MS: u64 = 150;

/// Terminal draw rate; decoupled from the multiplexer strobe rate.
const DRAW_INTERVAL_MS: u64 = 33;

// ── Matrix pins ─────────────────────────────────────────────────────────

/// Pin sink that decodes electrical levels back into a latched image.
#[derive(Debug)]
pub struct TermPins {
    polarity: Polarity,
    cols: [Level; SIZE],
    latched: [[bool; SIZE]; SIZE],
}

impl TermPins {
    pub fn new(polarity: Polarity) -> Self {
        Self {
            polarity,
            cols: [Level::Low; SIZE],
            latched: [[false; SIZE]; SIZE],
        }
    }

    /// The image as the eye would see it across a full strobe sweep.
    pub fn latched(&self) -> &[[bool; SIZE]; SIZE] {
        &self.latched
    }
}

impl MatrixPins for TermPins {
    fn write_row(&mut self, row: usize, level: Level) {
        if row >= SIZE {
            return;
        }
        let active = Level::from_active(true, self.polarity.row_active_high);
        if level == active {
            let lit = Level::from_active(true, self.polarity.col_active_high);
            for col in 0..SIZE {
                self.latched[row][col] = self.cols[col] == lit;
            }
        }
    }

    fn write_col(&mut self, col: usize, level: Level) {
        if col < SIZE {
            self.cols[col] = level;
        }
    }
}

// ── Buttons ─────────────────────────────────────────────────────────────

/// Keyboard-backed switches: left/right arrows (or A/D) and R for restart.
#[derive(Debug)]
pub struct KeyButtons {
    left_seen: Option<Instant>,
    right_seen: Option<Instant>,
    start_seen: Option<Instant>,
    quit: bool,
}

impl KeyButtons {
    pub fn new() -> Self {
        Self {
            left_seen: None,
            right_seen: None,
            start_seen: None,
            quit: false,
        }
    }

    /// Drain pending terminal events. Call once per outer-loop iteration.
    pub fn pump(&mut self) -> Result<()> {
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                // Presses and repeats both refresh the hold window; releases
                // (delivered only by some terminals) must not.
                if key.kind == KeyEventKind::Release {
                    continue;
                }
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
                {
                    self.quit = true;
                    continue;
                }
                match key.code {
                    KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
                        self.left_seen = Some(Instant::now());
                    }
                    KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
                        self.right_seen = Some(Instant::now());
                    }
                    KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter => {
                        self.start_seen = Some(Instant::now());
                    }
                    KeyCode::Char('q') | KeyCode::Esc => {
                        self.quit = true;
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    fn level_for(seen: Option<Instant>) -> Level {
        match seen {
            Some(at) if at.elapsed() < Duration::from_millis(KEY_HOLD_TIMEOUT_MS) => Level::Low,
            _ => Level::High,
        }
    }
}

impl Default for KeyButtons {
    fn default() -> Self {
        Self::new()
    }
}

impl Buttons for KeyButtons {
    fn left(&mut self) -> Level {
        Self::level_for(self.left_seen)
    }

    fn right(&mut self) -> Level {
        Self::level_for(self.right_seen)
    }

    fn start(&mut self) -> Level {
        Self::level_for(self.start_seen)
    }
}

// ── Buzzer ──────────────────────────────────────────────────────────────

/// Terminal bell. The pulse stays blocking like the hardware line: nothing
/// else runs while it sounds.
#[derive(Debug, Default)]
pub struct BellBuzzer;

impl Buzzer for BellBuzzer {
    fn pulse(&mut self, duration: Duration) {
        let mut stdout = io::stdout();
        let _ = stdout.write_all(b"\x07");
        let _ = stdout.flush();
        std::thread::sleep(duration);
    }
}

// ── View ────────────────────────────────────────────────────────────────

/// Draws the latched matrix plus a status line. Throttled so terminal I/O
/// does not starve the game loop.
pub struct TerminalView {
    stdout: io::Stdout,
    last_draw: Option<Instant>,
}

impl TerminalView {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last_draw: None,
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.stdout.queue(terminal::EnterAlternateScreen)?;
        self.stdout.queue(cursor::Hide)?;
        self.stdout.flush()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.stdout.queue(cursor::Show)?;
        self.stdout.queue(terminal::LeaveAlternateScreen)?;
        self.stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub fn draw(&mut self, pins: &TermPins, status: &str) -> Result<()> {
        if let Some(last) = self.last_draw {
            if last.elapsed() < Duration::from_millis(DRAW_INTERVAL_MS) {
                return Ok(());
            }
        }
        self.last_draw = Some(Instant::now());

        self.stdout.queue(cursor::MoveTo(0, 0))?;
        for row in pins.latched() {
            let mut line = String::with_capacity(SIZE * 2);
            for &lit in row {
                line.push_str(if lit { "O " } else { ". " });
            }
            self.stdout.queue(Print(line))?;
            self.stdout.queue(Print("\r\n"))?;
        }
        self.stdout
            .queue(terminal::Clear(terminal::ClearType::CurrentLine))?;
        self.stdout.queue(Print(status))?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalView {
    fn default() -> Self {
        Self::new()
    }
}
