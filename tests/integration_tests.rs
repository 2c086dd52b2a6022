//! Integration tests for the full game loop through the public API.

use std::time::Duration;

use matrix_pong::clock::ManualClock;
use matrix_pong::engine::GameState;
use matrix_pong::game::Game;
use matrix_pong::hal::{Buttons, Buzzer, Level, MatrixDriver, MatrixPins, Polarity, ScoreSink};
use matrix_pong::types::{SAMPLE_INTERVAL_MS, TICK_START_MS};

struct NullPins;

impl MatrixPins for NullPins {
    fn write_row(&mut self, _row: usize, _level: Level) {}
    fn write_col(&mut self, _col: usize, _level: Level) {}
}

#[derive(Default)]
struct SilentBuzzer {
    pulses: usize,
}

impl Buzzer for SilentBuzzer {
    fn pulse(&mut self, _duration: Duration) {
        self.pulses += 1;
    }
}

#[derive(Default)]
struct CapturedScores {
    scores: Vec<u32>,
}

impl ScoreSink for CapturedScores {
    fn report(&mut self, score: u32) {
        self.scores.push(score);
    }
}

struct ScriptedButtons {
    left: Level,
    right: Level,
    start: Level,
}

impl ScriptedButtons {
    fn idle() -> Self {
        Self {
            left: Level::High,
            right: Level::High,
            start: Level::High,
        }
    }
}

impl Buttons for ScriptedButtons {
    fn left(&mut self) -> Level {
        self.left
    }

    fn right(&mut self) -> Level {
        self.right
    }

    fn start(&mut self) -> Level {
        self.start
    }
}

fn game(seed: u32) -> Game<ManualClock, NullPins, SilentBuzzer, CapturedScores> {
    Game::new(
        GameState::new(seed),
        ManualClock::with_auto_advance_us(200),
        MatrixDriver::new(NullPins, Polarity::default()),
        SilentBuzzer::default(),
        CapturedScores::default(),
    )
}

/// Run polls at roughly the hardware sampling cadence until `done` holds.
fn poll_until(
    game: &mut Game<ManualClock, NullPins, SilentBuzzer, CapturedScores>,
    buttons: &mut ScriptedButtons,
    max_polls: u32,
    done: impl Fn(&GameState) -> bool,
) -> bool {
    for _ in 0..max_polls {
        game.poll(buttons);
        game.clock().advance_ms(SAMPLE_INTERVAL_MS);
        if done(game.state()) {
            return true;
        }
    }
    false
}

#[test]
fn test_untouched_paddle_catches_centered_serve() {
    // Seed 1 serves from column 4, within the default paddle's coverage.
    let mut game = game(1);
    let mut buttons = ScriptedButtons::idle();

    let scored = poll_until(&mut game, &mut buttons, 10_000, |s| s.score() > 0);
    assert!(scored, "serve over the paddle must be caught");
    assert!(!game.state().game_over());
    assert_eq!(game.state().score(), 1);
    // Scoring speeds the game up.
    assert_eq!(game.state().tick_interval_ms(), TICK_START_MS - 10);
}

#[test]
fn test_paddle_moved_away_misses_and_reports_score() {
    let mut game = game(1);
    let mut buttons = ScriptedButtons::idle();

    // Two press/release cycles walk the paddle from 3 to 1; the serve at
    // column 4 then falls outside its coverage.
    for round in 0..4 {
        buttons.left = if round % 2 == 0 { Level::Low } else { Level::High };
        for _ in 0..10 {
            game.poll(&mut buttons);
            game.clock().advance_ms(SAMPLE_INTERVAL_MS);
        }
    }
    buttons.left = Level::High;
    assert_eq!(game.state().paddle_x(), 1);

    let over = poll_until(&mut game, &mut buttons, 10_000, |s| s.game_over());
    assert!(over, "uncovered serve must end the game");
    assert_eq!(game.state().score(), 0);
    assert_eq!(game.sink().scores, vec![0]);
}

#[test]
fn test_restart_after_game_over_starts_a_fresh_game() {
    let mut game = game(1);
    let mut buttons = ScriptedButtons::idle();

    for round in 0..4 {
        buttons.left = if round % 2 == 0 { Level::Low } else { Level::High };
        for _ in 0..10 {
            game.poll(&mut buttons);
            game.clock().advance_ms(SAMPLE_INTERVAL_MS);
        }
    }
    buttons.left = Level::High;
    poll_until(&mut game, &mut buttons, 10_000, |s| s.game_over());
    assert!(game.state().game_over());

    buttons.start = Level::Low;
    game.poll(&mut buttons);
    buttons.start = Level::High;

    assert!(!game.state().game_over());
    assert_eq!(game.state().score(), 0);
    assert_eq!(game.state().paddle_x(), 3);
    assert_eq!(game.state().tick_interval_ms(), TICK_START_MS);

    // The new game is playable: this rng stream's second serve lands on
    // column 3, right over the untouched paddle.
    let caught = poll_until(&mut game, &mut buttons, 10_000, |s| s.score() > 0);
    assert!(caught);
    // One game ended so far, so exactly one report.
    assert_eq!(game.sink().scores.len(), 1);
}

#[test]
fn test_display_overlay_tracks_ball_and_paddle() {
    let mut game = game(1);
    let mut buttons = ScriptedButtons::idle();

    game.poll(&mut buttons);
    // Ball plus three paddle cells, nothing else.
    assert_eq!(game.buffer().lit_count(), 4);
    let ball = game.state().ball();
    assert!(game.buffer().get(ball.x, ball.y));
    for dx in -1..=1 {
        assert!(game.buffer().get(game.state().paddle_x() + dx, 7));
    }
}
