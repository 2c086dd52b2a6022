//! Game engine: ball, paddle, score, and the speed ramp.
//!
//! Two states: Playing and GameOver. Physics advances on a fixed tick whose
//! interval shrinks as the score grows; the only way out of GameOver is an
//! explicit `reset`. The overlay redraw is separate from the tick so paddle
//! motion stays responsive between physics steps.

use crate::clock::Clock;
use crate::display::DisplayBuffer;
use crate::types::{
    GameAction, Position, TickOutcome, MATRIX_SIZE, PADDLE_MAX_X, PADDLE_MIN_X, PADDLE_ROW,
    TICK_FLOOR_MS, TICK_START_MS, TICK_STEP_MS,
};

/// Simple LCG (Numerical Recipes constants), deterministic per seed.
///
/// Used only for serve-column picks; the process seeds it once from OS
/// entropy so two power-ups do not replay the same game.
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    pub fn new(seed: u32) -> Self {
        // A zero state would stay degenerate for the first draws.
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        self.state
    }

    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }
}

/// Complete game state, owned exclusively by the engine.
#[derive(Debug, Clone)]
pub struct GameState {
    paddle_x: i8,
    ball: Position,
    dir_x: i8,
    dir_y: i8,
    score: u32,
    game_over: bool,
    tick_interval_ms: u64,
    last_tick_us: Option<u64>,
    rng: SimpleRng,
}

impl GameState {
    /// Create a fresh game. The seed fixes the serve-column sequence.
    pub fn new(seed: u32) -> Self {
        let mut state = Self {
            paddle_x: 0,
            ball: Position::new(0, 0),
            dir_x: 0,
            dir_y: 1,
            score: 0,
            game_over: false,
            tick_interval_ms: TICK_START_MS,
            last_tick_us: None,
            rng: SimpleRng::new(seed),
        };
        state.reset();
        state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn paddle_x(&self) -> i8 {
        self.paddle_x
    }

    pub fn ball(&self) -> Position {
        self.ball
    }

    pub fn direction(&self) -> (i8, i8) {
        (self.dir_x, self.dir_y)
    }

    pub fn tick_interval_ms(&self) -> u64 {
        self.tick_interval_ms
    }

    /// Start a new game: paddle centered, ball served from a random column
    /// at the top, straight down, score and speed ramp back to initial.
    pub fn reset(&mut self) {
        self.paddle_x = 3;
        self.ball = Position::new(self.rng.next_range(MATRIX_SIZE as u32) as i8, 0);
        self.dir_x = 0;
        self.dir_y = 1;
        self.score = 0;
        self.game_over = false;
        self.tick_interval_ms = TICK_START_MS;
    }

    /// Shift the paddle one column, clamped so all 3 cells stay on-board.
    pub fn apply_action(&mut self, action: GameAction) {
        self.paddle_x = match action {
            GameAction::MoveLeft => (self.paddle_x - 1).max(PADDLE_MIN_X),
            GameAction::MoveRight => (self.paddle_x + 1).min(PADDLE_MAX_X),
        };
    }

    /// Advance physics if the tick interval has elapsed. No-op in GameOver.
    pub fn tick(&mut self, clock: &impl Clock) -> Option<TickOutcome> {
        let now = clock.now_us();
        if let Some(last) = self.last_tick_us {
            if now.wrapping_sub(last) < self.tick_interval_ms * 1_000 {
                return None;
            }
        }
        self.last_tick_us = Some(now);

        if self.game_over {
            return None;
        }
        Some(self.advance())
    }

    /// One physics step: move, reflect off walls, resolve the bottom row.
    ///
    /// Public so tests and benches can drive physics without a clock.
    pub fn advance(&mut self) -> TickOutcome {
        self.ball.x += self.dir_x;
        if self.ball.x < 0 {
            self.ball.x = 0;
            self.dir_x = -self.dir_x;
        }
        if self.ball.x > MATRIX_SIZE - 1 {
            self.ball.x = MATRIX_SIZE - 1;
            self.dir_x = -self.dir_x;
        }

        self.ball.y += self.dir_y;
        if self.ball.y < 0 {
            // The ball cannot exit through the top.
            self.ball.y = 0;
            self.dir_y = -self.dir_y;
        }

        if self.ball.y >= PADDLE_ROW {
            if (self.ball.x - self.paddle_x).abs() <= 1 {
                self.score += 1;
                self.tick_interval_ms = self
                    .tick_interval_ms
                    .saturating_sub(TICK_STEP_MS)
                    .max(TICK_FLOOR_MS);
                self.ball.y = PADDLE_ROW - 1;
                self.dir_y = -1;
                // Deflection is deliberately un-normalized: off-center hits
                // leave at sharper angles.
                self.dir_x = self.ball.x - self.paddle_x;
                TickOutcome::Scored
            } else {
                self.game_over = true;
                TickOutcome::Missed(self.ball)
            }
        } else {
            TickOutcome::Advanced
        }
    }

    /// Put the ball one step above the bottom row, falling straight down,
    /// with a chosen score. Lets orchestrator tests force the next tick to
    /// resolve a hit or a miss.
    #[cfg(test)]
    pub(crate) fn stage_bottom_approach(&mut self, ball_x: i8, score: u32) {
        self.ball = Position::new(ball_x, PADDLE_ROW - 1);
        self.dir_x = 0;
        self.dir_y = 1;
        self.score = score;
    }

    /// Overlay redraw: ball plus the 3-cell paddle, from current state.
    ///
    /// Runs every outer-loop iteration regardless of tick cadence, so the
    /// paddle tracks input between physics steps.
    pub fn draw(&self, fb: &mut DisplayBuffer) {
        fb.clear();
        fb.set(self.ball.x, self.ball.y, true);
        fb.set(self.paddle_x - 1, PADDLE_ROW, true);
        fb.set(self.paddle_x, PADDLE_ROW, true);
        fb.set(self.paddle_x + 1, PADDLE_ROW, true);
    }
}
