//! The outer-loop orchestrator.
//!
//! One control thread, no scheduler: every iteration calls each periodic
//! service (row strobe, input sampling, physics tick) and lets the service's
//! own due-check decide whether anything happens. The only blocking paths
//! are the buzzer pulses and the two game-over sequences, which pump the
//! multiplexer themselves.

use std::time::Duration;

use crate::clock::Clock;
use crate::display::{DisplayBuffer, Multiplexer};
use crate::engine::GameState;
use crate::hal::{Buttons, Buzzer, MatrixDriver, MatrixPins, ScoreSink};
use crate::input::Debouncer;
use crate::render::{death_animation, scroll_score};
use crate::types::{Position, TickOutcome, PULSE_GAME_OVER_MS, PULSE_SCORE_MS, RESTART_SETTLE_MS};

pub struct Game<C, P, B, S> {
    fb: DisplayBuffer,
    mux: Multiplexer,
    debouncer: Debouncer,
    state: GameState,
    clock: C,
    driver: MatrixDriver<P>,
    buzzer: B,
    sink: S,
}

impl<C, P, B, S> Game<C, P, B, S>
where
    C: Clock,
    P: MatrixPins,
    B: Buzzer,
    S: ScoreSink,
{
    pub fn new(state: GameState, clock: C, driver: MatrixDriver<P>, buzzer: B, sink: S) -> Self {
        Self {
            fb: DisplayBuffer::new(),
            mux: Multiplexer::new(),
            debouncer: Debouncer::new(),
            state,
            clock,
            driver,
            buzzer,
            sink,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn buffer(&self) -> &DisplayBuffer {
        &self.fb
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn driver(&self) -> &MatrixDriver<P> {
        &self.driver
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// One outer-loop iteration: strobe a row, sample input, advance the
    /// game if a tick is due, then redraw the overlay from current state.
    pub fn poll(&mut self, buttons: &mut impl Buttons) {
        self.mux.refresh(&self.fb, &mut self.driver, &self.clock);

        // Restart is a direct read, not debounced: in GameOver a single low
        // sample triggers reset, then a settle hold rides out the bounce.
        if self.state.game_over() && buttons.start().is_low() {
            self.mux
                .hold(RESTART_SETTLE_MS, &self.fb, &mut self.driver, &self.clock);
            self.state.reset();
            self.fb.clear();
        }

        for action in self
            .debouncer
            .poll(buttons.left(), buttons.right(), &self.clock)
        {
            self.state.apply_action(action);
        }

        if let Some(outcome) = self.state.tick(&self.clock) {
            match outcome {
                TickOutcome::Advanced => {}
                TickOutcome::Scored => {
                    self.buzzer.pulse(Duration::from_millis(PULSE_SCORE_MS));
                }
                TickOutcome::Missed(impact) => self.run_game_over(impact),
            }
        }

        self.state.draw(&mut self.fb);
    }

    /// Terminal-state sequence, synchronous and uncancellable: long pulse,
    /// death animation, one score report, scrolling score text.
    fn run_game_over(&mut self, impact: Position) {
        self.buzzer.pulse(Duration::from_millis(PULSE_GAME_OVER_MS));
        death_animation(
            impact,
            &mut self.fb,
            &mut self.mux,
            &mut self.driver,
            &self.clock,
        );
        self.sink.report(self.state.score());
        scroll_score(
            self.state.score(),
            &mut self.fb,
            &mut self.mux,
            &mut self.driver,
            &self.clock,
        );
    }
}
