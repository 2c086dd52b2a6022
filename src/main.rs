//! Terminal Matrix Pong runner (default binary).
//!
//! Wires the game core to the terminal frontend: latched-pin matrix view,
//! keyboard buttons, bell buzzer, and the HTTP score sink (falling back to
//! offline play when the scorekeeper is unreachable).

use anyhow::Result;
use log::info;

use matrix_pong::clock::MonotonicClock;
use matrix_pong::engine::GameState;
use matrix_pong::game::Game;
use matrix_pong::hal::{MatrixDriver, Polarity, ScoreSink};
use matrix_pong::report::{HttpScoreSink, OfflineSink, ReportConfig};
use matrix_pong::term::{BellBuzzer, KeyButtons, TermPins, TerminalView};

enum Sink {
    Online(HttpScoreSink),
    Offline(OfflineSink),
}

impl ScoreSink for Sink {
    fn report(&mut self, score: u32) {
        match self {
            Sink::Online(sink) => sink.report(score),
            Sink::Offline(sink) => sink.report(score),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let config = ReportConfig::from_env();
    let sink = match HttpScoreSink::connect(config) {
        Some(online) => Sink::Online(online),
        None => Sink::Offline(OfflineSink),
    };

    let mut view = TerminalView::new();
    view.enter()?;

    let result = run(&mut view, sink);

    // Always try to restore terminal state.
    let _ = view.exit();
    result
}

fn run(view: &mut TerminalView, sink: Sink) -> Result<()> {
    let seed = rand::random::<u32>();
    info!("starting game, rng seed {seed}");

    let polarity = Polarity::default();
    let mut game = Game::new(
        GameState::new(seed),
        MonotonicClock::new(),
        MatrixDriver::new(TermPins::new(polarity), polarity),
        BellBuzzer,
        sink,
    );
    let mut buttons = KeyButtons::new();

    loop {
        buttons.pump()?;
        if buttons.quit_requested() {
            return Ok(());
        }

        game.poll(&mut buttons);

        let status = if game.state().game_over() {
            format!(
                "GAME OVER  score {}  [R] restart  [Q] quit",
                game.state().score()
            )
        } else {
            format!(
                "score {}  [<-/->] or [A/D] move  [Q] quit",
                game.state().score()
            )
        };
        view.draw(game.driver().pins(), &status)?;
    }
}
