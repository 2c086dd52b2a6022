//! Matrix Pong: a single-threaded paddle game on an 8x8 LED matrix.
//!
//! One control thread owns everything. Periodic work (row strobing, input
//! sampling, physics ticks) runs as cooperative due-checks against an
//! injected monotonic clock; nothing blocks except the deliberately
//! synchronous game-over sequences. The hardware edge is a small set of
//! traits in [`hal`], with a terminal-backed implementation in [`term`]
//! for playing on a host.

pub mod clock;
pub mod display;
pub mod engine;
pub mod game;
pub mod hal;
pub mod input;
pub mod render;
pub mod report;
pub mod term;
pub mod types;
