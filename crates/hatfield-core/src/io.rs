//! Collaborators a [`crate::Session`] talks to: something that draws, something
//! that reads the player's moves and something that waits between replay steps.

use crate::{Direction, Grid, Position};
use std::io;
use std::time::Duration;

/// How the session is being driven
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// The player chooses every move
    Playing,
    /// The solvability walk is shown step by step
    Replaying,
}

/// Read-only view of a session handed to a [`Renderer`]
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub grid: &'a Grid,
    pub player: Position,
    pub moves: usize,
    pub mode: Mode,
    pub hard_mode: bool,
}

/// A player request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Move(Direction),
    /// Anything that is not a direction or a quit request
    Invalid(String),
    Quit,
}

impl InputEvent {
    /// Interpret a typed token; anything that is not a direction is invalid
    pub fn from_token(token: &str) -> Self {
        match Direction::from_token(token) {
            Some(direction) => InputEvent::Move(direction),
            None => InputEvent::Invalid(token.trim().to_string()),
        }
    }
}

/// Draws a frame. Called once per step while playing or replaying.
pub trait Renderer {
    fn render(&mut self, frame: &Frame<'_>) -> io::Result<()>;
}

/// Source of player moves. `next_event` blocks until one is available.
pub trait InputSource {
    fn next_event(&mut self) -> io::Result<InputEvent>;
}

/// Pauses between replay steps. `Ok(true)` means the wait was cut short by a
/// request to stop the replay.
pub trait Clock {
    fn delay(&mut self, duration: Duration) -> io::Result<bool>;
}

/// A clock that never waits
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

impl Clock for NoDelay {
    fn delay(&mut self, _duration: Duration) -> io::Result<bool> {
        Ok(false)
    }
}

/// Blocks the current thread
#[derive(Debug, Clone, Copy, Default)]
pub struct SleepClock;

impl Clock for SleepClock {
    fn delay(&mut self, duration: Duration) -> io::Result<bool> {
        std::thread::sleep(duration);
        Ok(false)
    }
}
