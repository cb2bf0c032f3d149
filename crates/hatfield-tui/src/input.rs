use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use hatfield_core::{Clock, Direction, InputEvent, InputSource};
use std::io;
use std::time::{Duration, Instant};

/// Reads key presses from the terminal
#[derive(Debug, Default)]
pub struct TerminalInput;

impl TerminalInput {
    /// Block until a key is pressed; releases, repeats and other events are skipped
    pub fn next_key(&mut self) -> io::Result<KeyEvent> {
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(key);
                }
            }
        }
    }
}

impl InputSource for TerminalInput {
    fn next_event(&mut self) -> io::Result<InputEvent> {
        self.next_key().map(key_to_event)
    }
}

/// Waits between replay steps while watching for a quit key; other keys are dropped
impl Clock for TerminalInput {
    fn delay(&mut self, duration: Duration) -> io::Result<bool> {
        let deadline = Instant::now() + duration;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if !event::poll(remaining)? {
                return Ok(false);
            }
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && is_quit_key(&key) {
                    return Ok(true);
                }
            }
        }
    }
}

pub fn is_quit_key(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        _ => false,
    }
}

/// Map a key press to a move. Any key that is neither a move nor a quit key
/// is passed on as an invalid token.
pub fn key_to_event(key: KeyEvent) -> InputEvent {
    if is_quit_key(&key) {
        return InputEvent::Quit;
    }
    match key.code {
        KeyCode::Left => InputEvent::Move(Direction::Left),
        KeyCode::Right => InputEvent::Move(Direction::Right),
        KeyCode::Up => InputEvent::Move(Direction::Up),
        KeyCode::Down => InputEvent::Move(Direction::Down),
        KeyCode::Char(c) => InputEvent::from_token(&c.to_string()),
        other => InputEvent::Invalid(format!("{:?}", other)),
    }
}
