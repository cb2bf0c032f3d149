use crate::input::{is_quit_key, TerminalInput};
use crate::render::{Tally, TerminalRenderer};
use crate::settings::Settings;
use crossterm::event::{KeyCode, KeyEvent};
use hatfield_core::{FieldResult, Generator, Outcome, Session};
use std::io::Write;

/// Result of handling a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Continue,
    NewRound,
    Quit,
}

/// Current screen state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenState {
    /// A round is being played or replayed
    Playing,
    /// Outcome screen after a round
    Finished,
}

/// The main application state
pub struct App<W: Write> {
    settings: Settings,
    /// Base seed; round `n` uses `seed + n`
    seed: Option<u64>,
    round: u64,
    pub tally: Tally,
    pub screen_state: ScreenState,
    renderer: TerminalRenderer<W>,
    input: TerminalInput,
}

impl<W: Write> App<W> {
    pub fn new(settings: Settings, seed: Option<u64>, out: W) -> Self {
        Self {
            renderer: TerminalRenderer::new(out, settings.theme.theme()),
            settings,
            seed,
            round: 0,
            tally: Tally::default(),
            screen_state: ScreenState::Playing,
            input: TerminalInput,
        }
    }

    /// Play rounds until the player quits
    pub fn run(&mut self) -> anyhow::Result<()> {
        loop {
            let mut session = self.new_session()?;
            self.screen_state = ScreenState::Playing;
            self.renderer.set_message(regeneration_message(session.regenerations()));

            let outcome = if session.config().simulate {
                session.replay(&mut self.renderer, &mut self.input)?
            } else {
                session.play(&mut self.input, &mut self.renderer)?
            };
            if outcome == Outcome::Quit {
                return Ok(());
            }
            self.record(&outcome);

            self.screen_state = ScreenState::Finished;
            self.renderer.set_message(None);
            self.renderer
                .render_end_screen(session.grid(), session.moves(), &outcome, self.tally)?;

            loop {
                let key = self.input.next_key()?;
                match self.handle_key(key) {
                    AppAction::Continue => {}
                    AppAction::NewRound => break,
                    AppAction::Quit => return Ok(()),
                }
            }
        }
    }

    fn new_session(&mut self) -> FieldResult<Session> {
        let generator = generator_for_round(self.seed, self.round);
        self.round += 1;
        Session::generate(self.settings.session, generator)
    }

    fn record(&mut self, outcome: &Outcome) {
        if outcome.is_win() {
            self.tally.wins += 1;
        } else {
            self.tally.losses += 1;
        }
    }

    /// Handle a key press on the outcome screen
    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        if self.screen_state != ScreenState::Finished {
            return AppAction::Continue;
        }
        if is_quit_key(&key) {
            return AppAction::Quit;
        }
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('n') => AppAction::NewRound,
            _ => AppAction::Continue,
        }
    }
}

fn generator_for_round(seed: Option<u64>, round: u64) -> Generator {
    match seed {
        Some(seed) => Generator::with_seed(seed.wrapping_add(round)),
        None => Generator::new(),
    }
}

fn regeneration_message(regenerations: usize) -> Option<String> {
    match regenerations {
        0 => None,
        1 => Some("Field regenerated once".to_string()),
        n => Some(format!("Field regenerated {} times", n)),
    }
}
