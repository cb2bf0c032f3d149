use crate::io::{Clock, Frame, InputEvent, InputSource, Mode, Renderer};
use crate::solver::{Walk, WalkStep};
use crate::{Cell, Direction, FieldError, FieldResult, Generator, Grid, Position, Solver};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings fixed for the lifetime of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub height: usize,
    pub width: usize,
    /// Requested share of holes, 0-100
    pub hazard_percentage: u8,
    /// Add 0-2 holes after every move
    pub hard_mode: bool,
    /// Replay the solvability walk instead of reading moves
    pub simulate: bool,
    /// Start on a random free cell instead of the top-left corner
    pub random_start: bool,
    /// Pause between replay steps
    pub step_delay_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            height: 10,
            width: 20,
            hazard_percentage: 20,
            hard_mode: false,
            simulate: false,
            random_start: false,
            step_delay_ms: 250,
        }
    }
}

impl SessionConfig {
    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }
}

/// Why a game was lost
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Loss {
    OutOfBounds,
    HazardHit,
    /// The player typed something that is not a direction
    InvalidInput(String),
}

/// How a session ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Lost(Loss),
    /// Holes added during a hard-mode replay cut the walk off from the hat
    NoSolution,
    Quit,
}

impl Outcome {
    pub fn is_win(&self) -> bool {
        matches!(self, Outcome::Won)
    }

    /// Text shown to the player
    pub fn message(&self) -> String {
        match self {
            Outcome::Won => "You found the hat! Congratulations!".to_string(),
            Outcome::Lost(Loss::OutOfBounds) => {
                "Sorry, you've fallen out of bounds. Please try again.".to_string()
            }
            Outcome::Lost(Loss::HazardHit) => {
                "Sorry, you fell down a hole. Please try again.".to_string()
            }
            Outcome::Lost(Loss::InvalidInput(_)) => {
                "Incorrect character. Please type: 'l','r','u', or 'd'".to_string()
            }
            Outcome::NoSolution => "The holes closed in: no way to the hat is left.".to_string(),
            Outcome::Quit => "Game abandoned.".to_string(),
        }
    }
}

/// Session life cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// A field is being drawn
    Generating,
    /// The new field is being checked for a way to the hat
    Verifying,
    /// Waiting for player moves
    Playing,
    /// Ready to show the solvability walk
    Replaying,
    Finished(Outcome),
}

/// The player's cell, plus the one they came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerPosition {
    pub current: Position,
    pub last: Position,
}

impl PlayerPosition {
    pub fn new(start: Position) -> Self {
        Self {
            current: start,
            last: start,
        }
    }

    fn advance(&mut self, direction: Direction) {
        self.last = self.current;
        self.current = self.current.step(direction);
    }
}

/// One game: a verified field, the player on it, and the rules that end it
pub struct Session {
    config: SessionConfig,
    grid: Grid,
    player: PlayerPosition,
    start: Position,
    moves: usize,
    regenerations: usize,
    phase: Phase,
    generator: Generator,
}

impl Session {
    /// Create a session on a fresh, solvable field
    pub fn new(config: SessionConfig) -> FieldResult<Self> {
        Self::generate(config, Generator::new())
    }

    /// Create a session on a fresh, solvable field drawn by `generator`.
    ///
    /// Unsolvable fields are thrown away and redrawn with the hole density
    /// they actually had, up to the generator's `max_regenerations`.
    pub fn generate(config: SessionConfig, generator: Generator) -> FieldResult<Self> {
        Generator::hazard_count(config.height, config.width, config.hazard_percentage)?;
        let mut session = Self {
            config,
            grid: Grid::new(config.height, config.width),
            player: PlayerPosition::new(Position::ORIGIN),
            start: Position::ORIGIN,
            moves: 0,
            regenerations: 0,
            phase: Phase::Generating,
            generator,
        };
        session.prepare()?;
        Ok(session)
    }

    /// Start a session on an existing field with the player at `(0, 0)`.
    /// The field is not checked for solvability.
    pub fn with_grid(config: SessionConfig, grid: Grid, generator: Generator) -> Self {
        Self {
            config,
            grid,
            player: PlayerPosition::new(Position::ORIGIN),
            start: Position::ORIGIN,
            moves: 0,
            regenerations: 0,
            phase: Self::ready_phase(&config),
            generator,
        }
    }

    fn ready_phase(config: &SessionConfig) -> Phase {
        if config.simulate {
            Phase::Replaying
        } else {
            Phase::Playing
        }
    }

    fn prepare(&mut self) -> FieldResult<()> {
        let solver = Solver::new();
        let limit = self.generator.config().max_regenerations;
        let mut hazard_percentage = self.config.hazard_percentage;

        loop {
            match self.phase {
                Phase::Generating => {
                    self.grid = self.generator.generate(
                        self.config.height,
                        self.config.width,
                        hazard_percentage,
                    )?;
                    self.start = if self.config.random_start {
                        self.generator.pick_start(&self.grid)?
                    } else {
                        Position::ORIGIN
                    };
                    self.phase = Phase::Verifying;
                }
                Phase::Verifying => {
                    if solver.can_solve(&self.grid, self.start) {
                        self.player = PlayerPosition::new(self.start);
                        self.phase = Self::ready_phase(&self.config);
                        return Ok(());
                    }
                    if self.regenerations >= limit {
                        return Err(FieldError::NoSolvableField {
                            attempts: self.regenerations + 1,
                        });
                    }
                    self.regenerations += 1;
                    hazard_percentage = self.grid.hazard_percentage();
                    self.phase = Phase::Generating;
                }
                Phase::Playing | Phase::Replaying | Phase::Finished(_) => return Ok(()),
            }
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Where the player stands (possibly off the field after a losing move)
    pub fn player(&self) -> Position {
        self.player.current
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn moves(&self) -> usize {
        self.moves
    }

    /// Unsolvable fields thrown away before this one
    pub fn regenerations(&self) -> usize {
        self.regenerations
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        match &self.phase {
            Phase::Finished(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn frame(&self, mode: Mode) -> Frame<'_> {
        Frame {
            grid: &self.grid,
            player: self.player.current,
            moves: self.moves,
            mode,
            hard_mode: self.config.hard_mode,
        }
    }

    /// Terminal check for the player's cell: off the field, in a hole, on the hat
    pub fn check_terminal(&self) -> Option<Outcome> {
        match self.grid.cell_at(self.player.current) {
            None => Some(Outcome::Lost(Loss::OutOfBounds)),
            Some(Cell::Hazard) => Some(Outcome::Lost(Loss::HazardHit)),
            Some(Cell::Goal) => Some(Outcome::Won),
            Some(_) => None,
        }
    }

    /// Move the player one cell and report the outcome if the game is over
    pub fn apply_move(&mut self, direction: Direction) -> Option<Outcome> {
        if let Some(outcome) = self.outcome() {
            return Some(outcome.clone());
        }
        self.player.advance(direction);
        self.moves += 1;
        let outcome = self.check_terminal()?;
        Some(self.finish(outcome))
    }

    /// Apply a player request. Anything but a direction ends the game.
    pub fn apply_input(&mut self, event: InputEvent) -> Option<Outcome> {
        match event {
            InputEvent::Move(direction) => self.apply_move(direction),
            InputEvent::Invalid(token) => Some(self.finish(Outcome::Lost(Loss::InvalidInput(token)))),
            InputEvent::Quit => Some(self.finish(Outcome::Quit)),
        }
    }

    fn finish(&mut self, outcome: Outcome) -> Outcome {
        self.phase = Phase::Finished(outcome.clone());
        outcome
    }

    /// Leave the old cell as trail and mark the player's cell
    fn mark_player(&mut self) {
        if self.player.last != self.player.current {
            self.grid.mark_path(self.player.last, false);
        }
        self.grid.mark_path(self.player.current, true);
    }

    fn inject_hazards(&mut self) -> usize {
        if self.config.hard_mode && self.moves > 0 {
            self.generator.add_random_hazards(&mut self.grid)
        } else {
            0
        }
    }

    /// Play with moves read from `input` until the game ends
    pub fn play<I, R>(&mut self, input: &mut I, renderer: &mut R) -> FieldResult<Outcome>
    where
        I: InputSource + ?Sized,
        R: Renderer + ?Sized,
    {
        if let Some(outcome) = self.outcome() {
            return Ok(outcome.clone());
        }
        if let Some(outcome) = self.check_terminal() {
            return Ok(self.finish(outcome));
        }
        self.phase = Phase::Playing;

        loop {
            self.mark_player();
            self.inject_hazards();
            renderer.render(&self.frame(Mode::Playing))?;

            let event = input.next_event()?;
            if let Some(outcome) = self.apply_input(event) {
                return Ok(outcome);
            }
        }
    }

    /// Walk toward the hat on its own, one rendered step at a time.
    /// The clock may stop the walk between steps ([`Outcome::Quit`]).
    ///
    /// In hard mode holes keep appearing, so the walk may end up with nowhere
    /// to go ([`Outcome::NoSolution`]) even though the field was solvable.
    pub fn replay<R, C>(&mut self, renderer: &mut R, clock: &mut C) -> FieldResult<Outcome>
    where
        R: Renderer + ?Sized,
        C: Clock + ?Sized,
    {
        if let Some(outcome) = self.outcome() {
            return Ok(outcome.clone());
        }
        if let Some(outcome) = self.check_terminal() {
            return Ok(self.finish(outcome));
        }
        let Some(goal) = self.grid.locate_goal() else {
            return Ok(self.finish(Outcome::NoSolution));
        };
        self.phase = Phase::Replaying;

        let mut walk = Walk::new(self.player.current, goal);
        self.mark_player();
        renderer.render(&self.frame(Mode::Replaying))?;

        loop {
            self.inject_hazards();

            match walk.step(&self.grid) {
                WalkStep::Arrived => return Ok(self.finish(Outcome::Won)),
                WalkStep::Stuck => return Ok(self.finish(Outcome::NoSolution)),
                WalkStep::Moved { direction, .. } => {
                    if let Some(outcome) = self.apply_move(direction) {
                        return Ok(outcome);
                    }
                    self.mark_player();
                    renderer.render(&self.frame(Mode::Replaying))?;
                    if clock.delay(self.config.step_delay())? {
                        return Ok(self.finish(Outcome::Quit));
                    }
                }
            }
        }
    }
}
