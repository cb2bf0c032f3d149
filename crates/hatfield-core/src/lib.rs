//! Hat Field game engine
//!
//! This crate provides the field model, a random field generator, the
//! greedy solvability walk and the game session that ties them together.
//! Drawing and input are left to the caller through the traits in [`io`].

mod error;
mod generator;
mod grid;
pub mod io;
mod session;
pub mod solver;

pub use error::{FieldError, FieldResult};
pub use generator::{Generator, GeneratorConfig, MAX_CELLS};
pub use grid::{Cell, Direction, Grid, Neighbor, Neighbors, Position};
pub use io::{Clock, Frame, InputEvent, InputSource, Mode, NoDelay, Renderer, SleepClock};
pub use session::{Loss, Outcome, Phase, PlayerPosition, Session, SessionConfig};
pub use solver::memo::{DirectionSet, LocationMemo, LocationRecord};
pub use solver::{hat_directions, Solution, Solver, Walk, WalkStep};
