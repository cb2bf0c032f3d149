use crate::{Direction, Position};
use serde::{Deserialize, Serialize};

/// Result of advancing a [`super::Walk`] by one step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkStep {
    /// The walk is standing on the hat
    Arrived,
    /// No unbanned direction is left from the current cell
    Stuck,
    /// The walk moved one cell
    Moved {
        from: Position,
        to: Position,
        direction: Direction,
    },
}

impl WalkStep {
    pub fn is_finished(&self) -> bool {
        !matches!(self, WalkStep::Moved { .. })
    }
}

/// Outcome of a full solvability check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    /// Whether the walk reached the hat
    pub solved: bool,
    /// Every move the walk made, in order (including moves into dead ends)
    pub path: Vec<Direction>,
    /// Number of distinct cells the walk visited
    pub visited: usize,
}

impl Solution {
    /// Where following `path` from `start` ends up
    pub fn end_position(&self, start: Position) -> Position {
        self.path.iter().fold(start, |pos, &dir| pos.step(dir))
    }
}
