//! Solvability walk.
//!
//! A greedy walk from the start cell toward the hat. It prefers directions
//! that close the distance to the hat, then cells it has not been to, and
//! bans every direction it takes (and every direction into a hole or off the
//! field) for good. There is no explicit backtracking stack: revisiting a cell
//! from another side simply tries that cell's remaining exits. Since each move
//! consumes one (cell, direction) pair, a walk ends after at most
//! `4 * height * width` moves, either on the hat or on a cell with nothing left
//! to try.

pub mod memo;
mod types;

use crate::{Cell, Direction, Grid, Position};
use memo::LocationMemo;

pub use types::{Solution, WalkStep};

/// Directions that reduce the distance to the hat: at most one horizontal
/// (listed first) and one vertical. An axis already lined up contributes none.
pub fn hat_directions(from: Position, goal: Position) -> Vec<Direction> {
    let mut directions = Vec::with_capacity(2);
    if goal.x > from.x {
        directions.push(Direction::Right);
    } else if goal.x < from.x {
        directions.push(Direction::Left);
    }
    if goal.y > from.y {
        directions.push(Direction::Down);
    } else if goal.y < from.y {
        directions.push(Direction::Up);
    }
    directions
}

/// An in-progress walk that can be advanced one move at a time.
///
/// The grid is passed to every [`Walk::step`] so it may change between steps
/// (hard mode adds holes while a replay is running).
#[derive(Debug, Clone)]
pub struct Walk {
    position: Position,
    goal: Position,
    memo: LocationMemo,
    path: Vec<Direction>,
    solved: bool,
}

impl Walk {
    pub fn new(start: Position, goal: Position) -> Self {
        Self {
            position: start,
            goal,
            memo: LocationMemo::new(),
            path: Vec::new(),
            solved: false,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn memo(&self) -> &LocationMemo {
        &self.memo
    }

    pub fn path(&self) -> &[Direction] {
        &self.path
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    /// Advance the walk by one move
    pub fn step(&mut self, grid: &Grid) -> WalkStep {
        let here = self.position;
        let mut candidates = hat_directions(here, self.goal);

        let record = *self.memo.refresh(here, grid.neighbors(here));

        for direction in Direction::CANONICAL {
            if !record.neighbor(direction).is_open() {
                self.memo.ban(here, direction);
            }
            if self.memo.is_banned(here, direction) {
                candidates.retain(|&d| d != direction);
            } else if !candidates.contains(&direction) {
                candidates.push(direction);
            }
        }

        if grid.cell_at(here) == Some(Cell::Goal) {
            self.solved = true;
            return WalkStep::Arrived;
        }

        if candidates.is_empty() {
            return WalkStep::Stuck;
        }

        // Stable: ties keep hat-first, then canonical order
        candidates.sort_by_key(|&d| self.memo.contains(record.neighbor(d).position));
        let direction = candidates[0];

        self.memo.ban(here, direction);
        self.position = record.neighbor(direction).position;
        self.path.push(direction);

        WalkStep::Moved {
            from: here,
            to: self.position,
            direction,
        }
    }
}

/// Unit struct solver, all state is per-call.
pub struct Solver;

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver {
    pub fn new() -> Self {
        Self
    }

    /// Walk from `start` on an unchanging grid until the hat is reached or the
    /// walk gets stuck. A grid without a hat is unsolvable.
    pub fn solve(&self, grid: &Grid, start: Position) -> Solution {
        let Some(goal) = grid.locate_goal() else {
            return Solution {
                solved: false,
                path: Vec::new(),
                visited: 0,
            };
        };

        let mut walk = Walk::new(start, goal);
        while !walk.step(grid).is_finished() {}

        Solution {
            solved: walk.is_solved(),
            visited: walk.memo().len(),
            path: walk.path,
        }
    }

    /// Check if the hat can be reached from `start`
    pub fn can_solve(&self, grid: &Grid, start: Position) -> bool {
        self.solve(grid, start).solved
    }
}
