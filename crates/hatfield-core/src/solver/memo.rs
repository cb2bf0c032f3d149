//! Per-cell bookkeeping for the solvability walk.

use crate::{Direction, Neighbor, Neighbors, Position};
use std::collections::HashMap;

/// A small set of directions. Only ever grows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectionSet(u8);

impl DirectionSet {
    pub fn insert(&mut self, direction: Direction) {
        self.0 |= 1 << direction.index();
    }

    pub fn contains(&self, direction: Direction) -> bool {
        self.0 & (1 << direction.index()) != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn is_full(&self) -> bool {
        self.len() == Direction::ALL.len()
    }
}

/// What the walk knows about one visited cell
#[derive(Debug, Clone, Copy)]
pub struct LocationRecord {
    neighbors: Neighbors,
    banned: DirectionSet,
}

impl LocationRecord {
    pub fn neighbor(&self, direction: Direction) -> Neighbor {
        self.neighbors.get(direction)
    }

    pub fn neighbors(&self) -> &Neighbors {
        &self.neighbors
    }

    pub fn banned(&self) -> DirectionSet {
        self.banned
    }
}

/// Visited cells of a single walk, keyed by position
#[derive(Debug, Clone, Default)]
pub struct LocationMemo {
    records: HashMap<Position, LocationRecord>,
}

impl LocationMemo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the record for `pos` on first visit, otherwise replace its
    /// neighbor descriptors. Bans are kept either way.
    pub fn refresh(&mut self, pos: Position, neighbors: Neighbors) -> &LocationRecord {
        let record = self.records.entry(pos).or_insert(LocationRecord {
            neighbors,
            banned: DirectionSet::default(),
        });
        record.neighbors = neighbors;
        record
    }

    /// Rule out `direction` from `pos` for the rest of the walk.
    /// Does nothing for cells that were never visited.
    pub fn ban(&mut self, pos: Position, direction: Direction) {
        if let Some(record) = self.records.get_mut(&pos) {
            record.banned.insert(direction);
        }
    }

    pub fn is_banned(&self, pos: Position, direction: Direction) -> bool {
        self.records
            .get(&pos)
            .is_some_and(|record| record.banned.contains(direction))
    }

    /// Whether the walk has been at `pos`
    pub fn contains(&self, pos: Position) -> bool {
        self.records.contains_key(&pos)
    }

    pub fn get(&self, pos: Position) -> Option<&LocationRecord> {
        self.records.get(&pos)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cell, Grid};

    #[test]
    fn test_direction_set() {
        let mut set = DirectionSet::default();
        assert!(set.is_empty());

        set.insert(Direction::Up);
        set.insert(Direction::Up);
        set.insert(Direction::Left);
        assert_eq!(set.len(), 2);
        assert!(set.contains(Direction::Up));
        assert!(!set.contains(Direction::Down));

        set.insert(Direction::Right);
        set.insert(Direction::Down);
        assert!(set.is_full());
    }

    #[test]
    fn test_refresh_keeps_bans() {
        let mut grid = Grid::from_rows(&["...", "..^"]).unwrap();
        let here = Position::new(1, 0);
        let mut memo = LocationMemo::new();

        memo.refresh(here, grid.neighbors(here));
        memo.ban(here, Direction::Right);
        assert!(memo.is_banned(here, Direction::Right));

        grid.set(Position::new(1, 1), Cell::Hazard);
        let record = memo.refresh(here, grid.neighbors(here));

        assert_eq!(record.neighbor(Direction::Down).cell, Some(Cell::Hazard));
        assert!(record.banned().contains(Direction::Right));
        assert_eq!(memo.len(), 1);
    }

    #[test]
    fn test_ban_unvisited_is_ignored() {
        let mut memo = LocationMemo::new();
        memo.ban(Position::ORIGIN, Direction::Left);

        assert!(!memo.contains(Position::ORIGIN));
        assert!(!memo.is_banned(Position::ORIGIN, Direction::Left));
        assert!(memo.is_empty());
    }
}
