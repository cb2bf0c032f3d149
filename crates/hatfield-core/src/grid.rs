use serde::{Deserialize, Serialize};
use std::fmt;

/// Contents of a single field cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Open ground
    Empty,
    /// The hat
    Goal,
    /// A hole
    Hazard,
    /// A cell the player has already walked over
    VisitedPath,
    /// The cell the player is standing on
    CurrentPath,
}

impl Cell {
    /// Symbol used when printing the field
    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '░',
            Cell::Goal => '^',
            Cell::Hazard => 'O',
            Cell::VisitedPath => '*',
            Cell::CurrentPath => '@',
        }
    }

    /// Parse a printed symbol. `.` is accepted as an alternative for empty ground.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '░' | '.' => Some(Cell::Empty),
            '^' => Some(Cell::Goal),
            'O' => Some(Cell::Hazard),
            '*' => Some(Cell::VisitedPath),
            '@' => Some(Cell::CurrentPath),
            _ => None,
        }
    }

    pub fn is_path(self) -> bool {
        matches!(self, Cell::VisitedPath | Cell::CurrentPath)
    }
}

/// A coordinate on (or next to) the field.
///
/// Coordinates are signed so that a move off the edge is still representable;
/// [`Grid::cell_at`] reports such positions as absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: isize,
    pub y: isize,
}

impl Position {
    /// The fixed start cell
    pub const ORIGIN: Position = Position { x: 0, y: 0 };

    pub const fn new(x: isize, y: isize) -> Self {
        Self { x, y }
    }

    /// The adjacent position in `direction`
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the four cardinal moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Neighbor descriptor order
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Order in which the solvability walk examines directions
    pub const CANONICAL: [Direction; 4] = [
        Direction::Right,
        Direction::Left,
        Direction::Up,
        Direction::Down,
    ];

    /// `(dx, dy)` with y growing downwards
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Direction::Left => 0,
            Direction::Right => 1,
            Direction::Up => 2,
            Direction::Down => 3,
        }
    }

    /// Parse a typed move: `l`, `r`, `u`, `d` or the key names
    /// `left`, `right`, `up`, `down` (trimmed, case-insensitive).
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "l" | "left" => Some(Direction::Left),
            "r" | "right" => Some(Direction::Right),
            "u" | "up" => Some(Direction::Up),
            "d" | "down" => Some(Direction::Down),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::Left => "LEFT",
            Direction::Right => "RIGHT",
            Direction::Up => "UP",
            Direction::Down => "DOWN",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What lies one step away from a cell in some direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbor {
    /// `None` when `position` is off the field
    pub cell: Option<Cell>,
    pub position: Position,
}

impl Neighbor {
    /// On the field and not a hole
    pub fn is_open(&self) -> bool {
        matches!(self.cell, Some(cell) if cell != Cell::Hazard)
    }
}

/// The four neighbor descriptors of one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbors([Neighbor; 4]);

impl Neighbors {
    pub fn get(&self, direction: Direction) -> Neighbor {
        self.0[direction.index()]
    }

    /// Descriptors in LEFT, RIGHT, UP, DOWN order
    pub fn iter(&self) -> impl Iterator<Item = (Direction, Neighbor)> + '_ {
        Direction::ALL.into_iter().zip(self.0.iter().copied())
    }
}

/// The playing field: `height` rows of `width` cells, fixed for its lifetime
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    height: usize,
    width: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a field of open ground
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            cells: vec![Cell::Empty; height * width],
        }
    }

    /// Parse a field from printed rows.
    ///
    /// Rows must be non-empty and of equal length, and exactly one hat must be
    /// present.
    pub fn from_rows(rows: &[&str]) -> Option<Self> {
        let width = rows.first()?.chars().count();
        if width == 0 {
            return None;
        }

        let mut cells = Vec::with_capacity(rows.len() * width);
        for row in rows {
            let before = cells.len();
            for symbol in row.chars() {
                cells.push(Cell::from_symbol(symbol)?);
            }
            if cells.len() - before != width {
                return None;
            }
        }

        let goals = cells.iter().filter(|&&cell| cell == Cell::Goal).count();
        if goals != 1 {
            return None;
        }

        Some(Self {
            height: rows.len(),
            width,
            cells,
        })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if pos.x < 0 || pos.y < 0 {
            return None;
        }
        let (x, y) = (pos.x as usize, pos.y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.index(pos).is_some()
    }

    /// The cell at `pos`, or `None` when `pos` is off the field
    pub fn cell_at(&self, pos: Position) -> Option<Cell> {
        self.index(pos).map(|idx| self.cells[idx])
    }

    /// Overwrite a cell. Returns `false` (and changes nothing) off the field.
    pub fn set(&mut self, pos: Position, cell: Cell) -> bool {
        match self.index(pos) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Descriptors for the cells left, right, above and below `pos`
    pub fn neighbors(&self, pos: Position) -> Neighbors {
        Neighbors(Direction::ALL.map(|direction| {
            let position = pos.step(direction);
            Neighbor {
                cell: self.cell_at(position),
                position,
            }
        }))
    }

    /// Position of the hat, scanning row by row
    pub fn locate_goal(&self) -> Option<Position> {
        self.cells
            .iter()
            .position(|&cell| cell == Cell::Goal)
            .map(|idx| self.position_of(idx))
    }

    /// Mark `pos` as part of the walked path
    pub fn mark_path(&mut self, pos: Position, as_current: bool) -> bool {
        let cell = if as_current {
            Cell::CurrentPath
        } else {
            Cell::VisitedPath
        };
        self.set(pos, cell)
    }

    pub fn count_hazards(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell == Cell::Hazard).count()
    }

    /// Actual hole density, rounded down to a whole percent
    pub fn hazard_percentage(&self) -> u8 {
        let total = self.height * self.width;
        if total == 0 {
            return 0;
        }
        (self.count_hazards() * 100 / total) as u8
    }

    /// Whether random placement must skip `pos`: the hat, holes, path markers
    /// and the fixed start cell are taken. Positions off the field are taken too.
    pub fn is_reserved(&self, pos: Position) -> bool {
        match self.cell_at(pos) {
            Some(Cell::Empty) => pos == Position::ORIGIN,
            _ => true,
        }
    }

    /// Rows of the field, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.width.max(1))
    }

    fn position_of(&self, idx: usize) -> Position {
        Position::new((idx % self.width) as isize, (idx / self.width) as isize)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.rows().enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{}", cell.symbol())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_at_out_of_bounds() {
        let grid = Grid::from_rows(&["..", ".^"]).unwrap();

        assert_eq!(grid.cell_at(Position::new(1, 1)), Some(Cell::Goal));
        assert_eq!(grid.cell_at(Position::new(-1, 0)), None);
        assert_eq!(grid.cell_at(Position::new(0, -1)), None);
        assert_eq!(grid.cell_at(Position::new(2, 0)), None);
        assert_eq!(grid.cell_at(Position::new(0, 2)), None);
    }

    #[test]
    fn test_neighbors() {
        let grid = Grid::from_rows(&["O.", ".^"]).unwrap();
        let neighbors = grid.neighbors(Position::new(1, 0));

        assert_eq!(neighbors.get(Direction::Left).cell, Some(Cell::Hazard));
        assert_eq!(neighbors.get(Direction::Right).cell, None);
        assert_eq!(neighbors.get(Direction::Right).position, Position::new(2, 0));
        assert_eq!(neighbors.get(Direction::Up).cell, None);
        assert_eq!(neighbors.get(Direction::Down).cell, Some(Cell::Goal));
        assert!(neighbors.get(Direction::Down).is_open());
        assert!(!neighbors.get(Direction::Left).is_open());

        let order: Vec<Direction> = neighbors.iter().map(|(dir, _)| dir).collect();
        assert_eq!(order, Direction::ALL.to_vec());
    }

    #[test]
    fn test_locate_goal() {
        let grid = Grid::from_rows(&["...", "..O", "O^."]).unwrap();
        assert_eq!(grid.locate_goal(), Some(Position::new(1, 2)));
        assert_eq!(Grid::new(2, 2).locate_goal(), None);
    }

    #[test]
    fn test_from_rows_rejects_bad_input() {
        assert!(Grid::from_rows(&[]).is_none());
        assert!(Grid::from_rows(&[""]).is_none());
        assert!(Grid::from_rows(&["..", "."]).is_none(), "ragged rows");
        assert!(Grid::from_rows(&["..", ".."]).is_none(), "no hat");
        assert!(Grid::from_rows(&["^.", ".^"]).is_none(), "two hats");
        assert!(Grid::from_rows(&["^x"]).is_none(), "unknown symbol");
    }

    #[test]
    fn test_mark_path_and_hazards() {
        let mut grid = Grid::from_rows(&["░░O", "O░^"]).unwrap();
        assert_eq!(grid.count_hazards(), 2);
        assert_eq!(grid.hazard_percentage(), 33);

        assert!(grid.mark_path(Position::ORIGIN, true));
        assert!(grid.mark_path(Position::new(1, 0), false));
        assert!(!grid.mark_path(Position::new(5, 5), true));
        assert_eq!(grid.cell_at(Position::ORIGIN), Some(Cell::CurrentPath));
        assert_eq!(grid.cell_at(Position::new(1, 0)), Some(Cell::VisitedPath));
        assert_eq!(grid.to_string(), "@*O\nO░^");
    }

    #[test]
    fn test_is_reserved() {
        let grid = Grid::from_rows(&["..O", ".*^"]).unwrap();

        assert!(grid.is_reserved(Position::ORIGIN));
        assert!(grid.is_reserved(Position::new(2, 0)));
        assert!(grid.is_reserved(Position::new(1, 1)));
        assert!(grid.is_reserved(Position::new(2, 1)));
        assert!(grid.is_reserved(Position::new(3, 1)));
        assert!(!grid.is_reserved(Position::new(1, 0)));
        assert!(!grid.is_reserved(Position::new(0, 1)));
    }

    #[test]
    fn test_direction_tokens() {
        assert_eq!(Direction::from_token("l"), Some(Direction::Left));
        assert_eq!(Direction::from_token(" R\n"), Some(Direction::Right));
        assert_eq!(Direction::from_token("Up"), Some(Direction::Up));
        assert_eq!(Direction::from_token("down"), Some(Direction::Down));
        assert_eq!(Direction::from_token("x"), None);
        assert_eq!(Direction::from_token(""), None);
        assert_eq!(Position::ORIGIN.step(Direction::Up), Position::new(0, -1));
    }
}
