use crate::{Cell, FieldError, FieldResult, Grid, Position};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Largest field, in cells, that [`Generator::generate`] will build
pub const MAX_CELLS: usize = 1_000_000;

/// Configuration for field generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Random draws tried before falling back to a scan of the free cells
    pub max_placement_attempts: usize,
    /// Fields a session may throw away as unsolvable before giving up
    pub max_regenerations: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_placement_attempts: 10_000,
            max_regenerations: 1_000,
        }
    }
}

/// Random field generator.
///
/// Cells are placed uniformly at random with rejection sampling; there is no
/// maze structure. Solvability is checked separately by [`crate::Solver`].
pub struct Generator {
    config: GeneratorConfig,
    rng: StdRng,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    /// Create a new generator seeded from the OS
    pub fn new() -> Self {
        Self::with_config(GeneratorConfig::default())
    }

    /// Create a generator with custom configuration
    pub fn with_config(config: GeneratorConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a generator with a specific seed for reproducibility
    pub fn with_seed(seed: u64) -> Self {
        Self::with_config_and_seed(GeneratorConfig::default(), seed)
    }

    pub fn with_config_and_seed(config: GeneratorConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Number of holes a `height` x `width` field gets at `hazard_percentage`,
    /// after checking that such a field can be built at all: both sides at
    /// least 1, at most [`MAX_CELLS`] cells, a percentage of 0-100, and room
    /// for the hat and every hole next to the reserved start cell.
    pub fn hazard_count(height: usize, width: usize, hazard_percentage: u8) -> FieldResult<usize> {
        if height == 0 || width == 0 {
            return Err(FieldError::InvalidConfig(format!(
                "field must be at least 1x1, got {}x{}",
                height, width
            )));
        }
        let cells = match height.checked_mul(width) {
            Some(cells) if cells <= MAX_CELLS => cells,
            _ => {
                return Err(FieldError::InvalidConfig(format!(
                    "field of {}x{} is larger than {} cells",
                    height, width, MAX_CELLS
                )))
            }
        };
        if hazard_percentage > 100 {
            return Err(FieldError::InvalidConfig(format!(
                "hole percentage must be 0-100, got {}",
                hazard_percentage
            )));
        }

        let hazards = cells * hazard_percentage as usize / 100;
        let free = cells - 1;
        if hazards + 1 > free {
            return Err(FieldError::InvalidConfig(format!(
                "a {}x{} field has {} free cells besides the start, \
                 but the hat and {} holes need {}",
                height,
                width,
                free,
                hazards,
                hazards + 1
            )));
        }
        Ok(hazards)
    }

    /// Generate a `height` x `width` field with one hat and
    /// `floor(height * width * hazard_percentage / 100)` holes.
    ///
    /// The start cell `(0, 0)` is always left open.
    pub fn generate(
        &mut self,
        height: usize,
        width: usize,
        hazard_percentage: u8,
    ) -> FieldResult<Grid> {
        let hazard_count = Self::hazard_count(height, width, hazard_percentage)?;
        let mut grid = Grid::new(height, width);

        let goal = self.pick_empty_location(&grid)?;
        grid.set(goal, Cell::Goal);

        for _ in 0..hazard_count {
            let hole = self.pick_empty_location(&grid)?;
            grid.set(hole, Cell::Hazard);
        }

        Ok(grid)
    }

    /// Draw uniform random cells until one is not reserved
    /// (see [`Grid::is_reserved`]). When the draws run out the free cells are
    /// scanned, so this only fails on a field with no free cell left.
    pub fn pick_empty_location(&mut self, grid: &Grid) -> FieldResult<Position> {
        self.try_pick(grid).ok_or(FieldError::GenerationExhausted {
            attempts: self.config.max_placement_attempts,
        })
    }

    /// Pick a random start cell for sessions that do not start in the corner
    pub fn pick_start(&mut self, grid: &Grid) -> FieldResult<Position> {
        self.pick_empty_location(grid)
    }

    /// Add 0, 1 or 2 holes at random free cells; returns how many were placed.
    ///
    /// Stops early when the field has no free cell left.
    pub fn add_random_hazards(&mut self, grid: &mut Grid) -> usize {
        let wanted = self.rng.gen_range(0..=2);
        let mut placed = 0;
        for _ in 0..wanted {
            match self.try_pick(grid) {
                Some(pos) => {
                    grid.set(pos, Cell::Hazard);
                    placed += 1;
                }
                None => break,
            }
        }
        placed
    }

    fn try_pick(&mut self, grid: &Grid) -> Option<Position> {
        if grid.width() == 0 || grid.height() == 0 {
            return None;
        }
        for _ in 0..self.config.max_placement_attempts {
            let pos = Position::new(
                self.rng.gen_range(0..grid.width()) as isize,
                self.rng.gen_range(0..grid.height()) as isize,
            );
            if !grid.is_reserved(pos) {
                return Some(pos);
            }
        }

        let free: Vec<Position> = (0..grid.height())
            .flat_map(|y| (0..grid.width()).map(move |x| Position::new(x as isize, y as isize)))
            .filter(|&pos| !grid.is_reserved(pos))
            .collect();
        free.choose(&mut self.rng).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(grid: &Grid, wanted: Cell) -> usize {
        grid.rows()
            .flat_map(|row| row.iter())
            .filter(|&&cell| cell == wanted)
            .count()
    }

    #[test]
    fn test_generate_invariants() {
        let mut generator = Generator::with_seed(42);

        for (height, width, pct) in [(10, 20, 20), (5, 10, 50), (3, 3, 30), (1, 8, 0), (20, 1, 40)] {
            for _ in 0..20 {
                let grid = generator.generate(height, width, pct).unwrap();
                let expected_holes = height * width * pct as usize / 100;

                assert_eq!(grid.height(), height);
                assert_eq!(grid.width(), width);
                assert_eq!(count(&grid, Cell::Goal), 1);
                assert_eq!(grid.count_hazards(), expected_holes);
                assert_eq!(grid.cell_at(Position::ORIGIN), Some(Cell::Empty));
            }
        }
    }

    #[test]
    fn test_generate_is_reproducible() {
        let a = Generator::with_seed(7).generate(8, 12, 25).unwrap();
        let b = Generator::with_seed(7).generate(8, 12, 25).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_generate_rejects_bad_config() {
        let mut generator = Generator::with_seed(1);
        assert!(matches!(
            generator.generate(0, 5, 10),
            Err(FieldError::InvalidConfig(_))
        ));
        assert!(matches!(
            generator.generate(5, 5, 101),
            Err(FieldError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_generate_rejects_layouts_that_cannot_fit() {
        let mut generator = Generator::with_seed(1);

        // 4 cells: start + hat + 4 holes cannot fit
        assert!(matches!(
            generator.generate(2, 2, 100),
            Err(FieldError::InvalidConfig(_))
        ));
        // A single cell is the start and has no room for a hat
        assert!(matches!(
            generator.generate(1, 1, 0),
            Err(FieldError::InvalidConfig(_))
        ));
        // 2x2 at 50%: start, hat and 2 holes fill it exactly
        assert_eq!(Generator::hazard_count(2, 2, 50).unwrap(), 2);
        assert!(generator.generate(2, 2, 50).is_ok());
    }

    #[test]
    fn test_generate_rejects_oversized_fields() {
        let mut generator = Generator::with_seed(1);

        assert!(matches!(
            generator.generate(usize::MAX / 2, 3, 10),
            Err(FieldError::InvalidConfig(_))
        ));
        assert!(matches!(
            generator.generate(usize::MAX, 2, 10),
            Err(FieldError::InvalidConfig(_))
        ));
        assert!(matches!(
            generator.generate(1001, 1000, 0),
            Err(FieldError::InvalidConfig(_))
        ));
        assert!(Generator::hazard_count(1000, 1000, 20).is_ok());
    }

    #[test]
    fn test_dense_field_with_few_draws() {
        let mut generator = Generator::with_config_and_seed(
            GeneratorConfig {
                max_placement_attempts: 1,
                ..GeneratorConfig::default()
            },
            4,
        );

        // 99 free cells for the hat and 98 holes
        let grid = generator.generate(10, 10, 98).unwrap();
        assert_eq!(grid.count_hazards(), 98);
        assert_eq!(count(&grid, Cell::Goal), 1);
        assert_eq!(grid.cell_at(Position::ORIGIN), Some(Cell::Empty));
    }

    #[test]
    fn test_pick_on_full_field_is_exhausted() {
        let mut generator = Generator::with_config(GeneratorConfig {
            max_placement_attempts: 200,
            ..GeneratorConfig::default()
        });
        let grid = Grid::from_rows(&[".^", "OO"]).unwrap();

        assert!(matches!(
            generator.pick_empty_location(&grid),
            Err(FieldError::GenerationExhausted { attempts: 200 })
        ));
    }

    #[test]
    fn test_add_random_hazards() {
        let mut generator = Generator::with_seed(3);
        let mut grid = generator.generate(6, 6, 0).unwrap();
        let standing = generator.pick_empty_location(&grid).unwrap();
        grid.mark_path(standing, true);

        let mut total = 0;
        for _ in 0..10 {
            let placed = generator.add_random_hazards(&mut grid);
            assert!(placed <= 2);
            total += placed;
        }

        assert_eq!(grid.count_hazards(), total);
        assert_eq!(count(&grid, Cell::Goal), 1);
        assert_eq!(grid.cell_at(Position::ORIGIN), Some(Cell::Empty));
        assert_eq!(grid.cell_at(standing), Some(Cell::CurrentPath));
    }

    #[test]
    fn test_add_random_hazards_on_full_field() {
        let mut generator = Generator::with_config(GeneratorConfig {
            max_placement_attempts: 50,
            ..GeneratorConfig::default()
        });
        let mut grid = Grid::from_rows(&[".^"]).unwrap();

        for _ in 0..5 {
            assert_eq!(generator.add_random_hazards(&mut grid), 0);
        }
    }
}
