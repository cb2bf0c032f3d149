//! Basic example of using the Hat Field engine

use hatfield_core::{
    Frame, Generator, Grid, NoDelay, Position, Renderer, Session, SessionConfig, Solver,
};
use std::io;

/// Prints every frame to stdout
struct PrintRenderer;

impl Renderer for PrintRenderer {
    fn render(&mut self, frame: &Frame<'_>) -> io::Result<()> {
        println!("Move {}:\n{}\n", frame.moves, frame.grid);
        Ok(())
    }
}

fn main() {
    // Generate a field
    println!("Generating a 6x10 field with 25% holes...\n");
    let mut generator = Generator::with_seed(2024);
    let field = match generator.generate(6, 10, 25) {
        Ok(field) => field,
        Err(e) => {
            eprintln!("Generation failed: {}", e);
            return;
        }
    };
    println!("{}\n", field);
    println!("Holes: {} ({}%)", field.count_hazards(), field.hazard_percentage());

    // Check it
    let solver = Solver::new();
    let solution = solver.solve(&field, Position::ORIGIN);
    if solution.solved {
        let moves: Vec<String> = solution.path.iter().map(|d| d.to_string()).collect();
        println!("Solvable in {} moves: {}\n", solution.path.len(), moves.join(" "));
    } else {
        println!("Not solvable from the corner\n");
    }

    // Parse a field from rows
    let parsed = Grid::from_rows(&["..O^", ".O..", "...."]);
    if let Some(grid) = parsed {
        println!("--- Replaying a parsed field ---\n");
        let config = SessionConfig {
            simulate: true,
            ..SessionConfig::default()
        };
        let mut session = Session::with_grid(config, grid, Generator::with_seed(1));
        match session.replay(&mut PrintRenderer, &mut NoDelay) {
            Ok(outcome) => println!("{}", outcome.message()),
            Err(e) => eprintln!("Replay failed: {}", e),
        }
    }
}
