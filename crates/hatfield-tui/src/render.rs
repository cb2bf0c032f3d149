use crate::theme::Theme;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use hatfield_core::{Frame, Grid, Mode, Outcome, Renderer};
use std::io::{self, Write};

/// Wins and losses over the rounds of one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub wins: usize,
    pub losses: usize,
}

/// Screen length for a count, pinned at `u16::MAX` for fields wider than a terminal
fn span(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

/// Draws the field with crossterm into any writer
pub struct TerminalRenderer<W: Write> {
    out: W,
    theme: Theme,
    size: (u16, u16),
    message: Option<String>,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, theme: Theme) -> Self {
        let size = terminal::size().unwrap_or((80, 24));
        Self::with_size(out, theme, size)
    }

    pub fn with_size(out: W, theme: Theme, size: (u16, u16)) -> Self {
        Self {
            out,
            theme,
            size,
            message: None,
        }
    }

    /// Show a line of text above the field until cleared
    pub fn set_message(&mut self, message: Option<String>) {
        self.message = message;
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Left/top corner that centers a field of the given size
    fn origin(&self, grid: &Grid) -> (u16, u16) {
        let (term_width, term_height) = self.size;
        let field_width = span(grid.width()).saturating_add(2);
        let field_height = span(grid.height()).saturating_add(2);

        let x = term_width.saturating_sub(field_width) / 2;
        let y = if term_height > field_height.saturating_add(8) { 2 } else { 1 };
        (x, y)
    }

    fn begin(&mut self) -> io::Result<()> {
        if let Ok(size) = terminal::size() {
            self.size = size;
        }
        queue!(
            self.out,
            Hide,
            SetBackgroundColor(self.theme.bg),
            Clear(ClearType::All)
        )
    }

    fn finish(&mut self) -> io::Result<()> {
        queue!(self.out, ResetColor, Show)?;
        self.out.flush()
    }

    fn draw_message(&mut self) -> io::Result<()> {
        if let Some(message) = &self.message {
            let padded = format!("  {}  ", message);
            let x = self.size.0.saturating_sub(span(padded.chars().count())) / 2;
            queue!(
                self.out,
                MoveTo(x, 0),
                SetForegroundColor(self.theme.info),
                Print(&padded)
            )?;
        }
        Ok(())
    }

    fn draw_field(&mut self, grid: &Grid, x: u16, y: u16) -> io::Result<()> {
        let border = "-".repeat(grid.width());
        queue!(
            self.out,
            SetForegroundColor(self.theme.border),
            MoveTo(x, y),
            Print(format!("+{}+", border))
        )?;

        for (row_index, row) in grid.rows().enumerate() {
            let row_y = y.saturating_add(1).saturating_add(span(row_index));
            queue!(
                self.out,
                MoveTo(x, row_y),
                SetForegroundColor(self.theme.border),
                Print('|')
            )?;

            // Group runs of equal cells to keep the escape count down
            let mut start = 0;
            while start < row.len() {
                let cell = row[start];
                let end = row[start..]
                    .iter()
                    .position(|&other| other != cell)
                    .map_or(row.len(), |offset| start + offset);
                let run: String = std::iter::repeat(cell.symbol()).take(end - start).collect();
                queue!(
                    self.out,
                    SetForegroundColor(self.theme.cell_color(cell)),
                    Print(run)
                )?;
                start = end;
            }

            queue!(
                self.out,
                SetForegroundColor(self.theme.border),
                Print('|')
            )?;
        }

        queue!(
            self.out,
            MoveTo(x, y.saturating_add(1).saturating_add(span(grid.height()))),
            Print(format!("+{}+", border))
        )
    }

    fn draw_line(&mut self, x: u16, y: u16, color: Color, text: &str) -> io::Result<()> {
        queue!(self.out, MoveTo(x, y), SetForegroundColor(color), Print(text))
    }

    fn draw_controls(&mut self, x: u16, y: u16, controls: &[(&str, &str)]) -> io::Result<()> {
        let mut cx = x;
        for (key, desc) in controls {
            queue!(
                self.out,
                MoveTo(cx, y),
                SetForegroundColor(self.theme.key),
                Print(key),
                SetForegroundColor(self.theme.info),
                Print(format!(" {}", desc))
            )?;
            cx = cx.saturating_add(span(key.chars().count() + desc.chars().count() + 3));
        }
        Ok(())
    }

    /// Draw the final field with the outcome and the end-screen keys
    pub fn render_end_screen(
        &mut self,
        grid: &Grid,
        moves: usize,
        outcome: &Outcome,
        tally: Tally,
    ) -> io::Result<()> {
        self.begin()?;
        self.draw_message()?;

        let (x, y) = self.origin(grid);
        self.draw_field(grid, x, y)?;

        let info_y = y.saturating_add(span(grid.height())).saturating_add(3);
        let color = if outcome.is_win() {
            self.theme.success
        } else {
            self.theme.error
        };
        self.draw_line(x, info_y, color, &outcome.message())?;
        let summary = format!(
            "Moves: {}   Won: {}   Lost: {}",
            moves, tally.wins, tally.losses
        );
        self.draw_line(x, info_y.saturating_add(1), self.theme.fg, &summary)?;
        self.draw_controls(x, info_y.saturating_add(3), &[("Enter/n", "New field"), ("q/Esc", "Quit")])?;

        self.finish()
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render(&mut self, frame: &Frame<'_>) -> io::Result<()> {
        self.begin()?;
        self.draw_message()?;

        let (x, y) = self.origin(frame.grid);
        self.draw_line(x, y.saturating_sub(1), self.theme.fg, "HAT FIELD")?;
        self.draw_field(frame.grid, x, y)?;

        let info_y = y.saturating_add(span(frame.grid.height())).saturating_add(3);
        let mode = match frame.mode {
            Mode::Playing => "Playing",
            Mode::Replaying => "Solver replay",
        };
        let mut status = format!("Moves: {}   {}", frame.moves, mode);
        if frame.hard_mode {
            status.push_str("   HARD");
        }
        self.draw_line(x, info_y, self.theme.info, &status)?;

        match frame.mode {
            Mode::Playing => self.draw_controls(
                x,
                info_y.saturating_add(2),
                &[("Arrows/l r u d", "Move"), ("q/Esc", "Quit")],
            )?,
            Mode::Replaying => self.draw_controls(
                x,
                info_y.saturating_add(2),
                &[("", "Watching the walk... q/Esc to stop")],
            )?,
        }

        self.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hatfield_core::{Loss, Position};

    fn draw(frame: &Frame<'_>) -> String {
        let mut renderer = TerminalRenderer::with_size(Vec::new(), Theme::dark(), (80, 24));
        renderer.set_message(Some("Field regenerated 2 times".to_string()));
        renderer.render(frame).unwrap();
        String::from_utf8(renderer.into_inner()).unwrap()
    }

    #[test]
    fn test_render_frame() {
        let grid = Grid::from_rows(&["@**░", "░OO*", "░░^░"]).unwrap();
        let output = draw(&Frame {
            grid: &grid,
            player: Position::ORIGIN,
            moves: 3,
            mode: Mode::Playing,
            hard_mode: true,
        });

        assert!(output.contains("+----+"));
        assert!(output.contains("**"));
        assert!(output.contains("OO"));
        assert!(output.contains('^'));
        assert!(output.contains("Moves: 3   Playing   HARD"));
        assert!(output.contains("Field regenerated 2 times"));
    }

    #[test]
    fn test_render_replay_frame() {
        let grid = Grid::from_rows(&[".^"]).unwrap();
        let output = draw(&Frame {
            grid: &grid,
            player: Position::ORIGIN,
            moves: 0,
            mode: Mode::Replaying,
            hard_mode: false,
        });

        assert!(output.contains("Solver replay"));
        assert!(!output.contains("HARD"));
    }

    #[test]
    fn test_render_fields_wider_than_a_terminal() {
        for width in [65_535, 70_000] {
            let row = format!("^{}", ".".repeat(width - 1));
            let grid = Grid::from_rows(&[row.as_str()]).unwrap();
            let output = draw(&Frame {
                grid: &grid,
                player: Position::ORIGIN,
                moves: 0,
                mode: Mode::Playing,
                hard_mode: false,
            });
            assert!(output.contains("Moves: 0"));

            let tall: Vec<&str> = std::iter::once("^").chain(std::iter::repeat(".").take(width - 1)).collect();
            let grid = Grid::from_rows(&tall).unwrap();
            let mut renderer = TerminalRenderer::with_size(Vec::new(), Theme::dark(), (80, 24));
            renderer
                .render_end_screen(&grid, 0, &Outcome::Won, Tally::default())
                .unwrap();
        }
    }

    #[test]
    fn test_end_screen() {
        let grid = Grid::from_rows(&["*O", "@^"]).unwrap();
        let mut renderer = TerminalRenderer::with_size(Vec::new(), Theme::light(), (80, 24));
        renderer
            .render_end_screen(
                &grid,
                2,
                &Outcome::Lost(Loss::HazardHit),
                Tally { wins: 1, losses: 2 },
            )
            .unwrap();
        let output = String::from_utf8(renderer.into_inner()).unwrap();

        assert!(output.contains("Sorry, you fell down a hole. Please try again."));
        assert!(output.contains("Moves: 2   Won: 1   Lost: 2"));
        assert!(output.contains("New field"));
    }
}
