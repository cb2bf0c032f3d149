use clap::ValueEnum;
use crossterm::style::Color;
use hatfield_core::Cell;
use serde::{Deserialize, Serialize};

/// Color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background color
    pub bg: Color,
    /// Default text color
    pub fg: Color,
    /// Field border color
    pub border: Color,
    /// Open ground
    pub ground: Color,
    /// The hat
    pub hat: Color,
    /// Holes
    pub hole: Color,
    /// Trail left behind the player
    pub trail: Color,
    /// The player's cell
    pub player: Color,
    /// Win color
    pub success: Color,
    /// Loss color
    pub error: Color,
    /// Info text color
    pub info: Color,
    /// Key binding text color
    pub key: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb { r: 20, g: 22, b: 30 },
            fg: Color::Rgb { r: 230, g: 230, b: 240 },
            border: Color::Rgb { r: 130, g: 140, b: 170 },
            ground: Color::Rgb { r: 70, g: 110, b: 70 },
            hat: Color::Rgb { r: 255, g: 210, b: 100 },
            hole: Color::Rgb { r: 150, g: 90, b: 60 },
            trail: Color::Rgb { r: 80, g: 180, b: 255 },
            player: Color::Rgb { r: 255, g: 255, b: 255 },
            success: Color::Rgb { r: 90, g: 255, b: 130 },
            error: Color::Rgb { r: 255, g: 90, b: 90 },
            info: Color::Rgb { r: 160, g: 165, b: 185 },
            key: Color::Rgb { r: 255, g: 210, b: 100 },
        }
    }

    /// Light theme
    pub fn light() -> Self {
        Self {
            bg: Color::Rgb { r: 248, g: 248, b: 252 },
            fg: Color::Rgb { r: 30, g: 30, b: 40 },
            border: Color::Rgb { r: 60, g: 60, b: 80 },
            ground: Color::Rgb { r: 120, g: 170, b: 110 },
            hat: Color::Rgb { r: 200, g: 120, b: 20 },
            hole: Color::Rgb { r: 110, g: 60, b: 30 },
            trail: Color::Rgb { r: 30, g: 100, b: 200 },
            player: Color::Rgb { r: 0, g: 0, b: 0 },
            success: Color::Rgb { r: 40, g: 160, b: 60 },
            error: Color::Rgb { r: 220, g: 50, b: 50 },
            info: Color::Rgb { r: 90, g: 90, b: 110 },
            key: Color::Rgb { r: 200, g: 120, b: 20 },
        }
    }

    /// High contrast theme
    pub fn high_contrast() -> Self {
        Self {
            bg: Color::Black,
            fg: Color::White,
            border: Color::White,
            ground: Color::Grey,
            hat: Color::Yellow,
            hole: Color::Red,
            trail: Color::Cyan,
            player: Color::White,
            success: Color::Green,
            error: Color::Red,
            info: Color::Grey,
            key: Color::Yellow,
        }
    }

    pub fn cell_color(&self, cell: Cell) -> Color {
        match cell {
            Cell::Empty => self.ground,
            Cell::Goal => self.hat,
            Cell::Hazard => self.hole,
            Cell::VisitedPath => self.trail,
            Cell::CurrentPath => self.player,
        }
    }
}

/// Theme selection as it appears on the command line and in the settings file
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeName {
    #[default]
    Dark,
    Light,
    HighContrast,
}

impl ThemeName {
    pub fn theme(self) -> Theme {
        match self {
            ThemeName::Dark => Theme::dark(),
            ThemeName::Light => Theme::light(),
            ThemeName::HighContrast => Theme::high_contrast(),
        }
    }
}
