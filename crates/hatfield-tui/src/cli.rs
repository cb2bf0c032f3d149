use crate::settings::Settings;
use crate::theme::ThemeName;
use clap::Parser;

/// Longest side accepted on the command line
const MAX_SIDE: i64 = 1000;

/// Find your hat without falling down a hole
#[derive(Parser, Debug, Default)]
#[command(name = "hatfield", version, about)]
pub struct Args {
    /// Number of rows
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..=MAX_SIDE))]
    pub height: Option<u16>,

    /// Number of columns
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..=MAX_SIDE))]
    pub width: Option<u16>,

    /// Share of the field covered by holes
    #[arg(long, value_name = "PCT", value_parser = clap::value_parser!(u8).range(0..=100))]
    pub holes: Option<u8>,

    /// Add up to two holes after every move
    #[arg(long)]
    pub hard: bool,

    /// Watch the solver walk to the hat instead of playing
    #[arg(long)]
    pub simulate: bool,

    /// Start on a random cell instead of the top-left corner
    #[arg(long)]
    pub random_start: bool,

    /// Pause between simulated steps
    #[arg(long, value_name = "MS")]
    pub delay_ms: Option<u64>,

    /// Seed for reproducible fields (round n uses seed + n)
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, value_enum)]
    pub theme: Option<ThemeName>,

    /// Store the resulting settings as the new defaults
    #[arg(long)]
    pub save_settings: bool,
}

impl Args {
    /// Overlay the flags that were given on top of stored settings
    pub fn apply(&self, settings: &mut Settings) {
        let session = &mut settings.session;
        if let Some(height) = self.height {
            session.height = height as usize;
        }
        if let Some(width) = self.width {
            session.width = width as usize;
        }
        if let Some(holes) = self.holes {
            session.hazard_percentage = holes;
        }
        if self.hard {
            session.hard_mode = true;
        }
        if self.simulate {
            session.simulate = true;
        }
        if self.random_start {
            session.random_start = true;
        }
        if let Some(delay_ms) = self.delay_ms {
            session.step_delay_ms = delay_ms;
        }
        if let Some(theme) = self.theme {
            settings.theme = theme;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_settings() {
        let args = Args::try_parse_from([
            "hatfield",
            "--height",
            "5",
            "--holes",
            "35",
            "--hard",
            "--theme",
            "high-contrast",
        ])
        .unwrap();

        let mut settings = Settings::default();
        settings.session.width = 40;
        args.apply(&mut settings);

        assert_eq!(settings.session.height, 5);
        assert_eq!(settings.session.width, 40);
        assert_eq!(settings.session.hazard_percentage, 35);
        assert!(settings.session.hard_mode);
        assert!(!settings.session.simulate);
        assert_eq!(settings.theme, ThemeName::HighContrast);
    }

    #[test]
    fn test_absent_flags_keep_settings() {
        let mut settings = Settings::default();
        settings.session.simulate = true;
        Args::default().apply(&mut settings);

        assert!(settings.session.simulate);
        assert_eq!(settings.session.hazard_percentage, 20);
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        assert!(Args::try_parse_from(["hatfield", "--holes", "101"]).is_err());
        assert!(Args::try_parse_from(["hatfield", "--width", "0"]).is_err());
        assert!(Args::try_parse_from(["hatfield", "--width", "1001"]).is_err());
        assert!(Args::try_parse_from(["hatfield", "--height", "65535"]).is_err());
        assert!(Args::try_parse_from(["hatfield", "--height", "1000"]).is_ok());
        assert!(Args::try_parse_from(["hatfield", "--theme", "neon"]).is_err());
    }
}
