mod app;
mod cli;
mod input;
mod render;
mod settings;
mod theme;

use app::App;
use clap::Parser;
use cli::Args;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use settings::Settings;
use std::io;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut settings = Settings::load();
    args.apply(&mut settings);
    if args.save_settings {
        settings.save()?;
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let result = App::new(settings, args.seed, io::stdout()).run();

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen)?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
