use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use snake_tui::app::App;
use snake_tui::audio::SoundPlayer;
use snake_tui::game::GameConfig;

#[derive(Parser)]
#[command(name = "snake_tui")]
#[command(version, about = "Classic grid snake for the terminal")]
struct Cli {
    /// Disable sound cues
    #[arg(long)]
    muted: bool,

    /// Write log output to this file (the TUI owns the terminal, so
    /// logging is off unless a file is given)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file {}", path.display()))?;
        simplelog::WriteLogger::init(
            simplelog::LevelFilter::Info,
            simplelog::Config::default(),
            file,
        )
        .context("Failed to initialize logger")?;
    }

    let audio = SoundPlayer::new(!cli.muted);
    let mut app = App::new(GameConfig::default(), audio);
    app.run().await
}
