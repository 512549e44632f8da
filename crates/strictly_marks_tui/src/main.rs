//! Strictly Marks - terminal entry point.

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::Instant;
use strictly_marks::{JsonFileStore, Session};
use strictly_marks_tui::{App, Cli, Command, Config, RULES};
use tracing::{error, info};

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if cli.command == Some(Command::Rules) {
        print!("{}", RULES);
        return Ok(());
    }

    // Setup logging to file to avoid interfering with TUI
    let log_file =
        std::fs::File::create("strictly_marks.log").context("Failed to create log file")?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!("Starting Strictly Marks");

    let mut config = Config::load(cli.config.as_deref()).context("Failed to load config")?;
    if let Some(path) = cli.save {
        config = config.with_save_path(path);
    }
    let setup = config
        .game_setup()
        .context("Invalid game configuration")?;
    let store = JsonFileStore::new(config.storage().path().clone());

    let session = if cli.command == Some(Command::New) {
        Session::new(setup, store)
    } else {
        Session::resume(setup, store)
    };

    let mut app = App::new(
        session,
        config.automated_delay(),
        StdRng::from_entropy(),
        Instant::now(),
    );

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = strictly_marks_tui::run(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!(error = ?err, "Game loop error");
        eprintln!("Error: {:?}", err);
    }

    info!("Strictly Marks exited");
    Ok(())
}
