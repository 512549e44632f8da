//! Command-line interface for strictly_marks.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Marks - tic-tac-toe on any grid, against a friend or a bot
#[derive(Parser, Debug)]
#[command(name = "strictly_marks")]
#[command(about = "Grid-marking game in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file (defaults to strictly_marks.toml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Where to keep the saved game (overrides storage.path)
    #[arg(short, long)]
    pub save: Option<PathBuf>,

    /// What to do; with no command the saved game is resumed if there is one
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Discard the saved game and start a new one
    New,

    /// Resume the saved game, or start fresh if there is none
    Continue,

    /// Print the rules and exit
    Rules,
}

/// Rules text printed by the `rules` command.
pub const RULES: &str = "\
Strictly Marks

Two players take turns placing their symbol in an empty cell.
Cells are numbered from 1, left to right and top to bottom.

The first player to fill a whole row or column wins.
On a square grid, either full diagonal wins too.
If every cell is filled and nobody has a line, the game is a draw.

The game is saved after every move and can be continued later.

Controls:
  arrows        move the cursor
  Enter, Space  place a mark under the cursor
  1-9           place a mark at that position
  mouse click   place a mark in the clicked cell
  r             start over once the game has ended
  q, Esc        quit
";
