//! Terminal front-end for Strictly Marks.
//!
//! Draws the grid with ratatui, maps keys and mouse clicks onto grid
//! positions, and paces automated players with a one-shot timer.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod app;
mod cli;
mod config;
mod input;
mod timer;
mod ui;

// Crate-level exports - Command line and configuration
pub use cli::{Cli, Command, RULES};
pub use config::{
    Config, ConfigError, DEFAULT_CONFIG_PATH, GridConfig, PlayerConfig, StorageConfig,
    TimingConfig,
};

// Crate-level exports - Front-end
pub use app::{App, Control, FRAME_TIME, run};
pub use input::{BoardLayout, CELL_HEIGHT, CELL_WIDTH, MARGIN, digit_position, move_cursor};
pub use timer::{AutomatedMoveTimer, DEFAULT_AUTOMATED_DELAY};
pub use ui::draw;
