//! Game configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use strictly_marks::{DEFAULT_RECORD_PATH, GameSetup, Player, PlayerKind, SetupError, Symbol};
use tracing::{debug, info, instrument};

/// Config file used when none is given on the command line.
pub const DEFAULT_CONFIG_PATH: &str = "strictly_marks.toml";

/// Top-level configuration. Missing tables fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Symbol of the player who moves first.
    first: String,

    /// Grid dimensions.
    grid: GridConfig,

    /// The first player.
    player_one: PlayerConfig,

    /// The second player.
    player_two: PlayerConfig,

    /// Where the saved game lives.
    storage: StorageConfig,

    /// Automated player pacing.
    timing: TimingConfig,
}

/// Grid dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Number of rows.
    rows: usize,
    /// Number of columns.
    cols: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { rows: 3, cols: 3 }
    }
}

/// One player. Fields left out of the table fall back to the seat's default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    /// Mark text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    symbol: Option<String>,
    /// Human or automated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    kind: Option<PlayerKind>,
}

/// Built-in values for one seat.
struct SeatDefaults {
    name: &'static str,
    symbol: &'static str,
    kind: PlayerKind,
}

const PLAYER_ONE_DEFAULTS: SeatDefaults = SeatDefaults {
    name: "Player",
    symbol: "X",
    kind: PlayerKind::Human,
};

const PLAYER_TWO_DEFAULTS: SeatDefaults = SeatDefaults {
    name: "Bot",
    symbol: "O",
    kind: PlayerKind::Automated,
};

impl PlayerConfig {
    /// Creates a fully specified player entry.
    pub fn new(name: impl Into<String>, symbol: impl Into<String>, kind: PlayerKind) -> Self {
        Self {
            name: Some(name.into()),
            symbol: Some(symbol.into()),
            kind: Some(kind),
        }
    }

    fn to_player(&self, field: &str, defaults: &SeatDefaults) -> Result<Player, ConfigError> {
        let name = self.name.as_deref().unwrap_or(defaults.name);
        let symbol = Symbol::new(self.symbol.as_deref().unwrap_or(defaults.symbol))
            .map_err(|e| ConfigError::new(format!("{}.symbol: {}", field, e)))?;
        let kind = self.kind.unwrap_or(defaults.kind);
        Ok(Player::new(name, symbol, kind))
    }
}

/// Saved-game location.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path of the JSON record.
    path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_RECORD_PATH),
        }
    }
}

/// Automated player pacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Delay before an automated player moves, in milliseconds.
    automated_delay_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            automated_delay_ms: 500,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            first: "X".to_string(),
            grid: GridConfig::default(),
            player_one: PlayerConfig::default(),
            player_two: PlayerConfig::default(),
            storage: StorageConfig::default(),
            timing: TimingConfig::default(),
        }
    }
}

impl Config {
    /// Loads the config for a run.
    ///
    /// An explicit path must exist. Without one, [`DEFAULT_CONFIG_PATH`]
    /// is read if present and built-in defaults are used otherwise.
    #[instrument]
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_fallback(explicit, Path::new(DEFAULT_CONFIG_PATH))
    }

    /// Like [`Config::load`] with a custom fallback location.
    #[instrument]
    pub fn load_with_fallback(explicit: Option<&Path>, fallback: &Path) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) if !path.is_file() => Err(ConfigError::new(format!(
                "Config file not found: {}",
                path.display()
            ))),
            Some(path) => Self::from_file(path),
            None if fallback.is_file() => Self::from_file(fallback),
            None => {
                info!("No config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::parse(&content)?;
        info!(
            rows = config.grid.rows,
            cols = config.grid.cols,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Parses configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Validates the config into a game setup.
    #[instrument(skip(self))]
    pub fn game_setup(&self) -> Result<GameSetup, ConfigError> {
        let player_a = self.player_one.to_player("player_one", &PLAYER_ONE_DEFAULTS)?;
        let player_b = self.player_two.to_player("player_two", &PLAYER_TWO_DEFAULTS)?;
        let first = Symbol::new(&self.first)
            .map_err(|e| ConfigError::new(format!("first: {}", e)))?;

        GameSetup::new(self.grid.rows, self.grid.cols, player_a, player_b, first).map_err(|e| {
            let field = match e {
                SetupError::Grid(_) => "grid",
                SetupError::Symbol(_) | SetupError::DuplicateSymbol { .. } => "player_two.symbol",
                SetupError::UnknownFirst { .. } => "first",
            };
            ConfigError::new(format!("{}: {}", field, e))
        })
    }

    /// Delay before an automated player moves.
    pub fn automated_delay(&self) -> Duration {
        Duration::from_millis(self.timing.automated_delay_ms)
    }

    /// Replaces the saved-game location.
    pub fn with_save_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage.path = path.into();
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
