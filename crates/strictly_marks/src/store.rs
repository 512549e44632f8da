//! Durable storage for the saved-game record.

use super::{CodecError, Record};
use derive_more::{Display, Error};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// Default file name for the saved game.
pub const DEFAULT_RECORD_PATH: &str = "game_state.json";

/// Result of reading the stored record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Loaded {
    /// A well-formed record was found.
    Found(Record),
    /// Nothing is stored; a fresh game is expected.
    NotFound,
    /// Something is stored but it is not a usable record.
    Corrupt(CodecError),
}

/// Storage error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Store error: {} at {}:{}", message, file, line)]
pub struct StoreError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a new storage error with caller location tracking.
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

impl From<io::Error> for StoreError {
    #[track_caller]
    fn from(err: io::Error) -> Self {
        Self::new(format!("I/O error: {}", err))
    }
}

impl From<CodecError> for StoreError {
    #[track_caller]
    fn from(err: CodecError) -> Self {
        Self::new(format!("Encoding error: {}", err))
    }
}

/// Where the saved-game record lives.
///
/// A store holds at most one record. Saving overwrites it; discarding
/// removes it.
pub trait RecordStore {
    /// Reads the stored record.
    fn load(&self) -> Loaded;

    /// Replaces the stored record.
    fn save(&mut self, record: &Record) -> Result<(), StoreError>;

    /// Removes the stored record. Removing nothing is not an error.
    fn discard(&mut self) -> Result<(), StoreError>;

    /// True if something is stored, well formed or not.
    fn exists(&self) -> bool;
}

/// Stores the record as a JSON file.
///
/// Saves go to a sibling temp file that is then renamed over the
/// target, so a crash mid-write leaves the previous record intact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The record file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self::new(DEFAULT_RECORD_PATH)
    }
}

impl RecordStore for JsonFileStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> Loaded {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("No saved record");
                return Loaded::NotFound;
            }
            Err(err) => {
                warn!(error = %err, "Saved record exists but cannot be read");
                return Loaded::Corrupt(CodecError::Parse(format!("unreadable: {}", err)));
            }
        };

        match Record::decode(&bytes) {
            Ok(record) => {
                info!("Loaded saved record");
                Loaded::Found(record)
            }
            Err(err) => {
                warn!(error = %err, "Saved record is corrupt");
                Loaded::Corrupt(err)
            }
        }
    }

    #[instrument(skip(self, record), fields(path = %self.path.display()))]
    fn save(&mut self, record: &Record) -> Result<(), StoreError> {
        let json = record.to_json()?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let temp = self.temp_path();
        fs::write(&temp, json)?;
        fs::rename(&temp, &self.path)?;

        debug!("Record saved");
        Ok(())
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn discard(&mut self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!("Saved record discarded");
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn exists(&self) -> bool {
        self.path.is_file()
    }
}

/// Keeps the record in memory as JSON text.
///
/// Useful for tests and for sessions that should not touch the disk.
/// Writes can be made to fail to exercise the in-memory fallback.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    contents: Option<String>,
    fail_writes: bool,
    saves: usize,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `contents`, valid or not.
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: Some(contents.into()),
            ..Self::default()
        }
    }

    /// Creates a store whose saves always fail.
    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    /// The stored JSON text, if any.
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl RecordStore for MemoryStore {
    fn load(&self) -> Loaded {
        match &self.contents {
            None => Loaded::NotFound,
            Some(text) => match Record::decode(text.as_bytes()) {
                Ok(record) => Loaded::Found(record),
                Err(err) => Loaded::Corrupt(err),
            },
        }
    }

    fn save(&mut self, record: &Record) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::new("writes disabled"));
        }
        self.contents = Some(record.to_json()?);
        self.saves += 1;
        Ok(())
    }

    fn discard(&mut self) -> Result<(), StoreError> {
        self.contents = None;
        Ok(())
    }

    fn exists(&self) -> bool {
        self.contents.is_some()
    }
}
