//! Persistent auto-save interaction mode.
//!
//! The mode lives in a single plain-text file (by default `~/.rag_config`)
//! shared by every project. [`ModeStore`] reads it, migrates the legacy
//! `verbose` value to `active`, and overwrites it on an explicit change.
//!
//! There is no locking: concurrent `rag mode` invocations race on the file
//! and the last write wins.

use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Legacy spelling of [`Mode::Active`] written by older clients.
const LEGACY_ACTIVE: &str = "verbose";

/// How a calling agent should narrate RAG operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Every save is announced.
    Active,
    /// Saves happen in the background; `rag status` shows what happened.
    Silent,
    /// The agent asks before each RAG operation.
    Ask,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Active, Mode::Silent, Mode::Ask];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Silent => "silent",
            Self::Ask => "ask",
        }
    }

    /// Resolve a canonical name or short alias, ignoring case.
    pub fn from_alias(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "active" | "a" | "verbose" | "v" => Some(Self::Active),
            "silent" | "s" => Some(Self::Silent),
            "ask" | "question" | "q" => Some(Self::Ask),
            _ => None,
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Mode {
    type Err = ModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_alias(s).ok_or_else(|| ModeError::Invalid(s.to_string()))
    }
}

/// The value found in the mode file.
///
/// Unrecognized contents are passed through untouched so callers can decide
/// how to treat them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredMode {
    Known(Mode),
    Other(String),
}

impl StoredMode {
    pub fn mode(&self) -> Option<Mode> {
        match self {
            Self::Known(mode) => Some(*mode),
            Self::Other(_) => None,
        }
    }
}

impl std::fmt::Display for StoredMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Known(mode) => f.write_str(mode.as_str()),
            Self::Other(raw) => f.write_str(raw),
        }
    }
}

#[derive(Error, Debug)]
pub enum ModeError {
    #[error("unknown mode: {0}")]
    Invalid(String),

    #[error("mode file error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reads and writes the mode file at an explicit path.
#[derive(Debug, Clone)]
pub struct ModeStore {
    path: PathBuf,
}

impl ModeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current mode. A missing or blank file means [`Mode::Active`] and is not
    /// created. A legacy `verbose` value is rewritten as `active`.
    pub fn get_mode(&self) -> Result<StoredMode, ModeError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(StoredMode::Known(Mode::Active));
            }
            Err(e) => return Err(e.into()),
        };

        let value = raw.trim();
        if value.is_empty() {
            return Ok(StoredMode::Known(Mode::Active));
        }

        if value == LEGACY_ACTIVE {
            self.write(Mode::Active)?;
            tracing::info!(path = %self.path.display(), "migrated legacy mode 'verbose' to 'active'");
            return Ok(StoredMode::Known(Mode::Active));
        }

        Ok(match Mode::ALL.iter().find(|m| m.as_str() == value) {
            Some(mode) => StoredMode::Known(*mode),
            None => StoredMode::Other(value.to_string()),
        })
    }

    /// Same as [`ModeStore::get_mode`]; kept for the `mode show` command.
    pub fn show_mode(&self) -> Result<StoredMode, ModeError> {
        self.get_mode()
    }

    /// Persist the mode named by `requested` (canonical name or alias).
    /// Invalid input leaves the file untouched.
    pub fn set_mode(&self, requested: &str) -> Result<Mode, ModeError> {
        let mode: Mode = requested.parse()?;
        self.write(mode)?;
        tracing::info!(mode = %mode, path = %self.path.display(), "mode updated");
        Ok(mode)
    }

    /// Overwrite the file in one step: write a sibling temp file, then rename.
    fn write(&self, mode: Mode) -> Result<(), ModeError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut tmp_name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| ".rag_config".into());
        tmp_name.push(".tmp");
        let tmp_path = self.path.with_file_name(tmp_name);

        let mut file = std::fs::File::create(&tmp_path)?;
        file.write_all(mode.as_str().as_bytes())?;
        file.flush()?;
        drop(file);

        std::fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(tmp: &TempDir) -> ModeStore {
        ModeStore::new(tmp.path().join(".rag_config"))
    }

    #[test]
    fn missing_file_defaults_to_active_without_writing() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);

        assert_eq!(store.get_mode().unwrap(), StoredMode::Known(Mode::Active));
        assert!(!store.path().exists());
    }

    #[test]
    fn blank_file_defaults_to_active() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);
        std::fs::write(store.path(), "  \n").unwrap();

        assert_eq!(store.get_mode().unwrap(), StoredMode::Known(Mode::Active));
    }

    #[test]
    fn stored_value_is_trimmed() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);
        std::fs::write(store.path(), "silent\n").unwrap();

        assert_eq!(store.get_mode().unwrap(), StoredMode::Known(Mode::Silent));
    }

    #[test]
    fn unknown_value_is_returned_verbatim() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);
        std::fs::write(store.path(), "chatty").unwrap();

        let stored = store.get_mode().unwrap();
        assert_eq!(stored, StoredMode::Other("chatty".into()));
        assert_eq!(stored.to_string(), "chatty");
        assert_eq!(stored.mode(), None);
        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), "chatty");
    }

    #[test]
    fn alias_lookup_ignores_case() {
        assert_eq!(Mode::from_alias("SILENT"), Some(Mode::Silent));
        assert_eq!(Mode::from_alias("Q"), Some(Mode::Ask));
        assert_eq!(Mode::from_alias(" Verbose "), Some(Mode::Active));
        assert_eq!(Mode::from_alias("show"), None);
    }

    #[test]
    fn set_mode_leaves_no_temp_file() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);
        store.set_mode("ask").unwrap();

        let names: Vec<_> = std::fs::read_dir(tmp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from(".rag_config")]);
    }

    #[test]
    fn set_mode_creates_parent_dirs() {
        let tmp = TempDir::new().unwrap();
        let store = ModeStore::new(tmp.path().join("nested").join("mode"));
        store.set_mode("s").unwrap();
        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), "silent");
    }
}
