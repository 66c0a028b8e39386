//! Configuration management for calinject.
//!
//! Default paths come from environment variables, optionally provided through a
//! `.env` file in the local data directory, and fall back to the conventional
//! repository layout (`resources/books.yml`, `resources/videos.yml`,
//! `Calendario.md`). Command-line flags override all of them.
//!
//! The resolved values are handed to the pipeline as a [`PipelineConfig`]; the
//! core never reads configuration on its own.

use std::{env, path::PathBuf};

use crate::types::ResourceKind;

pub const DEFAULT_BOOKS_INDEX: &str = "resources/books.yml";
pub const DEFAULT_VIDEOS_INDEX: &str = "resources/videos.yml";
pub const DEFAULT_CALENDAR: &str = "Calendario.md";

/// Loads environment variables from `calinject/.env` in the local data directory.
///
/// The directory is created if needed. A missing `.env` file is not an error;
/// a file that exists but cannot be parsed is.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/calinject/.env`
/// - macOS: `~/Library/Application Support/calinject/.env`
/// - Windows: `%LOCALAPPDATA%/calinject/.env`
pub fn load_env() -> Result<(), String> {
    let path = env_file_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
    }

    if !path.is_file() {
        return Ok(());
    }
    dotenv::from_path(&path).map_err(|e| e.to_string())
}

pub fn env_file_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("calinject/.env");
    path
}

/// Catalog path for `kind`, from `CALINJECT_BOOKS_INDEX` / `CALINJECT_VIDEOS_INDEX`.
pub fn index_path(kind: ResourceKind) -> PathBuf {
    let (var, default) = match kind {
        ResourceKind::Books => ("CALINJECT_BOOKS_INDEX", DEFAULT_BOOKS_INDEX),
        ResourceKind::Videos => ("CALINJECT_VIDEOS_INDEX", DEFAULT_VIDEOS_INDEX),
    };
    env_path(var, default)
}

/// Calendar document path, from `CALINJECT_CALENDAR`.
pub fn calendar_path() -> PathBuf {
    env_path("CALINJECT_CALENDAR", DEFAULT_CALENDAR)
}

fn env_path(var: &str, default: &str) -> PathBuf {
    env::var(var)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(default))
}

/// Explicit inputs for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub kind: ResourceKind,
    pub index: PathBuf,
    pub calendar: PathBuf,
    pub create_if_missing: bool,
    pub strict: bool,
}

impl PipelineConfig {
    pub fn new(kind: ResourceKind, index: impl Into<PathBuf>, calendar: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            index: index.into(),
            calendar: calendar.into(),
            create_if_missing: false,
            strict: false,
        }
    }

    /// Fills unset paths from the environment defaults.
    pub fn from_env(kind: ResourceKind, index: Option<PathBuf>, calendar: Option<PathBuf>) -> Self {
        Self::new(
            kind,
            index.unwrap_or_else(|| index_path(kind)),
            calendar.unwrap_or_else(calendar_path),
        )
    }

    pub fn create_if_missing(mut self, create: bool) -> Self {
        self.create_if_missing = create;
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}
