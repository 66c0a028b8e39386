//! # CLI Module
//!
//! User-facing commands of calinject. Each command wires the pure
//! [`crate::calendar`] core to the stateful [`crate::management`] layer and
//! reports results through the colored output macros.
//!
//! ## Commands
//!
//! - [`inject`] - Runs select → render → upsert (with backup) once per key,
//!   strictly one key after another against the same calendar, and prints a
//!   per-key outcome table.
//! - [`suggest`] - Prints the rendered block for a week/block/topic filter
//!   without touching any document.
//! - [`validate`] - Checks a catalog file and lists every problem found.
//!
//! ## Exit Codes
//!
//! Every fatal condition maps to its own exit code through
//! [`CliError::exit_code`]:
//!
//! | code | condition                                 |
//! |------|-------------------------------------------|
//! | 1    | unclassified failure                      |
//! | 2    | command-line usage error (argument parser)|
//! | 3    | `--strict` and a selection came back empty|
//! | 4    | catalog file missing or unreadable        |
//! | 5    | calendar missing and creation not allowed |
//! | 6    | malformed or out-of-range tag             |
//! | 7    | backup failed, document left untouched    |
//! | 8    | calendar read/write failure               |
//! | 9    | catalog could not be parsed               |
//! | 10   | catalog validation found problems         |
//!
//! Nothing is retried: every operation is local and deterministic, so a rerun
//! with the same inputs would fail the same way.

mod inject;
mod suggest;
mod validate;

use std::{fmt, path::PathBuf};

use crate::management::{CatalogError, DocumentError, GuardError};

pub use inject::expand_keys;
pub use inject::inject;
pub use inject::inject_key;
pub use suggest::suggest;
pub use suggest::suggestion;
pub use validate::validate;

#[derive(Debug)]
pub enum CliError {
    EmptySelection(Vec<String>),
    CatalogMissing(PathBuf),
    CatalogUnreadable(String),
    CatalogInvalid(String),
    CatalogRejected(usize),
    DocumentMissing(PathBuf),
    InvalidTag(String),
    BackupFailed(String),
    DocumentIo(String),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::EmptySelection(_) => 3,
            CliError::CatalogMissing(_) | CliError::CatalogUnreadable(_) => 4,
            CliError::DocumentMissing(_) => 5,
            CliError::InvalidTag(_) => 6,
            CliError::BackupFailed(_) => 7,
            CliError::DocumentIo(_) => 8,
            CliError::CatalogInvalid(_) => 9,
            CliError::CatalogRejected(_) => 10,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::EmptySelection(keys) => {
                write!(f, "No catalog entries matched for: {}", keys.join(", "))
            }
            CliError::CatalogMissing(path) => {
                write!(f, "Catalog {} does not exist.", path.display())
            }
            CliError::CatalogUnreadable(e) => write!(f, "Cannot read catalog. Err: {}", e),
            CliError::CatalogInvalid(e) => write!(f, "Cannot parse catalog. Err: {}", e),
            CliError::CatalogRejected(count) => {
                write!(f, "Catalog validation failed with {} problem(s).", count)
            }
            CliError::DocumentMissing(path) => write!(
                f,
                "{} does not exist. Use --create-if-missing or create it first.",
                path.display()
            ),
            CliError::InvalidTag(e) => write!(f, "Invalid selection: {}", e),
            CliError::BackupFailed(e) => write!(f, "Backup failed, nothing written. Err: {}", e),
            CliError::DocumentIo(e) => write!(f, "Cannot update calendar. Err: {}", e),
        }
    }
}

impl std::error::Error for CliError {}

impl From<CatalogError> for CliError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(path) => CliError::CatalogMissing(path),
            CatalogError::IoError(e) => CliError::CatalogUnreadable(e.to_string()),
            CatalogError::SerdeError(e) => CliError::CatalogInvalid(e.to_string()),
        }
    }
}

impl From<DocumentError> for CliError {
    fn from(err: DocumentError) -> Self {
        match err {
            DocumentError::Missing(path) => CliError::DocumentMissing(path),
            DocumentError::IoError(e) => CliError::DocumentIo(e.to_string()),
            DocumentError::GuardError(e @ GuardError::BackupFailed { .. }) => {
                CliError::BackupFailed(e.to_string())
            }
            DocumentError::GuardError(e @ GuardError::WriteFailed { .. }) => {
                CliError::DocumentIo(e.to_string())
            }
        }
    }
}
