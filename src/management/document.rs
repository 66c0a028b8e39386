use std::{
    fmt,
    io::{Error, ErrorKind},
    path::{Path, PathBuf},
};

use crate::management::backup::{BackupGuard, GuardError};

/// Content written when the caller asks for a missing calendar to be created.
pub const DOCUMENT_STUB: &str = "# Calendario del Programa\n\n";

#[derive(Debug)]
pub enum DocumentError {
    Missing(PathBuf),
    IoError(Error),
    GuardError(GuardError),
}

impl From<Error> for DocumentError {
    fn from(err: Error) -> Self {
        DocumentError::IoError(err)
    }
}

impl From<GuardError> for DocumentError {
    fn from(err: GuardError) -> Self {
        DocumentError::GuardError(err)
    }
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentError::Missing(path) => write!(
                f,
                "{} does not exist. Use --create-if-missing or create it first.",
                path.display()
            ),
            DocumentError::IoError(e) => write!(f, "{}", e),
            DocumentError::GuardError(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for DocumentError {}

/// A markdown document read and rewritten as a whole.
pub struct DocumentManager {
    path: PathBuf,
    content: String,
}

impl DocumentManager {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            content: String::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    pub fn load(&self) -> Result<Self, DocumentError> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => DocumentError::Missing(self.path.clone()),
            _ => DocumentError::IoError(e),
        })?;
        Ok(Self {
            path: self.path.clone(),
            content,
        })
    }

    /// Writes [`DOCUMENT_STUB`] when the document is absent. Returns whether it
    /// had to be created.
    pub fn ensure_exists(&self, create_if_missing: bool) -> Result<bool, DocumentError> {
        if self.exists() {
            return Ok(false);
        }
        if !create_if_missing {
            return Err(DocumentError::Missing(self.path.clone()));
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, DOCUMENT_STUB)?;
        Ok(true)
    }

    /// Persists `updated` through the backup guard. A no-op when nothing
    /// changed; returns the backup path otherwise.
    pub fn persist(
        &mut self,
        updated: String,
        guard: &BackupGuard,
    ) -> Result<Option<PathBuf>, DocumentError> {
        let backup = guard.commit(&self.path, &self.content, &updated)?;
        if backup.is_some() {
            self.content = updated;
        }
        Ok(backup)
    }
}
