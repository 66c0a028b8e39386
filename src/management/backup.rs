use std::{
    fmt,
    fs::{self, OpenOptions},
    io::{Error, ErrorKind, Write},
    path::{Path, PathBuf},
};

use chrono::Local;

use crate::{types::ResourceKind, utils};

/// Give up looking for a free backup name after this many same-second collisions.
const MAX_BACKUP_SUFFIX: u32 = 1000;

#[derive(Debug)]
pub enum GuardError {
    /// The backup could not be written; the document was left untouched.
    BackupFailed { path: PathBuf, source: Error },
    /// The backup exists but replacing the document failed.
    WriteFailed { path: PathBuf, source: Error },
}

impl fmt::Display for GuardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuardError::BackupFailed { path, source } => {
                write!(f, "cannot create backup {}: {}", path.display(), source)
            }
            GuardError::WriteFailed { path, source } => {
                write!(f, "cannot write {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for GuardError {}

/// Write wrapper that never replaces a document before a durable copy of its
/// previous content exists next to it.
///
/// Backups are named `<file>.<tag>.bak-<YYYYMMDD-HHMMSS>`; when that name is
/// already taken a `-1`, `-2`, ... suffix is added so earlier backups are
/// never overwritten.
pub struct BackupGuard {
    tag: &'static str,
    stamp: String,
}

impl BackupGuard {
    pub fn new(kind: ResourceKind) -> Self {
        Self::with_stamp(kind, utils::backup_timestamp(&Local::now()))
    }

    pub fn with_stamp(kind: ResourceKind, stamp: impl Into<String>) -> Self {
        Self {
            tag: kind.backup_tag(),
            stamp: stamp.into(),
        }
    }

    /// Preferred backup location for `document`.
    pub fn backup_path(&self, document: &Path) -> PathBuf {
        let mut name = document
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(format!(".{}.bak-{}", self.tag, self.stamp));
        document.with_file_name(name)
    }

    /// Replaces `document` with `updated` after backing up `current`.
    ///
    /// Returns `Ok(None)` without touching the filesystem when the content is
    /// unchanged, otherwise the path of the backup that was written.
    pub fn commit(
        &self,
        document: &Path,
        current: &str,
        updated: &str,
    ) -> Result<Option<PathBuf>, GuardError> {
        if current == updated {
            return Ok(None);
        }

        let backup = self.write_backup(document, current)?;
        replace_file(document, updated).map_err(|source| GuardError::WriteFailed {
            path: document.to_path_buf(),
            source,
        })?;

        Ok(Some(backup))
    }

    fn write_backup(&self, document: &Path, current: &str) -> Result<PathBuf, GuardError> {
        let base = self.backup_path(document);

        for attempt in 0..MAX_BACKUP_SUFFIX {
            let candidate = if attempt == 0 {
                base.clone()
            } else {
                let mut name = base.clone().into_os_string();
                name.push(format!("-{}", attempt));
                PathBuf::from(name)
            };

            let file = OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&candidate);
            let mut file = match file {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(source) => {
                    return Err(GuardError::BackupFailed {
                        path: candidate,
                        source,
                    });
                }
            };

            return file
                .write_all(current.as_bytes())
                .and_then(|_| file.sync_all())
                .map(|_| candidate.clone())
                .map_err(|source| GuardError::BackupFailed {
                    path: candidate,
                    source,
                });
        }

        Err(GuardError::BackupFailed {
            path: base,
            source: Error::new(ErrorKind::AlreadyExists, "no free backup name left"),
        })
    }
}

/// Whole-file replace: write a sibling temp file, then rename it over `path`.
fn replace_file(path: &Path, content: &str) -> Result<(), Error> {
    let mut tmp_name = std::ffi::OsString::from(".");
    tmp_name.push(path.file_name().unwrap_or_default());
    tmp_name.push(".calinject-tmp");
    let tmp = path.with_file_name(tmp_name);

    fs::write(&tmp, content)?;
    fs::rename(&tmp, path).inspect_err(|_| {
        let _ = fs::remove_file(&tmp);
    })
}
