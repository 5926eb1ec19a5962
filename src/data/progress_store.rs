use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::Progress;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("Failed to write progress to {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to remove progress file {}: {source}", .path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to encode progress: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Progress file on disk.
#[derive(Debug, Clone)]
pub struct ProgressStore {
    path: PathBuf,
}

impl ProgressStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }

    /// Replaces the stored progress (write to .tmp then rename).
    pub fn save(&self, progress: &Progress) -> Result<(), PersistError> {
        let json = serde_json::to_string_pretty(progress)?;
        let tmp_path = self.tmp_path();

        fs::write(&tmp_path, json).map_err(|source| PersistError::Io {
            path: tmp_path.clone(),
            source,
        })?;
        fs::rename(&tmp_path, &self.path).map_err(|source| PersistError::Io {
            path: self.path.clone(),
            source,
        })?;

        log::debug!(
            "saved {} answer(s) to {}",
            progress.answered(),
            self.path.display()
        );
        Ok(())
    }

    /// Stored progress, or an empty record if there is none.
    ///
    /// An unreadable or corrupt file counts as no progress.
    pub fn load(&self) -> Progress {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Progress::default(),
            Err(err) => {
                log::warn!(
                    "ignoring unreadable progress file {}: {}",
                    self.path.display(),
                    err
                );
                return Progress::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(progress) => progress,
            Err(err) => {
                log::warn!(
                    "ignoring corrupt progress file {}: {}",
                    self.path.display(),
                    err
                );
                Progress::default()
            }
        }
    }

    pub fn clear(&self) -> Result<(), PersistError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                log::info!("removed progress file {}", self.path.display());
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(PersistError::Remove {
                path: self.path.clone(),
                source,
            }),
        }
    }
}
