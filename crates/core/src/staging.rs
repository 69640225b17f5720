//! Staging files for input piped into streaming jobs
//!
//! The host job runner only takes a command string, so input text is written
//! to a temporary file the command reads from. Staged files are removed when
//! the staging area is cleared or dropped, i.e. when the session ends.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tempfile::TempPath;
use tracing::debug;

use crate::error::{Error, Result};

#[derive(Debug, Default)]
pub struct StagingArea {
    dir: Option<PathBuf>,
    files: Mutex<Vec<TempPath>>,
}

impl StagingArea {
    /// Stage into the system temporary directory
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
            files: Mutex::new(Vec::new()),
        }
    }

    /// Write `text` to a fresh staging file and return its path
    pub fn stage(&self, text: &str) -> Result<PathBuf> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("pipeshell-input-").suffix(".txt");

        let mut file = match self.dir {
            Some(ref dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
        .map_err(Error::Staging)?;

        file.write_all(text.as_bytes()).map_err(Error::Staging)?;
        file.flush().map_err(Error::Staging)?;

        let temp_path = file.into_temp_path();
        let path = temp_path.to_path_buf();
        debug!("Staged {} bytes at {:?}", text.len(), path);

        self.files
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(temp_path);
        Ok(path)
    }

    pub fn len(&self) -> usize {
        self.files
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.files
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .any(|staged| &**staged == path)
    }

    /// Delete every staged file
    pub fn clear(&self) {
        self.files
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }
}
