//! Working directory inference
//!
//! Precedence, first hit wins:
//! 1. `prefer_active_file_dir` set and the active file has a parent: that parent.
//! 2. Exactly one folder open: that folder.
//! 3. Without the preference: the open folder containing the active file,
//!    then the active file's directory.
//! 4. With the preference (no active file): the open folder rule.
//! 5. The fallback directory (home).

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::types::ProjectContext;

#[derive(Debug, Clone)]
pub struct DirectoryResolver {
    prefer_active_file_dir: bool,
    fallback: PathBuf,
}

impl DirectoryResolver {
    /// Resolver falling back to the home directory
    pub fn new(prefer_active_file_dir: bool) -> Self {
        Self {
            prefer_active_file_dir,
            fallback: home_dir(),
        }
    }

    pub fn with_fallback(mut self, fallback: impl Into<PathBuf>) -> Self {
        self.fallback = fallback.into();
        self
    }

    pub fn resolve_context(&self, context: &ProjectContext) -> PathBuf {
        self.resolve(&context.folders, context.active_file())
    }

    pub fn resolve(&self, folders: &[PathBuf], active_file: Option<&Path>) -> PathBuf {
        let file_dir = active_file.and_then(directory_of);

        if self.prefer_active_file_dir {
            if let Some(dir) = file_dir {
                debug!("Using active file directory {:?}", dir);
                return dir;
            }
        }

        if let [only] = folders {
            debug!("Using the only open folder {:?}", only);
            return only.clone();
        }

        if let Some(folder) = folder_containing(folders, active_file) {
            debug!("Using open folder {:?}", folder);
            return folder;
        }

        if !self.prefer_active_file_dir {
            if let Some(dir) = file_dir {
                debug!("Using active file directory {:?}", dir);
                return dir;
            }
        }

        debug!("Falling back to {:?}", self.fallback);
        self.fallback.clone()
    }
}

impl Default for DirectoryResolver {
    fn default() -> Self {
        Self::new(false)
    }
}

/// Parent directory of `file`, if it has a non-empty one
pub fn directory_of(file: &Path) -> Option<PathBuf> {
    file.parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map(Path::to_path_buf)
}

/// First folder that contains `active_file`, or the first folder at all.
///
/// Containment compares whole path components, so `/src/app` does not
/// contain `/src/application/main.rs`.
fn folder_containing(folders: &[PathBuf], active_file: Option<&Path>) -> Option<PathBuf> {
    if let Some(file) = active_file {
        if let Some(folder) = folders.iter().find(|folder| file.starts_with(folder)) {
            return Some(folder.clone());
        }
    }
    folders.first().cloned()
}

/// The process's home directory, or the current directory when there is none
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}
