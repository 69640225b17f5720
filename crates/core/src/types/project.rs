use std::path::{Path, PathBuf};

/// What the host knows about the open project at the time of an invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectContext {
    /// Open folders, in the order the host lists them
    pub folders: Vec<PathBuf>,
    /// Path of the file in the active view, if it has one
    pub active_file: Option<PathBuf>,
}

impl ProjectContext {
    pub fn new(folders: Vec<PathBuf>) -> Self {
        Self {
            folders,
            active_file: None,
        }
    }

    pub fn with_active_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.active_file = Some(path.into());
        self
    }

    pub fn active_file(&self) -> Option<&Path> {
        self.active_file.as_deref()
    }
}
