//! Settings discovery
//!
//! `PIPESHELL_CONFIG` names a single file to use. Otherwise the global file in
//! the home directory is loaded first, then every project file found walking
//! up from the start directory (stopping at home), outermost first.

use std::path::{Path, PathBuf};

use super::{Settings, SettingsMerger};
use crate::error::{Error, Result};

pub const CONFIG_ENV_VAR: &str = "PIPESHELL_CONFIG";
pub const CONFIG_FILE_NAMES: [&str; 2] = [".pipeshell.json", "pipeshell.json"];

pub struct ConfigLoader {
    home: Option<PathBuf>,
    explicit: Option<PathBuf>,
}

impl ConfigLoader {
    /// Loader using the real home directory and `PIPESHELL_CONFIG`
    pub fn from_env() -> Self {
        Self {
            home: dirs::home_dir(),
            explicit: std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from),
        }
    }

    pub fn new(home: Option<PathBuf>) -> Self {
        Self {
            home,
            explicit: None,
        }
    }

    pub fn with_explicit_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.explicit = Some(path.into());
        self
    }

    /// Load settings for the current directory
    pub fn load(&self) -> Result<Settings> {
        let cwd = std::env::current_dir()?;
        self.load_from_path(&cwd)
    }

    pub fn load_from_path(&self, start: &Path) -> Result<Settings> {
        Ok(self.collect_layers(start)?.merged())
    }

    /// Every settings file that applies to `start`, least specific first
    pub fn collect_layers(&self, start: &Path) -> Result<SettingsMerger> {
        let mut merger = SettingsMerger::new();

        if let Some(ref explicit) = self.explicit {
            tracing::debug!("Using settings from {}: {:?}", CONFIG_ENV_VAR, explicit);
            if !explicit.is_file() {
                return Err(Error::Config(format!(
                    "{CONFIG_ENV_VAR} points to {}, which is not a file",
                    explicit.display()
                )));
            }
            merger.push(explicit.clone(), Settings::load_from_file(explicit)?);
            return Ok(merger);
        }

        if let Some(ref home) = self.home {
            if let Some(path) = Self::find_in_dir(home) {
                tracing::debug!("Found global settings at {:?}", path);
                merger.push(path.clone(), Settings::load_from_file(&path)?);
            }
        }

        let mut project_files = Vec::new();
        let mut check_path = if start.is_file() {
            start.parent().unwrap_or(start)
        } else {
            start
        };

        loop {
            if self.home.as_deref() == Some(check_path) {
                break;
            }
            if let Some(path) = Self::find_in_dir(check_path) {
                tracing::debug!("Found project settings at {:?}", path);
                project_files.push(path);
            }
            match check_path.parent() {
                Some(parent) => check_path = parent,
                None => break,
            }
        }

        // outermost first so the nearest file is applied last
        for path in project_files.into_iter().rev() {
            let settings = Settings::load_from_file(&path)?;
            merger.push(path, settings);
        }

        tracing::debug!("Loaded {} settings layers", merger.layers().len());
        Ok(merger)
    }

    fn find_in_dir(dir: &Path) -> Option<PathBuf> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }
}
