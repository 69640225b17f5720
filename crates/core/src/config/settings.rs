use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{CommandConfig, CommandConfigResolver, CommandDefaults};
use crate::executor::Shell;

/// Contents of a `.pipeshell.json` settings file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Settings {
    /// Run commands in the active file's directory instead of the project folder
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefer_active_file_dir: Option<bool>,

    /// Shell program and flags used for shell-interpreted commands, e.g. `["bash", "-c"]`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shell: Option<Vec<String>>,

    /// Terminal launched by `pipeshell terminal`; `{dir}` in an argument becomes the directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terminal: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub defaults: Option<CommandDefaults>,

    // Tried in order, first match wins
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<CommandConfig>,
}

impl Settings {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let settings: Settings =
            serde_json::from_str(&contents).map_err(|source| Error::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize settings: {e}")))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn prefer_active_file_dir(&self) -> bool {
        self.prefer_active_file_dir.unwrap_or(false)
    }

    /// The configured shell, or the platform default
    pub fn shell(&self) -> Shell {
        self.shell
            .as_deref()
            .and_then(Shell::from_argv)
            .unwrap_or_default()
    }

    pub fn command_defaults(&self) -> CommandDefaults {
        self.defaults.clone().unwrap_or_default()
    }

    pub fn resolver(&self) -> Result<CommandConfigResolver> {
        CommandConfigResolver::new(&self.commands)
    }

    /// Reject settings that would only fail later, at command time
    pub fn validate(&self) -> Result<()> {
        if matches!(self.shell, Some(ref shell) if shell.is_empty()) {
            return Err(Error::Config("`shell` must name a program".to_string()));
        }
        if matches!(self.terminal, Some(ref terminal) if terminal.is_empty()) {
            return Err(Error::Config("`terminal` must name a program".to_string()));
        }
        self.resolver()?;
        Ok(())
    }

    /// Starter settings written by `pipeshell init`
    pub fn example() -> Self {
        Self {
            prefer_active_file_dir: Some(false),
            shell: None,
            terminal: None,
            defaults: Some(CommandDefaults::default()),
            commands: vec![
                CommandConfig {
                    pattern: r"^(make|cargo)\b".to_string(),
                    file_regex: Some(r"^(?:\s+--> )?([^:\s]+):(\d+):?(\d+)?".to_string()),
                    ..Default::default()
                },
                CommandConfig::new(r"^grep\b").with_wrapping("", " --color=never"),
            ],
        }
    }
}
