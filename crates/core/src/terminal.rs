//! Opening an interactive terminal in the resolved directory

use std::path::Path;
use tracing::info;

use crate::error::{Error, Result};
use crate::executor::ProcessExecutor;
use crate::types::ExecutionRequest;

/// Placeholder replaced by the working directory in terminal arguments
pub const DIR_PLACEHOLDER: &str = "{dir}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalLauncher {
    argv: Vec<String>,
}

impl TerminalLauncher {
    pub fn new(argv: Vec<String>) -> Self {
        Self { argv }
    }

    pub fn platform_default() -> Self {
        let argv: &[&str] = if cfg!(windows) {
            &["cmd.exe", "/C", "start", "cmd.exe"]
        } else if cfg!(target_os = "macos") {
            &["open", "-a", "Terminal", DIR_PLACEHOLDER]
        } else {
            &["x-terminal-emulator"]
        };
        Self::new(argv.iter().map(|s| s.to_string()).collect())
    }

    /// Settings value if present, the platform default otherwise
    pub fn from_settings(terminal: Option<&[String]>) -> Self {
        match terminal {
            Some(argv) if !argv.is_empty() => Self::new(argv.to_vec()),
            _ => Self::platform_default(),
        }
    }

    /// The argument vector for `dir`
    pub fn argv_for(&self, dir: &Path) -> Vec<String> {
        let dir = dir.display().to_string();
        self.argv
            .iter()
            .map(|arg| arg.replace(DIR_PLACEHOLDER, &dir))
            .collect()
    }

    /// Start the terminal without waiting for it
    pub fn launch(&self, executor: &dyn ProcessExecutor, dir: &Path) -> Result<()> {
        if self.argv.is_empty() {
            return Err(Error::Config("No terminal program configured".to_string()));
        }
        let request = ExecutionRequest::argv(dir, self.argv_for(dir)).detached();
        info!("Launching terminal {} in {:?}", request.command, dir);
        executor.execute(&request)?;
        Ok(())
    }
}

impl Default for TerminalLauncher {
    fn default() -> Self {
        Self::platform_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_placeholder_is_replaced() {
        let launcher = TerminalLauncher::new(vec![
            "alacritty".to_string(),
            "--working-directory".to_string(),
            "{dir}".to_string(),
        ]);
        let argv = launcher.argv_for(&PathBuf::from("/work/app"));
        assert_eq!(argv, vec!["alacritty", "--working-directory", "/work/app"]);
    }

    #[test]
    fn test_from_settings_falls_back_to_platform_default() {
        assert_eq!(
            TerminalLauncher::from_settings(None),
            TerminalLauncher::platform_default()
        );
        assert_eq!(
            TerminalLauncher::from_settings(Some(&[])),
            TerminalLauncher::platform_default()
        );
        let custom = vec!["kitty".to_string()];
        assert_eq!(
            TerminalLauncher::from_settings(Some(&custom)),
            TerminalLauncher::new(custom.clone())
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_launch_uses_detached_argv_request() {
        use crate::executor::SystemExecutor;

        let temp_dir = tempfile::TempDir::new().unwrap();
        let launcher = TerminalLauncher::new(vec!["true".to_string()]);
        launcher
            .launch(&SystemExecutor::default(), temp_dir.path())
            .unwrap();

        let missing = TerminalLauncher::new(vec!["pipeshell-no-such-terminal".to_string()]);
        assert!(missing.launch(&SystemExecutor::default(), temp_dir.path()).is_err());
    }
}
