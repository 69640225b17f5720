use std::path::Path;
use std::process::Command;

/// The command interpreter used for shell-interpreted commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shell {
    program: String,
    args: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShellFamily {
    Posix,
    Cmd,
    PowerShell,
}

impl Shell {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// `cmd.exe /C` on Windows, `sh -c` everywhere else
    pub fn platform_default() -> Self {
        if cfg!(windows) {
            Self::new("cmd.exe", vec!["/C".to_string()])
        } else {
            Self::new("sh", vec!["-c".to_string()])
        }
    }

    /// Build from a settings entry such as `["bash", "-c"]`
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self::new(program.clone(), args.to_vec()))
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// A `Command` that runs `command_text` through this shell
    pub fn command(&self, command_text: &str) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args).arg(command_text);
        cmd
    }

    /// Shell text that runs all of `command_text` with stdin read from `path`.
    ///
    /// The whole command is grouped before redirecting, so every part of a
    /// compound command such as `set -e; sort` sees the same stdin.
    pub fn pipe_file_into(&self, path: &Path, command_text: &str) -> String {
        let path = path.display().to_string();
        match self.family() {
            ShellFamily::Posix => format!("{{ {command_text}\n}} < {}", posix_quote(&path)),
            ShellFamily::Cmd => format!("({command_text}) < \"{path}\""),
            ShellFamily::PowerShell => format!(
                "Get-Content -Raw '{}' | & {{ {} }}",
                path.replace('\'', "''"),
                command_text
            ),
        }
    }

    fn family(&self) -> ShellFamily {
        // split by hand so Windows paths are understood on every host
        let base = self.program.rsplit(['/', '\\']).next().unwrap_or_default();
        let name = base.split('.').next().unwrap_or_default().to_lowercase();
        match name.as_str() {
            "cmd" => ShellFamily::Cmd,
            "powershell" | "pwsh" => ShellFamily::PowerShell,
            _ => ShellFamily::Posix,
        }
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::platform_default()
    }
}

/// Single-quote `text` for a POSIX shell
pub fn posix_quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', r"'\''"))
}
