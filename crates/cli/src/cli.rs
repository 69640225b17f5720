use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use pipeshell_core::{ConfigLoader, ProjectContext, Settings};

use crate::commands::{
    dir_command, init_command, parse_command, repl_command, run_command, terminal_command,
};

#[derive(Parser, Debug)]
#[command(name = "pipeshell")]
#[command(version, about, long_about = None)]
#[command(
    after_help = "ENVIRONMENT:\n    RUST_LOG=debug            Enable debug logging\n    PIPESHELL_CONFIG=<file>   Use this settings file instead of discovery"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// The project the command runs against
#[derive(Args, Debug, Clone, Default)]
pub struct ProjectArgs {
    /// Open project folder; repeat for several (defaults to the current directory)
    #[arg(long = "folder", value_name = "DIR")]
    pub folders: Vec<PathBuf>,

    /// The active file, used as the document for `|` commands
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Settings file to use instead of discovery
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl ProjectArgs {
    pub fn context(&self) -> Result<ProjectContext> {
        let folders = if self.folders.is_empty() {
            vec![std::env::current_dir().context("Failed to get current directory")?]
        } else {
            self.folders.clone()
        };

        let mut context = ProjectContext::new(folders);
        if let Some(ref file) = self.file {
            let file = std::path::absolute(file)
                .with_context(|| format!("Failed to resolve {}", file.display()))?;
            context = context.with_active_file(file);
        }
        Ok(context)
    }

    /// Merged settings for the project, starting discovery at the active file
    pub fn settings(&self, context: &ProjectContext) -> Result<Settings> {
        let mut loader = ConfigLoader::from_env();
        if let Some(ref config) = self.config {
            loader = loader.with_explicit_file(config);
        }

        let start = match context
            .active_file()
            .map(Path::to_path_buf)
            .or_else(|| context.folders.first().cloned())
        {
            Some(start) => start,
            None => std::env::current_dir().context("Failed to get current directory")?,
        };

        loader
            .load_from_path(&start)
            .context("Failed to load settings")
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one command line, e.g. `| sort |` or `make test`
    #[command(visible_alias = "r")]
    Run {
        /// The command line, with optional leading `|` and trailing `|` or `>`
        command: String,

        #[command(flatten)]
        project: ProjectArgs,

        /// Read the document from stdin instead of --file
        #[arg(long, conflicts_with = "file")]
        stdin: bool,

        /// Selected byte range START:END; repeat for several selections
        #[arg(short, long = "select", value_name = "START:END")]
        selections: Vec<String>,

        /// Write replaced text back to --file instead of printing it
        #[arg(short, long, requires = "file")]
        in_place: bool,

        /// Print what would run without executing it
        #[arg(short, long)]
        dry_run: bool,
    },
    /// Read command lines from stdin until EOF, keeping a history
    Repl {
        #[command(flatten)]
        project: ProjectArgs,
    },
    /// Show how a command line is parsed and wrapped
    #[command(visible_alias = "p")]
    Parse {
        command: String,

        #[command(flatten)]
        project: ProjectArgs,

        /// Print JSON instead of the formatted breakdown
        #[arg(long)]
        json: bool,
    },
    /// Print the directory commands would run in
    Dir {
        #[command(flatten)]
        project: ProjectArgs,

        /// Print the prompt caption, e.g. `/work/app $`
        #[arg(long)]
        caption: bool,
    },
    /// Write a starter settings file
    Init {
        /// Directory to write into (defaults to the current directory)
        #[arg(short, long)]
        cwd: Option<PathBuf>,

        /// Write the global settings file in the home directory instead
        #[arg(short, long, conflicts_with = "cwd")]
        global: bool,

        /// Overwrite an existing settings file
        #[arg(short, long)]
        force: bool,
    },
    /// Open a terminal in the directory commands would run in
    Terminal {
        #[command(flatten)]
        project: ProjectArgs,

        /// Print the terminal command without launching it
        #[arg(short, long)]
        dry_run: bool,
    },
}

impl Commands {
    /// Execute the command
    pub fn execute(self) -> Result<()> {
        match self {
            Commands::Run {
                command,
                project,
                stdin,
                selections,
                in_place,
                dry_run,
            } => run_command(
                &command,
                &project,
                crate::commands::RunOptions {
                    stdin,
                    selections,
                    in_place,
                    dry_run,
                },
            ),
            Commands::Repl { project } => repl_command(&project),
            Commands::Parse {
                command,
                project,
                json,
            } => parse_command(&command, &project, json),
            Commands::Dir { project, caption } => dir_command(&project, caption),
            Commands::Init { cwd, global, force } => init_command(cwd.as_deref(), global, force),
            Commands::Terminal { project, dry_run } => terminal_command(&project, dry_run),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_arguments() {
        let cli = Cli::try_parse_from([
            "pipeshell",
            "run",
            "| sort |",
            "--file",
            "notes.txt",
            "-s",
            "0:10",
            "-s",
            "20:30",
            "--in-place",
        ])
        .unwrap();

        match cli.command {
            Commands::Run {
                command,
                project,
                selections,
                in_place,
                ..
            } => {
                assert_eq!(command, "| sort |");
                assert_eq!(project.file, Some(PathBuf::from("notes.txt")));
                assert_eq!(selections, vec!["0:10", "20:30"]);
                assert!(in_place);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_in_place_requires_file() {
        assert!(Cli::try_parse_from(["pipeshell", "run", "| sort |", "--in-place"]).is_err());
    }

    #[test]
    fn test_context_defaults_to_current_dir() {
        let context = ProjectArgs::default().context().unwrap();
        assert_eq!(context.folders, vec![std::env::current_dir().unwrap()]);
        assert!(context.active_file.is_none());
    }
}
