//! Composes parsing, directory resolution, config lookup and execution
//!
//! One call to [`CommandOrchestrator::run`] is one invocation:
//! parse → validate → resolve config → wrap → execute → route the result.
//! Errors end the invocation, are shown through the surface, and are
//! returned to the caller. Nothing is retried.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::config::{
    CommandConfigResolver, CommandDefaults, ExecOptions, ResolvedCommandConfig, Settings,
};
use crate::directory::DirectoryResolver;
use crate::error::{Error, Result};
use crate::executor::{ProcessExecutor, SystemExecutor};
use crate::history::CommandHistory;
use crate::host::{EditorSurface, JobRunner, JobSpec, Region};
use crate::parser::parse_command_line;
use crate::staging::StagingArea;
use crate::terminal::TerminalLauncher;
use crate::types::{ExecutionRequest, OutputMode, ParsedCommand, ProjectContext};

/// What an invocation did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Input regions were overwritten with the command output
    Replaced { regions: usize },
    /// Result buffers were opened with the command output
    Opened { buffers: usize },
    /// The command was handed to the host job runner
    Dispatched(JobSpec),
}

pub struct CommandOrchestrator {
    defaults: CommandDefaults,
    resolver: CommandConfigResolver,
    directories: DirectoryResolver,
    terminal: TerminalLauncher,
    executor: Arc<dyn ProcessExecutor>,
    history: Arc<CommandHistory>,
    staging: StagingArea,
}

impl CommandOrchestrator {
    /// Build an orchestrator from merged settings
    pub fn new(settings: &Settings) -> Result<Self> {
        Ok(Self {
            defaults: settings.command_defaults(),
            resolver: settings.resolver()?,
            directories: DirectoryResolver::new(settings.prefer_active_file_dir()),
            terminal: TerminalLauncher::from_settings(settings.terminal.as_deref()),
            executor: Arc::new(SystemExecutor::new(settings.shell())),
            history: Arc::new(CommandHistory::new()),
            staging: StagingArea::new(),
        })
    }

    pub fn with_executor(mut self, executor: Arc<dyn ProcessExecutor>) -> Self {
        self.executor = executor;
        self
    }

    /// Share a history with other sessions
    pub fn with_history(mut self, history: Arc<CommandHistory>) -> Self {
        self.history = history;
        self
    }

    pub fn with_directory_resolver(mut self, directories: DirectoryResolver) -> Self {
        self.directories = directories;
        self
    }

    pub fn with_staging(mut self, staging: StagingArea) -> Self {
        self.staging = staging;
        self
    }

    pub fn history(&self) -> &Arc<CommandHistory> {
        &self.history
    }

    pub fn staging(&self) -> &StagingArea {
        &self.staging
    }

    pub fn working_dir(&self, project: &ProjectContext) -> PathBuf {
        self.directories.resolve_context(project)
    }

    /// Effective configuration for `shell_text`
    pub fn resolve_config(&self, shell_text: &str) -> ResolvedCommandConfig {
        self.resolver.resolve(shell_text, &self.defaults)
    }

    /// Caption for the input box, e.g. `/work/app $`
    pub fn prompt_caption(&self, project: &ProjectContext) -> String {
        format!("{} $", self.working_dir(project).display())
    }

    /// Open a terminal in the working directory
    pub fn launch_terminal(&self, project: &ProjectContext) -> Result<()> {
        let dir = self.working_dir(project);
        self.terminal.launch(self.executor.as_ref(), &dir)
    }

    /// Run one prompt entry end to end.
    pub fn run(
        &self,
        project: &ProjectContext,
        raw: &str,
        surface: &mut dyn EditorSurface,
        jobs: &dyn JobRunner,
    ) -> Result<Outcome> {
        match self.invoke(project, raw, surface, jobs) {
            Ok(outcome) => {
                debug!("Invocation finished with {:?}", outcome);
                Ok(outcome)
            }
            Err(err) => {
                surface.show_error(&err.to_string());
                Err(err)
            }
        }
    }

    fn invoke(
        &self,
        project: &ProjectContext,
        raw: &str,
        surface: &mut dyn EditorSurface,
        jobs: &dyn JobRunner,
    ) -> Result<Outcome> {
        let parsed = parse_command_line(raw);
        self.history.record(raw.trim());

        validate(&parsed, surface)?;

        let dir = self.working_dir(project);
        let config = self.resolve_config(&parsed.shell_text);
        let command = config.wrap(&parsed.shell_text);
        info!("Running {:?} in {:?}", command, dir);

        if parsed.output_mode.captures_output() {
            return self.run_captured(&parsed, &dir, &command, &config.options, surface);
        }

        let job = if parsed.has_input_pipe {
            let input = joined_input(surface)?;
            let staged = self.staging.stage(&input)?;
            let piped = self.executor.shell().pipe_file_into(&staged, &command);
            JobSpec::new(piped, dir, &config.options)
        } else {
            JobSpec::new(command, dir, &config.options)
        };

        debug!("Dispatching {:?} to the job runner", job.command);
        jobs.run(job.clone())?;
        surface.show_status(&format!(
            "Started `{}` in {}",
            parsed.shell_text,
            job.working_dir.display()
        ));
        Ok(Outcome::Dispatched(job))
    }

    /// Run synchronously once per input region, then route every output.
    ///
    /// Sinks are only touched after all runs succeeded, so a failure leaves
    /// the document as it was.
    fn run_captured(
        &self,
        parsed: &ParsedCommand,
        dir: &Path,
        command: &str,
        options: &ExecOptions,
        surface: &mut dyn EditorSurface,
    ) -> Result<Outcome> {
        let regions = if parsed.has_input_pipe {
            input_regions(surface)?
        } else {
            Vec::new()
        };

        let inputs: Vec<Option<String>> = if regions.is_empty() {
            vec![None]
        } else {
            regions
                .iter()
                .map(|region| Some(surface.region_text(*region)))
                .collect()
        };

        let mut outputs = Vec::with_capacity(inputs.len());
        for input in inputs {
            let mut request =
                ExecutionRequest::shell(dir, command).with_options(options.clone());
            request.input = input;

            let result = self
                .executor
                .execute(&request)?
                .ok_or_else(|| Error::Transport {
                    command: command.to_string(),
                    source: io::Error::other("no result for a waited command"),
                })?;
            outputs.push(result.into_result()?);
        }

        match parsed.output_mode {
            OutputMode::ReplaceSelection => {
                // last region first so earlier offsets stay valid
                for (region, output) in regions.iter().zip(&outputs).rev() {
                    surface.replace_region(*region, output)?;
                }
                Ok(Outcome::Replaced {
                    regions: regions.len(),
                })
            }
            _ => {
                for output in &outputs {
                    surface.open_result(&parsed.shell_text, output)?;
                }
                Ok(Outcome::Opened {
                    buffers: outputs.len(),
                })
            }
        }
    }
}

/// Semantic checks the parser leaves to the orchestrator
pub fn validate(parsed: &ParsedCommand, surface: &dyn EditorSurface) -> Result<()> {
    if parsed.shell_text.is_empty() {
        return Err(Error::UserInput("No command entered".to_string()));
    }
    if parsed.output_mode == OutputMode::ReplaceSelection && !parsed.has_input_pipe {
        return Err(Error::UserInput(
            "A trailing `|` replaces the piped-in text; start the command with `|` to pipe text in"
                .to_string(),
        ));
    }
    let needs_text = parsed.has_input_pipe || parsed.output_mode == OutputMode::ReplaceSelection;
    if needs_text && !surface.has_text_surface() {
        return Err(Error::UserInput(
            "`|` needs an active text view to read from".to_string(),
        ));
    }
    Ok(())
}

/// Selections in document order, or the whole document when nothing is selected.
///
/// Overlapping selections and selections past the end of the document are
/// rejected, since replacing one would shift the text under another.
pub fn input_regions(surface: &dyn EditorSurface) -> Result<Vec<Region>> {
    let document = surface.document_region();
    let mut regions: Vec<Region> = surface
        .selections()
        .into_iter()
        .filter(|region| !region.is_empty())
        .collect();
    if regions.is_empty() {
        return Ok(vec![document]);
    }
    regions.sort();

    if let Some(region) = regions.iter().find(|region| region.end > document.end) {
        return Err(Error::UserInput(format!(
            "Selection {}:{} is outside the document",
            region.start, region.end
        )));
    }
    if let Some(pair) = regions.windows(2).find(|pair| pair[1].start < pair[0].end) {
        return Err(Error::UserInput(format!(
            "Selections {}:{} and {}:{} overlap",
            pair[0].start, pair[0].end, pair[1].start, pair[1].end
        )));
    }
    Ok(regions)
}

/// All input text as one blob; a newline separates regions that lack one
fn joined_input(surface: &dyn EditorSurface) -> Result<String> {
    let mut input = String::new();
    for region in input_regions(surface)? {
        if !input.is_empty() && !input.ends_with('\n') {
            input.push('\n');
        }
        input.push_str(&surface.region_text(region));
    }
    Ok(input)
}
