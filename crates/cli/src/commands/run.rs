use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Read, Write};
use tracing::{debug, info};

use pipeshell_core::{Outcome, parse_command_line};

use super::open_session;
use crate::cli::ProjectArgs;
use crate::display::{CommandReport, print_command_report};
use crate::host::{DocumentSurface, ForegroundJobRunner};

#[derive(Debug, Default)]
pub struct RunOptions {
    pub stdin: bool,
    pub selections: Vec<String>,
    pub in_place: bool,
    pub dry_run: bool,
}

pub fn run_command(raw: &str, project: &ProjectArgs, options: RunOptions) -> Result<()> {
    let (context, settings, orchestrator) = open_session(project)?;

    if options.dry_run {
        let parsed = parse_command_line(raw);
        let report = CommandReport::new(
            raw,
            &parsed,
            orchestrator.working_dir(&context),
            orchestrator.resolve_config(&parsed.shell_text),
        );
        print_command_report(&report);
        return Ok(());
    }

    let mut surface = load_document(project, &options)?
        .with_selections(&options.selections)
        .context("Invalid selection")?;
    let jobs = ForegroundJobRunner::new(settings.shell());

    let exit_code = match orchestrator.run(&context, raw, &mut surface, &jobs) {
        Ok(outcome) => {
            debug!("Run finished: {:?}", outcome);
            write_outcome(&outcome, &surface, project, options.in_place)?;
            match outcome {
                Outcome::Dispatched(_) => jobs.last_exit_code().unwrap_or(0),
                _ => 0,
            }
        }
        // already reported through the surface
        Err(_) => 1,
    };

    // staged input must be removed before exiting
    drop(orchestrator);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
    Ok(())
}

fn load_document(project: &ProjectArgs, options: &RunOptions) -> Result<DocumentSurface> {
    if options.stdin {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read document from stdin")?;
        return Ok(DocumentSurface::with_text(text));
    }

    match project.file {
        Some(ref file) => {
            let text = fs::read_to_string(file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            Ok(DocumentSurface::with_text(text))
        }
        None => Ok(DocumentSurface::detached()),
    }
}

fn write_outcome(
    outcome: &Outcome,
    surface: &DocumentSurface,
    project: &ProjectArgs,
    in_place: bool,
) -> Result<()> {
    match outcome {
        Outcome::Replaced { regions } => {
            let text = surface.text().unwrap_or_default();
            match project.file {
                Some(ref file) if in_place => {
                    fs::write(file, text)
                        .with_context(|| format!("Failed to write {}", file.display()))?;
                    info!("Wrote {} replaced region(s) to {:?}", regions, file);
                    eprintln!("✅ Replaced {} region(s) in {}", regions, file.display());
                }
                _ => print_text(text)?,
            }
        }
        Outcome::Opened { .. } => {
            for (_, text) in surface.results() {
                print_text(text)?;
            }
        }
        Outcome::Dispatched(_) => {}
    }
    Ok(())
}

fn print_text(text: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(text.as_bytes())
        .and_then(|()| stdout.flush())
        .context("Failed to write output")
}
