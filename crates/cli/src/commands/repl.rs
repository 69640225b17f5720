//! Interactive prompt
//!
//! Each line is one invocation. `!!` repeats the last command, `!N` repeats
//! history entry N, `:history` lists the history and `exit` quits. With
//! `--file`, the file is the document: it is re-read before every command and
//! written back when a command replaces text in it.

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;
use tracing::debug;

use pipeshell_core::{CommandHistory, CommandOrchestrator, Outcome, ProjectContext};

use super::open_session;
use crate::cli::ProjectArgs;
use crate::host::{DocumentSurface, ForegroundJobRunner};

pub fn repl_command(project: &ProjectArgs) -> Result<()> {
    let (context, settings, orchestrator) = open_session(project)?;
    let jobs = ForegroundJobRunner::new(settings.shell());
    let mut lines = io::stdin().lock().lines();

    loop {
        print!("{} ", orchestrator.prompt_caption(&context));
        io::stdout().flush().context("Failed to write prompt")?;

        let Some(line) = lines.next() else {
            println!();
            break;
        };
        let line = line.context("Failed to read from stdin")?;

        let raw = match line.trim() {
            "" => continue,
            "exit" | "quit" => break,
            ":history" => {
                print_history(orchestrator.history());
                continue;
            }
            entry if entry.starts_with('!') => match recall(orchestrator.history(), entry) {
                Some(command) => {
                    println!("{command}");
                    command
                }
                None => {
                    eprintln!("❌ No history entry for {entry}");
                    continue;
                }
            },
            entry => entry.to_string(),
        };

        run_entry(&orchestrator, &context, &raw, project.file.as_deref(), &jobs)?;
    }

    Ok(())
}

/// Run one entry against the document in `file`, if any, and route its outcome
fn run_entry(
    orchestrator: &CommandOrchestrator,
    context: &ProjectContext,
    raw: &str,
    file: Option<&Path>,
    jobs: &ForegroundJobRunner,
) -> Result<()> {
    let mut surface = match file {
        Some(file) => DocumentSurface::with_text(
            fs::read_to_string(file)
                .with_context(|| format!("Failed to read {}", file.display()))?,
        ),
        None => DocumentSurface::detached(),
    };

    // errors were shown by the surface; keep prompting
    let Ok(outcome) = orchestrator.run(context, raw, &mut surface, jobs) else {
        return Ok(());
    };
    debug!("Invocation finished: {:?}", outcome);

    match outcome {
        Outcome::Replaced { regions } => {
            if let (Some(file), Some(text)) = (file, surface.text()) {
                if surface.is_modified() {
                    fs::write(file, text)
                        .with_context(|| format!("Failed to write {}", file.display()))?;
                    println!("✏️  Replaced {} region(s) in {}", regions, file.display());
                }
            }
        }
        Outcome::Opened { .. } => {
            for (_, text) in surface.results() {
                print!("{text}");
            }
        }
        Outcome::Dispatched(job) => {
            // the foreground runner has finished, so the staged input is spent
            orchestrator.staging().clear();
            if let Some(code) = jobs.last_exit_code().filter(|code| *code != 0) {
                eprintln!("❌ {} exited with status {}", job.command, code);
            }
        }
    }
    Ok(())
}

/// Resolve `!!` and `!N` (1-based) through the history panel
fn recall(history: &CommandHistory, entry: &str) -> Option<String> {
    let row = match entry {
        "!!" => history.len().checked_sub(1)?,
        _ => entry[1..].parse::<usize>().ok()?.checked_sub(1)?,
    };
    if row >= history.len() {
        return None;
    }
    history.submit(&history.panel_text(), Some(row))
}

fn print_history(history: &CommandHistory) {
    for (i, entry) in history.entries().iter().enumerate() {
        println!("{:>4}  {}", i + 1, entry);
    }
}
