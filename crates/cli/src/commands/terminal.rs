use anyhow::{Context, Result};
use pipeshell_core::TerminalLauncher;

use super::open_session;
use crate::cli::ProjectArgs;

pub fn terminal_command(project: &ProjectArgs, dry_run: bool) -> Result<()> {
    let (context, settings, orchestrator) = open_session(project)?;
    let dir = orchestrator.working_dir(&context);

    if dry_run {
        let launcher = TerminalLauncher::from_settings(settings.terminal.as_deref());
        println!("{}", launcher.argv_for(&dir).join(" "));
        println!("Working directory: {}", dir.display());
        return Ok(());
    }

    println!("🖥️  Opening terminal in {}", dir.display());
    orchestrator
        .launch_terminal(&context)
        .context("Failed to launch terminal")
}
