use anyhow::{Context, Result};
use pipeshell_core::parse_command_line;

use super::open_session;
use crate::cli::ProjectArgs;
use crate::display::{CommandReport, print_command_report};

pub fn parse_command(raw: &str, project: &ProjectArgs, json: bool) -> Result<()> {
    let (context, _, orchestrator) = open_session(project)?;
    let parsed = parse_command_line(raw);
    let report = CommandReport::new(
        raw,
        &parsed,
        orchestrator.working_dir(&context),
        orchestrator.resolve_config(&parsed.shell_text),
    );

    if json {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{json}");
    } else {
        print_command_report(&report);
    }
    Ok(())
}
