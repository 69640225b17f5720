use serde::Serialize;
use std::path::PathBuf;

use pipeshell_core::config::ResolvedCommandConfig;
use pipeshell_core::{OutputMode, ParsedCommand};

/// Everything `parse` and `run --dry-run` report about a command line
#[derive(Debug, Serialize)]
pub struct CommandReport {
    pub raw: String,
    pub shell_text: String,
    pub has_input_pipe: bool,
    pub output_mode: OutputMode,
    pub working_dir: PathBuf,
    pub command: String,
    pub config: ResolvedCommandConfig,
}

impl CommandReport {
    pub fn new(
        raw: &str,
        parsed: &ParsedCommand,
        working_dir: PathBuf,
        config: ResolvedCommandConfig,
    ) -> Self {
        Self {
            raw: raw.to_string(),
            shell_text: parsed.shell_text.clone(),
            has_input_pipe: parsed.has_input_pipe,
            output_mode: parsed.output_mode,
            working_dir,
            command: config.wrap(&parsed.shell_text),
            config,
        }
    }
}

fn describe_input(report: &CommandReport) -> &'static str {
    if report.has_input_pipe {
        "selected text (or the whole document)"
    } else {
        "none"
    }
}

fn describe_output(report: &CommandReport) -> &'static str {
    match report.output_mode {
        OutputMode::ReplaceSelection => "replaces the input text",
        OutputMode::NewBuffer => "opens in a new buffer",
        OutputMode::None => "streamed by the job runner",
    }
}

pub fn print_command_report(report: &CommandReport) {
    println!("🔍 Command line: {}", report.raw);
    println!("{}", "=".repeat(80));
    println!("   🔧 Command breakdown:");
    println!("      • shell text: {}", report.shell_text);
    println!("      • input: {}", describe_input(report));
    println!("      • output: {}", describe_output(report));

    match report.config.matched_pattern {
        Some(ref pattern) => println!("   🎯 Matched pattern: {pattern}"),
        None => println!("   🎯 Matched pattern: none (defaults)"),
    }
    if !report.config.prefix.is_empty() {
        println!("      • prefix: {:?}", report.config.prefix);
    }
    if !report.config.suffix.is_empty() {
        println!("      • suffix: {:?}", report.config.suffix);
    }

    let options = &report.config.options;
    if !options.env.is_empty() {
        println!("   🌍 Environment ({:?}):", options.env_mode);
        for (key, value) in &options.env {
            println!("      {key}={value}");
        }
    }
    if let Some(ref path) = options.path {
        println!("   🛤️  PATH: {path}");
    }
    if let Some(ref regex) = options.file_regex {
        println!("   📄 file_regex: {regex}");
    }
    if let Some(ref regex) = options.line_regex {
        println!("   📏 line_regex: {regex}");
    }

    println!("   📁 Working directory: {}", report.working_dir.display());
    println!("   ▶️  Runs: {}", report.command);
}
