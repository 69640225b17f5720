//! Integration test running prompt entries through real shell processes

#![cfg(unix)]

use pipeshell::{
    CommandConfig, CommandDefaults, CommandOrchestrator, EditorSurface, Error, JobRunner, JobSpec,
    Outcome, ProjectContext, Region, Result, Settings, StagingArea,
};
use std::fs;
use std::sync::Mutex;
use tempfile::TempDir;

#[derive(Default)]
struct TestView {
    text: String,
    selections: Vec<Region>,
    results: Vec<(String, String)>,
    errors: Vec<String>,
}

impl TestView {
    fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            ..Default::default()
        }
    }
}

impl EditorSurface for TestView {
    fn has_text_surface(&self) -> bool {
        true
    }

    fn selections(&self) -> Vec<Region> {
        self.selections.clone()
    }

    fn document_region(&self) -> Region {
        Region::new(0, self.text.len())
    }

    fn region_text(&self, region: Region) -> String {
        self.text[region.start..region.end].to_string()
    }

    fn replace_region(&mut self, region: Region, text: &str) -> Result<()> {
        self.text.replace_range(region.start..region.end, text);
        Ok(())
    }

    fn open_result(&mut self, title: &str, text: &str) -> Result<()> {
        self.results.push((title.to_string(), text.to_string()));
        Ok(())
    }

    fn show_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }
}

/// Runs jobs to completion and keeps their stdout
#[derive(Default)]
struct CapturingJobs {
    outputs: Mutex<Vec<String>>,
}

impl JobRunner for CapturingJobs {
    fn run(&self, job: JobSpec) -> Result<()> {
        let output = std::process::Command::new("sh")
            .arg("-c")
            .arg(&job.command)
            .current_dir(&job.working_dir)
            .output()?;
        self.outputs
            .lock()
            .unwrap()
            .push(String::from_utf8_lossy(&output.stdout).into_owned());
        Ok(())
    }
}

fn sh_settings() -> Settings {
    Settings {
        shell: Some(vec!["sh".to_string(), "-c".to_string()]),
        ..Default::default()
    }
}

#[test]
fn test_sort_replaces_whole_document() {
    let project = TempDir::new().unwrap();
    let orchestrator = CommandOrchestrator::new(&sh_settings()).unwrap();
    let context = ProjectContext::new(vec![project.path().to_path_buf()]);
    let mut view = TestView::new("cherry\napple\nbanana\n");

    let outcome = orchestrator
        .run(&context, "| sort |", &mut view, &CapturingJobs::default())
        .unwrap();

    assert_eq!(outcome, Outcome::Replaced { regions: 1 });
    assert_eq!(view.text, "apple\nbanana\ncherry\n");
}

#[test]
fn test_selections_are_filtered_independently() {
    let project = TempDir::new().unwrap();
    let orchestrator = CommandOrchestrator::new(&sh_settings()).unwrap();
    let context = ProjectContext::new(vec![project.path().to_path_buf()]);
    let mut view = TestView::new("abc xyz abc");
    view.selections = vec![Region::new(0, 3), Region::new(8, 11)];

    orchestrator
        .run(&context, "| tr a-c A-C |", &mut view, &CapturingJobs::default())
        .unwrap();

    assert_eq!(view.text, "ABC xyz ABC");
}

#[test]
fn test_new_buffer_runs_in_project_folder() {
    let project = TempDir::new().unwrap();
    fs::write(project.path().join("marker.txt"), "").unwrap();
    let orchestrator = CommandOrchestrator::new(&sh_settings()).unwrap();
    let context = ProjectContext::new(vec![project.path().to_path_buf()]);
    let mut view = TestView::new("");

    let outcome = orchestrator
        .run(&context, "ls >", &mut view, &CapturingJobs::default())
        .unwrap();

    assert_eq!(outcome, Outcome::Opened { buffers: 1 });
    assert_eq!(view.results, vec![("ls".to_string(), "marker.txt\n".to_string())]);
}

#[test]
fn test_failing_command_reports_streams() {
    let project = TempDir::new().unwrap();
    let orchestrator = CommandOrchestrator::new(&sh_settings()).unwrap();
    let context = ProjectContext::new(vec![project.path().to_path_buf()]);
    let mut view = TestView::new("keep");

    let err = orchestrator
        .run(
            &context,
            "| echo partial; echo broken >&2; exit 5 |",
            &mut view,
            &CapturingJobs::default(),
        )
        .unwrap_err();

    match err {
        Error::ProcessExit {
            exit_code,
            ref stdout,
            ref stderr,
        } => {
            assert_eq!(exit_code, 5);
            assert_eq!(stdout, "partial\n");
            assert_eq!(stderr, "broken\n");
        }
        other => panic!("expected a process exit error, got {other:?}"),
    }
    assert_eq!(view.text, "keep");
    assert_eq!(view.errors.len(), 1);
    assert!(view.errors[0].contains("status 5"));
    assert!(view.errors[0].contains("broken"));
}

#[test]
fn test_piped_job_reads_staged_selection() {
    let project = TempDir::new().unwrap();
    let staging_dir = TempDir::new().unwrap();
    let orchestrator = CommandOrchestrator::new(&sh_settings())
        .unwrap()
        .with_staging(StagingArea::in_dir(staging_dir.path()));
    let context = ProjectContext::new(vec![project.path().to_path_buf()]);
    let mut view = TestView::new("alpha\nbeta\ngamma\n");
    view.selections = vec![Region::new(6, 17)];
    let jobs = CapturingJobs::default();

    let outcome = orchestrator.run(&context, "| wc -l", &mut view, &jobs).unwrap();

    assert!(matches!(outcome, Outcome::Dispatched(_)));
    let outputs = jobs.outputs.lock().unwrap();
    assert_eq!(outputs[0].trim(), "2");
    assert_eq!(orchestrator.staging().len(), 1);

    drop(outputs);
    drop(orchestrator);
    assert_eq!(fs::read_dir(staging_dir.path()).unwrap().count(), 0);
}

#[test]
fn test_staged_input_reaches_every_part_of_compound_command() {
    let project = TempDir::new().unwrap();
    let settings = Settings {
        defaults: Some(CommandDefaults {
            prefix: "set -e; ".to_string(),
            ..Default::default()
        }),
        ..sh_settings()
    };
    let orchestrator = CommandOrchestrator::new(&settings).unwrap();
    let context = ProjectContext::new(vec![project.path().to_path_buf()]);
    let jobs = CapturingJobs::default();

    let mut view = TestView::new("b\na\n");
    orchestrator.run(&context, "| cat", &mut view, &jobs).unwrap();
    let mut view = TestView::new("b\na\n");
    orchestrator
        .run(&context, "| echo sorted:; sort", &mut view, &jobs)
        .unwrap();

    let outputs = jobs.outputs.lock().unwrap();
    assert_eq!(outputs[0], "b\na\n");
    assert_eq!(outputs[1], "sorted:\na\nb\n");
}

#[test]
fn test_configured_wrapping_and_env() {
    let project = TempDir::new().unwrap();
    let settings = Settings {
        commands: vec![
            CommandConfig::new(r"\bgreet\b")
                .with_env("GREETING", "hello")
                .with_wrapping("greet() { echo \"$GREETING $1\"; }; ", ""),
        ],
        ..sh_settings()
    };
    let orchestrator = CommandOrchestrator::new(&settings).unwrap();
    let context = ProjectContext::new(vec![project.path().to_path_buf()]);
    let mut view = TestView::new("");

    orchestrator
        .run(&context, "greet world >", &mut view, &CapturingJobs::default())
        .unwrap();

    assert_eq!(view.results[0].1, "hello world\n");
}
