//! End-to-end tests for the pipeshell binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// The binary with an isolated home and no settings override
fn pipeshell(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("pipeshell").unwrap();
    cmd.env("HOME", home.path()).env_remove("PIPESHELL_CONFIG");
    cmd
}

#[test]
fn test_parse_json_reports_markers() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();

    pipeshell(&home)
        .args(["parse", "--json", "| sort |", "--folder"])
        .arg(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"output_mode\": \"replace_selection\""))
        .stdout(predicate::str::contains("\"shell_text\": \"sort\""));
}

#[test]
fn test_dir_caption() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();

    pipeshell(&home)
        .args(["dir", "--caption", "--folder"])
        .arg(project.path())
        .assert()
        .success()
        .stdout(format!("{} $\n", project.path().display()));
}

#[test]
fn test_init_writes_settings_once() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();

    pipeshell(&home)
        .args(["init", "--cwd"])
        .arg(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Created settings"));
    assert!(project.path().join(".pipeshell.json").is_file());

    pipeshell(&home)
        .args(["init", "--cwd"])
        .arg(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("already exist"));
}

#[test]
fn test_trailing_pipe_without_input_fails() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();

    pipeshell(&home)
        .args(["run", "ls |", "--folder"])
        .arg(project.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("❌"));
}

#[cfg(unix)]
mod unix {
    use super::*;

    #[test]
    fn test_replace_document_from_stdin() {
        let home = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();

        pipeshell(&home)
            .args(["run", "| sort |", "--stdin", "--folder"])
            .arg(project.path())
            .write_stdin("pear\napple\n")
            .assert()
            .success()
            .stdout("apple\npear\n");
    }

    #[test]
    fn test_replace_selection_in_place() {
        let home = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        let file = project.path().join("notes.txt");
        fs::write(&file, "hello world").unwrap();

        pipeshell(&home)
            .args(["run", "| tr a-z A-Z |", "--select", "6:11", "--in-place", "--file"])
            .arg(&file)
            .assert()
            .success();

        assert_eq!(fs::read_to_string(&file).unwrap(), "hello WORLD");
    }

    #[test]
    fn test_new_buffer_uses_matching_settings() {
        let home = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        let settings = serde_json::json!({
            "commands": [
                { "pattern": "^echo", "suffix": " world" }
            ]
        });
        fs::write(
            project.path().join(".pipeshell.json"),
            serde_json::to_string_pretty(&settings).unwrap(),
        )
        .unwrap();

        pipeshell(&home)
            .args(["run", "echo hello >", "--folder"])
            .arg(project.path())
            .assert()
            .success()
            .stdout("hello world\n");
    }

    #[test]
    fn test_job_exit_code_is_propagated() {
        let home = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();

        pipeshell(&home)
            .args(["run", "exit 3", "--folder"])
            .arg(project.path())
            .assert()
            .code(3);
    }

    #[test]
    fn test_piped_job_reads_staged_input() {
        let home = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        let file = project.path().join("words.txt");
        fs::write(&file, "one\ntwo\nthree\n").unwrap();

        pipeshell(&home)
            .args(["run", "| grep t", "--file"])
            .arg(&file)
            .arg("--folder")
            .arg(project.path())
            .assert()
            .success()
            .stdout("two\nthree\n");
    }

    #[test]
    fn test_failed_command_leaves_file_alone() {
        let home = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        let file = project.path().join("data.txt");
        fs::write(&file, "keep me").unwrap();

        pipeshell(&home)
            .args(["run", "| echo oops >&2; exit 2 |", "--in-place", "--file"])
            .arg(&file)
            .assert()
            .failure()
            .stderr(predicate::str::contains("oops"));

        assert_eq!(fs::read_to_string(&file).unwrap(), "keep me");
    }

    #[test]
    fn test_repl_runs_and_recalls() {
        let home = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();

        pipeshell(&home)
            .args(["repl", "--folder"])
            .arg(project.path())
            .write_stdin("echo first >\n!!\n:history\nexit\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("first\n").count(2))
            .stdout(predicate::str::contains("   1  echo first >"));
    }
}
