//! Process execution
//!
//! Two paths: a waited run that feeds stdin and captures both output streams,
//! and a detached run that only reports whether the process could be started.
//! Neither path retries or times out.

use std::io::{self, Write};
use std::process::{Command, Stdio};
use std::thread;
use std::time::Instant;

use tracing::{debug, info, warn};

use super::Shell;
use crate::config::{EnvMode, ExecOptions};
use crate::error::{Error, Result};
use crate::types::{CommandLine, ExecutionRequest, ExecutionResult};

/// Runs processes on behalf of the orchestrator
pub trait ProcessExecutor: Send + Sync {
    /// Run `request`.
    ///
    /// Returns `Ok(None)` for a detached request once the process has started,
    /// and `Ok(Some(result))` for a waited request once it has exited.
    fn execute(&self, request: &ExecutionRequest) -> Result<Option<ExecutionResult>>;

    /// The shell used for shell-interpreted commands
    fn shell(&self) -> &Shell;
}

/// [`ProcessExecutor`] backed by `std::process`
#[derive(Debug, Clone, Default)]
pub struct SystemExecutor {
    shell: Shell,
}

impl SystemExecutor {
    pub fn new(shell: Shell) -> Self {
        Self { shell }
    }

    fn build_command(&self, request: &ExecutionRequest) -> Result<Command> {
        let mut cmd = match &request.command {
            CommandLine::Shell(text) => self.shell.command(text),
            CommandLine::Argv(args) => {
                let (program, rest) = args
                    .split_first()
                    .ok_or_else(|| Error::UserInput("No command specified".to_string()))?;
                let mut cmd = Command::new(program);
                cmd.args(rest);
                cmd
            }
        };
        cmd.current_dir(&request.working_dir);
        apply_options(&mut cmd, &request.options);
        Ok(cmd)
    }

    fn run_and_wait(&self, request: &ExecutionRequest, mut cmd: Command) -> Result<ExecutionResult> {
        let command_text = request.command.to_string();
        let started = Instant::now();

        cmd.stdin(if request.input.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

        let mut child = cmd.spawn().map_err(|source| Error::Spawn {
            command: command_text.clone(),
            source,
        })?;
        debug!("Spawned pid {} for {:?}", child.id(), command_text);

        // Feed stdin from another thread so a chatty child cannot fill its
        // stdout pipe while we are still blocked writing input.
        let writer = match (&request.input, child.stdin.take()) {
            (Some(input), Some(mut stdin)) => {
                let input = input.clone();
                Some(thread::spawn(move || stdin.write_all(input.as_bytes())))
            }
            _ => None,
        };

        let output = child.wait_with_output().map_err(|source| Error::Transport {
            command: command_text.clone(),
            source,
        })?;

        if let Some(writer) = writer {
            match writer.join() {
                Ok(Ok(())) => {}
                // the child stopped reading early, e.g. `head -1`
                Ok(Err(e)) if e.kind() == io::ErrorKind::BrokenPipe => {
                    debug!("{:?} closed stdin before all input was written", command_text);
                }
                Ok(Err(source)) => {
                    return Err(Error::Transport {
                        command: command_text,
                        source,
                    });
                }
                Err(_) => {
                    return Err(Error::Transport {
                        command: command_text,
                        source: io::Error::other("stdin writer thread panicked"),
                    });
                }
            }
        }

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        // killed by a signal: no exit code
        let exit_code = output.status.code().unwrap_or(-1);

        info!(
            "{:?} exited with {} after {:?}",
            command_text,
            exit_code,
            started.elapsed()
        );

        if output.status.success() {
            Ok(ExecutionResult::Success { stdout })
        } else {
            Ok(ExecutionResult::Failure {
                exit_code,
                stdout,
                stderr,
            })
        }
    }

    fn spawn_detached(&self, request: &ExecutionRequest, mut cmd: Command) -> Result<()> {
        let command_text = request.command.to_string();
        if request.input.is_some() {
            warn!("Input is ignored for detached command {:?}", command_text);
        }

        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        let mut child = cmd.spawn().map_err(|source| Error::Spawn {
            command: command_text.clone(),
            source,
        })?;
        info!("Started detached pid {} for {:?}", child.id(), command_text);

        // reap the child so it does not linger as a zombie
        thread::spawn(move || match child.wait() {
            Ok(status) => debug!("Detached {:?} finished with {}", command_text, status),
            Err(e) => warn!("Failed to wait for detached {:?}: {}", command_text, e),
        });

        Ok(())
    }
}

impl ProcessExecutor for SystemExecutor {
    fn execute(&self, request: &ExecutionRequest) -> Result<Option<ExecutionResult>> {
        debug!(
            "Executing {} in {:?} (wait: {})",
            request.command, request.working_dir, request.wait
        );
        let cmd = self.build_command(request)?;

        if request.wait {
            self.run_and_wait(request, cmd).map(Some)
        } else {
            self.spawn_detached(request, cmd).map(|()| None)
        }
    }

    fn shell(&self) -> &Shell {
        &self.shell
    }
}

/// Apply environment options to a command
pub fn apply_options(cmd: &mut Command, options: &ExecOptions) {
    if options.env_mode == EnvMode::Replace {
        cmd.env_clear();
    }
    for (key, value) in &options.env {
        cmd.env(key, value);
    }
    if let Some(ref path) = options.path {
        cmd.env("PATH", path);
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    fn run(request: ExecutionRequest) -> ExecutionResult {
        SystemExecutor::default()
            .execute(&request)
            .unwrap()
            .expect("waited request returns a result")
    }

    #[test]
    fn test_echo_succeeds() {
        let temp_dir = TempDir::new().unwrap();
        let result = run(ExecutionRequest::shell(temp_dir.path(), "echo hello"));
        assert_eq!(
            result,
            ExecutionResult::Success {
                stdout: "hello\n".to_string()
            }
        );
    }

    #[test]
    fn test_exit_code_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let result = run(ExecutionRequest::shell(
            temp_dir.path(),
            "echo out; echo err >&2; exit 3",
        ));
        assert_eq!(
            result,
            ExecutionResult::Failure {
                exit_code: 3,
                stdout: "out\n".to_string(),
                stderr: "err\n".to_string(),
            }
        );
    }

    #[test]
    fn test_input_is_piped_to_stdin() {
        let temp_dir = TempDir::new().unwrap();
        let result = run(ExecutionRequest::shell(temp_dir.path(), "sort").with_input("b\nc\na\n"));
        assert_eq!(result.stdout(), "a\nb\nc\n");
    }

    #[test]
    fn test_large_input_does_not_deadlock() {
        let temp_dir = TempDir::new().unwrap();
        let input = "line of text\n".repeat(50_000);
        let result = run(ExecutionRequest::shell(temp_dir.path(), "cat").with_input(input.clone()));
        assert_eq!(result.stdout().len(), input.len());
    }

    #[test]
    fn test_early_exit_is_not_a_transport_error() {
        let temp_dir = TempDir::new().unwrap();
        let input = "x\n".repeat(200_000);
        let result = run(ExecutionRequest::shell(temp_dir.path(), "head -n 1").with_input(input));
        assert_eq!(result.stdout(), "x\n");
    }

    #[test]
    fn test_runs_in_working_directory() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("marker.txt"), "").unwrap();
        let result = run(ExecutionRequest::shell(temp_dir.path(), "ls"));
        assert_eq!(result.stdout(), "marker.txt\n");
    }

    #[test]
    fn test_utf8_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let result = run(ExecutionRequest::shell(temp_dir.path(), "cat").with_input("héllo wörld ✓"));
        assert_eq!(result.stdout(), "héllo wörld ✓");
    }

    #[test]
    fn test_env_options() {
        let temp_dir = TempDir::new().unwrap();
        let options = ExecOptions {
            env: BTreeMap::from([("PIPESHELL_TEST_VAR".to_string(), "42".to_string())]),
            ..Default::default()
        };
        let result = run(
            ExecutionRequest::shell(temp_dir.path(), "echo $PIPESHELL_TEST_VAR").with_options(options),
        );
        assert_eq!(result.stdout(), "42\n");
    }

    #[test]
    fn test_env_replace_clears_parent_environment() {
        let temp_dir = TempDir::new().unwrap();
        let options = ExecOptions {
            env_mode: EnvMode::Replace,
            env: BTreeMap::from([("ONLY".to_string(), "me".to_string())]),
            ..Default::default()
        };
        let result = run(
            ExecutionRequest::argv(temp_dir.path(), vec!["/usr/bin/env".to_string()])
                .with_options(options),
        );
        assert_eq!(result.stdout(), "ONLY=me\n");
    }

    #[test]
    fn test_argv_is_not_shell_interpreted() {
        let temp_dir = TempDir::new().unwrap();
        let result = run(ExecutionRequest::argv(
            temp_dir.path(),
            vec!["echo".to_string(), "a | b".to_string()],
        ));
        assert_eq!(result.stdout(), "a | b\n");
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let temp_dir = TempDir::new().unwrap();
        let request = ExecutionRequest::argv(
            temp_dir.path(),
            vec!["pipeshell-no-such-program".to_string()],
        );
        let err = SystemExecutor::default().execute(&request).unwrap_err();
        assert!(matches!(err, Error::Spawn { .. }));

        let err = SystemExecutor::default()
            .execute(&request.detached())
            .unwrap_err();
        assert!(matches!(err, Error::Spawn { .. }));
    }

    #[test]
    fn test_detached_returns_no_result() {
        let temp_dir = TempDir::new().unwrap();
        let request = ExecutionRequest::shell(temp_dir.path(), "touch started").detached();
        let result = SystemExecutor::default().execute(&request).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_empty_argv_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let err = SystemExecutor::default()
            .execute(&ExecutionRequest::argv(temp_dir.path(), vec![]))
            .unwrap_err();
        assert!(err.is_user_input());
    }
}
