use std::process::Stdio;
use std::sync::Mutex;

use tracing::{debug, info};

use pipeshell_core::executor::apply_options;
use pipeshell_core::{Error, JobRunner, JobSpec, Result, Shell};

/// Runs jobs in the foreground with the terminal's stdout and stderr
///
/// The core hands jobs off without waiting; a command line tool has nowhere
/// else to stream output, so this runner blocks until the job exits and keeps
/// its exit code for the process status.
#[derive(Debug)]
pub struct ForegroundJobRunner {
    shell: Shell,
    last_exit_code: Mutex<Option<i32>>,
}

impl ForegroundJobRunner {
    pub fn new(shell: Shell) -> Self {
        Self {
            shell,
            last_exit_code: Mutex::new(None),
        }
    }

    /// Exit code of the most recent job, `-1` if it was killed by a signal
    pub fn last_exit_code(&self) -> Option<i32> {
        *self
            .last_exit_code
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl JobRunner for ForegroundJobRunner {
    fn run(&self, job: JobSpec) -> Result<()> {
        let mut cmd = self.shell.command(&job.command);
        cmd.current_dir(&job.working_dir).stdin(Stdio::null());
        apply_options(&mut cmd, &job.exec_options());

        if let Some(ref regex) = job.file_regex {
            debug!("Job output locations match {:?}", regex);
        }

        info!("Starting job {:?} in {:?}", job.command, job.working_dir);
        let status = cmd.status().map_err(|source| Error::Spawn {
            command: job.command.clone(),
            source,
        })?;

        let code = status.code().unwrap_or(-1);
        debug!("Job {:?} finished with {}", job.command, code);
        *self
            .last_exit_code
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(code);
        Ok(())
    }
}
