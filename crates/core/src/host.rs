//! Interfaces the host editor provides to the orchestrator
//!
//! The core never renders anything. It reads text through [`EditorSurface`],
//! writes results back through it, and hands streaming jobs to a
//! [`JobRunner`] whose completion it never observes.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::config::{EnvMode, ExecOptions};
use crate::error::Result;

/// A span of the active document, as byte offsets `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Region {
    pub start: usize,
    pub end: usize,
}

impl Region {
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start: start.min(end),
            end: start.max(end),
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// The editor's text surface for one invocation
pub trait EditorSurface {
    /// Whether there is a text view that can supply input and take output
    fn has_text_surface(&self) -> bool;

    /// Current non-empty selections, in document order
    fn selections(&self) -> Vec<Region>;

    /// The region covering the whole document
    fn document_region(&self) -> Region;

    fn region_text(&self, region: Region) -> String;

    fn replace_region(&mut self, region: Region, text: &str) -> Result<()>;

    /// Open a new result view holding `text`
    fn open_result(&mut self, title: &str, text: &str) -> Result<()>;

    fn show_error(&mut self, message: &str);

    fn show_status(&mut self, _message: &str) {}
}

/// A streaming job handed to the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSpec {
    /// Shell-interpreted command text
    pub command: String,
    pub working_dir: PathBuf,
    pub shell: bool,
    pub env: BTreeMap<String, String>,
    pub env_mode: EnvMode,
    pub path: Option<String>,
    pub file_regex: Option<String>,
    pub line_regex: Option<String>,
}

impl JobSpec {
    pub fn new(command: impl Into<String>, working_dir: impl Into<PathBuf>, options: &ExecOptions) -> Self {
        Self {
            command: command.into(),
            working_dir: working_dir.into(),
            shell: true,
            env: options.env.clone(),
            env_mode: options.env_mode,
            path: options.path.clone(),
            file_regex: options.file_regex.clone(),
            line_regex: options.line_regex.clone(),
        }
    }

    pub fn exec_options(&self) -> ExecOptions {
        ExecOptions {
            env: self.env.clone(),
            env_mode: self.env_mode,
            path: self.path.clone(),
            file_regex: self.file_regex.clone(),
            line_regex: self.line_regex.clone(),
        }
    }
}

/// The host's asynchronous job runner
pub trait JobRunner: Send + Sync {
    /// Start `job`; an error means it could not be started
    fn run(&self, job: JobSpec) -> Result<()>;
}
