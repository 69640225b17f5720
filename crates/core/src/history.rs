//! In-memory command history
//!
//! Most recent entry last; entering a command that is already present moves it
//! to the end. The history lives as long as the process and is never written
//! to disk. A history can be shared between sessions through an `Arc`; writes
//! are serialized by a mutex.

use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
pub struct CommandHistory {
    entries: Mutex<Vec<String>>,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        // a panic while holding the lock cannot leave the Vec half-updated
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Append `command`, removing any earlier equal entry first.
    ///
    /// Blank commands are ignored. Returns whether the command was recorded.
    pub fn record(&self, command: &str) -> bool {
        if command.trim().is_empty() {
            return false;
        }
        let mut entries = self.lock();
        entries.retain(|entry| entry != command);
        entries.push(command.to_string());
        true
    }

    pub fn entries(&self) -> Vec<String> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Initial text for a readline-style input panel: one entry per line,
    /// followed by an empty line for the new command.
    pub fn panel_text(&self) -> String {
        let entries = self.lock();
        let mut text = entries.join("\n");
        text.push('\n');
        text
    }

    /// Pick the command the user confirmed in an input panel and record it.
    ///
    /// `selected_row` is the row the cursor was moved to while browsing the
    /// history; `None` means the last line (the freshly typed command).
    /// Returns `None` when the chosen line is blank or out of range.
    pub fn submit(&self, panel_text: &str, selected_row: Option<usize>) -> Option<String> {
        let lines: Vec<&str> = panel_text.split('\n').collect();
        let line = match selected_row {
            Some(row) => lines.get(row).copied(),
            None => lines.last().copied(),
        }?;
        let command = line.trim_end_matches('\r');

        if self.record(command) {
            Some(command.to_string())
        } else {
            None
        }
    }
}
