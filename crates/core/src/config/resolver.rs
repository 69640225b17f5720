//! Per-command configuration lookup
//!
//! Entries are tried in order and the first pattern found anywhere in the
//! shell text wins. Lookup never mutates the configured entries: every
//! resolution returns its own merged copy.

use regex::Regex;
use tracing::debug;

use super::{CommandConfig, CommandDefaults, ResolvedCommandConfig};
use crate::error::{Error, Result};

/// Ordered command patterns, compiled once
#[derive(Debug, Clone, Default)]
pub struct CommandConfigResolver {
    entries: Vec<(Regex, CommandConfig)>,
}

impl CommandConfigResolver {
    /// Compile every pattern; the first invalid one is reported.
    pub fn new(configs: &[CommandConfig]) -> Result<Self> {
        let entries = configs
            .iter()
            .map(|config| {
                Regex::new(&config.pattern)
                    .map(|regex| (regex, config.clone()))
                    .map_err(|source| Error::InvalidPattern {
                        pattern: config.pattern.clone(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The first entry whose pattern occurs in `shell_text`
    pub fn find_match(&self, shell_text: &str) -> Option<&CommandConfig> {
        self.entries
            .iter()
            .find(|(regex, _)| regex.is_match(shell_text))
            .map(|(_, config)| config)
    }

    pub fn resolve(&self, shell_text: &str, defaults: &CommandDefaults) -> ResolvedCommandConfig {
        match self.find_match(shell_text) {
            Some(config) => {
                debug!("Command {:?} matched pattern {:?}", shell_text, config.pattern);
                config.apply_to(defaults)
            }
            None => {
                debug!("No command pattern matched {:?}, using defaults", shell_text);
                ResolvedCommandConfig::from_defaults(defaults)
            }
        }
    }
}

/// One-shot lookup for callers that do not keep a resolver around.
pub fn resolve_command_config(
    shell_text: &str,
    configs: &[CommandConfig],
    defaults: &CommandDefaults,
) -> Result<ResolvedCommandConfig> {
    Ok(CommandConfigResolver::new(configs)?.resolve(shell_text, defaults))
}
