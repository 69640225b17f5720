use crate::impl_case_insensitive_deserialize;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How extra environment variables combine with the parent environment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvMode {
    /// Start from the parent environment and add `env` on top
    #[default]
    Merge,
    /// Start from an empty environment containing only `env`
    Replace,
}

impl_case_insensitive_deserialize!(
    EnvMode,
    Merge => "merge",
    Replace => "replace"
);

/// Execution options applied to a process or handed to the host job runner
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ExecOptions {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
    #[serde(default)]
    pub env_mode: EnvMode,
    /// Replacement for the `PATH` variable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Regex the host uses to find file names in streamed output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_regex: Option<String>,
    /// Regex the host uses to find line numbers in streamed output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_regex: Option<String>,
}

/// Wrapping and options used when no command pattern matches
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CommandDefaults {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub prefix: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub suffix: String,
    #[serde(flatten)]
    pub options: ExecOptions,
}

/// Per-command overrides selected by a regex matched against the shell text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CommandConfig {
    /// Regex searched anywhere in the shell text
    pub pattern: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env: Option<BTreeMap<String, String>>,
    /// Drop the default `env` entries instead of merging with them
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force_replace_env: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env_mode: Option<EnvMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_regex: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_regex: Option<String>,
}

impl CommandConfig {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            ..Default::default()
        }
    }

    pub fn with_wrapping(mut self, prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self.suffix = Some(suffix.into());
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Produce a fresh copy of `defaults` with this entry's present fields applied.
    ///
    /// Neither `self` nor `defaults` is modified.
    pub fn apply_to(&self, defaults: &CommandDefaults) -> ResolvedCommandConfig {
        let mut options = defaults.options.clone();

        if let Some(ref env) = self.env {
            if self.force_replace_env.unwrap_or(false) {
                options.env = env.clone();
            } else {
                options
                    .env
                    .extend(env.iter().map(|(k, v)| (k.clone(), v.clone())));
            }
        }
        if let Some(env_mode) = self.env_mode {
            options.env_mode = env_mode;
        }
        if self.path.is_some() {
            options.path = self.path.clone();
        }
        if self.file_regex.is_some() {
            options.file_regex = self.file_regex.clone();
        }
        if self.line_regex.is_some() {
            options.line_regex = self.line_regex.clone();
        }

        ResolvedCommandConfig {
            matched_pattern: Some(self.pattern.clone()),
            prefix: self.prefix.clone().unwrap_or_else(|| defaults.prefix.clone()),
            suffix: self.suffix.clone().unwrap_or_else(|| defaults.suffix.clone()),
            options,
        }
    }
}

/// The effective configuration for one command after resolution
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedCommandConfig {
    /// Pattern of the entry that matched, `None` when defaults were used
    pub matched_pattern: Option<String>,
    pub prefix: String,
    pub suffix: String,
    pub options: ExecOptions,
}

impl ResolvedCommandConfig {
    pub fn from_defaults(defaults: &CommandDefaults) -> Self {
        Self {
            matched_pattern: None,
            prefix: defaults.prefix.clone(),
            suffix: defaults.suffix.clone(),
            options: defaults.options.clone(),
        }
    }

    /// `prefix + shell_text + suffix`
    pub fn wrap(&self, shell_text: &str) -> String {
        format!("{}{}{}", self.prefix, shell_text, self.suffix)
    }

    /// Undo [`wrap`](Self::wrap); `None` if `wrapped` does not carry the pair.
    pub fn unwrap<'a>(&self, wrapped: &'a str) -> Option<&'a str> {
        wrapped
            .strip_prefix(self.prefix.as_str())?
            .strip_suffix(self.suffix.as_str())
    }
}
