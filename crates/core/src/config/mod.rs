//! Configuration management for pipeshell

pub mod command_config;
pub mod loader;
pub mod merge;
pub mod resolver;
mod settings;

// Re-export main types
pub use command_config::{
    CommandConfig, CommandDefaults, EnvMode, ExecOptions, ResolvedCommandConfig,
};
pub use loader::{CONFIG_ENV_VAR, CONFIG_FILE_NAMES, ConfigLoader};
pub use merge::{SettingsLayer, SettingsMerger, merge_settings};
pub use resolver::{CommandConfigResolver, resolve_command_config};
pub use settings::Settings;
