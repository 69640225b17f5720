//! Settings merging for pipeshell
//!
//! Layers are applied from least to most specific: global (home) first, then
//! project files from the outermost directory inwards. Scalar settings from a
//! more specific layer replace the ones below it. Command patterns from a more
//! specific layer are tried before the ones below it, so a project can shadow a
//! global entry without removing it.

use super::Settings;
use std::path::PathBuf;
use tracing::debug;

/// One loaded settings file
#[derive(Debug, Clone)]
pub struct SettingsLayer {
    pub path: PathBuf,
    pub settings: Settings,
}

#[derive(Debug, Default)]
pub struct SettingsMerger {
    layers: Vec<SettingsLayer>,
}

impl SettingsMerger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a layer more specific than every layer pushed so far
    pub fn push(&mut self, path: PathBuf, settings: Settings) {
        debug!("Adding settings layer from {:?}", path);
        self.layers.push(SettingsLayer { path, settings });
    }

    pub fn layers(&self) -> &[SettingsLayer] {
        &self.layers
    }

    pub fn merged(&self) -> Settings {
        self.layers
            .iter()
            .fold(Settings::default(), |base, layer| {
                merge_settings(base, layer.settings.clone())
            })
    }
}

/// Apply `overlay` on top of `base`.
pub fn merge_settings(base: Settings, overlay: Settings) -> Settings {
    let mut commands = overlay.commands;
    commands.extend(base.commands);

    Settings {
        prefer_active_file_dir: overlay.prefer_active_file_dir.or(base.prefer_active_file_dir),
        shell: overlay.shell.or(base.shell),
        terminal: overlay.terminal.or(base.terminal),
        defaults: overlay.defaults.or(base.defaults),
        commands,
    }
}
