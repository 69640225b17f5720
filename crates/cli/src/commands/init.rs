use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};
use tracing::info;

use pipeshell_core::config::CONFIG_FILE_NAMES;
use pipeshell_core::directory::home_dir;
use pipeshell_core::Settings;

pub fn init_command(cwd: Option<&Path>, global: bool, force: bool) -> Result<()> {
    let dir = match cwd {
        Some(cwd) => PathBuf::from(cwd),
        None if global => home_dir(),
        None => env::current_dir().context("Failed to get current directory")?,
    };
    let config_path = dir.join(CONFIG_FILE_NAMES[0]);

    if config_path.exists() && !force {
        println!("❌ Settings already exist at: {}", config_path.display());
        println!("   Use --force to overwrite");
        return Ok(());
    }

    info!("Writing starter settings to {:?}", config_path);
    Settings::example()
        .save_to_file(&config_path)
        .with_context(|| format!("Failed to write settings to {}", config_path.display()))?;

    println!("✅ Created settings: {}", config_path.display());
    println!("\n📌 Each entry in 'commands' is tried in order against the command text:");
    println!("   the first matching 'pattern' sets prefix, suffix, env and file_regex");
    Ok(())
}
