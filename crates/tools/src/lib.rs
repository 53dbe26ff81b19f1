//! Shared plumbing for the developer binaries: config overrides and log setup.

use std::{fs, io};
use std::path::Path;

use anyhow::{Context, Result};
use tower_core::GameConfig;
use tracing_subscriber::EnvFilter;

/// Installs a stderr subscriber honouring `RUST_LOG`, defaulting to `warn` so tool output
/// stays clean.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Default config, or the TOML file at `path` layered over the defaults.
pub fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    parse_config(&text).with_context(|| format!("invalid config {}", path.display()))
}

pub fn parse_config(text: &str) -> Result<GameConfig> {
    let config: GameConfig =
        toml::from_str(text).context("config is not valid TOML for GameConfig")?;
    config.validate()?;
    Ok(config)
}
