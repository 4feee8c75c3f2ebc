//! Configuration loading utilities for the CLI

use anyhow::{Context, Result};
use axcess_lib::GatewayConfig;
use std::path::{Path, PathBuf};

use crate::cli::Cli;

/// Load configuration from CLI arguments or default location.
///
/// `--password` and `--live` are applied on top of the file before
/// validation, so a file without a password is accepted when one is given.
pub fn load_config(cli: &Cli) -> Result<GatewayConfig> {
    let mut config = GatewayConfig::load_unchecked(cli.config.as_ref())
        .context("Failed to load configuration")?;
    apply_overrides(cli, &mut config);
    config.validate()?;
    Ok(config)
}

pub fn apply_overrides(cli: &Cli, config: &mut GatewayConfig) {
    if let Some(password) = &cli.password {
        config.credentials.password = Some(password.clone());
    }
    if cli.live {
        config.test = false;
    }
}

/// Path of the config file in use
pub fn config_path(cli: &Cli) -> Result<PathBuf> {
    match &cli.config {
        Some(path) => Ok(Path::new(path).to_path_buf()),
        None => Ok(GatewayConfig::default_config_path()?),
    }
}
