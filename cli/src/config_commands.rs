use crate::cli::{Cli, OutputFormat};
use crate::colors::Colors;
use crate::config_utils::{apply_overrides, config_path, load_config};
use crate::output::{build_config_display, print_config_text, write_output};
use anyhow::{Context, Result};
use axcess_lib::{Currency, GatewayConfig};

/// Show the configuration with the password masked
pub fn show_command(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    let path = config_path(cli)?;

    match cli.output_format.resolve() {
        OutputFormat::Auto => unreachable!("Auto should be resolved"),
        OutputFormat::Json => {
            let output = serde_json::to_string_pretty(&build_config_display(&config, &path))?;
            write_output(cli, output)?;
        }
        OutputFormat::Yaml => {
            let output = serde_yaml::to_string(&build_config_display(&config, &path))?;
            write_output(cli, output)?;
        }
        OutputFormat::Text => print_config_text(&config, &path),
    }

    Ok(())
}

/// Validate the configuration file
pub fn validate_command(cli: &Cli) -> Result<()> {
    let path = config_path(cli)?;

    if !path.exists() {
        anyhow::bail!("Configuration file not found: {}", path.display());
    }

    let toml_content =
        std::fs::read_to_string(&path).context("Failed to read configuration file")?;
    let _: toml::Value = toml::from_str(&toml_content).context("Invalid TOML syntax")?;

    let mut config = GatewayConfig::from_toml(&toml_content)?;
    apply_overrides(cli, &mut config);

    if let Err(e) = config.validate() {
        println!("{} Configuration validation failed:", Colors::fail_marker());
        println!("  - {e}");
        return Err(e).context("Configuration validation failed");
    }

    println!(
        "{} Configuration is valid: {}",
        Colors::ok_marker(),
        path.display()
    );
    println!("Endpoint: {}", config.endpoint());

    if Currency::from_code(&config.default_currency).is_none() {
        println!(
            "{} default_currency {} is not in the built-in table; amounts use 2 decimals",
            Colors::warning("[WARN]"),
            config.default_currency
        );
    }

    Ok(())
}
