//! Output formatting and display utilities for the CLI

use anyhow::{Context, Result};
use axcess_lib::{GatewayConfig, Response};
use serde_json::json;
use std::path::Path;

use crate::cli::{Cli, OutputFormat};
use crate::colors::Colors;

/// Print a gateway response in the selected format
pub fn handle_response(cli: &Cli, operation: &str, response: &Response) -> Result<()> {
    write_output(cli, render_response(cli, operation, response)?)
}

fn render_response(cli: &Cli, operation: &str, response: &Response) -> Result<String> {
    Ok(match cli.output_format.resolve() {
        OutputFormat::Auto => unreachable!("Auto should be resolved"),
        OutputFormat::Json => serde_json::to_string_pretty(response)?,
        OutputFormat::Yaml => serde_yaml::to_string(response)?,
        OutputFormat::Text => format_response_text(cli, operation, response),
    })
}

fn format_response_text(cli: &Cli, operation: &str, response: &Response) -> String {
    let marker = if response.success {
        Colors::approved_marker()
    } else {
        Colors::declined_marker()
    };
    let mut lines = vec![format!("{marker} {operation}: {}", response.message)];

    if let Some(auth) = &response.authorization {
        lines.push(format!(
            "{} {}",
            Colors::key("Authorization:"),
            Colors::token(auth.as_str())
        ));
    }
    if let Some(code) = response.return_code() {
        lines.push(format!("{} {code}", Colors::key("Return code:")));
    }
    if let Some(short_id) = response.short_id() {
        lines.push(format!("{} {short_id}", Colors::key("Short id:")));
    }
    let mode = if response.test {
        Colors::dim("test")
    } else {
        Colors::warning("live")
    };
    lines.push(format!("{} {mode}", Colors::key("Mode:")));

    if cli.is_verbose() {
        lines.push(String::new());
        for (name, value) in response.raw.iter() {
            lines.push(Colors::dim(&format!("{name}={value}")).to_string());
        }
    }

    lines.join("\n")
}

/// Write string output to file or stdout based on CLI options
pub fn write_output(cli: &Cli, content: impl AsRef<str>) -> Result<()> {
    let content = content.as_ref();
    if let Some(output_file) = &cli.output {
        std::fs::write(output_file, content).context("Failed to write output file")?;
        if cli.is_verbose() && cli.should_show_output() {
            eprintln!("Saved to: {output_file}");
        }
    } else {
        println!("{content}");
    }
    Ok(())
}

// ==================== Config Display Helpers ====================

/// Mask all but the last four characters
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let visible: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{visible}", "*".repeat(chars.len() - 4))
}

/// Build configuration display data for the structured output formats
pub fn build_config_display(config: &GatewayConfig, config_path: &Path) -> serde_json::Value {
    let credentials = &config.credentials;
    json!({
        "config_path": config_path.display().to_string(),
        "endpoint": config.endpoint(),
        "test": config.test,
        "default_currency": config.default_currency,
        "timeout": config.timeout,
        "user_agent": config.user_agent,
        "credentials": {
            "sender": credentials.sender,
            "login": credentials.login,
            "password": credentials.password.as_deref().map(mask_secret),
            "channel": credentials.channel,
        }
    })
}

/// Print configuration in text format
pub fn print_config_text(config: &GatewayConfig, config_path: &Path) {
    let credentials = &config.credentials;
    let show = |v: &Option<String>| v.as_deref().unwrap_or("<unset>").to_string();

    println!("Config file: {}", Colors::path(&config_path.display().to_string()));
    println!();
    println!("endpoint = \"{}\"", config.endpoint());
    println!("test = {}", config.test);
    println!("default_currency = \"{}\"", config.default_currency);
    if let Some(timeout) = config.timeout {
        println!("timeout = {timeout}");
    }
    if let Some(ua) = &config.user_agent {
        println!("user_agent = \"{ua}\"");
    }
    println!();
    println!("[credentials]");
    println!("sender = \"{}\"", show(&credentials.sender));
    println!("login = \"{}\"", show(&credentials.login));
    println!(
        "password = \"{}\"",
        credentials
            .password
            .as_deref()
            .map(mask_secret)
            .unwrap_or_else(|| "<unset>".to_string())
    );
    println!("channel = \"{}\"", show(&credentials.channel));
}
