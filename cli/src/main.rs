//! axcess CLI - card payments through the Axcess MS gateway from the shell

mod cli;
mod colors;
mod config_commands;
mod config_utils;
mod errors;
mod exit_codes;
mod output;
mod payment;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::{generate, shells};
use cli::{Cli, ColorMode, Commands, ConfigCommands, Shell};
use colored::control;
use exit_codes::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() {
    // Low-level Ctrl+C handler that also works during the blocking curl call
    if let Err(e) = ctrlc::set_handler(move || {
        eprintln!("Interrupted");
        std::process::exit(ExitCode::Interrupted.code());
    }) {
        eprintln!("Warning: failed to set Ctrl+C handler: {e}");
    }

    if let Err(e) = run() {
        eprintln!("{}", errors::format_error_with_suggestion(&e));
        ExitCode::from(&e).exit();
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    init_color_support(&cli);
    init_tracing(&cli);

    match &cli.command {
        command @ (Commands::Purchase(_)
        | Commands::Authorize(_)
        | Commands::Capture(_)
        | Commands::Refund(_)
        | Commands::Void { .. }) => payment::payment_command(&cli, command),

        Commands::Config { command } => match command {
            Some(ConfigCommands::Validate) => config_commands::validate_command(&cli),
            None => config_commands::show_command(&cli),
        },

        Commands::Version => show_version(),

        Commands::Completions { shell } => generate_completions(*shell),
    }
}

// ==================== Simple Commands ====================

/// Show version information
fn show_version() -> Result<()> {
    const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

    println!("axcess CLI: v{CLI_VERSION}");
    println!("axcess-lib: v{}", axcess_lib::VERSION);
    println!(
        "Gateway: {} ({})",
        axcess_lib::constants::DISPLAY_NAME,
        axcess_lib::constants::HOMEPAGE_URL
    );

    Ok(())
}

/// Generate shell completions
fn generate_completions(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    match shell {
        Shell::Bash => generate(shells::Bash, &mut cmd, bin_name, &mut std::io::stdout()),
        Shell::Zsh => generate(shells::Zsh, &mut cmd, bin_name, &mut std::io::stdout()),
        Shell::Fish => generate(shells::Fish, &mut cmd, bin_name, &mut std::io::stdout()),
        Shell::PowerShell => generate(
            shells::PowerShell,
            &mut cmd,
            bin_name,
            &mut std::io::stdout(),
        ),
    }

    Ok(())
}

/// Initialize color support based on user preference and NO_COLOR env var
fn init_color_support(cli: &Cli) {
    use std::io::IsTerminal;
    let no_color_env = std::env::var("NO_COLOR").is_ok();

    match cli.color {
        ColorMode::Always => control::set_override(true),
        ColorMode::Never => control::set_override(false),
        ColorMode::Auto => {
            if no_color_env || !std::io::stdout().is_terminal() {
                control::set_override(false);
            }
        }
    }
}

/// Log to stderr; `RUST_LOG` wins over the -v/-q flags
fn init_tracing(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,axcess_lib={0},axcess={0}", cli.log_level())));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
