use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;

/// Custom styles for CLI help output
fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Cyan.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
}

/// Output format for CLI commands.
///
/// - `Auto`: Automatically detect based on terminal (text for TTY, JSON for pipes)
/// - `Text`: Human-readable text output
/// - `Json`: JSON output for scripting and agents
/// - `Yaml`: YAML output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize, Default)]
pub enum OutputFormat {
    /// Auto-detect: JSON if piped, text if terminal
    #[default]
    Auto,
    /// Human-readable text output
    Text,
    /// JSON output for scripting
    Json,
    /// YAML output
    Yaml,
}

impl OutputFormat {
    /// Resolve `Auto` to a concrete format based on terminal detection.
    pub fn resolve(self) -> Self {
        match self {
            OutputFormat::Auto => {
                if std::io::stdout().is_terminal() {
                    OutputFormat::Text
                } else {
                    OutputFormat::Json
                }
            }
            other => other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Parser, Debug)]
#[command(name = "axcess")]
#[command(about = "Charge, authorize, capture, refund and void through the Axcess payment gateway", long_about = None)]
#[command(version)]
#[command(styles = styles())]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(
        short = 'C',
        long = "config",
        value_name = "PATH",
        env = "AXCESS_CONFIG",
        global = true
    )]
    pub config: Option<String>,

    /// Gateway password (overrides the config file)
    #[arg(
        long = "password",
        value_name = "PASSWORD",
        env = "AXCESS_PASSWORD",
        hide_env_values = true,
        global = true
    )]
    pub password: Option<String>,

    /// Send transactions to the live endpoint
    #[arg(long, global = true)]
    pub live: bool,

    // Display Options
    /// Verbosity level (can be used multiple times: -v, -vv, -vvv)
    #[arg(short = 'v', long = "verbosity", action = clap::ArgAction::Count, global = true, help_heading = "Display Options")]
    pub verbosity: u8,

    /// Control color output
    #[arg(
        long,
        value_name = "MODE",
        default_value = "auto",
        global = true,
        help_heading = "Display Options"
    )]
    pub color: ColorMode,

    /// Do not print log messages (aliases: -s, --silent)
    #[arg(
        short = 'q',
        long = "quiet",
        visible_short_alias = 's',
        visible_alias = "silent",
        global = true,
        help_heading = "Display Options"
    )]
    pub quiet: bool,

    /// Output format (auto detects: text for terminal, json for pipes)
    #[arg(
        long,
        value_name = "FORMAT",
        default_value = "auto",
        global = true,
        help_heading = "Display Options"
    )]
    pub output_format: OutputFormat,

    /// Write output to file
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        global = true,
        help_heading = "Display Options"
    )]
    pub output: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    // === Payment Commands ===
    /// Charge a card, or rebill an earlier transaction with --reference
    #[command(
        alias = "p",
        after_help = "\
Examples:
  axcess purchase --amount 10.00 --number 4200000000000000 --month 5 --year 2030 \\
      --first-name Longbob --last-name Longsen --cvv 123
  axcess purchase --amount 10.00 --reference 8a82944a4cc25ebf014cc4e9c0a63a6b"
    )]
    Purchase(ChargeArgs),

    /// Reserve an amount on a card without capturing it
    #[command(
        alias = "auth",
        after_help = "\
Examples:
  axcess authorize --amount 25.00 --currency USD --number 4200000000000000 \\
      --month 5 --year 2030 --first-name Longbob --last-name Longsen"
    )]
    Authorize(ChargeArgs),

    /// Capture a previous authorization
    #[command(after_help = "\
Examples:
  axcess capture --reference 8a82944a4cc25ebf014cc4e9c0a63a6b
  axcess capture --reference 8a82944a4cc25ebf014cc4e9c0a63a6b --amount 20.00")]
    Capture(FollowUpArgs),

    /// Refund a previous purchase or capture
    #[command(after_help = "\
Examples:
  axcess refund --reference 8a82944a4cc25ebf014cc4e9c0a63a6b --amount 5.00")]
    Refund(FollowUpArgs),

    /// Reverse a previous transaction
    #[command(after_help = "\
Examples:
  axcess void --reference 8a82944a4cc25ebf014cc4e9c0a63a6b")]
    Void {
        /// Unique id returned by the earlier transaction
        #[arg(long, short = 'r', value_name = "ID")]
        reference: String,

        #[command(flatten)]
        options: OptionArgs,
    },

    // === Setup Commands ===
    /// Show or validate the configuration
    #[command(
        alias = "c",
        args_conflicts_with_subcommands = true,
        after_help = "\
Examples:
  axcess config                        # Show current config
  axcess config validate               # Check config is valid
  axcess config --output-format json   # Output as JSON"
    )]
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    // === Info Commands ===
    /// Show version information
    #[command(alias = "v")]
    Version,

    /// Generate shell completions script
    #[command(
        alias = "com",
        after_help = "\
Examples:
  axcess completions bash >> ~/.bashrc
  axcess completions zsh >> ~/.zshrc
  axcess completions fish > ~/.config/fish/completions/axcess.fish"
    )]
    Completions {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Validate configuration file
    Validate,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Arguments for purchase and authorize
#[derive(Args, Debug, Clone)]
pub struct ChargeArgs {
    /// Amount in major units, e.g. 10.00
    #[arg(long, short = 'a', value_name = "AMOUNT")]
    pub amount: String,

    /// Unique id of an earlier transaction to charge instead of a card
    #[arg(
        long,
        short = 'r',
        value_name = "ID",
        conflicts_with_all = ["number", "cvv"]
    )]
    pub reference: Option<String>,

    #[command(flatten)]
    pub card: CardArgs,

    #[command(flatten)]
    pub address: AddressArgs,

    #[command(flatten)]
    pub options: OptionArgs,
}

/// Arguments for capture and refund
#[derive(Args, Debug, Clone)]
pub struct FollowUpArgs {
    /// Unique id returned by the earlier transaction
    #[arg(long, short = 'r', value_name = "ID")]
    pub reference: String,

    /// Amount in major units; omitted to use the full amount
    #[arg(long, short = 'a', value_name = "AMOUNT")]
    pub amount: Option<String>,

    #[command(flatten)]
    pub options: OptionArgs,
}

#[derive(Args, Debug, Clone, Default)]
pub struct CardArgs {
    /// Card number
    #[arg(
        long,
        value_name = "PAN",
        required_unless_present = "reference",
        help_heading = "Card Options"
    )]
    pub number: Option<String>,

    /// Card holder's first name
    #[arg(
        long,
        value_name = "NAME",
        required_unless_present = "reference",
        help_heading = "Card Options"
    )]
    pub first_name: Option<String>,

    /// Card holder's last name
    #[arg(
        long,
        value_name = "NAME",
        required_unless_present = "reference",
        help_heading = "Card Options"
    )]
    pub last_name: Option<String>,

    /// Expiry month (1-12)
    #[arg(
        long,
        value_name = "MM",
        value_parser = clap::value_parser!(u8).range(1..=12),
        required_unless_present = "reference",
        help_heading = "Card Options"
    )]
    pub month: Option<u8>,

    /// Expiry year, four digits
    #[arg(
        long,
        value_name = "YYYY",
        value_parser = clap::value_parser!(u16).range(2000..=9999),
        required_unless_present = "reference",
        help_heading = "Card Options"
    )]
    pub year: Option<u16>,

    /// Card brand (visa, master, american_express, discover, jcb, maestro, solo)
    #[arg(long, value_name = "BRAND", default_value = "visa", help_heading = "Card Options")]
    pub brand: String,

    /// Card verification value
    #[arg(long, value_name = "CVV", help_heading = "Card Options")]
    pub cvv: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct AddressArgs {
    /// Billing street, first line
    #[arg(long, value_name = "STREET", help_heading = "Billing Address")]
    pub address1: Option<String>,

    /// Billing street, second line
    #[arg(long, value_name = "STREET", help_heading = "Billing Address")]
    pub address2: Option<String>,

    #[arg(long, value_name = "ZIP", help_heading = "Billing Address")]
    pub zip: Option<String>,

    #[arg(long, value_name = "CITY", help_heading = "Billing Address")]
    pub city: Option<String>,

    #[arg(long, value_name = "STATE", help_heading = "Billing Address")]
    pub state: Option<String>,

    /// ISO 3166 alpha-2 country code
    #[arg(long, value_name = "CC", help_heading = "Billing Address")]
    pub country: Option<String>,

    #[arg(long, value_name = "NAME", help_heading = "Billing Address")]
    pub company: Option<String>,

    #[arg(long, value_name = "PHONE", help_heading = "Billing Address")]
    pub phone: Option<String>,

    #[arg(long, value_name = "PHONE", help_heading = "Billing Address")]
    pub mobile: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct OptionArgs {
    /// Currency code; defaults to the configured currency
    #[arg(long, value_name = "CODE", help_heading = "Transaction Options")]
    pub currency: Option<String>,

    /// Merchant order id
    #[arg(long, value_name = "ID", help_heading = "Transaction Options")]
    pub order_id: Option<String>,

    /// Merchant transaction id; generated when omitted
    #[arg(long, value_name = "ID", help_heading = "Transaction Options")]
    pub transaction_id: Option<String>,

    #[arg(long, value_name = "ID", help_heading = "Transaction Options")]
    pub customer_id: Option<String>,

    #[arg(long, value_name = "ID", help_heading = "Transaction Options")]
    pub bulk_id: Option<String>,

    /// Text shown on the card holder's statement
    #[arg(long, value_name = "TEXT", help_heading = "Transaction Options")]
    pub soft_descriptor: Option<String>,

    #[arg(long, value_name = "EMAIL", help_heading = "Transaction Options")]
    pub email: Option<String>,

    /// Customer IP address
    #[arg(long, value_name = "IP", help_heading = "Transaction Options")]
    pub ip: Option<String>,

    /// Free-text memo
    #[arg(long, value_name = "TEXT", help_heading = "Transaction Options")]
    pub description: Option<String>,

    /// Override the transaction mode (e.g. CONNECTOR_TEST)
    #[arg(long, value_name = "MODE", help_heading = "Transaction Options")]
    pub transaction_mode: Option<String>,
}

impl Cli {
    /// Check if verbose output is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbosity >= 1
    }

    /// Check if output should be shown (not quiet)
    pub fn should_show_output(&self) -> bool {
        !self.quiet
    }

    /// Default log level for the verbosity flags
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_reference_purchase_needs_no_card() {
        let cli = Cli::try_parse_from([
            "axcess",
            "purchase",
            "--amount",
            "1.00",
            "--reference",
            "uid-1",
        ])
        .unwrap();
        match cli.command {
            Commands::Purchase(args) => {
                assert_eq!(args.reference.as_deref(), Some("uid-1"));
                assert!(args.card.number.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_card_purchase_requires_card_fields() {
        let err = Cli::try_parse_from(["axcess", "purchase", "--amount", "1.00"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_month_out_of_range() {
        let result = Cli::try_parse_from([
            "axcess",
            "authorize",
            "--amount",
            "1.00",
            "--number",
            "4200000000000000",
            "--first-name",
            "A",
            "--last-name",
            "B",
            "--month",
            "13",
            "--year",
            "2030",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_log_level() {
        let cli = Cli::try_parse_from(["axcess", "-vv", "version"]).unwrap();
        assert_eq!(cli.log_level(), "debug");
        let cli = Cli::try_parse_from(["axcess", "-q", "version"]).unwrap();
        assert_eq!(cli.log_level(), "error");
    }
}
