//! Error display helpers with actionable suggestions.
//!
//! Provides user-friendly error messages that include suggestions
//! for how to fix common problems.

use crate::colors::Colors;
use axcess_lib::AxcessError;

/// Get a suggestion for how to fix an error, if available.
pub fn get_suggestion(err: &anyhow::Error) -> Option<String> {
    if let Some(axcess_err) = err.downcast_ref::<AxcessError>() {
        return get_axcess_error_suggestion(axcess_err);
    }

    let msg = err.to_string().to_lowercase();

    if msg.contains("not found") && msg.contains("config") {
        return Some(config_template_hint());
    }

    if msg.contains("permission denied") {
        return Some("Check file permissions or run with appropriate privileges.".into());
    }

    None
}

fn config_template_hint() -> String {
    "Create ~/.axcess/config.toml (or pass --config) with:\n\n  \
     [credentials]\n  \
     sender = \"...\"\n  \
     login = \"...\"\n  \
     password = \"...\"\n  \
     channel = \"...\""
        .into()
}

/// Get suggestion for a specific AxcessError variant.
fn get_axcess_error_suggestion(err: &AxcessError) -> Option<String> {
    match err {
        AxcessError::MissingCredential(name) => Some(format!(
            "Add '{name}' to the [credentials] section of your config file.\n\
             The password can also be passed with --password or AXCESS_PASSWORD."
        )),

        AxcessError::MissingInstrument { .. } => {
            Some("Pass the card flags (--number, --month, ...) or --reference.".into())
        }

        AxcessError::ConfigMissing(_) => Some(config_template_hint()),

        AxcessError::NoConfigDir => {
            Some("Could not determine home directory. Set HOME or pass --config.".into())
        }

        AxcessError::InvalidConfig(_) | AxcessError::TomlParse(_) => {
            Some("Run 'axcess config validate' to check your configuration.".into())
        }

        AxcessError::InvalidAmount(_) => Some(
            "Amounts are decimal values in major units, e.g. 10.00. \
             Use no more decimals than the currency has."
                .into(),
        ),

        AxcessError::UnsupportedCardBrand(_) => Some(
            "Supported brands: visa, master, american_express, discover, jcb, maestro, solo."
                .into(),
        ),

        AxcessError::Http { status, .. } => match *status {
            401 | 403 => {
                Some("Authentication failed. Check your sender, login and password.".into())
            }
            500..=599 => Some("Gateway error. Try again later.".into()),
            _ => None,
        },

        AxcessError::Curl(e) if e.is_operation_timedout() => Some(
            "The request timed out. Try again or raise 'timeout' in your config.".into(),
        ),

        AxcessError::Curl(_) => Some("Check your internet connection and try again.".into()),

        AxcessError::MalformedResponse(_) => Some(
            "The gateway sent an unexpected reply. Re-run with -vv to see the request.".into(),
        ),

        _ => None,
    }
}

/// Format an error with its suggestion for display.
pub fn format_error_with_suggestion(err: &anyhow::Error) -> String {
    let mut output = format!("{} {err:#}", Colors::error("Error:"));

    if let Some(suggestion) = get_suggestion(err) {
        output.push_str(&format!("\n\n{}:\n", Colors::info("Suggestion")));
        output.push_str(&suggestion);
    }

    if let Some(related) = get_related_commands(err) {
        output.push_str(&format!("\n\n{}:\n", Colors::info("Related commands")));
        for cmd in related {
            output.push_str(&format!("  {}\n", cmd));
        }
    }

    output
}

/// Get related commands that might help fix an error.
fn get_related_commands(err: &anyhow::Error) -> Option<Vec<&'static str>> {
    match err.downcast_ref::<AxcessError>()? {
        e if e.is_configuration() && !matches!(e, AxcessError::InvalidAmount(_)) => Some(vec![
            "axcess config             # View current configuration",
            "axcess config validate    # Check the config file",
        ]),
        _ => None,
    }
}
