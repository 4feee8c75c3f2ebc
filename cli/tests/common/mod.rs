//! Common test utilities for axcess CLI tests

#![allow(dead_code)]

use std::fs;
use std::process::Command;
use tempfile::TempDir;

pub const TEST_SENDER: &str = "ff80808144d46be50144d4a6f3b6005f";
pub const TEST_LOGIN: &str = "ff80808144d46be50144d4a6f3b80061";
pub const TEST_PASSWORD: &str = "Xk9sPq2wZt";
pub const TEST_CHANNEL: &str = "ff80808144d46be50144d4a732ae0063";

/// Builder for creating test configurations
pub struct TestConfigBuilder {
    temp_dir: TempDir,
    credentials: Vec<(&'static str, String)>,
    default_currency: Option<String>,
    test: Option<bool>,
    raw: Option<String>,
}

impl TestConfigBuilder {
    /// Create a new test config builder with no credentials
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
            credentials: Vec::new(),
            default_currency: None,
            test: None,
            raw: None,
        }
    }

    /// Set one credential
    pub fn with_credential(mut self, name: &'static str, value: &str) -> Self {
        self.credentials.push((name, value.to_string()));
        self
    }

    /// Add all four test credentials
    pub fn with_defaults(self) -> Self {
        self.with_credential("sender", TEST_SENDER)
            .with_credential("login", TEST_LOGIN)
            .with_credential("password", TEST_PASSWORD)
            .with_credential("channel", TEST_CHANNEL)
    }

    pub fn with_default_currency(mut self, currency: &str) -> Self {
        self.default_currency = Some(currency.to_string());
        self
    }

    pub fn with_test(mut self, test: bool) -> Self {
        self.test = Some(test);
        self
    }

    /// Write this text verbatim instead of a generated config
    pub fn with_raw(mut self, content: &str) -> Self {
        self.raw = Some(content.to_string());
        self
    }

    /// Build the test configuration at `$HOME/.axcess/config.toml`
    pub fn build(self) -> TempDir {
        let axcess_dir = self.temp_dir.path().join(".axcess");
        fs::create_dir_all(&axcess_dir).expect("Failed to create axcess directory");

        let config = match self.raw {
            Some(raw) => raw,
            None => {
                let mut config = String::new();
                if let Some(currency) = &self.default_currency {
                    config.push_str(&format!("default_currency = \"{currency}\"\n"));
                }
                if let Some(test) = self.test {
                    config.push_str(&format!("test = {test}\n"));
                }
                config.push_str("\n[credentials]\n");
                for (name, value) in &self.credentials {
                    config.push_str(&format!("{name} = \"{value}\"\n"));
                }
                config
            }
        };

        fs::write(axcess_dir.join("config.toml"), config).expect("Failed to write config");
        self.temp_dir
    }
}

/// Set up a test configuration with all credentials
pub fn setup_test_config() -> TempDir {
    TestConfigBuilder::new().with_defaults().build()
}

/// Create a test command with proper environment variables set
///
/// This helper ensures HOME is set so axcess uses ~/.axcess/ within the temp
/// directory, and clears variables that would override the test config.
pub fn test_command(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("axcess"));

    cmd.env("HOME", temp_dir.path());
    cmd.env_remove("AXCESS_CONFIG");
    cmd.env_remove("AXCESS_PASSWORD");
    cmd.env_remove("RUST_LOG");

    cmd
}

/// Card flags accepted by purchase and authorize
pub fn card_args() -> Vec<&'static str> {
    vec![
        "--number",
        "4200000000000000",
        "--month",
        "5",
        "--year",
        "2030",
        "--first-name",
        "Longbob",
        "--last-name",
        "Longsen",
    ]
}
