//! Gateway configuration.
//!
//! Configuration is usually read from `~/.axcess/config.toml`:
//!
//! ```toml
//! default_currency = "EUR"
//! test = true
//!
//! [credentials]
//! sender = "ff80808144d46be50144d4a6f3b6005f"
//! login = "ff80808144d46be50144d4a6f3b80061"
//! password = "secret"
//! channel = "ff80808144d46be50144d4a732ae0063"
//! ```

use crate::constants::{DEFAULT_CURRENCY, LIVE_URL, TEST_URL};
use crate::error::{AxcessError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Static authentication data sent with every request.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Credentials {
    /// `SECURITY.SENDER`
    #[serde(default)]
    pub sender: Option<String>,
    /// `USER.LOGIN`
    #[serde(default)]
    pub login: Option<String>,
    /// `USER.PWD`
    #[serde(default)]
    pub password: Option<String>,
    /// `TRANSACTION.CHANNEL`
    #[serde(default)]
    pub channel: Option<String>,
}

impl Credentials {
    pub fn new(
        sender: impl Into<String>,
        login: impl Into<String>,
        password: impl Into<String>,
        channel: impl Into<String>,
    ) -> Self {
        Self {
            sender: Some(sender.into()),
            login: Some(login.into()),
            password: Some(password.into()),
            channel: Some(channel.into()),
        }
    }

    /// Check that all four values are present and non-blank.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("sender", &self.sender),
            ("login", &self.login),
            ("password", &self.password),
            ("channel", &self.channel),
        ] {
            if value.as_deref().map_or(true, |v| v.trim().is_empty()) {
                return Err(AxcessError::MissingCredential(name));
            }
        }
        Ok(())
    }

    pub fn sender(&self) -> &str {
        self.sender.as_deref().unwrap_or_default()
    }

    pub fn login(&self) -> &str {
        self.login.as_deref().unwrap_or_default()
    }

    pub fn password(&self) -> &str {
        self.password.as_deref().unwrap_or_default()
    }

    pub fn channel(&self) -> &str {
        self.channel.as_deref().unwrap_or_default()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("sender", &self.sender)
            .field("login", &self.login)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("channel", &self.channel)
            .finish()
    }
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

fn default_test() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    #[serde(default)]
    pub credentials: Credentials,
    /// Currency used when neither the amount nor the options carry one
    #[serde(default = "default_currency")]
    pub default_currency: String,
    /// Send requests to the test endpoint and mark them `INTEGRATOR_TEST`
    #[serde(default = "default_test")]
    pub test: bool,
    /// Request timeout in seconds; libcurl's default when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            credentials: Credentials::default(),
            default_currency: default_currency(),
            test: default_test(),
            timeout: None,
            user_agent: None,
        }
    }
}

/// Builder for creating GatewayConfig instances
///
/// # Examples
///
/// ```
/// use axcess_lib::config::GatewayConfig;
///
/// let config = GatewayConfig::builder()
///     .credentials("sender", "login", "password", "channel")
///     .default_currency("USD")
///     .live()
///     .build()
///     .unwrap();
/// assert!(!config.test);
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: GatewayConfig,
}

impl ConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set all four credentials at once
    #[must_use]
    pub fn credentials(
        mut self,
        sender: impl Into<String>,
        login: impl Into<String>,
        password: impl Into<String>,
        channel: impl Into<String>,
    ) -> Self {
        self.config.credentials = Credentials::new(sender, login, password, channel);
        self
    }

    #[must_use]
    pub fn default_currency(mut self, currency: impl Into<String>) -> Self {
        self.config.default_currency = currency.into();
        self
    }

    #[must_use]
    pub fn test(mut self, test: bool) -> Self {
        self.config.test = test;
        self
    }

    #[must_use]
    pub fn live(self) -> Self {
        self.test(false)
    }

    /// Set request timeout in seconds.
    #[must_use]
    pub fn timeout(mut self, seconds: u64) -> Self {
        self.config.timeout = Some(seconds);
        self
    }

    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.config.user_agent = Some(ua.into());
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<GatewayConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl GatewayConfig {
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Endpoint selected by the test flag
    pub fn endpoint(&self) -> &'static str {
        if self.test {
            TEST_URL
        } else {
            LIVE_URL
        }
    }

    /// Validate credentials and the default currency.
    pub fn validate(&self) -> Result<()> {
        self.credentials.validate()?;

        let currency = self.default_currency.trim();
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(AxcessError::InvalidConfig(format!(
                "default_currency '{}' is not a three-letter ISO 4217 code",
                self.default_currency
            )));
        }
        if self.timeout == Some(0) {
            return Err(AxcessError::InvalidConfig(
                "timeout must be at least one second".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse a config from TOML text without validating it.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load config from the specified path or default location (~/.axcess/config.toml)
    pub fn load_from(config_path: Option<impl AsRef<Path>>) -> Result<Self> {
        let config = Self::load_unchecked(config_path)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(None::<&str>)
    }

    /// Load config without validation.
    ///
    /// Used by `axcess config validate` to report every problem with the
    /// file instead of failing on the first parse.
    pub fn load_unchecked(config_path: Option<impl AsRef<Path>>) -> Result<Self> {
        let config_path = Self::resolve_path(config_path)?;

        if !config_path.exists() {
            return Err(AxcessError::ConfigMissing(format!(
                "Config file not found at {}.",
                config_path.display()
            )));
        }

        let content = std::fs::read_to_string(&config_path).map_err(|e| {
            AxcessError::ConfigMissing(format!(
                "Failed to read config file at {}: {}",
                config_path.display(),
                e
            ))
        })?;

        toml::from_str(&content).map_err(|e| {
            AxcessError::InvalidConfig(format!(
                "Failed to parse config file at {}: {}",
                config_path.display(),
                e
            ))
        })
    }

    /// Save config with validation, readable by the owner only.
    pub fn save_to(&self, config_path: impl AsRef<Path>) -> Result<()> {
        self.validate()?;
        let config_path = config_path.as_ref();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        restrict_to_owner(config_path)?;

        Ok(())
    }

    /// Get the default config file path (~/.axcess/config.toml)
    pub fn default_config_path() -> Result<PathBuf> {
        crate::constants::default_config_path().ok_or(AxcessError::NoConfigDir)
    }

    fn resolve_path(config_path: Option<impl AsRef<Path>>) -> Result<PathBuf> {
        match config_path {
            Some(path) => Ok(PathBuf::from(path.as_ref())),
            None => Self::default_config_path(),
        }
    }
}

// The file holds the gateway password.
#[cfg(unix)]
fn restrict_to_owner(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_to_owner(_path: &Path) -> Result<()> {
    Ok(())
}
