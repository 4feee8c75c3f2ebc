//! Error types for the axcess library.

use thiserror::Error;

/// Result type alias for gateway operations.
pub type Result<T> = std::result::Result<T, AxcessError>;

/// Everything that can go wrong before, during or after a gateway call.
///
/// A declined card is not an error: the processor's verdict is carried by
/// [`crate::Response::success`]. Variants here describe configuration
/// mistakes, transport failures and unreadable responses.
#[derive(Error, Debug)]
pub enum AxcessError {
    // ==================== Configuration Errors ====================
    #[error("Missing required gateway credential '{0}'. Set it in the [credentials] section of your config.")]
    MissingCredential(&'static str),

    #[error("Operation {code} requires {expected}, but none was supplied.")]
    MissingInstrument {
        code: &'static str,
        expected: &'static str,
    },

    #[error("{0}")]
    ConfigMissing(String),

    #[error("{0}")]
    InvalidConfig(String),

    #[error("Could not find config directory. Pass --config or ensure your home directory is accessible.")]
    NoConfigDir,

    #[error("Invalid amount '{0}'. Expected a decimal value such as 10.00.")]
    InvalidAmount(String),

    #[error("Card brand '{0}' is not supported by this gateway.")]
    UnsupportedCardBrand(String),

    #[error("Invalid config file format: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Failed to save config: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // ==================== Transport Errors ====================
    #[error("Gateway returned HTTP {status} for {code}")]
    Http { status: u32, code: &'static str },

    #[error("Network request failed: {0}")]
    Curl(#[from] curl::Error),

    #[error("Failed to encode request form: {0}")]
    FormEncode(#[from] serde_urlencoded::ser::Error),

    // ==================== Response Errors ====================
    #[error("Malformed gateway response: {0}")]
    MalformedResponse(String),

    #[error("Gateway returned invalid text encoding. The response may be corrupted.")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    // ==================== External Library Errors ====================
    #[error("File operation failed: {0}")]
    Io(#[from] std::io::Error),
}

impl AxcessError {
    /// Create a config missing error
    pub fn config_missing(msg: impl Into<String>) -> Self {
        Self::ConfigMissing(msg.into())
    }

    /// Create a malformed response error
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }

    /// True for errors raised before any request leaves the process.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            AxcessError::MissingCredential(_)
                | AxcessError::MissingInstrument { .. }
                | AxcessError::ConfigMissing(_)
                | AxcessError::InvalidConfig(_)
                | AxcessError::NoConfigDir
                | AxcessError::InvalidAmount(_)
                | AxcessError::UnsupportedCardBrand(_)
                | AxcessError::TomlParse(_)
                | AxcessError::TomlSerialize(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credential_message_names_field() {
        let err = AxcessError::MissingCredential("password");
        assert!(err.to_string().contains("'password'"));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_missing_instrument_message() {
        let err = AxcessError::MissingInstrument {
            code: "CC.DB",
            expected: "a credit card",
        };
        assert_eq!(
            err.to_string(),
            "Operation CC.DB requires a credit card, but none was supplied."
        );
    }

    #[test]
    fn test_transport_errors_are_not_configuration() {
        assert!(!AxcessError::Http {
            status: 500,
            code: "CC.DB"
        }.is_configuration());
        assert!(!AxcessError::malformed("no '='").is_configuration());
    }
}
