//! Exit codes for the axcess CLI.
//!
//! Following standard Unix conventions and providing specific codes
//! for different error categories to aid scripting and automation.

/// Exit codes for the axcess CLI.
///
/// These codes follow Unix conventions where possible:
/// - 0: Success
/// - 1: General error
/// - 2: Misuse of shell command (e.g., invalid arguments)
/// - 130: Script terminated by Ctrl+C (128 + SIGINT)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Successful execution
    Success = 0,

    /// General/unknown error
    GeneralError = 1,

    /// Invalid usage (bad arguments, invalid amount or brand)
    InvalidUsage = 2,

    /// Configuration error (missing config, missing credentials)
    ConfigError = 3,

    /// Network/connection error, HTTP failure or unreadable reply
    NetworkError = 4,

    /// The processor declined the transaction
    PaymentDeclined = 5,

    /// Interrupted by signal (Ctrl+C)
    /// Standard Unix convention: 128 + signal number (SIGINT = 2)
    Interrupted = 130,
}

impl ExitCode {
    /// Convert to process exit code
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Exit the process with this code
    pub fn exit(self) -> ! {
        std::process::exit(self.code())
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.code()
    }
}

impl From<&anyhow::Error> for ExitCode {
    fn from(err: &anyhow::Error) -> Self {
        if let Some(axcess_err) = err.downcast_ref::<axcess_lib::AxcessError>() {
            return ExitCode::from(axcess_err);
        }

        let msg = err.to_string().to_lowercase();

        if msg.contains("config") {
            ExitCode::ConfigError
        } else {
            ExitCode::GeneralError
        }
    }
}

/// Approved transactions exit cleanly; declines are reported with their own code.
impl From<&axcess_lib::Response> for ExitCode {
    fn from(response: &axcess_lib::Response) -> Self {
        if response.success {
            ExitCode::Success
        } else {
            ExitCode::PaymentDeclined
        }
    }
}

impl From<&axcess_lib::AxcessError> for ExitCode {
    fn from(err: &axcess_lib::AxcessError) -> Self {
        use axcess_lib::AxcessError;

        match err {
            AxcessError::MissingCredential(_)
            | AxcessError::ConfigMissing(_)
            | AxcessError::InvalidConfig(_)
            | AxcessError::NoConfigDir
            | AxcessError::TomlParse(_)
            | AxcessError::TomlSerialize(_) => ExitCode::ConfigError,

            AxcessError::InvalidAmount(_)
            | AxcessError::UnsupportedCardBrand(_)
            | AxcessError::MissingInstrument { .. } => ExitCode::InvalidUsage,

            AxcessError::Http { .. }
            | AxcessError::Curl(_)
            | AxcessError::MalformedResponse(_)
            | AxcessError::InvalidUtf8(_) => ExitCode::NetworkError,

            AxcessError::FormEncode(_) | AxcessError::Io(_) => ExitCode::GeneralError,
        }
    }
}
