//! Constants used throughout the axcess library

use std::path::PathBuf;

/// Application name for the config directory
pub const APP_NAME: &str = "axcess";

/// Config file name
pub const CONFIG_FILE: &str = "config.toml";

/// Human-readable gateway name
pub const DISPLAY_NAME: &str = "Axcessms Gateway";

/// Processor homepage
pub const HOMEPAGE_URL: &str = "http://www.axcessms.com/";

/// Endpoint used while the gateway is in test mode
pub const TEST_URL: &str = "https://test.ctpe.net/frontend/payment.prc";

/// Endpoint used for live transactions
pub const LIVE_URL: &str = "https://ctpe.net/frontend/payment.prc";

/// Currency used when neither the options nor the amount name one
pub const DEFAULT_CURRENCY: &str = "EUR";

/// `TRANSACTION.MODE` value for real transactions
pub const LIVE_MODE: &str = "LIVE";

/// `TRANSACTION.MODE` value sent when the gateway runs in test mode
pub const DEFAULT_TEST_MODE: &str = "INTEGRATOR_TEST";

/// `TRANSACTION.RESPONSE` value; only synchronous responses are handled
pub const SYNC_RESPONSE: &str = "SYNC";

/// `PROCESSING.RESULT` value for an accepted transaction
pub const ACK: &str = "ACK";

/// Content type of both the request and the response body
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=UTF-8";

/// The processor compresses nothing we can read, so compression is refused
pub const ACCEPT_ENCODING: &str = "identity;q=0";

/// ISO 3166-1 alpha-2 codes of the countries the processor accepts
pub const SUPPORTED_COUNTRIES: &[&str] = &[
    "AD", "AT", "BE", "BG", "BR", "CA", "CH", "CY", "CZ", "DE", "DK", "EE", "ES", "FI", "FO",
    "FR", "GB", "GI", "GR", "HR", "HU", "IE", "IL", "IM", "IS", "IT", "LI", "LT", "LU", "LV",
    "MC", "MT", "MX", "NL", "NO", "PL", "PT", "RO", "RU", "SE", "SI", "SK", "TR", "US", "VA",
];

/// Returns true if the processor accepts merchants and cards from `country`.
pub fn supports_country(country: &str) -> bool {
    SUPPORTED_COUNTRIES
        .iter()
        .any(|c| c.eq_ignore_ascii_case(country.trim()))
}

/// Dotted field names of the processor's form protocol.
pub mod fields {
    pub const PAYMENT_CODE: &str = "PAYMENT.CODE";
    pub const PAYMENT_MEMO: &str = "PAYMENT.MEMO";

    pub const SECURITY_SENDER: &str = "SECURITY.SENDER";
    pub const USER_LOGIN: &str = "USER.LOGIN";
    pub const USER_PWD: &str = "USER.PWD";
    pub const TRANSACTION_CHANNEL: &str = "TRANSACTION.CHANNEL";
    pub const TRANSACTION_MODE: &str = "TRANSACTION.MODE";
    pub const TRANSACTION_RESPONSE: &str = "TRANSACTION.RESPONSE";

    pub const PRESENTATION_AMOUNT: &str = "PRESENTATION.AMOUNT";
    pub const PRESENTATION_CURRENCY: &str = "PRESENTATION.CURRENCY";
    pub const PRESENTATION_USAGE: &str = "PRESENTATION.USAGE";

    pub const IDENTIFICATION_TRANSACTIONID: &str = "IDENTIFICATION.TRANSACTIONID";
    pub const IDENTIFICATION_INVOICEID: &str = "IDENTIFICATION.INVOICEID";
    pub const IDENTIFICATION_SHOPPERID: &str = "IDENTIFICATION.SHOPPERID";
    pub const IDENTIFICATION_BULKID: &str = "IDENTIFICATION.BULKID";
    pub const IDENTIFICATION_REFERENCEID: &str = "IDENTIFICATION.REFERENCEID";
    pub const IDENTIFICATION_UNIQUEID: &str = "IDENTIFICATION.UNIQUEID";
    pub const IDENTIFICATION_SHORTID: &str = "IDENTIFICATION.SHORTID";

    pub const ACCOUNT_HOLDER: &str = "ACCOUNT.HOLDER";
    pub const ACCOUNT_NUMBER: &str = "ACCOUNT.NUMBER";
    pub const ACCOUNT_BRAND: &str = "ACCOUNT.BRAND";
    pub const ACCOUNT_EXPIRY_MONTH: &str = "ACCOUNT.EXPIRY_MONTH";
    pub const ACCOUNT_EXPIRY_YEAR: &str = "ACCOUNT.EXPIRY_YEAR";
    pub const ACCOUNT_VERIFICATION: &str = "ACCOUNT.VERIFICATION";

    pub const NAME_GIVEN: &str = "NAME.GIVEN";
    pub const NAME_FAMILY: &str = "NAME.FAMILY";
    pub const NAME_COMPANY: &str = "NAME.COMPANY";

    pub const CONTACT_EMAIL: &str = "CONTACT.EMAIL";
    pub const CONTACT_IP: &str = "CONTACT.IP";
    pub const CONTACT_PHONE: &str = "CONTACT.PHONE";
    pub const CONTACT_MOBILE: &str = "CONTACT.MOBILE";

    pub const ADDRESS_STREET: &str = "ADDRESS.STREET";
    pub const ADDRESS_ZIP: &str = "ADDRESS.ZIP";
    pub const ADDRESS_CITY: &str = "ADDRESS.CITY";
    pub const ADDRESS_STATE: &str = "ADDRESS.STATE";
    pub const ADDRESS_COUNTRY: &str = "ADDRESS.COUNTRY";

    pub const PROCESSING_RESULT: &str = "PROCESSING.RESULT";
    pub const PROCESSING_REASON: &str = "PROCESSING.REASON";
    pub const PROCESSING_RETURN: &str = "PROCESSING.RETURN";
    pub const PROCESSING_RETURN_CODE: &str = "PROCESSING.RETURN.CODE";

    /// Fields whose values must never reach a log line
    pub const SENSITIVE: &[&str] = &[ACCOUNT_NUMBER, ACCOUNT_VERIFICATION, USER_PWD];
}

/// Get the axcess home directory (`~/.axcess/`)
///
/// # Returns
///
/// - `Some(PathBuf)` if the home directory can be determined
/// - `None` if the home directory cannot be determined
///
/// # Examples
///
/// ```
/// use axcess_lib::constants::axcess_home_dir;
///
/// if let Some(path) = axcess_home_dir() {
///     println!("Axcess home dir: {}", path.display());
/// }
/// ```
pub fn axcess_home_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(format!(".{APP_NAME}")))
}

/// Get the default config file path (`~/.axcess/config.toml`)
pub fn default_config_path() -> Option<PathBuf> {
    axcess_home_dir().map(|p| p.join(CONFIG_FILE))
}
