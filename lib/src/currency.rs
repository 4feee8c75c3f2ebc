//! Currency definitions and money amounts.
//!
//! Amounts travel through the library in minor units (cents) and are only
//! rendered as decimal strings when written into `PRESENTATION.AMOUNT`.

use crate::error::{AxcessError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An ISO 4217 currency with its number of minor-unit digits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Currency {
    /// Three-letter code (e.g., "EUR")
    pub code: &'static str,
    /// Number of decimal places
    pub decimals: u8,
    /// Divisor for converting minor units to major units (10^decimals)
    pub divisor: u64,
}

impl Currency {
    /// Create a new currency with calculated divisor
    pub const fn new(code: &'static str, decimals: u8) -> Self {
        let divisor = 10u64.pow(decimals as u32);
        Self {
            code,
            decimals,
            divisor,
        }
    }

    /// Look up a known currency by code (case-insensitive).
    pub fn from_code(code: &str) -> Option<Currency> {
        currencies::ALL
            .iter()
            .find(|c| c.code.eq_ignore_ascii_case(code.trim()))
            .copied()
    }

    /// Number of decimals used to render amounts in `code`.
    ///
    /// Codes outside the built-in table are rendered with two decimals.
    pub fn decimals_for(code: &str) -> u8 {
        Self::from_code(code).map_or(2, |c| c.decimals)
    }

    /// Format minor units as a decimal string, e.g. `150` → `"1.50"`.
    pub fn format_minor(&self, minor: u64) -> String {
        format_minor(minor, self.decimals)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}

/// Format minor units with a fixed number of decimals.
pub fn format_minor(minor: u64, decimals: u8) -> String {
    if decimals == 0 {
        return minor.to_string();
    }
    let divisor = 10u64.pow(decimals as u32);
    let whole = minor / divisor;
    let remainder = minor % divisor;
    format!("{whole}.{remainder:0width$}", width = decimals as usize)
}

/// Parse a decimal amount in major units into minor units.
///
/// Accepts `"10"`, `"10.5"` and `"10.50"`; rejects negative values, more
/// fractional digits than the currency has, and anything non-numeric.
pub fn parse_major(input: &str, decimals: u8) -> Result<u64> {
    let invalid = || AxcessError::InvalidAmount(input.to_string());
    let trimmed = input.trim();
    let (whole, frac) = trimmed.split_once('.').unwrap_or((trimmed, ""));

    if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    if !frac.bytes().all(|b| b.is_ascii_digit()) || frac.len() > decimals as usize {
        return Err(invalid());
    }
    if trimmed.ends_with('.') {
        return Err(invalid());
    }

    let divisor = 10u64.pow(decimals as u32);
    let whole: u64 = whole.parse().map_err(|_| invalid())?;
    let frac_minor: u64 = if frac.is_empty() {
        0
    } else {
        let padded = format!("{frac:0<width$}", width = decimals as usize);
        padded.parse().map_err(|_| invalid())?
    };

    whole
        .checked_mul(divisor)
        .and_then(|w| w.checked_add(frac_minor))
        .ok_or_else(invalid)
}

/// A money amount in minor units, optionally tagged with its currency.
///
/// When the currency is absent the request builder falls back to the
/// currency named in the options, then to the gateway default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    pub cents: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl Money {
    /// An amount with no currency of its own
    pub fn new(cents: u64) -> Self {
        Self {
            cents,
            currency: None,
        }
    }

    /// An amount in a specific currency
    pub fn with_currency(cents: u64, currency: impl Into<String>) -> Self {
        Self {
            cents,
            currency: Some(currency.into().to_uppercase()),
        }
    }

    /// Parse a decimal amount such as `"12.30"` in the given currency.
    pub fn parse(amount: &str, currency: &str) -> Result<Self> {
        let cents = parse_major(amount, Currency::decimals_for(currency))?;
        Ok(Self::with_currency(cents, currency))
    }

    /// Render the amount for `currency`.
    pub fn format(&self, currency: &str) -> String {
        format_minor(self.cents, Currency::decimals_for(currency))
    }
}

impl From<u64> for Money {
    fn from(cents: u64) -> Self {
        Money::new(cents)
    }
}

/// Common currency definitions
pub mod currencies {
    use super::Currency;

    pub const EUR: Currency = Currency::new("EUR", 2);
    pub const USD: Currency = Currency::new("USD", 2);
    pub const GBP: Currency = Currency::new("GBP", 2);
    pub const CHF: Currency = Currency::new("CHF", 2);
    pub const SEK: Currency = Currency::new("SEK", 2);
    pub const NOK: Currency = Currency::new("NOK", 2);
    pub const DKK: Currency = Currency::new("DKK", 2);
    pub const PLN: Currency = Currency::new("PLN", 2);
    pub const CZK: Currency = Currency::new("CZK", 2);
    pub const HUF: Currency = Currency::new("HUF", 2);
    pub const JPY: Currency = Currency::new("JPY", 0);
    pub const KRW: Currency = Currency::new("KRW", 0);
    pub const ISK: Currency = Currency::new("ISK", 0);
    pub const BHD: Currency = Currency::new("BHD", 3);
    pub const KWD: Currency = Currency::new("KWD", 3);
    pub const JOD: Currency = Currency::new("JOD", 3);
    pub const OMR: Currency = Currency::new("OMR", 3);
    pub const TND: Currency = Currency::new("TND", 3);

    pub const ALL: &[Currency] = &[
        EUR, USD, GBP, CHF, SEK, NOK, DKK, PLN, CZK, HUF, JPY, KRW, ISK, BHD, KWD, JOD, OMR, TND,
    ];
}
