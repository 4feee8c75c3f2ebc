//! Payment instruments: a card, or a reference to an earlier transaction.

use crate::error::{AxcessError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Card brands the processor accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardBrand {
    Visa,
    Master,
    AmericanExpress,
    Discover,
    Jcb,
    Maestro,
    Solo,
}

impl CardBrand {
    /// All supported brands
    pub const ALL: &'static [CardBrand] = &[
        CardBrand::Visa,
        CardBrand::Master,
        CardBrand::AmericanExpress,
        CardBrand::Discover,
        CardBrand::Jcb,
        CardBrand::Maestro,
        CardBrand::Solo,
    ];

    /// The processor's `ACCOUNT.BRAND` value
    pub fn as_wire(&self) -> &'static str {
        match self {
            CardBrand::Visa => "VISA",
            CardBrand::Master => "MASTER",
            CardBrand::AmericanExpress => "AMEX",
            CardBrand::Discover => "DISCOVER",
            CardBrand::Jcb => "JCB",
            CardBrand::Maestro => "MAESTRO",
            CardBrand::Solo => "SOLO",
        }
    }

    /// Lower-case identifier used in config files and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            CardBrand::Visa => "visa",
            CardBrand::Master => "master",
            CardBrand::AmericanExpress => "american_express",
            CardBrand::Discover => "discover",
            CardBrand::Jcb => "jcb",
            CardBrand::Maestro => "maestro",
            CardBrand::Solo => "solo",
        }
    }
}

impl fmt::Display for CardBrand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CardBrand {
    type Err = AxcessError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "visa" => Ok(CardBrand::Visa),
            "master" | "mastercard" => Ok(CardBrand::Master),
            "american_express" | "amex" => Ok(CardBrand::AmericanExpress),
            "discover" => Ok(CardBrand::Discover),
            "jcb" => Ok(CardBrand::Jcb),
            "maestro" => Ok(CardBrand::Maestro),
            "solo" => Ok(CardBrand::Solo),
            _ => Err(AxcessError::UnsupportedCardBrand(s.to_string())),
        }
    }
}

/// Card details as handed over by the caller.
///
/// Validation of the number itself (Luhn, length) is the caller's concern;
/// the adapter only maps these values onto `ACCOUNT.*` and `NAME.*` fields.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditCard {
    pub first_name: String,
    pub last_name: String,
    pub number: String,
    pub brand: CardBrand,
    pub month: u8,
    pub year: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_value: Option<String>,
}

impl CreditCard {
    /// Holder name as sent in `ACCOUNT.HOLDER`
    pub fn holder_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Last four digits of the card number, for display
    pub fn last_digits(&self) -> &str {
        let len = self.number.len();
        self.number.get(len.saturating_sub(4)..).unwrap_or("")
    }
}

// Keep the PAN and CVV out of debug output.
impl fmt::Debug for CreditCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreditCard")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("number", &format_args!("XXXX{}", self.last_digits()))
            .field("brand", &self.brand)
            .field("month", &self.month)
            .field("year", &self.year)
            .finish_non_exhaustive()
    }
}

/// Opaque token identifying a previous transaction.
///
/// Returned by purchase and authorize as the processor's
/// `IDENTIFICATION.UNIQUEID`, and sent back as `IDENTIFICATION.REFERENCEID`
/// by capture, refund, void and reference-based purchases.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Authorization(String);

impl Authorization {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Authorization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Authorization {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Authorization {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// What the customer pays with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instrument {
    Card(CreditCard),
    Reference(Authorization),
}

impl From<CreditCard> for Instrument {
    fn from(card: CreditCard) -> Self {
        Instrument::Card(card)
    }
}

impl From<Authorization> for Instrument {
    fn from(auth: Authorization) -> Self {
        Instrument::Reference(auth)
    }
}
