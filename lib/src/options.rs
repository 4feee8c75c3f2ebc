//! Per-operation options.

use serde::{Deserialize, Serialize};

/// Billing address of the card holder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub address1: Option<String>,
    #[serde(default)]
    pub address2: Option<String>,
    #[serde(default)]
    pub zip: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub mobile: Option<String>,
}

impl Address {
    /// Both street lines joined by a space, trimmed; `None` when both are blank.
    pub fn street(&self) -> Option<String> {
        let street = format!(
            "{} {}",
            self.address1.as_deref().unwrap_or_default(),
            self.address2.as_deref().unwrap_or_default()
        );
        let street = street.trim();
        (!street.is_empty()).then(|| street.to_string())
    }
}

/// Optional data attached to a single gateway call.
///
/// Every field is optional; blank values are dropped from the request.
///
/// # Example
/// ```
/// use axcess_lib::{Address, Options};
///
/// let options = Options::new()
///     .order_id("order-1001")
///     .email("customer@example.com")
///     .billing_address(Address {
///         address1: Some("Leopoldstr. 1".into()),
///         city: Some("Munich".into()),
///         country: Some("DE".into()),
///         ..Default::default()
///     });
/// assert_eq!(options.order_id.as_deref(), Some("order-1001"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    /// Overrides the currency of the amount and the gateway default
    pub currency: Option<String>,
    /// Sent as `IDENTIFICATION.INVOICEID`
    pub order_id: Option<String>,
    /// Sent as `IDENTIFICATION.TRANSACTIONID`; generated when absent
    pub transaction_id: Option<String>,
    /// Sent as `IDENTIFICATION.SHOPPERID`
    pub customer_id: Option<String>,
    /// Sent as `IDENTIFICATION.BULKID`
    pub bulk_id: Option<String>,
    /// Sent as `PRESENTATION.USAGE`, shown on the card statement
    pub soft_descriptor: Option<String>,
    pub email: Option<String>,
    pub ip: Option<String>,
    /// Sent as `PAYMENT.MEMO`
    pub description: Option<String>,
    pub billing_address: Option<Address>,
    /// Replaces the `TRANSACTION.MODE` derived from test/live mode
    pub transaction_mode: Option<String>,
}

impl Options {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    #[must_use]
    pub fn order_id(mut self, order_id: impl Into<String>) -> Self {
        self.order_id = Some(order_id.into());
        self
    }

    #[must_use]
    pub fn transaction_id(mut self, transaction_id: impl Into<String>) -> Self {
        self.transaction_id = Some(transaction_id.into());
        self
    }

    #[must_use]
    pub fn customer_id(mut self, customer_id: impl Into<String>) -> Self {
        self.customer_id = Some(customer_id.into());
        self
    }

    #[must_use]
    pub fn bulk_id(mut self, bulk_id: impl Into<String>) -> Self {
        self.bulk_id = Some(bulk_id.into());
        self
    }

    #[must_use]
    pub fn soft_descriptor(mut self, descriptor: impl Into<String>) -> Self {
        self.soft_descriptor = Some(descriptor.into());
        self
    }

    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    #[must_use]
    pub fn ip(mut self, ip: impl Into<String>) -> Self {
        self.ip = Some(ip.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn billing_address(mut self, address: Address) -> Self {
        self.billing_address = Some(address);
        self
    }

    #[must_use]
    pub fn transaction_mode(mut self, mode: impl Into<String>) -> Self {
        self.transaction_mode = Some(mode.into());
        self
    }
}
