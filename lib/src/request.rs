//! Request building: maps an operation onto the processor's dotted form fields.

use crate::config::GatewayConfig;
use crate::constants::{fields, DEFAULT_TEST_MODE, LIVE_MODE, SYNC_RESPONSE};
use crate::currency::Money;
use crate::error::{AxcessError, Result};
use crate::instrument::{Authorization, CreditCard, Instrument};
use crate::options::{Address, Options};
use std::fmt;

/// The processor's `PAYMENT.CODE` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentCode {
    /// Purchase with a card
    Debit,
    /// Purchase against a stored reference
    Rebill,
    PreAuthorization,
    Capture,
    Refund,
    /// Void of an earlier transaction
    Reversal,
}

/// Which instrument variant a payment code accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accepts {
    Card,
    Reference,
    Either,
}

impl PaymentCode {
    pub const ALL: &'static [PaymentCode] = &[
        PaymentCode::Debit,
        PaymentCode::Rebill,
        PaymentCode::PreAuthorization,
        PaymentCode::Capture,
        PaymentCode::Refund,
        PaymentCode::Reversal,
    ];

    /// Wire value sent as `PAYMENT.CODE`
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentCode::Debit => "CC.DB",
            PaymentCode::Rebill => "CC.RB",
            PaymentCode::PreAuthorization => "CC.PA",
            PaymentCode::Capture => "CC.CP",
            PaymentCode::Refund => "CC.RF",
            PaymentCode::Reversal => "CC.RV",
        }
    }

    pub fn accepts(&self) -> Accepts {
        match self {
            PaymentCode::Debit => Accepts::Card,
            PaymentCode::PreAuthorization => Accepts::Either,
            PaymentCode::Rebill
            | PaymentCode::Capture
            | PaymentCode::Refund
            | PaymentCode::Reversal => Accepts::Reference,
        }
    }
}

impl fmt::Display for PaymentCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered form fields for one request.
///
/// Blank values never enter the form, so everything in here is sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestForm {
    fields: Vec<(&'static str, String)>,
}

impl RequestForm {
    fn push(&mut self, name: &'static str, value: Option<impl AsRef<str>>) {
        let Some(value) = value else { return };
        let value = value.as_ref();
        if value.trim().is_empty() {
            return;
        }
        self.fields.push((name, value.to_string()));
    }

    /// First value sent for `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn fields(&self) -> &[(&'static str, String)] {
        &self.fields
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(k, _)| *k)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// `application/x-www-form-urlencoded` body
    pub fn encode(&self) -> Result<String> {
        Ok(serde_urlencoded::to_string(&self.fields)?)
    }

    /// Fields with card number, CVV and password masked, for logging.
    pub fn redacted(&self) -> Vec<(&'static str, String)> {
        self.fields
            .iter()
            .map(|(k, v)| {
                if fields::SENSITIVE.contains(k) {
                    (*k, "[FILTERED]".to_string())
                } else {
                    (*k, v.clone())
                }
            })
            .collect()
    }
}

/// Builds request forms for one gateway configuration.
#[derive(Debug, Clone, Copy)]
pub struct RequestBuilder<'a> {
    config: &'a GatewayConfig,
}

impl<'a> RequestBuilder<'a> {
    pub fn new(config: &'a GatewayConfig) -> Self {
        Self { config }
    }

    /// Build the form for `code`.
    ///
    /// # Errors
    /// Returns a configuration error if credentials are incomplete or the
    /// instrument variant does not fit the payment code.
    pub fn build(
        &self,
        code: PaymentCode,
        money: Option<&Money>,
        instrument: &Instrument,
        options: &Options,
    ) -> Result<RequestForm> {
        self.config.credentials.validate()?;
        check_instrument(code, instrument)?;

        let mut form = RequestForm::default();
        form.push(fields::PAYMENT_CODE, Some(code.as_str()));
        self.add_authentication(&mut form);
        self.add_transaction(&mut form, options);
        self.add_presentation(&mut form, money, options);

        match instrument {
            Instrument::Card(card) => {
                add_account(&mut form, card);
                add_customer_data(&mut form, card, options);
                if let Some(address) = &options.billing_address {
                    add_address(&mut form, address);
                }
            }
            Instrument::Reference(authorization) => add_reference(&mut form, authorization),
        }

        form.push(fields::PAYMENT_MEMO, options.description.as_deref());
        Ok(form)
    }

    fn add_authentication(&self, form: &mut RequestForm) {
        let credentials = &self.config.credentials;
        form.push(fields::SECURITY_SENDER, Some(credentials.sender()));
        form.push(fields::USER_LOGIN, Some(credentials.login()));
        form.push(fields::USER_PWD, Some(credentials.password()));
        form.push(fields::TRANSACTION_CHANNEL, Some(credentials.channel()));
    }

    fn add_transaction(&self, form: &mut RequestForm, options: &Options) {
        let default_mode = if self.config.test {
            DEFAULT_TEST_MODE
        } else {
            LIVE_MODE
        };
        let mode = options
            .transaction_mode
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(default_mode);
        form.push(fields::TRANSACTION_MODE, Some(mode));
        form.push(fields::TRANSACTION_RESPONSE, Some(SYNC_RESPONSE));
    }

    fn add_presentation(&self, form: &mut RequestForm, money: Option<&Money>, options: &Options) {
        let currency = self.currency(money, options);
        form.push(
            fields::PRESENTATION_AMOUNT,
            money.map(|m| m.format(&currency)),
        );
        form.push(fields::PRESENTATION_CURRENCY, Some(&currency));

        let transaction_id = options
            .transaction_id
            .clone()
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(generate_transaction_id);
        form.push(fields::IDENTIFICATION_TRANSACTIONID, Some(transaction_id));
        form.push(fields::IDENTIFICATION_INVOICEID, options.order_id.as_deref());
        form.push(fields::IDENTIFICATION_SHOPPERID, options.customer_id.as_deref());
        form.push(fields::IDENTIFICATION_BULKID, options.bulk_id.as_deref());
        form.push(fields::PRESENTATION_USAGE, options.soft_descriptor.as_deref());
    }

    /// Options first, then the amount's own currency, then the gateway default.
    fn currency(&self, money: Option<&Money>, options: &Options) -> String {
        [
            options.currency.as_deref(),
            money.and_then(|m| m.currency.as_deref()),
        ]
        .into_iter()
        .flatten()
        .find(|c| !c.trim().is_empty())
        .unwrap_or(self.config.default_currency.as_str())
        .trim()
        .to_uppercase()
    }
}

fn check_instrument(code: PaymentCode, instrument: &Instrument) -> Result<()> {
    match (code.accepts(), instrument) {
        (Accepts::Card, Instrument::Reference(_)) => Err(AxcessError::MissingInstrument {
            code: code.as_str(),
            expected: "a credit card",
        }),
        (Accepts::Reference, Instrument::Card(_)) => Err(AxcessError::MissingInstrument {
            code: code.as_str(),
            expected: "an authorization reference",
        }),
        _ => Ok(()),
    }
}

fn add_account(form: &mut RequestForm, card: &CreditCard) {
    form.push(fields::ACCOUNT_HOLDER, Some(card.holder_name()));
    form.push(fields::ACCOUNT_NUMBER, Some(&card.number));
    form.push(fields::ACCOUNT_BRAND, Some(card.brand.as_wire()));
    form.push(fields::ACCOUNT_EXPIRY_MONTH, Some(format!("{:02}", card.month)));
    form.push(fields::ACCOUNT_EXPIRY_YEAR, Some(format!("{:04}", card.year)));
    form.push(
        fields::ACCOUNT_VERIFICATION,
        card.verification_value.as_deref(),
    );
}

fn add_customer_data(form: &mut RequestForm, card: &CreditCard, options: &Options) {
    form.push(fields::CONTACT_EMAIL, options.email.as_deref());
    form.push(fields::CONTACT_IP, options.ip.as_deref());
    form.push(fields::NAME_GIVEN, Some(&card.first_name));
    form.push(fields::NAME_FAMILY, Some(&card.last_name));
}

fn add_address(form: &mut RequestForm, address: &Address) {
    form.push(fields::ADDRESS_STREET, address.street());
    form.push(fields::ADDRESS_ZIP, address.zip.as_deref());
    form.push(fields::ADDRESS_CITY, address.city.as_deref());
    form.push(fields::ADDRESS_STATE, address.state.as_deref());
    form.push(fields::ADDRESS_COUNTRY, address.country.as_deref());
    form.push(fields::NAME_COMPANY, address.company.as_deref());
    form.push(fields::CONTACT_PHONE, address.phone.as_deref());
    form.push(fields::CONTACT_MOBILE, address.mobile.as_deref());
}

fn add_reference(form: &mut RequestForm, authorization: &Authorization) {
    form.push(fields::IDENTIFICATION_REFERENCEID, Some(authorization.as_str()));
}

/// 32 lowercase hex characters
fn generate_transaction_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
