//! Library API - the gateway entry point.
//!
//! Every operation builds one form, posts it synchronously to the endpoint
//! selected by the test flag, and interprets the processor's answer.

use crate::config::GatewayConfig;
use crate::constants::{ACCEPT_ENCODING, FORM_CONTENT_TYPE};
use crate::currency::Money;
use crate::error::{AxcessError, Result};
use crate::http::{CurlTransport, Transport};
use crate::instrument::{Authorization, Instrument};
use crate::options::Options;
use crate::request::{PaymentCode, RequestBuilder};
use crate::response::Response;
use tracing::{debug, info, warn};

/// Client for the Axcess payment gateway.
///
/// # Example
/// ```no_run
/// # use axcess_lib::{CardBrand, CreditCard, Gateway, GatewayConfig, Money, Options};
/// # fn example() -> axcess_lib::Result<()> {
/// let config = GatewayConfig::builder()
///     .credentials("sender", "login", "password", "channel")
///     .build()?;
/// let gateway = Gateway::new(config)?;
///
/// let card = CreditCard {
///     first_name: "Longbob".into(),
///     last_name: "Longsen".into(),
///     number: "4200000000000000".into(),
///     brand: CardBrand::Visa,
///     month: 5,
///     year: 2030,
///     verification_value: Some("123".into()),
/// };
///
/// let auth = gateway.authorize(Money::new(150), &card.into(), &Options::new())?;
/// if let Some(token) = auth.authorization {
///     gateway.capture(None, &token, &Options::new())?;
/// }
/// # Ok(())
/// # }
/// ```
pub struct Gateway {
    config: GatewayConfig,
    transport: Box<dyn Transport>,
}

impl Gateway {
    /// Create a gateway that talks to the processor over curl.
    ///
    /// # Errors
    /// Returns a configuration error if any credential is missing.
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let transport = CurlTransport::from(&config);
        Self::with_transport(config, transport)
    }

    /// Create a gateway with a custom transport.
    pub fn with_transport(config: GatewayConfig, transport: impl Transport + 'static) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            transport: Box::new(transport),
        })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Charge a card (`CC.DB`) or rebill a previous transaction (`CC.RB`).
    pub fn purchase(
        &self,
        money: impl Into<Money>,
        instrument: &Instrument,
        options: &Options,
    ) -> Result<Response> {
        let code = match instrument {
            Instrument::Card(_) => PaymentCode::Debit,
            Instrument::Reference(_) => PaymentCode::Rebill,
        };
        self.commit(code, Some(&money.into()), instrument, options)
    }

    /// Reserve funds without capturing them (`CC.PA`).
    pub fn authorize(
        &self,
        money: impl Into<Money>,
        instrument: &Instrument,
        options: &Options,
    ) -> Result<Response> {
        self.commit(
            PaymentCode::PreAuthorization,
            Some(&money.into()),
            instrument,
            options,
        )
    }

    /// Capture an authorization (`CC.CP`); `None` captures without an amount.
    pub fn capture(
        &self,
        money: Option<Money>,
        authorization: &Authorization,
        options: &Options,
    ) -> Result<Response> {
        self.commit(
            PaymentCode::Capture,
            money.as_ref(),
            &Instrument::Reference(authorization.clone()),
            options,
        )
    }

    /// Refund a captured or purchased transaction (`CC.RF`).
    pub fn refund(
        &self,
        money: Option<Money>,
        authorization: &Authorization,
        options: &Options,
    ) -> Result<Response> {
        self.commit(
            PaymentCode::Refund,
            money.as_ref(),
            &Instrument::Reference(authorization.clone()),
            options,
        )
    }

    /// Reverse a transaction (`CC.RV`). No amount is sent.
    pub fn void(&self, authorization: &Authorization, options: &Options) -> Result<Response> {
        self.commit(
            PaymentCode::Reversal,
            None,
            &Instrument::Reference(authorization.clone()),
            options,
        )
    }

    fn commit(
        &self,
        code: PaymentCode,
        money: Option<&Money>,
        instrument: &Instrument,
        options: &Options,
    ) -> Result<Response> {
        let form = RequestBuilder::new(&self.config).build(code, money, instrument, options)?;
        let url = self.config.endpoint();
        debug!(code = %code, url, fields = ?form.redacted(), "Sending gateway request");

        let body = form.encode()?;
        let response = self.transport.post(url, body.as_bytes(), &request_headers())?;

        if !response.is_success() {
            warn!(code = %code, status = response.status_code, "Gateway returned HTTP error");
            return Err(AxcessError::Http {
                status: response.status_code,
                code: code.as_str(),
            });
        }

        let result = Response::parse(&response.body_string()?)?;
        info!(
            code = %code,
            success = result.success,
            test = result.test,
            message = %result.message,
            "Gateway request completed"
        );
        Ok(result)
    }
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn request_headers() -> Vec<(String, String)> {
    vec![
        ("Content-Type".to_string(), FORM_CONTENT_TYPE.to_string()),
        ("Accept-Encoding".to_string(), ACCEPT_ENCODING.to_string()),
    ]
}
