//! axcess-lib - Adapter for the Axcess MS (CTPE) payment gateway
//!
//! This library maps purchase, authorize, capture, refund and void operations
//! onto the processor's form-encoded HTTPS protocol and normalizes its
//! responses. It also provides configuration management for the CLI.

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod config;
pub mod constants;
pub mod currency;
pub mod error;
pub mod gateway;
pub mod http;
pub mod instrument;
pub mod options;
pub mod request;
pub mod response;

pub use config::{ConfigBuilder, Credentials, GatewayConfig};
pub use error::{AxcessError, Result};

pub use gateway::Gateway;

pub use currency::{currencies, Currency, Money};
pub use http::{CurlTransport, HttpClient, HttpClientBuilder, HttpResponse, Transport};
pub use instrument::{Authorization, CardBrand, CreditCard, Instrument};
pub use options::{Address, Options};
pub use request::{PaymentCode, RequestBuilder, RequestForm};
pub use response::{Response, ResponseFields};
