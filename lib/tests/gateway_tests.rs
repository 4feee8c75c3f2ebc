//! Integration tests for gateway operations against a recording transport

use axcess_lib::constants::{LIVE_URL, TEST_URL};
use axcess_lib::{
    Address, Authorization, AxcessError, CardBrand, CreditCard, Gateway, GatewayConfig,
    HttpResponse, Instrument, Money, Options, ResponseFields, Result, Transport,
};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
struct SentRequest {
    url: String,
    headers: Vec<(String, String)>,
    fields: ResponseFields,
}

impl SentRequest {
    fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name)
    }

    fn count(&self, name: &str) -> usize {
        self.fields.iter().filter(|(k, _)| *k == name).count()
    }

    fn has_prefix(&self, prefix: &str) -> bool {
        self.fields.iter().any(|(k, _)| k.starts_with(prefix))
    }
}

/// Records every request and answers with a canned response.
#[derive(Clone)]
struct RecordingTransport {
    status: u32,
    body: String,
    requests: Arc<Mutex<Vec<SentRequest>>>,
}

impl RecordingTransport {
    fn new(body: &str) -> Self {
        Self::with_status(200, body)
    }

    fn with_status(status: u32, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn last(&self) -> SentRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }

    fn sent(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Transport for RecordingTransport {
    fn post(&self, url: &str, body: &[u8], headers: &[(String, String)]) -> Result<HttpResponse> {
        // Decode with the same parser the gateway applies to responses.
        let fields = ResponseFields::parse(std::str::from_utf8(body).unwrap())?;
        self.requests.lock().unwrap().push(SentRequest {
            url: url.to_string(),
            headers: headers.to_vec(),
            fields,
        });
        Ok(HttpResponse {
            status_code: self.status,
            body: self.body.clone().into_bytes(),
            ..Default::default()
        })
    }
}

const ACK_BODY: &str = "PROCESSING.RESULT=ACK&PROCESSING.REASON=&PROCESSING.RETURN=OK\
    &IDENTIFICATION.UNIQUEID=8a82944a4cc25ebf014cc4e9c0a63a6b\
    &TRANSACTION.MODE=INTEGRATOR_TEST";

const DECLINE_BODY: &str =
    "PROCESSING.RESULT=NOK&PROCESSING.REASON=Invalid+card&PROCESSING.RETURN=Declined";

fn config() -> GatewayConfig {
    GatewayConfig::builder()
        .credentials("sender-1", "login-1", "pwd-1", "channel-1")
        .build()
        .unwrap()
}

fn gateway(transport: &RecordingTransport) -> Gateway {
    Gateway::with_transport(config(), transport.clone()).unwrap()
}

fn card() -> CreditCard {
    CreditCard {
        first_name: "Longbob".into(),
        last_name: "Longsen".into(),
        number: "4200000000000000".into(),
        brand: CardBrand::Visa,
        month: 9,
        year: 2031,
        verification_value: Some("123".into()),
    }
}

fn full_address() -> Address {
    Address {
        address1: Some("  Leopoldstr. 1".into()),
        address2: Some("Hinterhaus".into()),
        zip: Some("80798".into()),
        city: Some("Munich".into()),
        state: Some("BY".into()),
        country: Some("DE".into()),
        company: Some("Widgets GmbH".into()),
        phone: Some("+49 89 123".into()),
        mobile: None,
    }
}

#[test]
fn test_purchase_amount_and_currency_survive_encoding() {
    let cases = [
        (Money::new(150), Options::new(), "1.50", "EUR"),
        (Money::with_currency(100_000, "USD"), Options::new(), "1000.00", "USD"),
        (Money::new(7), Options::new().currency("GBP"), "0.07", "GBP"),
        (Money::with_currency(1234, "JPY"), Options::new(), "1234", "JPY"),
    ];

    for (money, options, amount, currency) in cases {
        let transport = RecordingTransport::new(ACK_BODY);
        gateway(&transport)
            .purchase(money, &card().into(), &options)
            .unwrap();
        let sent = transport.last();
        assert_eq!(sent.get("PRESENTATION.AMOUNT"), Some(amount));
        assert_eq!(sent.get("PRESENTATION.CURRENCY"), Some(currency));
    }
}

#[test]
fn test_card_purchase_with_full_address() {
    let transport = RecordingTransport::new(ACK_BODY);
    let options = Options::new()
        .order_id("order-42")
        .email("longbob@example.com")
        .billing_address(full_address());

    let response = gateway(&transport)
        .purchase(Money::new(1000), &card().into(), &options)
        .unwrap();
    assert!(response.success);
    assert_eq!(response.message, " - OK");

    let sent = transport.last();
    assert_eq!(sent.count("ADDRESS.STREET"), 1);
    assert_eq!(sent.get("ADDRESS.STREET"), Some("Leopoldstr. 1 Hinterhaus"));
    assert_eq!(sent.get("ADDRESS.COUNTRY"), Some("DE"));
    assert_eq!(sent.get("NAME.COMPANY"), Some("Widgets GmbH"));
    assert_eq!(sent.get("CONTACT.PHONE"), Some("+49 89 123"));
    assert!(sent.get("CONTACT.MOBILE").is_none());
    assert_eq!(sent.get("PAYMENT.CODE"), Some("CC.DB"));
    assert_eq!(sent.get("ACCOUNT.HOLDER"), Some("Longbob Longsen"));
    assert_eq!(sent.get("ACCOUNT.EXPIRY_MONTH"), Some("09"));
    assert_eq!(sent.get("IDENTIFICATION.INVOICEID"), Some("order-42"));
}

#[test]
fn test_no_address_means_no_address_fields() {
    let transport = RecordingTransport::new(ACK_BODY);
    gateway(&transport)
        .authorize(Money::new(500), &card().into(), &Options::new().email(""))
        .unwrap();

    let sent = transport.last();
    assert!(!sent.has_prefix("ADDRESS."));
    assert!(sent.get("CONTACT.EMAIL").is_none());
    assert!(sent.get("PAYMENT.MEMO").is_none());
    assert!(sent.fields.iter().all(|(_, v)| !v.is_empty()));
}

#[test]
fn test_reference_operations_never_send_card_data() {
    let transport = RecordingTransport::new(ACK_BODY);
    let gateway = gateway(&transport);
    let auth = Authorization::new("8a82944a4cc25ebf014cc4e9c0a63a6b");
    let options = Options::new().billing_address(full_address());

    gateway.capture(Some(Money::new(100)), &auth, &options).unwrap();
    gateway.refund(None, &auth, &options).unwrap();
    gateway.void(&auth, &options).unwrap();
    gateway
        .purchase(Money::new(100), &Instrument::Reference(auth.clone()), &options)
        .unwrap();
    gateway
        .authorize(Money::new(100), &auth.clone().into(), &options)
        .unwrap();

    let requests = transport.requests.lock().unwrap();
    let codes: Vec<_> = requests.iter().map(|r| r.get("PAYMENT.CODE").unwrap()).collect();
    assert_eq!(codes, ["CC.CP", "CC.RF", "CC.RV", "CC.RB", "CC.PA"]);
    for request in requests.iter() {
        assert!(!request.has_prefix("ACCOUNT."));
        assert!(!request.has_prefix("NAME."));
        assert!(!request.has_prefix("ADDRESS."));
        assert_eq!(
            request.get("IDENTIFICATION.REFERENCEID"),
            Some(auth.as_str())
        );
    }
}

#[test]
fn test_void_sends_no_amount() {
    let transport = RecordingTransport::new(ACK_BODY);
    gateway(&transport)
        .void(&"uid-1".into(), &Options::new())
        .unwrap();
    let sent = transport.last();
    assert!(sent.get("PRESENTATION.AMOUNT").is_none());
    assert_eq!(sent.get("PRESENTATION.CURRENCY"), Some("EUR"));
}

#[test]
fn test_decline_is_not_an_error() {
    let transport = RecordingTransport::new(DECLINE_BODY);
    let response = gateway(&transport)
        .purchase(Money::new(100), &card().into(), &Options::new())
        .unwrap();
    assert!(!response.success);
    assert_eq!(response.message, "Invalid card - Declined");
    assert!(response.authorization.is_none());
    assert!(response.test);
}

#[test]
fn test_authorize_then_capture_with_returned_token() {
    let transport = RecordingTransport::new(ACK_BODY);
    let gateway = gateway(&transport);

    let auth = gateway
        .authorize(Money::new(100), &card().into(), &Options::new())
        .unwrap();
    let token = auth.authorization.expect("authorization token");
    gateway.capture(None, &token, &Options::new()).unwrap();

    let sent = transport.last();
    assert_eq!(sent.get("PAYMENT.CODE"), Some("CC.CP"));
    assert_eq!(
        sent.get("IDENTIFICATION.REFERENCEID"),
        Some("8a82944a4cc25ebf014cc4e9c0a63a6b")
    );
}

#[test]
fn test_headers_credentials_and_endpoints() {
    let transport = RecordingTransport::new(ACK_BODY);
    gateway(&transport)
        .void(&"uid".into(), &Options::new())
        .unwrap();
    let sent = transport.last();
    assert_eq!(sent.url, TEST_URL);
    assert!(sent.headers.iter().any(|(k, v)| k == "Content-Type"
        && v == "application/x-www-form-urlencoded; charset=UTF-8"));
    assert!(sent
        .headers
        .iter()
        .any(|(k, v)| k == "Accept-Encoding" && v == "identity;q=0"));
    assert_eq!(sent.get("SECURITY.SENDER"), Some("sender-1"));
    assert_eq!(sent.get("USER.LOGIN"), Some("login-1"));
    assert_eq!(sent.get("USER.PWD"), Some("pwd-1"));
    assert_eq!(sent.get("TRANSACTION.CHANNEL"), Some("channel-1"));
    assert_eq!(sent.get("TRANSACTION.MODE"), Some("INTEGRATOR_TEST"));
    assert_eq!(sent.get("TRANSACTION.RESPONSE"), Some("SYNC"));

    let transport = RecordingTransport::new(ACK_BODY);
    let mut live = config();
    live.test = false;
    Gateway::with_transport(live, transport.clone())
        .unwrap()
        .void(&"uid".into(), &Options::new())
        .unwrap();
    let sent = transport.last();
    assert_eq!(sent.url, LIVE_URL);
    assert_eq!(sent.get("TRANSACTION.MODE"), Some("LIVE"));
}

#[test]
fn test_missing_credentials_fail_before_network() {
    let transport = RecordingTransport::new(ACK_BODY);
    let mut config = config();
    config.credentials.password = Some("   ".into());

    let result = Gateway::with_transport(config, transport.clone());
    assert!(matches!(result, Err(AxcessError::MissingCredential("password"))));
    assert_eq!(transport.sent(), 0);
}

#[test]
fn test_http_failure_is_an_error() {
    let transport = RecordingTransport::with_status(503, "");
    let err = gateway(&transport)
        .refund(Some(Money::new(100)), &"uid".into(), &Options::new())
        .unwrap_err();
    assert!(matches!(
        err,
        AxcessError::Http {
            status: 503,
            code: "CC.RF"
        }
    ));
    assert!(!err.is_configuration());
}

#[test]
fn test_optional_identifiers_are_mapped() {
    let transport = RecordingTransport::new(ACK_BODY);
    let options = Options::new()
        .transaction_id("tx-9")
        .customer_id("cust-9")
        .bulk_id("bulk-9")
        .soft_descriptor("SHOP*9")
        .ip("10.0.0.1")
        .description("Order #9");
    gateway(&transport)
        .purchase(Money::new(100), &card().into(), &options)
        .unwrap();

    let sent = transport.last();
    assert_eq!(sent.get("IDENTIFICATION.TRANSACTIONID"), Some("tx-9"));
    assert_eq!(sent.get("IDENTIFICATION.SHOPPERID"), Some("cust-9"));
    assert_eq!(sent.get("IDENTIFICATION.BULKID"), Some("bulk-9"));
    assert_eq!(sent.get("PRESENTATION.USAGE"), Some("SHOP*9"));
    assert_eq!(sent.get("CONTACT.IP"), Some("10.0.0.1"));
    assert_eq!(sent.get("PAYMENT.MEMO"), Some("Order #9"));
}
