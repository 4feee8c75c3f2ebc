//! HTTP transport implementation using curl.

use crate::config::GatewayConfig;
use crate::error::Result;
use curl::easy::{Easy2, Handler, WriteError};
use std::collections::HashMap;

struct ResponseHandler {
    data: Vec<u8>,
    headers: HashMap<String, String>,
}

impl ResponseHandler {
    fn new() -> Self {
        Self {
            data: Vec::new(),
            headers: HashMap::new(),
        }
    }
}

impl Handler for ResponseHandler {
    fn write(&mut self, data: &[u8]) -> std::result::Result<usize, WriteError> {
        self.data.extend_from_slice(data);
        Ok(data.len())
    }

    fn header(&mut self, header: &[u8]) -> bool {
        if let Ok(header_str) = std::str::from_utf8(header) {
            if let Some((key, value)) = header_str.split_once(':') {
                self.headers
                    .insert(key.trim().to_lowercase(), value.trim().to_string());
            }
        }
        true
    }
}

#[derive(Debug, Clone, Default)]
pub struct HttpResponse {
    pub status_code: u32,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Convert the response body to a UTF-8 string.
    ///
    /// # Errors
    /// Returns an error if the body is not valid UTF-8.
    pub fn body_string(&self) -> Result<String> {
        Ok(String::from_utf8(self.body.clone())?)
    }

    /// True for 2xx status codes.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Get a header value by name (case-insensitive).
    pub fn get_header(&self, name: &str) -> Option<&String> {
        self.headers.get(&name.to_lowercase())
    }
}

/// Builder for configuring HTTP clients.
#[must_use]
#[derive(Debug, Clone, Default)]
pub struct HttpClientBuilder {
    verbose: bool,
    timeout: Option<u64>,
    user_agent: Option<String>,
    headers: Vec<(String, String)>,
}

impl HttpClientBuilder {
    /// Create a new HTTP client builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable libcurl's verbose output for debugging.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Set request timeout in seconds.
    pub fn timeout(mut self, seconds: u64) -> Self {
        self.timeout = Some(seconds);
        self
    }

    /// Set custom User-Agent header.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Add a custom HTTP header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Add multiple headers at once.
    pub fn headers(mut self, headers: &[(String, String)]) -> Self {
        self.headers.extend_from_slice(headers);
        self
    }

    /// Build the configured HTTP client.
    pub fn build(self) -> Result<HttpClient> {
        let mut client = HttpClient::new();

        if self.verbose {
            client.curl.verbose(true)?;
        }

        if let Some(timeout) = self.timeout {
            client
                .curl
                .timeout(std::time::Duration::from_secs(timeout))?;
        }

        if let Some(ref ua) = self.user_agent {
            client.curl.useragent(ua)?;
        }

        if !self.headers.is_empty() {
            let mut list = curl::easy::List::new();
            for (name, value) in &self.headers {
                list.append(&format!("{name}: {value}"))?;
            }
            client.curl.http_headers(list)?;
        }

        Ok(client)
    }
}

/// A single-use libcurl handle.
pub struct HttpClient {
    curl: Easy2<ResponseHandler>,
}

impl HttpClient {
    fn new() -> Self {
        Self {
            curl: Easy2::new(ResponseHandler::new()),
        }
    }

    /// Perform a POST request with the given body
    pub fn post(&mut self, url: &str, body: &[u8]) -> Result<HttpResponse> {
        self.curl.url(url)?;
        self.curl.post(true)?;
        self.curl.post_field_size(body.len() as u64)?;
        self.curl.post_fields_copy(body)?;
        self.perform()
    }

    fn perform(&mut self) -> Result<HttpResponse> {
        self.curl.perform()?;

        let status_code = self.curl.response_code()?;
        let handler = self.curl.get_mut();

        Ok(HttpResponse {
            status_code,
            headers: std::mem::take(&mut handler.headers),
            body: std::mem::take(&mut handler.data),
        })
    }
}

/// Sends an encoded form to the processor.
///
/// The gateway talks to the network only through this trait, which keeps
/// request building and response handling testable without a live endpoint.
pub trait Transport: Send + Sync {
    fn post(&self, url: &str, body: &[u8], headers: &[(String, String)])
        -> Result<HttpResponse>;
}

/// Default transport: one fresh curl handle per request.
#[derive(Debug, Clone, Default)]
pub struct CurlTransport {
    timeout: Option<u64>,
    user_agent: Option<String>,
    verbose: bool,
}

impl CurlTransport {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn timeout(mut self, seconds: Option<u64>) -> Self {
        self.timeout = seconds;
        self
    }

    #[must_use]
    pub fn user_agent(mut self, ua: Option<String>) -> Self {
        self.user_agent = ua;
        self
    }

    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    fn client(&self, headers: &[(String, String)]) -> Result<HttpClient> {
        let mut builder = HttpClientBuilder::new()
            .verbose(self.verbose)
            .headers(headers);

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(ref ua) = self.user_agent {
            builder = builder.user_agent(ua);
        }

        builder.build()
    }
}

impl From<&GatewayConfig> for CurlTransport {
    fn from(config: &GatewayConfig) -> Self {
        Self::new()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
    }
}

impl Transport for CurlTransport {
    fn post(
        &self,
        url: &str,
        body: &[u8],
        headers: &[(String, String)],
    ) -> Result<HttpResponse> {
        self.client(headers)?.post(url, body)
    }
}
