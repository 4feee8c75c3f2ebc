//! Response parsing and interpretation.

use crate::constants::{fields, ACK, LIVE_MODE};
use crate::error::{AxcessError, Result};
use crate::instrument::Authorization;
use serde::{Serialize, Serializer};

/// Fields of a response body, in the order the processor sent them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseFields {
    fields: Vec<(String, String)>,
}

impl ResponseFields {
    /// Parse a form-encoded response body.
    ///
    /// Surrounding whitespace and empty segments are ignored, so an empty
    /// body yields no fields and a trailing `&` is accepted. Every other
    /// segment must be `name=value` with a non-empty name; values may be empty.
    ///
    /// # Errors
    /// Returns [`AxcessError::MalformedResponse`] for a segment without `=`,
    /// an empty name, a broken `%` escape, or bytes that are not UTF-8.
    pub fn parse(body: &str) -> Result<Self> {
        let fields = body
            .trim()
            .split('&')
            .filter(|segment| !segment.is_empty())
            .map(parse_segment)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { fields })
    }

    /// First value received for `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for ResponseFields {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// Normalized outcome of one gateway operation.
///
/// A decline is a successful call with `success == false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Response {
    pub success: bool,
    pub message: String,
    /// Token for follow-up capture, refund and void calls
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization: Option<Authorization>,
    pub test: bool,
    pub raw: ResponseFields,
}

impl Response {
    /// Interpret parsed response fields.
    pub fn from_fields(raw: ResponseFields) -> Self {
        let success = raw.get(fields::PROCESSING_RESULT) == Some(ACK);
        let message = message_from(&raw);
        let authorization = raw
            .get(fields::IDENTIFICATION_UNIQUEID)
            .filter(|id| !id.is_empty())
            .map(Authorization::new);
        let test = raw.get(fields::TRANSACTION_MODE) != Some(LIVE_MODE);

        Self {
            success,
            message,
            authorization,
            test,
            raw,
        }
    }

    /// Parse and interpret a response body.
    pub fn parse(body: &str) -> Result<Self> {
        Ok(Self::from_fields(ResponseFields::parse(body)?))
    }

    /// `PROCESSING.RETURN.CODE`, e.g. `000.100.110`
    pub fn return_code(&self) -> Option<&str> {
        self.raw.get(fields::PROCESSING_RETURN_CODE)
    }

    /// The processor's short transaction id, as shown in its back office
    pub fn short_id(&self) -> Option<&str> {
        self.raw.get(fields::IDENTIFICATION_SHORTID)
    }
}

fn parse_segment(segment: &str) -> Result<(String, String)> {
    let (name, value) = segment
        .split_once('=')
        .ok_or_else(|| AxcessError::malformed(format!("segment '{segment}' has no '='")))?;
    if name.is_empty() {
        return Err(AxcessError::malformed(format!(
            "segment '{segment}' has an empty name"
        )));
    }
    Ok((decode(name)?, decode(value)?))
}

/// Strict form decoding: `+` is a space and every `%` starts a two-digit hex escape.
fn decode(text: &str) -> Result<String> {
    let bytes = text.as_bytes();
    for (i, _) in text.match_indices('%') {
        let escape = bytes.get(i + 1..i + 3);
        if !escape.is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit)) {
            return Err(AxcessError::malformed(format!(
                "invalid escape in '{text}'"
            )));
        }
    }

    let spaced = text.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|decoded| decoded.into_owned())
        .map_err(|_| AxcessError::malformed(format!("'{text}' does not decode to UTF-8")))
}

fn message_from(raw: &ResponseFields) -> String {
    let ret = raw.get(fields::PROCESSING_RETURN).unwrap_or_default();
    match raw.get(fields::PROCESSING_REASON) {
        Some(reason) => format!("{reason} - {ret}"),
        None => ret.to_string(),
    }
}
