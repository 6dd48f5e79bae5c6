//! Error types for the Alpaca REST client.
//!
//! Every fallible operation in this crate returns [`Result`]. Non-2xx API
//! responses surface as [`Error::Api`], whose [`ApiError`] keeps the HTTP
//! status, the classified error body and the raw response text so callers can
//! branch on the Alpaca error code.

use std::collections::BTreeSet;
use std::fmt;

use rust_decimal::Decimal;
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::client::RetryConfig;

/// A specialized `Result` type for Alpaca operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for all Alpaca API operations.
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP transport failed (connection, TLS, timeout)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Request payload could not be encoded as JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// API returned a non-2xx response that was not retried
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A response payload did not match the requested record type
    #[error("Failed to decode response into {target}: {source}")]
    Validation {
        /// Name of the type the payload was decoded into
        target: &'static str,
        /// Underlying decode error
        #[source]
        source: serde_json::Error,
    },

    /// Invalid client configuration or argument combination
    #[error("Configuration error: {0}")]
    Config(String),

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Invalid input provided to a function
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Returns `true` if this error is potentially transient and the
    /// operation could be retried by the caller.
    ///
    /// API errors count as retryable for the default retry statuses (429 and
    /// 504). Use [`is_retryable_with`](Self::is_retryable_with) to check
    /// against a client's own [`RetryConfig`].
    ///
    /// # Example
    ///
    /// ```
    /// use paca_rs::Error;
    ///
    /// fn handle_error(err: Error) {
    ///     if err.is_retryable() {
    ///         println!("Retrying operation...");
    ///     }
    /// }
    /// ```
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(e) => e.is_timeout() || e.is_connect(),
            Error::Api(e) => matches!(e.status_code(), 429 | 504),
            _ => false,
        }
    }

    /// Like [`is_retryable`](Self::is_retryable), with API statuses checked
    /// against `retry.retry_statuses`.
    pub fn is_retryable_with(&self, retry: &RetryConfig) -> bool {
        match self {
            Error::Api(e) => retry.should_retry_status(e.status_code()),
            other => other.is_retryable(),
        }
    }

    /// Returns `true` if this error indicates a client-side issue
    /// (bad request, invalid configuration, etc.).
    pub fn is_client_error(&self) -> bool {
        match self {
            Error::Api(e) => (400..500).contains(&e.status_code()),
            Error::InvalidInput(_) | Error::Config(_) => true,
            _ => false,
        }
    }

    /// Returns `true` if this error indicates a server-side issue.
    pub fn is_server_error(&self) -> bool {
        match self {
            Error::Api(e) => e.status_code() >= 500,
            _ => false,
        }
    }

    /// The Alpaca error code, when this is an API error that carries one.
    pub fn api_code(&self) -> Option<i64> {
        match self {
            Error::Api(e) => e.code().ok(),
            _ => None,
        }
    }

    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }
}

/// A non-2xx response from the API, classified by the shape of its body.
#[derive(Error, Debug, Clone)]
#[error("API error: status={status}, body={raw}")]
pub struct ApiError {
    status: u16,
    body: ErrorBody,
    raw: String,
}

impl ApiError {
    /// Classify a failed response from its status and body text.
    ///
    /// The body is matched against the known error shapes in a fixed order
    /// (generic, buying power, pattern day trading). A shape is selected only
    /// when its field names are exactly the payload's keys; payloads with
    /// extra or missing fields stay [`ErrorBody::Raw`].
    pub fn classify(status: u16, raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let body = classify_body(&raw);
        Self { status, body, raw }
    }

    /// HTTP status code of the response.
    pub fn status_code(&self) -> u16 {
        self.status
    }

    /// The classified error body.
    pub fn body(&self) -> &ErrorBody {
        &self.body
    }

    /// The response body exactly as received.
    pub fn raw_body(&self) -> &str {
        &self.raw
    }

    /// The numeric Alpaca error code.
    ///
    /// Taken from the structured body when one matched, otherwise parsed
    /// from the raw response's `code` key. Fails when the body is not JSON
    /// or has no usable `code`.
    pub fn code(&self) -> std::result::Result<i64, serde_json::Error> {
        if let Some(code) = self.body.code() {
            return Ok(code);
        }

        #[derive(Deserialize)]
        struct CodeOnly {
            #[serde(deserialize_with = "lax_i64")]
            code: i64,
        }

        Ok(serde_json::from_str::<CodeOnly>(&self.raw)?.code)
    }

    /// The human-readable message, if the body carries one.
    pub fn message(&self) -> Option<&str> {
        match &self.body {
            ErrorBody::Generic(b) => Some(&b.message),
            ErrorBody::BuyingPower(b) => Some(&b.message),
            ErrorBody::PatternDayTrading(b) => Some(&b.message),
            ErrorBody::Raw(v) => v.get("message").and_then(Value::as_str),
            ErrorBody::Text(_) => None,
        }
    }
}

/// Body of an API error response.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorBody {
    /// `{code, message}`
    Generic(GenericErrorBody),
    /// Insufficient buying power for the order
    BuyingPower(BuyingPowerErrorBody),
    /// Order would trip the pattern day trading rule
    PatternDayTrading(PdtErrorBody),
    /// JSON that matched none of the known shapes
    Raw(Value),
    /// Body that was not JSON at all
    Text(String),
}

impl ErrorBody {
    /// Returns `true` if the body matched one of the known shapes.
    pub fn is_structured(&self) -> bool {
        !matches!(self, ErrorBody::Raw(_) | ErrorBody::Text(_))
    }

    fn code(&self) -> Option<i64> {
        match self {
            ErrorBody::Generic(b) => Some(b.code),
            ErrorBody::BuyingPower(b) => Some(b.code),
            ErrorBody::PatternDayTrading(b) => Some(b.code),
            ErrorBody::Raw(_) | ErrorBody::Text(_) => None,
        }
    }
}

impl fmt::Display for ErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorBody::Generic(b) => write!(f, "{} ({})", b.message, b.code),
            ErrorBody::BuyingPower(b) => write!(
                f,
                "{} ({}): buying_power={}, cost_basis={}",
                b.message, b.code, b.buying_power, b.cost_basis
            ),
            ErrorBody::PatternDayTrading(b) => write!(
                f,
                "{} ({}): symbol={}, day_trading_buying_power={}",
                b.message, b.code, b.symbol, b.day_trading_buying_power
            ),
            ErrorBody::Raw(v) => write!(f, "{v}"),
            ErrorBody::Text(t) => f.write_str(t),
        }
    }
}

/// The generic error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericErrorBody {
    /// Alpaca error code
    #[serde(deserialize_with = "lax_i64")]
    pub code: i64,
    /// Error message
    pub message: String,
}

/// Error body returned when an order exceeds available buying power.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuyingPowerErrorBody {
    /// Alpaca error code
    #[serde(deserialize_with = "lax_i64")]
    pub code: i64,
    /// Error message
    pub message: String,
    /// Buying power available to the account
    pub buying_power: Decimal,
    /// Cost basis of the rejected order
    pub cost_basis: Decimal,
}

/// Error body returned for pattern day trading violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdtErrorBody {
    /// Alpaca error code
    #[serde(deserialize_with = "lax_i64")]
    pub code: i64,
    /// Error message
    pub message: String,
    /// Day trading buying power at the start of the day
    pub day_trading_buying_power: Decimal,
    /// Maximum day trading buying power usage allowed
    pub max_dtbp_used: Decimal,
    /// Day trading buying power used so far today
    pub max_dtbp_used_so_far: Decimal,
    /// Number of open orders on the account
    #[serde(deserialize_with = "lax_i64")]
    pub open_orders: i64,
    /// Symbol of the rejected order
    pub symbol: String,
}

/// Integer that may arrive as a JSON number or a numeric string, matching
/// how the `Decimal` fields decode.
fn lax_i64<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum LaxInt {
        Int(i64),
        Text(String),
    }

    match LaxInt::deserialize(deserializer)? {
        LaxInt::Int(n) => Ok(n),
        LaxInt::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("not an integer: {text:?}"))),
    }
}

trait KnownErrorBody: DeserializeOwned + Into<ErrorBody> {
    const FIELDS: &'static [&'static str];
}

impl KnownErrorBody for GenericErrorBody {
    const FIELDS: &'static [&'static str] = &["code", "message"];
}

impl KnownErrorBody for BuyingPowerErrorBody {
    const FIELDS: &'static [&'static str] = &["code", "message", "buying_power", "cost_basis"];
}

impl KnownErrorBody for PdtErrorBody {
    const FIELDS: &'static [&'static str] = &[
        "code",
        "message",
        "day_trading_buying_power",
        "max_dtbp_used",
        "max_dtbp_used_so_far",
        "open_orders",
        "symbol",
    ];
}

impl From<GenericErrorBody> for ErrorBody {
    fn from(b: GenericErrorBody) -> Self {
        ErrorBody::Generic(b)
    }
}

impl From<BuyingPowerErrorBody> for ErrorBody {
    fn from(b: BuyingPowerErrorBody) -> Self {
        ErrorBody::BuyingPower(b)
    }
}

impl From<PdtErrorBody> for ErrorBody {
    fn from(b: PdtErrorBody) -> Self {
        ErrorBody::PatternDayTrading(b)
    }
}

fn classify_body(raw: &str) -> ErrorBody {
    let value: Value = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(_) => return ErrorBody::Text(raw.to_string()),
    };

    let keys: BTreeSet<&str> = match value.as_object() {
        Some(map) => map.keys().map(String::as_str).collect(),
        None => return ErrorBody::Raw(value),
    };

    try_known::<GenericErrorBody>(&keys, &value)
        .or_else(|| try_known::<BuyingPowerErrorBody>(&keys, &value))
        .or_else(|| try_known::<PdtErrorBody>(&keys, &value))
        .unwrap_or(ErrorBody::Raw(value))
}

/// `None` when the field sets differ. A matched shape that fails to decode
/// falls back to the raw value rather than trying later shapes.
fn try_known<T: KnownErrorBody>(keys: &BTreeSet<&str>, value: &Value) -> Option<ErrorBody> {
    let fields: BTreeSet<&str> = T::FIELDS.iter().copied().collect();
    if &fields != keys {
        return None;
    }
    Some(
        serde_json::from_value::<T>(value.clone())
            .map(Into::into)
            .unwrap_or_else(|_| ErrorBody::Raw(value.clone())),
    )
}
