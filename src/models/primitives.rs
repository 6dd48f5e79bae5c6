//! Primitive types and newtypes for type-safe API interactions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A strongly-typed order ID.
///
/// # Example
///
/// ```
/// use paca_rs::OrderId;
///
/// let id = OrderId::new("61e69015-8549-4bfd-b9c3-01e75843f47d");
/// println!("Order: {}", id);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Create a new order ID.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the order ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for OrderId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for OrderId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A trading symbol (e.g., "AAPL", "BTC/USD").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Create a new symbol.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the symbol as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Known base URLs for the Alpaca REST APIs.
///
/// Anything that takes a base URL also accepts a plain string, so a proxy or
/// mock server can be targeted directly.
///
/// # Example
///
/// ```
/// use paca_rs::BaseUrl;
///
/// assert_eq!(BaseUrl::trading(true), BaseUrl::TradingPaper);
/// println!("API URL: {}", BaseUrl::TradingPaper);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseUrl {
    /// Broker API sandbox
    BrokerSandbox,
    /// Broker API production
    BrokerProduction,
    /// Trading API, paper account
    TradingPaper,
    /// Trading API, live account
    TradingLive,
    /// Market data API
    Data,
}

impl BaseUrl {
    /// The URL string.
    pub fn as_str(&self) -> &'static str {
        match self {
            BaseUrl::BrokerSandbox => "https://broker-api.sandbox.alpaca.markets",
            BaseUrl::BrokerProduction => "https://broker-api.alpaca.markets",
            BaseUrl::TradingPaper => "https://paper-api.alpaca.markets",
            BaseUrl::TradingLive => "https://api.alpaca.markets",
            BaseUrl::Data => "https://data.alpaca.markets",
        }
    }

    /// Trading API URL for paper (`sandbox`) or live trading.
    pub fn trading(sandbox: bool) -> Self {
        if sandbox {
            BaseUrl::TradingPaper
        } else {
            BaseUrl::TradingLive
        }
    }

    /// Broker API URL for sandbox or production.
    pub fn broker(sandbox: bool) -> Self {
        if sandbox {
            BaseUrl::BrokerSandbox
        } else {
            BaseUrl::BrokerProduction
        }
    }

    /// Returns `true` if this URL moves real money.
    pub fn is_live(&self) -> bool {
        matches!(self, BaseUrl::TradingLive | BaseUrl::BrokerProduction)
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<BaseUrl> for String {
    fn from(url: BaseUrl) -> Self {
        url.as_str().to_string()
    }
}
