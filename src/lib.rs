//! # paca-rs
//!
//! An async Rust client for the Alpaca REST APIs.
//!
//! The crate is built around one request pipeline, [`RestClient`], shared by
//! the Broker, Trading and Market Data API families. It validates
//! credentials, builds authenticated requests, retries throttled calls,
//! classifies structured error bodies and materializes paginated results.
//!
//! ## Features
//!
//! - **Authentication**: API key pair or OAuth token, from arguments or the environment
//! - **Retries**: Configurable attempts, wait and retryable statuses
//! - **Typed errors**: Generic, buying power and pattern day trader error bodies
//! - **Pagination**: First page only, everything, or a lazy page stream
//! - **Trading**: Account, configuration, activities, positions and orders
//! - **Async-first**: Built on Tokio and reqwest
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use paca_rs::{ClientConfig, TradingClient};
//!
//! #[tokio::main]
//! async fn main() -> paca_rs::Result<()> {
//!     // Reads API_KEY / SECRET_KEY or OAUTH_TOKEN, with .env fallback
//!     let client = TradingClient::from_env(true, ClientConfig::default())?;
//!
//!     let account = client.account().get().await?;
//!     println!("Buying power: {:?}", account.buying_power);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! ```rust,no_run
//! use paca_rs::{ErrorBody, TradingClient, ClientConfig, Error, Symbol};
//!
//! # async fn example(client: TradingClient) -> paca_rs::Result<()> {
//! match client.positions().get(&Symbol::new("AAPL")).await {
//!     Ok(position) => println!("Holding {}", position.qty),
//!     Err(Error::Api(e)) if e.status_code() == 404 => println!("No position"),
//!     Err(Error::Api(e)) => match e.body() {
//!         ErrorBody::BuyingPower(body) => println!("Short by {}", body.cost_basis - body.buying_power),
//!         _ => println!("API error {}: {:?}", e.status_code(), e.message()),
//!     },
//!     Err(e) => return Err(e),
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod api;
pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod trading;

// Re-export primary types at crate root for convenience
pub use auth::Credentials;
pub use client::{ClientConfig, Paginated, PaginationType, RestClient, RetryConfig};
pub use error::{ApiError, Error, ErrorBody, Result};
pub use models::{BaseUrl, OrderId, Symbol};
pub use trading::TradingClient;

/// Prelude module for convenient imports.
///
/// ```rust
/// use paca_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::auth::{CredentialSource, Credentials};
    pub use crate::client::{
        wrap, ClientConfig, Paginated, PaginationType, RestClient, RetryConfig,
    };
    pub use crate::error::{ApiError, Error, ErrorBody, Result};
    pub use crate::models::{
        // Primitives
        BaseUrl, OrderId, Symbol,
        // Enums
        AccountStatus, ActivityType, AssetClass, OrderClass, OrderSide, OrderStatus,
        OrderType, PositionSide, QueryOrderStatus, Sort, TimeInForce,
        // Records
        AccountConfiguration, Activity, GetActivitiesRequest, GetOrdersRequest, Order,
        PatchAccountConfiguration, Position, TradeAccount,
    };
    pub use crate::trading::TradingClient;
}
