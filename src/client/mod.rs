//! Request pipeline shared by every Alpaca API client.
//!
//! [`RestClient`] builds requests from a method, path and optional data,
//! sends them with retries on throttling statuses, classifies error bodies
//! and hands back raw JSON. [`wrap`] decodes that JSON into typed models and
//! [`paginated`] turns paged endpoints into lists or streams.
//!
//! # Example
//!
//! ```no_run
//! use paca_rs::{BaseUrl, ClientConfig, Credentials, RestClient, RetryConfig};
//! use std::time::Duration;
//!
//! # async fn example() -> paca_rs::Result<()> {
//! let config = ClientConfig::default()
//!     .with_retry(RetryConfig::default().with_retry_wait(Duration::from_secs(1)));
//! let client = RestClient::new(BaseUrl::BrokerSandbox, Credentials::from_env()?, config)?;
//!
//! let accounts: serde_json::Value = client.get("/accounts").await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod http;
pub mod paginated;
pub mod request;

pub use config::{ClientConfig, RetryConfig, DEFAULT_API_VERSION};
pub use http::{wrap, RestClient};
pub use paginated::{
    materialize, paginate, validate_pagination, Page, PageStream, Paginated, PaginationType,
    DEFAULT_PAGE_SIZE,
};
pub use request::{Payload, PreparedRequest};
