//! Trading API client.

use crate::api::{AccountService, OrdersService, PositionsService};
use crate::auth::Credentials;
use crate::client::{ClientConfig, RestClient};
use crate::models::BaseUrl;
use crate::Result;

/// Client for the Alpaca trading API.
///
/// Targets the paper trading URL when `sandbox` is set and the live URL
/// otherwise. Cloning is cheap and clones share one connection pool.
///
/// # Example
///
/// ```no_run
/// use paca_rs::{ClientConfig, Credentials, TradingClient};
///
/// # async fn example() -> paca_rs::Result<()> {
/// let credentials = Credentials::key_pair("AKXXXX", "secret")?;
/// let client = TradingClient::new(credentials, true, ClientConfig::default())?;
///
/// let account = client.account().get().await?;
/// println!("Status: {:?}", account.status);
///
/// let positions = client.positions().list().await?;
/// println!("{} open positions", positions.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TradingClient {
    rest: RestClient,
}

impl TradingClient {
    /// Create a trading client for paper (`sandbox`) or live trading.
    pub fn new(credentials: Credentials, sandbox: bool, config: ClientConfig) -> Result<Self> {
        Self::with_base_url(BaseUrl::trading(sandbox), credentials, config)
    }

    /// Create a trading client with credentials read from the environment.
    pub fn from_env(sandbox: bool, config: ClientConfig) -> Result<Self> {
        Self::new(Credentials::from_env()?, sandbox, config)
    }

    /// Create a trading client against an explicit base URL, such as a proxy.
    pub fn with_base_url(
        base_url: impl Into<String>,
        credentials: Credentials,
        config: ClientConfig,
    ) -> Result<Self> {
        let base_url = base_url.into();
        tracing::debug!(%base_url, "Creating trading client");
        Ok(Self {
            rest: RestClient::new(base_url, credentials, config)?,
        })
    }

    /// The underlying REST client, for endpoints without a typed service.
    pub fn rest(&self) -> &RestClient {
        &self.rest
    }

    /// Get the account service.
    pub fn account(&self) -> AccountService {
        AccountService::new(self.rest.clone())
    }

    /// Get the positions service.
    pub fn positions(&self) -> PositionsService {
        PositionsService::new(self.rest.clone())
    }

    /// Get the orders service.
    pub fn orders(&self) -> OrdersService {
        OrdersService::new(self.rest.clone())
    }
}
