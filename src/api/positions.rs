//! Positions service for open positions.

use crate::client::RestClient;
use crate::models::{Position, Symbol};
use crate::Result;

/// Service for position operations.
///
/// # Example
///
/// ```no_run
/// # async fn example(client: paca_rs::TradingClient) -> paca_rs::Result<()> {
/// for position in client.positions().list().await? {
///     println!("{}: {} @ {}", position.symbol, position.qty, position.avg_entry_price);
/// }
/// # Ok(())
/// # }
/// ```
pub struct PositionsService {
    client: RestClient,
}

impl PositionsService {
    pub(crate) fn new(client: RestClient) -> Self {
        Self { client }
    }

    /// List all open positions.
    pub async fn list(&self) -> Result<Vec<Position>> {
        self.client.get("/positions").await
    }

    /// Get the open position for one symbol or asset ID.
    ///
    /// Crypto pairs such as `BTC/USD` are sent without the slash.
    pub async fn get(&self, symbol: &Symbol) -> Result<Position> {
        self.client
            .get(&format!("/positions/{}", position_key(symbol)))
            .await
    }
}

fn position_key(symbol: &Symbol) -> String {
    symbol.as_str().replace('/', "")
}
