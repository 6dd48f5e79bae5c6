//! Open position models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::{AssetClass, PositionSide};
use super::primitives::Symbol;

/// An open position in one asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    /// Asset ID
    pub asset_id: String,
    /// Asset symbol
    pub symbol: Symbol,
    /// Exchange the asset trades on
    #[serde(default)]
    pub exchange: Option<String>,
    /// Asset class
    pub asset_class: AssetClass,
    /// Average entry price
    pub avg_entry_price: Decimal,
    /// Position size
    pub qty: Decimal,
    /// Shares not tied up in open orders
    #[serde(default)]
    pub qty_available: Option<Decimal>,
    /// Long or short
    pub side: PositionSide,
    /// Total market value
    #[serde(default)]
    pub market_value: Option<Decimal>,
    /// Total cost basis
    pub cost_basis: Decimal,
    /// Unrealized profit/loss
    #[serde(default)]
    pub unrealized_pl: Option<Decimal>,
    /// Unrealized profit/loss percent
    #[serde(default)]
    pub unrealized_plpc: Option<Decimal>,
    /// Unrealized profit/loss for the day
    #[serde(default)]
    pub unrealized_intraday_pl: Option<Decimal>,
    /// Unrealized profit/loss percent for the day
    #[serde(default)]
    pub unrealized_intraday_plpc: Option<Decimal>,
    /// Current asset price
    #[serde(default)]
    pub current_price: Option<Decimal>,
    /// Last day's closing price
    #[serde(default)]
    pub lastday_price: Option<Decimal>,
    /// Percent change since last close
    #[serde(default)]
    pub change_today: Option<Decimal>,
    /// Asset is marginable
    #[serde(default)]
    pub asset_marginable: Option<bool>,
}

impl Position {
    /// Returns `true` for a long position.
    pub fn is_long(&self) -> bool {
        self.side == PositionSide::Long
    }
}
