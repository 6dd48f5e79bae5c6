//! Order models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::{
    AssetClass, OrderClass, OrderSide, OrderStatus, OrderType, QueryOrderStatus, Sort,
    TimeInForce,
};
use super::primitives::{OrderId, Symbol};

/// An order as reported by the trading API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Order ID
    pub id: OrderId,
    /// Client-assigned order ID
    pub client_order_id: String,
    /// When the order was created
    pub created_at: DateTime<Utc>,
    /// Last update time
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// When the order was submitted
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
    /// When the order was filled
    #[serde(default)]
    pub filled_at: Option<DateTime<Utc>>,
    /// When the order expired
    #[serde(default)]
    pub expired_at: Option<DateTime<Utc>>,
    /// When the order was canceled
    #[serde(default)]
    pub canceled_at: Option<DateTime<Utc>>,
    /// When the order failed
    #[serde(default)]
    pub failed_at: Option<DateTime<Utc>>,
    /// When the order was replaced
    #[serde(default)]
    pub replaced_at: Option<DateTime<Utc>>,
    /// ID of the order that replaced this one
    #[serde(default)]
    pub replaced_by: Option<OrderId>,
    /// ID of the order this one replaced
    #[serde(default)]
    pub replaces: Option<OrderId>,
    /// Asset ID, absent for multi-leg parents
    #[serde(default)]
    pub asset_id: Option<String>,
    /// Asset symbol, absent for multi-leg parents
    #[serde(default)]
    pub symbol: Option<Symbol>,
    /// Asset class
    #[serde(default)]
    pub asset_class: Option<AssetClass>,
    /// Dollar amount for notional orders
    #[serde(default)]
    pub notional: Option<Decimal>,
    /// Ordered quantity
    #[serde(default)]
    pub qty: Option<Decimal>,
    /// Filled quantity
    #[serde(default)]
    pub filled_qty: Option<Decimal>,
    /// Average fill price
    #[serde(default)]
    pub filled_avg_price: Option<Decimal>,
    /// Order class
    #[serde(default)]
    pub order_class: Option<OrderClass>,
    /// Order type
    #[serde(rename = "type", alias = "order_type", default)]
    pub order_type: Option<OrderType>,
    /// Side, absent for multi-leg parents
    #[serde(default)]
    pub side: Option<OrderSide>,
    /// Time in force
    pub time_in_force: TimeInForce,
    /// Limit price
    #[serde(default)]
    pub limit_price: Option<Decimal>,
    /// Stop price
    #[serde(default)]
    pub stop_price: Option<Decimal>,
    /// Current status
    pub status: OrderStatus,
    /// Eligible for extended hours
    #[serde(default)]
    pub extended_hours: bool,
    /// Child orders of bracket, OCO, OTO and multi-leg orders
    #[serde(default)]
    pub legs: Option<Vec<Order>>,
    /// Trailing percent for trailing stops
    #[serde(default)]
    pub trail_percent: Option<Decimal>,
    /// Trailing dollar offset for trailing stops
    #[serde(default)]
    pub trail_price: Option<Decimal>,
    /// High water mark for trailing stops
    #[serde(default)]
    pub hwm: Option<Decimal>,
}

impl Order {
    /// Returns `true` if the order can still fill.
    pub fn is_open(&self) -> bool {
        self.status.is_open()
    }

    /// Quantity still unfilled, when the order has a quantity.
    pub fn remaining_qty(&self) -> Option<Decimal> {
        let qty = self.qty?;
        Some(qty - self.filled_qty.unwrap_or_default())
    }
}

/// Filters for listing orders.
///
/// # Example
///
/// ```
/// use paca_rs::models::{GetOrdersRequest, QueryOrderStatus};
///
/// let request = GetOrdersRequest {
///     status: Some(QueryOrderStatus::Closed),
///     symbols: Some(vec!["AAPL".into(), "MSFT".into()]),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetOrdersRequest {
    /// Open, closed or all orders
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<QueryOrderStatus>,
    /// Max orders returned (server default 50, max 500)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Only orders submitted after this time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<DateTime<Utc>>,
    /// Only orders submitted until this time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub until: Option<DateTime<Utc>>,
    /// Sort by submission time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<Sort>,
    /// Roll up multi-leg orders under `legs`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nested: Option<bool>,
    /// Only orders on this side
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<OrderSide>,
    /// Only orders for these symbols, sent comma-separated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbols: Option<Vec<String>>,
}
