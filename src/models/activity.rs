//! Account activity models.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::{ActivityType, OrderSide, OrderStatus, Sort};
use super::primitives::{OrderId, Symbol};

/// One entry of the account activity feed.
///
/// Trade activities carry the fill fields, non-trade activities carry the
/// cash fields. Fields the crate does not model are kept in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    /// Activity ID, also the page token for the page after it
    pub id: String,
    /// Activity type
    pub activity_type: ActivityType,
    /// Trade execution time
    #[serde(default)]
    pub transaction_time: Option<DateTime<Utc>>,
    /// Date of a non-trade activity
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Asset symbol
    #[serde(default)]
    pub symbol: Option<Symbol>,
    /// Fill side
    #[serde(default)]
    pub side: Option<OrderSide>,
    /// Shares in this fill, or affected by a non-trade activity
    #[serde(default)]
    pub qty: Option<Decimal>,
    /// Fill price
    #[serde(default)]
    pub price: Option<Decimal>,
    /// Order size remaining after this fill
    #[serde(default)]
    pub leaves_qty: Option<Decimal>,
    /// Cumulative filled quantity of the order
    #[serde(default)]
    pub cum_qty: Option<Decimal>,
    /// Order this fill belongs to
    #[serde(default)]
    pub order_id: Option<OrderId>,
    /// Order status after this fill
    #[serde(default)]
    pub order_status: Option<OrderStatus>,
    /// Net cash amount of a non-trade activity
    #[serde(default)]
    pub net_amount: Option<Decimal>,
    /// Per-share amount, e.g. a dividend rate
    #[serde(default)]
    pub per_share_amount: Option<Decimal>,
    /// Free-form description
    #[serde(default)]
    pub description: Option<String>,
    /// Activity status
    #[serde(default)]
    pub status: Option<String>,
    /// Any other fields
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Activity {
    /// Returns `true` for an order fill.
    pub fn is_fill(&self) -> bool {
        self.activity_type == ActivityType::Fill
    }
}

/// Filters for the account activity feed.
///
/// `page_token` is managed by the paginator and is not set here.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetActivitiesRequest {
    /// Only these activity types, sent comma-separated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_types: Option<Vec<ActivityType>>,
    /// Only activities on this date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    /// Only activities up to this time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub until: Option<DateTime<Utc>>,
    /// Only activities after this time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<DateTime<Utc>>,
    /// Sort order, newest first by default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<Sort>,
    /// Activities per page (server max 100)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}
