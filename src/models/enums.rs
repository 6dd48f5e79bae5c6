//! Enumeration types for the Alpaca trading API.

use serde::{Deserialize, Serialize};

/// Status of a trading or crypto account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    /// Application is being filled out
    Onboarding,
    /// Application submission failed
    SubmissionFailed,
    /// Application submitted, awaiting review
    Submitted,
    /// Account information was updated
    AccountUpdated,
    /// Final account approval pending
    ApprovalPending,
    /// Account is open for trading
    Active,
    /// Application was rejected
    Rejected,
    /// Account is inactive
    Inactive,
    /// Account is closed
    AccountClosed,
    /// Account is disabled
    Disabled,
    /// Status not known to this crate
    #[serde(other)]
    Unknown,
}

impl AccountStatus {
    /// Returns `true` if the account can trade.
    pub fn is_active(&self) -> bool {
        matches!(self, AccountStatus::Active)
    }
}

/// Day trading buying power check mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DtbpCheck {
    /// Check on entry and exit
    Both,
    /// Check on entry only
    Entry,
    /// Check on exit only
    Exit,
}

/// Pattern day trader check mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PdtCheck {
    /// Check on entry and exit
    Both,
    /// Check on entry only
    Entry,
    /// Check on exit only
    Exit,
}

/// Whether trade confirmation emails are sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeConfirmEmail {
    /// Send for every trade
    All,
    /// Never send
    None,
}

/// Side of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    /// Buy
    Buy,
    /// Sell
    Sell,
}

/// How an order is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    /// Execute at the current market price
    Market,
    /// Execute at the limit price or better
    Limit,
    /// Becomes a market order at the stop price
    Stop,
    /// Becomes a limit order at the stop price
    StopLimit,
    /// Stop price trails the market
    TrailingStop,
}

/// Order class for single and multi-leg orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderClass {
    /// Single order
    #[default]
    Simple,
    /// Entry with take-profit and stop-loss legs
    Bracket,
    /// One-cancels-other
    Oco,
    /// One-triggers-other
    Oto,
    /// Multi-leg options order
    Mleg,
}

/// How long an order stays working.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeInForce {
    /// Good for the day
    Day,
    /// Good until canceled
    Gtc,
    /// Market on open
    Opg,
    /// Market on close
    Cls,
    /// Immediate or cancel
    Ioc,
    /// Fill or kill
    Fok,
}

/// Lifecycle status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Received and routed
    New,
    /// Partially filled
    PartiallyFilled,
    /// Completely filled
    Filled,
    /// Done for the day
    DoneForDay,
    /// Canceled
    Canceled,
    /// Expired
    Expired,
    /// Replaced by another order
    Replaced,
    /// Cancel requested
    PendingCancel,
    /// Replace requested
    PendingReplace,
    /// Under review
    PendingReview,
    /// Accepted but not yet routed
    Accepted,
    /// Routed but not yet acknowledged
    PendingNew,
    /// Accepted for bidding
    AcceptedForBidding,
    /// Stopped, a trade is guaranteed
    Stopped,
    /// Rejected
    Rejected,
    /// Suspended
    Suspended,
    /// Calculated after completion
    Calculated,
    /// Held, waiting on a parent order
    Held,
    /// Status not known to this crate
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    /// Returns `true` if the order can still fill.
    pub fn is_open(&self) -> bool {
        matches!(
            self,
            OrderStatus::New
                | OrderStatus::PartiallyFilled
                | OrderStatus::Accepted
                | OrderStatus::PendingNew
                | OrderStatus::AcceptedForBidding
                | OrderStatus::PendingReplace
                | OrderStatus::PendingCancel
                | OrderStatus::Held
        )
    }
}

/// Order status filter for listing orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QueryOrderStatus {
    /// Working orders
    #[default]
    Open,
    /// Finished orders
    Closed,
    /// Every order
    All,
}

/// Asset class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetClass {
    /// US equities
    UsEquity,
    /// US options
    UsOption,
    /// Crypto
    Crypto,
}

/// Side of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionSide {
    /// Long
    Long,
    /// Short
    Short,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Sort {
    /// Oldest first
    Asc,
    /// Newest first
    #[default]
    Desc,
}

/// Type of an account activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityType {
    /// Order fill
    Fill,
    /// Cash transaction
    Trans,
    /// Miscellaneous
    Misc,
    /// ACATS in/out (cash)
    Acatc,
    /// ACATS in/out (securities)
    Acats,
    /// Cash deposit
    Csd,
    /// Cash withdrawal
    Csw,
    /// Dividend
    Div,
    /// Fee
    Fee,
    /// Interest
    Int,
    /// Journal entry (cash)
    Jnlc,
    /// Journal entry (stock)
    Jnls,
    /// Stock split
    Split,
    /// Activity type not known to this crate
    #[serde(other)]
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        assert_eq!(serde_json::to_string(&OrderType::StopLimit).unwrap(), "\"stop_limit\"");
        assert_eq!(serde_json::to_string(&AssetClass::UsEquity).unwrap(), "\"us_equity\"");
        assert_eq!(serde_json::to_string(&TradeConfirmEmail::None).unwrap(), "\"none\"");
        assert_eq!(
            serde_json::from_str::<AccountStatus>("\"ACCOUNT_UPDATED\"").unwrap(),
            AccountStatus::AccountUpdated
        );
        assert_eq!(
            serde_json::from_str::<ActivityType>("\"FILL\"").unwrap(),
            ActivityType::Fill
        );
    }

    #[test]
    fn test_unknown_values() {
        assert_eq!(
            serde_json::from_str::<OrderStatus>("\"brand_new_status\"").unwrap(),
            OrderStatus::Unknown
        );
        assert_eq!(
            serde_json::from_str::<ActivityType>("\"OPCA\"").unwrap(),
            ActivityType::Other
        );
    }

    #[test]
    fn test_order_status_open() {
        assert!(OrderStatus::New.is_open());
        assert!(OrderStatus::PartiallyFilled.is_open());
        assert!(!OrderStatus::Filled.is_open());
        assert!(!OrderStatus::Canceled.is_open());
    }
}
