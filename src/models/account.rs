//! Trading account and account configuration models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::{AccountStatus, DtbpCheck, PdtCheck, TradeConfirmEmail};

/// Trading account information: buying power, equity, restrictions.
///
/// Money values arrive as decimal strings and are kept exact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeAccount {
    /// Account ID
    pub id: String,
    /// Account number
    pub account_number: String,
    /// Current account status
    pub status: AccountStatus,
    /// Crypto trading status, present only when crypto is enabled
    #[serde(default)]
    pub crypto_status: Option<AccountStatus>,
    /// Account currency, currently always "USD"
    #[serde(default)]
    pub currency: Option<String>,
    /// Current available buying power
    #[serde(default)]
    pub buying_power: Option<Decimal>,
    /// Buying power under Regulation T
    #[serde(default)]
    pub regt_buying_power: Option<Decimal>,
    /// Buying power for day trades
    #[serde(default)]
    pub daytrading_buying_power: Option<Decimal>,
    /// Buying power for non-marginable securities
    #[serde(default)]
    pub non_marginable_buying_power: Option<Decimal>,
    /// Cash balance
    #[serde(default)]
    pub cash: Option<Decimal>,
    /// Fees accrued in this account
    #[serde(default)]
    pub accrued_fees: Option<Decimal>,
    /// Cash pending transfer out
    #[serde(default)]
    pub pending_transfer_out: Option<Decimal>,
    /// Cash pending transfer in
    #[serde(default)]
    pub pending_transfer_in: Option<Decimal>,
    /// Deprecated alias of `equity`
    #[serde(default)]
    pub portfolio_value: Option<Decimal>,
    /// Flagged as pattern day trader
    #[serde(default)]
    pub pattern_day_trader: Option<bool>,
    /// Orders are blocked
    #[serde(default)]
    pub trading_blocked: Option<bool>,
    /// Transfers are blocked
    #[serde(default)]
    pub transfers_blocked: Option<bool>,
    /// All account activity is blocked
    #[serde(default)]
    pub account_blocked: Option<bool>,
    /// When the account was created
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// User suspended trading
    #[serde(default)]
    pub trade_suspended_by_user: Option<bool>,
    /// Margin multiplier (1, 2 or 4)
    #[serde(default)]
    pub multiplier: Option<Decimal>,
    /// Short selling is allowed
    #[serde(default)]
    pub shorting_enabled: Option<bool>,
    /// cash + long_market_value + short_market_value
    #[serde(default)]
    pub equity: Option<Decimal>,
    /// Equity as of the previous close
    #[serde(default)]
    pub last_equity: Option<Decimal>,
    /// Market value of long positions
    #[serde(default)]
    pub long_market_value: Option<Decimal>,
    /// Market value of short positions
    #[serde(default)]
    pub short_market_value: Option<Decimal>,
    /// Reg T initial margin requirement
    #[serde(default)]
    pub initial_margin: Option<Decimal>,
    /// Maintenance margin requirement
    #[serde(default)]
    pub maintenance_margin: Option<Decimal>,
    /// Maintenance margin on the previous trading day
    #[serde(default)]
    pub last_maintenance_margin: Option<Decimal>,
    /// Special memorandum account value
    #[serde(default)]
    pub sma: Option<Decimal>,
    /// Day trades in the last 5 trading days
    #[serde(default)]
    pub daytrade_count: Option<i64>,
}

/// Account-level trading configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountConfiguration {
    /// Day trade buying power check
    pub dtbp_check: DtbpCheck,
    /// Fractional trading enabled
    pub fractional_trading: bool,
    /// Max margin multiplier, "1" to "4"
    pub max_margin_multiplier: String,
    /// Long-only mode
    pub no_shorting: bool,
    /// Pattern day trader check
    pub pdt_check: PdtCheck,
    /// New orders are blocked
    pub suspend_trade: bool,
    /// Trade confirmation emails
    pub trade_confirm_email: TradeConfirmEmail,
    /// Accept PTP symbol orders with no exception
    #[serde(default)]
    pub ptp_no_exception_entry: bool,
}

/// Partial update of an [`AccountConfiguration`]. Unset fields are left
/// unchanged.
///
/// # Example
///
/// ```
/// use paca_rs::models::{PatchAccountConfiguration, TradeConfirmEmail};
///
/// let patch = PatchAccountConfiguration {
///     fractional_trading: Some(true),
///     trade_confirm_email: Some(TradeConfirmEmail::None),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatchAccountConfiguration {
    /// Day trade buying power check
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dtbp_check: Option<DtbpCheck>,
    /// Fractional trading enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fractional_trading: Option<bool>,
    /// Max margin multiplier, "1" to "4"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_margin_multiplier: Option<String>,
    /// Long-only mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_shorting: Option<bool>,
    /// Pattern day trader check
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdt_check: Option<PdtCheck>,
    /// New orders are blocked
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suspend_trade: Option<bool>,
    /// Trade confirmation emails
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trade_confirm_email: Option<TradeConfirmEmail>,
    /// Accept PTP symbol orders with no exception
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ptp_no_exception_entry: Option<bool>,
}

impl PatchAccountConfiguration {
    /// Returns `true` if no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
