//! API service modules for the Alpaca trading endpoints.
//!
//! Each service provides methods for interacting with a specific
//! subset of the trading API.

mod account;
mod orders;
mod positions;

pub use account::AccountService;
pub use orders::OrdersService;
pub use positions::PositionsService;
