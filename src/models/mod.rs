//! Data models for the Alpaca trading API.
//!
//! Models are organized by domain:
//!
//! - [`primitives`] - Base URLs and newtypes like `OrderId` and `Symbol`
//! - [`enums`] - Enumeration types for statuses, sides, order types
//! - [`account`] - Trading account and account configuration
//! - [`order`] - Orders and order queries
//! - [`position`] - Open positions
//! - [`activity`] - Account activity feed

pub mod primitives;
pub mod enums;
pub mod account;
pub mod order;
pub mod position;
pub mod activity;

// Re-export commonly used types
pub use primitives::*;
pub use enums::*;
pub use account::*;
pub use order::*;
pub use position::*;
pub use activity::*;
