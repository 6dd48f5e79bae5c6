//! Orders service for listing and canceling orders.

use crate::client::RestClient;
use crate::models::{GetOrdersRequest, Order, OrderId};
use crate::Result;

/// Service for order operations.
///
/// # Example
///
/// ```no_run
/// use paca_rs::models::{GetOrdersRequest, QueryOrderStatus};
///
/// # async fn example(client: paca_rs::TradingClient) -> paca_rs::Result<()> {
/// let request = GetOrdersRequest {
///     status: Some(QueryOrderStatus::Open),
///     ..Default::default()
/// };
/// for order in client.orders().list(&request).await? {
///     client.orders().cancel(&order.id).await?;
/// }
/// # Ok(())
/// # }
/// ```
pub struct OrdersService {
    client: RestClient,
}

impl OrdersService {
    pub(crate) fn new(client: RestClient) -> Self {
        Self { client }
    }

    /// List orders matching the filters.
    pub async fn list(&self, request: &GetOrdersRequest) -> Result<Vec<Order>> {
        self.client.get_with_query("/orders", request).await
    }

    /// Get a specific order by ID.
    pub async fn get(&self, order_id: &OrderId) -> Result<Order> {
        self.client.get(&format!("/orders/{}", order_id)).await
    }

    /// Cancel an order.
    ///
    /// The server answers with no content; a rejected cancel surfaces as
    /// an API error.
    pub async fn cancel(&self, order_id: &OrderId) -> Result<()> {
        self.client.delete(&format!("/orders/{}", order_id)).await
    }
}
