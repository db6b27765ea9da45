use async_trait::async_trait;
use crate::models::{Order, OrderStatus, Priority};
use crate::GatewayResult;

/// Persistence gateway for order batches
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Load every order owned by `user_id`, in storage order
    async fn get_orders_by_user(&self, user_id: i64) -> GatewayResult<Vec<Order>>;

    /// Store the outcome of a single order
    async fn update_order_status(
        &self,
        order_id: i64,
        status: OrderStatus,
        priority: Priority,
    ) -> GatewayResult<bool>;
}
