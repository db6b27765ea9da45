use std::collections::HashMap;
use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::info;
use triage_core::{GatewayError, GatewayResult, Order, OrderRepository, OrderStatus, Priority};

/// One `update_order_status` call as the repository received it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusUpdate {
    pub order_id: i64,
    pub status: OrderStatus,
    pub priority: Priority,
}

/// Order repository held in memory.
///
/// Status updates only apply to the batch of the user fetched most recently, so
/// order ids shared between users never leak across batches. Keeps a log of every
/// status update and can be told to fail on fetch or on updates for specific
/// order ids.
#[derive(Default)]
pub struct InMemoryOrderRepository {
    orders: Mutex<HashMap<i64, Vec<Order>>>,
    active_user: Mutex<Option<i64>>,
    updates: Mutex<Vec<StatusUpdate>>,
    fetch_fault: Option<GatewayError>,
    update_faults: HashMap<i64, GatewayError>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append orders to a user's batch
    pub fn with_orders(mut self, user_id: i64, orders: Vec<Order>) -> Self {
        self.orders.get_mut().entry(user_id).or_default().extend(orders);
        self
    }

    pub fn failing_fetch(mut self, fault: GatewayError) -> Self {
        self.fetch_fault = Some(fault);
        self
    }

    pub fn failing_update(mut self, order_id: i64, fault: GatewayError) -> Self {
        self.update_faults.insert(order_id, fault);
        self
    }

    /// Status updates received so far, oldest first
    pub async fn updates(&self) -> Vec<StatusUpdate> {
        self.updates.lock().await.clone()
    }

    /// Current stored copy of a user's orders
    pub async fn orders_for(&self, user_id: i64) -> Vec<Order> {
        self.orders.lock().await.get(&user_id).cloned().unwrap_or_default()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn get_orders_by_user(&self, user_id: i64) -> GatewayResult<Vec<Order>> {
        if let Some(fault) = &self.fetch_fault {
            return Err(fault.clone());
        }
        *self.active_user.lock().await = Some(user_id);
        Ok(self.orders_for(user_id).await)
    }

    async fn update_order_status(
        &self,
        order_id: i64,
        status: OrderStatus,
        priority: Priority,
    ) -> GatewayResult<bool> {
        if let Some(fault) = self.update_faults.get(&order_id) {
            return Err(fault.clone());
        }

        self.updates.lock().await.push(StatusUpdate { order_id, status, priority });

        let Some(user_id) = *self.active_user.lock().await else {
            return Ok(false);
        };

        let mut matched = false;
        let mut orders = self.orders.lock().await;
        for order in orders.get_mut(&user_id).into_iter().flatten() {
            if order.id == order_id {
                order.status = status;
                order.priority = priority;
                matched = true;
            }
        }

        info!("Order {} stored as {} / {}", order_id, status, priority);
        Ok(matched)
    }
}
