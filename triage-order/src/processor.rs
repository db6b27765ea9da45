use std::sync::Arc;
use tracing::{debug, info, warn};
use triage_core::{
    GatewayError, LookupClient, Order, OrderCategory, OrderRepository, OrderStatus, RuleThresholds,
};
use crate::handlers::{ExportHandler, FlagHandler, LookupHandler, StatusRule};
use crate::priority::PriorityRule;
use crate::report::ReportWriter;

/// Runs a user's order batch through the category rules and persists each outcome.
///
/// Orders are handled one at a time, in the order the repository returned them.
pub struct OrderProcessor {
    repository: Arc<dyn OrderRepository>,
    export: ExportHandler,
    lookup: LookupHandler,
    flag: FlagHandler,
    priority: PriorityRule,
}

impl OrderProcessor {
    pub fn new(
        repository: Arc<dyn OrderRepository>,
        lookup_client: Arc<dyn LookupClient>,
        report_writer: Arc<dyn ReportWriter>,
        thresholds: RuleThresholds,
    ) -> Self {
        Self {
            repository,
            export: ExportHandler::new(report_writer),
            lookup: LookupHandler::new(lookup_client, &thresholds),
            flag: FlagHandler,
            priority: PriorityRule::from_thresholds(&thresholds),
        }
    }

    /// Process every order of `user_id`; `false` when the batch could not be run.
    pub async fn process_orders(&self, user_id: i64) -> bool {
        match self.process_batch(user_id).await {
            Ok(_) => true,
            Err(e) => {
                warn!("Batch for user {} abandoned: {}", user_id, e);
                false
            }
        }
    }

    /// Process every order of `user_id` and hand back the evaluated orders
    #[tracing::instrument(skip(self))]
    pub async fn process_batch(&self, user_id: i64) -> Result<Vec<Order>, BatchError> {
        let mut orders = self
            .repository
            .get_orders_by_user(user_id)
            .await
            .map_err(BatchError::Fetch)?;

        if orders.is_empty() {
            return Err(BatchError::Empty { user_id });
        }

        info!("Processing {} orders for user {}", orders.len(), user_id);
        for order in orders.iter_mut() {
            self.process_order(order, user_id).await;
        }

        Ok(orders)
    }

    /// Evaluate one order in place: status, then priority, then persistence
    pub async fn process_order(&self, order: &mut Order, user_id: i64) {
        let derived = match self.rule_for(order.category()) {
            Some(rule) => rule.derive_status(order, user_id).await,
            None => Some(OrderStatus::UnknownType),
        };
        if let Some(status) = derived {
            order.status = status;
        }

        order.priority = self.priority.determine(order.amount);

        match self
            .repository
            .update_order_status(order.id, order.status, order.priority)
            .await
        {
            Ok(stored) => {
                debug!(
                    "Order {} -> {} / {} (stored: {})",
                    order.id, order.status, order.priority, stored
                );
            }
            Err(e) => {
                warn!("Could not persist order {}: {}", order.id, e);
                order.status = OrderStatus::DbError;
            }
        }
    }

    fn rule_for(&self, category: OrderCategory) -> Option<&dyn StatusRule> {
        match category {
            OrderCategory::Export => Some(&self.export),
            OrderCategory::Lookup => Some(&self.lookup),
            OrderCategory::Flag => Some(&self.flag),
            OrderCategory::Unknown => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("Could not fetch orders: {0}")]
    Fetch(#[source] GatewayError),

    #[error("No orders found for user {user_id}")]
    Empty { user_id: i64 },
}
