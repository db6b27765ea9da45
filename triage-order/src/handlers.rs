use std::sync::Arc;
use async_trait::async_trait;
use tracing::{debug, warn};
use triage_core::{LookupClient, Order, OrderStatus, RuleThresholds};
use crate::report::ReportWriter;

/// Status derivation for one order category.
///
/// `None` means the rule reached no verdict and the order keeps its current status.
#[async_trait]
pub trait StatusRule: Send + Sync {
    async fn derive_status(&self, order: &Order, user_id: i64) -> Option<OrderStatus>;
}

/// Category `A`: write the order to a report artifact
pub struct ExportHandler {
    writer: Arc<dyn ReportWriter>,
}

impl ExportHandler {
    pub fn new(writer: Arc<dyn ReportWriter>) -> Self {
        Self { writer }
    }
}

#[async_trait]
impl StatusRule for ExportHandler {
    async fn derive_status(&self, order: &Order, user_id: i64) -> Option<OrderStatus> {
        match self.writer.export_order(order, user_id) {
            Ok(_) => Some(OrderStatus::Exported),
            Err(e) => {
                warn!("Export of order {} failed: {}", order.id, e);
                Some(OrderStatus::ExportFailed)
            }
        }
    }
}

/// Category `B`: confirm the order against the remote lookup service
pub struct LookupHandler {
    client: Arc<dyn LookupClient>,
    payload_floor: f64,
    amount_ceiling: f64,
}

impl LookupHandler {
    pub fn new(client: Arc<dyn LookupClient>, thresholds: &RuleThresholds) -> Self {
        Self {
            client,
            payload_floor: thresholds.lookup_payload_floor,
            amount_ceiling: thresholds.lookup_amount_ceiling,
        }
    }
}

#[async_trait]
impl StatusRule for LookupHandler {
    async fn derive_status(&self, order: &Order, _user_id: i64) -> Option<OrderStatus> {
        let result = match self.client.call(order.id).await {
            Ok(result) => result,
            Err(e) => {
                warn!("Lookup for order {} failed: {}", order.id, e);
                return Some(OrderStatus::ApiFailure);
            }
        };

        if !result.is_success() {
            debug!("Lookup for order {} answered {}", order.id, result.status);
            return Some(OrderStatus::ApiError);
        }

        // A missing or non-numeric payload matches no branch; status is left as is.
        let Some(payload) = result.numeric_payload() else {
            warn!("Lookup for order {} returned an uncomparable payload: {:?}", order.id, result.payload);
            return None;
        };

        if payload >= self.payload_floor && order.amount < self.amount_ceiling {
            Some(OrderStatus::Processed)
        } else if payload < self.payload_floor || order.is_flagged() {
            Some(OrderStatus::Pending)
        } else {
            Some(OrderStatus::Error)
        }
    }
}

/// Category `C`: the flag alone decides
#[derive(Debug, Default, Clone, Copy)]
pub struct FlagHandler;

#[async_trait]
impl StatusRule for FlagHandler {
    async fn derive_status(&self, order: &Order, _user_id: i64) -> Option<OrderStatus> {
        if order.is_flagged() {
            Some(OrderStatus::Completed)
        } else {
            Some(OrderStatus::InProgress)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use serde_json::json;
    use triage_core::{GatewayError, GatewayResult, LookupResult};
    use crate::report::ExportError;

    struct FixedLookup(GatewayResult<LookupResult>);

    #[async_trait]
    impl LookupClient for FixedLookup {
        async fn call(&self, _order_id: i64) -> GatewayResult<LookupResult> {
            self.0.clone()
        }
    }

    struct BrokenWriter;

    impl ReportWriter for BrokenWriter {
        fn export_order(&self, _order: &Order, _user_id: i64) -> Result<PathBuf, ExportError> {
            Err(ExportError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            )))
        }
    }

    fn lookup(response: GatewayResult<LookupResult>) -> LookupHandler {
        LookupHandler::new(Arc::new(FixedLookup(response)), &RuleThresholds::default())
    }

    fn order_b(amount: f64, flag: Option<bool>) -> Order {
        Order::new(1, Some("B".to_string()), amount, flag)
    }

    #[tokio::test]
    async fn test_lookup_processed() {
        let handler = lookup(Ok(LookupResult::success(60)));
        assert_eq!(handler.derive_status(&order_b(80.0, Some(false)), 1).await, Some(OrderStatus::Processed));

        let edge = lookup(Ok(LookupResult::success(50.0)));
        assert_eq!(edge.derive_status(&order_b(99.99, Some(false)), 1).await, Some(OrderStatus::Processed));
    }

    #[tokio::test]
    async fn test_lookup_pending() {
        let low = lookup(Ok(LookupResult::success(40)));
        assert_eq!(low.derive_status(&order_b(80.0, Some(false)), 1).await, Some(OrderStatus::Pending));
        assert_eq!(low.derive_status(&order_b(500.0, None), 1).await, Some(OrderStatus::Pending));

        // Flag rescues an order that is too large to be processed
        let high = lookup(Ok(LookupResult::success(60)));
        assert_eq!(high.derive_status(&order_b(100.0, Some(true)), 1).await, Some(OrderStatus::Pending));

        let negative = lookup(Ok(LookupResult::success(-50.0)));
        assert_eq!(negative.derive_status(&order_b(80.0, Some(false)), 1).await, Some(OrderStatus::Pending));
    }

    #[tokio::test]
    async fn test_lookup_processed_wins_over_flag() {
        let handler = lookup(Ok(LookupResult::success(60)));
        assert_eq!(handler.derive_status(&order_b(80.0, Some(true)), 1).await, Some(OrderStatus::Processed));
    }

    #[tokio::test]
    async fn test_lookup_error_when_no_branch_matches() {
        let handler = lookup(Ok(LookupResult::success(60)));
        assert_eq!(handler.derive_status(&order_b(100.0, Some(false)), 1).await, Some(OrderStatus::Error));
        assert_eq!(handler.derive_status(&order_b(100.0, None), 1).await, Some(OrderStatus::Error));
        assert_eq!(handler.derive_status(&order_b(f64::NAN, None), 1).await, Some(OrderStatus::Error));
    }

    #[tokio::test]
    async fn test_lookup_non_success_status() {
        let handler = lookup(Ok(LookupResult::new("error", Some(json!(60)))));
        assert_eq!(handler.derive_status(&order_b(80.0, Some(false)), 1).await, Some(OrderStatus::ApiError));
    }

    #[tokio::test]
    async fn test_lookup_fault() {
        let handler = lookup(Err(GatewayError::Connection("reset by peer".to_string())));
        assert_eq!(handler.derive_status(&order_b(80.0, Some(false)), 1).await, Some(OrderStatus::ApiFailure));
    }

    #[tokio::test]
    async fn test_lookup_uncomparable_payload_gives_no_verdict() {
        for payload in [
            None,
            Some(json!(null)),
            Some(json!("invalid")),
            Some(json!({"v": 60})),
            Some(json!(true)),
            Some(json!(false)),
        ] {
            let handler = lookup(Ok(LookupResult::new("success", payload.clone())));
            assert_eq!(handler.derive_status(&order_b(80.0, Some(false)), 1).await, None, "{:?}", payload);
        }
    }

    #[tokio::test]
    async fn test_flag_handler() {
        let handler = FlagHandler;
        let mut order = Order::new(1, Some("C".to_string()), 100.0, Some(true));
        assert_eq!(handler.derive_status(&order, 1).await, Some(OrderStatus::Completed));

        order.flag = Some(false);
        assert_eq!(handler.derive_status(&order, 1).await, Some(OrderStatus::InProgress));

        order.flag = None;
        assert_eq!(handler.derive_status(&order, 1).await, Some(OrderStatus::InProgress));
    }

    #[tokio::test]
    async fn test_export_handler() {
        let dir = tempfile::tempdir().unwrap();
        let handler = ExportHandler::new(Arc::new(crate::report::CsvReportWriter::new(dir.path())));
        let order = Order::new(1, Some("A".to_string()), 100.0, Some(false));
        assert_eq!(handler.derive_status(&order, 1).await, Some(OrderStatus::Exported));

        let broken = ExportHandler::new(Arc::new(BrokenWriter));
        assert_eq!(broken.derive_status(&order, 1).await, Some(OrderStatus::ExportFailed));
    }
}
