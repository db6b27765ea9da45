use std::collections::HashMap;
use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;
use triage_core::{GatewayError, GatewayResult, LookupClient, LookupResult};

/// Lookup client answering from a fixed table.
///
/// Order ids with no entry fail with [`GatewayError::Protocol`].
#[derive(Default)]
pub struct StaticLookupClient {
    responses: HashMap<i64, LookupResult>,
    faults: HashMap<i64, GatewayError>,
    calls: Mutex<Vec<i64>>,
}

impl StaticLookupClient {
    pub fn new(responses: HashMap<i64, LookupResult>) -> Self {
        Self {
            responses,
            ..Self::default()
        }
    }

    pub fn with_response(mut self, order_id: i64, result: LookupResult) -> Self {
        self.responses.insert(order_id, result);
        self
    }

    pub fn with_fault(mut self, order_id: i64, fault: GatewayError) -> Self {
        self.faults.insert(order_id, fault);
        self
    }

    /// Order ids looked up so far, in call order
    pub async fn calls(&self) -> Vec<i64> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl LookupClient for StaticLookupClient {
    async fn call(&self, order_id: i64) -> GatewayResult<LookupResult> {
        self.calls.lock().await.push(order_id);

        if let Some(fault) = self.faults.get(&order_id) {
            return Err(fault.clone());
        }

        let result = self
            .responses
            .get(&order_id)
            .cloned()
            .ok_or_else(|| GatewayError::Protocol(format!("no lookup entry for order {}", order_id)))?;
        debug!("Lookup for order {}: {:?}", order_id, result);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_answers_from_table() {
        let client = StaticLookupClient::default()
            .with_response(1, LookupResult::success(60))
            .with_fault(2, GatewayError::Connection("refused".to_string()));

        assert_eq!(client.call(1).await, Ok(LookupResult::success(60)));
        assert_eq!(client.call(2).await, Err(GatewayError::Connection("refused".to_string())));
        assert!(matches!(client.call(3).await, Err(GatewayError::Protocol(_))));
        assert_eq!(client.calls().await, vec![1, 2, 3]);
    }
}
