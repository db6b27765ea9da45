use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::GatewayResult;

pub const LOOKUP_SUCCESS: &str = "success";

/// Answer from the remote lookup service for one order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LookupResult {
    pub status: String,
    /// Opaque payload. Only JSON numbers take part in rule comparisons.
    #[serde(default)]
    pub payload: Option<serde_json::Value>,
}

impl LookupResult {
    pub fn new(status: impl Into<String>, payload: Option<serde_json::Value>) -> Self {
        Self {
            status: status.into(),
            payload,
        }
    }

    pub fn success(payload: impl Into<serde_json::Value>) -> Self {
        Self::new(LOOKUP_SUCCESS, Some(payload.into()))
    }

    pub fn is_success(&self) -> bool {
        self.status == LOOKUP_SUCCESS
    }

    /// Payload as a float, or `None` when it is absent or not a JSON number.
    /// Booleans are not numbers here.
    pub fn numeric_payload(&self) -> Option<f64> {
        self.payload.as_ref().and_then(serde_json::Value::as_f64)
    }
}

/// Remote lookup gateway
#[async_trait]
pub trait LookupClient: Send + Sync {
    async fn call(&self, order_id: i64) -> GatewayResult<LookupResult>;
}
