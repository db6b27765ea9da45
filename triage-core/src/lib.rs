pub mod models;
pub mod repository;
pub mod lookup;
pub mod rules;

pub use models::{Order, OrderCategory, OrderStatus, Priority};
pub use repository::OrderRepository;
pub use lookup::{LookupClient, LookupResult};
pub use rules::RuleThresholds;

/// Fault raised by an external collaborator (persistence or lookup).
///
/// The processor treats every variant the same way; the split only exists so that
/// gateway implementations can say what went wrong in logs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GatewayError {
    #[error("Backend error: {0}")]
    Backend(String),
    #[error("Timed out: {0}")]
    Timeout(String),
    #[error("Connection lost: {0}")]
    Connection(String),
    #[error("Integrity violation: {0}")]
    Integrity(String),
    #[error("Protocol error: {0}")]
    Protocol(String),
}

pub type GatewayResult<T> = Result<T, GatewayError>;
