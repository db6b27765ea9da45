pub mod app_config;
pub mod memory_repo;
pub mod static_lookup;
pub mod fixtures;

pub use memory_repo::{InMemoryOrderRepository, StatusUpdate};
pub use static_lookup::StaticLookupClient;
pub use fixtures::{FixtureError, UserOrders};
