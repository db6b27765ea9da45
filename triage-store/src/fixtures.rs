use std::collections::HashMap;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use tracing::info;
use triage_core::{LookupResult, Order};
use crate::memory_repo::InMemoryOrderRepository;
use crate::static_lookup::StaticLookupClient;

/// A user's seeded batch as stored in the orders fixture
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserOrders {
    pub user_id: i64,
    pub orders: Vec<Order>,
}

pub fn load_orders(path: &Path) -> Result<Vec<UserOrders>, FixtureError> {
    read_json(path)
}

/// Lookup fixtures are a JSON object keyed by order id
pub fn load_lookups(path: &Path) -> Result<HashMap<i64, LookupResult>, FixtureError> {
    read_json(path)
}

pub fn repository_from_file(path: &Path) -> Result<InMemoryOrderRepository, FixtureError> {
    let batches = load_orders(path)?;
    info!("Seeding {} user batches from {}", batches.len(), path.display());

    Ok(batches
        .into_iter()
        .fold(InMemoryOrderRepository::new(), |repo, batch| {
            repo.with_orders(batch.user_id, batch.orders)
        }))
}

pub fn lookup_client_from_file(path: &Path) -> Result<StaticLookupClient, FixtureError> {
    Ok(StaticLookupClient::new(load_lookups(path)?))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, FixtureError> {
    let raw = std::fs::read_to_string(path).map_err(|source| FixtureError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| FixtureError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("Cannot read fixture {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed fixture {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}
