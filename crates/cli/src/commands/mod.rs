//! CLI command implementations.

pub mod admin;
pub mod identity;
pub mod products;

use std::sync::Arc;

use plumcot_client::{GatewayClient, GatewayConfig, JsonFileStore, KeyValueStore, MemoryStore};

/// Build a gateway client from the environment.
///
/// The admin credential store is a fresh in-memory one: each CLI invocation
/// is its own session, like a new browser tab.
pub(crate) fn client_from_env() -> Result<(GatewayConfig, GatewayClient), Box<dyn std::error::Error>>
{
    let config = GatewayConfig::from_env()?;
    let session_store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let client = GatewayClient::from_config(&config, session_store);
    Ok((config, client))
}

/// The durable profile store configured for this environment.
pub(crate) fn profile_store(config: &GatewayConfig) -> Arc<dyn KeyValueStore> {
    Arc::new(JsonFileStore::open(&config.profile_path))
}
