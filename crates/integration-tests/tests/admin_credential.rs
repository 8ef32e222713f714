//! Admin credential lifecycle across client instances.
//!
//! The session-scoped store outlives individual `GatewayClient` values the
//! way browser session storage outlives page loads, so a rebuilt client
//! can restore the credential without re-authentication.

use std::sync::Arc;

use secrecy::SecretString;
use url::Url;

use plumcot_client::{GatewayClient, KeyValueStore, MemoryStore};

fn base_url() -> Url {
    "http://localhost:8000".parse().expect("valid url")
}

// =============================================================================
// Derivation
// =============================================================================

#[tokio::test]
async fn test_credential_header_is_scheme_plus_encoded_login() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let client = GatewayClient::new(&base_url(), store);

    client
        .set_admin_credential("alice", &SecretString::from("secret".to_string()))
        .await;

    let credential = client.admin_credential().await.expect("installed");
    // base64("alice:secret") under the fixed Basic scheme.
    assert_eq!(credential.header_value(), "Basic YWxpY2U6c2VjcmV0");
    assert_eq!(
        credential.decode_login(),
        Some(("alice".to_owned(), "secret".to_owned()))
    );
}

// =============================================================================
// Reload-Within-Session
// =============================================================================

#[tokio::test]
async fn test_second_client_restores_from_shared_session_store() {
    let store = Arc::new(MemoryStore::new());

    let first = GatewayClient::new(
        &base_url(),
        Arc::clone(&store) as Arc<dyn KeyValueStore>,
    );
    first
        .set_admin_credential("alice", &SecretString::from("secret".to_string()))
        .await;

    // A rebuilt client over the same session store: the reload case.
    let second = GatewayClient::new(
        &base_url(),
        Arc::clone(&store) as Arc<dyn KeyValueStore>,
    );
    assert!(second.admin_credential().await.is_none());
    assert!(second.restore_admin_credential().await);

    let credential = second.admin_credential().await.expect("restored");
    assert_eq!(credential.header_value(), "Basic YWxpY2U6c2VjcmV0");
}

// =============================================================================
// Clearing
// =============================================================================

#[tokio::test]
async fn test_clear_removes_both_copies_so_restore_installs_nothing() {
    let store = Arc::new(MemoryStore::new());
    let client = GatewayClient::new(
        &base_url(),
        Arc::clone(&store) as Arc<dyn KeyValueStore>,
    );

    client
        .set_admin_credential("alice", &SecretString::from("secret".to_string()))
        .await;
    client.clear_admin_credential().await;

    assert!(client.admin_credential().await.is_none());
    assert!(!client.restore_admin_credential().await);
    assert!(client.admin_credential().await.is_none());

    // And a fresh client over the same store sees nothing either.
    let rebuilt = GatewayClient::new(
        &base_url(),
        Arc::clone(&store) as Arc<dyn KeyValueStore>,
    );
    assert!(!rebuilt.restore_admin_credential().await);
}

#[tokio::test]
async fn test_verbatim_token_does_not_outlive_the_client() {
    let store = Arc::new(MemoryStore::new());
    let client = GatewayClient::new(
        &base_url(),
        Arc::clone(&store) as Arc<dyn KeyValueStore>,
    );

    client.set_admin_token("Basic YWxpY2U6c2VjcmV0").await;
    assert!(client.admin_credential().await.is_some());

    // Verbatim tokens are installed but never persisted.
    let rebuilt = GatewayClient::new(
        &base_url(),
        Arc::clone(&store) as Arc<dyn KeyValueStore>,
    );
    assert!(!rebuilt.restore_admin_credential().await);
}
