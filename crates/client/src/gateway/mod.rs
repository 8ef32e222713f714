//! Gateway client for the shop backend.
//!
//! Translates logical operations (resource path + method + payload +
//! category) into transport calls with the correct base path, timeout, and
//! headers, shielding callers from transport-library specifics.
//!
//! # Credential handling
//!
//! The client owns a single mutable administrator-credential slot. Calls in
//! admin categories attach it as the authorization header when installed;
//! without one they go out unauthenticated and the backend rejects them.
//! The encoded value is mirrored into the session-scoped store so a
//! restarted console within the same session does not re-authenticate.
//!
//! # Failure policy
//!
//! Non-2xx responses, timeouts, and transport failures surface as
//! [`GatewayError`] to the immediate caller. The gateway retries nothing
//! and caches nothing.

pub mod multipart;

mod admin;
mod shopper;

use std::sync::Arc;

use reqwest::Method;
use secrecy::SecretString;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;
use tracing::{debug, instrument};
use url::Url;

use plumcot_core::AdminCredential;

use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::policy::CallCategory;
use crate::storage::KeyValueStore;

use multipart::MultipartField;

/// Session-store key holding the encoded admin credential.
pub(crate) const ADMIN_CREDENTIAL_KEY: &str = "admin_basic";

/// HTTP client for the shopper and administrator APIs.
///
/// Cheap to clone; all clones share the same connection pool, session
/// store, and credential slot.
#[derive(Clone)]
pub struct GatewayClient {
    inner: Arc<GatewayInner>,
}

struct GatewayInner {
    http: reqwest::Client,
    /// Backend origin with any trailing slash removed.
    origin: String,
    /// Session-scoped store mirroring the admin credential.
    session_store: Arc<dyn KeyValueStore>,
    /// Current admin credential; last write wins under concurrent mutation.
    admin_credential: RwLock<Option<AdminCredential>>,
}

impl std::fmt::Debug for GatewayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayClient")
            .field("origin", &self.inner.origin)
            .field("admin_credential", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl GatewayClient {
    /// Create a new gateway client against `base_url`.
    #[must_use]
    pub fn new(base_url: &Url, session_store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            inner: Arc::new(GatewayInner {
                http: reqwest::Client::new(),
                origin: base_url.as_str().trim_end_matches('/').to_owned(),
                session_store,
                admin_credential: RwLock::new(None),
            }),
        }
    }

    /// Create a client from loaded configuration.
    #[must_use]
    pub fn from_config(config: &GatewayConfig, session_store: Arc<dyn KeyValueStore>) -> Self {
        Self::new(&config.base_url, session_store)
    }

    // =========================================================================
    // Admin credential lifecycle
    // =========================================================================

    /// Derive a credential from a login pair, install it, and mirror the
    /// encoded value into the session-scoped store.
    #[instrument(skip(self, password), fields(username = %username))]
    pub async fn set_admin_credential(&self, username: &str, password: &SecretString) {
        let credential = AdminCredential::from_login(username, password);
        self.inner
            .session_store
            .set(ADMIN_CREDENTIAL_KEY, credential.header_value());
        *self.inner.admin_credential.write().await = Some(credential);
    }

    /// Install an already-encoded credential verbatim (not persisted).
    pub async fn set_admin_token(&self, token: impl Into<String>) {
        *self.inner.admin_credential.write().await =
            Some(AdminCredential::from_encoded(token));
    }

    /// Re-install the credential persisted in the session-scoped store, if
    /// any. The value is not validated against the backend; an invalid one
    /// surfaces as an authorization failure on the first admin call.
    ///
    /// Returns whether a credential was installed.
    pub async fn restore_admin_credential(&self) -> bool {
        match self.inner.session_store.get(ADMIN_CREDENTIAL_KEY) {
            Some(token) => {
                *self.inner.admin_credential.write().await =
                    Some(AdminCredential::from_encoded(token));
                debug!("Restored admin credential from session store");
                true
            }
            None => false,
        }
    }

    /// Remove the in-memory credential and its session-persisted copy.
    /// Subsequent admin calls go out unauthenticated.
    pub async fn clear_admin_credential(&self) {
        *self.inner.admin_credential.write().await = None;
        self.inner.session_store.remove(ADMIN_CREDENTIAL_KEY);
    }

    /// The currently installed credential, if any.
    pub async fn admin_credential(&self) -> Option<AdminCredential> {
        self.inner.admin_credential.read().await.clone()
    }

    // =========================================================================
    // Request plumbing
    // =========================================================================

    fn endpoint(&self, category: CallCategory, path: &str) -> String {
        format!("{}{}{}", self.inner.origin, category.base_path(), path)
    }

    /// Start a request in `category`: resolved URL, category timeout, and
    /// the admin header when the category requires it and one is installed.
    pub(crate) async fn builder(
        &self,
        category: CallCategory,
        method: Method,
        path: &str,
    ) -> reqwest::RequestBuilder {
        let mut builder = self
            .inner
            .http
            .request(method, self.endpoint(category, path))
            .timeout(category.timeout());

        if category.requires_admin_auth()
            && let Some(credential) = self.inner.admin_credential.read().await.as_ref()
        {
            builder = builder.header(
                reqwest::header::AUTHORIZATION,
                credential.header_value(),
            );
        }

        builder
    }

    /// Send a prepared request and decode a JSON response body.
    pub(crate) async fn dispatch<T: DeserializeOwned>(
        &self,
        category: CallCategory,
        builder: reqwest::RequestBuilder,
    ) -> Result<T, GatewayError> {
        let body = self.send_checked(category, builder).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Send a prepared request, accepting any 2xx and discarding the body.
    pub(crate) async fn dispatch_unit(
        &self,
        category: CallCategory,
        builder: reqwest::RequestBuilder,
    ) -> Result<(), GatewayError> {
        self.send_checked(category, builder).await.map(drop)
    }

    /// Send and classify the response per the error taxonomy: 404 is the
    /// distinguished missing-resource case, any other non-2xx carries its
    /// status and body, and a deadline miss maps to the category timeout.
    #[instrument(skip(self, builder), fields(category = ?category))]
    async fn send_checked(
        &self,
        category: CallCategory,
        builder: reqwest::RequestBuilder,
    ) -> Result<String, GatewayError> {
        let response = builder
            .send()
            .await
            .map_err(|error| classify_transport(error, category))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|error| classify_transport(error, category))?;

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(GatewayError::NotFound(body));
        }
        if !status.is_success() {
            debug!(status = %status, "Backend rejected request");
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }

    // Convenience wrappers for the common shapes.

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        category: CallCategory,
        path: &str,
    ) -> Result<T, GatewayError> {
        let builder = self.builder(category, Method::GET, path).await;
        self.dispatch(category, builder).await
    }

    pub(crate) async fn get_json_query<T: DeserializeOwned>(
        &self,
        category: CallCategory,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, GatewayError> {
        let builder = self.builder(category, Method::GET, path).await.query(query);
        self.dispatch(category, builder).await
    }

    pub(crate) async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        category: CallCategory,
        path: &str,
        body: &B,
    ) -> Result<T, GatewayError> {
        let builder = self.builder(category, Method::POST, path).await.json(body);
        self.dispatch(category, builder).await
    }

    pub(crate) async fn put_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        category: CallCategory,
        path: &str,
        body: &B,
    ) -> Result<T, GatewayError> {
        let builder = self.builder(category, Method::PUT, path).await.json(body);
        self.dispatch(category, builder).await
    }

    pub(crate) async fn delete_unit(
        &self,
        category: CallCategory,
        path: &str,
    ) -> Result<(), GatewayError> {
        let builder = self.builder(category, Method::DELETE, path).await;
        self.dispatch_unit(category, builder).await
    }

    /// POST an ordered multipart form.
    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        category: CallCategory,
        path: &str,
        fields: Vec<MultipartField>,
    ) -> Result<T, GatewayError> {
        let form = multipart::into_form(fields)?;
        let builder = self
            .builder(category, Method::POST, path)
            .await
            .multipart(form);
        self.dispatch(category, builder).await
    }
}

fn classify_transport(error: reqwest::Error, category: CallCategory) -> GatewayError {
    if error.is_timeout() {
        GatewayError::Timeout(category.timeout())
    } else {
        GatewayError::Http(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn test_client() -> (GatewayClient, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let base_url: Url = "http://localhost:8000".parse().expect("valid url");
        (
            GatewayClient::new(&base_url, Arc::clone(&store) as Arc<dyn KeyValueStore>),
            store,
        )
    }

    #[test]
    fn test_endpoint_joins_origin_and_base_path() {
        let (client, _store) = test_client();
        assert_eq!(
            client.endpoint(CallCategory::Storefront, "/products/"),
            "http://localhost:8000/api/products/"
        );
        assert_eq!(
            client.endpoint(CallCategory::Admin, "/users"),
            "http://localhost:8000/adminapi/users"
        );
    }

    #[test]
    fn test_endpoint_tolerates_trailing_slash_origin() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let base_url: Url = "http://localhost:8000/".parse().expect("valid url");
        let client = GatewayClient::new(&base_url, store);
        assert_eq!(
            client.endpoint(CallCategory::Storefront, "/carts/1"),
            "http://localhost:8000/api/carts/1"
        );
    }

    #[tokio::test]
    async fn test_builder_applies_category_timeout_and_base_path() {
        let (client, _store) = test_client();
        for category in CallCategory::ALL {
            let request = client
                .builder(category, Method::GET, "/probe")
                .await
                .build()
                .expect("buildable request");
            assert_eq!(
                request.timeout(),
                Some(&category.timeout()),
                "timeout for {category:?}"
            );
            assert!(
                request.url().path().starts_with(category.base_path()),
                "base path for {category:?}"
            );
        }
    }

    #[tokio::test]
    async fn test_admin_request_carries_installed_credential() {
        let (client, _store) = test_client();
        client
            .set_admin_credential("alice", &SecretString::from("secret".to_string()))
            .await;

        let request = client
            .builder(CallCategory::Admin, Method::GET, "/status")
            .await
            .build()
            .expect("buildable request");
        let header = request
            .headers()
            .get(reqwest::header::AUTHORIZATION)
            .expect("authorization header attached");
        assert_eq!(header, "Basic YWxpY2U6c2VjcmV0");

        // Shopper calls never carry the admin credential.
        let shopper_request = client
            .builder(CallCategory::Storefront, Method::GET, "/products/")
            .await
            .build()
            .expect("buildable request");
        assert!(
            shopper_request
                .headers()
                .get(reqwest::header::AUTHORIZATION)
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_admin_request_without_credential_is_unauthenticated() {
        let (client, _store) = test_client();
        let request = client
            .builder(CallCategory::Admin, Method::GET, "/status")
            .await
            .build()
            .expect("buildable request");
        assert!(
            request
                .headers()
                .get(reqwest::header::AUTHORIZATION)
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_set_admin_credential_encodes_and_persists() {
        let (client, store) = test_client();
        client
            .set_admin_credential("alice", &SecretString::from("secret".to_string()))
            .await;

        let credential = client.admin_credential().await.expect("installed");
        assert_eq!(credential.header_value(), "Basic YWxpY2U6c2VjcmV0");
        assert_eq!(
            credential.decode_login(),
            Some(("alice".to_owned(), "secret".to_owned()))
        );
        assert_eq!(
            store.get(ADMIN_CREDENTIAL_KEY),
            Some("Basic YWxpY2U6c2VjcmV0".to_owned())
        );
    }

    #[tokio::test]
    async fn test_set_admin_token_is_verbatim_and_unpersisted() {
        let (client, store) = test_client();
        client.set_admin_token("Basic abcdef").await;

        let credential = client.admin_credential().await.expect("installed");
        assert_eq!(credential.header_value(), "Basic abcdef");
        assert_eq!(store.get(ADMIN_CREDENTIAL_KEY), None);
    }

    #[tokio::test]
    async fn test_clear_admin_credential_empties_slot_and_store() {
        let (client, store) = test_client();
        client
            .set_admin_credential("alice", &SecretString::from("secret".to_string()))
            .await;
        client.clear_admin_credential().await;

        assert!(client.admin_credential().await.is_none());
        assert_eq!(store.get(ADMIN_CREDENTIAL_KEY), None);

        // With the store empty, restore installs nothing.
        assert!(!client.restore_admin_credential().await);
        assert!(client.admin_credential().await.is_none());
    }

    #[tokio::test]
    async fn test_restore_admin_credential_from_session_store() {
        let (client, store) = test_client();
        store.set(ADMIN_CREDENTIAL_KEY, "Basic YWxpY2U6c2VjcmV0");

        assert!(client.restore_admin_credential().await);
        let credential = client.admin_credential().await.expect("installed");
        assert_eq!(credential.header_value(), "Basic YWxpY2U6c2VjcmV0");
    }

    #[tokio::test]
    async fn test_last_write_wins_on_credential_slot() {
        let (client, _store) = test_client();
        client
            .set_admin_credential("alice", &SecretString::from("secret".to_string()))
            .await;
        client
            .set_admin_credential("bob", &SecretString::from("hunter2".to_string()))
            .await;

        let credential = client.admin_credential().await.expect("installed");
        assert_eq!(
            credential.decode_login(),
            Some(("bob".to_owned(), "hunter2".to_owned()))
        );
    }

    #[test]
    fn test_debug_redacts_credential() {
        let (client, _store) = test_client();
        let debug_output = format!("{client:?}");
        assert!(debug_output.contains("[REDACTED]"));
    }
}
