//! Session bootstrap: resolve "who is the current shopper".
//!
//! On application start the bootstrapper reads the remembered shopper from
//! the durable store and looks the account up. A stale record - the backend
//! was reset, the account deleted - is discarded and a fresh guest account
//! is provisioned transparently, so a returning browser is never stranded
//! on a dead id and casual browsing never requires a signup step.
//!
//! State machine: `Unresolved -> Resolving -> Resolved`. `logout` returns
//! to `Unresolved`; the next `init` re-resolves. A failed provisioning
//! leaves the session `Unresolved` and the application running anonymously.
//!
//! The lookup strictly precedes provisioning; within one `init` at most one
//! registration call is issued. Concurrent `init`/`logout`/`set_user` race
//! last-write-wins; the lock guards memory safety, not ordering.

use std::future::Future;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, error, instrument, warn};

use plumcot_core::{Email, ShopperIdentity, UserId};

use crate::error::GatewayError;
use crate::gateway::GatewayClient;
use crate::models::{NewUser, UserProfile};
use crate::storage::KeyValueStore;

/// Durable-store key holding the remembered user id.
pub(crate) const USER_ID_KEY: &str = "user_id";
/// Durable-store key holding the remembered display name.
pub(crate) const USERNAME_KEY: &str = "username";

/// Fixed password for provisioned guest accounts. A wire constant: guests
/// never see it, and promoting a guest to a real account goes through
/// registration anyway.
const GUEST_PASSWORD: &str = "Passw0rd!";
/// Placeholder contact fields for provisioned guest accounts.
const GUEST_PHONE: &str = "13800000000";
const GUEST_ADDRESS: &str = "1 Market Street";
const GUEST_FULL_NAME: &str = "Guest Shopper";

/// Where the bootstrapper reaches the backend's user directory.
///
/// [`GatewayClient`] is the production implementation; tests substitute a
/// stub so the state machine can be exercised without a network.
pub trait ShopperDirectory {
    /// Fetch a user record by id.
    fn fetch_user(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<UserProfile, GatewayError>> + Send;

    /// Register a new account.
    fn register_user(
        &self,
        user: &NewUser,
    ) -> impl Future<Output = Result<UserProfile, GatewayError>> + Send;
}

impl ShopperDirectory for GatewayClient {
    fn fetch_user(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<UserProfile, GatewayError>> + Send {
        self.user(user_id)
    }

    fn register_user(
        &self,
        user: &NewUser,
    ) -> impl Future<Output = Result<UserProfile, GatewayError>> + Send {
        Self::register_user(self, user)
    }
}

/// Resolution state of the shopper session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No identity in memory.
    Unresolved,
    /// A lookup or provisioning call is in flight.
    Resolving,
    /// An identity is installed.
    Resolved,
}

struct SessionInner {
    state: SessionState,
    identity: ShopperIdentity,
    profile: Option<UserProfile>,
}

/// The process-wide shopper identity slot and its bootstrap logic.
pub struct ShopperSession<D> {
    directory: D,
    store: Arc<dyn KeyValueStore>,
    inner: RwLock<SessionInner>,
}

impl<D> std::fmt::Debug for ShopperSession<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopperSession").finish_non_exhaustive()
    }
}

impl<D: ShopperDirectory> ShopperSession<D> {
    /// Create an unresolved session over a directory and a durable store.
    #[must_use]
    pub fn new(directory: D, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            directory,
            store,
            inner: RwLock::new(SessionInner {
                state: SessionState::Unresolved,
                identity: ShopperIdentity::anonymous(),
                profile: None,
            }),
        }
    }

    /// Current resolution state.
    pub async fn state(&self) -> SessionState {
        self.inner.read().await.state
    }

    /// Current identity (anonymous until resolved).
    pub async fn identity(&self) -> ShopperIdentity {
        self.inner.read().await.identity.clone()
    }

    /// Full profile of the resolved shopper, when one has been fetched.
    pub async fn profile(&self) -> Option<UserProfile> {
        self.inner.read().await.profile.clone()
    }

    /// Resolve the current shopper: adopt the remembered account if the
    /// backend still knows it, otherwise provision a fresh guest.
    ///
    /// Never fails: when even provisioning is impossible the session stays
    /// unresolved and the returned identity is anonymous - identity-scoped
    /// actions then fail with their own "not logged in" semantics.
    #[instrument(skip(self))]
    pub async fn init(&self) -> ShopperIdentity {
        self.inner.write().await.state = SessionState::Resolving;

        if let Some(raw) = self.store.get(USER_ID_KEY) {
            match raw.parse::<i64>() {
                Ok(id) => match self.directory.fetch_user(UserId::new(id)).await {
                    Ok(profile) => {
                        debug!(user_id = %profile.id, "Adopted remembered shopper");
                        return self.adopt(profile, false).await;
                    }
                    Err(error) => {
                        warn!(%error, user_id = id, "Remembered shopper is stale, discarding");
                        self.discard_remembered();
                    }
                },
                Err(_) => {
                    warn!(raw = %raw, "Remembered user id is malformed, discarding");
                    self.discard_remembered();
                }
            }
        }

        self.provision().await
    }

    /// Re-fetch the resolved shopper's record and update the display name
    /// and profile in place. A no-op without a resolved identity.
    ///
    /// # Errors
    ///
    /// Returns the lookup error; the previous identity state is untouched.
    pub async fn refresh_profile(&self) -> Result<(), GatewayError> {
        let Some(user_id) = self.inner.read().await.identity.id else {
            return Ok(());
        };

        let profile = self.directory.fetch_user(user_id).await?;
        let mut inner = self.inner.write().await;
        inner.identity.display_name = profile.username.clone();
        inner.profile = Some(profile);
        Ok(())
    }

    /// Install an identity explicitly (login/registration UI flow) and
    /// remember it durably.
    pub async fn set_user(&self, user_id: UserId, display_name: &str) {
        self.store.set(USER_ID_KEY, &user_id.to_string());
        if !display_name.is_empty() {
            self.store.set(USERNAME_KEY, display_name);
        }

        let mut inner = self.inner.write().await;
        inner.identity = ShopperIdentity::resolved(user_id, display_name.to_owned());
        inner.profile = None;
        inner.state = SessionState::Resolved;
    }

    /// Clear the identity and the durable record. The next `init` behaves
    /// like a first-ever visit. Local state only: the shopper API exposes
    /// no server-side invalidation endpoint.
    pub async fn logout(&self) {
        self.discard_remembered();

        let mut inner = self.inner.write().await;
        inner.state = SessionState::Unresolved;
        inner.identity = ShopperIdentity::anonymous();
        inner.profile = None;
    }

    fn discard_remembered(&self) {
        self.store.remove(USER_ID_KEY);
        self.store.remove(USERNAME_KEY);
    }

    /// Register a throwaway guest account with a timestamp-derived name and
    /// contact address, then adopt and remember it.
    async fn provision(&self) -> ShopperIdentity {
        let timestamp = Utc::now().timestamp_millis();
        let username = format!("guest_{timestamp}");
        let email = match Email::parse(&format!("guest_{timestamp}@example.com")) {
            Ok(email) => email,
            Err(error) => {
                error!(%error, "Synthesized guest email is invalid");
                return self.stay_unresolved().await;
            }
        };

        let request = NewUser {
            username: username.clone(),
            email,
            password: GUEST_PASSWORD.to_owned(),
            full_name: Some(GUEST_FULL_NAME.to_owned()),
            phone: Some(GUEST_PHONE.to_owned()),
            address: Some(GUEST_ADDRESS.to_owned()),
        };

        match self.directory.register_user(&request).await {
            Ok(profile) => {
                debug!(user_id = %profile.id, "Provisioned guest shopper");
                self.adopt(profile, true).await
            }
            Err(error) => {
                error!(%error, "Failed to provision guest shopper");
                self.stay_unresolved().await
            }
        }
    }

    async fn adopt(&self, profile: UserProfile, remember: bool) -> ShopperIdentity {
        if remember {
            self.store.set(USER_ID_KEY, &profile.id.to_string());
            self.store.set(USERNAME_KEY, &profile.username);
        }

        let identity = ShopperIdentity::resolved(profile.id, profile.username.clone());
        let mut inner = self.inner.write().await;
        inner.identity = identity.clone();
        inner.profile = Some(profile);
        inner.state = SessionState::Resolved;
        identity
    }

    async fn stay_unresolved(&self) -> ShopperIdentity {
        let mut inner = self.inner.write().await;
        inner.state = SessionState::Unresolved;
        inner.identity = ShopperIdentity::anonymous();
        inner.profile = None;
        inner.identity.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::NaiveDateTime;

    use crate::storage::MemoryStore;

    /// How the stub directory answers lookups.
    enum Lookup {
        Found,
        Missing,
    }

    struct StubDirectory {
        lookup: Lookup,
        register_ok: bool,
        fetch_calls: AtomicUsize,
        register_calls: AtomicUsize,
    }

    impl StubDirectory {
        fn new(lookup: Lookup, register_ok: bool) -> Self {
            Self {
                lookup,
                register_ok,
                fetch_calls: AtomicUsize::new(0),
                register_calls: AtomicUsize::new(0),
            }
        }

        fn fetch_calls(&self) -> usize {
            self.fetch_calls.load(Ordering::SeqCst)
        }

        fn register_calls(&self) -> usize {
            self.register_calls.load(Ordering::SeqCst)
        }
    }

    fn profile(id: i64, username: &str) -> UserProfile {
        UserProfile {
            id: UserId::new(id),
            username: username.to_owned(),
            email: Email::parse("guest@example.com").expect("valid email"),
            full_name: None,
            phone: None,
            address: None,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        }
    }

    impl ShopperDirectory for &StubDirectory {
        fn fetch_user(
            &self,
            user_id: UserId,
        ) -> impl Future<Output = Result<UserProfile, GatewayError>> + Send {
            self.fetch_calls.fetch_add(1, Ordering::SeqCst);
            let result = match self.lookup {
                Lookup::Found => Ok(profile(user_id.as_i64(), "stored-user")),
                Lookup::Missing => Err(GatewayError::NotFound("user not found".to_owned())),
            };
            async move { result }
        }

        fn register_user(
            &self,
            user: &NewUser,
        ) -> impl Future<Output = Result<UserProfile, GatewayError>> + Send {
            self.register_calls.fetch_add(1, Ordering::SeqCst);
            let result = if self.register_ok {
                Ok(profile(901, &user.username))
            } else {
                Err(GatewayError::Status {
                    status: 500,
                    body: "registration unavailable".to_owned(),
                })
            };
            async move { result }
        }
    }

    fn store() -> Arc<MemoryStore> {
        Arc::new(MemoryStore::new())
    }

    #[tokio::test]
    async fn test_first_visit_provisions_and_remembers() {
        let directory = StubDirectory::new(Lookup::Found, true);
        let store = store();
        let session =
            ShopperSession::new(&directory, Arc::clone(&store) as Arc<dyn KeyValueStore>);

        let identity = session.init().await;

        assert_eq!(directory.fetch_calls(), 0);
        assert_eq!(directory.register_calls(), 1);
        assert_eq!(identity.id, Some(UserId::new(901)));
        assert!(identity.display_name.starts_with("guest_"));
        assert_eq!(store.get(USER_ID_KEY), Some("901".to_owned()));
        assert_eq!(store.get(USERNAME_KEY), Some(identity.display_name.clone()));
        assert_eq!(session.state().await, SessionState::Resolved);
    }

    #[tokio::test]
    async fn test_valid_record_adopts_without_provisioning() {
        let directory = StubDirectory::new(Lookup::Found, true);
        let store = store();
        store.set(USER_ID_KEY, "42");
        store.set(USERNAME_KEY, "stored-user");
        let session =
            ShopperSession::new(&directory, Arc::clone(&store) as Arc<dyn KeyValueStore>);

        let identity = session.init().await;

        assert_eq!(directory.fetch_calls(), 1);
        assert_eq!(directory.register_calls(), 0);
        assert_eq!(identity.id, Some(UserId::new(42)));
        assert_eq!(identity.display_name, "stored-user");
        assert_eq!(session.state().await, SessionState::Resolved);
    }

    #[tokio::test]
    async fn test_stale_record_heals_by_provisioning_once() {
        let directory = StubDirectory::new(Lookup::Missing, true);
        let store = store();
        store.set(USER_ID_KEY, "42");
        store.set(USERNAME_KEY, "ghost");
        let session =
            ShopperSession::new(&directory, Arc::clone(&store) as Arc<dyn KeyValueStore>);

        let identity = session.init().await;

        assert_eq!(directory.fetch_calls(), 1);
        assert_eq!(directory.register_calls(), 1);
        assert_eq!(identity.id, Some(UserId::new(901)));
        // The stale record was replaced by the fresh one.
        assert_eq!(store.get(USER_ID_KEY), Some("901".to_owned()));
        assert_ne!(store.get(USERNAME_KEY), Some("ghost".to_owned()));
    }

    #[tokio::test]
    async fn test_malformed_record_is_discarded() {
        let directory = StubDirectory::new(Lookup::Found, true);
        let store = store();
        store.set(USER_ID_KEY, "not-a-number");
        let session =
            ShopperSession::new(&directory, Arc::clone(&store) as Arc<dyn KeyValueStore>);

        session.init().await;

        assert_eq!(directory.fetch_calls(), 0);
        assert_eq!(directory.register_calls(), 1);
    }

    #[tokio::test]
    async fn test_provisioning_failure_stays_unresolved() {
        let directory = StubDirectory::new(Lookup::Missing, false);
        let store = store();
        let session =
            ShopperSession::new(&directory, Arc::clone(&store) as Arc<dyn KeyValueStore>);

        let identity = session.init().await;

        assert_eq!(identity.id, None);
        assert_eq!(session.state().await, SessionState::Unresolved);
        assert_eq!(store.get(USER_ID_KEY), None);
    }

    #[tokio::test]
    async fn test_logout_then_init_behaves_like_first_visit() {
        let directory = StubDirectory::new(Lookup::Found, true);
        let store = store();
        store.set(USER_ID_KEY, "42");
        let session =
            ShopperSession::new(&directory, Arc::clone(&store) as Arc<dyn KeyValueStore>);

        session.init().await;
        session.logout().await;

        assert_eq!(session.state().await, SessionState::Unresolved);
        assert_eq!(store.get(USER_ID_KEY), None);
        assert_eq!(session.identity().await, ShopperIdentity::anonymous());

        // No durable record: init must go straight to provisioning.
        session.init().await;
        assert_eq!(directory.fetch_calls(), 1);
        assert_eq!(directory.register_calls(), 1);
    }

    #[tokio::test]
    async fn test_set_user_remembers_durably() {
        let directory = StubDirectory::new(Lookup::Found, true);
        let store = store();
        let session =
            ShopperSession::new(&directory, Arc::clone(&store) as Arc<dyn KeyValueStore>);

        session.set_user(UserId::new(7), "mara").await;

        assert_eq!(store.get(USER_ID_KEY), Some("7".to_owned()));
        assert_eq!(store.get(USERNAME_KEY), Some("mara".to_owned()));
        assert_eq!(session.state().await, SessionState::Resolved);
        assert_eq!(
            session.identity().await,
            ShopperIdentity::resolved(UserId::new(7), "mara".to_owned())
        );
    }

    #[tokio::test]
    async fn test_refresh_profile_updates_in_place() {
        let directory = StubDirectory::new(Lookup::Found, true);
        let session = ShopperSession::new(&directory, store() as Arc<dyn KeyValueStore>);

        session.set_user(UserId::new(42), "old-name").await;
        session.refresh_profile().await.expect("refresh succeeds");

        assert_eq!(session.identity().await.display_name, "stored-user");
        assert!(session.profile().await.is_some());
    }

    #[tokio::test]
    async fn test_refresh_profile_failure_preserves_state() {
        let directory = StubDirectory::new(Lookup::Missing, true);
        let session = ShopperSession::new(&directory, store() as Arc<dyn KeyValueStore>);

        session.set_user(UserId::new(42), "mara").await;
        let result = session.refresh_profile().await;

        assert!(result.is_err());
        assert_eq!(session.identity().await.display_name, "mara");
        assert_eq!(session.state().await, SessionState::Resolved);
    }

    #[tokio::test]
    async fn test_refresh_profile_is_noop_when_anonymous() {
        let directory = StubDirectory::new(Lookup::Found, true);
        let session = ShopperSession::new(&directory, store() as Arc<dyn KeyValueStore>);

        session.refresh_profile().await.expect("no-op succeeds");
        assert_eq!(directory.fetch_calls(), 0);
    }
}
