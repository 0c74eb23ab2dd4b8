use crate::error::AuthError;
use crate::token_storage::{StoredSession, TokenStorage};
use souk_api::endpoints::users::User;
use souk_api::Client;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, error, info, warn};

/// Snapshot of the current session.
///
/// Fields are private and only mutated through [`SessionStore`] operations,
/// which keeps the invariant that the access and refresh tokens are both
/// present or both absent.
#[derive(Debug, Clone, Default)]
pub struct Session {
    user: Option<User>,
    access_token: Option<String>,
    refresh_token: Option<String>,
    admin: Option<bool>,
    initialized: bool,
    refreshing: bool,
}

impl Session {
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    pub fn is_admin(&self) -> bool {
        self.admin.unwrap_or(false)
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }
}

/// Single source of truth for "who is logged in and with what credentials".
///
/// Owns the API client and the durable token storage; route guards read the
/// session snapshot, API callers read the access token.
pub struct SessionStore {
    api: Client,
    storage: Box<dyn TokenStorage>,
    state: Mutex<Session>,
    refresh_gate: tokio::sync::Mutex<()>,
}

impl SessionStore {
    pub fn new(api: Client, storage: Box<dyn TokenStorage>) -> Self {
        Self {
            api,
            storage,
            state: Mutex::new(Session::default()),
            refresh_gate: tokio::sync::Mutex::new(()),
        }
    }

    pub fn api(&self) -> &Client {
        &self.api
    }

    pub fn session(&self) -> Session {
        self.lock_state().clone()
    }

    pub fn access_token(&self) -> Option<String> {
        self.lock_state().access_token.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.lock_state().is_authenticated()
    }

    pub fn is_admin(&self) -> bool {
        self.lock_state().is_admin()
    }

    /// Authenticate against the backend and persist the credentials. Any
    /// failure leaves the session fully cleared.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), AuthError> {
        match self.api.auth().login(email, password).await {
            Ok(response) => {
                let stored = StoredSession {
                    access_token: response.access.clone(),
                    refresh_token: response.refresh.clone(),
                    admin: response.admin,
                };
                {
                    let mut state = self.lock_state();
                    state.user = Some(response.user);
                    state.access_token = Some(response.access);
                    state.refresh_token = Some(response.refresh);
                    state.admin = Some(response.admin);
                    state.initialized = true;
                }
                if let Err(err) = self.storage.save(&stored) {
                    error!(error = %err, "failed to persist session after login");
                    self.clear_auth();
                    return Err(err);
                }
                info!(email, admin = stored.admin, "login successful");
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "login failed");
                self.clear_auth();
                Err(err.into())
            }
        }
    }

    /// Clear the session everywhere. Idempotent; storage failures are
    /// logged rather than propagated so logout never fails.
    pub fn logout(&self) {
        debug!("logging out");
        self.clear_auth();
    }

    /// Exchange the refresh token for a new access token.
    ///
    /// Refreshes are serialized through an async gate: a backend that
    /// rotates refresh tokens invalidates one that is submitted twice, so
    /// concurrent callers must never trigger a second network refresh. A
    /// caller that arrives mid-refresh waits on the gate and returns once
    /// the in-flight refresh has produced the new token.
    pub async fn refresh_access_token(&self) -> Result<(), AuthError> {
        let (refresh_token, access_before) = {
            let state = self.lock_state();
            (state.refresh_token.clone(), state.access_token.clone())
        };
        let Some(refresh_token) = refresh_token else {
            warn!("no refresh token available");
            self.logout();
            return Err(AuthError::NoRefreshToken);
        };

        let _gate = self.refresh_gate.lock().await;
        {
            let state = self.lock_state();
            // Someone else refreshed while we waited on the gate.
            if state.access_token != access_before {
                return Ok(());
            }
            // Logged out while we waited.
            if state.refresh_token.is_none() {
                return Err(AuthError::NoRefreshToken);
            }
        }

        self.lock_state().refreshing = true;
        debug!("refreshing access token");

        match self.api.auth().refresh_token(&refresh_token).await {
            Ok(response) => {
                let stored = {
                    let mut state = self.lock_state();
                    state.access_token = Some(response.access.clone());
                    state.refreshing = false;
                    StoredSession {
                        access_token: response.access,
                        refresh_token,
                        admin: state.admin.unwrap_or(false),
                    }
                };
                // The refresh token is retained; only the access token
                // changed, but the whole record is rewritten in one go.
                if let Err(err) = self.storage.save(&stored) {
                    warn!(error = %err, "failed to persist refreshed access token");
                }
                debug!("token refresh successful");
                Ok(())
            }
            Err(err) => {
                error!(error = %err, "token refresh failed");
                self.lock_state().refreshing = false;
                self.logout();
                Err(err.into())
            }
        }
    }

    /// Restore the session at startup from persisted tokens.
    ///
    /// Completes before any authorization decision should be made; inspect
    /// [`session`](SessionStore::session) afterwards for the outcome. A
    /// stale access token gets exactly one refresh and one profile
    /// re-fetch; if that still fails the session ends up anonymous.
    pub async fn init_auth(&self) {
        let stored = match self.storage.load() {
            Ok(stored) => stored,
            Err(err) => {
                warn!(error = %err, "failed to read persisted session");
                None
            }
        };

        let Some(stored) = stored else {
            self.lock_state().initialized = true;
            debug!("no persisted tokens, session is anonymous");
            return;
        };

        {
            let mut state = self.lock_state();
            state.access_token = Some(stored.access_token.clone());
            state.refresh_token = Some(stored.refresh_token.clone());
            state.admin = Some(stored.admin);
            state.initialized = true;
        }
        debug!("initializing session from persisted tokens");

        match self.api.users().current(&stored.access_token).await {
            Ok(user) => {
                self.lock_state().user = Some(user);
                debug!("session initialized");
            }
            Err(err) => {
                warn!(error = %err, "profile fetch failed, attempting token refresh");
                if self.refresh_access_token().await.is_err() {
                    // The failed refresh already cleared the session.
                    return;
                }
                let Some(token) = self.access_token() else {
                    return;
                };
                match self.api.users().current(&token).await {
                    Ok(user) => {
                        self.lock_state().user = Some(user);
                        debug!("session initialized after token refresh");
                    }
                    Err(err) => {
                        error!(error = %err, "profile fetch failed after token refresh");
                        self.logout();
                    }
                }
            }
        }
    }

    fn clear_auth(&self) {
        {
            let mut state = self.lock_state();
            state.user = None;
            state.access_token = None;
            state.refresh_token = None;
            state.admin = None;
            state.initialized = true;
            state.refreshing = false;
        }
        if let Err(err) = self.storage.clear() {
            warn!(error = %err, "failed to clear persisted session");
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, Session> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
