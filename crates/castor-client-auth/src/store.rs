use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock, Weak};

use tracing::{debug, warn};

use castor_client_core::{ApiResult, TokenProvider};

use crate::backend::AuthBackend;
use crate::storage::SessionStorage;
use crate::types::{AuthChangeEvent, Credentials, Session, SignUpInput};

/// Callback invoked on every session transition.
pub type AuthListener = Box<dyn Fn(AuthChangeEvent, Option<&Session>) + Send + Sync>;

type ListenerList = Mutex<Vec<(u64, AuthListener)>>;

/// A session transition computed by an operation, before any side effect.
///
/// Keeping the next-state/event computation separate from persistence and
/// notification lets the lifecycle be tested without a storage medium.
#[derive(Debug, Clone, PartialEq)]
enum Transition {
    Establish(Session),
    Clear,
}

impl Transition {
    fn event(&self) -> AuthChangeEvent {
        match self {
            Self::Establish(_) => AuthChangeEvent::SignedIn,
            Self::Clear => AuthChangeEvent::SignedOut,
        }
    }

    fn session(&self) -> Option<&Session> {
        match self {
            Self::Establish(session) => Some(session),
            Self::Clear => None,
        }
    }
}

/// Single source of truth for "who is logged in".
///
/// The session is one shared cell, replaced wholesale on every transition;
/// readers always observe the most recently committed value. Concurrent
/// sign-in attempts resolve last-write-wins with no ordering guarantee,
/// which is acceptable for a single-user client.
pub struct SessionStore {
    backend: Box<dyn AuthBackend>,
    storage: Box<dyn SessionStorage>,
    storage_key: String,
    session: RwLock<Option<Session>>,
    listeners: Arc<ListenerList>,
    next_listener: AtomicU64,
}

impl SessionStore {
    /// Create a store, restoring any persisted session from storage.
    ///
    /// Malformed or missing persisted data yields no session, not an error.
    pub fn new(
        backend: Box<dyn AuthBackend>,
        storage: Box<dyn SessionStorage>,
        storage_key: impl Into<String>,
    ) -> Self {
        let storage_key = storage_key.into();
        let session = match storage.load(&storage_key) {
            Some(raw) => match serde_json::from_str::<Session>(&raw) {
                Ok(session) => Some(session),
                Err(err) => {
                    warn!(key = %storage_key, error = %err, "Failed to restore session");
                    None
                }
            },
            None => None,
        };

        Self {
            backend,
            storage,
            storage_key,
            session: RwLock::new(session),
            listeners: Arc::new(Mutex::new(Vec::new())),
            next_listener: AtomicU64::new(0),
        }
    }

    /// Snapshot of the current session.
    pub fn session(&self) -> Option<Session> {
        self.session
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Authenticate with email and password.
    ///
    /// On failure the prior session (if any) is left untouched.
    pub async fn sign_in_with_password(&self, credentials: Credentials) -> ApiResult<Session> {
        let session = self.backend.sign_in(&credentials).await?;
        self.commit(Transition::Establish(session.clone()));
        Ok(session)
    }

    /// Register a new account and sign it in.
    pub async fn sign_up(&self, input: SignUpInput) -> ApiResult<Session> {
        let session = self.backend.sign_up(&input).await?;
        self.commit(Transition::Establish(session.clone()));
        Ok(session)
    }

    /// Sign out, clearing persisted state and notifying listeners.
    ///
    /// The backend revocation is best-effort: a failed upstream call never
    /// prevents the local sign-out.
    pub async fn sign_out(&self) -> ApiResult<()> {
        if let Some(token) = self.access_token_snapshot() {
            if let Err(err) = self.backend.sign_out(&token).await {
                debug!(error = %err, "Ignoring sign-out revocation failure");
            }
        }
        self.commit(Transition::Clear);
        Ok(())
    }

    /// Register a listener for session transitions.
    ///
    /// Listeners are invoked synchronously, in registration order, on every
    /// transition. The returned handle unsubscribes when consumed.
    pub fn on_auth_state_change(
        &self,
        listener: impl Fn(AuthChangeEvent, Option<&Session>) + Send + Sync + 'static,
    ) -> AuthSubscription {
        let id = self.next_listener.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut listeners) = self.listeners.lock() {
            listeners.push((id, Box::new(listener)));
        }
        AuthSubscription {
            id,
            listeners: Arc::downgrade(&self.listeners),
        }
    }

    fn access_token_snapshot(&self) -> Option<String> {
        self.session
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .as_ref()
            .map(|s| s.access_token.clone())
    }

    /// Apply a transition: persist, swap the session cell, notify listeners.
    fn commit(&self, transition: Transition) {
        match transition.session() {
            Some(session) => match serde_json::to_string(session) {
                Ok(raw) => self.storage.store(&self.storage_key, &raw),
                Err(err) => {
                    warn!(key = %self.storage_key, error = %err, "Failed to persist session")
                }
            },
            None => self.storage.remove(&self.storage_key),
        }

        {
            let mut cell = self
                .session
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            *cell = transition.session().cloned();
        }

        let event = transition.event();
        if let Ok(listeners) = self.listeners.lock() {
            for (_, listener) in listeners.iter() {
                listener(event, transition.session());
            }
        }
    }
}

impl TokenProvider for SessionStore {
    fn access_token(&self) -> Option<String> {
        self.access_token_snapshot()
    }
}

/// Handle returned by [`SessionStore::on_auth_state_change`].
///
/// Dropping the handle keeps the listener registered; call
/// [`AuthSubscription::unsubscribe`] to remove it.
pub struct AuthSubscription {
    id: u64,
    listeners: Weak<ListenerList>,
}

impl AuthSubscription {
    /// Remove the listener this handle refers to.
    pub fn unsubscribe(self) {
        if let Some(listeners) = self.listeners.upgrade() {
            if let Ok(mut listeners) = listeners.lock() {
                listeners.retain(|(id, _)| *id != self.id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UserIdentity;

    fn session(token: &str) -> Session {
        Session {
            access_token: token.to_string(),
            refresh_token: format!("refresh-{}", token),
            expires_in: 3600,
            token_type: "bearer".to_string(),
            user: UserIdentity::new("user-1", "a@castor.example"),
        }
    }

    #[test]
    fn establish_transition_is_signed_in() {
        let transition = Transition::Establish(session("t"));
        assert_eq!(transition.event(), AuthChangeEvent::SignedIn);
        assert!(transition.session().is_some());
    }

    #[test]
    fn clear_transition_is_signed_out() {
        let transition = Transition::Clear;
        assert_eq!(transition.event(), AuthChangeEvent::SignedOut);
        assert!(transition.session().is_none());
    }
}
