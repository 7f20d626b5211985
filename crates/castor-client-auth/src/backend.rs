use async_trait::async_trait;
use castor_client_core::ApiResult;

use crate::types::{Credentials, Session, SignUpInput};

/// Strategy seam between the session store and the credential authority.
///
/// The store owns session state, persistence, and listener notification;
/// implementations only authenticate and issue sessions.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// Authenticate with email and password, issuing a new session.
    async fn sign_in(&self, credentials: &Credentials) -> ApiResult<Session>;

    /// Register a new account, issuing a session for it.
    async fn sign_up(&self, input: &SignUpInput) -> ApiResult<Session>;

    /// Revoke the given access token upstream. Best-effort: the store signs
    /// out locally regardless of the outcome.
    async fn sign_out(&self, access_token: &str) -> ApiResult<()>;
}
