use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Canonical failure shape shared by every component of the client.
///
/// Mock and remote backends alike terminate their failure paths in this
/// shape, so callers can display `message` and match on `code` without
/// knowing which backend is active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl ApiError {
    /// Create an error with just a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
            status: None,
        }
    }

    /// Attach a machine-readable code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Attach an HTTP-like status.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Normalize an arbitrary failure payload into an [`ApiError`].
    ///
    /// Strings become the message verbatim; objects contribute their
    /// `message`, `code`, and `status` fields; anything else (including
    /// `null`) falls back to the supplied message.
    pub fn normalize(payload: &JsonValue, fallback: &str) -> Self {
        match payload {
            JsonValue::String(s) => Self::new(s.clone()),
            JsonValue::Object(obj) => {
                let message = obj
                    .get("message")
                    .and_then(JsonValue::as_str)
                    .unwrap_or(fallback)
                    .to_string();
                let code = obj
                    .get("code")
                    .and_then(JsonValue::as_str)
                    .map(str::to_string);
                let status = obj
                    .get("status")
                    .and_then(JsonValue::as_u64)
                    .and_then(|s| u16::try_from(s).ok());
                Self {
                    message,
                    code,
                    status,
                }
            }
            _ => Self::new(fallback),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// Result alias carrying the normalized error — the Rust rendering of the
/// `{data, error}` pair returned by every operation.
pub type ApiResult<T> = Result<T, ApiError>;

/// Known error codes surfaced by the client.
///
/// The mock and remote namespaces are intentionally preserved as-is;
/// callers match on these constants rather than literal strings.
pub mod codes {
    /// Terminal `single()` found no row (PostgREST's zero-row code).
    pub const ROW_NOT_FOUND: &str = "PGRST116";
    /// Credentials did not match a registered account.
    pub const INVALID_CREDENTIALS: &str = "auth.invalid_credentials";
    /// Sign-up attempted with an email that is already registered.
    pub const USER_EXISTS: &str = "auth.user_exists";
    /// An account authenticated but has no profile record.
    pub const PROFILE_MISSING: &str = "profile.missing";
    /// A named RPC lookup matched nothing.
    pub const NOT_FOUND: &str = "not_found";
    /// The mock backend has no handler for the named RPC or job.
    pub const NOT_IMPLEMENTED: &str = "not_implemented";
}
