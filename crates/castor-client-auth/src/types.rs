use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// An authenticated session issued on sign-in or sign-up.
///
/// Sessions are immutable once issued: the store replaces them wholesale and
/// never mutates one in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    pub token_type: String,
    pub user: UserIdentity,
}

/// The identity carried inside a session.
///
/// Beyond the fixed `id` and `email`, backends may attach arbitrary extra
/// fields (role, org membership); these round-trip through `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: String,
    pub email: String,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl UserIdentity {
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            extra: Map::new(),
        }
    }

    /// Attach an extra identity field.
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Session lifecycle events delivered to auth-state listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthChangeEvent {
    SignedIn,
    SignedOut,
    TokenRefreshed,
    UserUpdated,
}

impl fmt::Display for AuthChangeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SignedIn => write!(f, "SIGNED_IN"),
            Self::SignedOut => write!(f, "SIGNED_OUT"),
            Self::TokenRefreshed => write!(f, "TOKEN_REFRESHED"),
            Self::UserUpdated => write!(f, "USER_UPDATED"),
        }
    }
}

/// Email/password credentials for sign-in.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Registration input for sign-up.
#[derive(Debug, Clone, Serialize)]
pub struct SignUpInput {
    pub email: String,
    pub password: String,
    /// Optional extra registration fields (role, org, names).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<JsonValue>,
}

impl SignUpInput {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            data: None,
        }
    }

    pub fn data(mut self, data: JsonValue) -> Self {
        self.data = Some(data);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn auth_change_event_display() {
        assert_eq!(AuthChangeEvent::SignedIn.to_string(), "SIGNED_IN");
        assert_eq!(AuthChangeEvent::SignedOut.to_string(), "SIGNED_OUT");
        assert_eq!(AuthChangeEvent::TokenRefreshed.to_string(), "TOKEN_REFRESHED");
        assert_eq!(AuthChangeEvent::UserUpdated.to_string(), "USER_UPDATED");
    }

    #[test]
    fn session_serde_roundtrip_with_extra_fields() {
        let json = json!({
            "access_token": "tok",
            "refresh_token": "ref",
            "expires_in": 3600,
            "token_type": "bearer",
            "user": {"id": "user-1", "email": "a@castor.example", "role": "Admin"}
        });
        let session: Session = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(session.user.extra.get("role"), Some(&json!("Admin")));
        assert_eq!(serde_json::to_value(&session).unwrap(), json);
    }

    #[test]
    fn sign_up_input_serializes_without_null_data() {
        let input = SignUpInput::new("a@x.example", "Secret123");
        let json = serde_json::to_value(&input).unwrap();
        assert!(json.get("data").is_none());
    }
}
