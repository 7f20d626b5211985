use async_trait::async_trait;
use serde_json::json;

use castor_client_core::{ApiError, ApiResult, HttpTransport, RequestSpec};

use crate::backend::AuthBackend;
use crate::types::{Credentials, Session, SignUpInput};

/// Credential authority speaking the remote auth API at `/auth/v1`.
#[derive(Debug, Clone)]
pub struct RestAuthBackend {
    transport: HttpTransport,
}

impl RestAuthBackend {
    pub fn new(transport: HttpTransport) -> Self {
        Self { transport }
    }

    fn parse_session(payload: serde_json::Value) -> ApiResult<Session> {
        serde_json::from_value(payload)
            .map_err(|e| ApiError::new(format!("Malformed session payload: {}", e)))
    }
}

#[async_trait]
impl AuthBackend for RestAuthBackend {
    async fn sign_in(&self, credentials: &Credentials) -> ApiResult<Session> {
        let payload = self
            .transport
            .send(
                RequestSpec::post("/auth/v1/token?grant_type=password").json(json!({
                    "email": credentials.email,
                    "password": credentials.password,
                })),
            )
            .await?;
        Self::parse_session(payload)
    }

    async fn sign_up(&self, input: &SignUpInput) -> ApiResult<Session> {
        let mut body = json!({
            "email": input.email,
            "password": input.password,
        });
        if let Some(data) = &input.data {
            body["data"] = data.clone();
        }

        let payload = self
            .transport
            .send(RequestSpec::post("/auth/v1/signup").json(body))
            .await?;
        Self::parse_session(payload)
    }

    async fn sign_out(&self, access_token: &str) -> ApiResult<()> {
        self.transport
            .send(RequestSpec::post("/auth/v1/logout").bearer(access_token))
            .await
            .map(|_| ())
    }
}
