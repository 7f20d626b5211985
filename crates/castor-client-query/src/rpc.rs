use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value as JsonValue};
use tracing::debug;

use castor_client_core::{codes, ApiError, ApiResult, HttpTransport, RequestSpec, TokenProvider};

/// Executes a single named server-side procedure.
#[async_trait]
pub trait RpcBackend: Send + Sync {
    /// Call `function` with `args`, returning one result value.
    async fn call(&self, function: &str, args: JsonValue) -> ApiResult<JsonValue>;
}

/// Mock procedure whitelist.
///
/// Only `get_certificate_by_token` is implemented: it resolves a verification
/// token against the seeded result map. Any other name reports a capability
/// gap, not a user error.
pub struct MockRpc {
    verification_results: HashMap<String, JsonValue>,
}

impl MockRpc {
    pub fn new(verification_results: HashMap<String, JsonValue>) -> Self {
        Self {
            verification_results,
        }
    }
}

#[async_trait]
impl RpcBackend for MockRpc {
    async fn call(&self, function: &str, args: JsonValue) -> ApiResult<JsonValue> {
        match function {
            "get_certificate_by_token" => {
                let result = args
                    .get("token")
                    .and_then(JsonValue::as_str)
                    .and_then(|token| self.verification_results.get(token));
                match result {
                    Some(certificate) => Ok(certificate.clone()),
                    None => Err(ApiError::new("Certificate not found")
                        .with_code(codes::NOT_FOUND)
                        .with_status(404)),
                }
            }
            other => Err(ApiError::new(format!(
                "RPC '{}' not implemented in mock client",
                other
            ))
            .with_code(codes::NOT_IMPLEMENTED)),
        }
    }
}

/// RPC invoker against the remote REST API at `/rest/v1/rpc/{fn}`.
#[derive(Clone)]
pub struct RestRpc {
    transport: HttpTransport,
    tokens: Arc<dyn TokenProvider>,
}

impl RestRpc {
    pub fn new(transport: HttpTransport, tokens: Arc<dyn TokenProvider>) -> Self {
        Self { transport, tokens }
    }
}

#[async_trait]
impl RpcBackend for RestRpc {
    async fn call(&self, function: &str, args: JsonValue) -> ApiResult<JsonValue> {
        debug!(function, "Calling remote procedure");
        let body = if args.is_null() { json!({}) } else { args };
        self.transport
            .send(
                RequestSpec::post(format!("/rest/v1/rpc/{}", function))
                    .bearer(self.transport.bearer_or_key(self.tokens.as_ref()))
                    .json(body)
                    .fallback(format!("RPC {} failed", function)),
            )
            .await
    }
}
