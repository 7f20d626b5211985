use async_trait::async_trait;
use serde_json::Value as JsonValue;

use castor_client_core::ApiResult;

use crate::types::InvokeOptions;

/// Executes a named external processing job, independent of table semantics.
#[async_trait]
pub trait FunctionsBackend: Send + Sync {
    /// Invoke `name` with the given options and return its acknowledgement
    /// payload.
    async fn invoke(&self, name: &str, options: InvokeOptions) -> ApiResult<JsonValue>;
}
