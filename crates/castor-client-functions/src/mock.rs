use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Value as JsonValue};
use tracing::debug;

use castor_client_core::{codes, ApiError, ApiResult};

use crate::backend::FunctionsBackend;
use crate::types::InvokeOptions;

/// Jobs the mock gateway recognizes.
///
/// These are the external collaborators of the console: document intake and
/// splitting, analysis, certificate issuance, data import, the scheduled
/// renewal/dunning runs, outbound messaging, and the payment webhook.
pub const KNOWN_JOBS: &[&str] = &[
    "process-upload",
    "pdf-split",
    "analysis-run",
    "issue-certificate",
    "import-seed",
    "renewals-run",
    "dunning-run",
    "graph-send",
    "stripe-webhook",
];

/// Offline gateway: acknowledges known jobs as queued without running them.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockFunctionsGateway;

impl MockFunctionsGateway {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FunctionsBackend for MockFunctionsGateway {
    async fn invoke(&self, name: &str, options: InvokeOptions) -> ApiResult<JsonValue> {
        if !KNOWN_JOBS.contains(&name) {
            return Err(
                ApiError::new(format!("Function '{}' not implemented", name))
                    .with_code(codes::NOT_IMPLEMENTED),
            );
        }

        debug!(function = name, "Queueing mock job");
        Ok(json!({
            "status": "queued",
            "function": name,
            "received_at": Utc::now().to_rfc3339(),
            "request": options.body.unwrap_or(JsonValue::Null),
        }))
    }
}
