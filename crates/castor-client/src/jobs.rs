use serde_json::Value as JsonValue;

use castor_client_core::ApiResult;
use castor_client_functions::{HttpMethod, InvokeOptions};

use crate::client::CastorClient;

/// Typed wrappers over the external job catalogue.
///
/// Each method targets one named processing job; the payload is job-specific
/// and opaque to the client. The scheduled runs (`renewals_run`,
/// `dunning_run`) are triggered with GET and no body.
pub struct JobsApi<'a> {
    client: &'a CastorClient,
}

impl<'a> JobsApi<'a> {
    pub(crate) fn new(client: &'a CastorClient) -> Self {
        Self { client }
    }

    async fn post(&self, name: &str, input: JsonValue) -> ApiResult<JsonValue> {
        self.client
            .invoke(name, InvokeOptions::new().body(input))
            .await
    }

    async fn get(&self, name: &str) -> ApiResult<JsonValue> {
        self.client
            .invoke(name, InvokeOptions::new().method(HttpMethod::Get))
            .await
    }

    /// Run OCR/intake over a submitted upload.
    pub async fn process_upload(&self, input: JsonValue) -> ApiResult<JsonValue> {
        self.post("process-upload", input).await
    }

    /// Plan a page-range split of an uploaded document.
    pub async fn pdf_split(&self, input: JsonValue) -> ApiResult<JsonValue> {
        self.post("pdf-split", input).await
    }

    /// Kick off an automated analysis pass over an audit's evidence.
    pub async fn analysis_run(&self, input: JsonValue) -> ApiResult<JsonValue> {
        self.post("analysis-run", input).await
    }

    /// Issue a certificate for an approved audit.
    pub async fn issue_certificate(&self, input: JsonValue) -> ApiResult<JsonValue> {
        self.post("issue-certificate", input).await
    }

    /// Bulk-import seed data.
    pub async fn import_seed(&self, input: JsonValue) -> ApiResult<JsonValue> {
        self.post("import-seed", input).await
    }

    /// Send an outbound message through the mail integration.
    pub async fn graph_send(&self, input: JsonValue) -> ApiResult<JsonValue> {
        self.post("graph-send", input).await
    }

    /// Deliver a payment-provider webhook payload.
    pub async fn stripe_webhook(&self, input: JsonValue) -> ApiResult<JsonValue> {
        self.post("stripe-webhook", input).await
    }

    /// Trigger the scheduled renewal-reminder run.
    pub async fn renewals_run(&self) -> ApiResult<JsonValue> {
        self.get("renewals-run").await
    }

    /// Trigger the scheduled dunning run over overdue payments.
    pub async fn dunning_run(&self) -> ApiResult<JsonValue> {
        self.get("dunning-run").await
    }
}
