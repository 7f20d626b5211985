use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use castor_client_core::{ApiResult, HttpTransport, RequestSpec, TokenProvider};

use crate::backend::FunctionsBackend;
use crate::types::InvokeOptions;

/// Gateway posting jobs to the remote runtime at `/functions/v1/{name}`.
#[derive(Clone)]
pub struct RestFunctionsGateway {
    transport: HttpTransport,
    tokens: Arc<dyn TokenProvider>,
}

impl RestFunctionsGateway {
    pub fn new(transport: HttpTransport, tokens: Arc<dyn TokenProvider>) -> Self {
        Self { transport, tokens }
    }
}

#[async_trait]
impl FunctionsBackend for RestFunctionsGateway {
    async fn invoke(&self, name: &str, options: InvokeOptions) -> ApiResult<JsonValue> {
        let mut spec = RequestSpec::new(options.method.into(), format!("/functions/v1/{}", name))
            .bearer(self.transport.bearer_or_key(self.tokens.as_ref()))
            .fallback(format!("Function {} failed", name));

        if let Some(body) = options.body {
            spec = spec.json(body);
        }
        for (header, value) in options.headers {
            spec = spec.header(header, value);
        }

        self.transport.send(spec).await
    }
}
