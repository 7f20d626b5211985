use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde_json::Value as JsonValue;
use tracing::debug;
use url::Url;

use crate::error::{ApiError, ApiResult};
use crate::token::TokenProvider;

/// Shared HTTP transport for the remote backends.
///
/// Owns the `reqwest` client plus the project base URL and access key, and
/// applies the common response handling: bodies are read as text and parsed
/// as JSON when non-empty, non-2xx payloads are normalized into [`ApiError`]
/// with a caller-supplied fallback message, and network-level failures become
/// `"Network request failed"`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    base_url: Url,
    access_key: String,
}

/// One request against the remote project.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    method: Method,
    path: String,
    bearer: Option<String>,
    body: Option<JsonValue>,
    headers: Vec<(String, String)>,
    fallback: Option<String>,
}

impl RequestSpec {
    /// Create a request for `path` (which may carry a query string, e.g.
    /// `/auth/v1/token?grant_type=password`).
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            bearer: None,
            body: None,
            headers: Vec::new(),
            fallback: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Send `Authorization: Bearer {token}`.
    pub fn bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    /// Attach a JSON body (also sets `Content-Type: application/json`).
    pub fn json(mut self, body: JsonValue) -> Self {
        self.body = Some(body);
        self
    }

    /// Add an extra header, overriding any default of the same name.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Fallback error message for non-2xx responses whose bodies don't carry
    /// one. Defaults to `"Request failed with status {status}"`.
    pub fn fallback(mut self, message: impl Into<String>) -> Self {
        self.fallback = Some(message.into());
        self
    }
}

impl HttpTransport {
    /// Create a transport for the given project URL and access key.
    pub fn new(base_url: &str, access_key: &str) -> ApiResult<Self> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| ApiError::new(format!("Invalid base URL: {}", e)))?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            "apikey",
            HeaderValue::from_str(access_key)
                .map_err(|e| ApiError::new(format!("Invalid access key header: {}", e)))?,
        );

        let http = reqwest::Client::builder()
            .default_headers(default_headers)
            .build()
            .map_err(|e| ApiError::new(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url,
            access_key: access_key.to_string(),
        })
    }

    /// The project base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The project access key.
    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    /// The bearer token for data requests: the current session token when one
    /// exists, else the access key itself.
    pub fn bearer_or_key(&self, tokens: &dyn TokenProvider) -> String {
        tokens
            .access_token()
            .unwrap_or_else(|| self.access_key.clone())
    }

    /// Resolve a path (with optional query string) against the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    /// Execute a request and return the parsed JSON payload.
    ///
    /// An empty 2xx body yields `JsonValue::Null`.
    pub async fn send(&self, spec: RequestSpec) -> ApiResult<JsonValue> {
        let url = self.endpoint(&spec.path);
        debug!(method = %spec.method, url = %url, "Sending request");

        let mut request = self.http.request(spec.method, &url);

        if let Some(token) = &spec.bearer {
            request = request.bearer_auth(token);
        }
        if let Some(body) = &spec.body {
            request = request
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .body(serde_json::to_vec(body)?);
        }
        for (name, value) in &spec.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ApiError::new(format!("Invalid header name '{}': {}", name, e)))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|e| ApiError::new(format!("Invalid header value for '{}': {}", name, e)))?;
            request = request.header(header_name, header_value);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                debug!(error = %err, "Network request failed");
                return Err(ApiError::new("Network request failed"));
            }
        };

        let status = response.status().as_u16();
        let text = match response.text().await {
            Ok(text) => text,
            Err(err) => {
                debug!(error = %err, "Network request failed");
                return Err(ApiError::new("Network request failed"));
            }
        };
        let payload = if text.is_empty() {
            JsonValue::Null
        } else {
            serde_json::from_str(&text).unwrap_or(JsonValue::String(text))
        };

        if !(200..300).contains(&status) {
            let fallback = spec
                .fallback
                .unwrap_or_else(|| format!("Request failed with status {}", status));
            return Err(ApiError::normalize(&payload, &fallback));
        }

        Ok(payload)
    }
}
