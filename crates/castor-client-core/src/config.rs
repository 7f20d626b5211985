/// Configuration for the Castor data-access client.
///
/// When both `base_url` and `access_key` are present the factory wires the
/// remote HTTP backends; otherwise it falls back to the in-memory mock
/// backends for offline development.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// Project base URL (e.g. `https://castor.example.co`).
    pub base_url: Option<String>,
    /// Project access key, sent as the `apikey` header on every request.
    pub access_key: Option<String>,
}

impl ClientConfig {
    /// Create an empty configuration (resolves to the mock backends).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the project base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the project access key.
    pub fn access_key(mut self, key: impl Into<String>) -> Self {
        self.access_key = Some(key.into());
        self
    }

    /// Read configuration from `CASTOR_BASE_URL` and `CASTOR_ACCESS_KEY`.
    ///
    /// Missing or empty variables leave the corresponding field unset.
    pub fn from_env() -> Self {
        let read = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());
        Self {
            base_url: read("CASTOR_BASE_URL"),
            access_key: read("CASTOR_ACCESS_KEY"),
        }
    }

    /// Whether this configuration selects the remote backends.
    pub fn is_remote(&self) -> bool {
        self.base_url.is_some() && self.access_key.is_some()
    }

    /// Borrow the configured remote pair, if complete.
    pub fn remote(&self) -> Option<(&str, &str)> {
        match (self.base_url.as_deref(), self.access_key.as_deref()) {
            (Some(url), Some(key)) => Some((url, key)),
            _ => None,
        }
    }
}
