use std::env;

/// Connection settings for a real generation backend.
#[derive(Debug, Clone, Default)]
pub struct BackendConfig {
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl BackendConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let endpoint = env::var("DEPTHFORGE_BACKEND_URL").ok();
        let api_key = env::var("DEPTHFORGE_API_KEY").ok();
        let timeout_secs = env::var("DEPTHFORGE_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok());

        BackendConfig {
            endpoint,
            api_key,
            timeout_secs,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }
}

/// Top-level configuration. A populated `backend` selects the HTTP
/// generation client; otherwise the deterministic stub is used.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub backend: Option<BackendConfig>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let backend = BackendConfig::from_env();
        Config {
            backend: backend.endpoint.is_some().then_some(backend),
        }
    }

    pub fn with_backend(mut self, backend: BackendConfig) -> Self {
        self.backend = Some(backend);
        self
    }
}
