use crate::{
    client::GenerationClient,
    config::BackendConfig,
    error::{ForgeError, Result},
    models::{GenerationRequest, GenerationResult},
};
use async_trait::async_trait;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// HTTP-backed generation client. Posts the serialized request to the
/// configured endpoint and maps every failure mode (bad input, network
/// error, upstream processing error, malformed response) to a distinct
/// `Failure` reason instead of propagating it past `generate`.
#[derive(Clone)]
pub struct RemoteClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl RemoteClient {
    pub fn new(config: BackendConfig) -> Result<Self> {
        let endpoint = config
            .endpoint
            .ok_or_else(|| ForgeError::Config("Backend endpoint required".into()))?;

        let timeout = Duration::from_secs(config.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS));
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ForgeError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            endpoint,
            api_key: config.api_key,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl GenerationClient for RemoteClient {
    async fn generate(&self, request: GenerationRequest) -> GenerationResult {
        let payload = match serde_json::to_value(&request) {
            Ok(payload) => payload,
            Err(e) => {
                log::error!("Failed to serialize generation request: {}", e);
                return GenerationResult::failure(format!("Invalid input: {}", e));
            }
        };

        log::info!("Requesting {} generation from {}", request.kind(), self.endpoint);

        let mut http_request = self.http.post(&self.endpoint).json(&payload);
        if let Some(api_key) = &self.api_key {
            http_request = http_request.bearer_auth(api_key);
        }

        let response = match http_request.send().await {
            Ok(response) => response,
            Err(e) => {
                log::error!("Generation request failed to reach the backend: {}", e);
                return GenerationResult::failure(format!("Network error: {}", e));
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!("Generation backend returned {}: {}", status, body);
            return GenerationResult::failure(format!(
                "Upstream processing error (HTTP {})",
                status.as_u16()
            ));
        }

        // The backend response deserializes straight into the result type:
        // {"status":"success","modelUrl":...} or {"status":"error","error":...}.
        match response.json::<GenerationResult>().await {
            Ok(result) => {
                if let GenerationResult::Failure { reason } = &result {
                    log::warn!("Generation backend reported failure: {}", reason);
                }
                result
            }
            Err(e) => {
                log::error!("Malformed response from generation backend: {}", e);
                GenerationResult::failure(format!("Malformed backend response: {}", e))
            }
        }
    }
}
