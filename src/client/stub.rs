use crate::{
    client::GenerationClient,
    models::{GenerationRequest, GenerationResult},
};
use async_trait::async_trait;
use std::time::Duration;

/// Artifact every stub generation resolves to.
pub const STUB_ARTIFACT_URL: &str = "https://example.com/model.obj";

/// Latency the stub simulates before resolving.
pub const STUB_DELAY: Duration = Duration::from_millis(3000);

/// Deterministic stand-in for a real generation backend: waits a fixed
/// delay, then resolves with a constant artifact URL regardless of the
/// request contents. Used for demos and as the test double behind the
/// [`GenerationClient`] contract.
#[derive(Debug, Clone)]
pub struct StubClient {
    delay: Duration,
    artifact_url: String,
}

impl Default for StubClient {
    fn default() -> Self {
        StubClient {
            delay: STUB_DELAY,
            artifact_url: STUB_ARTIFACT_URL.to_string(),
        }
    }
}

impl StubClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_artifact_url(mut self, url: impl Into<String>) -> Self {
        self.artifact_url = url.into();
        self
    }
}

#[async_trait]
impl GenerationClient for StubClient {
    async fn generate(&self, request: GenerationRequest) -> GenerationResult {
        log::info!(
            "Simulating {} generation for {} ms",
            request.kind(),
            self.delay.as_millis()
        );
        tokio::time::sleep(self.delay).await;
        GenerationResult::success(self.artifact_url.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ArtifactRef;

    #[tokio::test(start_paused = true)]
    async fn resolves_with_the_constant_artifact_after_the_fixed_delay() {
        let client = StubClient::new();
        let started = tokio::time::Instant::now();
        let result = client
            .generate(GenerationRequest::text("a small toy car").unwrap())
            .await;

        assert_eq!(started.elapsed(), STUB_DELAY);
        assert_eq!(
            result,
            GenerationResult::Success {
                artifact: ArtifactRef(STUB_ARTIFACT_URL.to_string())
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn ignores_request_contents() {
        let client = StubClient::new();
        let image = GenerationRequest::image(vec![1, 2, 3], "image/png").unwrap();
        let result = client.generate(image).await;
        assert_eq!(result, GenerationResult::success(STUB_ARTIFACT_URL));
    }

    #[tokio::test(start_paused = true)]
    async fn can_be_invoked_again_immediately_after_resolving() {
        let client = StubClient::new().with_delay(Duration::from_millis(10));
        let first = client
            .generate(GenerationRequest::text("first").unwrap())
            .await;
        let second = client
            .generate(GenerationRequest::text("second").unwrap())
            .await;
        assert!(first.is_success());
        assert!(second.is_success());
    }
}
