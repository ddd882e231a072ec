pub mod remote;
pub mod stub;

use crate::{
    config::Config,
    error::Result,
    models::{GenerationRequest, GenerationResult},
};
use async_trait::async_trait;
use std::sync::Arc;

pub use remote::RemoteClient;
pub use stub::StubClient;

/// Capability seam for producing a 3D artifact from a request.
///
/// `generate` must resolve exactly once per call with a terminal
/// [`GenerationResult`]: failures are the `Failure` variant, never a panic
/// or an `Err` past this boundary. An implementation must tolerate being
/// invoked again immediately after a prior call resolves.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    async fn generate(&self, request: GenerationRequest) -> GenerationResult;
}

/// Picks the client implementation by configuration: a configured backend
/// endpoint selects the HTTP client, otherwise the deterministic stub.
pub fn from_config(config: &Config) -> Result<Arc<dyn GenerationClient>> {
    match &config.backend {
        Some(backend) => {
            let client = RemoteClient::new(backend.clone())?;
            log::info!("Using remote generation backend: {}", client.endpoint());
            Ok(Arc::new(client))
        }
        None => {
            log::info!("No backend configured, using the stub generation client");
            Ok(Arc::new(StubClient::default()))
        }
    }
}
