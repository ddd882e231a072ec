//! Depthforge is the workflow core of a 2D-to-3D model generation product.
//!
//! A user submission (text prompt or image) is validated by the
//! [`InputCollector`], handed to the [`WorkflowController`], generated by a
//! [`GenerationClient`] implementation (deterministic stub or HTTP backend),
//! and rendered by the presenter as a pure function of [`WorkflowState`].

pub mod client;
pub mod config;
pub mod error;
pub mod input;
pub mod logger;
pub mod models;
pub mod present;
pub mod workflow;

pub use client::{GenerationClient, RemoteClient, StubClient};
pub use config::{BackendConfig, Config};
pub use error::{ForgeError, Result, ValidationError};
pub use input::{InputCollector, InputMode, PreviewRegistry};
pub use models::{
    ArtifactRef, GenerationRequest, GenerationResult, WorkflowState, MAX_IMAGE_BYTES,
};
pub use present::{render, ExportFormat, Notification, ViewState};
pub use workflow::WorkflowController;
