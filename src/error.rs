use thiserror::Error;

use crate::models::MAX_IMAGE_BYTES;

/// Errors raised at the input boundary, before a request is ever built.
/// These never reach a [`GenerationClient`](crate::client::GenerationClient).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("prompt is empty after trimming")]
    EmptyPrompt,
    #[error("please enter a text prompt")]
    MissingPrompt,
    #[error("please upload an image")]
    MissingImage,
    #[error("expected an image file, got media type '{found}'")]
    UnsupportedMediaType { found: String },
    #[error("image is {size} bytes, the limit is {MAX_IMAGE_BYTES} bytes")]
    ImageTooLarge { size: u64 },
}

#[derive(Debug, Error)]
pub enum ForgeError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Logger error: {0}")]
    Logger(String),
}

pub type Result<T> = std::result::Result<T, ForgeError>;
