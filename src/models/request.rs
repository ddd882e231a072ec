use base64::Engine;
use serde::{Serialize, Serializer};

use crate::error::ValidationError;

/// Upper bound for uploaded image payloads (5 MiB).
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

/// One user submission. Built only through the validating constructors, so
/// every live value satisfies the input constraints: a text prompt is
/// non-empty after trimming, an image payload is at most [`MAX_IMAGE_BYTES`]
/// bytes with an `image/*` media type.
///
/// Serializes to the backend wire shape:
/// `{"kind":"text","prompt":...}` or
/// `{"kind":"image","data":<base64>,"mediaType":...}`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GenerationRequest {
    Text {
        prompt: String,
    },
    Image {
        #[serde(serialize_with = "as_base64")]
        data: Vec<u8>,
        #[serde(rename = "mediaType")]
        media_type: String,
    },
}

fn as_base64<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&base64::engine::general_purpose::STANDARD.encode(data))
}

impl GenerationRequest {
    /// Builds a text request from a raw prompt, trimming surrounding
    /// whitespace first.
    pub fn text(prompt: &str) -> Result<Self, ValidationError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(ValidationError::EmptyPrompt);
        }
        Ok(GenerationRequest::Text {
            prompt: prompt.to_string(),
        })
    }

    /// Builds an image request, enforcing the media-type prefix and size cap.
    pub fn image(data: Vec<u8>, media_type: &str) -> Result<Self, ValidationError> {
        if !media_type.starts_with("image/") {
            return Err(ValidationError::UnsupportedMediaType {
                found: media_type.to_string(),
            });
        }
        let size = data.len() as u64;
        if size > MAX_IMAGE_BYTES {
            return Err(ValidationError::ImageTooLarge { size });
        }
        Ok(GenerationRequest::Image {
            data,
            media_type: media_type.to_string(),
        })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            GenerationRequest::Text { .. } => "text",
            GenerationRequest::Image { .. } => "image",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_request_trims_prompt() {
        let request = GenerationRequest::text("  a small toy car  ").unwrap();
        assert_eq!(
            request,
            GenerationRequest::Text {
                prompt: "a small toy car".to_string()
            }
        );
    }

    #[test]
    fn whitespace_only_prompt_is_rejected() {
        assert_eq!(
            GenerationRequest::text("   "),
            Err(ValidationError::EmptyPrompt)
        );
    }

    #[test]
    fn non_image_media_type_is_rejected() {
        assert_eq!(
            GenerationRequest::image(vec![1, 2, 3], "text/plain"),
            Err(ValidationError::UnsupportedMediaType {
                found: "text/plain".to_string()
            })
        );
    }

    #[test]
    fn oversized_image_is_rejected() {
        let data = vec![0u8; (MAX_IMAGE_BYTES + 1) as usize];
        assert_eq!(
            GenerationRequest::image(data, "image/png"),
            Err(ValidationError::ImageTooLarge {
                size: MAX_IMAGE_BYTES + 1
            })
        );
    }

    #[test]
    fn image_at_the_size_cap_is_accepted() {
        let data = vec![0u8; MAX_IMAGE_BYTES as usize];
        assert!(GenerationRequest::image(data, "image/png").is_ok());
    }

    #[test]
    fn wire_shape_matches_backend_contract() {
        let text = GenerationRequest::text("a chair").unwrap();
        assert_eq!(
            serde_json::to_value(&text).unwrap(),
            serde_json::json!({"kind": "text", "prompt": "a chair"})
        );

        let image = GenerationRequest::image(vec![0xde, 0xad], "image/png").unwrap();
        assert_eq!(
            serde_json::to_value(&image).unwrap(),
            serde_json::json!({"kind": "image", "data": "3q0=", "mediaType": "image/png"})
        );
    }
}
