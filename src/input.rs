use crate::{
    error::ValidationError,
    models::{GenerationRequest, MAX_IMAGE_BYTES},
};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Which input surface is active, mirroring the text/image tab switcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Text,
    Image,
}

/// Handle to a transient preview resource, the object-URL analogue for a
/// staged image. Owned by the collector and revoked through the registry on
/// every path that discards it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewHandle {
    id: Uuid,
    url: String,
}

impl PreviewHandle {
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[derive(Default)]
struct RegistryInner {
    live: HashSet<Uuid>,
    revoked: u64,
}

/// Tracks live preview resources. Revocation is idempotent: a handle is
/// released at most once no matter how many discard paths run.
#[derive(Clone, Default)]
pub struct PreviewRegistry {
    inner: Arc<Mutex<RegistryInner>>,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self) -> PreviewHandle {
        let id = Uuid::new_v4();
        self.inner.lock().unwrap().live.insert(id);
        PreviewHandle {
            id,
            url: format!("blob:depthforge/{}", id),
        }
    }

    pub fn revoke(&self, handle: &PreviewHandle) {
        let mut inner = self.inner.lock().unwrap();
        if inner.live.remove(&handle.id) {
            inner.revoked += 1;
            log::debug!("Revoked preview {}", handle.url);
        }
    }

    pub fn live_count(&self) -> usize {
        self.inner.lock().unwrap().live.len()
    }

    pub fn revoked_count(&self) -> u64 {
        self.inner.lock().unwrap().revoked
    }
}

struct StagedImage {
    data: Vec<u8>,
    media_type: String,
    preview: PreviewHandle,
}

/// Collects and validates user input before anything reaches the workflow.
///
/// Bad input is rejected here, locally, and no [`GenerationRequest`] is
/// constructed for it. A staged image owns a preview resource which is
/// revoked whenever it is superseded, cleared, or the collector is torn
/// down.
pub struct InputCollector {
    mode: InputMode,
    prompt: String,
    image: Option<StagedImage>,
    previews: PreviewRegistry,
}

impl Default for InputCollector {
    fn default() -> Self {
        Self::with_registry(PreviewRegistry::new())
    }
}

impl InputCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shares an external registry, letting callers observe the preview
    /// lifecycle.
    pub fn with_registry(previews: PreviewRegistry) -> Self {
        InputCollector {
            mode: InputMode::default(),
            prompt: String::new(),
            image: None,
            previews,
        }
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: InputMode) {
        self.mode = mode;
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    /// Stages an image for submission after validating it, replacing (and
    /// revoking the preview of) any previously staged image. Rejected files
    /// leave the current staging untouched.
    pub fn attach_image(
        &mut self,
        data: Vec<u8>,
        media_type: &str,
    ) -> Result<&PreviewHandle, ValidationError> {
        if !media_type.starts_with("image/") {
            log::warn!("Rejected upload with media type '{}'", media_type);
            return Err(ValidationError::UnsupportedMediaType {
                found: media_type.to_string(),
            });
        }
        let size = data.len() as u64;
        if size > MAX_IMAGE_BYTES {
            log::warn!("Rejected {}-byte upload, limit is {}", size, MAX_IMAGE_BYTES);
            return Err(ValidationError::ImageTooLarge { size });
        }

        self.clear_image();
        let staged = self.image.insert(StagedImage {
            data,
            media_type: media_type.to_string(),
            preview: self.previews.create(),
        });
        Ok(&staged.preview)
    }

    /// Drops the staged image and releases its preview resource.
    pub fn clear_image(&mut self) {
        if let Some(staged) = self.image.take() {
            self.previews.revoke(&staged.preview);
        }
    }

    pub fn preview_url(&self) -> Option<&str> {
        self.image.as_ref().map(|staged| staged.preview.url())
    }

    /// Packages the active input surface into a request, or rejects locally
    /// when that surface is empty.
    pub fn take_request(&self) -> Result<GenerationRequest, ValidationError> {
        match self.mode {
            InputMode::Text => {
                if self.prompt.trim().is_empty() {
                    return Err(ValidationError::MissingPrompt);
                }
                GenerationRequest::text(&self.prompt)
            }
            InputMode::Image => {
                let staged = self.image.as_ref().ok_or(ValidationError::MissingImage)?;
                GenerationRequest::image(staged.data.clone(), &staged.media_type)
            }
        }
    }
}

impl Drop for InputCollector {
    fn drop(&mut self) {
        self.clear_image();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oversized_image_is_rejected_before_any_staging() {
        let registry = PreviewRegistry::new();
        let mut collector = InputCollector::with_registry(registry.clone());

        let result = collector.attach_image(vec![0u8; (MAX_IMAGE_BYTES + 1) as usize], "image/png");
        assert_eq!(
            result.unwrap_err(),
            ValidationError::ImageTooLarge {
                size: MAX_IMAGE_BYTES + 1
            }
        );
        assert_eq!(registry.live_count(), 0);
        assert!(collector.take_request().is_err());
    }

    #[test]
    fn non_image_media_type_is_rejected_locally() {
        let mut collector = InputCollector::new();
        let result = collector.attach_image(vec![1, 2, 3], "text/plain");
        assert_eq!(
            result.unwrap_err(),
            ValidationError::UnsupportedMediaType {
                found: "text/plain".to_string()
            }
        );
    }

    #[test]
    fn whitespace_only_prompt_is_rejected_locally() {
        let mut collector = InputCollector::new();
        collector.set_prompt("   ");
        assert_eq!(
            collector.take_request(),
            Err(ValidationError::MissingPrompt)
        );
    }

    #[test]
    fn image_mode_without_a_staged_image_is_rejected() {
        let mut collector = InputCollector::new();
        collector.set_mode(InputMode::Image);
        assert_eq!(collector.take_request(), Err(ValidationError::MissingImage));
    }

    #[test]
    fn trimmed_prompt_becomes_a_text_request() {
        let mut collector = InputCollector::new();
        collector.set_prompt("  a small toy car ");
        assert_eq!(
            collector.take_request().unwrap(),
            GenerationRequest::Text {
                prompt: "a small toy car".to_string()
            }
        );
    }

    #[test]
    fn staged_image_becomes_an_image_request() {
        let mut collector = InputCollector::new();
        collector.set_mode(InputMode::Image);
        collector.attach_image(vec![9, 9, 9], "image/webp").unwrap();
        assert_eq!(
            collector.take_request().unwrap(),
            GenerationRequest::Image {
                data: vec![9, 9, 9],
                media_type: "image/webp".to_string()
            }
        );
    }

    #[test]
    fn superseding_an_image_revokes_the_old_preview_exactly_once() {
        let registry = PreviewRegistry::new();
        let mut collector = InputCollector::with_registry(registry.clone());

        let first = collector.attach_image(vec![1], "image/png").unwrap().clone();
        assert_eq!(registry.live_count(), 1);

        let second = collector.attach_image(vec![2], "image/jpeg").unwrap().clone();
        assert_ne!(first.url(), second.url());
        assert_eq!(registry.live_count(), 1);
        assert_eq!(registry.revoked_count(), 1);

        // A second revocation of the superseded handle is a no-op.
        registry.revoke(&first);
        assert_eq!(registry.revoked_count(), 1);
    }

    #[test]
    fn clearing_the_image_revokes_its_preview() {
        let registry = PreviewRegistry::new();
        let mut collector = InputCollector::with_registry(registry.clone());

        collector.attach_image(vec![1], "image/png").unwrap();
        collector.clear_image();
        assert_eq!(registry.live_count(), 0);
        assert_eq!(registry.revoked_count(), 1);
        assert!(collector.preview_url().is_none());
    }

    #[test]
    fn teardown_revokes_the_outstanding_preview() {
        let registry = PreviewRegistry::new();
        {
            let mut collector = InputCollector::with_registry(registry.clone());
            collector.attach_image(vec![1], "image/png").unwrap();
            assert_eq!(registry.live_count(), 1);
        }
        assert_eq!(registry.live_count(), 0);
        assert_eq!(registry.revoked_count(), 1);
    }

    #[test]
    fn rejected_upload_keeps_the_previous_staging() {
        let registry = PreviewRegistry::new();
        let mut collector = InputCollector::with_registry(registry.clone());

        collector.attach_image(vec![1], "image/png").unwrap();
        let before = collector.preview_url().unwrap().to_string();

        assert!(collector.attach_image(vec![2], "text/plain").is_err());
        assert_eq!(collector.preview_url(), Some(before.as_str()));
        assert_eq!(registry.revoked_count(), 0);
    }
}
