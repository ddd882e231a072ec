use serde::{Deserialize, Serialize};

/// Reference to a generated model artifact, as handed out by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtifactRef(pub String);

impl ArtifactRef {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ArtifactRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Terminal outcome of one generation call. A client resolves with exactly
/// one of these per accepted request; failures carry a user-facing reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum GenerationResult {
    Success {
        #[serde(rename = "modelUrl")]
        artifact: ArtifactRef,
    },
    #[serde(rename = "error")]
    Failure {
        #[serde(rename = "error")]
        reason: String,
    },
}

impl GenerationResult {
    pub fn success(artifact: impl Into<String>) -> Self {
        GenerationResult::Success {
            artifact: ArtifactRef(artifact.into()),
        }
    }

    pub fn failure(reason: impl Into<String>) -> Self {
        GenerationResult::Failure {
            reason: reason.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, GenerationResult::Success { .. })
    }
}

/// Lifecycle of the generation workflow. Exactly one value exists per
/// [`WorkflowController`](crate::workflow::WorkflowController), which is its
/// sole mutator. A new submission supersedes the previous `Completed` result;
/// no history is kept.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WorkflowState {
    #[default]
    Idle,
    Generating,
    Completed(GenerationResult),
}

impl WorkflowState {
    pub fn is_generating(&self) -> bool {
        matches!(self, WorkflowState::Generating)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_wire_shape_matches_backend_contract() {
        let success = GenerationResult::success("https://example.com/model.obj");
        assert_eq!(
            serde_json::to_value(&success).unwrap(),
            serde_json::json!({"status": "success", "modelUrl": "https://example.com/model.obj"})
        );

        let parsed: GenerationResult =
            serde_json::from_value(serde_json::json!({"status": "error", "error": "upstream processing error"}))
                .unwrap();
        assert_eq!(parsed, GenerationResult::failure("upstream processing error"));
    }
}
