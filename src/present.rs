use crate::models::{ArtifactRef, GenerationResult, WorkflowState};
use serde::Serialize;

/// Closed set of export formats offered for a generated model. Selection is
/// display-only: both formats reference the same underlying artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Obj,
    Stl,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 2] = [ExportFormat::Obj, ExportFormat::Stl];

    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Obj => "OBJ Format",
            ExportFormat::Stl => "STL Format",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Obj => "obj",
            ExportFormat::Stl => "stl",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ExportFormat::Obj => {
                "OBJ format is widely compatible with 3D software for further editing and texturing."
            }
            ExportFormat::Stl => {
                "STL format is ideal for 3D printing and manufacturing applications."
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationVariant {
    Default,
    Destructive,
}

/// User-facing notification emitted for terminal workflow states. How it is
/// shown (toast, banner, log line) is the embedding frontend's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: NotificationVariant,
}

/// What the result surface should display, as a pure function of
/// [`WorkflowState`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum ViewState {
    /// Nothing generated yet: empty placeholder inviting input.
    Empty,
    /// A generation is in flight: progress indicator.
    Progress,
    /// A model is ready to display and export.
    Model {
        artifact: ArtifactRef,
        exports: Vec<ExportFormat>,
    },
    /// The last generation failed.
    Error { notification: Notification },
}

pub fn render(state: &WorkflowState) -> ViewState {
    match state {
        WorkflowState::Idle => ViewState::Empty,
        WorkflowState::Generating => ViewState::Progress,
        WorkflowState::Completed(GenerationResult::Success { artifact }) => ViewState::Model {
            artifact: artifact.clone(),
            exports: ExportFormat::ALL.to_vec(),
        },
        WorkflowState::Completed(GenerationResult::Failure { reason }) => ViewState::Error {
            notification: failure_notification(reason),
        },
    }
}

/// Notification for a terminal state, if it warrants one.
pub fn notification_for(state: &WorkflowState) -> Option<Notification> {
    match state {
        WorkflowState::Completed(GenerationResult::Success { .. }) => Some(Notification {
            title: "Model generated successfully!".to_string(),
            description: "Your 3D model is now ready to view and download.".to_string(),
            variant: NotificationVariant::Default,
        }),
        WorkflowState::Completed(GenerationResult::Failure { reason }) => {
            Some(failure_notification(reason))
        }
        WorkflowState::Idle | WorkflowState::Generating => None,
    }
}

fn failure_notification(reason: &str) -> Notification {
    Notification {
        title: "Generation failed".to_string(),
        description: reason.to_string(),
        variant: NotificationVariant::Destructive,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_workflow_state_maps_to_its_view() {
        assert_eq!(render(&WorkflowState::Idle), ViewState::Empty);
        assert_eq!(render(&WorkflowState::Generating), ViewState::Progress);

        let success = WorkflowState::Completed(GenerationResult::success(
            "https://example.com/model.obj",
        ));
        assert_eq!(
            render(&success),
            ViewState::Model {
                artifact: ArtifactRef("https://example.com/model.obj".to_string()),
                exports: vec![ExportFormat::Obj, ExportFormat::Stl],
            }
        );

        let failure =
            WorkflowState::Completed(GenerationResult::failure("Network error: timed out"));
        match render(&failure) {
            ViewState::Error { notification } => {
                assert_eq!(notification.title, "Generation failed");
                assert_eq!(notification.description, "Network error: timed out");
                assert_eq!(notification.variant, NotificationVariant::Destructive);
            }
            other => panic!("expected an error view, got {:?}", other),
        }
    }

    #[test]
    fn the_export_set_is_closed_and_display_only() {
        assert_eq!(ExportFormat::ALL.len(), 2);
        assert_eq!(ExportFormat::Obj.extension(), "obj");
        assert_eq!(ExportFormat::Stl.extension(), "stl");
        assert_eq!(ExportFormat::Obj.label(), "OBJ Format");
    }

    #[test]
    fn only_terminal_states_produce_notifications() {
        assert!(notification_for(&WorkflowState::Idle).is_none());
        assert!(notification_for(&WorkflowState::Generating).is_none());

        let success =
            WorkflowState::Completed(GenerationResult::success("https://example.com/model.obj"));
        let notification = notification_for(&success).unwrap();
        assert_eq!(notification.title, "Model generated successfully!");
        assert_eq!(notification.variant, NotificationVariant::Default);
    }
}
