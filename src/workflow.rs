use crate::{
    client::GenerationClient,
    models::{GenerationRequest, GenerationResult, WorkflowState},
};
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;

/// Reason reported when the generation call itself blows up rather than
/// resolving with a result.
pub const UNEXPECTED_ERROR_REASON: &str =
    "An unexpected error occurred while generating the model.";

struct Inner {
    state: WorkflowState,
    /// Submission counter. Each accepted submission and each reset bumps it;
    /// a completion handler carrying an older epoch is stale and discarded.
    epoch: u64,
}

/// Single source of truth for the generation lifecycle.
///
/// Owns the one [`WorkflowState`] value and is its sole mutator. At most one
/// generation call is outstanding at any time: submitting while `Generating`
/// is an explicit no-op, mirroring a disabled submit button. The controller
/// never fails fatally: client panics are normalized into a `Failure`
/// result and every accepted submission reaches a terminal `Completed`
/// state, after which resubmission is immediately allowed.
#[derive(Clone)]
pub struct WorkflowController {
    client: Arc<dyn GenerationClient>,
    inner: Arc<Mutex<Inner>>,
}

impl WorkflowController {
    pub fn new(client: Arc<dyn GenerationClient>) -> Self {
        WorkflowController {
            client,
            inner: Arc::new(Mutex::new(Inner {
                state: WorkflowState::Idle,
                epoch: 0,
            })),
        }
    }

    /// Accepts a submission unless a generation is already in flight.
    ///
    /// On acceptance the state transitions to `Generating` synchronously
    /// (observable before the result settles), the generation call is
    /// spawned, and the returned handle completes once the result has been
    /// applied. Returns `None` for the rejected no-op case.
    pub fn submit(&self, request: GenerationRequest) -> Option<JoinHandle<()>> {
        let epoch = {
            let mut inner = self.inner.lock().unwrap();
            if inner.state.is_generating() {
                log::debug!("Submission ignored: a generation is already in flight");
                return None;
            }
            inner.epoch += 1;
            inner.state = WorkflowState::Generating;
            inner.epoch
        };

        log::info!("Submission #{}: {} request accepted", epoch, request.kind());

        let client = Arc::clone(&self.client);
        let shared = Arc::clone(&self.inner);
        Some(tokio::spawn(async move {
            let result = match AssertUnwindSafe(client.generate(request))
                .catch_unwind()
                .await
            {
                Ok(result) => result,
                Err(_) => {
                    log::error!("Generation call panicked, normalizing to a failure result");
                    GenerationResult::failure(UNEXPECTED_ERROR_REASON)
                }
            };
            Self::on_generation_settled(&shared, epoch, result);
        }))
    }

    /// Applies a settled result, invoked exactly once per accepted
    /// submission by the spawned completion handler.
    fn on_generation_settled(shared: &Mutex<Inner>, epoch: u64, result: GenerationResult) {
        let mut inner = shared.lock().unwrap();
        if inner.epoch != epoch {
            log::debug!("Discarding stale result from submission #{}", epoch);
            return;
        }
        match &result {
            GenerationResult::Success { artifact } => {
                log::info!("Submission #{} completed: {}", epoch, artifact)
            }
            GenerationResult::Failure { reason } => {
                log::warn!("Submission #{} failed: {}", epoch, reason)
            }
        }
        inner.state = WorkflowState::Completed(result);
    }

    /// Pure read of the current state.
    pub fn current_state(&self) -> WorkflowState {
        self.inner.lock().unwrap().state.clone()
    }

    /// Returns to `Idle` and invalidates any in-flight call: its eventual
    /// result will compare against a newer epoch and be discarded.
    pub fn reset(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.epoch += 1;
        inner.state = WorkflowState::Idle;
    }
}
