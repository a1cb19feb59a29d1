use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::Utc;
use tracing::{error, info};

use super::domain::Submission;
use super::form::{FormError, SubmissionForm};
use super::repository::{StoreError, SubmissionStore};
use crate::config::SubmissionConfig;

/// Zero-argument hook run after a successful offer or plan submission.
pub type CompletionCallback = Arc<dyn Fn() + Send + Sync>;

/// Feedback shown next to the form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmitState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed(&'static str),
}

#[derive(Debug, thiserror::Error)]
pub enum WriterError {
    #[error(transparent)]
    Invalid(#[from] FormError),
    #[error("a submission is already in flight")]
    InFlight,
    #[error("{message}")]
    Store {
        message: &'static str,
        #[source]
        source: StoreError,
    },
}

/// One form instance: a draft, its feedback state, and the store it writes to.
pub struct SubmissionWriter<F, S> {
    store: Arc<S>,
    draft: Mutex<F>,
    state: Mutex<SubmitState>,
    on_success: Option<CompletionCallback>,
    completion_delay: Duration,
}

impl<F, S> SubmissionWriter<F, S>
where
    F: SubmissionForm,
    S: SubmissionStore + 'static,
{
    pub fn new(store: Arc<S>, draft: F, config: SubmissionConfig) -> Self {
        Self {
            store,
            draft: Mutex::new(draft),
            state: Mutex::new(SubmitState::Idle),
            on_success: None,
            completion_delay: config.completion_delay,
        }
    }

    /// Register the embedding page's completion hook. Contact forms never call it.
    pub fn on_success(mut self, callback: CompletionCallback) -> Self {
        self.on_success = Some(callback);
        self
    }

    pub fn draft(&self) -> F {
        lock(&self.draft).clone()
    }

    /// Mutate the draft in place, e.g. as the visitor types.
    pub fn edit(&self, update: impl FnOnce(&mut F)) {
        update(&mut lock(&self.draft));
    }

    pub fn state(&self) -> SubmitState {
        *lock(&self.state)
    }

    /// Mirrors the disabled submit button while a request is pending.
    pub fn is_submitting(&self) -> bool {
        self.state() == SubmitState::Submitting
    }

    /// Validate the draft and write exactly one submission.
    pub async fn submit(&self) -> Result<Submission, WriterError> {
        let new_submission = {
            let mut state = lock(&self.state);
            if *state == SubmitState::Submitting {
                return Err(WriterError::InFlight);
            }
            let new_submission = lock(&self.draft).prepare(Utc::now())?;
            *state = SubmitState::Submitting;
            new_submission
        };
        let _pending = PendingSubmit(&self.state);

        match self.store.create(new_submission).await {
            Ok(submission) => {
                info!(
                    submission_id = %submission.id,
                    kind = F::KIND.as_str(),
                    "submission received"
                );
                lock(&self.draft).reset();
                *lock(&self.state) = SubmitState::Succeeded;
                self.schedule_completion();
                Ok(submission)
            }
            Err(source) => {
                error!(kind = F::KIND.as_str(), error = %source, "failed to store submission");
                *lock(&self.state) = SubmitState::Failed(F::FAILURE_MESSAGE);
                Err(WriterError::Store {
                    message: F::FAILURE_MESSAGE,
                    source,
                })
            }
        }
    }

    fn schedule_completion(&self) {
        if !F::NOTIFIES_COMPLETION {
            return;
        }
        if let Some(callback) = self.on_success.clone() {
            let delay = self.completion_delay;
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                callback();
            });
        }
    }
}

/// Returns the writer to `Idle` when a submit is dropped before the store answers.
struct PendingSubmit<'a>(&'a Mutex<SubmitState>);

impl Drop for PendingSubmit<'_> {
    fn drop(&mut self) {
        let mut state = lock(self.0);
        if *state == SubmitState::Submitting {
            *state = SubmitState::Idle;
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
