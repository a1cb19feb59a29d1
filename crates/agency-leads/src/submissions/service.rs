use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{error, info};

use super::domain::{Submission, SubmissionId, SubmissionStatus};
use super::export::{export_csv, CsvExport, ExportError};
use super::filter::{SubmissionFilter, SubmissionStats};
use super::form::{FormError, SubmissionForm};
use super::repository::{StoreError, SubmissionStore};
use super::view::SubmissionDetailView;

/// Stateless request-scoped facade over the store, backing the HTTP routes.
pub struct SubmissionService<S> {
    store: Arc<S>,
}

impl<S> SubmissionService<S>
where
    S: SubmissionStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Validate a form and persist it as a new submission.
    pub async fn submit<F>(&self, form: F) -> Result<Submission, SubmissionServiceError>
    where
        F: SubmissionForm,
    {
        let new_submission = form.prepare(Utc::now())?;
        let submission = self.store.create(new_submission).await.map_err(|err| {
            error!(kind = F::KIND.as_str(), error = %err, "failed to store submission");
            err
        })?;
        info!(
            submission_id = %submission.id,
            kind = F::KIND.as_str(),
            "submission received"
        );
        Ok(submission)
    }

    pub async fn list(
        &self,
        filter: SubmissionFilter,
    ) -> Result<Vec<Submission>, SubmissionServiceError> {
        let submissions = self.store.list().await?;
        Ok(submissions
            .into_iter()
            .filter(|submission| filter.matches(submission))
            .collect())
    }

    pub async fn stats(&self) -> Result<SubmissionStats, SubmissionServiceError> {
        let submissions = self.store.list().await?;
        Ok(SubmissionStats::from_submissions(&submissions))
    }

    pub async fn get(&self, id: &SubmissionId) -> Result<Submission, SubmissionServiceError> {
        let submission = self.store.fetch(id).await?.ok_or(StoreError::NotFound)?;
        Ok(submission)
    }

    pub async fn detail(
        &self,
        id: &SubmissionId,
    ) -> Result<SubmissionDetailView, SubmissionServiceError> {
        Ok(self.get(id).await?.into())
    }

    /// Open the detail view, marking a `new` submission as `read`.
    pub async fn view(
        &self,
        id: &SubmissionId,
    ) -> Result<SubmissionDetailView, SubmissionServiceError> {
        let mut submission = self.get(id).await?;
        if submission.status == SubmissionStatus::New {
            self.update_status(id, SubmissionStatus::Read).await?;
            submission.status = SubmissionStatus::Read;
        }
        Ok(submission.into())
    }

    pub async fn update_status(
        &self,
        id: &SubmissionId,
        status: SubmissionStatus,
    ) -> Result<(), SubmissionServiceError> {
        self.store
            .update_status(id, status)
            .await
            .map_err(|err| {
                error!(submission_id = %id, error = %err, "failed to update submission status");
                err
            })?;
        info!(submission_id = %id, status = status.label(), "submission status updated");
        Ok(())
    }

    pub async fn delete(&self, id: &SubmissionId) -> Result<(), SubmissionServiceError> {
        self.store.delete(id).await.map_err(|err| {
            error!(submission_id = %id, error = %err, "failed to delete submission");
            err
        })?;
        info!(submission_id = %id, "submission deleted");
        Ok(())
    }

    pub async fn export(
        &self,
        filter: SubmissionFilter,
        exported_at: DateTime<Utc>,
    ) -> Result<CsvExport, SubmissionServiceError> {
        let submissions = self.list(filter).await?;
        let export = export_csv(&submissions, exported_at)?;
        Ok(export)
    }
}

/// Error raised by the submission service.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionServiceError {
    #[error(transparent)]
    Invalid(#[from] FormError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Export(#[from] ExportError),
}
