//! Admin-side review session over the live submissions collection.
//!
//! A [`Moderator`] owns exactly one store subscription for its lifetime. Every
//! snapshot pushed by the store replaces the local list wholesale. Incremental
//! diffs are not applied.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

use super::domain::{Submission, SubmissionId, SubmissionStatus};
use super::export::{export_csv, CsvExport, ExportError};
use super::filter::{StatusFilter, SubmissionFilter, SubmissionStats, TypeFilter};
use super::repository::{Snapshot, StoreError, SubmissionFeed, SubmissionStore};

#[derive(Debug, thiserror::Error)]
pub enum ModeratorError {
    #[error("submission {0} is not in the current list")]
    UnknownSubmission(SubmissionId),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

pub struct Moderator<S> {
    store: Arc<S>,
    feed: SubmissionFeed,
    submissions: Snapshot,
    filter: SubmissionFilter,
    selected: Option<SubmissionId>,
}

impl<S> Moderator<S>
where
    S: SubmissionStore + 'static,
{
    /// Subscribe to the store and take the current snapshot.
    pub fn open(store: Arc<S>) -> Self {
        let mut feed = store.subscribe();
        let submissions = feed.latest();
        Self {
            store,
            feed,
            submissions,
            filter: SubmissionFilter::default(),
            selected: None,
        }
    }

    /// Release the subscription.
    pub fn close(self) {}

    /// Adopt the latest snapshot if the store published one. Returns whether the list changed.
    pub fn sync(&mut self) -> bool {
        if !self.feed.has_changed() {
            return false;
        }
        self.submissions = self.feed.latest();
        true
    }

    /// Wait until the store pushes a new snapshot, then adopt it.
    pub async fn wait_for_change(&mut self) -> Result<(), ModeratorError> {
        self.submissions = self.feed.changed().await?;
        Ok(())
    }

    /// Everything in the subscribed collection, newest first.
    pub fn submissions(&self) -> &[Submission] {
        &self.submissions
    }

    /// The list after the status and type filters.
    pub fn visible(&self) -> Vec<&Submission> {
        self.filter.apply(self.submissions.iter())
    }

    pub fn filter(&self) -> SubmissionFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: SubmissionFilter) {
        self.filter = filter;
    }

    pub fn set_status_filter(&mut self, status: StatusFilter) {
        self.filter.status = status;
    }

    pub fn set_type_filter(&mut self, kind: TypeFilter) {
        self.filter.kind = kind;
    }

    pub fn stats(&self) -> SubmissionStats {
        SubmissionStats::from_submissions(self.submissions.iter())
    }

    pub fn selected_id(&self) -> Option<&SubmissionId> {
        self.selected.as_ref()
    }

    /// The selected record as of the latest snapshot.
    pub fn selected(&self) -> Option<&Submission> {
        let id = self.selected.as_ref()?;
        self.find(id)
    }

    /// Select one submission for the detail view. Viewing a `new` one marks it `read`.
    pub async fn select(&mut self, id: &SubmissionId) -> Result<(), ModeratorError> {
        let status = self
            .find(id)
            .map(|submission| submission.status)
            .ok_or_else(|| ModeratorError::UnknownSubmission(id.clone()))?;

        self.selected = Some(id.clone());

        if status == SubmissionStatus::New {
            self.write_status(id, SubmissionStatus::Read).await?;
        }
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Reassign the status. Any transition is accepted.
    pub async fn update_status(
        &mut self,
        id: &SubmissionId,
        status: SubmissionStatus,
    ) -> Result<(), ModeratorError> {
        self.write_status(id, status).await
    }

    pub async fn delete(&mut self, id: &SubmissionId) -> Result<(), ModeratorError> {
        if let Err(err) = self.store.delete(id).await {
            error!(submission_id = %id, error = %err, "failed to delete submission");
            return Err(err.into());
        }
        info!(submission_id = %id, "submission deleted");

        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        self.sync();
        Ok(())
    }

    /// CSV of the currently visible list. Does not re-query the store.
    pub fn export(&self, exported_at: DateTime<Utc>) -> Result<CsvExport, ModeratorError> {
        export_csv(self.visible(), exported_at).map_err(|err| {
            warn!(error = %err, "failed to export submissions");
            ModeratorError::Export(err)
        })
    }

    async fn write_status(
        &mut self,
        id: &SubmissionId,
        status: SubmissionStatus,
    ) -> Result<(), ModeratorError> {
        if let Err(err) = self.store.update_status(id, status).await {
            error!(submission_id = %id, error = %err, "failed to update submission status");
            return Err(err.into());
        }
        info!(submission_id = %id, status = status.label(), "submission status updated");
        self.sync();
        Ok(())
    }

    fn find(&self, id: &SubmissionId) -> Option<&Submission> {
        self.submissions
            .iter()
            .find(|submission| &submission.id == id)
    }
}
