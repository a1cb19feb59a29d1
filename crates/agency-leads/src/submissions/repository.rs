use std::cmp::Ordering as CmpOrdering;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::watch;

use super::domain::{NewSubmission, Submission, SubmissionId, SubmissionStatus};

/// Full collection as of one store change, newest first.
pub type Snapshot = Arc<Vec<Submission>>;

/// Contract of the document store holding the submissions collection.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Persist a new record, assigning its id.
    async fn create(&self, submission: NewSubmission) -> Result<Submission, StoreError>;
    /// Partial update touching only the status field.
    async fn update_status(
        &self,
        id: &SubmissionId,
        status: SubmissionStatus,
    ) -> Result<(), StoreError>;
    async fn delete(&self, id: &SubmissionId) -> Result<(), StoreError>;
    async fn fetch(&self, id: &SubmissionId) -> Result<Option<Submission>, StoreError>;
    /// One-off read of the collection ordered by timestamp descending.
    async fn list(&self) -> Result<Vec<Submission>, StoreError>;
    /// Live query ordered by timestamp descending.
    fn subscribe(&self) -> SubmissionFeed;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("submission not found")]
    NotFound,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Receiving side of a live query. Only the most recent snapshot is retained.
#[derive(Debug, Clone)]
pub struct SubmissionFeed {
    receiver: watch::Receiver<Snapshot>,
}

impl SubmissionFeed {
    /// Latest snapshot, marking it as seen.
    pub fn latest(&mut self) -> Snapshot {
        self.receiver.borrow_and_update().clone()
    }

    /// True when the store published a snapshot that has not been seen yet.
    pub fn has_changed(&self) -> bool {
        self.receiver.has_changed().unwrap_or(false)
    }

    /// Wait for the next snapshot. Intermediate ones are skipped.
    pub async fn changed(&mut self) -> Result<Snapshot, StoreError> {
        self.receiver
            .changed()
            .await
            .map_err(|_| StoreError::Unavailable("subscription closed".to_string()))?;
        Ok(self.latest())
    }
}

/// Sending side of the live query, owned by a store implementation.
#[derive(Debug)]
pub struct SnapshotPublisher {
    sender: watch::Sender<Snapshot>,
}

impl Default for SnapshotPublisher {
    fn default() -> Self {
        let (sender, _) = watch::channel(Arc::new(Vec::new()));
        Self { sender }
    }
}

impl SnapshotPublisher {
    /// Order the records newest first and replace the published snapshot.
    pub fn publish(&self, mut submissions: Vec<Submission>) {
        submissions.sort_by(newest_first);
        self.sender.send_replace(Arc::new(submissions));
    }

    pub fn subscribe(&self) -> SubmissionFeed {
        SubmissionFeed {
            receiver: self.sender.subscribe(),
        }
    }
}

pub(crate) fn newest_first(left: &Submission, right: &Submission) -> CmpOrdering {
    right
        .timestamp
        .cmp(&left.timestamp)
        .then_with(|| right.id.cmp(&left.id))
}

/// Process-local store used by the service binary, the demo, and tests.
#[derive(Debug, Default)]
pub struct InMemorySubmissionStore {
    records: Mutex<HashMap<SubmissionId, Submission>>,
    sequence: AtomicU64,
    publisher: SnapshotPublisher,
}

impl InMemorySubmissionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> SubmissionId {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        SubmissionId(format!("sub-{id:06}"))
    }

    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<SubmissionId, Submission>>, StoreError> {
        self.records
            .lock()
            .map_err(|_| StoreError::Unavailable("store mutex poisoned".to_string()))
    }

    fn snapshot(records: &HashMap<SubmissionId, Submission>) -> Vec<Submission> {
        let mut submissions: Vec<Submission> = records.values().cloned().collect();
        submissions.sort_by(newest_first);
        submissions
    }
}

#[async_trait]
impl SubmissionStore for InMemorySubmissionStore {
    async fn create(&self, submission: NewSubmission) -> Result<Submission, StoreError> {
        let mut guard = self.lock()?;
        let record = submission.into_submission(self.next_id());
        guard.insert(record.id.clone(), record.clone());
        self.publisher.publish(Self::snapshot(&guard));
        Ok(record)
    }

    async fn update_status(
        &self,
        id: &SubmissionId,
        status: SubmissionStatus,
    ) -> Result<(), StoreError> {
        let mut guard = self.lock()?;
        let record = guard.get_mut(id).ok_or(StoreError::NotFound)?;
        record.status = status;
        self.publisher.publish(Self::snapshot(&guard));
        Ok(())
    }

    async fn delete(&self, id: &SubmissionId) -> Result<(), StoreError> {
        let mut guard = self.lock()?;
        guard.remove(id).ok_or(StoreError::NotFound)?;
        self.publisher.publish(Self::snapshot(&guard));
        Ok(())
    }

    async fn fetch(&self, id: &SubmissionId) -> Result<Option<Submission>, StoreError> {
        let guard = self.lock()?;
        Ok(guard.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<Submission>, StoreError> {
        let guard = self.lock()?;
        Ok(Self::snapshot(&guard))
    }

    fn subscribe(&self) -> SubmissionFeed {
        self.publisher.subscribe()
    }
}
