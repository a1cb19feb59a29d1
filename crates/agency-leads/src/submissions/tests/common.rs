use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::config::SubmissionConfig;
use crate::submissions::domain::{
    ContactDetails, NewSubmission, OfferDetails, PlanDetails, Submission, SubmissionDetails,
    SubmissionId, SubmissionStatus,
};
use crate::submissions::form::{ContactForm, OfferClaimForm, PlanSelectionForm};
use crate::submissions::repository::{
    InMemorySubmissionStore, SnapshotPublisher, StoreError, SubmissionFeed, SubmissionStore,
};
use crate::submissions::{submission_router, SubmissionService};

pub(super) fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, day, hour, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn contact_form() -> ContactForm {
    ContactForm {
        name: "Asha".to_string(),
        email: "asha@x.com".to_string(),
        subject: "New website".to_string(),
        message: "Need a site".to_string(),
        ..ContactForm::default()
    }
}

pub(super) fn launch_offer() -> OfferDetails {
    OfferDetails {
        offer_title: "Launch Bundle".to_string(),
        offer_price: "₹24,999".to_string(),
        original_price: "₹39,999".to_string(),
        savings: "₹15,000".to_string(),
    }
}

pub(super) fn offer_form() -> OfferClaimForm {
    OfferClaimForm {
        name: "Ravi".to_string(),
        email: "ravi@example.com".to_string(),
        phone: "+91 98765 43210".to_string(),
        message: "Claiming the bundle".to_string(),
        ..OfferClaimForm::for_offer(launch_offer())
    }
}

pub(super) fn plan_form() -> PlanSelectionForm {
    PlanSelectionForm {
        name: "Meera".to_string(),
        email: "meera@example.com".to_string(),
        phone: "+91 90000 00000".to_string(),
        message: "Online store for our bakery".to_string(),
        project_timeline: "2-3-months".to_string(),
        ..PlanSelectionForm::for_plan("Growth", "₹49,999")
    }
}

pub(super) fn new_contact(name: &str, timestamp: DateTime<Utc>) -> NewSubmission {
    NewSubmission {
        name: name.to_string(),
        email: format!("{}@example.com", name.to_ascii_lowercase()),
        phone: None,
        company: None,
        message: format!("Message from {name}"),
        details: SubmissionDetails::Contact(ContactDetails {
            subject: Some("Hello".to_string()),
            service: None,
        }),
        timestamp,
    }
}

pub(super) fn new_offer_claim(name: &str, timestamp: DateTime<Utc>) -> NewSubmission {
    NewSubmission {
        details: SubmissionDetails::OfferClaim(launch_offer()),
        phone: Some("+91 98765 43210".to_string()),
        ..new_contact(name, timestamp)
    }
}

pub(super) fn new_plan_selection(name: &str, timestamp: DateTime<Utc>) -> NewSubmission {
    NewSubmission {
        details: SubmissionDetails::PlanSelection(PlanDetails {
            selected_plan: "Starter".to_string(),
            plan_price: "₹19,999".to_string(),
            project_timeline: None,
        }),
        phone: Some("+91 90000 00000".to_string()),
        ..new_contact(name, timestamp)
    }
}

pub(super) fn with_status(
    new_submission: NewSubmission,
    id: &str,
    status: SubmissionStatus,
) -> Submission {
    let mut submission = new_submission.into_submission(SubmissionId(id.to_string()));
    submission.status = status;
    submission
}

/// Store seeded with a contact, an offer claim, and a plan request, oldest first.
pub(super) async fn seeded_store() -> Arc<InMemorySubmissionStore> {
    let store = Arc::new(InMemorySubmissionStore::new());
    store
        .create(new_contact("Asha", at(10, 9)))
        .await
        .expect("seed contact");
    store
        .create(new_offer_claim("Ravi", at(11, 9)))
        .await
        .expect("seed offer claim");
    store
        .create(new_plan_selection("Meera", at(12, 9)))
        .await
        .expect("seed plan selection");
    store
}

pub(super) fn writer_config() -> SubmissionConfig {
    SubmissionConfig {
        completion_delay: Duration::from_millis(2_000),
    }
}

pub(super) fn build_service() -> (
    SubmissionService<InMemorySubmissionStore>,
    Arc<InMemorySubmissionStore>,
) {
    let store = Arc::new(InMemorySubmissionStore::new());
    let service = SubmissionService::new(store.clone());
    (service, store)
}

pub(super) fn router_with_store(store: Arc<InMemorySubmissionStore>) -> axum::Router {
    submission_router(Arc::new(SubmissionService::new(store)))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) async fn read_text_body(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    String::from_utf8(body.to_vec()).expect("utf-8 body")
}

/// Store whose every operation fails, as if the backend were offline.
#[derive(Default)]
pub(super) struct UnavailableStore {
    publisher: SnapshotPublisher,
}

#[async_trait]
impl SubmissionStore for UnavailableStore {
    async fn create(&self, _submission: NewSubmission) -> Result<Submission, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    async fn update_status(
        &self,
        _id: &SubmissionId,
        _status: SubmissionStatus,
    ) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    async fn delete(&self, _id: &SubmissionId) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    async fn fetch(&self, _id: &SubmissionId) -> Result<Option<Submission>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    async fn list(&self) -> Result<Vec<Submission>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn subscribe(&self) -> SubmissionFeed {
        self.publisher.subscribe()
    }
}

/// In-memory store that takes a while to acknowledge writes.
#[derive(Default)]
pub(super) struct SlowStore {
    inner: InMemorySubmissionStore,
}

#[async_trait]
impl SubmissionStore for SlowStore {
    async fn create(&self, submission: NewSubmission) -> Result<Submission, StoreError> {
        tokio::time::sleep(Duration::from_millis(500)).await;
        self.inner.create(submission).await
    }

    async fn update_status(
        &self,
        id: &SubmissionId,
        status: SubmissionStatus,
    ) -> Result<(), StoreError> {
        self.inner.update_status(id, status).await
    }

    async fn delete(&self, id: &SubmissionId) -> Result<(), StoreError> {
        self.inner.delete(id).await
    }

    async fn fetch(&self, id: &SubmissionId) -> Result<Option<Submission>, StoreError> {
        self.inner.fetch(id).await
    }

    async fn list(&self) -> Result<Vec<Submission>, StoreError> {
        self.inner.list().await
    }

    fn subscribe(&self) -> SubmissionFeed {
        self.inner.subscribe()
    }
}
