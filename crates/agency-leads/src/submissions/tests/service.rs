use std::sync::Arc;

use super::common::*;
use crate::submissions::domain::{SubmissionId, SubmissionStatus, SubmissionType};
use crate::submissions::filter::{StatusFilter, SubmissionFilter, TypeFilter};
use crate::submissions::form::{ContactForm, FormError};
use crate::submissions::repository::{StoreError, SubmissionStore};
use crate::submissions::service::{SubmissionService, SubmissionServiceError};

#[tokio::test]
async fn submit_propagates_validation_errors() {
    let (service, store) = build_service();
    let form = ContactForm {
        subject: String::new(),
        ..contact_form()
    };

    match service.submit(form).await {
        Err(SubmissionServiceError::Invalid(FormError::MissingField("subject"))) => {}
        other => panic!("expected missing subject, got {other:?}"),
    }
    assert!(store.list().await.expect("list succeeds").is_empty());
}

#[tokio::test]
async fn submit_stores_trimmed_fields() {
    let (service, _) = build_service();
    let form = ContactForm {
        name: "  Asha ".to_string(),
        company: "   ".to_string(),
        ..contact_form()
    };

    let submission = service.submit(form).await.expect("submission stored");
    assert_eq!(submission.name, "Asha");
    assert!(submission.company.is_none());
    assert_eq!(submission.kind(), SubmissionType::Contact);
}

#[tokio::test]
async fn view_marks_new_submissions_read() {
    let (service, store) = build_service();
    let stored = service.submit(offer_form()).await.expect("offer stored");

    let view = service.view(&stored.id).await.expect("view succeeds");
    assert_eq!(view.submission.status, SubmissionStatus::Read);
    assert_eq!(view.type_label, "Offer Claim");

    service
        .update_status(&stored.id, SubmissionStatus::Replied)
        .await
        .expect("status updates");
    let view = service.view(&stored.id).await.expect("view succeeds");
    assert_eq!(view.submission.status, SubmissionStatus::Replied);

    let persisted = store
        .fetch(&stored.id)
        .await
        .expect("fetch succeeds")
        .expect("record present");
    assert_eq!(persisted.status, SubmissionStatus::Replied);
}

#[tokio::test]
async fn detail_does_not_change_status() {
    let (service, _) = build_service();
    let stored = service.submit(plan_form()).await.expect("plan stored");

    let view = service.detail(&stored.id).await.expect("detail succeeds");
    assert_eq!(view.submission.status, SubmissionStatus::New);
    assert_eq!(view.headline.as_deref(), Some("Growth"));
}

#[tokio::test]
async fn get_propagates_not_found() {
    let (service, _) = build_service();

    match service.get(&SubmissionId("missing".to_string())).await {
        Err(SubmissionServiceError::Store(StoreError::NotFound)) => {}
        other => panic!("expected not found error, got {other:?}"),
    }
}

#[tokio::test]
async fn list_and_export_apply_the_filter() {
    let store = seeded_store().await;
    let service = SubmissionService::new(store);

    let offers = service
        .list(SubmissionFilter::new(StatusFilter::New, TypeFilter::OfferClaim))
        .await
        .expect("list succeeds");
    assert_eq!(offers.len(), 1);
    assert_eq!(offers[0].name, "Ravi");

    let export = service
        .export(SubmissionFilter::default(), at(16, 8))
        .await
        .expect("export renders");
    assert_eq!(export.rows, 3);
    assert!(export.body.contains("\"₹24,999 (was ₹39,999)\""));

    let stats = service.stats().await.expect("stats succeed");
    assert_eq!(stats.total, 3);
    assert_eq!(stats.new, 3);
}

#[tokio::test]
async fn store_outages_surface_as_store_errors() {
    let service = SubmissionService::new(Arc::new(UnavailableStore::default()));

    assert!(matches!(
        service.submit(contact_form()).await,
        Err(SubmissionServiceError::Store(StoreError::Unavailable(_)))
    ));
    assert!(matches!(
        service.list(SubmissionFilter::default()).await,
        Err(SubmissionServiceError::Store(StoreError::Unavailable(_)))
    ));
}
