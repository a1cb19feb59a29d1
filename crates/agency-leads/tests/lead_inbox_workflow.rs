//! End-to-end behavior of the lead inbox through the public facade.
//!
//! Visitors submit through the HTTP router while an admin session watches the
//! same store through a live subscription.

use std::sync::Arc;

use agency_leads::config::SubmissionConfig;
use agency_leads::submissions::{
    submission_router, InMemorySubmissionStore, Moderator, OfferClaimForm, OfferDetails,
    StatusFilter, SubmissionService, SubmissionStatus, SubmissionStore, SubmissionType,
    SubmissionWriter, TypeFilter,
};
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use chrono::Utc;
use serde_json::json;
use tower::ServiceExt;

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).expect("json body")))
        .expect("request builds")
}

#[tokio::test]
async fn submissions_reach_the_admin_session_and_export() {
    let store = Arc::new(InMemorySubmissionStore::new());
    let router = submission_router(Arc::new(SubmissionService::new(store.clone())));
    let mut moderator = Moderator::open(store.clone());

    let response = router
        .clone()
        .oneshot(post_json(
            "/api/v1/submissions/contact",
            json!({
                "name": "Asha",
                "email": "asha@x.com",
                "subject": "Website",
                "message": "Need a \"fast\" site"
            }),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = router
        .oneshot(post_json(
            "/api/v1/submissions/plan-selection",
            json!({
                "name": "Meera",
                "email": "meera@example.com",
                "phone": "+91 90000 00000",
                "message": "Bakery storefront",
                "selectedPlan": "Growth",
                "planPrice": "₹49,999",
                "projectTimeline": "1-month"
            }),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::CREATED);

    moderator.wait_for_change().await.expect("snapshot delivered");
    assert_eq!(moderator.submissions().len(), 2);
    assert_eq!(moderator.stats().new, 2);

    let contact_id = moderator
        .submissions()
        .iter()
        .find(|submission| submission.kind() == SubmissionType::Contact)
        .map(|submission| submission.id.clone())
        .expect("contact listed");
    moderator.select(&contact_id).await.expect("select succeeds");

    moderator.set_status_filter(StatusFilter::Read);
    moderator.set_type_filter(TypeFilter::Contact);
    let export = moderator.export(Utc::now()).expect("export renders");

    assert_eq!(export.rows, 1);
    assert_eq!(export.body.lines().count(), 2);
    assert!(export.body.contains("\"Need a \"\"fast\"\" site\""));
    assert!(export.filename.starts_with("submissions-"));
}

#[tokio::test]
async fn offer_writer_feeds_the_live_list() {
    let store = Arc::new(InMemorySubmissionStore::new());
    let mut moderator = Moderator::open(store.clone());

    let offer = OfferDetails {
        offer_title: "Festive SEO Audit".to_string(),
        offer_price: "₹4,999".to_string(),
        original_price: "₹9,999".to_string(),
        savings: "₹5,000".to_string(),
    };
    let writer = SubmissionWriter::new(
        store.clone(),
        OfferClaimForm::for_offer(offer.clone()),
        SubmissionConfig::default(),
    );
    writer.edit(|draft| {
        draft.name = "Kiran".to_string();
        draft.email = "kiran@example.com".to_string();
        draft.phone = "+91 91111 11111".to_string();
        draft.message = "Please audit our store".to_string();
    });

    let stored = writer.submit().await.expect("offer stored");
    assert_eq!(writer.draft(), OfferClaimForm::for_offer(offer));

    assert!(moderator.sync());
    assert_eq!(moderator.submissions()[0].id, stored.id);
    assert_eq!(moderator.submissions()[0].status, SubmissionStatus::New);

    moderator
        .update_status(&stored.id, SubmissionStatus::Replied)
        .await
        .expect("status updates");
    let persisted = store
        .fetch(&stored.id)
        .await
        .expect("fetch succeeds")
        .expect("record present");
    assert_eq!(persisted.status, SubmissionStatus::Replied);
}
