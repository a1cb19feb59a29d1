use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

use super::domain::{SubmissionId, SubmissionStatus};
use super::filter::SubmissionFilter;
use super::form::{ContactForm, OfferClaimForm, PlanSelectionForm, SubmissionForm};
use super::repository::{StoreError, SubmissionStore};
use super::service::{SubmissionService, SubmissionServiceError};

/// Body of a manual status reassignment.
#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: SubmissionStatus,
}

/// Router builder exposing the lead forms and the admin endpoints.
pub fn submission_router<S>(service: Arc<SubmissionService<S>>) -> Router
where
    S: SubmissionStore + 'static,
{
    Router::new()
        .route("/api/v1/submissions", get(list_handler::<S>))
        .route(
            "/api/v1/submissions/contact",
            post(submit_handler::<S, ContactForm>),
        )
        .route(
            "/api/v1/submissions/offer-claim",
            post(submit_handler::<S, OfferClaimForm>),
        )
        .route(
            "/api/v1/submissions/plan-selection",
            post(submit_handler::<S, PlanSelectionForm>),
        )
        .route("/api/v1/submissions/stats", get(stats_handler::<S>))
        .route("/api/v1/submissions/export", get(export_handler::<S>))
        .route(
            "/api/v1/submissions/:submission_id",
            get(detail_handler::<S>).delete(delete_handler::<S>),
        )
        .route(
            "/api/v1/submissions/:submission_id/view",
            post(view_handler::<S>),
        )
        .route(
            "/api/v1/submissions/:submission_id/status",
            patch(status_handler::<S>),
        )
        .with_state(service)
}

pub(crate) async fn submit_handler<S, F>(
    State(service): State<Arc<SubmissionService<S>>>,
    Json(form): Json<F>,
) -> Response
where
    S: SubmissionStore + 'static,
    F: SubmissionForm + DeserializeOwned + 'static,
{
    match service.submit(form).await {
        Ok(submission) => (StatusCode::CREATED, Json(submission)).into_response(),
        Err(SubmissionServiceError::Invalid(invalid)) => {
            let payload = json!({
                "error": invalid.to_string(),
                "field": invalid.field(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
        Err(_) => {
            let payload = json!({
                "error": F::FAILURE_MESSAGE,
            });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn list_handler<S>(
    State(service): State<Arc<SubmissionService<S>>>,
    filter: Result<Query<SubmissionFilter>, QueryRejection>,
) -> Response
where
    S: SubmissionStore + 'static,
{
    let filter = match filter {
        Ok(Query(filter)) => filter,
        Err(rejection) => return filter_rejection(rejection),
    };
    match service.list(filter).await {
        Ok(submissions) => (StatusCode::OK, Json(submissions)).into_response(),
        Err(other) => error_response(other),
    }
}

pub(crate) async fn stats_handler<S>(State(service): State<Arc<SubmissionService<S>>>) -> Response
where
    S: SubmissionStore + 'static,
{
    match service.stats().await {
        Ok(stats) => (StatusCode::OK, Json(stats)).into_response(),
        Err(other) => error_response(other),
    }
}

pub(crate) async fn export_handler<S>(
    State(service): State<Arc<SubmissionService<S>>>,
    filter: Result<Query<SubmissionFilter>, QueryRejection>,
) -> Response
where
    S: SubmissionStore + 'static,
{
    let filter = match filter {
        Ok(Query(filter)) => filter,
        Err(rejection) => return filter_rejection(rejection),
    };
    match service.export(filter, Utc::now()).await {
        Ok(export) => {
            let disposition = format!("attachment; filename=\"{}\"", export.filename);
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, export.content_type.to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                export.body,
            )
                .into_response()
        }
        Err(other) => error_response(other),
    }
}

pub(crate) async fn detail_handler<S>(
    State(service): State<Arc<SubmissionService<S>>>,
    Path(submission_id): Path<String>,
) -> Response
where
    S: SubmissionStore + 'static,
{
    match service.detail(&SubmissionId(submission_id)).await {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(other) => error_response(other),
    }
}

pub(crate) async fn view_handler<S>(
    State(service): State<Arc<SubmissionService<S>>>,
    Path(submission_id): Path<String>,
) -> Response
where
    S: SubmissionStore + 'static,
{
    match service.view(&SubmissionId(submission_id)).await {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(other) => error_response(other),
    }
}

pub(crate) async fn status_handler<S>(
    State(service): State<Arc<SubmissionService<S>>>,
    Path(submission_id): Path<String>,
    Json(update): Json<StatusUpdate>,
) -> Response
where
    S: SubmissionStore + 'static,
{
    let id = SubmissionId(submission_id);
    match service.update_status(&id, update.status).await {
        Ok(()) => {
            let payload = json!({
                "id": id,
                "status": update.status,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(other) => error_response(other),
    }
}

pub(crate) async fn delete_handler<S>(
    State(service): State<Arc<SubmissionService<S>>>,
    Path(submission_id): Path<String>,
) -> Response
where
    S: SubmissionStore + 'static,
{
    match service.delete(&SubmissionId(submission_id)).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(other) => error_response(other),
    }
}

fn filter_rejection(rejection: QueryRejection) -> Response {
    let payload = json!({ "error": rejection.body_text() });
    (StatusCode::BAD_REQUEST, Json(payload)).into_response()
}

fn error_response(error: SubmissionServiceError) -> Response {
    let status = match &error {
        SubmissionServiceError::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
        SubmissionServiceError::Store(StoreError::NotFound) => StatusCode::NOT_FOUND,
        SubmissionServiceError::Store(StoreError::Unavailable(_))
        | SubmissionServiceError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let message = match &error {
        SubmissionServiceError::Store(StoreError::Unavailable(_)) => {
            "The submission store is unavailable. Please try again.".to_string()
        }
        SubmissionServiceError::Export(_) => "Failed to export CSV. Please try again.".to_string(),
        other => other.to_string(),
    };
    (status, Json(json!({ "error": message }))).into_response()
}
