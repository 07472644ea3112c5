use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::classifier::AnomalyClassifier;
use super::domain::{CaseId, CaseSubmission};
use super::repository::{AlertPublisher, CaseRepository, RepositoryError};
use super::service::{IncomeScreeningService, ScreeningServiceError};

/// Router builder exposing HTTP endpoints for intake and assessment.
pub fn screening_router<R, C, A>(service: Arc<IncomeScreeningService<R, C, A>>) -> Router
where
    R: CaseRepository + 'static,
    C: AnomalyClassifier + 'static,
    A: AlertPublisher + 'static,
{
    Router::new()
        .route("/api/v1/screening/cases", post(submit_handler::<R, C, A>))
        .route(
            "/api/v1/screening/cases/:case_id",
            get(status_handler::<R, C, A>),
        )
        .route(
            "/api/v1/screening/cases/:case_id/assessment",
            post(assess_handler::<R, C, A>),
        )
        .with_state(service)
}

pub(crate) async fn submit_handler<R, C, A>(
    State(service): State<Arc<IncomeScreeningService<R, C, A>>>,
    axum::Json(submission): axum::Json<CaseSubmission>,
) -> Response
where
    R: CaseRepository + 'static,
    C: AnomalyClassifier + 'static,
    A: AlertPublisher + 'static,
{
    match service.submit(submission) {
        Ok(record) => {
            let view = record.status_view();
            (StatusCode::ACCEPTED, axum::Json(view)).into_response()
        }
        Err(ScreeningServiceError::Intake(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(ScreeningServiceError::Repository(RepositoryError::Conflict)) => {
            let payload = json!({
                "error": "case already exists",
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn status_handler<R, C, A>(
    State(service): State<Arc<IncomeScreeningService<R, C, A>>>,
    Path(case_id): Path<String>,
) -> Response
where
    R: CaseRepository + 'static,
    C: AnomalyClassifier + 'static,
    A: AlertPublisher + 'static,
{
    let id = CaseId(case_id);
    match service.get(&id) {
        Ok(record) => {
            let view = record.status_view();
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(ScreeningServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "case_id": id.0,
                "error": "case not found",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn assess_handler<R, C, A>(
    State(service): State<Arc<IncomeScreeningService<R, C, A>>>,
    Path(case_id): Path<String>,
) -> Response
where
    R: CaseRepository + 'static,
    C: AnomalyClassifier + 'static,
    A: AlertPublisher + 'static,
{
    let id = CaseId(case_id);
    match service.assess(&id) {
        Ok(assessment) => (StatusCode::OK, axum::Json(assessment)).into_response(),
        Err(ScreeningServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "case_id": id.0,
                "error": "case not found",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
