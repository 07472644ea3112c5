use crate::infra::{default_rule_thresholds, AppState};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracient::screening::income::{
    extract_features, screening_router, AlertPublisher, AnomalyClassifier, CaseRepository,
    ClassifierSignal, IncomeScreeningService, MonthlyIncomeSeries, PatternDescriptor,
    PatternSummary, RiskAssessment, ScreeningEngine,
};

#[derive(Debug, Deserialize)]
pub(crate) struct AssessmentRequest {
    /// Monthly income amounts, oldest month first.
    pub(crate) monthly_incomes: Vec<f64>,
    #[serde(default)]
    pub(crate) patterns: PatternDescriptor,
    /// Optional anomaly probability (0..=100) from an external classifier.
    #[serde(default)]
    pub(crate) anomaly_probability: Option<f64>,
}

#[derive(Debug, Serialize)]
pub(crate) struct AssessmentResponse {
    pub(crate) assessment: RiskAssessment,
    pub(crate) summary: PatternSummary,
}

pub(crate) fn with_screening_routes<R, C, A>(
    service: Arc<IncomeScreeningService<R, C, A>>,
) -> axum::Router
where
    R: CaseRepository + 'static,
    C: AnomalyClassifier + 'static,
    A: AlertPublisher + 'static,
{
    screening_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/screening/assess",
            axum::routing::post(assess_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Stateless assessment: score an income history without persisting a case.
pub(crate) async fn assess_endpoint(
    Json(payload): Json<AssessmentRequest>,
) -> Result<Json<AssessmentResponse>, (StatusCode, Json<serde_json::Value>)> {
    let AssessmentRequest {
        monthly_incomes,
        patterns,
        anomaly_probability,
    } = payload;

    let series = MonthlyIncomeSeries::new(monthly_incomes).map_err(|err| {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": err.to_string() })),
        )
    })?;

    let engine = ScreeningEngine::new(default_rule_thresholds());
    let features = extract_features(&series, &patterns);
    let assessment = engine.assess_features(
        &features,
        &patterns,
        ClassifierSignal::from_probability(anomaly_probability),
    );
    let summary = PatternSummary::from_features(&features, &patterns);

    Ok(Json(AssessmentResponse {
        assessment,
        summary,
    }))
}
