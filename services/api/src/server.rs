use crate::cli::ServeArgs;
use crate::infra::{
    default_rule_thresholds, AppState, InMemoryAlertPublisher, InMemoryCaseRepository,
};
use crate::routes::with_screening_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracient::config::AppConfig;
use tracient::error::AppError;
use tracient::screening::income::{IncomeScreeningService, OfflineClassifier};
use tracient::telemetry;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryCaseRepository::default());
    let alerts = Arc::new(InMemoryAlertPublisher::default());
    let classifier = Arc::new(OfflineClassifier);
    let screening_service = Arc::new(IncomeScreeningService::new(
        repository,
        classifier,
        alerts,
        default_rule_thresholds(),
    ));

    let app = with_screening_routes(screening_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "income screening service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
