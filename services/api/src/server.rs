use crate::cli::ServeArgs;
use crate::infra::{
    default_ranking_config, AppState, InMemoryRankingHistory, InMemoryWithholdAlerts,
};
use crate::routes::with_induction_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use fleetrank::config::AppConfig;
use fleetrank::error::AppError;
use fleetrank::induction::InductionPlanningService;
use fleetrank::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
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

    let history = Arc::new(InMemoryRankingHistory::with_limit(config.history_limit));
    let alerts = Arc::new(InMemoryWithholdAlerts::default());
    let planning_service =
        Arc::new(InductionPlanningService::new(history, alerts, default_ranking_config())?);

    let app = with_induction_routes(planning_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "induction ranking service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
