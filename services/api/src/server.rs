use crate::cli::ServeArgs;
use crate::infra::{override_artifacts, AppState};
use crate::routes::with_operational_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use session_credibility::config::AppConfig;
use session_credibility::error::AppError;
use session_credibility::scoring::{scoring_router, LoadedEngine};
use session_credibility::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
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
    config.artifacts = override_artifacts(config.artifacts, args.scaler.take(), args.model.take());

    telemetry::init(&config.telemetry)?;

    // Artifacts must load before the listener binds.
    let engine = Arc::new(LoadedEngine::load(&config.artifacts)?);

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let app = with_operational_routes(scoring_router(engine))
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        scaler = %config.artifacts.scaler_path.display(),
        model = %config.artifacts.model_path.display(),
        "session credibility service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
