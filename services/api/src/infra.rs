use metrics_exporter_prometheus::PrometheusHandle;
use session_credibility::config::ArtifactConfig;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Applies command-line artifact overrides on top of the configured paths.
pub(crate) fn override_artifacts(
    mut artifacts: ArtifactConfig,
    scaler: Option<PathBuf>,
    model: Option<PathBuf>,
) -> ArtifactConfig {
    if let Some(path) = scaler {
        artifacts.scaler_path = path;
    }
    if let Some(path) = model {
        artifacts.model_path = path;
    }
    artifacts
}
