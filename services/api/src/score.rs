use crate::infra::override_artifacts;
use clap::Args;
use serde::Serialize;
use session_credibility::config::AppConfig;
use session_credibility::error::AppError;
use session_credibility::scoring::{
    FeatureVector, LoadedEngine, NamedFeature, ScoringResult, SessionInput,
};
use std::fs;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// JSON file holding a single session payload
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Override the configured scaler artifact path
    #[arg(long)]
    pub(crate) scaler: Option<PathBuf>,
    /// Override the configured classifier artifact path
    #[arg(long)]
    pub(crate) model: Option<PathBuf>,
    /// Print the derived feature vector alongside the result
    #[arg(long)]
    pub(crate) show_features: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct ScoreReport {
    #[serde(flatten)]
    pub(crate) result: ScoringResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) features: Option<Vec<NamedFeature>>,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        input,
        scaler,
        model,
        show_features,
    } = args;

    let config = AppConfig::load()?;
    let artifacts = override_artifacts(config.artifacts, scaler, model);
    let engine = LoadedEngine::load(&artifacts)?;

    let raw = fs::read_to_string(&input)?;
    let session = parse_session(&raw)?;
    let report = score_session(&engine, &session, show_features)?;

    println!("{}", render_report(&report)?);
    Ok(())
}

pub(crate) fn parse_session(raw: &str) -> Result<SessionInput, AppError> {
    serde_json::from_str(raw).map_err(AppError::Input)
}

pub(crate) fn render_report(report: &ScoreReport) -> Result<String, AppError> {
    serde_json::to_string_pretty(report).map_err(AppError::Render)
}

pub(crate) fn score_session(
    engine: &LoadedEngine,
    session: &SessionInput,
    show_features: bool,
) -> Result<ScoreReport, AppError> {
    let features = FeatureVector::from_session(session);
    let result = engine.score_features(&features)?;

    Ok(ScoreReport {
        result,
        features: show_features.then(|| features.named()),
    })
}
