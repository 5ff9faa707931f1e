use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tracing::warn;

use super::artifacts::{Classifier, Scaler};
use super::engine::{CredibilityEngine, ScoringError};
use super::features::FEATURE_NAMES;
use super::session::SessionInput;

/// Router builder exposing the bonus prediction endpoint.
pub fn scoring_router<S, C>(engine: Arc<CredibilityEngine<S, C>>) -> Router
where
    S: Scaler + 'static,
    C: Classifier + 'static,
{
    Router::new()
        .route("/predict-bonus", post(predict_bonus_handler::<S, C>))
        .route("/api/v1/model/features", get(feature_order_handler))
        .with_state(engine)
}

pub(crate) async fn predict_bonus_handler<S, C>(
    State(engine): State<Arc<CredibilityEngine<S, C>>>,
    payload: Result<Json<SessionInput>, JsonRejection>,
) -> Response
where
    S: Scaler + 'static,
    C: Classifier + 'static,
{
    let outcome = payload
        .map_err(|rejection| ScoringError::InvalidPayload(rejection.body_text()))
        .and_then(|Json(session)| engine.score(&session));

    match outcome {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(error) => {
            warn!(%error, "session scoring failed");
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn feature_order_handler() -> Json<serde_json::Value> {
    Json(json!({ "features": FEATURE_NAMES }))
}
