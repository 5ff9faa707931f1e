use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::scoring::artifacts::{ArtifactError, ArtifactKind, Classifier, Scaler};
use crate::scoring::engine::CredibilityEngine;
use crate::scoring::features::FEATURE_COUNT;
use crate::scoring::router::scoring_router;
use crate::scoring::session::SessionInput;

/// Passes features through untouched and records what it saw.
#[derive(Default)]
pub(super) struct RecordingScaler {
    pub(super) seen: Mutex<Vec<Vec<f64>>>,
}

impl Scaler for RecordingScaler {
    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, ArtifactError> {
        self.seen
            .lock()
            .expect("scaler mutex poisoned")
            .push(features.to_vec());
        Ok(features.to_vec())
    }
}

pub(super) struct FixedProbability {
    credible: f64,
    calls: AtomicUsize,
}

impl FixedProbability {
    pub(super) fn new(credible: f64) -> Self {
        Self {
            credible,
            calls: AtomicUsize::new(0),
        }
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl Classifier for FixedProbability {
    fn predict_proba(&self, scaled: &[f64]) -> Result<[f64; 2], ArtifactError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        if scaled.len() != FEATURE_COUNT {
            return Err(ArtifactError::InputLength {
                kind: ArtifactKind::Classifier,
                expected: FEATURE_COUNT,
                actual: scaled.len(),
            });
        }
        Ok([1.0 - self.credible, self.credible])
    }
}

/// Drops the last column, as a scaler fitted on the wrong table would.
pub(super) struct TruncatingScaler;

impl Scaler for TruncatingScaler {
    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, ArtifactError> {
        Ok(features[..features.len() - 1].to_vec())
    }
}

pub(super) type StubEngine = CredibilityEngine<RecordingScaler, FixedProbability>;

pub(super) fn stub_engine(credible: f64) -> StubEngine {
    CredibilityEngine::new(RecordingScaler::default(), FixedProbability::new(credible))
}

pub(super) fn shared_stub_engine(
    credible: f64,
) -> (StubEngine, Arc<RecordingScaler>, Arc<FixedProbability>) {
    let scaler = Arc::new(RecordingScaler::default());
    let classifier = Arc::new(FixedProbability::new(credible));
    let engine = CredibilityEngine::from_shared(scaler.clone(), classifier.clone());
    (engine, scaler, classifier)
}

pub(super) fn session(rating: f64) -> SessionInput {
    SessionInput {
        duration_minutes: Some(10.0),
        interaction_count: Some(5.0),
        completion_percentage: Some(80.0),
        rating: Some(rating),
        teacher_rating_avg: Some(4.0),
        ..SessionInput::default()
    }
}

pub(super) fn stub_router(credible: f64) -> axum::Router {
    scoring_router(Arc::new(stub_engine(credible)))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
