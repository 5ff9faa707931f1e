use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::artifacts::{
    ArtifactError, Classifier, LogisticRegressionModel, Scaler, StandardScaler,
};
use super::features::FeatureVector;
use super::policy::BonusTier;
use super::session::SessionInput;
use crate::config::ArtifactConfig;

/// Bonus decision returned for a scored session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringResult {
    pub credibility_score: f64,
    pub bonus_percentage: f64,
    pub status: BonusTier,
}

/// Error raised while scoring a session.
#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error(transparent)]
    Artifact(#[from] ArtifactError),
    #[error("classifier returned invalid credibility probability {0}")]
    InvalidProbability(f64),
    #[error("invalid session payload: {0}")]
    InvalidPayload(String),
}

/// Scoring pipeline over a loaded scaler and classifier pair.
pub struct CredibilityEngine<S, C> {
    scaler: Arc<S>,
    classifier: Arc<C>,
}

/// Engine backed by the JSON artifact exports.
pub type LoadedEngine = CredibilityEngine<StandardScaler, LogisticRegressionModel>;

impl LoadedEngine {
    pub fn load(config: &ArtifactConfig) -> Result<Self, ArtifactError> {
        let scaler = StandardScaler::from_path(&config.scaler_path)?;
        let classifier = LogisticRegressionModel::from_path(&config.model_path)?;

        info!(
            scaler = %config.scaler_path.display(),
            model = %config.model_path.display(),
            "credibility artifacts loaded"
        );

        Ok(Self::new(scaler, classifier))
    }
}

impl<S, C> CredibilityEngine<S, C>
where
    S: Scaler,
    C: Classifier,
{
    pub fn new(scaler: S, classifier: C) -> Self {
        Self::from_shared(Arc::new(scaler), Arc::new(classifier))
    }

    pub fn from_shared(scaler: Arc<S>, classifier: Arc<C>) -> Self {
        Self { scaler, classifier }
    }

    /// Score a raw session end to end.
    pub fn score(&self, session: &SessionInput) -> Result<ScoringResult, ScoringError> {
        let features = FeatureVector::from_session(session);
        self.score_features(&features)
    }

    /// Score an already derived feature vector; the bonus uses its rating column.
    pub fn score_features(&self, features: &FeatureVector) -> Result<ScoringResult, ScoringError> {
        let credibility_score = self.credibility_score(features)?;
        let tier = BonusTier::decide(credibility_score, features.rating());

        debug!(
            credibility_score,
            rating = features.rating(),
            status = tier.label(),
            "session scored"
        );

        Ok(ScoringResult {
            credibility_score,
            bonus_percentage: tier.bonus_percentage(),
            status: tier,
        })
    }

    /// Probability mass of the credible class.
    pub fn credibility_score(&self, features: &FeatureVector) -> Result<f64, ScoringError> {
        let scaled = self.scaler.transform(features.as_slice())?;
        let [_, credible] = self.classifier.predict_proba(&scaled)?;

        if !(0.0..=1.0).contains(&credible) {
            return Err(ScoringError::InvalidProbability(credible));
        }

        Ok(credible)
    }
}
