//! Session credibility scoring pipeline.
//!
//! A [`SessionInput`] is turned into a [`FeatureVector`], normalized by a [`Scaler`],
//! classified by a [`Classifier`], and mapped to a [`BonusTier`] by the fixed bonus
//! policy. The engine holds the only cross-request state: the loaded artifact pair,
//! shared read-only behind `Arc`.

pub mod artifacts;
pub mod engine;
pub mod features;
pub mod policy;
pub mod router;
pub mod session;

#[cfg(test)]
mod tests;

pub use artifacts::{
    ArtifactError, ArtifactKind, Classifier, LogisticRegressionModel, Scaler, StandardScaler,
};
pub use engine::{CredibilityEngine, LoadedEngine, ScoringError, ScoringResult};
pub use features::{FeatureVector, NamedFeature, FEATURE_COUNT, FEATURE_NAMES};
pub use policy::BonusTier;
pub use router::scoring_router;
pub use session::SessionInput;
