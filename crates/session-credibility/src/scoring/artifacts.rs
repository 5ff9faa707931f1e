//! Contracts and loaders for the offline-trained normalization and classifier artifacts.
//!
//! Both artifacts are exported by the training pipeline as JSON documents and loaded
//! once at startup. The pipeline only depends on the [`Scaler`] and [`Classifier`]
//! traits, so alternative inference runtimes can be slotted in without touching the
//! feature or decision logic.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::features::{FEATURE_COUNT, FEATURE_NAMES};

/// Pre-fitted normalization transform applied to the raw feature vector.
pub trait Scaler: Send + Sync {
    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, ArtifactError>;
}

/// Pre-trained binary classifier returning `[P(not credible), P(credible)]`.
pub trait Classifier: Send + Sync {
    fn predict_proba(&self, scaled: &[f64]) -> Result<[f64; 2], ArtifactError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Scaler,
    Classifier,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::Scaler => write!(f, "scaler"),
            ArtifactKind::Classifier => write!(f, "classifier"),
        }
    }
}

/// Failures loading an artifact or invoking it with a malformed vector.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("failed to read {kind} artifact at {}: {source}", .path.display())]
    Read {
        kind: ArtifactKind,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {kind} artifact at {}: {source}", .path.display())]
    Parse {
        kind: ArtifactKind,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{kind} artifact declares {actual} {field} entries, expected {expected}")]
    Shape {
        kind: ArtifactKind,
        field: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("{kind} artifact feature {position} is '{found}', expected '{expected}'")]
    FeatureOrder {
        kind: ArtifactKind,
        position: usize,
        expected: &'static str,
        found: String,
    },
    #[error("scaler artifact has unusable scale {value} for feature '{feature}'")]
    InvalidScale { feature: &'static str, value: f64 },
    #[error("{kind} received {actual} features, expected {expected}")]
    InputLength {
        kind: ArtifactKind,
        expected: usize,
        actual: usize,
    },
}

/// Standardization transform: `(x - mean) / scale` per column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let scaler: Self = read_artifact(ArtifactKind::Scaler, path.as_ref())?;
        scaler.validate()?;
        Ok(scaler)
    }

    pub fn validate(&self) -> Result<(), ArtifactError> {
        let kind = ArtifactKind::Scaler;
        check_feature_names(kind, self.feature_names.as_deref())?;
        check_shape(kind, "mean", self.mean.len())?;
        check_shape(kind, "scale", self.scale.len())?;

        for (feature, value) in FEATURE_NAMES.iter().zip(&self.scale) {
            if !value.is_finite() || *value == 0.0 {
                return Err(ArtifactError::InvalidScale {
                    feature: *feature,
                    value: *value,
                });
            }
        }

        Ok(())
    }
}

impl Scaler for StandardScaler {
    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, ArtifactError> {
        check_input(ArtifactKind::Scaler, self.mean.len(), features.len())?;

        Ok(features
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(value, (mean, scale))| (value - mean) / scale)
            .collect())
    }
}

/// Logistic regression over the normalized features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegressionModel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LogisticRegressionModel {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let model: Self = read_artifact(ArtifactKind::Classifier, path.as_ref())?;
        model.validate()?;
        Ok(model)
    }

    pub fn validate(&self) -> Result<(), ArtifactError> {
        let kind = ArtifactKind::Classifier;
        check_feature_names(kind, self.feature_names.as_deref())?;
        check_shape(kind, "coefficients", self.coefficients.len())
    }

    fn decision_function(&self, scaled: &[f64]) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(scaled)
                .map(|(weight, value)| weight * value)
                .sum::<f64>()
    }
}

impl Classifier for LogisticRegressionModel {
    fn predict_proba(&self, scaled: &[f64]) -> Result<[f64; 2], ArtifactError> {
        check_input(
            ArtifactKind::Classifier,
            self.coefficients.len(),
            scaled.len(),
        )?;

        let credible = sigmoid(self.decision_function(scaled));
        Ok([1.0 - credible, credible])
    }
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let exp = z.exp();
        exp / (1.0 + exp)
    }
}

fn read_artifact<T: DeserializeOwned>(
    kind: ArtifactKind,
    path: &Path,
) -> Result<T, ArtifactError> {
    let bytes = fs::read(path).map_err(|source| ArtifactError::Read {
        kind,
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_slice(&bytes).map_err(|source| ArtifactError::Parse {
        kind,
        path: path.to_path_buf(),
        source,
    })
}

fn check_feature_names(
    kind: ArtifactKind,
    names: Option<&[String]>,
) -> Result<(), ArtifactError> {
    let Some(names) = names else {
        return Ok(());
    };

    check_shape(kind, "feature_names", names.len())?;
    for (position, (expected, found)) in FEATURE_NAMES.iter().zip(names).enumerate() {
        if *expected != found.as_str() {
            return Err(ArtifactError::FeatureOrder {
                kind,
                position,
                expected: *expected,
                found: found.clone(),
            });
        }
    }
    Ok(())
}

fn check_shape(
    kind: ArtifactKind,
    field: &'static str,
    actual: usize,
) -> Result<(), ArtifactError> {
    if actual == FEATURE_COUNT {
        Ok(())
    } else {
        Err(ArtifactError::Shape {
            kind,
            field,
            expected: FEATURE_COUNT,
            actual,
        })
    }
}

fn check_input(kind: ArtifactKind, expected: usize, actual: usize) -> Result<(), ArtifactError> {
    if expected == actual {
        Ok(())
    } else {
        Err(ArtifactError::InputLength {
            kind,
            expected,
            actual,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn names() -> Vec<String> {
        FEATURE_NAMES.iter().map(|name| name.to_string()).collect()
    }

    fn scaler() -> StandardScaler {
        StandardScaler {
            feature_names: Some(names()),
            mean: vec![30.0, 10.0, 70.0, 4.0, 0.5, 0.4, 40.0, 0.85, 0.6],
            scale: vec![15.0, 5.0, 20.0, 1.0, 0.5, 0.2, 30.0, 0.1, 0.2],
        }
    }

    #[test]
    fn scaler_standardizes_each_column() {
        let scaled = scaler()
            .transform(&[45.0, 20.0, 90.0, 5.0, 1.0, 0.8, 70.0, 0.95, 0.8])
            .expect("transform succeeds");

        let expected = [1.0, 2.0, 1.0, 1.0, 1.0, 2.0, 1.0, 1.0, 1.0];
        for (actual, expected) in scaled.iter().zip(expected) {
            assert!((actual - expected).abs() < 1e-9, "{actual} != {expected}");
        }
    }

    #[test]
    fn scaler_rejects_short_vectors() {
        let err = scaler()
            .transform(&[1.0, 2.0, 3.0])
            .expect_err("length mismatch");
        assert!(matches!(
            err,
            ArtifactError::InputLength {
                kind: ArtifactKind::Scaler,
                expected: 9,
                actual: 3
            }
        ));
    }

    #[test]
    fn scaler_validation_rejects_zero_scale() {
        let mut scaler = scaler();
        scaler.scale[6] = 0.0;
        let err = scaler.validate().expect_err("zero scale is unusable");
        assert!(matches!(
            err,
            ArtifactError::InvalidScale {
                feature: "comment_length",
                ..
            }
        ));
    }

    #[test]
    fn validation_rejects_reordered_features() {
        let mut swapped = names();
        swapped.swap(4, 5);
        let model = LogisticRegressionModel {
            feature_names: Some(swapped),
            coefficients: vec![0.0; FEATURE_COUNT],
            intercept: 0.0,
        };

        let err = model.validate().expect_err("order mismatch");
        assert!(matches!(
            err,
            ArtifactError::FeatureOrder {
                kind: ArtifactKind::Classifier,
                position: 4,
                expected: "rating_deviation",
                ..
            }
        ));
    }

    #[test]
    fn validation_rejects_wrong_coefficient_count() {
        let model = LogisticRegressionModel {
            feature_names: None,
            coefficients: vec![0.1; 10],
            intercept: 0.0,
        };
        let err = model.validate().expect_err("ten coefficients");
        assert!(err.to_string().contains("10 coefficients"));
    }

    #[test]
    fn logistic_model_returns_complementary_probabilities() {
        let model = LogisticRegressionModel {
            feature_names: None,
            coefficients: vec![1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            intercept: 0.0,
        };

        let [low, high] = model
            .predict_proba(&[0.0; FEATURE_COUNT])
            .expect("prediction succeeds");
        assert_eq!(low, 0.5);
        assert_eq!(high, 0.5);

        let [low, high] = model
            .predict_proba(&[2.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0])
            .expect("prediction succeeds");
        assert!(high > 0.88 && high < 0.89);
        assert!((low + high - 1.0).abs() < 1e-12);
    }

    #[test]
    fn sigmoid_saturates_without_overflow() {
        assert_eq!(sigmoid(-1000.0), 0.0);
        assert_eq!(sigmoid(1000.0), 1.0);
    }

    #[test]
    fn artifacts_deserialize_without_feature_names() {
        let scaler: StandardScaler = serde_json::from_value(json!({
            "mean": [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            "scale": [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0]
        }))
        .expect("scaler parses");
        assert!(scaler.feature_names.is_none());
        assert!(scaler.validate().is_ok());
    }

    #[test]
    fn missing_artifact_file_reports_path() {
        let err = StandardScaler::from_path("does/not/exist/scaler.json")
            .expect_err("file is missing");
        assert!(matches!(err, ArtifactError::Read { .. }));
        assert!(err.to_string().contains("does/not/exist/scaler.json"));
    }
}
