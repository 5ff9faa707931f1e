use serde::Serialize;

use super::session::SessionInput;

pub const FEATURE_COUNT: usize = 9;

/// Column order the scaler and classifier were fitted on.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "durationMinutes",
    "interactionCount",
    "completionPercentage",
    "rating",
    "rating_deviation",
    "interaction_density",
    "comment_length",
    "teacherCredibleRatio",
    "studentConsistency",
];

const DURATION: usize = 0;
const INTERACTIONS: usize = 1;
const COMPLETION: usize = 2;
const RATING: usize = 3;
const RATING_DEVIATION: usize = 4;
const INTERACTION_DENSITY: usize = 5;
const COMMENT_LENGTH: usize = 6;
const TEACHER_CREDIBLE_RATIO: usize = 7;
const STUDENT_CONSISTENCY: usize = 8;

/// Model-ready features for one session, stored in [`FEATURE_NAMES`] order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    values: [f64; FEATURE_COUNT],
}

/// A single feature paired with its column name.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NamedFeature {
    pub name: &'static str,
    pub value: f64,
}

impl FeatureVector {
    pub fn from_session(session: &SessionInput) -> Self {
        let duration = session.duration_minutes();
        let interactions = session.interaction_count();
        let rating = session.rating();

        // Non-positive durations divide by one.
        let duration_safe = if duration > 0.0 { duration } else { 1.0 };

        let mut values = [0.0; FEATURE_COUNT];
        values[DURATION] = duration;
        values[INTERACTIONS] = interactions;
        values[COMPLETION] = session.completion_percentage();
        values[RATING] = rating;
        values[RATING_DEVIATION] = (rating - session.teacher_rating_avg()).abs();
        values[INTERACTION_DENSITY] = interactions / duration_safe;
        values[COMMENT_LENGTH] = session.comment().chars().count() as f64;
        values[TEACHER_CREDIBLE_RATIO] = session.teacher_credible_ratio();
        values[STUDENT_CONSISTENCY] = session.student_consistency();

        Self { values }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        FEATURE_NAMES
            .iter()
            .position(|candidate| *candidate == name)
            .map(|index| self.values[index])
    }

    pub fn named(&self) -> Vec<NamedFeature> {
        FEATURE_NAMES
            .iter()
            .zip(self.values.iter())
            .map(|(name, value)| NamedFeature {
                name: *name,
                value: *value,
            })
            .collect()
    }

    pub fn rating(&self) -> f64 {
        self.values[RATING]
    }

    pub fn rating_deviation(&self) -> f64 {
        self.values[RATING_DEVIATION]
    }

    pub fn interaction_density(&self) -> f64 {
        self.values[INTERACTION_DENSITY]
    }

    pub fn comment_length(&self) -> f64 {
        self.values[COMMENT_LENGTH]
    }
}

impl From<&SessionInput> for FeatureVector {
    fn from(session: &SessionInput) -> Self {
        Self::from_session(session)
    }
}
