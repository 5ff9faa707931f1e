use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Raw session attributes as received from the tutoring platform.
///
/// Every field may be omitted; missing values resolve to the documented defaults through
/// the accessor methods. The payload must be a JSON object, and a field that is present
/// must carry a value of its type, so `null` is rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
#[serde(rename_all = "camelCase")]
pub struct SessionInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interaction_count: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_percentage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher_rating_avg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher_credible_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_consistency: Option<f64>,
}

/// Wire shape of a session object; absent keys stay `None`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionFields {
    #[serde(default, deserialize_with = "present")]
    duration_minutes: Option<f64>,
    #[serde(default, deserialize_with = "present")]
    interaction_count: Option<f64>,
    #[serde(default, deserialize_with = "present")]
    completion_percentage: Option<f64>,
    #[serde(default, deserialize_with = "present")]
    rating: Option<f64>,
    #[serde(default, deserialize_with = "present")]
    teacher_rating_avg: Option<f64>,
    #[serde(default, deserialize_with = "present")]
    comment: Option<String>,
    #[serde(default, deserialize_with = "present")]
    teacher_credible_ratio: Option<f64>,
    #[serde(default, deserialize_with = "present")]
    student_consistency: Option<f64>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl TryFrom<Map<String, Value>> for SessionInput {
    type Error = serde_json::Error;

    fn try_from(object: Map<String, Value>) -> Result<Self, Self::Error> {
        let fields: SessionFields = serde_json::from_value(Value::Object(object))?;
        Ok(Self {
            duration_minutes: fields.duration_minutes,
            interaction_count: fields.interaction_count,
            completion_percentage: fields.completion_percentage,
            rating: fields.rating,
            teacher_rating_avg: fields.teacher_rating_avg,
            comment: fields.comment,
            teacher_credible_ratio: fields.teacher_credible_ratio,
            student_consistency: fields.student_consistency,
        })
    }
}

impl SessionInput {
    pub const DEFAULT_TEACHER_CREDIBLE_RATIO: f64 = 0.9;
    pub const DEFAULT_STUDENT_CONSISTENCY: f64 = 0.5;

    pub fn duration_minutes(&self) -> f64 {
        self.duration_minutes.unwrap_or(0.0)
    }

    pub fn interaction_count(&self) -> f64 {
        self.interaction_count.unwrap_or(0.0)
    }

    pub fn completion_percentage(&self) -> f64 {
        self.completion_percentage.unwrap_or(0.0)
    }

    pub fn rating(&self) -> f64 {
        self.rating.unwrap_or(0.0)
    }

    pub fn teacher_rating_avg(&self) -> f64 {
        self.teacher_rating_avg.unwrap_or(0.0)
    }

    pub fn comment(&self) -> &str {
        self.comment.as_deref().unwrap_or("")
    }

    /// Share of the teacher's past reviews judged credible.
    pub fn teacher_credible_ratio(&self) -> f64 {
        self.teacher_credible_ratio
            .unwrap_or(Self::DEFAULT_TEACHER_CREDIBLE_RATIO)
    }

    pub fn student_consistency(&self) -> f64 {
        self.student_consistency
            .unwrap_or(Self::DEFAULT_STUDENT_CONSISTENCY)
    }

    /// Returns a copy with every absent field replaced by its default value.
    pub fn with_defaults(&self) -> Self {
        Self {
            duration_minutes: Some(self.duration_minutes()),
            interaction_count: Some(self.interaction_count()),
            completion_percentage: Some(self.completion_percentage()),
            rating: Some(self.rating()),
            teacher_rating_avg: Some(self.teacher_rating_avg()),
            comment: Some(self.comment().to_string()),
            teacher_credible_ratio: Some(self.teacher_credible_ratio()),
            student_consistency: Some(self.student_consistency()),
        }
    }
}
