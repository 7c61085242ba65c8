use crate::errors::{ClientError, ValidationError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::fmt;

pub const FIELDS_REQUIRED: &str = "All fields are required!";
pub const NAME_REQUIRED: &str = "Please enter a student name!";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordSubmission {
    pub name: String,
    pub course: String,
    pub score: String,
}

impl RecordSubmission {
    pub fn from_fields(name: &str, course: &str, score: &str) -> Result<Self, ValidationError> {
        let (name, course, score) = (name.trim(), course.trim(), score.trim());
        if name.is_empty() || course.is_empty() || score.is_empty() {
            return Err(ValidationError::missing(FIELDS_REQUIRED));
        }

        Ok(Self {
            name: name.to_owned(),
            course: course.to_owned(),
            score: score.to_owned(),
        })
    }
}

/// Body shared by the GPA and chart endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameQuery {
    pub name: String,
}

pub type GpaQuery = NameQuery;
pub type ChartQuery = NameQuery;

impl NameQuery {
    pub fn from_field(name: &str) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::missing(NAME_REQUIRED));
        }
        Ok(Self {
            name: name.to_owned(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SaveConfirmation {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GpaSummary {
    pub gpa: Number,
    pub score_count: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChartData {
    pub chart: String,
    pub courses: Vec<String>,
    pub scores: Vec<Number>,
}

impl ChartData {
    /// Pairs each course with its score, refusing arrays of different lengths.
    pub fn rows(&self) -> Result<Vec<CourseScore>, ClientError> {
        if self.courses.len() != self.scores.len() {
            return Err(ClientError::MisalignedChart {
                courses: self.courses.len(),
                scores: self.scores.len(),
            });
        }

        Ok(self
            .courses
            .iter()
            .zip(&self.scores)
            .map(|(course, score)| CourseScore {
                course: course.clone(),
                score: score.to_string(),
            })
            .collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseScore {
    pub course: String,
    pub score: String,
}

impl fmt::Display for CourseScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}/100", self.course, self.score)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApiResult<T> {
    Success(T),
    Failure { message: String },
}

#[derive(Deserialize)]
struct FailureBody {
    #[serde(default)]
    message: Option<String>,
}

impl<T: DeserializeOwned> ApiResult<T> {
    pub fn from_value(value: Value) -> Result<Self, ClientError> {
        let success = value
            .get("success")
            .and_then(Value::as_bool)
            .ok_or_else(|| ClientError::decode("response has no boolean 'success' flag"))?;

        if success {
            return Ok(Self::Success(serde_json::from_value(value)?));
        }

        let body: FailureBody = serde_json::from_value(value)?;
        Ok(Self::Failure {
            message: body.message.unwrap_or_else(|| "Request failed".to_owned()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_fields_are_trimmed() {
        let record = RecordSubmission::from_fields("  Alice ", "Math\t", " 90").unwrap();
        assert_eq!(record.name, "Alice");
        assert_eq!(record.course, "Math");
        assert_eq!(record.score, "90");
    }

    #[test]
    fn whitespace_only_fields_are_rejected() {
        let err = RecordSubmission::from_fields("Alice", "   ", "90").unwrap_err();
        assert_eq!(err.message, FIELDS_REQUIRED);
        assert!(NameQuery::from_field(" \n ").is_err());
    }

    #[test]
    fn success_payload_keeps_backend_number_text() {
        let parsed: ApiResult<GpaSummary> =
            ApiResult::from_value(json!({ "success": true, "gpa": 3.75, "score_count": 4 })).unwrap();
        match parsed {
            ApiResult::Success(summary) => {
                assert_eq!(summary.gpa.to_string(), "3.75");
                assert_eq!(summary.score_count, 4);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn failure_carries_server_message() {
        let parsed: ApiResult<GpaSummary> =
            ApiResult::from_value(json!({ "success": false, "message": "No scores" })).unwrap();
        assert_eq!(
            parsed,
            ApiResult::Failure {
                message: "No scores".to_owned()
            }
        );
    }

    #[test]
    fn missing_flag_or_payload_is_a_decode_error() {
        let no_flag = ApiResult::<SaveConfirmation>::from_value(json!({ "message": "hi" }));
        assert!(matches!(no_flag, Err(ClientError::Decode(_))));

        let no_payload = ApiResult::<GpaSummary>::from_value(json!({ "success": true }));
        assert!(matches!(no_payload, Err(ClientError::Decode(_))));
    }

    #[test]
    fn chart_rows_follow_index_order() {
        let chart = ChartData {
            chart: "chart.png".to_owned(),
            courses: vec!["Math".to_owned(), "Art".to_owned()],
            scores: vec![Number::from(90), Number::from(80)],
        };
        let rows: Vec<String> = chart.rows().unwrap().iter().map(ToString::to_string).collect();
        assert_eq!(rows, vec!["Math: 90/100", "Art: 80/100"]);
    }

    #[test]
    fn chart_rows_reject_length_mismatch() {
        let chart = ChartData {
            chart: "chart.png".to_owned(),
            courses: vec!["Math".to_owned(), "Art".to_owned()],
            scores: vec![Number::from(90)],
        };
        assert!(matches!(
            chart.rows(),
            Err(ClientError::MisalignedChart { courses: 2, scores: 1 })
        ));
    }
}
