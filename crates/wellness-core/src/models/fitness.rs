use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::lenient;
use super::validation::{require_amount, require_optional_amount, require_text, ValidationError};

/// A logged exercise session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exercise {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub exercise: String,
    /// Minutes
    #[serde(default, deserialize_with = "lenient::number")]
    pub duration: Option<f64>,
    /// Kilometres
    #[serde(default, deserialize_with = "lenient::number")]
    pub distance: Option<f64>,
    #[serde(default)]
    pub date: Option<String>,
}

impl Exercise {
    pub fn duration_display(&self) -> String {
        format!("{} min", lenient::display(self.duration))
    }

    pub fn distance_display(&self) -> Option<String> {
        self.distance.map(|d| format!("{} km", lenient::display(Some(d))))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewExercise {
    pub exercise: String,
    pub duration: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    pub date: NaiveDate,
}

impl NewExercise {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("exercise", &self.exercise)?;
        require_amount("duration", self.duration)?;
        require_optional_amount("distance", self.distance)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogExerciseResponse {
    pub exercise: Exercise,
}
