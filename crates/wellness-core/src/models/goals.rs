use serde::{Deserialize, Serialize};

use super::lenient;
use super::validation::{require_optional_amount, ValidationError};

/// Daily targets. Every field is optional; unset targets are not sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Goals {
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub steps: Option<f64>,
    /// Exercise minutes
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub exercise: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
    /// Litres of water
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub water: Option<f64>,
}

impl Goals {
    pub fn is_empty(&self) -> bool {
        self.steps.is_none() && self.exercise.is_none() && self.calories.is_none() && self.water.is_none()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::Missing("at least one goal"));
        }
        require_optional_amount("steps", self.steps)?;
        require_optional_amount("exercise", self.exercise)?;
        require_optional_amount("calories", self.calories)?;
        require_optional_amount("water", self.water)
    }

    /// Label/value pairs in display order
    pub fn entries(&self) -> [(&'static str, Option<f64>); 4] {
        [
            ("Steps", self.steps),
            ("Exercise (min)", self.exercise),
            ("Calories", self.calories),
            ("Water (L)", self.water),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_goals_serialize_only_set_fields() {
        let goals = Goals {
            steps: Some(10000.0),
            calories: Some(2200.0),
            ..Default::default()
        };
        let json = serde_json::to_value(&goals).unwrap();
        assert_eq!(json["steps"], 10000.0);
        assert!(json.get("water").is_none());
        assert!(goals.validate().is_ok());
    }

    #[test]
    fn test_empty_goals_rejected() {
        assert_eq!(
            Goals::default().validate(),
            Err(ValidationError::Missing("at least one goal"))
        );
    }

    #[test]
    fn test_parse_goals_with_strings() {
        let goals: Goals =
            serde_json::from_str(r#"{"steps": "8000", "exercise": 30, "calories": "", "water": 2}"#)
                .unwrap();
        assert_eq!(goals.steps, Some(8000.0));
        assert_eq!(goals.calories, None);
        assert_eq!(goals.entries()[3], ("Water (L)", Some(2.0)));
    }
}
