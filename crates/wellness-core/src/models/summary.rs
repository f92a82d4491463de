//! Aggregates computed by the backend: the weekly dashboard and the
//! per-area progress charts.

use serde::{Deserialize, Serialize};

use super::lenient;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FitnessWeek {
    /// Minutes
    #[serde(rename = "totalDuration", default, deserialize_with = "lenient::number")]
    pub total_duration: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NutritionWeek {
    #[serde(default, deserialize_with = "lenient::number")]
    pub calories: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub protein: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub carbs: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub fat: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MoodWeek {
    /// Absent when no entries were logged ("N/A" on the wire)
    #[serde(rename = "averageMood", default, deserialize_with = "lenient::number")]
    pub average_mood: Option<f64>,
}

/// Response of `GET /dashboard/week`. Missing sections read as zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeeklySummary {
    #[serde(default)]
    pub fitness: FitnessWeek,
    #[serde(default)]
    pub nutrition: NutritionWeek,
    #[serde(rename = "mentalHealth", default)]
    pub mental_health: MoodWeek,
}

impl WeeklySummary {
    pub fn total_duration(&self) -> f64 {
        self.fitness.total_duration.unwrap_or(0.0)
    }

    pub fn average_mood_display(&self) -> String {
        match self.mental_health.average_mood {
            Some(mood) => format!("{:.1}", mood),
            None => "N/A".to_string(),
        }
    }
}

/// One chart: labels along the x axis and a value per label.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChartSeries {
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default, deserialize_with = "lenient::numbers")]
    pub data: Vec<f64>,
}

impl ChartSeries {
    /// Label/value pairs. Extra labels or values without a partner are dropped.
    pub fn points(&self) -> impl Iterator<Item = (&str, f64)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.data.iter().copied())
    }

    pub fn max(&self) -> Option<f64> {
        self.data.iter().copied().reduce(f64::max)
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty() || self.data.is_empty()
    }
}

/// The three progress charts, fetched together.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgressOverview {
    pub exercise: ChartSeries,
    pub nutrition: ChartSeries,
    pub mood: ChartSeries,
}
