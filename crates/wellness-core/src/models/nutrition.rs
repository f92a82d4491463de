use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::lenient;
use super::validation::{require_amount, require_text, ValidationError};

/// A logged meal with its macros.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meal {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "foodItem", default)]
    pub food_item: String,
    #[serde(default, deserialize_with = "lenient::number")]
    pub calories: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub protein: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub carbs: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub fats: Option<f64>,
    #[serde(default)]
    pub date: Option<String>,
}

impl Meal {
    pub fn summary(&self) -> String {
        format!(
            "{} kcal - {}g protein - {}g carbs - {}g fats",
            lenient::display(self.calories),
            lenient::display(self.protein),
            lenient::display(self.carbs),
            lenient::display(self.fats),
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewMeal {
    #[serde(rename = "foodItem")]
    pub food_item: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub date: NaiveDate,
}

impl NewMeal {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("food item", &self.food_item)?;
        require_amount("calories", self.calories)?;
        require_amount("protein", self.protein)?;
        require_amount("carbs", self.carbs)?;
        require_amount("fats", self.fats)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogMealResponse {
    pub meal: Meal,
}
