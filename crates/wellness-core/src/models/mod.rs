//! Data models for wellness backend payloads.
//!
//! This module contains the request and response types for each area of
//! the backend:
//!
//! - `Credentials`, `Registration`, `PasswordReset`: Account flows
//! - `Exercise`, `NewExercise`: Fitness log
//! - `Meal`, `NewMeal`: Nutrition log
//! - `MoodEntry`, `NewMoodEntry`, `MoodLevel`: Mental health journal
//! - `Goals`: Daily targets
//! - `Profile`: Account details
//! - `WeeklySummary`, `ChartSeries`, `ProgressOverview`: Aggregates computed by the backend
//!
//! Submission types validate their required fields before anything is sent.

pub mod account;
pub mod fitness;
pub mod goals;
pub mod lenient;
pub mod mood;
pub mod nutrition;
pub mod summary;
pub mod validation;

pub use account::{
    Credentials, ForgotPassword, LoginResponse, MessageResponse, PasswordReset, Profile,
    ReminderToggle, Registration,
};
pub use fitness::{Exercise, LogExerciseResponse, NewExercise};
pub use goals::Goals;
pub use mood::{LogMoodResponse, MoodEntry, MoodLevel, NewMoodEntry};
pub use nutrition::{LogMealResponse, Meal, NewMeal};
pub use summary::{
    ChartSeries, FitnessWeek, MoodWeek, NutritionWeek, ProgressOverview, WeeklySummary,
};
pub use validation::ValidationError;
