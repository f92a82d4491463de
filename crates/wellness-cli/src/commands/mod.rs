pub mod account;
pub mod fitness;
pub mod goals;
pub mod mood;
pub mod nutrition;
pub mod overview;
pub mod profile;

use chrono::{NaiveDate, Utc};

/// Default date for new log entries
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}
