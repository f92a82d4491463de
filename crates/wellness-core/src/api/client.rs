//! API client for the wellness backend.
//!
//! Every request goes through [`ApiClient::request`], which attaches the
//! session credential, and [`ApiClient::execute`], which reacts to a 401 by
//! clearing the session and sending the user back to the login page before
//! handing the error to the caller.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, warn};

use crate::auth::Session;
use crate::models::{
    ChartSeries, Credentials, Exercise, ForgotPassword, Goals, LogExerciseResponse,
    LogMealResponse, LogMoodResponse, LoginResponse, Meal, MessageResponse, MoodEntry,
    NewExercise, NewMeal, NewMoodEntry, PasswordReset, Profile, ProgressOverview,
    Registration, ReminderToggle, ValidationError, WeeklySummary,
};
use crate::routes::{Navigator, Route};

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// Base URL of the hosted backend
pub const DEFAULT_BASE_URL: &str = "https://health-and-wellness-app-backend.onrender.com/api";

/// API client for the wellness backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: Session,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// `timeout` of `None` lets requests run until the server answers.
    pub fn new(
        base_url: &str,
        session: Session,
        navigator: Arc<dyn Navigator>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
            navigator,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ===== Request Pipeline =====

    /// Start a request to `path`, carrying the bearer credential if one is stored.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a request built by [`request`](Self::request) and check the status.
    ///
    /// A 401 clears the session and forces navigation to login, then is
    /// returned as [`ApiError::Unauthorized`]. Other failures pass through.
    pub async fn execute(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let request = builder.build()?;
        debug!(method = %request.method(), url = %request.url(), "Sending request");

        let response = self.client.execute(request).await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED {
            self.handle_unauthorized();
        }

        let body = response.text().await.unwrap_or_default();
        Err(ApiError::from_status(status, &body))
    }

    fn handle_unauthorized(&self) {
        warn!("Request unauthorized, clearing session");
        if let Err(e) = self.session.clear() {
            warn!(error = %e, "Failed to clear session after 401");
        }
        self.navigator.navigate(&Route::Login);
    }

    async fn parse<T: DeserializeOwned>(response: Response, path: &str) -> Result<T, ApiError> {
        let text = response.text().await?;
        serde_json::from_str(&text)
            .map_err(|e| ApiError::InvalidResponse(format!("{}: {}", path, e)))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.execute(self.request(Method::GET, path)).await?;
        Self::parse(response, path).await
    }

    async fn send_json<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.execute(self.request(method, path).json(body)).await?;
        Self::parse(response, path).await
    }

    /// Like `send_json`, for endpoints whose success body is only an
    /// acknowledgement. An empty or unexpected body is not an error.
    async fn send_ack<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<MessageResponse, ApiError> {
        let response = self.execute(self.request(method, path).json(body)).await?;
        let text = response.text().await?;
        Ok(serde_json::from_str(&text).unwrap_or_default())
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.execute(self.request(Method::DELETE, path)).await?;
        Ok(())
    }

    fn require_id(id: &str) -> Result<&str, ApiError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(ValidationError::Missing("id").into());
        }
        Ok(id)
    }

    // ===== Account =====

    /// Log in and store the returned credential
    pub async fn login(&self, credentials: &Credentials) -> Result<(), ApiError> {
        credentials.validate()?;
        let response: LoginResponse = self
            .send_json(Method::POST, "/auth/login", credentials)
            .await?;

        if response.token.trim().is_empty() {
            return Err(ApiError::InvalidResponse(
                "/auth/login: response carried no token".to_string(),
            ));
        }
        self.session
            .set(&response.token)
            .map_err(|e| ApiError::SessionStore(e.to_string()))?;
        info!(email = %credentials.email, "Login successful");
        Ok(())
    }

    pub async fn register(&self, registration: &Registration) -> Result<MessageResponse, ApiError> {
        registration.validate()?;
        self.send_ack(Method::POST, "/auth/register", registration).await
    }

    pub async fn forgot_password(&self, request: &ForgotPassword) -> Result<MessageResponse, ApiError> {
        request.validate()?;
        self.send_ack(Method::POST, "/auth/forgot-password", request).await
    }

    pub async fn reset_password(&self, reset: &PasswordReset) -> Result<MessageResponse, ApiError> {
        reset.validate()?;
        self.send_ack(Method::POST, "/auth/reset-password", reset).await
    }

    /// Forget the credential and return to the login page. No request is made.
    pub fn logout(&self) -> Result<(), ApiError> {
        self.session
            .clear()
            .map_err(|e| ApiError::SessionStore(e.to_string()))?;
        self.navigator.navigate(&Route::Login);
        info!("Logged out");
        Ok(())
    }

    // ===== Dashboard =====

    pub async fn weekly_summary(&self) -> Result<WeeklySummary, ApiError> {
        self.get("/dashboard/week").await
    }

    // ===== Fitness =====

    pub async fn list_exercises(&self) -> Result<Vec<Exercise>, ApiError> {
        self.get("/fitness/get-exercises").await
    }

    pub async fn log_exercise(&self, entry: &NewExercise) -> Result<Exercise, ApiError> {
        entry.validate()?;
        let response: LogExerciseResponse = self
            .send_json(Method::POST, "/fitness/log-exercise", entry)
            .await?;
        Ok(response.exercise)
    }

    pub async fn delete_exercise(&self, id: &str) -> Result<(), ApiError> {
        let id = Self::require_id(id)?;
        self.delete(&format!("/fitness/delete-exercise/{}", id)).await
    }

    pub async fn fitness_progress(&self) -> Result<ChartSeries, ApiError> {
        self.get("/fitness/progress").await
    }

    // ===== Nutrition =====

    pub async fn list_meals(&self) -> Result<Vec<Meal>, ApiError> {
        self.get("/nutrition/view-nutrition").await
    }

    pub async fn log_meal(&self, meal: &NewMeal) -> Result<Meal, ApiError> {
        meal.validate()?;
        let response: LogMealResponse = self
            .send_json(Method::POST, "/nutrition/log-meal", meal)
            .await?;
        Ok(response.meal)
    }

    pub async fn delete_meal(&self, id: &str) -> Result<(), ApiError> {
        let id = Self::require_id(id)?;
        self.delete(&format!("/nutrition/delete-meal/{}", id)).await
    }

    pub async fn nutrition_progress(&self) -> Result<ChartSeries, ApiError> {
        self.get("/nutrition/progress").await
    }

    // ===== Mental Health =====

    pub async fn list_mood_entries(&self) -> Result<Vec<MoodEntry>, ApiError> {
        self.get("/mentalhealth/").await
    }

    pub async fn log_mood_entry(&self, entry: &NewMoodEntry) -> Result<MoodEntry, ApiError> {
        entry.validate()?;
        let response: LogMoodResponse = self
            .send_json(Method::POST, "/mentalhealth", entry)
            .await?;
        Ok(response.entry)
    }

    pub async fn delete_mood_entry(&self, id: &str) -> Result<(), ApiError> {
        let id = Self::require_id(id)?;
        self.delete(&format!("/mentalhealth/{}", id)).await
    }

    pub async fn mood_progress(&self) -> Result<ChartSeries, ApiError> {
        self.get("/mentalhealth/progress").await
    }

    // ===== Goals =====

    pub async fn get_goals(&self) -> Result<Goals, ApiError> {
        self.get("/goal-tracking/get-goals").await
    }

    pub async fn set_goals(&self, goals: &Goals) -> Result<MessageResponse, ApiError> {
        goals.validate()?;
        self.send_ack(Method::POST, "/goal-tracking/set-goal", goals).await
    }

    // ===== Progress =====

    /// Fetch all three progress charts concurrently. Fails if any one fails.
    pub async fn progress_overview(&self) -> Result<ProgressOverview, ApiError> {
        let (exercise, nutrition, mood) = futures::try_join!(
            self.fitness_progress(),
            self.nutrition_progress(),
            self.mood_progress()
        )?;
        Ok(ProgressOverview {
            exercise,
            nutrition,
            mood,
        })
    }

    // ===== Profile =====

    pub async fn get_profile(&self) -> Result<Profile, ApiError> {
        self.get("/profile/profile").await
    }

    pub async fn update_profile(&self, profile: &Profile) -> Result<MessageResponse, ApiError> {
        profile.validate()?;
        self.send_ack(Method::PUT, "/profile/update-profile", profile).await
    }

    pub async fn set_reminders(&self, enabled: bool) -> Result<MessageResponse, ApiError> {
        self.send_ack(
            Method::POST,
            "/profile/toggle-reminders",
            &ReminderToggle { enabled },
        )
        .await
    }

    /// Download all of the user's data as CSV
    pub async fn export_data(&self) -> Result<Vec<u8>, ApiError> {
        let response = self
            .execute(self.request(Method::GET, "/profile/export"))
            .await?;
        let bytes = response.bytes().await?;
        debug!(bytes = bytes.len(), "Export downloaded");
        Ok(bytes.to_vec())
    }

    /// Delete the account, then forget the credential and return to login.
    pub async fn delete_account(&self) -> Result<(), ApiError> {
        self.delete("/profile/delete-account").await?;
        info!("Account deleted");
        self.logout()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::NavigationLog;

    fn client(session: Session) -> ApiClient {
        ApiClient::new(
            "http://localhost:5000/api/",
            session,
            Arc::new(NavigationLog::new()),
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let api = client(Session::in_memory());
        assert_eq!(api.base_url(), "http://localhost:5000/api");
        assert_eq!(api.url("/fitness/get-exercises"), "http://localhost:5000/api/fitness/get-exercises");
    }

    #[test]
    fn test_request_attaches_bearer_when_present() {
        let session = Session::in_memory();
        let api = client(session.clone());

        let request = api.request(Method::GET, "/dashboard/week").build().unwrap();
        assert!(request.headers().get(reqwest::header::AUTHORIZATION).is_none());

        session.set("abc123").unwrap();
        let request = api.request(Method::GET, "/dashboard/week").build().unwrap();
        assert_eq!(
            request.headers().get(reqwest::header::AUTHORIZATION).unwrap(),
            "Bearer abc123"
        );
    }

    #[test]
    fn test_require_id() {
        assert_eq!(ApiClient::require_id(" 65f0 ").unwrap(), "65f0");
        assert!(matches!(
            ApiClient::require_id(""),
            Err(ApiError::Validation(ValidationError::Missing("id")))
        ));
    }

    #[test]
    fn test_logout_clears_and_navigates() {
        let session = Session::in_memory();
        session.set("abc123").unwrap();
        let log = Arc::new(NavigationLog::new());
        let api = ApiClient::new("http://localhost:5000/api", session.clone(), log.clone(), None).unwrap();

        api.logout().unwrap();
        assert!(!session.is_authenticated());
        assert_eq!(log.history(), vec![Route::Login]);
    }
}
