//! Account flows: login, registration, password reset and profile.

use serde::{Deserialize, Serialize};

use super::validation::{require_text, ValidationError};

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.trim().to_string(),
            password: password.to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("email", &self.email)?;
        require_text("password", &self.password)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl Registration {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        require_text("email", &self.email)?;
        require_text("password", &self.password)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ForgotPassword {
    pub email: String,
}

impl ForgotPassword {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("email", &self.email)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PasswordReset {
    pub token: String,
    #[serde(rename = "newPassword")]
    pub new_password: String,
}

impl PasswordReset {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("reset token", &self.token)?;
        require_text("new password", &self.new_password)
    }
}

/// Generic acknowledgement body (`{"message": "..."}`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl Profile {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        require_text("email", &self.email)
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ReminderToggle {
    pub enabled: bool,
}
