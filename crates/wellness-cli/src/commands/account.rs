// Login, registration and password recovery

use anyhow::{bail, Result};
use wellness_core::models::{Credentials, ForgotPassword, PasswordReset, Registration};
use wellness_core::Route;

use crate::app::{prompt_password, value_or_prompt, App};

/// Environment variable holding the login password
const PASSWORD_ENV: &str = "WELLNESS_PASSWORD";

pub async fn login(app: &mut App, email: Option<String>) -> Result<()> {
    app.enter(&Route::Login.path())?;

    let last_email = app.config.last_email.clone();
    let email = value_or_prompt(email, "Email", last_email.as_deref())?;
    let password = match std::env::var(PASSWORD_ENV) {
        Ok(p) if !p.is_empty() => p,
        _ => prompt_password("Password")?,
    };

    app.api.login(&Credentials::new(&email, &password)).await?;
    app.remember_email(email.trim());

    println!("Login successful!");
    // Root sends a logged-in user on to the dashboard
    app.gate.navigate(&Route::Root.path());
    Ok(())
}

pub async fn register(app: &App, name: Option<String>, email: Option<String>) -> Result<()> {
    app.enter(&Route::Register.path())?;

    let name = value_or_prompt(name, "Name", None)?;
    let email = value_or_prompt(email, "Email", None)?;
    let password = prompt_password("Password")?;
    let confirm = prompt_password("Confirm password")?;
    if password != confirm {
        bail!("Passwords do not match!");
    }

    let response = app
        .api
        .register(&Registration {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            password,
        })
        .await?;

    println!(
        "{}",
        response
            .message
            .unwrap_or_else(|| "Registration successful.".to_string())
    );
    println!("Log in with: wellness login --email {}", email.trim());
    Ok(())
}

pub async fn forgot_password(app: &App, email: Option<String>) -> Result<()> {
    app.enter(&Route::ForgotPassword.path())?;

    let email = value_or_prompt(email, "Email", app.config.last_email.as_deref())?;
    app.api
        .forgot_password(&ForgotPassword {
            email: email.trim().to_string(),
        })
        .await?;

    println!("Password reset link has been sent to your email.");
    Ok(())
}

pub async fn reset_password(app: &App, token: String) -> Result<()> {
    app.enter(&Route::ResetPassword(token.clone()).path())?;

    let new_password = prompt_password("New password")?;
    let confirm = prompt_password("Confirm password")?;
    if new_password != confirm {
        bail!("Passwords do not match.");
    }

    app.api
        .reset_password(&PasswordReset {
            token,
            new_password,
        })
        .await?;

    println!("Password reset successfully! Log in with: wellness login");
    Ok(())
}

pub fn logout(app: &App) -> Result<()> {
    app.api.logout()?;
    println!("Logged out.");
    Ok(())
}
