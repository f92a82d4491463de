// Profile settings commands

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Subcommand;
use wellness_core::models::Profile;
use wellness_core::Route;

use crate::app::{confirm, App};
use crate::output::print_field;

/// File name used by the web client for exports
const DEFAULT_EXPORT_FILE: &str = "health_data.csv";

#[derive(Subcommand)]
pub enum ProfileCommand {
    /// Show profile details
    Show,

    /// Update name and/or email
    Update {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,
    },

    /// Download all logged data as CSV
    Export {
        /// Output file
        #[arg(long, short, default_value = DEFAULT_EXPORT_FILE)]
        out: PathBuf,
    },

    /// Turn reminders on or off
    Reminders {
        #[arg(value_parser = ["on", "off"])]
        state: String,
    },

    /// Permanently delete the account
    Delete {
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

pub async fn run(app: &App, command: ProfileCommand) -> Result<()> {
    app.enter(&Route::Profile.path())?;

    match command {
        ProfileCommand::Show => show(app).await,
        ProfileCommand::Update { name, email } => {
            let current = app.api.get_profile().await?;
            let updated = Profile {
                name: name.unwrap_or(current.name),
                email: email.unwrap_or(current.email),
            };
            app.api.update_profile(&updated).await?;
            println!("Profile updated successfully!");
            Ok(())
        }
        ProfileCommand::Export { out } => {
            let data = app.api.export_data().await?;
            std::fs::write(&out, &data)
                .with_context(|| format!("Failed to write {}", out.display()))?;
            println!("Saved {} bytes to {}", data.len(), out.display());
            Ok(())
        }
        ProfileCommand::Reminders { state } => {
            let enabled = state == "on";
            app.api.set_reminders(enabled).await?;
            println!("Reminders {}", if enabled { "enabled" } else { "disabled" });
            Ok(())
        }
        ProfileCommand::Delete { yes } => {
            if !yes
                && !confirm(
                    "Are you sure you want to delete your account? This action cannot be undone!",
                )?
            {
                println!("Cancelled.");
                return Ok(());
            }
            app.api.delete_account().await?;
            println!("Account deleted successfully.");
            Ok(())
        }
    }
}

pub async fn show(app: &App) -> Result<()> {
    let profile = app.api.get_profile().await?;
    if !app.output.is_text() {
        return app.output.print_value(&profile);
    }
    print_field("Name", &profile.name);
    print_field("Email", &profile.email);
    Ok(())
}
