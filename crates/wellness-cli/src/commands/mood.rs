// Mental health journal commands

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use clap::Subcommand;
use wellness_core::models::{MoodEntry, MoodLevel, NewMoodEntry};
use wellness_core::utils::format_date;
use wellness_core::Route;

use crate::app::{confirm, App};
use crate::output::{print_table_header, print_table_row};

#[derive(Subcommand)]
pub enum MoodCommand {
    /// List journal entries
    List,

    /// Write a journal entry
    Log {
        /// Mood: 0-5 or angry, sad, neutral, happy, excited, surprised
        #[arg(long, short, default_value = "happy")]
        mood: String,

        /// Journal text
        #[arg(long, short)]
        journal: String,

        /// Date (YYYY-MM-DD); the server picks one when omitted
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Delete a journal entry
    Delete {
        /// Entry ID
        id: String,

        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

pub async fn run(app: &App, command: MoodCommand) -> Result<()> {
    app.enter(&Route::MentalHealth.path())?;

    match command {
        MoodCommand::List => list(app).await,
        MoodCommand::Log {
            mood,
            journal,
            date,
        } => {
            let mood = MoodLevel::parse(&mood)
                .ok_or_else(|| anyhow!("Unknown mood '{}': use 0-5 or a mood name", mood))?;
            let entry = NewMoodEntry {
                mood,
                journal_entry: journal,
                date,
            };
            let logged = app.api.log_mood_entry(&entry).await?;
            if app.output.is_text() {
                println!("Logged entry {} ({})", logged.id, mood);
            } else {
                app.output.print_value(&logged)?;
            }
            Ok(())
        }
        MoodCommand::Delete { id, yes } => {
            if !yes && !confirm("Are you sure you want to delete this entry?")? {
                println!("Cancelled.");
                return Ok(());
            }
            app.api.delete_mood_entry(&id).await?;
            println!("Deleted entry {}", id);
            Ok(())
        }
    }
}

pub async fn list(app: &App) -> Result<()> {
    let entries = app.api.list_mood_entries().await?;
    if !app.output.is_text() {
        return app.output.print_value(&entries);
    }
    print_entries(&entries);
    Ok(())
}

fn print_entries(entries: &[MoodEntry]) {
    if entries.is_empty() {
        println!("No journal entries yet.");
        return;
    }

    print_table_header(&[("ID", 24), ("DATE", 12), ("MOOD", 10), ("JOURNAL", 48)]);
    for entry in entries {
        let date = entry.date.as_deref().map(format_date).unwrap_or_default();
        let mood = entry.mood.map(|m| m.label()).unwrap_or("-");
        print_table_row(&[
            (&entry.id, 24),
            (&date, 12),
            (mood, 10),
            (entry.journal_display(), 48),
        ]);
    }
}
