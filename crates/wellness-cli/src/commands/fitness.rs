// Fitness log commands

use anyhow::Result;
use chrono::NaiveDate;
use clap::Subcommand;
use wellness_core::models::{Exercise, NewExercise};
use wellness_core::utils::format_date;
use wellness_core::Route;

use super::today;
use crate::app::App;
use crate::output::{print_table_header, print_table_row};

#[derive(Subcommand)]
pub enum FitnessCommand {
    /// List logged exercises
    List,

    /// Log an exercise session
    Log {
        /// Exercise name, e.g. "Running"
        #[arg(long, short)]
        exercise: String,

        /// Duration in minutes
        #[arg(long, short)]
        duration: f64,

        /// Distance in kilometres
        #[arg(long)]
        distance: Option<f64>,

        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Delete a logged exercise
    Delete {
        /// Exercise ID
        id: String,
    },
}

pub async fn run(app: &App, command: FitnessCommand) -> Result<()> {
    app.enter(&Route::Fitness.path())?;

    match command {
        FitnessCommand::List => list(app).await,
        FitnessCommand::Log {
            exercise,
            duration,
            distance,
            date,
        } => {
            let entry = NewExercise {
                exercise: exercise.trim().to_string(),
                duration,
                distance,
                date: date.unwrap_or_else(today),
            };
            let logged = app.api.log_exercise(&entry).await?;
            if app.output.is_text() {
                println!("Logged {} ({})", logged.exercise, logged.duration_display());
            } else {
                app.output.print_value(&logged)?;
            }
            Ok(())
        }
        FitnessCommand::Delete { id } => {
            app.api.delete_exercise(&id).await?;
            println!("Deleted exercise {}", id);
            Ok(())
        }
    }
}

pub async fn list(app: &App) -> Result<()> {
    let logs = app.api.list_exercises().await?;
    if !app.output.is_text() {
        return app.output.print_value(&logs);
    }
    print_exercises(&logs);
    Ok(())
}

fn print_exercises(logs: &[Exercise]) {
    if logs.is_empty() {
        println!("No exercises logged yet.");
        return;
    }

    print_table_header(&[("ID", 24), ("EXERCISE", 20), ("DURATION", 10), ("DISTANCE", 10), ("DATE", 12)]);
    for log in logs {
        let distance = log.distance_display().unwrap_or_default();
        let date = log.date.as_deref().map(format_date).unwrap_or_default();
        print_table_row(&[
            (&log.id, 24),
            (&log.exercise, 20),
            (&log.duration_display(), 10),
            (&distance, 10),
            (&date, 12),
        ]);
    }
}
