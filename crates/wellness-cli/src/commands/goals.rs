// Goal tracking commands

use anyhow::Result;
use clap::Subcommand;
use wellness_core::models::{lenient, Goals};
use wellness_core::Route;

use crate::app::App;
use crate::output::print_field;

#[derive(Subcommand)]
pub enum GoalsCommand {
    /// Show current goals
    Show,

    /// Set one or more goals
    Set {
        /// Daily steps
        #[arg(long)]
        steps: Option<f64>,

        /// Exercise minutes
        #[arg(long)]
        exercise: Option<f64>,

        #[arg(long)]
        calories: Option<f64>,

        /// Litres of water
        #[arg(long)]
        water: Option<f64>,
    },
}

pub async fn run(app: &App, command: GoalsCommand) -> Result<()> {
    app.enter(&Route::Goals.path())?;

    match command {
        GoalsCommand::Show => show(app).await,
        GoalsCommand::Set {
            steps,
            exercise,
            calories,
            water,
        } => {
            let goals = Goals {
                steps,
                exercise,
                calories,
                water,
            };
            app.api.set_goals(&goals).await?;
            println!("Goals updated successfully!");

            // Show the refreshed goals right away
            show(app).await
        }
    }
}

pub async fn show(app: &App) -> Result<()> {
    let goals = app.api.get_goals().await?;
    if !app.output.is_text() {
        return app.output.print_value(&goals);
    }
    print_goals(&goals);
    Ok(())
}

fn print_goals(goals: &Goals) {
    if goals.is_empty() {
        println!("No goals set yet.");
        return;
    }
    for (label, value) in goals.entries() {
        print_field(label, &lenient::display(value));
    }
}
