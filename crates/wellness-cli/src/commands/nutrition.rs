// Nutrition log commands

use anyhow::Result;
use chrono::NaiveDate;
use clap::Subcommand;
use wellness_core::models::{Meal, NewMeal};
use wellness_core::utils::format_date;
use wellness_core::Route;

use super::today;
use crate::app::App;
use crate::output::{print_table_header, print_table_row};

#[derive(Subcommand)]
pub enum NutritionCommand {
    /// List logged meals
    List,

    /// Log a meal
    Log {
        /// Food item, e.g. "Oatmeal"
        #[arg(long, short)]
        food: String,

        #[arg(long)]
        calories: f64,

        /// Grams of protein
        #[arg(long)]
        protein: f64,

        /// Grams of carbohydrates
        #[arg(long)]
        carbs: f64,

        /// Grams of fat
        #[arg(long)]
        fats: f64,

        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Delete a logged meal
    Delete {
        /// Meal ID
        id: String,
    },
}

pub async fn run(app: &App, command: NutritionCommand) -> Result<()> {
    app.enter(&Route::Nutrition.path())?;

    match command {
        NutritionCommand::List => list(app).await,
        NutritionCommand::Log {
            food,
            calories,
            protein,
            carbs,
            fats,
            date,
        } => {
            let meal = NewMeal {
                food_item: food.trim().to_string(),
                calories,
                protein,
                carbs,
                fats,
                date: date.unwrap_or_else(today),
            };
            let logged = app.api.log_meal(&meal).await?;
            if app.output.is_text() {
                println!("Logged {}: {}", logged.food_item, logged.summary());
            } else {
                app.output.print_value(&logged)?;
            }
            Ok(())
        }
        NutritionCommand::Delete { id } => {
            app.api.delete_meal(&id).await?;
            println!("Deleted meal {}", id);
            Ok(())
        }
    }
}

pub async fn list(app: &App) -> Result<()> {
    let meals = app.api.list_meals().await?;
    if !app.output.is_text() {
        return app.output.print_value(&meals);
    }
    print_meals(&meals);
    Ok(())
}

fn print_meals(meals: &[Meal]) {
    if meals.is_empty() {
        println!("No meals logged yet.");
        return;
    }

    print_table_header(&[("ID", 24), ("FOOD", 20), ("MACROS", 50), ("DATE", 12)]);
    for meal in meals {
        let date = meal.date.as_deref().map(format_date).unwrap_or_default();
        print_table_row(&[
            (&meal.id, 24),
            (&meal.food_item, 20),
            (&meal.summary(), 50),
            (&date, 12),
        ]);
    }
}
