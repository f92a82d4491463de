// Weekly dashboard and progress charts

use anyhow::Result;
use wellness_core::models::lenient::display;
use wellness_core::models::WeeklySummary;
use wellness_core::Route;

use crate::app::App;
use crate::output::{print_chart, print_field};

pub async fn dashboard(app: &App) -> Result<()> {
    app.enter(&Route::Dashboard.path())?;

    let summary = app.api.weekly_summary().await?;
    if !app.output.is_text() {
        return app.output.print_value(&summary);
    }
    print_summary(&summary);
    Ok(())
}

fn print_summary(summary: &WeeklySummary) {
    println!("Fitness");
    print_field("  Total time", &format!("{} min", display(Some(summary.total_duration()))));
    println!();

    let n = &summary.nutrition;
    println!("Nutrition");
    print_field("  Calories", &display(Some(n.calories.unwrap_or(0.0))));
    print_field("  Protein", &format!("{} g", display(Some(n.protein.unwrap_or(0.0)))));
    print_field("  Carbs", &format!("{} g", display(Some(n.carbs.unwrap_or(0.0)))));
    print_field("  Fat", &format!("{} g", display(Some(n.fat.unwrap_or(0.0)))));
    println!();

    println!("Mental Health");
    print_field("  Average mood", &summary.average_mood_display());
}

pub async fn progress(app: &App) -> Result<()> {
    app.enter(&Route::Progress.path())?;

    let overview = app.api.progress_overview().await?;
    if !app.output.is_text() {
        return app.output.print_value(&overview);
    }
    print_chart("Weekly Exercise Completion", &overview.exercise);
    print_chart("Nutrition Intake", &overview.nutrition);
    print_chart("Mood Trend", &overview.mood);
    Ok(())
}
