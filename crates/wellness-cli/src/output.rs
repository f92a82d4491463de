// Output formatting for the CLI

use anyhow::Result;
use serde::Serialize;
use wellness_core::models::ChartSeries;
use wellness_core::utils::truncate_string;

/// Width of the longest bar in text charts
const CHART_WIDTH: usize = 40;

#[derive(Clone, Copy)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Self {
        match s {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Text,
        }
    }

    pub fn print_value<T: Serialize>(&self, value: &T) -> Result<()> {
        match self {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(value)?);
            }
            OutputFormat::Text => {
                // Text format is handled by each command
            }
        }
        Ok(())
    }

    pub fn is_text(&self) -> bool {
        matches!(self, OutputFormat::Text)
    }
}

/// Print a simple key-value pair for text output
pub fn print_field(label: &str, value: &str) {
    println!("{:<16} {}", format!("{}:", label), value);
}

/// Print a table header
pub fn print_table_header(columns: &[(&str, usize)]) {
    let header: String = columns
        .iter()
        .map(|(name, width)| format!("{:<width$}", name, width = width))
        .collect::<Vec<_>>()
        .join("  ");
    println!("{}", header);
    println!("{}", "-".repeat(header.len()));
}

/// Print a table row, truncating cells to their column width
pub fn print_table_row(values: &[(&str, usize)]) {
    let row: String = values
        .iter()
        .map(|(val, width)| {
            format!("{:<width$}", truncate_string(val, *width), width = width)
        })
        .collect::<Vec<_>>()
        .join("  ");
    println!("{}", row);
}

/// Horizontal bar chart of one series
pub fn print_chart(title: &str, series: &ChartSeries) {
    println!("{}", title);
    if series.is_empty() {
        println!("  (no data)\n");
        return;
    }

    let max = series.max().filter(|m| *m > 0.0).unwrap_or(1.0);
    let label_width = series.labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    for (label, value) in series.points() {
        let len = ((value.max(0.0) / max) * CHART_WIDTH as f64).round() as usize;
        println!(
            "  {:<lw$}  {} {}",
            label,
            "█".repeat(len),
            value,
            lw = label_width
        );
    }
    println!();
}
