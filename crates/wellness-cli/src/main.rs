//! Wellness CLI - log workouts, meals, mood and goals from the terminal.
//!
//! Every page of the web client is a subcommand here. Each one passes the
//! session gate first, so protected pages bounce to login when no
//! credential is stored, exactly as a browser navigation would.

mod app;
mod commands;
mod output;

use std::io;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use wellness_core::{ApiError, Route};

use app::{App, Redirected};
use commands::{
    fitness::FitnessCommand, goals::GoalsCommand, mood::MoodCommand,
    nutrition::NutritionCommand, profile::ProfileCommand,
};
use output::OutputFormat;

// ============================================================================
// Constants
// ============================================================================

/// Directory for a rolling log file, in addition to stderr
const LOG_DIR_ENV: &str = "WELLNESS_LOG_DIR";

/// Exit code when the gate redirects instead of rendering
const EXIT_REDIRECTED: u8 = 2;

const EXIT_FAILURE: u8 = 1;

#[derive(Parser)]
#[command(name = "wellness")]
#[command(about = "Wellness CLI - track fitness, nutrition, mood and goals")]
#[command(version)]
pub struct Cli {
    /// API base URL
    #[arg(long, env = wellness_core::config::API_URL_ENV)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(long, short, default_value = "text", value_parser = ["text", "json"])]
    pub output: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Navigate to a path (e.g. /fitness) and show that page
    Open {
        /// Path to open
        #[arg(default_value = "/")]
        path: String,
    },

    /// Log in and store the session token
    Login {
        #[arg(long, env = "WELLNESS_EMAIL")]
        email: Option<String>,
    },

    /// Create an account
    Register {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,
    },

    /// Request a password reset email
    ForgotPassword {
        #[arg(long)]
        email: Option<String>,
    },

    /// Set a new password using the token from the reset email
    ResetPassword {
        /// Reset token
        token: String,
    },

    /// Forget the stored session token
    Logout,

    /// Weekly summary
    Dashboard,

    /// Exercise log
    Fitness {
        #[command(subcommand)]
        command: FitnessCommand,
    },

    /// Meal log
    Nutrition {
        #[command(subcommand)]
        command: NutritionCommand,
    },

    /// Mood journal
    Mood {
        #[command(subcommand)]
        command: MoodCommand,
    },

    /// Daily goals
    Goals {
        #[command(subcommand)]
        command: GoalsCommand,
    },

    /// Progress charts
    Progress,

    /// Profile settings
    Profile {
        #[command(subcommand)]
        command: ProfileCommand,
    },
}

/// Initialize the tracing subscriber for logging
fn init_tracing() -> Option<WorkerGuard> {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let (file_layer, guard) = match std::env::var(LOG_DIR_ENV) {
        Ok(dir) if !dir.is_empty() => {
            let appender = tracing_appender::rolling::daily(dir, "wellness.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_writer(writer).with_ansi(false)),
                Some(guard),
            )
        }
        _ => (None, None),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .with(filter)
        .init();

    guard
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let _guard = init_tracing();
    info!("Wellness CLI starting");

    let output = OutputFormat::from_str(&cli.output);
    let mut app = match App::new(cli.api_url.as_deref(), output) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(&mut app, cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report(&app, e),
    }
}

async fn run(app: &mut App, command: Commands) -> Result<()> {
    match command {
        Commands::Open { path } => open(app, &path).await,
        Commands::Login { email } => commands::account::login(app, email).await,
        Commands::Register { name, email } => commands::account::register(app, name, email).await,
        Commands::ForgotPassword { email } => commands::account::forgot_password(app, email).await,
        Commands::ResetPassword { token } => commands::account::reset_password(app, token).await,
        Commands::Logout => commands::account::logout(app),
        Commands::Dashboard => commands::overview::dashboard(app).await,
        Commands::Fitness { command } => commands::fitness::run(app, command).await,
        Commands::Nutrition { command } => commands::nutrition::run(app, command).await,
        Commands::Mood { command } => commands::mood::run(app, command).await,
        Commands::Goals { command } => commands::goals::run(app, command).await,
        Commands::Progress => commands::overview::progress(app).await,
        Commands::Profile { command } => commands::profile::run(app, command).await,
    }
}

/// Show the default view of whatever page `path` resolves to.
async fn open(app: &mut App, path: &str) -> Result<()> {
    // The root path redirects; follow it when it lands on a page
    let route = match app.gate.navigate(path).redirect_target() {
        Some(Route::Dashboard) => Route::Dashboard,
        Some(target) => return Err(Redirected(target.clone()).into()),
        None => Route::parse(path).unwrap_or(Route::Root),
    };

    match route {
        Route::Login => commands::account::login(app, None).await,
        Route::Register => commands::account::register(app, None, None).await,
        Route::ForgotPassword => commands::account::forgot_password(app, None).await,
        Route::ResetPassword(token) => commands::account::reset_password(app, token).await,
        Route::Dashboard => commands::overview::dashboard(app).await,
        Route::Fitness => commands::fitness::run(app, FitnessCommand::List).await,
        Route::Nutrition => commands::nutrition::run(app, NutritionCommand::List).await,
        Route::Goals => commands::goals::run(app, GoalsCommand::Show).await,
        Route::MentalHealth => commands::mood::run(app, MoodCommand::List).await,
        Route::Progress => commands::overview::progress(app).await,
        Route::Profile => commands::profile::run(app, ProfileCommand::Show).await,
        Route::Root => commands::overview::dashboard(app).await,
    }
}

fn exit_status(e: &anyhow::Error) -> u8 {
    if e.is::<Redirected>() {
        EXIT_REDIRECTED
    } else {
        EXIT_FAILURE
    }
}

fn report(app: &App, e: anyhow::Error) -> ExitCode {
    if let Some(Redirected(target)) = e.downcast_ref::<Redirected>() {
        // The navigator has already announced the redirect
        if *target == Route::Login {
            eprintln!("Please log in first: wellness login");
        }
        return ExitCode::from(exit_status(&e));
    }

    match e.downcast_ref::<ApiError>() {
        Some(api_error) => {
            error!(error = %api_error, "Request failed");
            eprintln!("Error: {}", api_error.user_message());
            if app.navigator.last() == Some(Route::Login) {
                eprintln!("Log in again with: wellness login");
            }
        }
        None => eprintln!("Error: {:#}", e),
    }
    ExitCode::from(exit_status(&e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use serde_json::json;
    use wellness_core::{Config, Session};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn app_at(base_url: &str, token: Option<&str>) -> App {
        let session = Session::in_memory();
        if let Some(token) = token {
            session.set(token).unwrap();
        }
        App::with_session(Config::default(), session, base_url, OutputFormat::Text).unwrap()
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_fitness_log() {
        let cli = Cli::try_parse_from([
            "wellness", "fitness", "log", "--exercise", "Running", "--duration", "30",
            "--date", "2025-03-01",
        ])
        .unwrap();
        match cli.command {
            Commands::Fitness {
                command: FitnessCommand::Log { exercise, duration, distance, date },
            } => {
                assert_eq!(exercise, "Running");
                assert_eq!(duration, 30.0);
                assert_eq!(distance, None);
                assert_eq!(date.map(|d| d.to_string()).as_deref(), Some("2025-03-01"));
            }
            _ => panic!("expected fitness log"),
        }
    }

    #[test]
    fn test_open_defaults_to_root() {
        let cli = Cli::try_parse_from(["wellness", "open"]).unwrap();
        assert!(matches!(cli.command, Commands::Open { ref path } if path == "/"));
    }

    #[test]
    fn test_rejects_unknown_output_format() {
        assert!(Cli::try_parse_from(["wellness", "--output", "xml", "dashboard"]).is_err());
    }

    #[test]
    fn test_redirect_exits_with_its_own_status() {
        let redirected: anyhow::Error = Redirected(Route::Login).into();
        assert_eq!(exit_status(&redirected), EXIT_REDIRECTED);

        let other = anyhow::anyhow!("boom");
        assert_eq!(exit_status(&other), EXIT_FAILURE);

        let api: anyhow::Error = ApiError::Unauthorized.into();
        assert_eq!(exit_status(&api), EXIT_FAILURE);
    }

    #[tokio::test]
    async fn test_open_protected_page_without_session_is_redirected() {
        let mut app = app_at("http://127.0.0.1:9/api", None);

        let err = open(&mut app, "/goals").await.unwrap_err();
        assert!(matches!(err.downcast_ref::<Redirected>(), Some(Redirected(Route::Login))));
        assert_eq!(exit_status(&err), EXIT_REDIRECTED);

        let err = open(&mut app, "/").await.unwrap_err();
        assert!(matches!(err.downcast_ref::<Redirected>(), Some(Redirected(Route::Login))));
    }

    #[tokio::test]
    async fn test_open_root_follows_dashboard_redirect() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/dashboard/week"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let mut app = app_at(&format!("{}/api", server.uri()), Some("abc123"));
        open(&mut app, "/").await.unwrap();
        assert_eq!(app.navigator.last(), Some(Route::Dashboard));
    }
}
