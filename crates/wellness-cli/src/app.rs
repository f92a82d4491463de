//! Shared state for one CLI invocation: configuration, the session context,
//! the session gate and the API client, all bound to the same credential.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use tracing::{debug, warn};
use wellness_core::routes::NAV_LINKS;
use wellness_core::{ApiClient, Config, GateDecision, Navigator, Route, Session, SessionGate};

use crate::output::OutputFormat;

/// Returned when the gate sends the user somewhere else instead of rendering.
#[derive(Debug)]
pub struct Redirected(pub Route);

impl std::fmt::Display for Redirected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Redirected to {}", self.0)
    }
}

impl std::error::Error for Redirected {}

/// Navigator for the terminal: reports forced navigations on stderr.
#[derive(Default)]
pub struct TerminalNavigator {
    last: Mutex<Option<Route>>,
}

impl TerminalNavigator {
    pub fn last(&self) -> Option<Route> {
        self.last.lock().ok().and_then(|l| l.clone())
    }
}

impl Navigator for TerminalNavigator {
    fn navigate(&self, route: &Route) {
        eprintln!("-> {}", route);
        if let Ok(mut last) = self.last.lock() {
            *last = Some(route.clone());
        }
    }
}

pub struct App {
    pub config: Config,
    pub gate: SessionGate<TerminalNavigator>,
    pub api: ApiClient,
    pub navigator: Arc<TerminalNavigator>,
    pub output: OutputFormat,
}

impl App {
    /// Create a new application instance
    pub fn new(api_url: Option<&str>, output: OutputFormat) -> Result<Self> {
        let config = match Config::load() {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "Failed to load config, using defaults");
                Config::default()
            }
        };

        let base_url = config.base_url(api_url);
        debug!(%base_url, backend = ?config.token_backend, "Config loaded");

        let session = config.open_session()?;
        Self::with_session(config, session, &base_url, output)
    }

    /// Build the app around an already opened session
    pub fn with_session(
        config: Config,
        session: Session,
        base_url: &str,
        output: OutputFormat,
    ) -> Result<Self> {
        let navigator = Arc::new(TerminalNavigator::default());
        let gate = SessionGate::new(session.clone(), navigator.clone());
        let api = ApiClient::new(base_url, session, navigator.clone(), config.request_timeout())?;

        Ok(Self {
            config,
            gate,
            api,
            navigator,
            output,
        })
    }

    /// Pass the session gate for `path`. Prints the navigation bar and page
    /// title when the page renders; a redirect becomes a [`Redirected`] error.
    pub fn enter(&self, path: &str) -> Result<Route> {
        match self.gate.navigate(path) {
            GateDecision::Render(route) => {
                if self.output.is_text() {
                    println!("{}", self.page_header(path, &route));
                }
                Ok(route)
            }
            GateDecision::Redirect(target) => Err(Redirected(target).into()),
        }
    }

    /// Nav bar (when the gate shows one) and title for a rendered page
    fn page_header(&self, path: &str, route: &Route) -> String {
        let mut header = String::new();
        if self.gate.show_nav_bar(path) {
            header.push_str(&nav_bar(route));
            header.push_str("\n\n");
        }
        header.push_str(&format!("== {} ==\n", route.title()));
        header
    }

    /// Remember the email used for the last successful login
    pub fn remember_email(&mut self, email: &str) {
        self.config.last_email = Some(email.to_string());
        if let Err(e) = self.config.save() {
            warn!(error = %e, "Failed to save config");
        }
    }
}

fn nav_bar(current: &Route) -> String {
    let links: Vec<String> = NAV_LINKS
        .iter()
        .map(|(label, route)| {
            if route == current {
                format!("[{}]", label)
            } else {
                label.to_string()
            }
        })
        .collect();
    links.join(" | ")
}

/// Read one line, showing `default` in brackets when there is one
pub fn prompt(label: &str, default: Option<&str>) -> Result<String> {
    match default {
        Some(d) => print!("{} [{}]: ", label, d),
        None => print!("{}: ", label),
    }
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let input = input.trim();

    Ok(match default {
        Some(d) if input.is_empty() => d.to_string(),
        _ => input.to_string(),
    })
}

pub fn prompt_password(label: &str) -> Result<String> {
    let password = rpassword::prompt_password(format!("{}: ", label))?;
    Ok(password)
}

/// Ask a yes/no question; anything but "y"/"yes" is no
pub fn confirm(question: &str) -> Result<bool> {
    let answer = prompt(&format!("{} [y/N]", question), None)?;
    Ok(matches!(answer.to_lowercase().as_str(), "y" | "yes"))
}

/// Use the flag value if given, otherwise ask
pub fn value_or_prompt(value: Option<String>, label: &str, default: Option<&str>) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => prompt(label, default),
    }
}
