//! Route table and the session gate.
//!
//! The gate answers one question per navigation: given a path and whether a
//! credential is present right now, render the page or redirect somewhere
//! else. It never caches the answer; a credential cleared by the API client
//! takes effect on the next evaluation.

use std::sync::Mutex;

use tracing::debug;

use crate::auth::Session;

/// Where an authenticated user lands from the root path
pub const DEFAULT_AUTHENTICATED_ROUTE: Route = Route::Dashboard;

/// Navigation bar entries, in display order.
pub const NAV_LINKS: [(&str, Route); 7] = [
    ("Home", Route::Root),
    ("Fitness", Route::Fitness),
    ("Nutrition", Route::Nutrition),
    ("Mental Health", Route::MentalHealth),
    ("Goals", Route::Goals),
    ("Progress", Route::Progress),
    ("Profile", Route::Profile),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Root,
    Login,
    Register,
    ForgotPassword,
    /// `/reset-password/:token`
    ResetPassword(String),
    Dashboard,
    Fitness,
    Nutrition,
    Goals,
    MentalHealth,
    Progress,
    Profile,
}

impl Route {
    /// Every route that requires a credential to render.
    pub const PROTECTED: [Route; 7] = [
        Route::Dashboard,
        Route::Fitness,
        Route::Nutrition,
        Route::Goals,
        Route::MentalHealth,
        Route::Progress,
        Route::Profile,
    ];

    /// Parse a navigation path. Query strings, fragments and a trailing
    /// slash are ignored. Returns `None` for paths outside the route table.
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or("");
        let trimmed = path.trim_end_matches('/');
        if trimmed.is_empty() {
            return Some(Route::Root);
        }

        let mut segments = trimmed.trim_start_matches('/').split('/');
        let first = segments.next()?;
        let second = segments.next();
        if segments.next().is_some() {
            return None;
        }

        match (first, second) {
            ("login", None) => Some(Route::Login),
            ("register", None) => Some(Route::Register),
            ("forgot-password", None) => Some(Route::ForgotPassword),
            ("reset-password", Some(token)) if !token.is_empty() => {
                Some(Route::ResetPassword(token.to_string()))
            }
            ("dashboard", None) => Some(Route::Dashboard),
            ("fitness", None) => Some(Route::Fitness),
            ("nutrition", None) => Some(Route::Nutrition),
            ("goals", None) => Some(Route::Goals),
            ("mental-health", None) => Some(Route::MentalHealth),
            ("progress", None) => Some(Route::Progress),
            ("profile", None) => Some(Route::Profile),
            _ => None,
        }
    }

    /// Canonical path for this route
    pub fn path(&self) -> String {
        match self {
            Route::Root => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::ForgotPassword => "/forgot-password".to_string(),
            Route::ResetPassword(token) => format!("/reset-password/{}", token),
            Route::Dashboard => "/dashboard".to_string(),
            Route::Fitness => "/fitness".to_string(),
            Route::Nutrition => "/nutrition".to_string(),
            Route::Goals => "/goals".to_string(),
            Route::MentalHealth => "/mental-health".to_string(),
            Route::Progress => "/progress".to_string(),
            Route::Profile => "/profile".to_string(),
        }
    }

    /// Page title shown above the rendered view
    pub fn title(&self) -> &'static str {
        match self {
            Route::Root => "Home",
            Route::Login => "Login",
            Route::Register => "Register",
            Route::ForgotPassword => "Forgot Password",
            Route::ResetPassword(_) => "Reset Password",
            Route::Dashboard => "Weekly Dashboard",
            Route::Fitness => "Fitness Tracking",
            Route::Nutrition => "Nutrition Planning",
            Route::Goals => "Goal Tracking",
            Route::MentalHealth => "Mental Health",
            Route::Progress => "Progress Overview",
            Route::Profile => "Profile Settings",
        }
    }

    /// Login, register, forgot-password and reset-password pages
    pub fn is_auth_page(&self) -> bool {
        matches!(
            self,
            Route::Login | Route::Register | Route::ForgotPassword | Route::ResetPassword(_)
        )
    }

    pub fn is_protected(&self) -> bool {
        Self::PROTECTED.contains(self)
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path())
    }
}

/// Outcome of a gate evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Render(Route),
    Redirect(Route),
}

impl GateDecision {
    pub fn redirect_target(&self) -> Option<&Route> {
        match self {
            GateDecision::Redirect(route) => Some(route),
            GateDecision::Render(_) => None,
        }
    }

    pub fn is_render(&self) -> bool {
        matches!(self, GateDecision::Render(_))
    }
}

/// Gate policy for a known route.
pub fn decide(route: &Route, authenticated: bool) -> GateDecision {
    match route {
        Route::Root if authenticated => GateDecision::Redirect(DEFAULT_AUTHENTICATED_ROUTE),
        Route::Root => GateDecision::Redirect(Route::Login),
        r if r.is_protected() && !authenticated => GateDecision::Redirect(Route::Login),
        r => GateDecision::Render(r.clone()),
    }
}

/// Gate policy for a raw path. Paths outside the route table are handled
/// like the root path.
pub fn decide_path(path: &str, authenticated: bool) -> GateDecision {
    let route = Route::parse(path).unwrap_or(Route::Root);
    decide(&route, authenticated)
}

/// The navigation bar shows only to a logged-in user who is not on an auth page.
pub fn nav_bar_visible(path: &str, authenticated: bool) -> bool {
    let on_auth_page = Route::parse(path)
        .map(|r| r.is_auth_page())
        .unwrap_or(false);
    authenticated && !on_auth_page
}

/// Receiver for forced navigations.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: &Route);
}

/// Navigator that remembers every navigation it was asked to perform.
#[derive(Debug, Default)]
pub struct NavigationLog {
    history: Mutex<Vec<Route>>,
}

impl NavigationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> Vec<Route> {
        self.history.lock().map(|h| h.clone()).unwrap_or_default()
    }

    pub fn last(&self) -> Option<Route> {
        self.history.lock().ok().and_then(|h| h.last().cloned())
    }

    /// Drain recorded navigations
    pub fn take(&self) -> Vec<Route> {
        self.history
            .lock()
            .map(|mut h| std::mem::take(&mut *h))
            .unwrap_or_default()
    }
}

impl Navigator for NavigationLog {
    fn navigate(&self, route: &Route) {
        if let Ok(mut history) = self.history.lock() {
            history.push(route.clone());
        }
    }
}

/// Route guard bound to a session context.
pub struct SessionGate<N: Navigator + ?Sized> {
    session: Session,
    navigator: std::sync::Arc<N>,
}

impl<N: Navigator + ?Sized> SessionGate<N> {
    pub fn new(session: Session, navigator: std::sync::Arc<N>) -> Self {
        Self { session, navigator }
    }

    /// Decide for `path` using the credential as it is right now.
    pub fn evaluate(&self, path: &str) -> GateDecision {
        let authenticated = self.session.is_authenticated();
        let decision = decide_path(path, authenticated);
        debug!(path, authenticated, ?decision, "Gate evaluated");
        decision
    }

    pub fn show_nav_bar(&self, path: &str) -> bool {
        nav_bar_visible(path, self.session.is_authenticated())
    }

    /// Evaluate and perform the redirect, if any.
    pub fn navigate(&self, path: &str) -> GateDecision {
        let decision = self.evaluate(path);
        if let Some(target) = decision.redirect_target() {
            self.navigator.navigate(target);
        }
        decision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn auth_pages() -> Vec<Route> {
        vec![
            Route::Login,
            Route::Register,
            Route::ForgotPassword,
            Route::ResetPassword("tok".to_string()),
        ]
    }

    // -------------------------------------------------------------------------
    // Route parsing
    // -------------------------------------------------------------------------

    #[test]
    fn test_parse_known_paths() {
        assert_eq!(Route::parse("/"), Some(Route::Root));
        assert_eq!(Route::parse(""), Some(Route::Root));
        assert_eq!(Route::parse("/login"), Some(Route::Login));
        assert_eq!(Route::parse("/mental-health"), Some(Route::MentalHealth));
        assert_eq!(
            Route::parse("/reset-password/a1b2"),
            Some(Route::ResetPassword("a1b2".to_string()))
        );
    }

    #[test]
    fn test_parse_normalizes() {
        assert_eq!(Route::parse("/fitness/"), Some(Route::Fitness));
        assert_eq!(Route::parse("/fitness?tab=week"), Some(Route::Fitness));
        assert_eq!(Route::parse("/goals#top"), Some(Route::Goals));
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(Route::parse("/nowhere"), None);
        assert_eq!(Route::parse("/reset-password"), None);
        assert_eq!(Route::parse("/fitness/extra"), None);
        assert_eq!(Route::parse("/reset-password/a/b"), None);
    }

    #[test]
    fn test_path_round_trips_through_parse() {
        for route in Route::PROTECTED.iter().cloned().chain(auth_pages()) {
            assert_eq!(Route::parse(&route.path()), Some(route.clone()));
        }
    }

    // -------------------------------------------------------------------------
    // Gate policy
    // -------------------------------------------------------------------------

    #[test]
    fn test_protected_without_credential_redirects_to_login() {
        for route in Route::PROTECTED.iter() {
            assert_eq!(decide(route, false), GateDecision::Redirect(Route::Login));
        }
    }

    #[test]
    fn test_protected_with_credential_renders() {
        for route in Route::PROTECTED.iter() {
            assert_eq!(decide(route, true), GateDecision::Render(route.clone()));
        }
    }

    #[test]
    fn test_root_redirects_by_credential() {
        assert_eq!(
            decide(&Route::Root, true),
            GateDecision::Redirect(Route::Dashboard)
        );
        assert_eq!(decide(&Route::Root, false), GateDecision::Redirect(Route::Login));
    }

    #[test]
    fn test_auth_pages_always_render() {
        for route in auth_pages() {
            assert!(decide(&route, false).is_render());
            assert!(decide(&route, true).is_render());
        }
    }

    #[test]
    fn test_unknown_path_behaves_like_root() {
        assert_eq!(
            decide_path("/nowhere", true),
            GateDecision::Redirect(Route::Dashboard)
        );
        assert_eq!(
            decide_path("/nowhere", false),
            GateDecision::Redirect(Route::Login)
        );
    }

    #[test]
    fn test_nav_bar_visibility() {
        assert!(nav_bar_visible("/fitness", true));
        assert!(!nav_bar_visible("/fitness", false));
        assert!(!nav_bar_visible("/login", true));
        assert!(!nav_bar_visible("/login", false));
        assert!(!nav_bar_visible("/reset-password/abc", true));
    }

    // -------------------------------------------------------------------------
    // SessionGate
    // -------------------------------------------------------------------------

    #[test]
    fn test_gate_rereads_session_each_evaluation() {
        let session = Session::in_memory();
        let log = Arc::new(NavigationLog::new());
        let gate = SessionGate::new(session.clone(), log.clone());

        assert_eq!(gate.evaluate("/progress"), GateDecision::Redirect(Route::Login));
        session.set("abc123").unwrap();
        assert_eq!(gate.evaluate("/progress"), GateDecision::Render(Route::Progress));
        session.clear().unwrap();
        assert_eq!(gate.evaluate("/progress"), GateDecision::Redirect(Route::Login));
    }

    #[test]
    fn test_gate_navigate_reports_redirects_only() {
        let session = Session::in_memory();
        let log = Arc::new(NavigationLog::new());
        let gate = SessionGate::new(session.clone(), log.clone());

        gate.navigate("/profile");
        assert_eq!(log.take(), vec![Route::Login]);

        session.set("abc123").unwrap();
        gate.navigate("/profile");
        assert!(log.history().is_empty());

        gate.navigate("/");
        assert_eq!(log.last(), Some(Route::Dashboard));
    }
}
