//! Gate and pipeline sharing one session: log in, browse, get signed out by a 401.

use std::sync::Arc;

use serde_json::json;
use wellness_core::auth::MemoryTokenStore;
use wellness_core::models::Credentials;
use wellness_core::{ApiClient, GateDecision, NavigationLog, Route, Session, SessionGate};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn login_browse_and_forced_logout() {
    let server = MockServer::start().await;
    let session = Session::new(Arc::new(MemoryTokenStore::with_token("")));
    let navigation = Arc::new(NavigationLog::new());
    let gate = SessionGate::new(session.clone(), navigation.clone());
    let api = ApiClient::new(
        &format!("{}/api", server.uri()),
        session.clone(),
        navigation.clone(),
        None,
    )
    .unwrap();

    // Empty credential: fitness is off limits
    assert_eq!(gate.navigate("/fitness"), GateDecision::Redirect(Route::Login));
    assert_eq!(navigation.take(), vec![Route::Login]);

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "abc123"})))
        .mount(&server)
        .await;
    api.login(&Credentials::new("ana@example.com", "pw"))
        .await
        .unwrap();

    assert_eq!(gate.navigate("/fitness"), GateDecision::Render(Route::Fitness));
    assert!(gate.show_nav_bar("/fitness"));
    assert!(navigation.history().is_empty());

    // An in-page request comes back 401
    Mock::given(method("GET"))
        .and(path("/api/fitness/get-exercises"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    let err = api.list_exercises().await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(session.token(), None);
    assert_eq!(navigation.take(), vec![Route::Login]);

    // The next navigation sees the cleared credential
    assert_eq!(gate.evaluate("/fitness"), GateDecision::Redirect(Route::Login));
    assert!(!gate.show_nav_bar("/fitness"));
}

#[test]
fn nav_bar_truth_table() {
    let session = Session::in_memory();
    let gate = SessionGate::new(session.clone(), Arc::new(NavigationLog::new()));

    assert!(!gate.show_nav_bar("/dashboard"));
    assert!(!gate.show_nav_bar("/register"));

    session.set("abc123").unwrap();
    assert!(gate.show_nav_bar("/dashboard"));
    assert!(!gate.show_nav_bar("/register"));
}
