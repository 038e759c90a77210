//! Controller Flow Tests
//!
//! Drive [`AppState`] end to end through the event channel: submit via
//! Ctrl+G, receive the completion from the spawned generation task,
//! and assert the resulting screen/output/credential state.

use std::time::Duration;

use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::tests::common::fixtures::{
    configured_store, ctrl, fill_form, gemini_success_body, memory_store, test_app,
};
use crate::tui::events::{AppEvent, Focus, NotificationLevel, Screen};
use crate::tui::views::output::OutputPhase;

#[tokio::test]
async fn test_submit_without_key_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_success_body("ok")))
        .expect(0)
        .mount(&server)
        .await;

    let mut app = test_app(memory_store(), Some(server.uri()));
    app.screen = Screen::Main; // bypass the startup key prompt
    fill_form(&mut app);
    app.handle_event(AppEvent::Input(ctrl('g')));

    assert_eq!(app.screen, Screen::KeyEntry);
    assert!(matches!(app.output.phase, OutputPhase::Error(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_successful_generation_flow() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(gemini_success_body("```bash\necho hello\n```")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut app = test_app(configured_store(), Some(server.uri()));
    assert_eq!(app.screen, Screen::Main);
    fill_form(&mut app);
    app.handle_event(AppEvent::Input(ctrl('g')));

    assert!(app.output.is_generating());
    assert_eq!(app.focus, Focus::Output);

    let event = app.next_event().await.expect("completion event");
    assert!(matches!(event, AppEvent::GenerationComplete(_)));
    app.handle_event(event);

    assert_eq!(app.output.script(), Some("echo hello"));
    assert_eq!(app.screen, Screen::Main);
    assert!(app.services.credentials.is_configured());
}

#[tokio::test]
async fn test_rejected_key_clears_store_and_reprompts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_string("API key not valid. Please pass a valid API key."),
        )
        .mount(&server)
        .await;

    let mut app = test_app(configured_store(), Some(server.uri()));
    fill_form(&mut app);
    app.handle_event(AppEvent::Input(ctrl('g')));

    let event = app.next_event().await.expect("completion event");
    app.handle_event(event);

    // The bad key is gone and the user is back at the prompt
    assert!(!app.services.credentials.is_configured());
    assert_eq!(app.screen, Screen::KeyEntry);
    assert!(matches!(app.output.phase, OutputPhase::Error(_)));
}

#[tokio::test]
async fn test_transient_failure_keeps_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let mut app = test_app(configured_store(), Some(server.uri()));
    fill_form(&mut app);
    app.handle_event(AppEvent::Input(ctrl('g')));

    let event = app.next_event().await.expect("completion event");
    app.handle_event(event);

    assert!(app.services.credentials.is_configured());
    assert_eq!(app.screen, Screen::Main);
    match &app.output.phase {
        OutputPhase::Error(message) => {
            assert!(message.contains("Failed to generate script"))
        }
        other => panic!("expected error phase, got {other:?}"),
    }
}

#[tokio::test]
async fn test_second_submit_while_in_flight_is_ignored() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(gemini_success_body("echo once"))
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut app = test_app(configured_store(), Some(server.uri()));
    fill_form(&mut app);
    app.handle_event(AppEvent::Input(ctrl('g')));
    assert!(app.output.is_generating());

    app.handle_event(AppEvent::Input(ctrl('g')));
    assert!(app
        .notifications
        .iter()
        .any(|n| n.level == NotificationLevel::Warning));

    let event = app.next_event().await.expect("completion event");
    app.handle_event(event);
    assert_eq!(app.output.script(), Some("echo once"));
}

#[tokio::test]
async fn test_invalid_form_never_reaches_network() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_success_body("ok")))
        .expect(0)
        .mount(&server)
        .await;

    let mut app = test_app(configured_store(), Some(server.uri()));
    // Form left empty: principal name is required
    app.handle_event(AppEvent::Input(ctrl('g')));

    assert!(app.form.error.is_some());
    assert!(!app.output.is_generating());
    assert!(server.received_requests().await.unwrap().is_empty());
}
