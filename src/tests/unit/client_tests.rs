//! Gemini Client Tests (mock server)
//!
//! Network-level behavior of [`GeminiClient`] against a wiremock
//! server: request shape, response extraction, and the error taxonomy.
//! Pure parsing/classification tests live inline next to the client.

use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::core::llm::{GeminiClient, GenerationError, DEFAULT_MODEL};
use crate::core::prompt::build_prompt;
use crate::tests::common::fixtures::{gemini_success_body, kubernetes_request};

async fn client_for(server: &MockServer) -> GeminiClient {
    GeminiClient::new("AIzaTestApiKey", DEFAULT_MODEL)
        .expect("client construction")
        .with_base_url(server.uri())
}

#[tokio::test]
async fn test_generate_posts_expected_request_shape() {
    let prompt = build_prompt(&kubernetes_request());

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/models/{DEFAULT_MODEL}:generateContent")))
        .and(header("x-goog-api-key", "AIzaTestApiKey"))
        .and(body_partial_json(serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }]
            }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_success_body("ok")))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server).await.generate(&prompt).await;
    assert_eq!(result.unwrap(), "ok");
}

#[tokio::test]
async fn test_generate_strips_code_fences() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(gemini_success_body("```bash\necho hello\n```")),
        )
        .mount(&server)
        .await;

    let script = client_for(&server).await.generate("prompt").await.unwrap();
    assert_eq!(script, "echo hello");
}

#[tokio::test]
async fn test_invalid_key_body_is_credential_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_string("API key not valid. Please pass a valid API key."),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).await.generate("prompt").await.unwrap_err();
    assert!(matches!(err, GenerationError::CredentialRejected(_)));
    assert!(err.is_credential_failure());
}

#[tokio::test]
async fn test_unauthorized_status_is_credential_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
        .mount(&server)
        .await;

    let err = client_for(&server).await.generate("prompt").await.unwrap_err();
    assert!(err.is_credential_failure());
}

#[tokio::test]
async fn test_server_error_is_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let err = client_for(&server).await.generate("prompt").await.unwrap_err();
    match err {
        GenerationError::Api { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "overloaded");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_candidates_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let err = client_for(&server).await.generate("prompt").await.unwrap_err();
    assert!(matches!(err, GenerationError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_empty_key_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_success_body("ok")))
        .expect(0)
        .mount(&server)
        .await;

    let client = GeminiClient::new("   ", DEFAULT_MODEL)
        .unwrap()
        .with_base_url(server.uri());
    let err = client.generate("prompt").await.unwrap_err();
    assert!(matches!(err, GenerationError::MissingCredential));
}
