//! Gemini detector contract tests against a mock HTTP server.

use serde_json::json;
use wiremock::matchers::{method, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

use reelcut_worker::GeminiClient;

fn gemini_body(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": { "parts": [{ "text": text }] }
        }]
    })
}

#[tokio::test]
async fn parses_detected_highlights() {
    let server = MockServer::start().await;

    let highlights = r#"[
        {"start": 12.0, "end": 45.5, "title": "The secret", "hook": "Nobody tells you this",
         "viral_score": 9.2, "reason": "Bold claim with payoff"},
        {"start": 80.0, "end": 120.0, "title": "Money story", "hook": "I lost it all",
         "viral_score": 8.7, "reason": "Transformation arc"}
    ]"#;

    Mock::given(method("POST"))
        .and(path_regex(r"^/v1beta/models/.+:generateContent$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_body(highlights)))
        .mount(&server)
        .await;

    let client = GeminiClient::new("test-key", server.uri(), "gemini-2.5-flash");
    let detected = client.detect_highlights("the transcript", 5).await.unwrap();

    assert_eq!(detected.len(), 2);
    assert_eq!(detected[0].title, "The secret");
    assert_eq!(detected[1].end, 120.0);
}

#[tokio::test]
async fn tolerates_markdown_fenced_responses() {
    let server = MockServer::start().await;

    let fenced = "```json\n[{\"start\": 1.0, \"end\": 20.0}]\n```";
    Mock::given(method("POST"))
        .and(path_regex(r"^/v1beta/models/.+:generateContent$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_body(fenced)))
        .mount(&server)
        .await;

    let client = GeminiClient::new("test-key", server.uri(), "gemini-2.5-flash");
    let detected = client.detect_highlights("the transcript", 3).await.unwrap();
    assert_eq!(detected.len(), 1);
}

#[tokio::test]
async fn api_failure_is_an_error_for_the_caller() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path_regex(r"^/v1beta/models/.+:generateContent$"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = GeminiClient::new("test-key", server.uri(), "gemini-2.5-flash");
    assert!(client.detect_highlights("the transcript", 3).await.is_err());
}

#[tokio::test]
async fn non_array_payload_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path_regex(r"^/v1beta/models/.+:generateContent$"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(gemini_body(r#"{"highlights": "none found"}"#)),
        )
        .mount(&server)
        .await;

    let client = GeminiClient::new("test-key", server.uri(), "gemini-2.5-flash");
    assert!(client.detect_highlights("the transcript", 3).await.is_err());
}
