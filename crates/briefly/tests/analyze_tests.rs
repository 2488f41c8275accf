//! Integration tests for the `/analyze` endpoint
//!
//! Drives the router in-process with `oneshot` and stands up a wiremock
//! server in place of the Gemini endpoint.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::{Mock, MockServer, ResponseTemplate, matchers};

use briefly::analyze::{AnalyzeRequest, Analyzer, MAX_INPUT_CHARS, SUMMARY_INSTRUCTION};
use briefly::config::ProviderConfig;
use briefly::server::{AppState, create_router};
use briefly::testing::MockProvider;

// =============================================================================
// Test Fixtures
// =============================================================================

fn provider_config(mock_server: &MockServer) -> ProviderConfig {
    ProviderConfig {
        api_url: format!("{}/v1beta/models/test:generateContent", mock_server.uri()),
        api_key: "test-key".to_string(),
        timeout_secs: 5,
    }
}

fn gemini_app(mock_server: &MockServer) -> Router {
    let analyzer = Analyzer::from_config(&provider_config(mock_server)).unwrap();
    create_router(Arc::new(AppState::new(analyzer)))
}

fn local_app() -> Router {
    create_router(Arc::new(AppState::new(Analyzer::local())))
}

fn analyze_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/analyze")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: Router, body: Value) -> (StatusCode, Value) {
    let response = app.oneshot(analyze_request(body)).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn gemini_body(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }]
    })
}

async fn mount_gemini(mock_server: &MockServer, response: ResponseTemplate) {
    Mock::given(matchers::method("POST"))
        .and(matchers::path("/v1beta/models/test:generateContent"))
        .and(matchers::query_param("key", "test-key"))
        .respond_with(response)
        .mount(mock_server)
        .await;
}

// =============================================================================
// Input Validation Tests
// =============================================================================

mod input_validation_tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_input_makes_no_outbound_call() {
        let mock_server = MockServer::start().await;
        Mock::given(matchers::any())
            .respond_with(ResponseTemplate::new(200).set_body_json(gemini_body("unused")))
            .expect(0)
            .mount(&mock_server)
            .await;

        let (status, body) = send(gemini_app(&mock_server), json!({"max_tokens": 100})).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"detail": "No text or messages provided"}));
    }

    #[tokio::test]
    async fn test_empty_text_and_messages_is_bad_request() {
        let provider = Arc::new(MockProvider::gemini_text("unused"));
        let app = create_router(Arc::new(AppState::new(Analyzer::with_provider(
            provider.clone(),
        ))));

        let (status, _) = send(app, json!({"text": "", "messages": []})).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_wrong_field_type_is_unprocessable() {
        let (status, body) = send(local_app(), json!({"text": ["not", "a", "string"]})).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["detail"].is_string());
    }

    #[tokio::test]
    async fn test_numeric_string_max_tokens_is_accepted() {
        let (status, body) = send(
            local_app(),
            json!({"text": "A sentence long enough to become a bullet.", "max_tokens": "400"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["fallback"], true);

        let (status, _) = send(local_app(), json!({"text": "hi", "max_tokens": 12.5})).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}

// =============================================================================
// Provider Path Tests
// =============================================================================

mod provider_path_tests {
    use super::*;

    #[tokio::test]
    async fn test_embedded_json_summary_returned_verbatim() {
        let mock_server = MockServer::start().await;
        mount_gemini(
            &mock_server,
            ResponseTemplate::new(200).set_body_json(gemini_body(
                "Here is the result:\n{\"title\": \"T\", \"bullets\": [\"a\", \"b\"]}",
            )),
        )
        .await;

        let (status, body) = send(gemini_app(&mock_server), json!({"text": "Some text."})).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"summary": {"title": "T", "bullets": ["a", "b"]}}));
        assert!(body.get("raw_response").is_none());
    }

    #[tokio::test]
    async fn test_prose_output_attaches_raw_response() {
        let mock_server = MockServer::start().await;
        let provider_body = gemini_body(
            "Team sync recap\nThe release moved to next Thursday after the review. \
             Marketing will prepare the announcement draft by Monday.",
        );
        mount_gemini(
            &mock_server,
            ResponseTemplate::new(200).set_body_json(provider_body.clone()),
        )
        .await;

        let (status, body) = send(gemini_app(&mock_server), json!({"text": "notes"})).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["raw_response"], provider_body);
        assert_eq!(body["summary"]["title"], "Team sync recap");
        assert_eq!(body["summary"]["bullets"].as_array().unwrap().len(), 2);
        assert!(body.get("fallback").is_none());
    }

    #[tokio::test]
    async fn test_openai_shaped_response_is_understood() {
        let mock_server = MockServer::start().await;
        mount_gemini(
            &mock_server,
            ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {
                    "role": "assistant",
                    "content": "{\"title\": \"Chat\", \"bullets\": [\"one\"]}"
                }}]
            })),
        )
        .await;

        let (_, body) = send(gemini_app(&mock_server), json!({"text": "x"})).await;
        assert_eq!(body, json!({"summary": {"title": "Chat", "bullets": ["one"]}}));
    }

    #[tokio::test]
    async fn test_provider_receives_prompt_with_text() {
        let mock_server = MockServer::start().await;
        Mock::given(matchers::method("POST"))
            .and(matchers::path("/v1beta/models/test:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(gemini_body("ok")))
            .expect(1)
            .mount(&mock_server)
            .await;

        let (status, _) = send(gemini_app(&mock_server), json!({"text": "budget meeting"})).await;
        assert_eq!(status, StatusCode::OK);

        let requests = mock_server.received_requests().await.unwrap();
        let sent: Value = serde_json::from_slice(&requests[0].body).unwrap();
        let prompt = sent["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(prompt.starts_with(SUMMARY_INSTRUCTION));
        assert!(prompt.ends_with("budget meeting"));
    }

    #[tokio::test]
    async fn test_messages_are_joined_into_prompt() {
        let provider = Arc::new(MockProvider::gemini_text("Short reply."));
        let analyzer = Analyzer::with_provider(provider.clone());

        let request = AnalyzeRequest::from_messages(vec![json!("first line"), json!("second line")]);
        analyzer.analyze(&request).await.unwrap();

        let prompt = provider.last_prompt().unwrap();
        assert!(prompt.ends_with("first line\nsecond line"));
    }
}

// =============================================================================
// Provider Failure Tests
// =============================================================================

mod provider_failure_tests {
    use super::*;

    #[tokio::test]
    async fn test_non_success_status_returns_error_payload() {
        let mock_server = MockServer::start().await;
        mount_gemini(
            &mock_server,
            ResponseTemplate::new(503).set_body_string("{\"error\": \"overloaded\"}"),
        )
        .await;

        let (status, body) = send(gemini_app(&mock_server), json!({"text": "hello"})).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "error": "Gemini API returned 503",
                "details": "{\"error\": \"overloaded\"}"
            })
        );
        assert!(body.get("summary").is_none());
    }

    #[tokio::test]
    async fn test_redirect_returns_error_payload() {
        let mock_server = MockServer::start().await;
        mount_gemini(
            &mock_server,
            ResponseTemplate::new(302)
                .insert_header("location", format!("{}/other", mock_server.uri()).as_str()),
        )
        .await;
        Mock::given(matchers::path("/other"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"text": "Redirected prose."})))
            .expect(0)
            .mount(&mock_server)
            .await;

        let (status, body) = send(gemini_app(&mock_server), json!({"text": "hello"})).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["error"], "Gemini API returned 302");
        assert!(body.get("summary").is_none());
        assert!(body.get("raw_response").is_none());
    }

    #[tokio::test]
    async fn test_unreachable_provider_returns_call_failed() {
        // Nothing listens on port 1
        let config = ProviderConfig {
            api_url: "http://127.0.0.1:1/generate".to_string(),
            api_key: "test-key".to_string(),
            timeout_secs: 5,
        };

        let analyzer = Analyzer::from_config(&config).unwrap();
        let app = create_router(Arc::new(AppState::new(analyzer)));
        let (status, body) = send(app, json!({"text": "hello"})).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["error"], "Gemini call failed");
        assert!(body["details"].is_string());
        assert!(body.get("summary").is_none());
    }

    #[tokio::test]
    async fn test_non_json_body_returns_call_failed() {
        let mock_server = MockServer::start().await;
        mount_gemini(
            &mock_server,
            ResponseTemplate::new(200).set_body_string("<html>oops</html>"),
        )
        .await;

        let (status, body) = send(gemini_app(&mock_server), json!({"text": "hello"})).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["error"], "Gemini call failed");
    }

    #[tokio::test]
    async fn test_failure_does_not_fall_back_locally() {
        let mock_server = MockServer::start().await;
        mount_gemini(&mock_server, ResponseTemplate::new(500)).await;

        let (_, body) = send(
            gemini_app(&mock_server),
            json!({"text": "A perfectly summarizable sentence lives here."}),
        )
        .await;

        assert!(body.get("fallback").is_none());
        assert_eq!(body["error"], "Gemini API returned 500");
        assert_eq!(body["details"], "");
    }
}

// =============================================================================
// Local Fallback Tests
// =============================================================================

mod local_fallback_tests {
    use super::*;

    #[tokio::test]
    async fn test_fallback_uses_first_four_sentences() {
        let text = "Alpha team finished the migration work on Monday. \
                    Beta team reviewed the security findings in detail. \
                    Gamma team shipped the onboarding flow to production. \
                    Delta team wrote the quarterly planning document. \
                    Epsilon team spent the entire week rebuilding the continuous integration pipeline.";

        let (status, body) = send(local_app(), json!({"text": text})).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["fallback"], true);
        let bullets = body["summary"]["bullets"].as_array().unwrap();
        assert_eq!(bullets.len(), 4);
        assert!(bullets.iter().all(|b| !b.as_str().unwrap().contains("Epsilon")));
        assert!(body.get("raw_response").is_none());
    }

    #[tokio::test]
    async fn test_fallback_title_is_first_line() {
        let (_, body) = send(
            local_app(),
            json!({"text": "Standup\nEveryone is on track for the Friday demo."}),
        )
        .await;
        assert_eq!(body["summary"]["title"], "Standup");
    }

    #[tokio::test]
    async fn test_fallback_with_messages() {
        let messages = vec![
            json!({"role": "user", "content": "Can you check the deployment logs for errors?"}),
            json!("Plain message text is also accepted here."),
        ];
        let (status, body) = send(local_app(), json!({"messages": messages})).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["fallback"], true);
        assert!(body["summary"]["title"].as_str().unwrap().starts_with('{'));
    }

    #[tokio::test]
    async fn test_oversized_messages_are_capped() {
        let provider = Arc::new(MockProvider::gemini_text("fine"));
        let analyzer = Analyzer::with_provider(provider.clone());

        let request = AnalyzeRequest::from_messages(vec![json!("z".repeat(MAX_INPUT_CHARS * 2))]);
        analyzer.analyze(&request).await.unwrap();

        let prompt = provider.last_prompt().unwrap();
        let tail = format!("\\n{}", "z".repeat(MAX_INPUT_CHARS));
        assert!(prompt.ends_with(&tail));
        assert!(!prompt.contains(&"z".repeat(MAX_INPUT_CHARS + 1)));
    }
}
