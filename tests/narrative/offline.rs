use esg_insights::narrative::summary_context;
use esg_insights::{NarrativeClient, metrics};
use httpmock::Method::POST;
use httpmock::MockServer;

use crate::common::{TEST_KEY, TEST_MODEL, base_url, candidate_body, generate_path, mock_generate};

fn client(server: &MockServer) -> NarrativeClient {
    NarrativeClient::builder()
        .base_url(base_url(server))
        .model(TEST_MODEL)
        .api_key(TEST_KEY)
        .build()
        .unwrap()
}

#[test]
fn context_formats_q1_q4_and_sharpe_delta() {
    let ctx = summary_context(&metrics::baseline());
    assert_eq!(ctx, "Q1 Returns: 12.5%, Q4: 6.2%. Sharpe ratio delta: 0.60.");
}

#[tokio::test]
async fn generate_posts_prompt_and_returns_candidate_text() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path(generate_path(TEST_MODEL))
            .header("x-goog-api-key", TEST_KEY)
            .body_includes("Analyze the following financial ESG performance data")
            .body_includes("Q1 Returns: 12.5%")
            .body_includes("\"temperature\":0.7")
            .body_includes("\"role\":\"user\"");
        then.status(200)
            .header("content-type", "application/json")
            .body(candidate_body("Leaders outperform."));
    });

    let ctx = summary_context(&metrics::baseline());
    let text = client(&server).generate(&ctx).await.unwrap();

    mock.assert();
    assert_eq!(text, "Leaders outperform.");
}

#[tokio::test]
async fn multi_part_candidates_are_concatenated() {
    let server = MockServer::start();
    let body = serde_json::json!({
        "candidates": [
            { "content": { "parts": [{ "text": "Part one. " }, { "text": "Part two." }] } },
            { "content": { "parts": [{ "text": "ignored" }] } }
        ]
    })
    .to_string();
    let mock = mock_generate(&server, 200, &body);

    let text = client(&server).summarize_text("ctx").await;

    mock.assert();
    assert_eq!(text, "Part one. Part two.");
}

#[tokio::test]
async fn model_and_credential_are_configurable() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path(generate_path("other-model"))
            .header("x-goog-api-key", "other-key");
        then.status(200)
            .header("content-type", "application/json")
            .body(candidate_body("ok"));
    });

    let c = NarrativeClient::builder()
        .base_url(base_url(&server))
        .model("other-model")
        .api_key("other-key")
        .temperature(0.2)
        .top_p(0.5)
        .build()
        .unwrap();
    assert_eq!(c.model(), "other-model");
    assert!(c.has_credential());

    assert_eq!(c.summarize_text("ctx").await, "ok");
    mock.assert();
}
