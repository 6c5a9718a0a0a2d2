use esg_insights::narrative::{FAILURE_MESSAGE, NO_CREDENTIAL_MESSAGE, summary_context};
use esg_insights::{NarrativeClient, metrics};

#[tokio::test]
#[ignore]
async fn live_narrative_smoke() {
    if !crate::common::live_enabled() {
        return;
    }

    let client = NarrativeClient::builder().build().unwrap();
    if !client.has_credential() {
        return;
    }

    let text = client.summarize_text(&summary_context(&metrics::baseline())).await;
    assert_ne!(text, NO_CREDENTIAL_MESSAGE);
    assert_ne!(text, FAILURE_MESSAGE);
    assert!(!text.trim().is_empty());
}
