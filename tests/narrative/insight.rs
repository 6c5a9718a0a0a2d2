use std::sync::Arc;

use esg_insights::Insight;
use esg_insights::narrative::{FAILURE_MESSAGE, PLACEHOLDER_MESSAGE};

use crate::common::{GatedNarrator, PanickingNarrator, StaticNarrator};

#[tokio::test]
async fn pending_insight_shows_placeholder_until_resolved() {
    let narrator = GatedNarrator::new("Governance matters most.");
    let mut insight = Insight::spawn(narrator.clone(), "ctx".to_string());

    assert!(!insight.is_ready());
    assert_eq!(insight.current(), PLACEHOLDER_MESSAGE);
    assert_eq!(insight.refresh(), PLACEHOLDER_MESSAGE);

    narrator.release.notify_one();
    assert_eq!(insight.wait().await, "Governance matters most.");
}

#[tokio::test]
async fn refresh_picks_up_a_finished_request() {
    let narrator = StaticNarrator::new("Done");
    let mut insight = Insight::spawn(narrator.clone(), "Q1 Returns".to_string());

    let mut text = insight.refresh().to_string();
    for _ in 0..100 {
        if insight.is_ready() {
            break;
        }
        tokio::task::yield_now().await;
        text = insight.refresh().to_string();
    }

    assert!(insight.is_ready());
    assert_eq!(text, "Done [Q1 Returns]");
    assert_eq!(narrator.calls(), 1);
}

#[tokio::test]
async fn panicking_service_resolves_to_failure_message() {
    let insight = Insight::spawn(Arc::new(PanickingNarrator), "ctx".to_string());
    assert_eq!(insight.wait().await, FAILURE_MESSAGE);
}

#[test]
fn ready_insight_needs_no_runtime() {
    let mut insight = Insight::ready("static");
    assert!(insight.is_ready());
    assert_eq!(insight.refresh(), "static");
    assert!(format!("{insight:?}").contains("static"));
}
