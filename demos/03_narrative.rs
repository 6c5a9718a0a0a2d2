use std::time::Duration;

use esg_insights::narrative::{PLACEHOLDER_MESSAGE, summary_context};
use esg_insights::{Dashboard, DashboardConfig, NarrativeClient, metrics};

// Reads the API key from API_KEY (or the variable named by ESG_AI_KEY_VAR).
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "tracing-subscriber")]
    esg_insights::init_tracing();

    // 1. A direct request through an explicitly built client.
    let client = NarrativeClient::builder()
        .timeout(Duration::from_secs(20))
        .build()?;
    println!("Model: {}  credential configured: {}", client.model(), client.has_credential());

    let context = summary_context(&metrics::baseline());
    println!("Context: {context}");
    println!("Narrative: {}", client.summarize_text(&context).await);
    println!();

    // 2. The same through a dashboard session: views render while the request is in flight.
    let dashboard = Dashboard::from_config(DashboardConfig::from_env()?)?;
    let mut insight = dashboard.spawn_insight();
    println!("Before: {}", insight.refresh());

    let overview = dashboard.overview("");
    for kpi in &overview.kpis {
        println!("{:<16} {}", kpi.label, kpi.value);
    }

    let text = insight.wait().await;
    if text != PLACEHOLDER_MESSAGE {
        println!("After: {text}");
    }
    Ok(())
}
