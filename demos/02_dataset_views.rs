use std::env;
use std::path::PathBuf;

use esg_insights::{
    Dashboard, DashboardConfig, DatasetSource, MetricsStrategy, Tab, UniverseSource, View,
    ingest,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

// Usage: 02_dataset_views [prices.csv [esg.csv]]
// Without arguments the bundled test fixture is used.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "tracing-subscriber")]
    esg_insights::init_tracing();

    let args: Vec<String> = env::args().skip(1).collect();
    let dataset_path = match args.first() {
        Some(prices) => {
            // 1. Run the offline pipeline: prices (+ optional ESG records) to a dataset document.
            let out = env::temp_dir().join("esg_insights_processed_data.json");
            let esg = args.get(1).map(PathBuf::from);
            let dataset = ingest::run(prices, esg.as_deref(), &out)?;
            println!("Wrote {} companies to {}", dataset.companies.len(), out.display());
            out
        }
        None => PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/processed_data.json"),
    };

    // 2. Compare the document's aggregates with a recomputation from company metrics.
    let precomputed = DatasetSource::from_path(&dataset_path).load()?;
    let averaged = DatasetSource::from_path(&dataset_path)
        .metrics_strategy(MetricsStrategy::CompanyAverage)
        .load()?;
    println!("--- Annualized return by quartile ---");
    for ((q, pre), (_, avg)) in precomputed.metrics.iter().zip(averaged.metrics.iter()) {
        println!(
            "{q}: document {:>6.2}%   recomputed {:>6.2}%",
            pre.annualized_return * 100.0,
            avg.annualized_return * 100.0
        );
    }
    println!();

    // 3. Render the downside and company views from a configured session.
    let config = DashboardConfig::builder().dataset(&dataset_path).build();
    let dashboard = Dashboard::from_config(config)?;
    let mut rng = StdRng::seed_from_u64(1);

    if let View::Downside(downside) = dashboard.view(&Tab::Downside, &mut rng) {
        println!("--- Downside ---");
        for row in &downside.table {
            println!(
                "{}  VaR95 {:>6.2}%  VaR99 {:>6.2}%  MDD {:>6.1}%  {:?}",
                row.quartile,
                row.var_95 * 100.0,
                row.var_99 * 100.0,
                row.max_drawdown * 100.0,
                row.status
            );
        }
    }
    println!();

    let Some(first) = dashboard.universe().companies.first() else {
        println!("Dataset is empty.");
        return Ok(());
    };
    let tab = Tab::from_id("company", Some(first.ticker.as_str()));
    if let View::Company(view) = dashboard.view(&tab, &mut rng) {
        println!("--- {} ({}) ---", view.company.name, view.company.sector);
        for axis in &view.profile {
            println!("{:<14} {:>5.1}", axis.subject, axis.value);
        }
        if let (Some(start), Some(end)) = (view.series.first(), view.series.last()) {
            println!("Series {} .. {}: {:.2} -> {:.2}", start.date, end.date, start.value, end.value);
        }
    }
    Ok(())
}
