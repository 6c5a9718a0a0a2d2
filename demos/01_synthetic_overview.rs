use esg_insights::{Dashboard, DashboardConfig, Quartile, Tab, View};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "tracing-subscriber")]
    esg_insights::init_tracing();

    // 1. A reproducible synthetic roster with the baseline aggregates.
    let config = DashboardConfig::builder().synthetic(Some(2021)).build();
    let dashboard = Dashboard::new(esg_insights::load_universe(&config)).with_config(config);
    let universe = dashboard.universe();

    println!("--- Universe ---");
    for q in Quartile::ALL {
        let members: Vec<&str> = universe.members(q).map(|c| c.ticker.as_str()).collect();
        println!("{q}: {:>2} companies  {}", members.len(), members.join(", "));
    }
    println!();

    // 2. The executive summary.
    let overview = dashboard.overview("");
    println!("--- Executive Summary ---");
    for kpi in &overview.kpis {
        println!("{:<16} {:>8}  ({})", kpi.label, kpi.value, kpi.sub);
    }
    println!();
    for q in &overview.research_questions {
        println!(
            "{:<22} {:<8} {}  {}",
            q.title,
            q.answer.as_str(),
            "*".repeat(usize::from(q.evidence)),
            q.insight
        );
    }
    println!();

    // 3. Any tab renders to a serialisable view model.
    let mut rng = StdRng::seed_from_u64(7);
    if let View::Survival(survival) = dashboard.view(&Tab::from_id("survival", None), &mut rng) {
        println!("--- Recovery Velocity ---");
        for bar in &survival.recovery {
            println!("{}: {:>3.0} days  {}", bar.quartile, bar.days, "#".repeat((bar.width / 5.0) as usize));
        }
    }
    println!();

    let json = serde_json::to_string_pretty(&dashboard.view(&Tab::Pillars, &mut rng))?;
    println!("--- Pillars view (JSON) ---\n{json}");
    Ok(())
}
