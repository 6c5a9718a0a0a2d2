use esg_insights::Quartile;
use esg_insights::metrics::baseline;

#[test]
fn baseline_matches_reference_table() {
    let m = baseline();

    let q1 = &m[Quartile::Q1];
    assert_eq!(q1.annualized_return, 0.125);
    assert_eq!(q1.sharpe_ratio, 1.15);
    assert_eq!(q1.sortino_ratio, 1.45);
    assert_eq!(q1.volatility, 0.14);
    assert_eq!(q1.max_drawdown, -0.18);
    assert_eq!(q1.var_95, -0.015);
    assert_eq!(q1.var_99, -0.025);
    assert_eq!(q1.tail_risk, 12.0);
    assert_eq!(q1.survival_probability, 0.98);
    assert_eq!(q1.recovery_days, 45.0);

    let q4 = &m[Quartile::Q4];
    assert_eq!(q4.annualized_return, 0.062);
    assert_eq!(q4.sharpe_ratio, 0.55);
    assert_eq!(q4.tail_risk, 38.0);
    assert_eq!(q4.recovery_days, 95.0);
}

#[test]
fn baseline_improves_monotonically_towards_q1() {
    let m = baseline();
    let rows: Vec<_> = m.iter().map(|(_, pm)| *pm).collect();
    for pair in rows.windows(2) {
        let (better, worse) = (&pair[0], &pair[1]);
        assert!(better.annualized_return > worse.annualized_return);
        assert!(better.sharpe_ratio > worse.sharpe_ratio);
        assert!(better.volatility < worse.volatility);
        assert!(better.max_drawdown > worse.max_drawdown);
        assert!(better.tail_risk < worse.tail_risk);
        assert!(better.survival_probability > worse.survival_probability);
        assert!(better.recovery_days < worse.recovery_days);
    }
}

#[test]
fn serializes_as_quartile_keyed_map() {
    let json = serde_json::to_value(baseline()).unwrap();
    let obj = json.as_object().unwrap();
    let keys: Vec<&str> = obj.keys().map(String::as_str).collect();
    assert_eq!(keys.len(), 4);
    for q in ["Q1", "Q2", "Q3", "Q4"] {
        assert!(obj.contains_key(q), "missing {q}");
    }
    assert_eq!(json["Q2"]["annualizedReturn"], 0.108);
    assert_eq!(json["Q3"]["var95"], -0.022);
    assert_eq!(json["Q4"]["survivalProbability"], 0.89);
}
