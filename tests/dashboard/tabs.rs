use esg_insights::{Dashboard, Tab, View};

use crate::common::{rng, small_universe};

#[test]
fn ids_round_trip_through_from_id() {
    for tab in Tab::NAVIGATION {
        assert_eq!(Tab::from_id(tab.id(), None), tab);
    }
    assert_eq!(
        Tab::from_id("company", Some("AAA")),
        Tab::Company("AAA".to_string())
    );
}

#[test]
fn unknown_ids_and_bare_company_fall_back_to_overview() {
    assert_eq!(Tab::from_id("portfolio", None), Tab::Overview);
    assert_eq!(Tab::from_id("", None), Tab::Overview);
    assert_eq!(Tab::from_id("company", None), Tab::Overview);
    assert_eq!(Tab::from_id("company", Some("  ")), Tab::Overview);
}

#[test]
fn navigation_labels() {
    let labels: Vec<&str> = Tab::NAVIGATION.iter().map(Tab::label).collect();
    assert_eq!(
        labels,
        [
            "Executive Summary",
            "FQ1: Raw Returns",
            "FQ2: Risk-Adjusted",
            "FQ3: Downside Risk",
            "FQ4: Survival",
            "FQ5: Pillar Analysis",
            "Data Engineering",
            "Settings",
        ]
    );
}

#[test]
fn every_tab_renders_its_own_view() {
    let d = Dashboard::new(small_universe());
    let mut r = rng(1);
    for tab in Tab::NAVIGATION {
        let view = d.view(&tab, &mut r);
        assert_eq!(view.tab_id(), tab.id());
    }
    let view = d.view(&Tab::Company("CCC".into()), &mut r);
    assert_eq!(view.tab_id(), "company");
}

#[test]
fn unknown_company_renders_overview() {
    let d = Dashboard::new(small_universe());
    let view = d.view(&Tab::Company("NOPE".into()), &mut rng(2));
    assert!(matches!(view, View::Overview(_)));
}

#[test]
fn views_serialize_with_tab_tag() {
    let d = Dashboard::new(small_universe());
    let json = serde_json::to_value(d.view(&Tab::DataEngineering, &mut rng(3))).unwrap();
    assert_eq!(json["tab"], "data-eng");
    assert_eq!(json["data"]["stationarity"].as_array().unwrap().len(), 4);

    let json = serde_json::to_value(d.view(&Tab::Downside, &mut rng(3))).unwrap();
    assert_eq!(json["tab"], "downside");
    assert_eq!(json["data"]["table"][0]["status"], "RESILIENT");
    assert_eq!(json["data"]["table"][0]["var95"], -0.015);
}
