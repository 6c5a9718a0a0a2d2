use esg_insights::{EsgError, LabelPolicy, Quartile};

#[test]
fn known_labels_parse_strictly() {
    for q in Quartile::ALL {
        assert_eq!(q.as_str().parse::<Quartile>().unwrap(), q);
        assert_eq!(Quartile::from_label(q.as_str(), LabelPolicy::Reject).unwrap(), q);
    }
    assert!("q1".parse::<Quartile>().is_err());
    assert!(" Q1".parse::<Quartile>().is_err());
}

#[test]
fn unknown_label_is_coerced_by_default() {
    let q = Quartile::from_label("Q5", LabelPolicy::default()).unwrap();
    assert_eq!(q, Quartile::Q4);

    let q = Quartile::from_label("", LabelPolicy::CoerceToLowest).unwrap();
    assert_eq!(q, Quartile::Q4);
}

#[test]
fn unknown_label_is_rejected_under_strict_policy() {
    let err = Quartile::from_label("Top", LabelPolicy::Reject).unwrap_err();
    match err {
        EsgError::UnknownQuartile(label) => assert_eq!(label, "Top"),
        other => panic!("expected UnknownQuartile, got {other:?}"),
    }
}

#[test]
fn display_and_serde_use_the_label() {
    assert_eq!(Quartile::Q3.to_string(), "Q3");
    assert_eq!(serde_json::to_string(&Quartile::Q2).unwrap(), "\"Q2\"");
}
