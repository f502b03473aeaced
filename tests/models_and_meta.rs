use wdi_query::{Indicator, Mode, Query, Response};

#[test]
fn query_year_accepts_string_or_number() {
    let q: Query =
        serde_json::from_str(r#"{"indicator":"gdp","mode":"for_year","country":"DEU","year":"2020"}"#)
            .unwrap();
    assert_eq!(q.year.as_deref(), Some("2020"));
    assert_eq!(q.indicator, Indicator::Gdp);
    assert_eq!(q.mode, Mode::ForYear);

    let q: Query =
        serde_json::from_str(r#"{"indicator":"gdp","mode":"avg_for_year","year":2020}"#).unwrap();
    assert_eq!(q.year.as_deref(), Some("2020"));
    assert_eq!(q.country, None);
}

#[test]
fn query_year_may_be_absent_null_or_garbage() {
    let q: Query = serde_json::from_str(r#"{"indicator":"gini","mode":"latest","country":"ESP"}"#)
        .unwrap();
    assert_eq!(q.year, None);

    let q: Query =
        serde_json::from_str(r#"{"indicator":"gini","mode":"latest","year":null}"#).unwrap();
    assert_eq!(q.year, None);

    // kept raw so the engine can answer with InvalidYear
    let q: Query =
        serde_json::from_str(r#"{"indicator":"gini","mode":"avg_for_year","year":"next"}"#)
            .unwrap();
    assert_eq!(q.year.as_deref(), Some("next"));
}

#[test]
fn response_serializes_as_flat_record() {
    let r = Response::from(Ok(None));
    let v = serde_json::to_value(r).unwrap();
    assert_eq!(v["ok"], false);
    assert!(v["value"].is_null());
    assert!(v["error"].is_null());
}
