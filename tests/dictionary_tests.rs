// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use spendlens::{Dictionary, RawAmount, RawRecord};

#[test]
fn json_round_trip_keeps_declaration_order() {
    let raw = r#"{"Zoo":["zebra"],"Apple":[],"Middle":["a","b"]}"#;
    let d: Dictionary = serde_json::from_str(raw).unwrap();
    let names: Vec<&str> = d.names().collect();
    assert_eq!(names, vec!["Zoo", "Apple", "Middle"]);
    assert_eq!(serde_json::to_string(&d).unwrap(), raw);
}

#[test]
fn duplicate_names_are_rejected() {
    let err = serde_json::from_str::<Dictionary>(r#"{"A":["x"],"A":["y"]}"#).unwrap_err();
    assert!(err.to_string().contains("duplicate category 'A'"));
}

#[test]
fn add_keyword_appends_and_creates() {
    let mut d = Dictionary::with_defaults();
    assert!(d.add_keyword("Coffee", "blue bottle"));
    assert!(!d.add_keyword("Coffee", "Blue Bottle"));
    assert!(!d.add_keyword("Coffee", "   "));
    assert!(d.add_keyword("Pets", "chewy"));

    let names: Vec<&str> = d.names().collect();
    assert_eq!(names, vec!["Gas", "Coffee", "Groceries", "Pets"]);
    assert_eq!(d.get("Coffee").unwrap().last().map(String::as_str), Some("blue bottle"));
    assert_eq!(d.get("Pets").unwrap(), ["chewy".to_string()]);
}

#[test]
fn insert_replaces_in_place() {
    let mut d = Dictionary::with_defaults();
    d.insert("Gas", ["mobil"]);
    assert_eq!(d.names().next(), Some("Gas"));
    assert_eq!(d.get("Gas").unwrap(), ["mobil".to_string()]);
    assert!(d.remove("Coffee").is_some());
    assert!(d.remove("Coffee").is_none());
    assert_eq!(d.len(), 2);
}

#[test]
fn raw_records_are_coerced_at_the_boundary() {
    let rec = RawRecord {
        date: " 3/7/2025 ".into(),
        description: "  Shell 0042 ".into(),
        amount: RawAmount::Text("-12.40".into()),
    };
    let t = rec.into_transaction("id-1".into());
    assert_eq!(t.date, "2025-03-07");
    assert_eq!(t.description, "Shell 0042");
    assert_eq!(t.amount, -12.4);
    assert_eq!(t.category, None);

    let short_year = RawRecord {
        date: "3/7/25".into(),
        description: "Shell".into(),
        amount: RawAmount::Number(40.0),
    };
    assert_eq!(short_year.into_transaction("id-3".into()).date, "2025-03-07");

    let junk = RawRecord {
        date: "whenever".into(),
        description: "x".into(),
        amount: RawAmount::Text("abc".into()),
    };
    let t = junk.into_transaction("id-2".into());
    assert_eq!(t.date, "whenever");
    assert_eq!(t.amount, 0.0);
    assert_eq!(RawAmount::Missing.coerce(), 0.0);
    assert_eq!(RawAmount::Number(f64::NAN).coerce(), 0.0);
}

#[test]
fn raw_records_deserialize_from_json() {
    let recs: Vec<RawRecord> = serde_json::from_str(
        r#"[{"date":"2025-01-01","description":"a","amount":"7.5"},
            {"date":"2025-01-02","description":"b","amount":2},
            {"date":"2025-01-03","description":"c"}]"#,
    )
    .unwrap();
    let amounts: Vec<f64> = recs.iter().map(|r| r.amount.coerce()).collect();
    assert_eq!(amounts, vec![7.5, 2.0, 0.0]);
}
