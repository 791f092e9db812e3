// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use serde_json::json;
use spendlens::{filter_transactions, summarize_by_category, Transaction, UNCATEGORIZED};

fn from_json(v: serde_json::Value) -> Vec<Transaction> {
    serde_json::from_value(v).unwrap()
}

#[test]
fn sums_numeric_and_string_amounts() {
    let txns = from_json(json!([
        {"id": "1", "date": "2025-01-01", "description": "a", "category": "A", "amount": 5.5},
        {"id": "2", "date": "2025-01-01", "description": "b", "category": "A", "amount": "4.5"},
        {"id": "3", "date": "2025-01-01", "description": "c", "category": "B", "amount": 3}
    ]));
    let summary = summarize_by_category(&txns);
    assert_eq!(summary.len(), 2);
    assert_eq!(summary.get("A"), Some(10.0));
    assert_eq!(summary.get("B"), Some(3.0));
    assert_eq!(serde_json::to_value(&summary).unwrap(), json!({"A": 10.0, "B": 3.0}));
}

#[test]
fn unusable_amounts_count_as_zero_but_keep_the_category() {
    let txns = from_json(json!([
        {"id": "1", "date": "2025-01-01", "description": "a", "category": "Fees", "amount": "n/a"},
        {"id": "2", "date": "2025-01-01", "description": "b", "category": "Misc"},
        {"id": "3", "date": "2025-01-01", "description": "c", "category": "Misc", "amount": null},
        {"id": "4", "date": "2025-01-01", "description": "d", "amount": 2}
    ]));
    let summary = summarize_by_category(&txns);
    assert_eq!(summary.get("Fees"), Some(0.0));
    assert_eq!(summary.get("Misc"), Some(0.0));
    assert_eq!(summary.get(UNCATEGORIZED), Some(2.0));
    assert_eq!(summary.grand_total(), 2.0);
}

#[test]
fn summarizes_a_filtered_view() {
    let txns = from_json(json!([
        {"id": "1", "date": "2025-01-01", "description": "starbucks", "category": "Coffee", "amount": 5},
        {"id": "2", "date": "2025-01-02", "description": "shell", "category": "Gas", "amount": 40},
        {"id": "3", "date": "2025-02-01", "description": "peets", "category": "Coffee", "amount": 3}
    ]));
    let filtered = filter_transactions(&txns, "date<2025-02-01").unwrap();
    let summary = summarize_by_category(filtered);
    let pairs: Vec<(&str, f64)> = summary.iter().collect();
    assert_eq!(pairs, vec![("Coffee", 5.0), ("Gas", 40.0)]);
}

#[test]
fn empty_input_gives_empty_summary() {
    let summary = summarize_by_category(&Vec::<Transaction>::new());
    assert!(summary.is_empty());
}
