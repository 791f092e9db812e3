// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use spendlens::{filter_transactions, Program, QueryError, Transaction};

fn txn(id: &str, date: &str, description: &str, amount: f64, category: Option<&str>) -> Transaction {
    Transaction {
        id: id.into(),
        date: date.into(),
        description: description.into(),
        amount,
        category: category.map(Into::into),
    }
}

fn ledger() -> Vec<Transaction> {
    vec![
        txn("1", "2025-01-05", "starbucks coffee", 5.25, Some("Coffee")),
        txn("2", "2025-01-20", "latte drink", 4.0, Some("Coffee")),
        txn("3", "2025-02-10", "shell gas", 40.0, Some("Gas")),
        txn("4", "2025-03-01", "gasoline purchase", 30.0, None),
    ]
}

fn ids(txns: &[&Transaction]) -> Vec<String> {
    txns.iter().map(|t| t.id.clone()).collect()
}

fn run(query: &str) -> Vec<String> {
    let l = ledger();
    ids(&filter_transactions(&l, query).unwrap())
}

#[test]
fn blank_query_returns_everything_untouched() {
    let l = ledger();
    for q in ["", "   ", "\t\n"] {
        let out = filter_transactions(&l, q).unwrap();
        assert_eq!(out.len(), l.len());
        for (a, b) in out.iter().zip(l.iter()) {
            assert!(std::ptr::eq(*a, b));
        }
    }
}

#[test]
fn bare_words_match_whole_words_of_description() {
    assert_eq!(run("latte"), vec!["2"]);
    assert_eq!(run("gas"), vec!["3"]);
    assert_eq!(run("GAS"), vec!["3"]);
    assert!(run("star").is_empty());
}

#[test]
fn boolean_operators() {
    assert_eq!(run("starbucks AND coffee"), vec!["1"]);
    assert_eq!(run("latte OR shell"), vec!["2", "3"]);
    assert_eq!(run("NOT gas"), vec!["1", "2", "4"]);
    assert_eq!(run("latte or shell"), vec!["2", "3"]);
}

#[test]
fn double_negation_is_identity() {
    for term in ["coffee", "amount>10", "category=coffee", "date<2025-02-01"] {
        assert_eq!(run(&format!("NOT NOT {}", term)), run(term), "term {}", term);
    }
}

#[test]
fn and_binds_tighter_than_or() {
    let l = vec![
        txn("a", "2025-01-01", "alpha", 1.0, None),
        txn("b", "2025-01-01", "beta", 1.0, None),
        txn("bc", "2025-01-01", "beta gamma", 1.0, None),
    ];
    let out = filter_transactions(&l, "alpha OR beta AND gamma").unwrap();
    assert_eq!(ids(&out), vec!["a", "bc"]);

    let grouped = filter_transactions(&l, "(alpha OR beta) AND gamma").unwrap();
    assert_eq!(ids(&grouped), vec!["bc"]);
}

#[test]
fn amount_comparisons() {
    assert_eq!(run("amount>10"), vec!["3", "4"]);
    assert_eq!(run("amount>=30"), vec!["3", "4"]);
    assert_eq!(run("amount<5"), vec!["2"]);
    assert_eq!(run("amount<=5.25"), vec!["1", "2"]);
    assert_eq!(run("amount=40"), vec!["3"]);
    assert_eq!(run("amount!=40"), vec!["1", "2", "4"]);
}

#[test]
fn date_comparisons_accept_iso_and_us_forms() {
    assert_eq!(run("date=2025-01-05"), vec!["1"]);
    assert_eq!(run("date>=2/1/2025"), vec!["3", "4"]);
    assert_eq!(run("date<2025-01-20"), vec!["1"]);
    assert_eq!(run("date!=1/20/2025"), vec!["1", "3", "4"]);
    assert_eq!(run("date>2025-01-05 AND date<2025-03-01"), vec!["2", "3"]);
    // two-digit years fall through to the lenient parse and land in 20xx
    assert_eq!(run("date>=1/1/25"), vec!["1", "2", "3", "4"]);
    assert_eq!(run("date<2/1/25"), vec!["1", "2"]);
}

#[test]
fn text_field_comparisons_ignore_case() {
    assert_eq!(run("description^=STAR"), vec!["1"]);
    assert_eq!(run("description$=drink"), vec!["2"]);
    assert_eq!(run("description:gas"), vec!["3", "4"]);
    assert_eq!(run("description=shell"), Vec::<String>::new());
    assert_eq!(run("category=coffee"), vec!["1", "2"]);
    assert_eq!(run("category^=co"), vec!["1", "2"]);
    // an uncategorized row compares as empty text
    assert_eq!(run("category!=gas"), vec!["1", "2", "4"]);
}

#[test]
fn unbalanced_parentheses_are_reported() {
    let l = ledger();
    for q in ["(amount>5", "amount>5)", "((coffee)", "coffee) OR (latte"] {
        assert_eq!(
            filter_transactions(&l, q).unwrap_err(),
            QueryError::MismatchedParentheses,
            "query {}",
            q
        );
    }
    assert_eq!(
        QueryError::MismatchedParentheses.to_string(),
        "Mismatched parentheses"
    );
}

#[test]
fn malformed_terms_are_invalid_syntax() {
    let l = ledger();
    for q in [
        "amount>abc",
        "amount:5",
        "amount^=5",
        "date>someday",
        "date:2025-01-01",
        "description>abc",
        "category<=x",
        "payee:starbucks",
        "Amount>5",
    ] {
        let err = filter_transactions(&l, q).unwrap_err();
        assert!(
            matches!(err, QueryError::InvalidSyntax(_)),
            "query {} gave {:?}",
            q,
            err
        );
        assert!(err.to_string().starts_with("Invalid syntax"));
    }
}

#[test]
fn malformed_programs_are_invalid_syntax() {
    let l = ledger();
    for q in ["AND coffee", "coffee OR", "NOT", "coffee latte", "()", "description=shell gas"] {
        assert!(
            matches!(
                filter_transactions(&l, q),
                Err(QueryError::InvalidSyntax(_))
            ),
            "query {}",
            q
        );
    }
}

#[test]
fn errors_surface_even_without_transactions() {
    assert!(matches!(
        filter_transactions(&[], "amount>abc"),
        Err(QueryError::InvalidSyntax(_))
    ));
    assert!(matches!(
        Program::compile("coffee AND"),
        Err(QueryError::InvalidSyntax(_))
    ));
}

#[test]
fn unreadable_transaction_date_fails_date_terms_only() {
    let l = vec![txn("x", "sometime", "coffee", 1.0, None)];
    assert!(matches!(
        filter_transactions(&l, "date>2025-01-01"),
        Err(QueryError::InvalidSyntax(_))
    ));
    assert_eq!(ids(&filter_transactions(&l, "coffee").unwrap()), vec!["x"]);
}

#[test]
fn compiled_program_is_reusable() {
    let program = Program::compile("coffee OR amount>35").unwrap();
    let l = ledger();
    let hits: Vec<&str> = l
        .iter()
        .filter(|t| program.evaluate(t).unwrap())
        .map(|t| t.id.as_str())
        .collect();
    assert_eq!(hits, vec!["1", "3"]);
}
