// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::load_transactions;
use crate::query::filter_transactions;
use crate::summary::{summarize_by_category, CategorySummary};
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(conn, sub)?,
        _ => {}
    }
    Ok(())
}

/// Category totals over the transactions matching `query` (all of them when blank).
pub fn summary_for_query(conn: &Connection, query: &str) -> Result<CategorySummary> {
    let txns = load_transactions(conn)?;
    let filtered = filter_transactions(&txns, query)?;
    Ok(summarize_by_category(filtered))
}

fn summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let query = sub
        .get_one::<String>("query")
        .map(|s| s.as_str())
        .unwrap_or_default();
    let summary = summary_for_query(conn, query)?;
    if !maybe_print_json(json_flag, jsonl_flag, &summary)? {
        let mut data: Vec<Vec<String>> = summary
            .iter()
            .map(|(cat, total)| vec![cat.to_string(), fmt_money(total)])
            .collect();
        data.push(vec!["Total".into(), fmt_money(summary.grand_total())]);
        println!("{}", pretty_table(&["Category", "Total"], data));
    }
    Ok(())
}
