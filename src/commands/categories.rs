// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::categorize::{Categorizer, UNCATEGORIZED};
use crate::db::{
    categorize_options, load_dictionary, load_transactions, save_dictionary, save_transactions,
};
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{anyhow, Result};
use rusqlite::Connection;
use serde::Serialize;
use tracing::info;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = required_name(sub)?;
            let mut dict = load_dictionary(conn)?;
            if dict.contains(&name) {
                return Err(anyhow!("Category '{}' already exists", name));
            }
            let keywords: Vec<String> = sub
                .get_many::<String>("keyword")
                .map(|vals| {
                    vals.map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default();
            println!("Added category '{}' with {} keyword(s)", name, keywords.len());
            dict.insert(name, keywords);
            save_dictionary(conn, &dict)?;
        }
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => {
            let name = required_name(sub)?;
            let mut dict = load_dictionary(conn)?;
            dict.remove(&name)
                .ok_or_else(|| anyhow!("Category '{}' not found", name))?;
            save_dictionary(conn, &dict)?;
            println!("Removed category '{}'", name);
        }
        Some(("keyword", sub)) => {
            let name = required_name(sub)?;
            let keyword = sub
                .get_one::<String>("keyword")
                .map(|s| s.trim())
                .unwrap_or_default();
            if keyword.is_empty() {
                return Err(anyhow!("Keyword must not be empty"));
            }
            let mut dict = load_dictionary(conn)?;
            if !dict.contains(&name) {
                return Err(anyhow!("Category '{}' not found", name));
            }
            if dict.add_keyword(&name, keyword) {
                save_dictionary(conn, &dict)?;
                println!("Added keyword '{}' to '{}'", keyword, name);
            } else {
                println!("'{}' already lists '{}'", name, keyword);
            }
        }
        Some(("apply", _)) => {
            let report = apply(conn)?;
            println!(
                "Re-categorized {} transaction(s): {} changed, {} uncategorized",
                report.total, report.changed, report.uncategorized
            );
        }
        _ => {}
    }
    Ok(())
}

fn required_name(sub: &clap::ArgMatches) -> Result<String> {
    sub.get_one::<String>("name")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| anyhow!("Category name must not be empty"))
}

#[derive(Serialize)]
struct CategoryRow<'a> {
    name: &'a str,
    keywords: &'a [String],
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let dict = load_dictionary(conn)?;
    let rows: Vec<CategoryRow> = dict
        .iter()
        .map(|e| CategoryRow {
            name: &e.name,
            keywords: &e.keywords,
        })
        .collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &rows)? {
        let data = rows
            .iter()
            .map(|r| vec![r.name.to_string(), r.keywords.join(", ")])
            .collect();
        println!("{}", pretty_table(&["Category", "Keywords"], data));
    }
    Ok(())
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub total: usize,
    pub changed: usize,
    pub uncategorized: usize,
}

/// Runs the categorizer over the whole ledger with the current dictionary.
pub fn apply(conn: &Connection) -> Result<ApplyReport> {
    let dict = load_dictionary(conn)?;
    let categorizer = Categorizer::new(&dict, categorize_options(conn)?);
    let mut txns = load_transactions(conn)?;
    let mut report = ApplyReport {
        total: txns.len(),
        ..Default::default()
    };
    for t in txns.iter_mut() {
        let resolved = categorizer.categorize(&t.description);
        if t.category.as_deref() != Some(resolved) {
            t.category = Some(resolved.to_string());
            report.changed += 1;
        }
        if resolved == UNCATEGORIZED {
            report.uncategorized += 1;
        }
    }
    save_transactions(conn, &txns)?;
    info!(?report, "re-categorized ledger");
    Ok(report)
}
