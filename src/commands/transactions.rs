// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::categorize::{Categorizer, UNCATEGORIZED};
use crate::db::{
    categorize_options, load_dictionary, load_transactions, save_dictionary, save_transactions,
};
use crate::models::{RawAmount, RawRecord, Transaction};
use crate::query::filter_transactions;
use crate::utils::{fmt_money, fresh_transaction_ids, maybe_print_json, parse_date, pretty_table};
use anyhow::{anyhow, Context, Result};
use rusqlite::Connection;
use tracing::warn;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => remove(conn, sub)?,
        Some(("categorize", sub)) => categorize(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn arg<'a>(sub: &'a clap::ArgMatches, name: &str) -> Option<&'a str> {
    sub.get_one::<String>(name).map(|s| s.trim())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let date_raw = arg(sub, "date").unwrap_or_default();
    let date = parse_date(date_raw)?;
    let record = RawRecord {
        date: date.to_string(),
        description: arg(sub, "description").unwrap_or_default().to_string(),
        amount: RawAmount::Text(arg(sub, "amount").unwrap_or_default().to_string()),
    };

    let mut txns = load_transactions(conn)?;
    let dict = load_dictionary(conn)?;
    let categorizer = Categorizer::new(&dict, categorize_options(conn)?);
    let id = fresh_transaction_ids(&txns, 1)
        .pop()
        .context("Could not allocate a transaction id")?;
    let txn = categorizer.apply(&record.into_transaction(id));
    txns.push(txn.clone());
    save_transactions(conn, &txns)?;

    println!(
        "Recorded {} on {} at '{}' -> {} (id {})",
        fmt_money(txn.amount),
        txn.date,
        txn.description,
        txn.category_name(),
        txn.id
    );
    if txn.category_name() == UNCATEGORIZED {
        print_categorize_hint(&txn);
    }
    Ok(())
}

pub(crate) fn print_categorize_hint(txn: &Transaction) {
    warn!(id = %txn.id, description = %txn.description, "no category matched");
    println!(
        "  no category matched; try: spendlens tx categorize --id {} --category <name> --keyword <word>",
        txn.id
    );
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let query = arg(sub, "query").unwrap_or_default();
    let txns = load_transactions(conn)?;
    let data = filter_transactions(&txns, query)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|t| {
                vec![
                    t.id.clone(),
                    t.date.clone(),
                    t.description.clone(),
                    t.category_name().to_string(),
                    fmt_money(t.amount),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Date", "Description", "Category", "Amount"], rows)
        );
    }
    Ok(())
}

fn find_index(txns: &[Transaction], id: &str) -> Result<usize> {
    txns.iter()
        .position(|t| t.id == id)
        .ok_or_else(|| anyhow!("Transaction '{}' not found", id))
}

/// Applies an edit and re-resolves the category from the (possibly new) description.
pub fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = arg(sub, "id").unwrap_or_default();
    let mut txns = load_transactions(conn)?;
    let idx = find_index(&txns, id)?;

    let mut updated = txns[idx].clone();
    if let Some(d) = arg(sub, "date") {
        updated.date = parse_date(d)?.to_string();
    }
    if let Some(desc) = arg(sub, "description") {
        updated.description = desc.to_string();
    }
    if let Some(a) = arg(sub, "amount") {
        updated.amount = RawAmount::Text(a.to_string()).coerce();
    }

    let dict = load_dictionary(conn)?;
    let updated = Categorizer::new(&dict, categorize_options(conn)?).apply(&updated);
    txns[idx] = updated.clone();
    save_transactions(conn, &txns)?;

    println!("Updated {} -> {}", updated.id, updated.category_name());
    if updated.category_name() == UNCATEGORIZED {
        print_categorize_hint(&updated);
    }
    Ok(())
}

fn remove(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = arg(sub, "id").unwrap_or_default();
    let mut txns = load_transactions(conn)?;
    let idx = find_index(&txns, id)?;
    txns.remove(idx);
    save_transactions(conn, &txns)?;
    println!("Removed transaction {}", id);
    Ok(())
}

/// Manual categorization: the chosen category is created if needed and the
/// optional keyword is added to it so similar descriptions resolve next time.
pub fn categorize(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = arg(sub, "id").unwrap_or_default();
    let category = arg(sub, "category")
        .filter(|s| !s.is_empty())
        .context("Category name must not be empty")?;
    let keyword = arg(sub, "keyword").filter(|s| !s.is_empty());

    let mut txns = load_transactions(conn)?;
    let idx = find_index(&txns, id)?;

    let mut dict = load_dictionary(conn)?;
    let created = !dict.contains(category);
    match keyword {
        Some(k) => {
            dict.add_keyword(category, k);
        }
        None if created => dict.insert(category, Vec::<String>::new()),
        None => {}
    }
    save_dictionary(conn, &dict)?;

    txns[idx].category = Some(category.to_string());
    save_transactions(conn, &txns)?;

    println!(
        "Categorized {} as '{}'{}{}",
        id,
        category,
        if created { " (new category)" } else { "" },
        keyword
            .map(|k| format!(", learned keyword '{}'", k))
            .unwrap_or_default()
    );
    Ok(())
}
