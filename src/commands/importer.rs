// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::categorize::{Categorizer, UNCATEGORIZED};
use crate::commands::transactions::print_categorize_hint;
use crate::db::{categorize_options, load_dictionary, load_transactions, save_transactions};
use crate::models::{RawAmount, RawRecord, Transaction};
use crate::utils::fresh_transaction_ids;
use anyhow::{anyhow, Context, Result};
use csv::{ReaderBuilder, Trim};
use rusqlite::Connection;
use std::io::Read;
use tracing::info;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => import_transactions(conn, sub),
        _ => Ok(()),
    }
}

fn import_transactions(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("path").map(|s| s.trim()).unwrap_or_default();
    let file = std::fs::File::open(path).with_context(|| format!("Open CSV {}", path))?;
    let records = read_records(file).with_context(|| format!("Read CSV {}", path))?;

    let mut txns = load_transactions(conn)?;
    let dict = load_dictionary(conn)?;
    let categorizer = Categorizer::new(&dict, categorize_options(conn)?);
    let ids = fresh_transaction_ids(&txns, records.len());
    let imported: Vec<Transaction> = records
        .into_iter()
        .zip(ids)
        .map(|(r, id)| categorizer.apply(&r.into_transaction(id)))
        .collect();

    let uncategorized: Vec<&Transaction> = imported
        .iter()
        .filter(|t| t.category_name() == UNCATEGORIZED)
        .collect();
    for t in &uncategorized {
        print_categorize_hint(t);
    }

    txns.extend(imported.iter().cloned());
    save_transactions(conn, &txns)?;
    info!(path, rows = imported.len(), "imported transactions");
    println!(
        "Imported {} transaction(s) from {} ({} uncategorized)",
        imported.len(),
        path,
        uncategorized.len()
    );
    Ok(())
}

/// Reads `date,description,amount` rows. Header names are matched
/// case-insensitively in any order; extra columns are ignored.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<RawRecord>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| anyhow!("CSV header is missing a '{}' column", name))
    };
    let date_col = column("date")?;
    let desc_col = column("description")?;
    let amount_col = column("amount")?;

    let mut out = Vec::new();
    for result in rdr.records() {
        let rec = result?;
        if rec.iter().all(|f| f.is_empty()) {
            continue;
        }
        out.push(RawRecord {
            date: rec.get(date_col).unwrap_or("").to_string(),
            description: rec.get(desc_col).unwrap_or("").to_string(),
            amount: match rec.get(amount_col) {
                Some(a) if !a.is_empty() => RawAmount::Text(a.to_string()),
                _ => RawAmount::Missing,
            },
        });
    }
    Ok(out)
}
