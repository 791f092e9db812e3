// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::load_transactions;
use crate::query::filter_transactions;
use anyhow::{anyhow, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(conn, sub),
        _ => Ok(()),
    }
}

fn export_transactions(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub
        .get_one::<String>("format")
        .map(|s| s.trim().to_lowercase())
        .unwrap_or_else(|| "csv".into());
    let out = sub.get_one::<String>("out").map(|s| s.trim()).unwrap_or_default();
    let query = sub
        .get_one::<String>("query")
        .map(|s| s.as_str())
        .unwrap_or_default();

    let txns = load_transactions(conn)?;
    let rows = filter_transactions(&txns, query)?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["id", "date", "description", "amount", "category"])?;
            for t in &rows {
                let amount = t.amount.to_string();
                wtr.write_record([
                    t.id.as_str(),
                    t.date.as_str(),
                    t.description.as_str(),
                    amount.as_str(),
                    t.category.as_deref().unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(&rows)?)?;
        }
        other => return Err(anyhow!("Unknown format: {} (use csv|json)", other)),
    }
    println!("Exported {} transaction(s) to {}", rows.len(), out);
    Ok(())
}
