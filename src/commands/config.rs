// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::{db_path, get_name_threshold, set_name_threshold};
use crate::utils::pretty_table;
use anyhow::{anyhow, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => {
            let rows = vec![
                vec!["store".to_string(), db_path()?.display().to_string()],
                vec![
                    "name_threshold".to_string(),
                    get_name_threshold(conn)?.to_string(),
                ],
            ];
            println!("{}", pretty_table(&["Setting", "Value"], rows));
        }
        Some(("set-threshold", sub)) => {
            let value = *sub
                .get_one::<f64>("value")
                .ok_or_else(|| anyhow!("--value is required"))?;
            if !(0.0..=1.0).contains(&value) {
                return Err(anyhow!("Threshold must be between 0 and 1, got {}", value));
            }
            set_name_threshold(conn, value)?;
            println!("name_threshold set to {}", value);
        }
        _ => {}
    }
    Ok(())
}
