// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{params, Connection, OptionalExtension};
use std::fs;
use std::path::PathBuf;
use tracing::info;

use crate::categorize::{CategorizeOptions, DEFAULT_NAME_THRESHOLD};
use crate::models::{Dictionary, Transaction};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.spendlens", "Spendlens", "spendlens"));

pub const DB_ENV: &str = "SPENDLENS_DB";

const KEY_TRANSACTIONS: &str = "transactions";
const KEY_DICTIONARY: &str = "dictionary";

pub fn db_path() -> Result<PathBuf> {
    if let Some(p) = std::env::var_os(DB_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(p));
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("spendlens.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&conn)?;
    Ok(conn)
}

/// Creates the tables and seeds the default dictionary on first use.
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    -- JSON documents keyed by name: the ledger and the keyword dictionary
    CREATE TABLE IF NOT EXISTS blobs(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL,
        updated_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    "#,
    )?;
    if get_blob(conn, KEY_DICTIONARY)?.is_none() {
        save_dictionary(conn, &Dictionary::with_defaults())?;
        info!("seeded default dictionary");
    }
    Ok(())
}

fn get_blob(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM blobs WHERE key=?1", params![key], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(v)
}

fn put_blob(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO blobs(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value, updated_at=datetime('now')",
        params![key, value],
    )?;
    Ok(())
}

pub fn load_transactions(conn: &Connection) -> Result<Vec<Transaction>> {
    match get_blob(conn, KEY_TRANSACTIONS)? {
        Some(raw) => serde_json::from_str(&raw).context("Stored transactions are not valid JSON"),
        None => Ok(Vec::new()),
    }
}

pub fn save_transactions(conn: &Connection, txns: &[Transaction]) -> Result<()> {
    put_blob(conn, KEY_TRANSACTIONS, &serde_json::to_string(txns)?)?;
    info!(count = txns.len(), "saved transactions");
    Ok(())
}

pub fn load_dictionary(conn: &Connection) -> Result<Dictionary> {
    match get_blob(conn, KEY_DICTIONARY)? {
        Some(raw) => serde_json::from_str(&raw).context("Stored dictionary is not valid JSON"),
        None => Ok(Dictionary::with_defaults()),
    }
}

pub fn save_dictionary(conn: &Connection, dict: &Dictionary) -> Result<()> {
    put_blob(conn, KEY_DICTIONARY, &serde_json::to_string(dict)?)?;
    info!(categories = dict.len(), "saved dictionary");
    Ok(())
}

pub fn get_name_threshold(conn: &Connection) -> Result<f64> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key='name_threshold'",
            [],
            |r| r.get(0),
        )
        .optional()?;
    match v {
        Some(s) => s
            .parse::<f64>()
            .with_context(|| format!("Invalid name_threshold setting '{}'", s)),
        None => Ok(DEFAULT_NAME_THRESHOLD),
    }
}

pub fn set_name_threshold(conn: &Connection, value: f64) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES('name_threshold', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![value.to_string()],
    )?;
    Ok(())
}

pub fn categorize_options(conn: &Connection) -> Result<CategorizeOptions> {
    Ok(CategorizeOptions {
        name_threshold: get_name_threshold(conn)?,
    })
}
