// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod categorize;
pub mod cli;
pub mod commands;
pub mod db;
pub mod error;
pub mod models;
pub mod query;
pub mod similarity;
pub mod summary;
pub mod utils;

pub use categorize::{categorize_transactions, CategorizeOptions, Categorizer, UNCATEGORIZED};
pub use error::QueryError;
pub use models::{Dictionary, RawAmount, RawRecord, Transaction};
pub use query::{filter_transactions, Program};
pub use summary::{summarize_by_category, CategorySummary};
