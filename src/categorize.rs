// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use tracing::debug;

use crate::models::{Dictionary, Transaction};
use crate::similarity::compare_two_strings;

pub const UNCATEGORIZED: &str = "Uncategorized";
pub const DEFAULT_NAME_THRESHOLD: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategorizeOptions {
    /// Minimum similarity between a description and a category name for the
    /// name alone to decide the category.
    pub name_threshold: f64,
}

impl Default for CategorizeOptions {
    fn default() -> Self {
        Self {
            name_threshold: DEFAULT_NAME_THRESHOLD,
        }
    }
}

/// Resolves descriptions to category names using a keyword dictionary.
///
/// Resolution goes through these steps, stopping at the first that yields a
/// single answer:
///
/// 1. the category with strictly the most keyword hits;
/// 2. among categories tied on hits, the only one whose name appears in the description;
/// 3. among those tied categories, the best name similarity above the threshold;
/// 4. when nothing hit at all, the best name similarity over every category;
/// 5. the first category (in dictionary order) with any hit, else [`UNCATEGORIZED`].
pub struct Categorizer<'d> {
    dictionary: &'d Dictionary,
    options: CategorizeOptions,
}

impl<'d> Categorizer<'d> {
    pub fn new(dictionary: &'d Dictionary, options: CategorizeOptions) -> Self {
        Self {
            dictionary,
            options,
        }
    }

    pub fn categorize(&self, description: &str) -> &'d str {
        let lc = description.to_lowercase();

        let hits: Vec<(&'d str, usize)> = self
            .dictionary
            .iter()
            .map(|e| {
                let n = e.keywords.iter().filter(|k| keyword_hits(&lc, k)).count();
                (e.name.as_str(), n)
            })
            .filter(|(_, n)| *n > 0)
            .collect();

        if let Some(max) = hits.iter().map(|(_, n)| *n).max() {
            let top: Vec<&'d str> = hits
                .iter()
                .filter(|(_, n)| *n == max)
                .map(|(name, _)| *name)
                .collect();
            if let [only] = top.as_slice() {
                debug!(category = *only, hits = max, "resolved by keyword count");
                return *only;
            }

            let mentioned: Vec<&'d str> = top
                .iter()
                .copied()
                .filter(|name| lc.contains(&name.to_lowercase()))
                .collect();
            if let [only] = mentioned.as_slice() {
                debug!(category = *only, "resolved tie by name mention");
                return *only;
            }

            if let Some(best) = self.best_name_match(&lc, top.iter().copied()) {
                debug!(category = best, "resolved tie by name similarity");
                return best;
            }
        } else if let Some(best) = self.best_name_match(&lc, self.dictionary.names()) {
            debug!(category = best, "resolved by name similarity");
            return best;
        }

        let fallback = self
            .dictionary
            .iter()
            .find(|e| e.keywords.iter().any(|k| keyword_hits(&lc, k)))
            .map(|e| e.name.as_str())
            .unwrap_or(UNCATEGORIZED);
        debug!(category = fallback, "resolved by fallback");
        fallback
    }

    /// Highest-scoring name at or above the threshold; earlier names win exact ties.
    fn best_name_match<I>(&self, lc: &str, names: I) -> Option<&'d str>
    where
        I: Iterator<Item = &'d str>,
    {
        let mut best: Option<(&'d str, f64)> = None;
        for name in names {
            let score = compare_two_strings(lc, &name.to_lowercase());
            if score < self.options.name_threshold {
                continue;
            }
            if best.is_none_or(|(_, s)| score > s) {
                best = Some((name, score));
            }
        }
        best.map(|(name, _)| name)
    }

    /// Returns a copy of `txn` with its category resolved from the current description.
    pub fn apply(&self, txn: &Transaction) -> Transaction {
        Transaction {
            category: Some(self.categorize(&txn.description).to_string()),
            ..txn.clone()
        }
    }
}

// Keywords are matched as typed, so a leading space can anchor a short keyword.
fn keyword_hits(lc_description: &str, keyword: &str) -> bool {
    !keyword.trim().is_empty() && lc_description.contains(&keyword.to_lowercase())
}

pub fn categorize_transactions(
    transactions: &[Transaction],
    dictionary: &Dictionary,
    options: CategorizeOptions,
) -> Vec<Transaction> {
    let c = Categorizer::new(dictionary, options);
    transactions.iter().map(|t| c.apply(t)).collect()
}
