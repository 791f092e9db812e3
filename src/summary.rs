// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::Transaction;

/// Running totals per category name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CategorySummary {
    totals: BTreeMap<String, f64>,
}

impl CategorySummary {
    pub fn get(&self, category: &str) -> Option<f64> {
        self.totals.get(category).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.totals.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    pub fn grand_total(&self) -> f64 {
        self.totals.values().sum()
    }

    pub fn into_inner(self) -> BTreeMap<String, f64> {
        self.totals
    }
}

/// Sums amounts per category. Transactions without a category count as uncategorized.
pub fn summarize_by_category<'a, I>(transactions: I) -> CategorySummary
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut totals: BTreeMap<String, f64> = BTreeMap::new();
    for t in transactions {
        *totals.entry(t.category_name().to_string()).or_insert(0.0) += t.amount;
    }
    CategorySummary { totals }
}
