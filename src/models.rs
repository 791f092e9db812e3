// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::utils::{coerce_amount, parse_local_date};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub date: String, // YYYY-MM-DD
    pub description: String,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Transaction {
    pub fn category_name(&self) -> &str {
        self.category.as_deref().unwrap_or(crate::categorize::UNCATEGORIZED)
    }
}

/// A row as it arrives from ingestion, before an id or category is assigned.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawRecord {
    pub date: String,
    pub description: String,
    #[serde(default)]
    pub amount: RawAmount,
}

impl RawRecord {
    /// Coerces the amount and rewrites recognizable dates as `YYYY-MM-DD`.
    pub fn into_transaction(self, id: String) -> Transaction {
        let date = self.date.trim();
        Transaction {
            id,
            date: parse_local_date(date)
                .map(|d| d.to_string())
                .unwrap_or_else(|| date.to_string()),
            description: self.description.trim().to_string(),
            amount: self.amount.coerce(),
            category: None,
        }
    }
}

/// Amount as supplied by a collaborator: a number, a string, or nothing at all.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Number(f64),
    Text(String),
    #[default]
    Missing,
}

impl RawAmount {
    pub fn coerce(&self) -> f64 {
        match self {
            RawAmount::Number(n) if n.is_finite() => *n,
            RawAmount::Number(_) | RawAmount::Missing => 0.0,
            RawAmount::Text(s) => coerce_amount(s),
        }
    }
}

fn deserialize_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<RawAmount>::deserialize(deserializer).map(|raw| raw.unwrap_or_default().coerce())
}

/// Ordered category → keywords table. Order decides ties during categorization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    entries: Vec<CategoryEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryEntry {
    pub name: String,
    pub keywords: Vec<String>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        let mut d = Self::new();
        d.insert("Gas", ["shell", "exxon", "chevron", "bp"]);
        d.insert("Coffee", ["starbucks", "dunkin", "peets"]);
        d.insert("Groceries", ["whole foods", "trader joe", "aldi", "kroger"]);
        d
    }

    /// Inserts or replaces a category. A replaced category keeps its original position.
    pub fn insert<N, I, K>(&mut self, name: N, keywords: I)
    where
        N: Into<String>,
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        let name = name.into();
        let keywords: Vec<String> = keywords.into_iter().map(Into::into).collect();
        match self.position(&name) {
            Some(i) => self.entries[i].keywords = keywords,
            None => self.entries.push(CategoryEntry { name, keywords }),
        }
    }

    /// Appends a keyword, creating the category at the end when it does not exist yet.
    /// Returns false when the keyword was already listed.
    pub fn add_keyword(&mut self, name: &str, keyword: &str) -> bool {
        let keyword = keyword.trim();
        let idx = match self.position(name) {
            Some(i) => i,
            None => {
                self.entries.push(CategoryEntry {
                    name: name.to_string(),
                    keywords: Vec::new(),
                });
                self.entries.len() - 1
            }
        };
        if keyword.is_empty() {
            return false;
        }
        let kws = &mut self.entries[idx].keywords;
        if kws.iter().any(|k| k.eq_ignore_ascii_case(keyword)) {
            return false;
        }
        kws.push(keyword.to_string());
        true
    }

    pub fn remove(&mut self, name: &str) -> Option<CategoryEntry> {
        self.position(name).map(|i| self.entries.remove(i))
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.position(name).map(|i| self.entries[i].keywords.as_slice())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryEntry> {
        self.entries.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name == name)
    }
}

impl Serialize for Dictionary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for e in &self.entries {
            map.serialize_entry(&e.name, &e.keywords)?;
        }
        map.end()
    }
}

struct DictionaryVisitor;

impl<'de> Visitor<'de> for DictionaryVisitor {
    type Value = Dictionary;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object mapping category names to keyword arrays")
    }

    // Reads entries in document order; serde_json::Map would sort them.
    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Dictionary, A::Error> {
        let mut dict = Dictionary::new();
        while let Some((name, keywords)) = access.next_entry::<String, Vec<String>>()? {
            if dict.contains(&name) {
                return Err(de::Error::custom(format!("duplicate category '{}'", name)));
            }
            dict.entries.push(CategoryEntry { name, keywords });
        }
        Ok(dict)
    }
}

impl<'de> Deserialize<'de> for Dictionary {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(DictionaryVisitor)
    }
}
