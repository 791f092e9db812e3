// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use regex::Regex;

use crate::error::{QueryError, QueryResult};
use crate::models::Transaction;
use crate::utils::parse_local_date;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    Le,
    Ge,
    Ne,
    Eq,
    Lt,
    Gt,
    Prefix,
    Suffix,
    Contains,
}

// Two-character comparators first so `<=` is not read as `<` followed by `=5`.
const COMPARATORS: &[(&str, Comparator)] = &[
    ("<=", Comparator::Le),
    (">=", Comparator::Ge),
    ("!=", Comparator::Ne),
    ("=", Comparator::Eq),
    ("<", Comparator::Lt),
    (">", Comparator::Gt),
    ("^=", Comparator::Prefix),
    ("$=", Comparator::Suffix),
    (":", Comparator::Contains),
];

impl Comparator {
    fn ordering<T: PartialOrd>(self, lhs: T, rhs: T) -> Option<bool> {
        match self {
            Comparator::Lt => Some(lhs < rhs),
            Comparator::Le => Some(lhs <= rhs),
            Comparator::Gt => Some(lhs > rhs),
            Comparator::Ge => Some(lhs >= rhs),
            Comparator::Eq => Some(lhs == rhs),
            Comparator::Ne => Some(lhs != rhs),
            Comparator::Prefix | Comparator::Suffix | Comparator::Contains => None,
        }
    }

    fn is_relational(self) -> bool {
        !matches!(
            self,
            Comparator::Prefix | Comparator::Suffix | Comparator::Contains
        )
    }

    fn symbol(self) -> &'static str {
        COMPARATORS
            .iter()
            .find(|(_, c)| *c == self)
            .map(|(s, _)| *s)
            .unwrap_or("?")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Description,
    Category,
}

/// A compiled term, ready to be tested against any number of transactions.
#[derive(Debug, Clone)]
pub enum Predicate {
    Amount(Comparator, f64),
    Date(Comparator, NaiveDate),
    Text {
        field: TextField,
        cmp: Comparator,
        needle: String,
    },
    Word(Regex),
}

/// Splits `field<op>value` into its parts. `None` means the term is a plain word.
fn split_comparison(term: &str) -> Option<(&str, Comparator, &str)> {
    let field_len = term
        .char_indices()
        .find(|(_, c)| !c.is_ascii_alphabetic())
        .map(|(i, _)| i)?;
    if field_len == 0 {
        return None;
    }
    let (field, rest) = term.split_at(field_len);
    let (sym, cmp) = COMPARATORS.iter().find(|(sym, _)| rest.starts_with(sym))?;
    let value = rest[sym.len()..].trim();
    if value.is_empty() {
        return None;
    }
    Some((field, *cmp, value))
}

impl Predicate {
    pub fn compile(term: &str) -> QueryResult<Self> {
        let Some((field, cmp, value)) = split_comparison(term) else {
            return Self::word(term);
        };
        match field {
            "amount" => {
                if !cmp.is_relational() {
                    return Err(invalid_op(field, cmp));
                }
                let n = value
                    .parse::<f64>()
                    .ok()
                    .filter(|n| n.is_finite())
                    .ok_or_else(|| QueryError::syntax(format!("'{}' is not a number", value)))?;
                Ok(Predicate::Amount(cmp, n))
            }
            "date" => {
                if !cmp.is_relational() {
                    return Err(invalid_op(field, cmp));
                }
                let d = parse_local_date(value)
                    .ok_or_else(|| QueryError::syntax(format!("'{}' is not a date", value)))?;
                Ok(Predicate::Date(cmp, d))
            }
            "description" | "category" => {
                if matches!(
                    cmp,
                    Comparator::Lt | Comparator::Le | Comparator::Gt | Comparator::Ge
                ) {
                    return Err(invalid_op(field, cmp));
                }
                let field = if field == "description" {
                    TextField::Description
                } else {
                    TextField::Category
                };
                Ok(Predicate::Text {
                    field,
                    cmp,
                    needle: value.to_lowercase(),
                })
            }
            other => Err(QueryError::syntax(format!("unknown field '{}'", other))),
        }
    }

    fn word(term: &str) -> QueryResult<Self> {
        let pattern = format!(r"\b{}\b", regex::escape(&term.to_lowercase()));
        Regex::new(&pattern)
            .map(Predicate::Word)
            .map_err(|e| QueryError::syntax(format!("bad term '{}': {}", term, e)))
    }

    pub fn matches(&self, txn: &Transaction) -> QueryResult<bool> {
        match self {
            Predicate::Amount(cmp, n) => Ok(cmp.ordering(txn.amount, *n).unwrap_or(false)),
            Predicate::Date(cmp, d) => {
                let own = parse_local_date(&txn.date).ok_or_else(|| {
                    QueryError::syntax(format!(
                        "transaction {} has unreadable date '{}'",
                        txn.id, txn.date
                    ))
                })?;
                Ok(cmp.ordering(own, *d).unwrap_or(false))
            }
            Predicate::Text { field, cmp, needle } => {
                let hay = match field {
                    TextField::Description => txn.description.to_lowercase(),
                    TextField::Category => txn.category.as_deref().unwrap_or("").to_lowercase(),
                };
                Ok(match cmp {
                    Comparator::Contains => hay.contains(needle.as_str()),
                    Comparator::Eq => hay == *needle,
                    Comparator::Ne => hay != *needle,
                    Comparator::Prefix => hay.starts_with(needle.as_str()),
                    Comparator::Suffix => hay.ends_with(needle.as_str()),
                    Comparator::Lt | Comparator::Le | Comparator::Gt | Comparator::Ge => false,
                })
            }
            Predicate::Word(re) => Ok(re.is_match(&txn.description.to_lowercase())),
        }
    }
}

fn invalid_op(field: &str, cmp: Comparator) -> QueryError {
    QueryError::syntax(format!(
        "operator '{}' cannot be used with {}",
        cmp.symbol(),
        field
    ))
}
