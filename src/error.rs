// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Failures raised while compiling or evaluating a search query.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Mismatched parentheses")]
    MismatchedParentheses,

    #[error("Invalid syntax: {0}")]
    InvalidSyntax(String),
}

impl QueryError {
    pub(crate) fn syntax(detail: impl Into<String>) -> Self {
        QueryError::InvalidSyntax(detail.into())
    }
}

pub type QueryResult<T> = std::result::Result<T, QueryError>;
