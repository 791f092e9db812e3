// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    And,
    Or,
    Not,
}

impl Operator {
    pub fn precedence(self) -> u8 {
        match self {
            Operator::Not => 3,
            Operator::And => 2,
            Operator::Or => 1,
        }
    }

    pub fn is_right_assoc(self) -> bool {
        matches!(self, Operator::Not)
    }

    fn from_word(word: &str) -> Option<Self> {
        if word.eq_ignore_ascii_case("and") {
            Some(Operator::And)
        } else if word.eq_ignore_ascii_case("or") {
            Some(Operator::Or)
        } else if word.eq_ignore_ascii_case("not") {
            Some(Operator::Not)
        } else {
            None
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operator::And => "AND",
            Operator::Or => "OR",
            Operator::Not => "NOT",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paren {
    Open,
    Close,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Operator(Operator),
    Paren(Paren),
    Term(String),
}

/// Splits a query into operators, parentheses and terms.
///
/// Whitespace separates words; `(` and `)` always stand alone even when glued
/// to a word. A word is an operator only when the whole word is `AND`, `OR`
/// or `NOT` in any case, so `android` stays a term.
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut word = String::new();

    for ch in input.chars() {
        match ch {
            '(' | ')' => {
                flush_word(&mut word, &mut tokens);
                tokens.push(Token::Paren(if ch == '(' { Paren::Open } else { Paren::Close }));
            }
            c if c.is_whitespace() => flush_word(&mut word, &mut tokens),
            c => word.push(c),
        }
    }
    flush_word(&mut word, &mut tokens);
    tokens
}

fn flush_word(word: &mut String, tokens: &mut Vec<Token>) {
    if word.is_empty() {
        return;
    }
    let w = std::mem::take(word);
    match Operator::from_word(&w) {
        Some(op) => tokens.push(Token::Operator(op)),
        None => tokens.push(Token::Term(w)),
    }
}
