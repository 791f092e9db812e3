// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::lexer::{Operator, Paren, Token};
use crate::error::{QueryError, QueryResult};

/// One postfix instruction: a term to evaluate or an operator to apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Postfix {
    Term(String),
    Op(Operator),
}

enum Stacked {
    Op(Operator),
    Open,
}

/// Shunting-yard conversion from infix tokens to postfix order.
pub fn to_postfix(tokens: Vec<Token>) -> QueryResult<Vec<Postfix>> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut stack: Vec<Stacked> = Vec::new();

    for tok in tokens {
        match tok {
            Token::Term(t) => out.push(Postfix::Term(t)),
            Token::Paren(Paren::Open) => stack.push(Stacked::Open),
            Token::Paren(Paren::Close) => loop {
                match stack.pop() {
                    Some(Stacked::Op(op)) => out.push(Postfix::Op(op)),
                    Some(Stacked::Open) => break,
                    None => return Err(QueryError::MismatchedParentheses),
                }
            },
            Token::Operator(op) => {
                while let Some(Stacked::Op(top)) = stack.last() {
                    let pops = if op.is_right_assoc() {
                        op.precedence() < top.precedence()
                    } else {
                        op.precedence() <= top.precedence()
                    };
                    if !pops {
                        break;
                    }
                    out.push(Postfix::Op(*top));
                    stack.pop();
                }
                stack.push(Stacked::Op(op));
            }
        }
    }

    while let Some(s) = stack.pop() {
        match s {
            Stacked::Op(op) => out.push(Postfix::Op(op)),
            Stacked::Open => return Err(QueryError::MismatchedParentheses),
        }
    }
    Ok(out)
}
