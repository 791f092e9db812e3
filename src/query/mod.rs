// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Boolean search over transactions.
//!
//! A query such as `starbucks OR (amount>=20 AND NOT category=gas)` is split
//! into tokens, reordered into postfix with the shunting-yard algorithm, and
//! then run as a small stack machine once per transaction.
//!
//! Bare words match whole words of the description. `field<op>value` terms
//! compare a single field:
//!
//! | field         | operators                              |
//! |---------------|----------------------------------------|
//! | `amount`      | `=` `!=` `<` `<=` `>` `>=`             |
//! | `date`        | `=` `!=` `<` `<=` `>` `>=`             |
//! | `description` | `:` `=` `!=` `^=` `$=`                 |
//! | `category`    | `:` `=` `!=` `^=` `$=`                 |

pub mod lexer;
pub mod parser;
pub mod predicate;

pub use lexer::{tokenize, Operator, Paren, Token};
pub use parser::{to_postfix, Postfix};
pub use predicate::Predicate;

use crate::error::{QueryError, QueryResult};
use crate::models::Transaction;

#[derive(Debug, Clone)]
enum Instr {
    Push(Predicate),
    Apply(Operator),
}

/// A compiled query in postfix order.
#[derive(Debug, Clone)]
pub struct Program {
    instrs: Vec<Instr>,
}

impl Program {
    /// Compiles a non-empty query. Callers wanting the "empty means everything"
    /// behaviour should go through [`filter_transactions`].
    pub fn compile(query: &str) -> QueryResult<Self> {
        let postfix = to_postfix(tokenize(query))?;
        let instrs = postfix
            .into_iter()
            .map(|p| match p {
                Postfix::Term(t) => Predicate::compile(&t).map(Instr::Push),
                Postfix::Op(op) => Ok(Instr::Apply(op)),
            })
            .collect::<QueryResult<Vec<_>>>()?;
        let program = Program { instrs };
        program.check_arity()?;
        Ok(program)
    }

    // Dry run of the stack depth so a malformed program fails even on an empty ledger.
    fn check_arity(&self) -> QueryResult<()> {
        let mut depth = 0usize;
        for instr in &self.instrs {
            match instr {
                Instr::Push(_) => depth += 1,
                Instr::Apply(Operator::Not) => {
                    if depth < 1 {
                        return Err(QueryError::syntax("NOT needs an operand"));
                    }
                }
                Instr::Apply(op) => {
                    if depth < 2 {
                        return Err(QueryError::syntax(format!("{} needs two operands", op)));
                    }
                    depth -= 1;
                }
            }
        }
        if depth != 1 {
            return Err(QueryError::syntax(format!(
                "expected one expression, found {}",
                depth
            )));
        }
        Ok(())
    }

    /// Runs the program against one transaction.
    pub fn evaluate(&self, txn: &Transaction) -> QueryResult<bool> {
        let mut stack: Vec<bool> = Vec::with_capacity(self.instrs.len());
        for instr in &self.instrs {
            match instr {
                Instr::Push(pred) => stack.push(pred.matches(txn)?),
                Instr::Apply(Operator::Not) => {
                    let v = stack.pop().ok_or_else(|| QueryError::syntax("NOT needs an operand"))?;
                    stack.push(!v);
                }
                Instr::Apply(op) => {
                    let (Some(rhs), Some(lhs)) = (stack.pop(), stack.pop()) else {
                        return Err(QueryError::syntax(format!("{} needs two operands", op)));
                    };
                    stack.push(match op {
                        Operator::And => lhs && rhs,
                        _ => lhs || rhs,
                    });
                }
            }
        }
        match stack.as_slice() {
            [v] => Ok(*v),
            _ => Err(QueryError::syntax(format!(
                "expected one expression, found {}",
                stack.len()
            ))),
        }
    }
}

/// Filters `transactions` with `query`, keeping their order.
///
/// A blank query returns every transaction untouched and never fails.
pub fn filter_transactions<'a>(
    transactions: &'a [Transaction],
    query: &str,
) -> QueryResult<Vec<&'a Transaction>> {
    if query.trim().is_empty() {
        return Ok(transactions.iter().collect());
    }
    let program = Program::compile(query)?;
    let mut out = Vec::new();
    for txn in transactions {
        if program.evaluate(txn)? {
            out.push(txn);
        }
    }
    Ok(out)
}
