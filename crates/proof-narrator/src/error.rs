// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Errors raised while translating a single proof statement.
//!
//! Every variant aborts the statement being translated; sibling statements in
//! the same batch are unaffected.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NarrationError {
    #[error("unterminated `{open}` at column {column} in `{line}`")]
    MalformedBracket {
        open: char,
        column: usize,
        line: String,
    },
    #[error("unknown name `{0}`")]
    UnknownName(String),
    #[error("pop from empty scope stack")]
    EmptyStack,
    #[error("cannot resolve s{requested}: scope stack has only {size} entries")]
    OutOfRange { requested: usize, size: usize },
    #[error("operator `{0}` is not registered")]
    UnknownOperator(String),
    #[error("`{theorem}` provides {witnesses} witnesses but {names} names were destructured")]
    ArityMismatch {
        theorem: String,
        witnesses: usize,
        names: usize,
    },
    #[error("malformed `{tag}` declaration: {reason}")]
    MalformedDeclaration { tag: String, reason: String },
    #[error("malformed assumption `{0}`, expected `(var : type)`")]
    MalformedAssumption(String),
    #[error("bracket nesting exceeds the limit of {limit}")]
    NestingTooDeep { limit: usize },
}

pub type NarrationResult<T> = Result<T, NarrationError>;
