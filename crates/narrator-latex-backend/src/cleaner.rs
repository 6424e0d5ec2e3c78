// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Clean-up of translated statements before rendering.

use crate::options::LatexOptions;
use anyhow::{Context, Result};
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static INNERMOST_PARENS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(([^()]*?)\)").unwrap());
static REPEATED_BECAUSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(because\s+)+").unwrap());
static AND_AFTER_BECAUSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bbecause\s+and\b").unwrap());
static SPACE_BEFORE_PUNCTUATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+([,.])").unwrap());

#[derive(Debug, Clone)]
pub struct OutputCleaner {
    equation_symbols: Option<Regex>,
}

impl OutputCleaner {
    pub fn new(options: &LatexOptions) -> Result<Self> {
        let equation_symbols = if options.equation_symbols.is_empty() {
            None
        } else {
            let pattern = options
                .equation_symbols
                .iter()
                .map(|symbol| regex::escape(symbol))
                .join("|");
            Some(
                Regex::new(&pattern)
                    .with_context(|| format!("Invalid equation symbols `{pattern}`"))?,
            )
        };
        Ok(Self { equation_symbols })
    }

    fn is_equation(&self, text: &str) -> bool {
        self.equation_symbols
            .as_ref()
            .is_some_and(|symbols| symbols.is_match(text))
    }

    pub fn clean(&self, statement: &str) -> String {
        let unwrapped = INNERMOST_PARENS.replace_all(statement, |caps: &Captures| {
            if self.is_equation(&caps[1]) {
                caps[0].to_string()
            } else {
                caps[1].to_string()
            }
        });
        let cleaned = REPEATED_BECAUSE.replace_all(&unwrapped, "because ");
        let cleaned = AND_AFTER_BECAUSE.replace_all(&cleaned, "because");
        SPACE_BEFORE_PUNCTUATION
            .replace_all(&cleaned, "${1}")
            .into_owned()
    }

    pub fn clean_all<S: AsRef<str>>(&self, statements: &[S]) -> Vec<String> {
        statements
            .iter()
            .map(|statement| self.clean(statement.as_ref()))
            .collect()
    }
}
