// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Named statement operators
//!
//! Back-references of the form `{s2, negate_inequality}` pass the referenced
//! statement through an operator looked up by name in this table. Operators are
//! pure and total on any input string.

use crate::error::{NarrationError, NarrationResult};
use std::collections::BTreeMap;
use std::sync::Arc;

pub type Operator = Arc<dyn Fn(&str) -> String + Send + Sync>;

#[derive(Clone)]
pub struct OperatorLibrary {
    operators: BTreeMap<String, Operator>,
}

impl OperatorLibrary {
    /// A library with no operators registered.
    pub fn empty() -> Self {
        Self {
            operators: BTreeMap::new(),
        }
    }

    /// The builtin operators: `negate_inequality` and `find_set`.
    pub fn with_builtins() -> Self {
        let mut library = Self::empty();
        library.register("negate_inequality", negate_inequality);
        library.register("find_set", find_set);
        library
    }

    pub fn register<F>(&mut self, name: &str, operator: F)
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.operators.insert(name.to_string(), Arc::new(operator));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.operators.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.operators.keys().map(String::as_str)
    }

    pub fn apply(&self, name: &str, statement: &str) -> NarrationResult<String> {
        let operator = self
            .operators
            .get(name)
            .ok_or_else(|| NarrationError::UnknownOperator(name.to_string()))?;
        Ok(operator(statement))
    }
}

impl Default for OperatorLibrary {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl std::fmt::Debug for OperatorLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.operators.keys()).finish()
    }
}

/// Replace every occurrence of each `from` symbol by its `to` symbol in one pass,
/// so a swapped symbol is never swapped back.
fn swap_symbols(statement: &str, swaps: &[(char, char)]) -> String {
    statement
        .chars()
        .map(|c| {
            swaps
                .iter()
                .find(|(from, _)| *from == c)
                .map_or(c, |(_, to)| *to)
        })
        .collect()
}

/// Negates an inequality.
pub fn negate_inequality(statement: &str) -> String {
    swap_symbols(statement, &[('≤', '>'), ('>', '≤'), ('≥', '<'), ('<', '≥')])
}

/// The first balanced `{...}` span of the statement, or the empty string.
pub fn find_set(statement: &str) -> String {
    let mut depth = 0usize;
    let mut start = None;
    for (i, c) in statement.char_indices() {
        match c {
            '{' => {
                if depth == 0 {
                    start = Some(i);
                }
                depth += 1;
            }
            '}' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    if let Some(start) = start {
                        return statement[start..=i].to_string();
                    }
                }
            }
            _ => {}
        }
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negate_inequality_swaps_once() {
        assert_eq!(negate_inequality("n ≤ 5"), "n > 5");
        assert_eq!(negate_inequality("a < b ∧ c ≥ d"), "a ≥ b ∧ c < d");
        assert_eq!(negate_inequality("x > y"), "x ≤ y");
    }

    #[test]
    fn test_find_set_returns_first_balanced_span() {
        assert_eq!(find_set("x ∈ {y | {z} ⊆ y} and {w}"), "{y | {z} ⊆ y}");
        assert_eq!(find_set("no set here"), "");
        assert_eq!(find_set("} stray {a}"), "{a}");
    }

    #[test]
    fn test_unknown_operator_is_reported() {
        let library = OperatorLibrary::with_builtins();
        assert_eq!(
            library.apply("flip", "a"),
            Err(NarrationError::UnknownOperator("flip".to_string()))
        );
    }

    #[test]
    fn test_custom_operator() {
        let mut library = OperatorLibrary::empty();
        library.register("shout", |s| s.to_uppercase());
        assert!(library.contains("shout"));
        assert!(!library.contains("find_set"));
        assert_eq!(library.apply("shout", "qed").unwrap(), "QED");
    }
}
