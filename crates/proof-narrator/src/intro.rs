// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Renaming of universally quantified variables after `intro`.
//!
//! The dispatcher emits `intro n` lines verbatim. Once a statement is fully
//! translated, each such line names the variable of the most recent pending
//! `for every x` clause: `x` is renamed to `n` in the latest line stating that
//! clause and the `intro` line is dropped.

use crate::dispatch::text::substitute_words;
use crate::error::NarrationResult;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static FOR_EVERY: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bfor every (\w+)\b").unwrap());
static INTRO: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bintro (\w+)\b").unwrap());

fn states_for_every(line: &str, variable: &str) -> bool {
    FOR_EVERY
        .captures_iter(line)
        .any(|clause| &clause[1] == variable)
}

pub fn rename_intro_variables(statement: &str) -> String {
    let mut pending: Vec<String> = vec![];
    let mut kept: Vec<String> = vec![];

    for line in statement.lines() {
        pending.extend(
            FOR_EVERY
                .captures_iter(line)
                .map(|clause| clause[1].to_string()),
        );

        let introduced = INTRO.captures(line).and_then(|intro| intro.get(1));
        if let Some(name) = introduced {
            if let Some(variable) = pending.pop() {
                match kept
                    .iter_mut()
                    .rev()
                    .find(|earlier| states_for_every(earlier, &variable))
                {
                    Some(clause) => {
                        let renames = HashMap::from([(variable.as_str(), name.as_str())]);
                        *clause = substitute_words(clause, &renames);
                    }
                    None => debug!("no `for every {variable}` left to rename"),
                }
                continue;
            }
        }
        kept.push(line.to_string());
    }

    kept.join("\n")
}

/// Run [`rename_intro_variables`] over every successfully translated statement of a batch.
pub fn apply_intro_renames(batch: Vec<NarrationResult<String>>) -> Vec<NarrationResult<String>> {
    batch
        .into_iter()
        .map(|statement| statement.map(|text| rename_intro_variables(&text)))
        .collect()
}
