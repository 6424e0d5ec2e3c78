// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Source clean-up before translation: comments and boilerplate lines are
//! removed, a few notations are normalised, and the file is cut into proof
//! statements.

use crate::options::NarratorOptions;
use anyhow::{Context, Result};
use itertools::Itertools;
use log::info;
use once_cell::sync::Lazy;
use regex::Regex;

static BLOCK_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)/-.*?-/").unwrap());
static LINE_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"--.*").unwrap());
static TRAILING_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+(\r?\n)").unwrap());
static BLANK_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());
static SUCC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(\w+)\.succ\b").unwrap());

/// `^\s*(k1|k2|...)\b`, or `None` for an empty keyword list.
fn leading_keyword_pattern(keywords: &[String], suffix: &str) -> Result<Option<Regex>> {
    if keywords.is_empty() {
        return Ok(None);
    }
    let alternatives = keywords.iter().map(|keyword| regex::escape(keyword)).join("|");
    let pattern = format!(r"(?m)^\s*({alternatives})\b{suffix}");
    Regex::new(&pattern)
        .map(Some)
        .with_context(|| format!("Invalid keyword pattern `{pattern}`"))
}

#[derive(Debug, Clone)]
pub struct Preprocessor {
    removed_lines: Option<Regex>,
    statement_start: Option<Regex>,
}

impl Preprocessor {
    pub fn new(options: &NarratorOptions) -> Result<Self> {
        Ok(Self {
            removed_lines: leading_keyword_pattern(&options.removed_keywords, ".*")?,
            statement_start: leading_keyword_pattern(&options.statement_keywords, "")?,
        })
    }

    pub fn strip_comments(&self, source: &str) -> String {
        let source = BLOCK_COMMENT.replace_all(source, "");
        let source = LINE_COMMENT.replace_all(&source, "");
        let source = TRAILING_WHITESPACE.replace_all(&source, "${1}");
        BLANK_RUN.replace_all(&source, "\n\n").into_owned()
    }

    pub fn remove_keyword_lines(&self, source: &str) -> String {
        match &self.removed_lines {
            Some(pattern) => {
                let source = pattern.replace_all(source, "");
                BLANK_RUN.replace_all(&source, "\n\n").into_owned()
            }
            None => source.to_string(),
        }
    }

    /// `(h x).1` and `(h x).2` project a conjunction or iff; the direction is dropped.
    pub fn remove_direction_markers(&self, source: &str) -> String {
        source.replace(").1", ")").replace(").2", ")")
    }

    pub fn expand_succ(&self, source: &str) -> String {
        SUCC.replace_all(source, "(${1}+1)").into_owned()
    }

    /// Cut cleaned source into statements, each starting at a line that opens
    /// with a statement keyword. Text before the first such line is discarded.
    pub fn extract_statements(&self, source: &str) -> Vec<String> {
        let Some(statement_start) = &self.statement_start else {
            return vec![];
        };

        let mut statements = vec![];
        let mut current: Option<Vec<&str>> = None;
        for line in source.lines() {
            if statement_start.is_match(line) {
                if let Some(lines) = current.take() {
                    statements.push(lines);
                }
                current = Some(vec![]);
            }
            if let Some(lines) = current.as_mut() {
                lines.push(line);
            }
        }
        statements.extend(current);

        statements
            .into_iter()
            .map(|lines| lines.join("\n").trim_end().to_string())
            .collect()
    }

    /// All clean-up passes followed by statement extraction.
    pub fn prepare(&self, source: &str) -> Vec<String> {
        let source = self.strip_comments(source);
        let source = self.remove_keyword_lines(&source);
        let source = self.remove_direction_markers(&source);
        let source = self.expand_succ(&source);
        let statements = self.extract_statements(&source);
        info!("extracted {} statement(s)", statements.len());
        statements
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preprocessor() -> Preprocessor {
        Preprocessor::new(&NarratorOptions::default()).unwrap()
    }

    #[test]
    fn test_strip_comments() {
        let source = "/- header\n   spans lines -/\ntheorem t : p := by -- note\n  simp   \n\n\n\nlemma l : q";
        assert_eq!(
            preprocessor().strip_comments(source),
            "\ntheorem t : p := by\n  simp\n\nlemma l : q"
        );
    }

    #[test]
    fn test_remove_keyword_lines() {
        let source = "import Mathlib\nopen Nat\n\ntheorem t : p := by\n  simp\nend Foo\n";
        assert_eq!(
            preprocessor().remove_keyword_lines(source),
            "\n\ntheorem t : p := by\n  simp\n\n"
        );
        assert_eq!(
            preprocessor().remove_keyword_lines("opened := 1"),
            "opened := 1"
        );
    }

    #[test]
    fn test_notation_rewrites() {
        let preprocessor = preprocessor();
        assert_eq!(
            preprocessor.remove_direction_markers("exact (h n).1 (g n).2"),
            "exact (h n) (g n)"
        );
        assert_eq!(preprocessor.expand_succ("0 < n.succ"), "0 < (n+1)");
        assert_eq!(preprocessor.expand_succ("Nat.succ_pos n"), "Nat.succ_pos n");
    }

    #[test]
    fn test_extract_statements() {
        let source = "variable (x : Nat)\ntheorem a : p := by\n  simp\n\nlemma b : q := by\n  exact h\ndefinition c := 1\n";
        assert_eq!(
            preprocessor().extract_statements(source),
            vec![
                "theorem a : p := by\n  simp",
                "lemma b : q := by\n  exact h",
                "definition c := 1",
            ]
        );
    }

    #[test]
    fn test_prepare() {
        let source = "import Mathlib\n\n/- doc -/\ntheorem t (n : Nat) : 0 < n.succ := by -- positivity\n  exact (Nat.succ_pos n).1\n";
        assert_eq!(
            preprocessor().prepare(source),
            vec!["theorem t (n : Nat) : 0 < (n+1) := by\n  exact (Nat.succ_pos n)"]
        );
    }

    #[test]
    fn test_empty_keyword_lists() {
        let options = NarratorOptions {
            removed_keywords: vec![],
            statement_keywords: vec![],
            ..NarratorOptions::default()
        };
        let preprocessor = Preprocessor::new(&options).unwrap();
        assert_eq!(preprocessor.remove_keyword_lines("import A"), "import A");
        assert!(preprocessor.extract_statements("theorem t : p").is_empty());
    }
}
