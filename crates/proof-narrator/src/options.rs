// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

use log::LevelFilter;
use serde::{Deserialize, Serialize};

/// Options for the translation core. Most of those options are configured via a toml
/// source; some over the command line flags.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct NarratorOptions {
    /// Verbosity level for logging.
    pub verbosity_level: LevelFilter,
    /// Fail on an opening delimiter without a matching close. When unset the
    /// tokenizer consumes to the end of the line instead.
    pub strict_brackets: bool,
    /// Maximum bracket nesting followed by the tokenizer.
    pub max_nesting_depth: usize,
    /// Translate statements of a batch on separate blocking tasks.
    pub parallel: bool,
    /// Lines starting with one of these words are dropped before translation.
    pub removed_keywords: Vec<String>,
    /// Words that open a new proof statement.
    pub statement_keywords: Vec<String>,
    /// Delimiter pairs whose interior is translated as a nested sub-statement.
    pub delimiters: Vec<(char, char)>,
}

impl Default for NarratorOptions {
    fn default() -> Self {
        Self {
            verbosity_level: LevelFilter::Info,
            strict_brackets: true,
            max_nesting_depth: 64,
            parallel: false,
            removed_keywords: ["import", "open", "namespace", "end", "section"]
                .into_iter()
                .map(String::from)
                .collect(),
            statement_keywords: ["theorem", "lemma", "definition"]
                .into_iter()
                .map(String::from)
                .collect(),
            delimiters: vec![('(', ')'), ('{', '}')],
        }
    }
}
