// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

/// Options for output clean-up and LaTeX rendering.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LatexOptions {
    /// A parenthesised span containing one of these symbols keeps its parentheses.
    pub equation_symbols: Vec<String>,
    /// Leading words of a translated line that open a theorem-like block. Each
    /// word is also the name of the LaTeX environment.
    pub block_keywords: Vec<String>,
    /// Wrap the blocks in a complete document with a preamble.
    pub standalone: bool,
}

impl Default for LatexOptions {
    fn default() -> Self {
        Self {
            equation_symbols: ["+", "-", "*", "/", "="]
                .into_iter()
                .map(String::from)
                .collect(),
            block_keywords: vec!["theorem".to_string(), "lemma".to_string()],
            standalone: false,
        }
    }
}
