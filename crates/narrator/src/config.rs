// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

use anyhow::{Context, Result};
use narrator_latex_backend::LatexOptions;
use proof_narrator::NarratorOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration file layout: a `[narrator]` table for translation and a
/// `[latex]` table for clean-up and rendering. Missing tables and keys take
/// their defaults.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct NarratorConfig {
    pub narrator: NarratorOptions,
    pub latex: LatexOptions,
}

impl NarratorConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).context("Malformed configuration")
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration {}", path.display()))?;
        Self::from_toml_str(&source)
            .with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to print configuration")
    }
}
