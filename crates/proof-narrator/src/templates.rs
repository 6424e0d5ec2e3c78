// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Template dictionary
//!
//! Maps a trigger token to a phrase with positional slots `{0}`, `{1}`, ...
//! and the number of following tokens it consumes.

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Template {
    pub expression: String,
    pub template: String,
    #[serde(default)]
    pub variables: usize,
}

impl Template {
    pub fn new(expression: &str, template: &str, variables: usize) -> Self {
        Self {
            expression: expression.to_string(),
            template: template.to_string(),
            variables,
        }
    }

    /// Fill the positional slots with `args`. Slots without an argument are left as is.
    pub fn render<S: AsRef<str>>(&self, args: &[S]) -> String {
        args.iter()
            .enumerate()
            .fold(self.template.clone(), |text, (i, arg)| {
                text.replace(&format!("{{{i}}}"), arg.as_ref())
            })
    }
}

#[derive(Deserialize)]
struct TemplateBody {
    template: String,
    #[serde(default)]
    variables: usize,
}

/// Accepted on-disk shapes: a list of templates, or a map keyed by expression.
#[derive(Deserialize)]
#[serde(untagged)]
enum TemplateFile {
    List(Vec<Template>),
    Map(BTreeMap<String, TemplateBody>),
}

#[derive(Debug, Clone, Default)]
pub struct TemplateDictionary {
    templates: BTreeMap<String, Template>,
}

impl TemplateDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: TemplateFile =
            serde_json::from_str(json).context("Malformed template dictionary")?;
        let templates = match file {
            TemplateFile::List(list) => list,
            TemplateFile::Map(map) => map
                .into_iter()
                .map(|(expression, body)| Template {
                    expression,
                    template: body.template,
                    variables: body.variables,
                })
                .collect(),
        };
        Ok(templates.into_iter().collect())
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read template dictionary {}", path.display()))?;
        let dictionary = Self::from_json_str(&json)
            .with_context(|| format!("Failed to load {}", path.display()))?;
        info!(
            "loaded {} templates from {}",
            dictionary.len(),
            path.display()
        );
        Ok(dictionary)
    }

    pub fn insert(&mut self, template: Template) {
        self.templates.insert(template.expression.clone(), template);
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn get(&self, expression: &str) -> Option<&Template> {
        self.templates.get(expression)
    }

    /// Look a token up by its exact text, then by the part after its last dot
    /// (`Nat.succ_le` -> `succ_le`).
    pub fn lookup(&self, token: &str) -> Option<&Template> {
        self.get(token).or_else(|| {
            token
                .rsplit_once('.')
                .map(|(_, suffix)| suffix)
                .filter(|suffix| !suffix.is_empty())
                .and_then(|suffix| self.get(suffix))
        })
    }
}

impl FromIterator<Template> for TemplateDictionary {
    fn from_iter<I: IntoIterator<Item = Template>>(iter: I) -> Self {
        let mut dictionary = Self::new();
        for template in iter {
            dictionary.insert(template);
        }
        dictionary
    }
}
