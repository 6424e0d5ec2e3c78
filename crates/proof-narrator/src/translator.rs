// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Statement-level entry point.
//!
//! Each proof statement gets a fresh scope stack. Lines are measured for their
//! raw leading whitespace, translated in order and re-indented by the same
//! amount. Lines that translate to nothing are dropped.

use crate::dispatch::{Engine, Scoping};
use crate::error::NarrationResult;
use crate::intro::apply_intro_renames;
use crate::operators::OperatorLibrary;
use crate::options::NarratorOptions;
use crate::templates::TemplateDictionary;
use crate::tokenizer::Tokenizer;
use itertools::Itertools;
use log::{debug, info, trace, warn};

/// Number of leading whitespace characters.
pub fn indentation(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

pub struct Translator {
    templates: TemplateDictionary,
    operators: OperatorLibrary,
    tokenizer: Tokenizer,
    options: NarratorOptions,
}

impl Translator {
    pub fn new(
        templates: TemplateDictionary,
        operators: OperatorLibrary,
        options: NarratorOptions,
    ) -> Self {
        debug!(
            "{} template(s), operators: {}",
            templates.len(),
            operators.names().join(", ")
        );
        Self {
            templates,
            operators,
            tokenizer: Tokenizer::from_options(&options),
            options,
        }
    }

    /// A translator with the builtin operators.
    pub fn with_builtins(templates: TemplateDictionary, options: NarratorOptions) -> Self {
        Self::new(templates, OperatorLibrary::with_builtins(), options)
    }

    /// Translate one proof statement. The intro renaming pass is not applied.
    pub fn translate_statement(&self, statement: &str) -> NarrationResult<String> {
        let lines: Vec<(usize, &str)> = statement
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| (indentation(line), line.trim()))
            .collect();

        let mut engine = Engine::new(
            &self.templates,
            &self.operators,
            &self.tokenizer,
            self.options.max_nesting_depth,
        );
        let mut output = vec![];
        for (i, (depth, line)) in lines.iter().enumerate() {
            engine.stack_mut().prune_to_depth(*depth);
            let tokens = engine.tokenize_line(line, *depth)?;
            let look_ahead = lines
                .get(i + 1)
                .map(|(_, next)| engine.look_ahead(next))
                .transpose()?;
            let translated =
                engine.translate_line(tokens, look_ahead.as_ref(), Scoping::Line(*depth))?;
            if !translated.is_empty() {
                output.push(format!("{}{translated}", " ".repeat(*depth)));
            }
        }
        trace!("{}", engine.stack());
        Ok(output.join("\n"))
    }

    /// Translate statements independently, then run the intro renaming pass over
    /// the successful ones. A failing statement does not affect its siblings.
    pub fn translate_batch<S: AsRef<str>>(&self, statements: &[S]) -> Vec<NarrationResult<String>> {
        let translated = statements
            .iter()
            .enumerate()
            .map(|(i, statement)| {
                let result = self.translate_statement(statement.as_ref());
                match &result {
                    Ok(_) => info!("translated statement {}", i + 1),
                    Err(err) => warn!("statement {} failed: {err}", i + 1),
                }
                result
            })
            .collect();
        apply_intro_renames(translated)
    }
}
