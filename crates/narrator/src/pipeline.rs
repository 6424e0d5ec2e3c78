// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Preprocess, translate, rename intros, clean, render.

use crate::config::NarratorConfig;
use anyhow::{Context, Result};
use log::warn;
use narrator_latex_backend::{clean_and_render, LatexOptions};
use proof_narrator::intro::apply_intro_renames;
use proof_narrator::{NarrationResult, Preprocessor, TemplateDictionary, Translator};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarratedStatement {
    /// The statement as extracted from the preprocessed source.
    pub source: String,
    /// The cleaned translation.
    pub translation: NarrationResult<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Narration {
    pub statements: Vec<NarratedStatement>,
    /// LaTeX for the statements that translated.
    pub document: String,
}

impl Narration {
    pub fn failures(&self) -> usize {
        self.statements
            .iter()
            .filter(|statement| statement.translation.is_err())
            .count()
    }
}

pub struct Pipeline {
    preprocessor: Preprocessor,
    translator: Arc<Translator>,
    latex: LatexOptions,
    parallel: bool,
}

impl Pipeline {
    pub fn new(config: NarratorConfig, templates: TemplateDictionary) -> Result<Self> {
        let preprocessor = Preprocessor::new(&config.narrator)?;
        let parallel = config.narrator.parallel;
        Ok(Self {
            preprocessor,
            translator: Arc::new(Translator::with_builtins(templates, config.narrator)),
            latex: config.latex,
            parallel,
        })
    }

    /// Translate each statement on its own blocking task. All tasks are joined,
    /// in source order, before the intro renaming pass runs.
    pub async fn translate_parallel(
        &self,
        statements: &[String],
    ) -> Result<Vec<NarrationResult<String>>> {
        let tasks: Vec<_> = statements
            .iter()
            .cloned()
            .map(|statement| {
                let translator = Arc::clone(&self.translator);
                tokio::task::spawn_blocking(move || translator.translate_statement(&statement))
            })
            .collect();

        let mut translated = Vec::with_capacity(tasks.len());
        for (i, task) in tasks.into_iter().enumerate() {
            let result = task
                .await
                .with_context(|| format!("Translation of statement {} panicked", i + 1))?;
            if let Err(err) = &result {
                warn!("statement {} failed: {err}", i + 1);
            }
            translated.push(result);
        }
        Ok(apply_intro_renames(translated))
    }

    pub async fn translate(&self, statements: &[String]) -> Result<Vec<NarrationResult<String>>> {
        if self.parallel {
            self.translate_parallel(statements).await
        } else {
            Ok(self.translator.translate_batch(statements))
        }
    }

    pub async fn run(&self, source: &str) -> Result<Narration> {
        let sources = self.preprocessor.prepare(source);
        let translated = self.translate(&sources).await?;

        let succeeded: Vec<&String> = translated
            .iter()
            .filter_map(|result| result.as_ref().ok())
            .collect();
        let rendered = clean_and_render(&succeeded, &self.latex)?;

        let mut cleaned = rendered.statements.into_iter();
        let statements = sources
            .into_iter()
            .zip(translated)
            .map(|(source, translation)| NarratedStatement {
                source,
                translation: translation.map(|_| cleaned.next().unwrap_or_default()),
            })
            .collect();

        Ok(Narration {
            statements,
            document: rendered.document,
        })
    }
}
