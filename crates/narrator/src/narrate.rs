// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

use crate::config::NarratorConfig;
use crate::pipeline::{Narration, Pipeline};
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use log::{info, warn, LevelFilter};
use proof_narrator::TemplateDictionary;
use std::fs;
use std::path::{Path, PathBuf};

/// General narration options
#[derive(Args, Default, Debug)]
#[clap(next_help_heading = "General Options")]
pub struct GeneralConfig {
    /// Translate statements in parallel
    #[clap(name = "jobs", long, short = 'j')]
    pub jobs: bool,

    /// Display debug logging
    #[clap(name = "verbose", long, short = 'v')]
    pub verbose: bool,

    /// Print each preprocessed statement above its translation
    #[clap(name = "show-source", long)]
    pub show_source: bool,

    /// Wrap the LaTeX output in a complete document
    #[clap(name = "standalone", long)]
    pub standalone: bool,

    /// Keep going on unterminated brackets instead of failing the statement
    #[clap(name = "lenient-brackets", long)]
    pub lenient_brackets: bool,
}

impl GeneralConfig {
    /// Command-line flags take precedence over the configuration file.
    pub fn apply(&self, config: &mut NarratorConfig) {
        if self.jobs {
            config.narrator.parallel = true;
        }
        if self.verbose {
            config.narrator.verbosity_level = LevelFilter::Debug;
        }
        if self.standalone {
            config.latex.standalone = true;
        }
        if self.lenient_brackets {
            config.narrator.strict_brackets = false;
        }
    }
}

pub fn load_config(path: Option<&Path>, general_config: &GeneralConfig) -> Result<NarratorConfig> {
    let mut config = match path {
        Some(path) => NarratorConfig::from_path(path)?,
        None => NarratorConfig::default(),
    };
    general_config.apply(&mut config);
    Ok(config)
}

fn report(narration: &Narration, show_source: bool) {
    for (i, statement) in narration.statements.iter().enumerate() {
        if show_source {
            println!("{}", format!("-- statement {}", i + 1).bold());
            println!("{}\n", statement.source);
        }
        match &statement.translation {
            Ok(translation) => println!("{translation}\n"),
            Err(err) => {
                let message = format!("statement {} failed: {err}", i + 1);
                eprintln!("{}", message.bold().red());
            }
        }
    }
}

pub async fn execute(
    source_path: &Path,
    templates_path: &Path,
    output: Option<PathBuf>,
    config: NarratorConfig,
    general_config: &GeneralConfig,
) -> Result<()> {
    let source = fs::read_to_string(source_path)
        .with_context(|| format!("Failed to read {}", source_path.display()))?;
    let templates = TemplateDictionary::from_path(templates_path)?;

    let pipeline = Pipeline::new(config, templates)?;
    let narration = pipeline.run(&source).await?;
    report(&narration, general_config.show_source);

    if narration.failures() > 0 {
        warn!(
            "{} of {} statement(s) failed",
            narration.failures(),
            narration.statements.len()
        );
    }

    match output {
        Some(path) => {
            fs::write(&path, &narration.document)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("LaTeX written to {}", path.display());
        }
        None => println!("{}", narration.document),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let general_config = GeneralConfig {
            jobs: true,
            verbose: true,
            lenient_brackets: true,
            ..GeneralConfig::default()
        };
        let config = load_config(None, &general_config).unwrap();
        assert!(config.narrator.parallel);
        assert!(!config.narrator.strict_brackets);
        assert_eq!(config.narrator.verbosity_level, LevelFilter::Debug);
        assert!(!config.latex.standalone);
    }
}
