// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

use clap::*;
use colored::Colorize;
use narrator::narrate::{execute, load_config, GeneralConfig};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(
    name = env!("CARGO_BIN_NAME"),
    about = "Translates a proof script into natural-language prose and renders it as LaTeX theorem and proof blocks",
    rename_all = "kebab-case",
    author,
    version = env!("CARGO_PKG_VERSION"),
)]
pub struct Args {
    /// Proof source file
    #[clap(required_unless_present = "print-config")]
    pub source: Option<PathBuf>,

    /// Template dictionary (JSON)
    #[clap(long = "templates", short = 't', required_unless_present = "print-config")]
    pub templates: Option<PathBuf>,

    /// Configuration file (TOML)
    #[clap(long = "config", short = 'c')]
    pub config: Option<PathBuf>,

    /// Write the LaTeX document here instead of printing it
    #[clap(long = "output", short = 'o')]
    pub output: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit
    #[clap(name = "print-config", long = "print-config")]
    pub print_config: bool,

    /// General options
    #[clap(flatten)]
    pub general_config: GeneralConfig,
}

fn fail(err: anyhow::Error) -> ! {
    let err = format!("{:?}", err);
    println!("{}", err.bold().red());
    std::process::exit(1);
}

#[tokio::main]
async fn main() {
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).unwrap();

    let args = Args::parse();

    let config = load_config(args.config.as_deref(), &args.general_config)
        .unwrap_or_else(|err| fail(err));

    if args.print_config {
        match config.to_toml() {
            Ok(printed) => println!("{printed}"),
            Err(err) => fail(err),
        }
        return;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(config.narrator.verbosity_level.to_string().to_lowercase())
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!("Narrator CLI version: {}", env!("CARGO_PKG_VERSION"));

    let (Some(source), Some(templates)) = (args.source, args.templates) else {
        fail(anyhow::anyhow!("both a source file and --templates are required"));
    };

    if let Err(err) = execute(
        &source,
        &templates,
        args.output,
        config,
        &args.general_config,
    )
    .await
    {
        fail(err);
    }
}
