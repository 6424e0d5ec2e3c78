// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

use log::info;

pub mod cleaner;
pub mod escape;
pub mod latex_writer;
pub mod options;
pub mod renderer;

pub use cleaner::OutputCleaner;
pub use options::LatexOptions;
pub use renderer::LatexRenderer;

/// Cleaned statements together with the LaTeX document built from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedOutput {
    pub statements: Vec<String>,
    pub document: String,
}

/// Clean translated statements and render them as LaTeX.
pub fn clean_and_render<S: AsRef<str>>(
    statements: &[S],
    options: &LatexOptions,
) -> anyhow::Result<RenderedOutput> {
    let cleaned = OutputCleaner::new(options)?.clean_all(statements);
    let document = LatexRenderer::new(options).render_document(&cleaned);
    info!("rendered {} statement(s) as LaTeX", cleaned.len());
    Ok(RenderedOutput {
        statements: cleaned,
        document,
    })
}
