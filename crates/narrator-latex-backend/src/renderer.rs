// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! LaTeX rendering of cleaned statements.
//!
//! A line opening with a block keyword (`theorem name statement`) becomes a
//! named theorem-like environment. Every other non-empty line is part of the
//! proof that follows it; those lines are turned into sentences and set as a
//! single paragraph.

use crate::escape::{as_sentence, capitalize_first, escape_latex};
use crate::latex_writer::LatexWriter;
use crate::options::LatexOptions;
use log::debug;

pub struct LatexRenderer<'a> {
    options: &'a LatexOptions,
}

impl<'a> LatexRenderer<'a> {
    pub fn new(options: &'a LatexOptions) -> Self {
        Self { options }
    }

    fn block_keyword(&self, line: &str) -> Option<&'a str> {
        self.options
            .block_keywords
            .iter()
            .find(|keyword| {
                line.strip_prefix(keyword.as_str())
                    .is_some_and(|rest| rest.is_empty() || rest.starts_with(' '))
            })
            .map(String::as_str)
    }

    fn preamble(&self, writer: &mut LatexWriter) {
        writer.line("\\documentclass{article}");
        writer.line("\\usepackage{amsmath}");
        writer.line("\\usepackage{amssymb}");
        writer.line("\\usepackage{amsthm}");
        writer.newline();
        for keyword in &self.options.block_keywords {
            writer.line(&format!(
                "\\newtheorem{{{keyword}}}{{{}}}",
                capitalize_first(keyword)
            ));
        }
        writer.newline();
        writer.line("\\begin{document}");
        writer.newline();
    }

    fn flush_proof(&self, writer: &mut LatexWriter, proof: &mut Vec<String>) {
        if proof.is_empty() {
            return;
        }
        writer.begin("proof", None);
        writer.sep(" ", proof.drain(..));
        writer.newline();
        writer.end("proof");
        writer.newline();
    }

    pub fn render_statement(&self, writer: &mut LatexWriter, statement: &str) {
        let mut proof = vec![];
        for line in statement.lines() {
            let stripped = line.trim_start();
            if stripped.is_empty() {
                continue;
            }
            let Some(environment) = self.block_keyword(stripped) else {
                proof.push(as_sentence(stripped));
                continue;
            };

            self.flush_proof(writer, &mut proof);
            let mut parts = stripped.splitn(3, ' ');
            let (Some(_), Some(name), Some(body)) = (parts.next(), parts.next(), parts.next())
            else {
                debug!("skipping `{stripped}`: no name or statement");
                continue;
            };
            writer.begin(environment, Some(&escape_latex(name)));
            writer.line(&as_sentence(body));
            writer.end(environment);
            writer.newline();
        }
        self.flush_proof(writer, &mut proof);
    }

    pub fn render_document<S: AsRef<str>>(&self, statements: &[S]) -> String {
        let mut writer = LatexWriter::new();
        if self.options.standalone {
            self.preamble(&mut writer);
        }
        for statement in statements {
            self.render_statement(&mut writer, statement.as_ref());
        }
        if self.options.standalone {
            writer.line("\\end{document}");
        }

        let document = writer.into_inner();
        let document = document.trim_end();
        if document.is_empty() {
            String::new()
        } else {
            format!("{document}\n")
        }
    }
}
