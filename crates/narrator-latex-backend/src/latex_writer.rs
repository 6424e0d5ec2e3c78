// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Line-based writer for LaTeX environments with indentation.

use std::fmt::Display;

pub struct LatexWriter {
    out: String,
    indent: usize,
    at_line_start: bool,
}

impl LatexWriter {
    pub fn new() -> Self {
        Self {
            out: String::new(),
            indent: 0,
            at_line_start: true,
        }
    }

    /// Write a string, indenting at line starts.
    pub fn write(&mut self, s: &str) {
        for c in s.chars() {
            if c == '\n' {
                self.out.push('\n');
                self.at_line_start = true;
            } else {
                if self.at_line_start {
                    for _ in 0..self.indent {
                        self.out.push_str("  ");
                    }
                }
                self.at_line_start = false;
                self.out.push(c);
            }
        }
    }

    /// Write a complete line (adds newline at end).
    pub fn line(&mut self, s: &str) {
        self.write(s);
        self.newline();
    }

    pub fn newline(&mut self) {
        self.write("\n");
    }

    pub fn indent(&mut self) {
        self.indent += 1;
    }

    pub fn dedent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }

    /// `\begin{env}` or `\begin{env}[argument]`, then indent.
    pub fn begin(&mut self, environment: &str, argument: Option<&str>) {
        match argument {
            Some(argument) => self.line(&format!("\\begin{{{environment}}}[{argument}]")),
            None => self.line(&format!("\\begin{{{environment}}}")),
        }
        self.indent();
    }

    /// Dedent, then `\end{env}`.
    pub fn end(&mut self, environment: &str) {
        self.dedent();
        self.line(&format!("\\end{{{environment}}}"));
    }

    /// Write items separated by a separator string.
    pub fn sep<I, T>(&mut self, separator: &str, items: I)
    where
        I: IntoIterator<Item = T>,
        T: Display,
    {
        let mut first = true;
        for item in items {
            if !first {
                self.write(separator);
            }
            first = false;
            self.write(&item.to_string());
        }
    }

    pub fn into_inner(self) -> String {
        self.out
    }
}

impl Default for LatexWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environments_indent_their_body() {
        let mut writer = LatexWriter::new();
        writer.begin("proof", None);
        writer.sep(" ", ["First.", "Second."]);
        writer.newline();
        writer.end("proof");
        assert_eq!(
            writer.into_inner(),
            "\\begin{proof}\n  First. Second.\n\\end{proof}\n"
        );
    }

    #[test]
    fn test_begin_with_argument() {
        let mut writer = LatexWriter::new();
        writer.begin("theorem", Some("t"));
        writer.line("Statement.\nSecond line.");
        writer.end("theorem");
        assert_eq!(
            writer.into_inner(),
            "\\begin{theorem}[t]\n  Statement.\n  Second line.\n\\end{theorem}\n"
        );
    }
}
