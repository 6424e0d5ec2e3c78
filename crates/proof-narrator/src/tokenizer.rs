// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Line tokenizer
//!
//! Whitespace separates tokens, a comma outside brackets is its own token, and a
//! span between a registered delimiter pair is a single token. Lexing keeps the
//! raw interior of such spans; [`Tokenizer::tokenize`] hands each interior to a
//! callback (the translation engine) and re-wraps the result in its delimiters.

use crate::error::{NarrationError, NarrationResult};
use crate::options::NarratorOptions;
use log::warn;

pub type Token = String;
pub type TokenizedLine = Vec<Token>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawToken {
    Atom(String),
    Comma,
    Group {
        open: char,
        close: char,
        interior: String,
    },
}

impl RawToken {
    /// Source text of the token, interior untranslated.
    pub fn text(&self) -> String {
        match self {
            RawToken::Atom(atom) => atom.clone(),
            RawToken::Comma => ",".to_string(),
            RawToken::Group {
                open,
                close,
                interior,
            } => format!("{open}{interior}{close}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Tokenizer {
    delimiters: Vec<(char, char)>,
    strict: bool,
}

impl Tokenizer {
    pub fn new(delimiters: Vec<(char, char)>, strict: bool) -> Self {
        Self { delimiters, strict }
    }

    pub fn from_options(options: &NarratorOptions) -> Self {
        Self::new(options.delimiters.clone(), options.strict_brackets)
    }

    pub fn delimiters(&self) -> &[(char, char)] {
        &self.delimiters
    }

    fn closing_for(&self, c: char) -> Option<char> {
        self.delimiters
            .iter()
            .find(|(open, _)| *open == c)
            .map(|(_, close)| *close)
    }

    /// Split a line into raw tokens without translating bracket interiors.
    pub fn lex(&self, line: &str) -> NarrationResult<Vec<RawToken>> {
        let chars: Vec<char> = line.chars().collect();
        let mut tokens = vec![];
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            if c.is_whitespace() {
                i += 1;
                continue;
            }

            if c == ',' {
                tokens.push(RawToken::Comma);
                i += 1;
                continue;
            }

            if let Some(close) = self.closing_for(c) {
                let start = i;
                let mut depth = 1;
                i += 1;
                while i < chars.len() && depth > 0 {
                    if chars[i] == close {
                        depth -= 1;
                    } else if chars[i] == c {
                        depth += 1;
                    }
                    i += 1;
                }

                let interior: String = if depth > 0 {
                    if self.strict {
                        return Err(NarrationError::MalformedBracket {
                            open: c,
                            column: start,
                            line: line.to_string(),
                        });
                    }
                    warn!("unterminated `{c}` in `{line}`, consuming to end of line");
                    chars[start + 1..].iter().collect()
                } else {
                    chars[start + 1..i - 1].iter().collect()
                };
                tokens.push(RawToken::Group {
                    open: c,
                    close,
                    interior,
                });
                continue;
            }

            let start = i;
            while i < chars.len()
                && !chars[i].is_whitespace()
                && chars[i] != ','
                && self.closing_for(chars[i]).is_none()
            {
                i += 1;
            }
            tokens.push(RawToken::Atom(chars[start..i].iter().collect()));
        }

        Ok(tokens)
    }

    /// Tokenize a line, replacing each bracket interior by `translate_interior(interior)`.
    pub fn tokenize<F>(&self, line: &str, mut translate_interior: F) -> NarrationResult<TokenizedLine>
    where
        F: FnMut(&str) -> NarrationResult<String>,
    {
        self.lex(line)?
            .into_iter()
            .map(|token| match token {
                RawToken::Group {
                    open,
                    close,
                    interior,
                } => Ok(format!("{open}{}{close}", translate_interior(&interior)?)),
                other => Ok(other.text()),
            })
            .collect()
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::from_options(&NarratorOptions::default())
    }
}
