// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Line translation engine
//!
//! A tokenized line is classified into a [`LineForm`], the form's handler runs
//! (reading and writing the scope stack), and the assembled text then goes
//! through three passes:
//! 1. back-references `{sN}` / `{sN, operator}` are replaced right to left,
//! 2. a `fun x =>` binder is captured as a scope entry and its body dropped,
//! 3. bare identifiers naming a fact are replaced by that fact's statement.

pub mod forms;
mod handlers;
pub mod text;

use crate::error::{NarrationError, NarrationResult};
use crate::operators::OperatorLibrary;
use crate::scope::{EntryTag, ScopeEntry, ScopeStack};
use crate::templates::TemplateDictionary;
use crate::tokenizer::{RawToken, Token, TokenizedLine, Tokenizer};
use forms::LineForm;
use log::trace;
use once_cell::sync::Lazy;
use regex::Regex;
use text::Fragments;

static BACK_REFERENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{s(\d+)(?:\s*,\s*(\w+))?\}").unwrap());

static FUN_BINDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bfun\s+(\w+)\s*=>").unwrap());

/// How a call to the engine relates to source indentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scoping {
    /// A source line: the stack is pruned to its depth before translation.
    Line(usize),
    /// A sub-statement (bracket interior, claim, let side): no pruning. Entries it
    /// creates take the depth of the enclosing source line.
    Nested { depth: usize },
}

impl Scoping {
    pub fn depth(self) -> usize {
        match self {
            Scoping::Line(depth) | Scoping::Nested { depth } => depth,
        }
    }

    fn nested(self) -> Self {
        Scoping::Nested {
            depth: self.depth(),
        }
    }
}

/// What a form handler leaves for the rest of the line.
enum Step {
    /// Tokens still to classify, restricted to later forms.
    Continue(TokenizedLine),
    /// The tokens are consumed; the text passes still run.
    Finish,
    /// Emit this text as the whole line, skipping the text passes.
    Verbatim(String),
}

/// Output under construction for one call of [`Engine::translate_line`].
#[derive(Default)]
struct LineOutput {
    fragments: Fragments,
    /// Names pushed while translating this line; never resolved on the same line.
    recently_added: Vec<String>,
}

pub struct Engine<'a> {
    templates: &'a TemplateDictionary,
    operators: &'a OperatorLibrary,
    tokenizer: &'a Tokenizer,
    max_nesting_depth: usize,
    nesting: usize,
    stack: ScopeStack,
}

impl<'a> Engine<'a> {
    pub fn new(
        templates: &'a TemplateDictionary,
        operators: &'a OperatorLibrary,
        tokenizer: &'a Tokenizer,
        max_nesting_depth: usize,
    ) -> Self {
        Self {
            templates,
            operators,
            tokenizer,
            max_nesting_depth,
            nesting: 0,
            stack: ScopeStack::new(),
        }
    }

    pub fn stack(&self) -> &ScopeStack {
        &self.stack
    }

    pub fn stack_mut(&mut self) -> &mut ScopeStack {
        &mut self.stack
    }

    /// Raw tokens of a line, bracket interiors left untranslated.
    pub fn look_ahead(&self, line: &str) -> NarrationResult<TokenizedLine> {
        Ok(self
            .tokenizer
            .lex(line)?
            .iter()
            .map(RawToken::text)
            .collect())
    }

    /// Tokenize a line of the given depth, translating each bracket interior as a
    /// nested sub-statement.
    pub fn tokenize_line(&mut self, line: &str, depth: usize) -> NarrationResult<TokenizedLine> {
        let tokenizer = self.tokenizer;
        tokenizer.tokenize(line, |interior| self.translate_interior(interior, depth))
    }

    fn translate_interior(&mut self, interior: &str, depth: usize) -> NarrationResult<String> {
        if self.nesting >= self.max_nesting_depth {
            return Err(NarrationError::NestingTooDeep {
                limit: self.max_nesting_depth,
            });
        }
        self.nesting += 1;
        let result = self.tokenize_line(interior, depth).and_then(|tokens| {
            if tokens.is_empty() {
                Ok(String::new())
            } else {
                self.translate_line(tokens, None, Scoping::Nested { depth })
            }
        });
        self.nesting -= 1;
        result
    }

    /// Translate one tokenized line. `look_ahead` is the following source line, if any.
    pub fn translate_line(
        &mut self,
        tokens: TokenizedLine,
        look_ahead: Option<&TokenizedLine>,
        scoping: Scoping,
    ) -> NarrationResult<String> {
        if let Scoping::Line(depth) = scoping {
            self.stack.prune_to_depth(depth);
        }

        let mut line = LineOutput::default();
        let mut tokens = tokens;
        let mut previous = None;

        loop {
            let form = LineForm::classify(&tokens, previous);
            trace!("{form:?} at depth {}: {}", scoping.depth(), tokens.join(" "));
            let step = match form {
                LineForm::ExistentialIntro => self.existential_intro(&tokens, scoping, &mut line),
                LineForm::Exact => self.exact(&tokens, look_ahead, &mut line)?,
                LineForm::Rewrite => handlers::rewrite(tokens),
                LineForm::Intro => Step::Verbatim(tokens.join(" ")),
                LineForm::Declaration(kind) => {
                    self.declaration(kind, &tokens, scoping, &mut line)?
                }
                LineForm::Let => self.let_binding(&tokens, scoping, &mut line)?,
                LineForm::Obtain => self.obtain(&tokens, scoping, &mut line)?,
                LineForm::Expression => {
                    let rendered = self.render_expression(&tokens);
                    line.fragments.extend(rendered);
                    Step::Finish
                }
            };
            match step {
                Step::Continue(rest) => {
                    tokens = rest;
                    previous = Some(form);
                }
                Step::Finish => break,
                Step::Verbatim(text) => return Ok(text),
            }
        }

        let text = self.resolve_back_references(&line.fragments.join())?;
        let text = self.capture_fun_binder(text, scoping, &mut line.recently_added);
        Ok(self.resolve_identifiers(&text, &line.recently_added))
    }

    /// Template substitution, token by token. A template consumes its declared
    /// number of following tokens as positional arguments.
    fn render_expression(&self, tokens: &[Token]) -> Vec<String> {
        let mut rendered = vec![];
        let mut i = 0;
        while i < tokens.len() {
            match self.templates.lookup(&tokens[i]) {
                Some(template) => {
                    let end = (i + 1 + template.variables).min(tokens.len());
                    rendered.push(template.render(&tokens[i + 1..end]));
                    i = end;
                }
                None => {
                    rendered.push(tokens[i].clone());
                    i += 1;
                }
            }
        }
        rendered
    }

    fn resolve_back_references(&self, text: &str) -> NarrationResult<String> {
        let mut resolved = text.to_string();
        let references: Vec<_> = BACK_REFERENCE.captures_iter(text).collect();
        for reference in references.iter().rev() {
            let Some(whole) = reference.get(0) else {
                continue;
            };
            let n = reference[1]
                .parse::<usize>()
                .map_err(|_| NarrationError::OutOfRange {
                    requested: usize::MAX,
                    size: self.stack.len(),
                })?;
            let statement = self.stack.peek_from_top(n)?;
            let replacement = match reference.get(2) {
                Some(operator) => self.operators.apply(operator.as_str(), statement)?,
                None => statement.to_string(),
            };
            resolved.replace_range(whole.range(), &replacement);
        }
        Ok(resolved)
    }

    fn capture_fun_binder(
        &mut self,
        text: String,
        scoping: Scoping,
        recently_added: &mut Vec<String>,
    ) -> String {
        let binder = FUN_BINDER
            .captures(&text)
            .and_then(|binder| Some((binder.get(0)?.start(), binder.get(1)?.as_str().to_string())));
        let Some((start, name)) = binder else {
            return text;
        };
        let prefix = text[..start]
            .trim()
            .trim_end_matches('.')
            .trim_end()
            .to_string();
        self.stack.push(ScopeEntry::new(
            scoping.depth(),
            EntryTag::Fun,
            &name,
            &prefix,
        ));
        recently_added.push(name);
        prefix
    }

    /// Replace each word naming a fact on the stack by the fact's statement,
    /// inserting `and` when something precedes it.
    fn resolve_identifiers(&self, text: &str, recently_added: &[String]) -> String {
        let mut words: Vec<&str> = vec![];
        for word in text.split_whitespace() {
            let replacement = self
                .stack
                .statement_by_name(word, true)
                .filter(|_| !recently_added.iter().any(|name| name == word));
            match replacement {
                Some(statement) => {
                    if !words.is_empty() {
                        words.push("and");
                    }
                    words.push(statement);
                }
                None => words.push(word),
            }
        }
        words.join(" ")
    }
}

#[cfg(test)]
mod tests;
