// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Handlers for the line forms that read or write the scope stack.

use super::forms::DeclarationKind;
use super::text::{join_values, substitute_words};
use super::{Engine, LineOutput, Scoping, Step};
use crate::error::{NarrationError, NarrationResult};
use crate::scope::{EntryTag, ScopeEntry};
use crate::tokenizer::{Token, TokenizedLine};
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static EXPLICIT_BINDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\(\s*(\w+)\s*:").unwrap());

/// Names inside an anonymous constructor `⟨a, b, c⟩` spread over several tokens.
fn constructor_names(tokens: &[Token]) -> Vec<String> {
    let last = tokens.len().saturating_sub(1);
    tokens
        .iter()
        .enumerate()
        .map(|(i, token)| {
            let mut token = token.as_str();
            if i == 0 {
                token = token.trim_start_matches('⟨');
            }
            if i == last {
                token = token.trim_end_matches('⟩');
            }
            token
        })
        .filter(|token| !token.is_empty() && *token != ",")
        .map(String::from)
        .collect()
}

/// `rw [h1, h2]`: drop the keyword and the list brackets, leave the rest to later forms.
pub(super) fn rewrite(tokens: TokenizedLine) -> Step {
    let mut rest: TokenizedLine = tokens.into_iter().skip(1).collect();
    if let Some(first) = rest.first_mut() {
        *first = first.trim_start_matches('[').to_string();
    }
    if let Some(last) = rest.last_mut() {
        *last = last.trim_end_matches(']').to_string();
    }
    rest.retain(|token| !token.is_empty());
    Step::Continue(rest)
}

fn split_at_assignment(tokens: &[Token]) -> (&[Token], &[Token]) {
    match tokens.iter().position(|token| token == ":=") {
        Some(at) => (&tokens[..at], &tokens[at + 1..]),
        None => (tokens, &tokens[tokens.len()..]),
    }
}

/// Variable bound by an explicit `(var : type)` assumption. Implicit `{...}`
/// binders are not supplied positionally and yield `None`.
fn assumption_variable(assumption: &str) -> NarrationResult<Option<String>> {
    if assumption.starts_with('{') {
        return Ok(None);
    }
    EXPLICIT_BINDER
        .captures(assumption)
        .and_then(|binder| binder.get(1))
        .map(|var| Some(var.as_str().to_string()))
        .ok_or_else(|| NarrationError::MalformedAssumption(assumption.to_string()))
}

impl<'a> Engine<'a> {
    fn strip_delimiters<'t>(&self, token: &'t str) -> &'t str {
        let mut chars = token.chars();
        match (chars.next(), chars.next_back()) {
            (Some(open), Some(close)) if self.tokenizer.delimiters().contains(&(open, close)) => {
                &token[open.len_utf8()..token.len() - close.len_utf8()]
            }
            _ => token,
        }
    }

    /// `⟨h1, h2⟩` closing an existential: state the witnesses and attach them to the
    /// fact two indentation levels up, for a later `obtain` to destructure.
    pub(super) fn existential_intro(
        &mut self,
        tokens: &[Token],
        scoping: Scoping,
        line: &mut LineOutput,
    ) -> Step {
        let mut witnesses = vec![];
        let mut tags = vec![];
        for name in constructor_names(tokens) {
            match self.stack.find_by_name(&name) {
                Some(entry) => {
                    witnesses.push(entry.statement.clone());
                    tags.push(entry.tag.clone());
                }
                None => debug!("witness `{name}` does not name a fact"),
            }
        }

        let stated: Vec<&str> = witnesses
            .iter()
            .zip(&tags)
            .filter(|(_, tag)| !tag.is_definition_like())
            .map(|(witness, _)| witness.as_str())
            .collect();
        line.fragments.push("finally, we have");
        line.fragments.push(join_values(&stated));

        let owner = scoping
            .depth()
            .checked_sub(2)
            .and_then(|depth| self.stack.name_at_depth(depth))
            .map(str::to_string);
        match owner {
            Some(owner) => {
                self.stack.edit_by_name(&owner, |entry| {
                    entry.exists = Some(witnesses);
                    entry.exists_tags = Some(tags);
                });
            }
            None => warn!(
                "no fact at depth {} to attach witnesses to",
                scoping.depth().saturating_sub(2)
            ),
        }
        Step::Finish
    }

    pub(super) fn exact(
        &mut self,
        tokens: &[Token],
        look_ahead: Option<&TokenizedLine>,
        line: &mut LineOutput,
    ) -> NarrationResult<Step> {
        let arguments = &tokens[1..];
        if arguments.is_empty() {
            let phrase = match look_ahead {
                Some(_) => "we conclude the proof by",
                None => "we conclude the proof",
            };
            return Ok(Step::Verbatim(phrase.to_string()));
        }

        let mut hypotheses = vec![];
        for name in constructor_names(arguments) {
            let entry = self
                .stack
                .find_by_name(&name)
                .ok_or_else(|| NarrationError::UnknownName(name.clone()))?;
            if !entry.tag.is_definition_like() {
                hypotheses.push(entry.statement.clone());
            }
        }
        line.fragments.push("finally, we conclude by");
        line.fragments.push(join_values(&hypotheses));
        Ok(Step::Finish)
    }

    fn render_assumptions(
        &self,
        assumptions: &[Token],
        kind: DeclarationKind,
    ) -> NarrationResult<String> {
        let parsed = assumptions
            .iter()
            .map(|assumption| {
                self.strip_delimiters(assumption)
                    .split_once(" : ")
                    .map(|(var, ty)| format!("{} be in {}", var.trim(), ty.trim()))
                    .ok_or_else(|| NarrationError::MalformedAssumption(assumption.clone()))
            })
            .collect::<NarrationResult<Vec<_>>>()?;
        Ok(match kind {
            DeclarationKind::Lemma | DeclarationKind::Theorem => {
                format!("Let {}.", parsed.join(", and let "))
            }
            DeclarationKind::Have => format!(", assuming {},", parsed.join(", ")),
        })
    }

    /// `theorem name (v : T) ... : claim := proof`, likewise `lemma` and `have`.
    pub(super) fn declaration(
        &mut self,
        kind: DeclarationKind,
        tokens: &[Token],
        scoping: Scoping,
        line: &mut LineOutput,
    ) -> NarrationResult<Step> {
        let keyword = &tokens[0];
        let malformed = |reason: &str| NarrationError::MalformedDeclaration {
            tag: keyword.clone(),
            reason: reason.to_string(),
        };
        let name = tokens.get(1).ok_or_else(|| malformed("missing name"))?.clone();

        match kind {
            DeclarationKind::Have => line.fragments.push("we claim"),
            _ => {
                line.fragments.push(keyword.as_str());
                line.fragments.push(name.as_str());
            }
        }

        let rest = &tokens[2..];
        let colon = rest
            .iter()
            .position(|token| token == ":")
            .ok_or_else(|| malformed(&format!("`{name}` states no claim")))?;
        let assumptions = rest[..colon].to_vec();
        if !assumptions.is_empty() {
            line.fragments.push(self.render_assumptions(&assumptions, kind)?);
            line.fragments.push("Then");
        }

        let (claim, proof) = split_at_assignment(&rest[colon + 1..]);
        let statement = self.translate_line(claim.to_vec(), None, scoping.nested())?;
        line.fragments.push(statement.as_str());

        let proof = match proof.split_first() {
            Some((by, rest)) if by == "by" => rest,
            _ => proof,
        };
        if !proof.is_empty() {
            line.fragments.push(", because");
        } else if kind == DeclarationKind::Have {
            line.fragments.push(". Indeed,");
        }

        debug!("{} `{name}`: {statement}", kind.tag());
        self.stack.push(
            ScopeEntry::new(scoping.depth(), kind.tag(), &name, &statement)
                .with_assumes(assumptions),
        );
        line.recently_added.push(name);
        Ok(Step::Continue(proof.to_vec()))
    }

    /// `let x := value`
    pub(super) fn let_binding(
        &mut self,
        tokens: &[Token],
        scoping: Scoping,
        line: &mut LineOutput,
    ) -> NarrationResult<Step> {
        let (lhs, rhs) = split_at_assignment(&tokens[1..]);
        let name = lhs
            .first()
            .ok_or_else(|| NarrationError::MalformedDeclaration {
                tag: "let".to_string(),
                reason: "missing name".to_string(),
            })?
            .clone();

        let translated_lhs = self.translate_line(lhs.to_vec(), None, scoping.nested())?;
        let translated_rhs = self.translate_line(rhs.to_vec(), None, scoping.nested())?;
        line.fragments.push("let");
        line.fragments.push(translated_lhs);
        line.fragments.push("be");
        line.fragments.push(translated_rhs.as_str());

        self.stack.push(ScopeEntry::new(
            scoping.depth(),
            EntryTag::Let,
            &name,
            &format!("{name} is {translated_rhs}"),
        ));
        Ok(Step::Finish)
    }

    /// `obtain ⟨a, b⟩ := thm x y`: instantiate the witnesses `thm` exposes with the
    /// positional arguments and bind one name per witness.
    pub(super) fn obtain(
        &mut self,
        tokens: &[Token],
        scoping: Scoping,
        line: &mut LineOutput,
    ) -> NarrationResult<Step> {
        let (pattern, source) = split_at_assignment(&tokens[1..]);
        let names: Vec<String> = pattern
            .iter()
            .map(|token| token.trim_matches(|c| matches!(c, '⟨' | '⟩' | ',')))
            .filter(|token| !token.is_empty())
            .map(String::from)
            .collect();
        let (theorem, arguments) =
            source
                .split_first()
                .ok_or_else(|| NarrationError::MalformedDeclaration {
                    tag: "obtain".to_string(),
                    reason: "missing the fact to destructure".to_string(),
                })?;

        let entry = self
            .stack
            .find_by_name(theorem)
            .ok_or_else(|| NarrationError::UnknownName(theorem.clone()))?;
        let mut variables = vec![];
        for assumption in &entry.assumes {
            if let Some(variable) = assumption_variable(assumption)? {
                variables.push(variable);
            }
        }
        let substitutions: HashMap<&str, &str> = variables
            .iter()
            .map(String::as_str)
            .zip(arguments.iter().map(String::as_str))
            .collect();
        let witnesses: Vec<String> = entry
            .exists
            .iter()
            .flatten()
            .map(|witness| substitute_words(witness, &substitutions))
            .collect();
        let tags = entry.exists_tags.clone().unwrap_or_default();

        if witnesses.len() != names.len() {
            return Err(NarrationError::ArityMismatch {
                theorem: theorem.clone(),
                witnesses: witnesses.len(),
                names: names.len(),
            });
        }

        for (i, (name, witness)) in names.iter().zip(&witnesses).enumerate() {
            let inherited = tags.get(i).cloned().unwrap_or(EntryTag::Have);
            self.stack.push(ScopeEntry::new(
                scoping.depth(),
                EntryTag::Obtained(Box::new(inherited)),
                name,
                witness,
            ));
            line.recently_added.push(name.clone());
        }

        line.fragments.push(format!("by {theorem}, there exists"));
        line.fragments.push(join_values(&witnesses));
        Ok(Step::Finish)
    }
}
