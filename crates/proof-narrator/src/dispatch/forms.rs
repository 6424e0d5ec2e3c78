// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Syntactic forms a tokenized line can take.

use crate::scope::EntryTag;
use crate::tokenizer::Token;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    Lemma,
    Theorem,
    Have,
}

impl DeclarationKind {
    pub fn tag(self) -> EntryTag {
        match self {
            DeclarationKind::Lemma => EntryTag::Lemma,
            DeclarationKind::Theorem => EntryTag::Theorem,
            DeclarationKind::Have => EntryTag::Have,
        }
    }
}

/// Forms are tried in declaration order. A form may leave a remainder of the
/// line, which is classified again but only into forms that come after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineForm {
    /// `⟨a, b⟩` closing an existential proof.
    ExistentialIntro,
    Exact,
    Rewrite,
    Intro,
    Declaration(DeclarationKind),
    Let,
    Obtain,
    /// Anything else: template substitution token by token.
    Expression,
}

impl LineForm {
    fn rank(self) -> u8 {
        match self {
            LineForm::ExistentialIntro => 1,
            LineForm::Exact => 2,
            LineForm::Rewrite => 3,
            LineForm::Intro => 4,
            LineForm::Declaration(_) => 5,
            LineForm::Let => 6,
            LineForm::Obtain => 7,
            LineForm::Expression => 8,
        }
    }

    fn of_leading_token(first: &str) -> Self {
        if first.starts_with('⟨') {
            return LineForm::ExistentialIntro;
        }
        match first {
            "exact" => LineForm::Exact,
            "rw" => LineForm::Rewrite,
            "intro" => LineForm::Intro,
            "lemma" => LineForm::Declaration(DeclarationKind::Lemma),
            "theorem" => LineForm::Declaration(DeclarationKind::Theorem),
            "have" => LineForm::Declaration(DeclarationKind::Have),
            "let" => LineForm::Let,
            "obtain" => LineForm::Obtain,
            _ => LineForm::Expression,
        }
    }

    /// Classify `tokens`, given the form that produced them as a remainder, if any.
    pub fn classify(tokens: &[Token], after: Option<LineForm>) -> Self {
        let form = tokens
            .first()
            .map_or(LineForm::Expression, |first| Self::of_leading_token(first));
        match after {
            Some(previous) if form.rank() <= previous.rank() => LineForm::Expression,
            _ => form,
        }
    }
}
