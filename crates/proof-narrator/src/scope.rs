// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Indentation-scoped symbol table
//!
//! Entries are kept in insertion order. Before a source line at depth `d` is
//! translated, every entry deeper than `d` is pruned, which closes the scopes
//! that ended at a dedent. Positional references (`s1`, `s2`, ...) count from
//! the most recent entry.
//!
//! Name lookups scan oldest-first, except [`ScopeStack::name_at_depth`] which
//! scans newest-first.

use crate::error::{NarrationError, NarrationResult};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryTag {
    Lemma,
    Theorem,
    Have,
    Let,
    Def,
    Fun,
    /// A witness destructured by `obtain`, carrying the tag of the fact it came from.
    Obtained(Box<EntryTag>),
}

impl EntryTag {
    /// The tag an obtained witness inherited, or the tag itself.
    pub fn effective(&self) -> &EntryTag {
        match self {
            EntryTag::Obtained(inherited) => inherited.effective(),
            tag => tag,
        }
    }

    /// `let` and `def` entries name values rather than facts.
    pub fn is_definition_like(&self) -> bool {
        matches!(self.effective(), EntryTag::Let | EntryTag::Def)
    }
}

impl fmt::Display for EntryTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryTag::Lemma => write!(f, "lemma"),
            EntryTag::Theorem => write!(f, "theorem"),
            EntryTag::Have => write!(f, "have"),
            EntryTag::Let => write!(f, "let"),
            EntryTag::Def => write!(f, "def"),
            EntryTag::Fun => write!(f, "fun"),
            EntryTag::Obtained(inherited) => write!(f, "obtained {inherited}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeEntry {
    /// Indentation of the source line that created the entry.
    pub depth: usize,
    pub tag: EntryTag,
    pub name: String,
    /// Rendered natural-language text the name stands for.
    pub statement: String,
    /// Raw `(var : type)` assumption tokens of a declaration.
    pub assumes: Vec<String>,
    /// Witness statements attached by an existential introduction closing this entry's proof.
    pub exists: Option<Vec<String>>,
    pub exists_tags: Option<Vec<EntryTag>>,
}

impl ScopeEntry {
    pub fn new(depth: usize, tag: EntryTag, name: &str, statement: &str) -> Self {
        Self {
            depth,
            tag,
            name: name.to_string(),
            statement: statement.to_string(),
            assumes: vec![],
            exists: None,
            exists_tags: None,
        }
    }

    pub fn with_assumes(mut self, assumes: Vec<String>) -> Self {
        self.assumes = assumes;
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScopeStack {
    entries: Vec<ScopeEntry>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: ScopeEntry) {
        self.entries.push(entry);
    }

    /// Retain only entries with `depth <= depth`, keeping their order.
    pub fn prune_to_depth(&mut self, depth: usize) {
        self.entries.retain(|entry| entry.depth <= depth);
    }

    pub fn pop(&mut self) -> NarrationResult<ScopeEntry> {
        self.entries.pop().ok_or(NarrationError::EmptyStack)
    }

    /// Statement of the most recent entry.
    pub fn peek(&self) -> NarrationResult<&str> {
        self.peek_from_top(1)
    }

    /// Statement of the `n`-th most recent entry; `n = 1` is the top.
    pub fn peek_from_top(&self, n: usize) -> NarrationResult<&str> {
        if n == 0 || n > self.entries.len() {
            return Err(NarrationError::OutOfRange {
                requested: n,
                size: self.entries.len(),
            });
        }
        Ok(&self.entries[self.entries.len() - n].statement)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&ScopeEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Statement of the first entry named `name`. With `exclude_def_like`, matching
    /// `let`/`def` entries are skipped and the scan continues.
    pub fn statement_by_name(&self, name: &str, exclude_def_like: bool) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| {
                entry.name == name && !(exclude_def_like && entry.tag.is_definition_like())
            })
            .map(|entry| entry.statement.as_str())
    }

    /// Name of the most recent entry created at exactly `depth`.
    pub fn name_at_depth(&self, depth: usize) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|entry| entry.depth == depth)
            .map(|entry| entry.name.as_str())
    }

    /// Apply `update` to the first entry named `name`. Returns whether one was found.
    pub fn edit_by_name<F>(&mut self, name: &str, update: F) -> bool
    where
        F: FnOnce(&mut ScopeEntry),
    {
        match self.entries.iter_mut().find(|entry| entry.name == name) {
            Some(entry) => {
                update(entry);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries from oldest to most recent.
    pub fn iter(&self) -> impl Iterator<Item = &ScopeEntry> {
        self.entries.iter()
    }
}

impl fmt::Display for ScopeStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Stack (top -> bottom):")?;
        for (i, entry) in self.entries.iter().rev().enumerate() {
            writeln!(
                f,
                "  s{}: [{}] {} {} := {}",
                i + 1,
                entry.depth,
                entry.tag,
                entry.name,
                entry.statement
            )?;
        }
        Ok(())
    }
}
