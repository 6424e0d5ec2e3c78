// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Translation of indentation-scoped, tactic-style proof scripts into prose,
//! driven by a dictionary of symbol-to-phrase templates.

pub mod dispatch;
pub mod error;
pub mod intro;
pub mod operators;
pub mod options;
pub mod preprocess;
pub mod scope;
pub mod templates;
pub mod tokenizer;
pub mod translator;

pub use error::{NarrationError, NarrationResult};
pub use operators::OperatorLibrary;
pub use options::NarratorOptions;
pub use preprocess::Preprocessor;
pub use templates::{Template, TemplateDictionary};
pub use translator::Translator;
