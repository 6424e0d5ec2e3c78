// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Text helpers for LaTeX output.

/// Escape characters that are special in LaTeX text mode. Used for block names,
/// which are identifiers such as `add_zero`.
pub fn escape_latex(name: &str) -> String {
    let mut escaped = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            '_' | '&' | '%' | '#' | '$' => {
                escaped.push('\\');
                escaped.push(c);
            }
            _ => escaped.push(c),
        }
    }
    escaped
}

pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

/// Trim, capitalize and end with punctuation.
pub fn as_sentence(line: &str) -> String {
    let line = line.trim();
    if line.is_empty() {
        return String::new();
    }
    let mut sentence = capitalize_first(line);
    if !sentence.ends_with(['.', ',', ';', ':']) {
        sentence.push('.');
    }
    sentence
}
