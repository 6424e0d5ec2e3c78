// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Joining and word-level rewriting helpers shared by the line forms.

use itertools::Itertools;
use std::collections::HashMap;

/// `a`, `a and b`, `a, b, and c`.
pub fn join_values<S: AsRef<str>>(values: &[S]) -> String {
    match values {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [first, second] => format!("{} and {}", first.as_ref(), second.as_ref()),
        [init @ .., last] => format!(
            "{}, and {}",
            init.iter().map(AsRef::<str>::as_ref).join(", "),
            last.as_ref()
        ),
    }
}

/// Output fragments of one line, joined by spaces. Empty fragments are dropped and a
/// punctuation-led phrase such as `, because` attaches to what precedes it.
#[derive(Debug, Default)]
pub struct Fragments {
    parts: Vec<String>,
}

impl Fragments {
    pub fn push<S: Into<String>>(&mut self, fragment: S) {
        let fragment = fragment.into();
        if !fragment.is_empty() {
            self.parts.push(fragment);
        }
    }

    pub fn extend<I: IntoIterator<Item = String>>(&mut self, fragments: I) {
        for fragment in fragments {
            self.push(fragment);
        }
    }

    pub fn join(&self) -> String {
        let mut text = String::new();
        for part in &self.parts {
            let attaches = part.chars().count() > 1 && part.starts_with([',', '.']);
            if !text.is_empty() && !attaches {
                text.push(' ');
            }
            text.push_str(part);
        }
        text
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Replace whole words of `text` by their mapping in `substitutions`, all at once.
pub fn substitute_words(text: &str, substitutions: &HashMap<&str, &str>) -> String {
    let mut out = String::with_capacity(text.len());
    let mut word = String::new();
    let flush = |word: &mut String, out: &mut String| {
        match substitutions.get(word.as_str()) {
            Some(replacement) => out.push_str(replacement),
            None => out.push_str(word),
        }
        word.clear();
    };
    for c in text.chars() {
        if is_word_char(c) {
            word.push(c);
        } else {
            flush(&mut word, &mut out);
            out.push(c);
        }
    }
    flush(&mut word, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_values() {
        assert_eq!(join_values::<&str>(&[]), "");
        assert_eq!(join_values(&["a"]), "a");
        assert_eq!(join_values(&["a", "b"]), "a and b");
        assert_eq!(join_values(&["a", "b", "c"]), "a, b, and c");
    }

    #[test]
    fn test_fragments_attach_punctuated_phrases() {
        let mut fragments = Fragments::default();
        fragments.push("we claim");
        fragments.push("");
        fragments.push("n at most 5");
        fragments.push(", because");
        fragments.push(",");
        fragments.push("h1");
        assert_eq!(fragments.join(), "we claim n at most 5, because , h1");
    }

    #[test]
    fn test_substitute_words_is_simultaneous_and_whole_word() {
        let substitutions = HashMap::from([("m", "n"), ("n", "m")]);
        assert_eq!(substitute_words("m < n + mn", &substitutions), "n < m + mn");
        assert_eq!(substitute_words("f(m)", &substitutions), "f(n)");
    }
}
