// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

use super::*;
use crate::templates::Template;

fn dictionary(templates: &[(&str, &str, usize)]) -> TemplateDictionary {
    templates
        .iter()
        .map(|(expression, template, variables)| Template::new(expression, template, *variables))
        .collect()
}

struct Fixture {
    templates: TemplateDictionary,
    operators: OperatorLibrary,
    tokenizer: Tokenizer,
}

impl Fixture {
    fn new(templates: &[(&str, &str, usize)]) -> Self {
        Self {
            templates: dictionary(templates),
            operators: OperatorLibrary::with_builtins(),
            tokenizer: Tokenizer::default(),
        }
    }

    fn engine(&self) -> Engine<'_> {
        Engine::new(&self.templates, &self.operators, &self.tokenizer, 8)
    }
}

fn translate(engine: &mut Engine, line: &str, depth: usize) -> NarrationResult<String> {
    let tokens = engine.tokenize_line(line, depth)?;
    engine.translate_line(tokens, None, Scoping::Line(depth))
}

#[test]
fn test_have_then_exact() {
    let fixture = Fixture::new(&[("≤", "at most", 0)]);
    let mut engine = fixture.engine();

    let claim = translate(&mut engine, "have h1 : n ≤ 5 := by exact trivial", 0).unwrap();
    assert!(claim.starts_with("we claim n at most 5, because"));
    let entry = engine.stack().find_by_name("h1").unwrap();
    assert_eq!(entry.tag, EntryTag::Have);
    assert_eq!(entry.statement, "n at most 5");

    let conclusion = translate(&mut engine, "exact h1", 0).unwrap();
    assert_eq!(conclusion, "finally, we conclude by n at most 5");
}

#[test]
fn test_bare_have_is_followed_by_indeed() {
    let fixture = Fixture::new(&[]);
    let mut engine = fixture.engine();
    assert_eq!(
        translate(&mut engine, "have h : a = b := by", 2).unwrap(),
        "we claim a = b. Indeed,"
    );
    assert_eq!(
        translate(&mut engine, "have h2 (k : Nat) : k = k := rfl", 2).unwrap(),
        "we claim, assuming k be in Nat, Then k = k, because rfl"
    );
    assert_eq!(
        engine.stack().find_by_name("h2").unwrap().assumes,
        vec!["(k : Nat)".to_string()]
    );
}

#[test]
fn test_theorem_assumptions() {
    let fixture = Fixture::new(&[("Nat", "ℕ", 0)]);
    let mut engine = fixture.engine();
    let text = translate(&mut engine, "theorem t (a : Nat) (b : Nat) : a = b := by", 0).unwrap();
    assert_eq!(text, "theorem t Let a be in ℕ, and let b be in ℕ. Then a = b");
    assert_eq!(
        engine.stack().find_by_name("t").unwrap().assumes,
        vec!["(a : ℕ)".to_string(), "(b : ℕ)".to_string()]
    );
}

#[test]
fn test_declaration_without_claim_is_malformed() {
    let fixture = Fixture::new(&[]);
    let mut engine = fixture.engine();
    assert!(matches!(
        translate(&mut engine, "have h := foo", 0),
        Err(NarrationError::MalformedDeclaration { .. })
    ));
    assert!(matches!(
        translate(&mut engine, "theorem t n : n = n", 0),
        Err(NarrationError::MalformedAssumption(_))
    ));
}

#[test]
fn test_let_binding() {
    let fixture = Fixture::new(&[]);
    let mut engine = fixture.engine();
    assert_eq!(translate(&mut engine, "let x := 5", 2).unwrap(), "let x be 5");
    let entry = engine.stack().find_by_name("x").unwrap();
    assert_eq!(entry.tag, EntryTag::Let);
    assert_eq!(entry.statement, "x is 5");
    assert_eq!(entry.depth, 2);
}

fn push_existential_theorem(engine: &mut Engine) {
    let mut theorem = ScopeEntry::new(0, EntryTag::Theorem, "thm", "∃ k , k > m")
        .with_assumes(vec!["(m : Nat)".to_string()]);
    theorem.exists = Some(vec!["m > 0".to_string(), "m < n".to_string()]);
    theorem.exists_tags = Some(vec![EntryTag::Have, EntryTag::Have]);
    engine.stack_mut().push(theorem);
}

#[test]
fn test_obtain_substitutes_arguments() {
    let fixture = Fixture::new(&[]);
    let mut engine = fixture.engine();
    push_existential_theorem(&mut engine);

    let text = translate(&mut engine, "obtain ⟨a, b⟩ := thm n", 2).unwrap();
    assert_eq!(text, "by thm, there exists n > 0 and n < n");

    let a = engine.stack().find_by_name("a").unwrap();
    assert_eq!(a.statement, "n > 0");
    assert_eq!(a.tag, EntryTag::Obtained(Box::new(EntryTag::Have)));
    assert_eq!(engine.stack().find_by_name("b").unwrap().statement, "n < n");
}

#[test]
fn test_obtain_leaves_witness_words_unresolved() {
    let fixture = Fixture::new(&[]);
    let mut engine = fixture.engine();
    push_existential_theorem(&mut engine);

    let text = translate(&mut engine, "obtain ⟨n, b⟩ := thm n", 2).unwrap();
    assert_eq!(text, "by thm, there exists n > 0 and n < n");
    assert_eq!(engine.stack().find_by_name("n").unwrap().statement, "n > 0");
}

#[test]
fn test_obtain_arity_mismatch_pushes_nothing() {
    let fixture = Fixture::new(&[]);
    let mut engine = fixture.engine();
    push_existential_theorem(&mut engine);

    let result = translate(&mut engine, "obtain ⟨a⟩ := thm n", 2);
    assert_eq!(
        result,
        Err(NarrationError::ArityMismatch {
            theorem: "thm".to_string(),
            witnesses: 2,
            names: 1
        })
    );
    assert_eq!(engine.stack().len(), 1);
}

#[test]
fn test_obtain_from_unknown_fact() {
    let fixture = Fixture::new(&[]);
    let mut engine = fixture.engine();
    assert_eq!(
        translate(&mut engine, "obtain ⟨a⟩ := missing", 0),
        Err(NarrationError::UnknownName("missing".to_string()))
    );
}

#[test]
fn test_existential_intro_attaches_witnesses() {
    let fixture = Fixture::new(&[]);
    let mut engine = fixture.engine();
    translate(&mut engine, "theorem t (n : Nat) : ∃ m, m > n :=", 0).unwrap();
    translate(&mut engine, "have h : n + 1 > n := by simp", 2).unwrap();
    let text = translate(&mut engine, "⟨n + 1, h⟩", 2).unwrap();
    assert_eq!(text, "finally, we have n + 1 > n");

    let theorem = engine.stack().find_by_name("t").unwrap();
    assert_eq!(theorem.exists, Some(vec!["n + 1 > n".to_string()]));
    assert_eq!(theorem.exists_tags, Some(vec![EntryTag::Have]));

    let obtained = translate(&mut engine, "obtain ⟨k⟩ := t 5", 2).unwrap();
    assert_eq!(obtained, "by t, there exists 5 + 1 > 5");
}

#[test]
fn test_exact_forms() {
    let fixture = Fixture::new(&[]);
    let mut engine = fixture.engine();
    let next = vec!["simp".to_string()];
    let bare = vec!["exact".to_string()];
    assert_eq!(
        engine.translate_line(bare.clone(), Some(&next), Scoping::Line(0)).unwrap(),
        "we conclude the proof by"
    );
    assert_eq!(
        engine.translate_line(bare, None, Scoping::Line(0)).unwrap(),
        "we conclude the proof"
    );

    translate(&mut engine, "let x := 2", 0).unwrap();
    translate(&mut engine, "have h1 : x > 1 := by simp", 0).unwrap();
    translate(&mut engine, "have h2 : x < 3 := by simp", 0).unwrap();
    assert_eq!(
        translate(&mut engine, "exact ⟨x, h1, h2⟩", 0).unwrap(),
        "finally, we conclude by x > 1 and x < 3"
    );
    assert_eq!(
        translate(&mut engine, "exact h3", 0),
        Err(NarrationError::UnknownName("h3".to_string()))
    );
}

#[test]
fn test_rewrite_resolves_hypotheses() {
    let fixture = Fixture::new(&[]);
    let mut engine = fixture.engine();
    translate(&mut engine, "have h1 : a = b := by simp", 0).unwrap();
    translate(&mut engine, "have h2 : b = c := by simp", 0).unwrap();
    assert_eq!(
        translate(&mut engine, "rw [h1, h2]", 2).unwrap(),
        "a = b , and b = c"
    );
}

#[test]
fn test_intro_is_left_for_the_post_pass() {
    let fixture = Fixture::new(&[]);
    let mut engine = fixture.engine();
    translate(&mut engine, "have n : a = b := by simp", 0).unwrap();
    assert_eq!(translate(&mut engine, "intro n", 2).unwrap(), "intro n");
}

#[test]
fn test_templates_consume_arguments() {
    let fixture = Fixture::new(&[("Even", "{0} is even", 1), ("le_of_lt", "by monotonicity", 0)]);
    let mut engine = fixture.engine();
    assert_eq!(
        translate(&mut engine, "Even (n + 1) and Nat.le_of_lt", 0).unwrap(),
        "(n + 1) is even and by monotonicity"
    );
}

#[test]
fn test_back_references_and_operators() {
    let fixture = Fixture::new(&[
        ("not_le", "{s1, negate_inequality}", 0),
        ("first", "{s2}", 0),
        ("flip", "{s1, flip}", 0),
        ("far", "{s3}", 0),
    ]);
    let mut engine = fixture.engine();
    translate(&mut engine, "have h1 : a ≤ b := by simp", 0).unwrap();
    translate(&mut engine, "have h2 : c ≥ d := by simp", 0).unwrap();

    assert_eq!(translate(&mut engine, "not_le", 0).unwrap(), "c < d");
    assert_eq!(translate(&mut engine, "first", 0).unwrap(), "a ≤ b");
    assert_eq!(translate(&mut engine, "{s1}", 0).unwrap(), "c ≥ d");
    assert_eq!(
        translate(&mut engine, "flip", 0),
        Err(NarrationError::UnknownOperator("flip".to_string()))
    );
    assert_eq!(
        translate(&mut engine, "far", 0),
        Err(NarrationError::OutOfRange {
            requested: 3,
            size: 2
        })
    );
}

#[test]
fn test_fun_binder_is_captured() {
    let fixture = Fixture::new(&[]);
    let mut engine = fixture.engine();
    let text = translate(&mut engine, "positivity . fun hx => hx.le", 4).unwrap();
    assert_eq!(text, "positivity");
    let entry = engine.stack().find_by_name("hx").unwrap();
    assert_eq!(entry.tag, EntryTag::Fun);
    assert_eq!(entry.depth, 4);
    assert_eq!(
        translate(&mut engine, "exact hx", 4).unwrap(),
        "finally, we conclude by positivity"
    );
}

#[test]
fn test_fun_inside_brackets_takes_line_depth() {
    let fixture = Fixture::new(&[]);
    let mut engine = fixture.engine();
    translate(&mut engine, "apply (ok fun hy => hy)", 6).unwrap();
    assert_eq!(engine.stack().find_by_name("hy").unwrap().depth, 6);
    engine.stack_mut().prune_to_depth(4);
    assert!(engine.stack().find_by_name("hy").is_none());
}

#[test]
fn test_identifier_resolution() {
    let fixture = Fixture::new(&[]);
    let mut engine = fixture.engine();
    translate(&mut engine, "have h1 : a > 0 := by simp", 0).unwrap();
    translate(&mut engine, "have h2 : b > 0 := by simp", 0).unwrap();
    translate(&mut engine, "let c := 1", 0).unwrap();

    let text = translate(&mut engine, "linarith h1 h2 c", 2).unwrap();
    assert_eq!(text, "linarith and a > 0 and b > 0 c");
    assert_eq!(engine.resolve_identifiers(&text, &[]), text);
}

#[test]
fn test_scopes_close_on_dedent() {
    let fixture = Fixture::new(&[]);
    let mut engine = fixture.engine();
    translate(&mut engine, "have inner : p := by simp", 4).unwrap();
    assert_eq!(translate(&mut engine, "done inner", 4).unwrap(), "done and p");
    assert_eq!(translate(&mut engine, "done inner", 2).unwrap(), "done inner");
}

#[test]
fn test_nested_interiors_are_translated() {
    let fixture = Fixture::new(&[("≤", "at most", 0)]);
    let mut engine = fixture.engine();
    assert_eq!(
        engine.tokenize_line("f (n ≤ (m ≤ 5))", 0).unwrap(),
        vec!["f", "(n at most (m at most 5))"]
    );
    assert!(matches!(
        engine.tokenize_line("(((((((((x)))))))))", 0),
        Err(NarrationError::NestingTooDeep { limit: 8 })
    ));
}
