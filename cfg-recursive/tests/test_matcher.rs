use std::time::Duration;

use cfg_derivation::{DerivationStep, RecognizeError, Verdict};
use cfg_grammar::Cfg;
use cfg_load::CfgLoadExt;
use cfg_predict_sets::GrammarAnalysis;
use cfg_recursive::{AnchoredShortcut, Proposal, RecursiveMatcher, Shortcuts, StructuralShortcut};
use cfg_symbol::Symbol;
use test_case::test_case;

struct Fixture {
    cfg: Cfg,
    analysis: GrammarAnalysis,
}

impl Fixture {
    fn new(text: &str) -> Self {
        let cfg = Cfg::load(text).grammar;
        let analysis = GrammarAnalysis::new(&cfg);
        Fixture { cfg, analysis }
    }

    fn matcher(&self) -> RecursiveMatcher<'_> {
        RecursiveMatcher::new(&self.cfg, &self.analysis)
    }

    fn start(&self) -> Symbol {
        self.cfg.symbol("S").unwrap()
    }

    fn verdict(&self, input: &str) -> Verdict {
        self.matcher().matches(self.start(), input).unwrap().verdict()
    }
}

#[test]
fn test_sequence_of_terminals() {
    let fixture = Fixture::new(r#"S → "a" "b""#);
    let result = fixture.matcher().matches(fixture.start(), "ab").unwrap();
    assert!(result.accepted);
    assert!(result.complete);
    assert_eq!(result.derivation.leaves(), vec!["a", "b"]);
    assert_eq!(fixture.verdict("ab c"), Verdict::Rejected);
}

#[test_case("", Verdict::Accepted ; "empty")]
#[test_case("aaa", Verdict::Accepted ; "three")]
#[test_case("aab", Verdict::Rejected ; "wrong last")]
fn test_right_recursion_with_epsilon(input: &str, verdict: Verdict) {
    let fixture = Fixture::new(r#"S → "a" S | ε"#);
    assert_eq!(fixture.verdict(input), verdict);
}

#[test_case("xz", Verdict::Accepted ; "x")]
#[test_case("yz", Verdict::Accepted ; "y")]
#[test_case("xy", Verdict::Rejected ; "no z")]
fn test_nonterminal_split(input: &str, verdict: Verdict) {
    let fixture = Fixture::new("S → A B\nA → x | y\nB → z");
    assert_eq!(fixture.verdict(input), verdict);
}

#[test]
fn test_undefined_start() {
    let fixture = Fixture::new("S → a");
    let mut cfg = fixture.cfg.clone();
    let q = cfg.nonterminal("Q");
    let analysis = GrammarAnalysis::new(&cfg);
    let result = RecursiveMatcher::new(&cfg, &analysis).matches(q, "a");
    assert_eq!(result, Err(RecognizeError::UndefinedStart("Q".to_string())));
}

#[test]
fn test_derivation_is_preorder() {
    let fixture = Fixture::new("S → A B\nA → x\nB → z | ε");
    let result = fixture.matcher().matches(fixture.start(), "x").unwrap();
    let rules: Vec<String> = result.derivation.iter().map(DerivationStep::rule).collect();
    assert_eq!(
        rules,
        vec!["Start → S", "S → A B", "A → x", "Terminal match", "B → ε"]
    );
    assert_eq!(
        result.derivation.sentential_forms().last().map(|s| &s[..]),
        Some("x")
    );
}

#[test]
fn test_no_derivation_when_untracked() {
    let fixture = Fixture::new("S → a S | a");
    let result = fixture
        .matcher()
        .track_derivation(false)
        .matches(fixture.start(), "aaa")
        .unwrap();
    assert!(result.accepted);
    assert!(result.derivation.is_empty());
}

#[test_case("a" ; "one")]
#[test_case("aaaa" ; "four")]
#[test_case("aab" ; "rejected")]
fn test_left_recursion_terminates(input: &str) {
    let fixture = Fixture::new("S → S a | a\nT → T T | S");
    let expected = !input.contains('b');
    assert_eq!(fixture.verdict(input) == Verdict::Accepted, expected);
    let t = fixture.cfg.symbol("T").unwrap();
    let result = fixture.matcher().matches(t, input).unwrap();
    assert_eq!(result.accepted, expected);
    assert!(result.complete);
}

#[test]
fn test_nullable_cycle() {
    // `S ⇒ A ⇒ S` with nothing consumed.
    let fixture = Fixture::new("S → A | b\nA → S | ε");
    assert_eq!(fixture.verdict(""), Verdict::Accepted);
    assert_eq!(fixture.verdict("b"), Verdict::Accepted);
    assert_eq!(fixture.verdict("bb"), Verdict::Rejected);
}

#[test]
fn test_memoization_is_transparent() {
    let fixture = Fixture::new(
        "S → S S | ( S ) | x | ε\n\
         T → T + T | T * T | ( T ) | n",
    );
    let t = fixture.cfg.symbol("T").unwrap();
    let inputs = ["", "x", "(x)", "x(x)", "((x)", "(()x)()", "xx)"];
    for input in inputs {
        let with = fixture.matcher().matches(fixture.start(), input).unwrap();
        let without = fixture
            .matcher()
            .memoize(false)
            .matches(fixture.start(), input)
            .unwrap();
        assert_eq!(with.verdict(), without.verdict(), "input {:?}", input);
    }
    for input in ["n", "n+n*n", "(n+n)*n", "n+", "(n"] {
        let with = fixture.matcher().matches(t, input).unwrap();
        let without = fixture.matcher().memoize(false).matches(t, input).unwrap();
        assert_eq!(with.verdict(), without.verdict(), "input {:?}", input);
    }
}

#[test]
fn test_idempotent() {
    let fixture = Fixture::new("S → A S | A\nA → a | a a");
    let first = fixture.matcher().matches(fixture.start(), "aaaaa").unwrap();
    let second = fixture.matcher().matches(fixture.start(), "aaaaa").unwrap();
    assert_eq!(first, second);
    assert!(first.accepted);
}

#[test]
fn test_timeout_gives_incomplete_result() {
    let fixture = Fixture::new("S → S S | a");
    let input = format!("{}b", "a".repeat(200));
    let result = fixture
        .matcher()
        .memoize(false)
        .time_budget(Some(Duration::from_millis(1)))
        .matches(fixture.start(), &input)
        .unwrap();
    assert_eq!(result.verdict(), Verdict::Incomplete);
    assert!(!result.accepted);
    assert!(!result.complete);
    assert!(result.derivation.is_empty());
}

#[test]
fn test_zero_budget() {
    let fixture = Fixture::new("S → a");
    let result = fixture
        .matcher()
        .time_budget(Some(Duration::ZERO))
        .matches(fixture.start(), "a")
        .unwrap();
    assert_eq!(result.verdict(), Verdict::Incomplete);
}

#[test_case("aaaa", Verdict::Accepted ; "within limit")]
#[test_case("aaab", Verdict::Rejected ; "rejected within limit")]
#[test_case("aaaaa", Verdict::Incomplete ; "past limit")]
fn test_depth_limit(input: &str, verdict: Verdict) {
    let fixture = Fixture::new(r#"S → "a" S | ε"#);
    let result = fixture
        .matcher()
        .depth_limit(5)
        .matches(fixture.start(), input)
        .unwrap();
    assert_eq!(result.verdict(), verdict);
}

#[test]
fn test_deep_nesting_gives_incomplete_result() {
    let fixture = Fixture::new(r#"S → "a" S | ε"#);
    let input = "a".repeat(10_000);
    let result = fixture.matcher().matches(fixture.start(), &input).unwrap();
    assert_eq!(result.verdict(), Verdict::Incomplete);
    assert!(result.derivation.is_empty());

    let shallow = "a".repeat(500);
    assert_eq!(fixture.verdict(&shallow), Verdict::Accepted);
}

#[test]
fn test_multichar_terminals() {
    let fixture = Fixture::new(r#"S → if C then S | go
C → "x == y" | ok"#);
    assert_eq!(fixture.verdict("ifokthengo"), Verdict::Accepted);
    assert_eq!(fixture.verdict("ifx == ythengo"), Verdict::Accepted);
    assert_eq!(fixture.verdict("ifokthen"), Verdict::Rejected);
}

#[test]
fn test_anchored_shortcut_keeps_verdict() {
    let fixture = Fixture::new("S → ( S ) S | x | ε");
    let mut shortcuts = Shortcuts::new();
    shortcuts.insert_for_all(AnchoredShortcut);
    for input in ["", "x", "()", "(x)x", "(()())", "(()", "x(x)(", "((x)(x))x"] {
        let plain = fixture.matcher().matches(fixture.start(), input).unwrap();
        let fast = fixture
            .matcher()
            .shortcuts(&shortcuts)
            .matches(fixture.start(), input)
            .unwrap();
        assert_eq!(plain.verdict(), fast.verdict(), "input {:?}", input);
    }
}

struct WrongGuess;

impl StructuralShortcut for WrongGuess {
    fn propose(&self, _grammar: &Cfg, _lhs: Symbol, input: &str) -> Option<Proposal> {
        Some(Proposal {
            alternative: 0,
            pieces: vec![0..0, 0..input.len()],
        })
    }
}

#[test]
fn test_wrong_shortcut_falls_back() {
    let fixture = Fixture::new("S → A B\nA → a\nB → b");
    let s = fixture.start();
    let mut shortcuts = Shortcuts::new();
    shortcuts.insert(s, WrongGuess);
    let result = fixture
        .matcher()
        .shortcuts(&shortcuts)
        .matches(s, "ab")
        .unwrap();
    assert!(result.accepted);
    assert_eq!(result.derivation.leaves(), vec!["a", "b"]);
}

#[test]
fn test_first_set_soundness() {
    let fixture = Fixture::new("S → A c | d\nA → a A | ε | b");
    let s = fixture.start();
    for input in ["c", "ac", "aabc", "d", "bc"] {
        let result = fixture.matcher().matches(s, input).unwrap();
        assert!(result.accepted, "input {:?}", input);
        let first = input.chars().next().unwrap();
        assert!(fixture.analysis.first_chars(s).unwrap().contains(&first));
    }
}
