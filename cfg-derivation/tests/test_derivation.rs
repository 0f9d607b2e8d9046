use cfg_derivation::{Derivation, DerivationStep, RecognitionResult, RecognizeError, Verdict};
use cfg_symbol::SymbolName;
use test_case::test_case;

fn name(s: &str) -> SymbolName {
    SymbolName::from(s)
}

// S → a S b | ε, deriving "ab".
fn derivation() -> Derivation {
    vec![
        DerivationStep::Start { root: name("S") },
        DerivationStep::Expansion {
            lhs: name("S"),
            rhs: vec![name("a"), name("S"), name("b")],
        },
        DerivationStep::TerminalMatch {
            terminal: name("a"),
            text: "a".to_string(),
        },
        DerivationStep::EpsilonMatch { lhs: name("S") },
        DerivationStep::TerminalMatch {
            terminal: name("b"),
            text: "b".to_string(),
        },
    ]
    .into()
}

#[test]
fn test_legacy_triples() {
    let rows: Vec<_> = derivation()
        .iter()
        .map(|step| (step.rule(), step.application(), step.result()))
        .collect();
    let expected = [
        ("Start → S", "Start", "S"),
        ("S → a S b", "S", "a S b"),
        ("Terminal match", "a", "a"),
        ("S → ε", "S", "ε"),
        ("Terminal match", "b", "b"),
    ];
    assert_eq!(rows.len(), expected.len());
    for (row, (rule, application, result)) in rows.iter().zip(expected) {
        assert_eq!((&row.0[..], &row.1[..], &row.2[..]), (rule, application, result));
    }
}

#[test]
fn test_binary_and_unary_rendering() {
    let binary = DerivationStep::BinaryExpansion {
        lhs: name("S"),
        left: name("A"),
        right: name("B"),
    };
    assert_eq!(binary.rule(), "S → A B");
    let unary = DerivationStep::UnaryExpansion {
        lhs: name("A"),
        rhs: name("a"),
    };
    assert_eq!(unary.rule(), "A → a");
    let empty = DerivationStep::Expansion {
        lhs: name("A"),
        rhs: vec![],
    };
    assert_eq!(empty.result(), "ε");
}

#[test]
fn test_leaves() {
    assert_eq!(derivation().leaves(), vec!["a", "b"]);
    assert!(Derivation::new().leaves().is_empty());
}

#[test]
fn test_sentential_forms() {
    assert_eq!(
        derivation().sentential_forms(),
        vec!["S", "a S b", "a S b", "a b", "a b"]
    );
}

#[test]
fn test_sentential_forms_to_empty() {
    let derivation: Derivation = vec![
        DerivationStep::Start { root: name("S") },
        DerivationStep::EpsilonMatch { lhs: name("S") },
    ]
    .into();
    assert_eq!(derivation.sentential_forms(), vec!["S", "ε"]);
}

#[test_case(RecognitionResult::accepted(Derivation::new()), Verdict::Accepted ; "accepted")]
#[test_case(RecognitionResult::rejected(), Verdict::Rejected ; "rejected")]
#[test_case(RecognitionResult::incomplete(), Verdict::Incomplete ; "incomplete")]
fn test_verdict(result: RecognitionResult, verdict: Verdict) {
    assert_eq!(result.verdict(), verdict);
}

#[test]
fn test_verdict_display() {
    assert_eq!(Verdict::Incomplete.to_string(), "incomplete (timeout)");
}

#[test]
fn test_error_display() {
    let err = RecognizeError::UndefinedStart("S".to_string());
    assert_eq!(err.to_string(), "start symbol `S` is not defined by any rule");
}
