use cfg_grammar::Cfg;
use cfg_predict_sets::GrammarAnalysis;
use cfg_symbol::Symbol;
use test_case::test_case;

struct Grammar {
    cfg: Cfg,
    s: Symbol,
    a: Symbol,
    b: Symbol,
    c: Symbol,
    dead: Symbol,
}

// S → A b | c S
// A → "a" | ε
// B → "xy" B | "b"
// C → A B
// DEAD → "d" DEAD
fn grammar() -> Grammar {
    let mut cfg = Cfg::new();
    let [s, a, b, c, dead] = ["S", "A", "B", "C", "DEAD"].map(|name| cfg.nonterminal(name));
    let [ta, tb, tc, td, txy] = ["a", "b", "c", "d", "xy"].map(|lit| cfg.terminal(lit));
    cfg.rule(s).rhs([a, tb]).rhs([tc, s])
        .rule(a).rhs([ta]).epsilon()
        .rule(b).rhs([txy, b]).rhs([tb])
        .rule(c).rhs([a, b])
        .rule(dead).rhs([td, dead]);
    Grammar { cfg, s, a, b, c, dead }
}

fn chars(s: &str) -> Vec<char> {
    s.chars().collect()
}

#[test]
fn test_first_sets() {
    let g = grammar();
    let analysis = GrammarAnalysis::new(&g.cfg);
    let first = |sym| {
        analysis
            .first_chars(sym)
            .map(|set| set.iter().copied().collect::<Vec<_>>())
            .unwrap_or_default()
    };
    assert_eq!(first(g.s), chars("abc"));
    assert_eq!(first(g.a), chars("a"));
    assert_eq!(first(g.b), chars("bx"));
    // Continues past the nullable `A`.
    assert_eq!(first(g.c), chars("abx"));
}

#[test]
fn test_nullable_and_productive() {
    let g = grammar();
    let analysis = GrammarAnalysis::new(&g.cfg);
    assert!(analysis.is_nullable(g.a));
    assert!(!analysis.is_nullable(g.s));
    assert!(!analysis.is_nullable(g.c));
    assert!(analysis.is_productive(g.s));
    assert!(!analysis.is_productive(g.dead));
}

#[test_case("", Some(false) ; "empty input, not nullable")]
#[test_case("b", None ; "first char matches")]
#[test_case("cb", None ; "first char matches recursion")]
#[test_case("z", Some(false) ; "first char outside FIRST")]
fn test_quick_reject_start(input: &str, expected: Option<bool>) {
    let g = grammar();
    let analysis = GrammarAnalysis::new(&g.cfg);
    assert_eq!(analysis.quick_reject(g.s, input), expected);
}

#[test]
fn test_quick_reject_nullable_and_unproductive() {
    let g = grammar();
    let analysis = GrammarAnalysis::new(&g.cfg);
    assert_eq!(analysis.quick_reject(g.a, ""), None);
    assert_eq!(analysis.quick_reject(g.dead, "d"), Some(false));
}

#[test]
fn test_quick_reject_never_accepts() {
    let g = grammar();
    let analysis = GrammarAnalysis::new(&g.cfg);
    for sym in [g.s, g.a, g.b, g.c, g.dead] {
        for input in ["", "a", "ab", "xyb", "cab", "zz"] {
            assert_ne!(analysis.quick_reject(sym, input), Some(true));
        }
    }
}

#[test]
fn test_diagnostics() {
    let g = grammar();
    let mut cfg = g.cfg;
    let missing = cfg.nonterminal("MISSING");
    let analysis = GrammarAnalysis::new(&cfg);
    assert_eq!(analysis.unreachable(g.s), vec![g.b, g.c, g.dead]);
    assert_eq!(analysis.undefined(), &[missing]);
    assert_eq!(analysis.quick_reject(missing, ""), Some(false));
}
