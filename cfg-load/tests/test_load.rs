use cfg_grammar::{Alternative, Cfg};
use cfg_load::{CfgLoadExt, LoadOptions, LoadWarning};
use test_case::test_case;

fn alternatives(cfg: &Cfg, lhs: &str) -> Vec<String> {
    let lhs = cfg.symbol(lhs).expect("nonterminal not found");
    cfg.alternatives(lhs)
        .map(|alt| cfg.stringify_alternative(alt))
        .collect()
}

#[test]
fn test_load() {
    let loaded = Cfg::load(
        r#"
        S → a S b | ε
        T := x
    "#,
    );
    assert!(loaded.warnings.is_empty());
    let cfg = loaded.grammar;
    assert_eq!(cfg.rules().count(), 3);
    assert_eq!(alternatives(&cfg, "S"), vec!["a S b", "ε"]);
    assert_eq!(alternatives(&cfg, "T"), vec!["x"]);
    let a = cfg.terminal_symbol("a").unwrap();
    assert!(cfg.is_terminal(a));
}

#[test_case("S → a" ; "arrow")]
#[test_case("S := a" ; "colon equals")]
#[test_case("S ::= a" ; "bnf")]
#[test_case("S -> a" ; "ascii arrow")]
fn test_delimiters(text: &str) {
    let loaded = Cfg::load(text);
    assert!(loaded.warnings.is_empty());
    assert_eq!(alternatives(&loaded.grammar, "S"), vec!["a"]);
}

#[test_case("S → ε" ; "glyph")]
#[test_case("S → None" ; "none")]
#[test_case("S → " ; "empty")]
#[test_case("S → a |" ; "trailing pipe")]
fn test_epsilon_spellings(text: &str) {
    let cfg = Cfg::load(text).grammar;
    let s = cfg.symbol("S").unwrap();
    assert!(cfg.alternatives(s).any(Alternative::is_epsilon));
}

#[test]
fn test_continuation_lines() {
    let cfg = Cfg::load(
        "
        E →
          | E + T
          | T
        T → id
        E → ( E )
    ",
    )
    .grammar;
    assert_eq!(alternatives(&cfg, "E"), vec!["E + T", "T", "( E )"]);
    assert_eq!(alternatives(&cfg, "T"), vec!["id"]);
}

#[test]
fn test_forward_references() {
    let cfg = Cfg::load("S → A b\nA → a").grammar;
    let a = cfg.symbol("A").unwrap();
    assert!(!cfg.is_terminal(a));
    assert_eq!(cfg.terminal_symbol("A"), None);
}

#[test]
fn test_quoted_terminals() {
    let cfg = Cfg::load(r#"S → "S" "x y" "" "\"" ε"#).grammar;
    let s = cfg.symbol("S").unwrap();
    let alt: Vec<_> = cfg.alternatives(s).collect();
    assert_eq!(alt.len(), 1);
    let literals: Vec<_> = alt[0]
        .symbols()
        .iter()
        .map(|&sym| cfg.literal(sym).unwrap())
        .collect();
    assert_eq!(literals, vec!["S", "x y", "\""]);
}

#[test]
fn test_skipped_lines() {
    let loaded = Cfg::load(
        "
        # a comment
        // another comment
        S → a
        this line has no delimiter
        → b
        | c
    ",
    );
    assert_eq!(
        loaded.warnings,
        vec![
            LoadWarning::SkippedLine {
                line: 5,
                text: "this line has no delimiter".to_string()
            },
            LoadWarning::SkippedLine {
                line: 6,
                text: "→ b".to_string()
            },
        ]
    );
    // The continuation still attaches to `S`.
    assert_eq!(alternatives(&loaded.grammar, "S"), vec!["a", "c"]);
}

#[test]
fn test_continuation_without_production() {
    let loaded = Cfg::load("| a\nS → b");
    assert_eq!(
        loaded.warnings,
        vec![LoadWarning::SkippedLine {
            line: 1,
            text: "| a".to_string()
        }]
    );
}

#[test]
fn test_uppercase_heuristic() {
    let loaded = Cfg::load("S → EXPR A x\nS → EXPR");
    let cfg = &loaded.grammar;
    let expr = cfg.symbol("EXPR").unwrap();
    assert!(!cfg.is_terminal(expr));
    assert!(cfg.alternatives(expr).next().is_none());
    // Single letters stay terminals.
    assert!(cfg.terminal_symbol("A").is_some());
    assert_eq!(
        loaded.warnings,
        vec![LoadWarning::ImplicitNonterminal {
            name: "EXPR".to_string(),
            line: 1
        }]
    );

    let options = LoadOptions::default().uppercase_nonterminals(false);
    let cfg = Cfg::load_with("S → EXPR", &options).grammar;
    assert!(cfg.symbol("EXPR").is_none());
    assert!(cfg.terminal_symbol("EXPR").is_some());
}

#[test]
fn test_custom_epsilon_glyphs() {
    let options = LoadOptions::default().epsilon_glyphs(["eps"]);
    let cfg = Cfg::load_with("S → eps | ε", &options).grammar;
    let s = cfg.symbol("S").unwrap();
    let alts: Vec<_> = cfg.alternatives(s).collect();
    assert!(alts[0].is_epsilon());
    assert!(!alts[1].is_epsilon());
}

#[test]
fn test_roundtrip_through_display() {
    let text = "S → a S \"B C\" | ε\n";
    let cfg = Cfg::load(text).grammar;
    let reloaded = Cfg::load(&cfg.to_string()).grammar;
    assert_eq!(cfg.to_string(), reloaded.to_string());
    assert_eq!(cfg.to_string(), text);
}
