use cfg_grammar::{BinarizedCfg, Cfg};
use cfg_symbol_bit_matrix::CfgSymbolBitMatrixExt;

#[test]
fn test_reachability() {
    let mut cfg = Cfg::new();
    let [s, a, b, c] = ["S", "A", "B", "C"].map(|name| cfg.nonterminal(name));
    let x = cfg.terminal("x");
    cfg.rule(s).rhs([a, x])
        .rule(a).rhs([b])
        .rule(b).rhs([x])
        .rule(c).rhs([s]);

    let reachability = cfg.reachability_matrix().reflexive();
    assert!(reachability.reaches(s, s));
    assert!(reachability.reaches(s, b));
    assert!(reachability.reaches(s, x));
    assert!(!reachability.reaches(s, c));
    assert!(reachability.reaches(c, x));
    let from_s: Vec<_> = reachability.iter_row_syms(s).collect();
    assert_eq!(from_s, vec![s, a, b, x]);
}

#[test]
fn test_unit_derivation() {
    let mut cfg = Cfg::new();
    let [s, a, b] = ["S", "A", "B"].map(|name| cfg.nonterminal(name));
    let x = cfg.terminal("x");
    cfg.rule(s).rhs([a]).rhs([s])
        .rule(a).rhs([b]).rhs([a, b])
        .rule(b).rhs([x]);

    let units = cfg.unit_derivation_matrix();
    assert!(units[(s, a)]);
    assert!(units[(s, b)]);
    assert!(units[(s, x)]);
    assert!(units[(a, x)]);
    assert!(!units[(s, s)]);
    assert!(!units[(b, a)]);
    let mut derived_by_x: Vec<_> = units.derived_by(x).collect();
    derived_by_x.sort();
    assert_eq!(derived_by_x, vec![s, a, b]);
}

#[test]
fn test_unit_derivation_after_nulling_elimination() {
    let mut cfg = Cfg::new();
    let [s, a] = ["S", "A"].map(|name| cfg.nonterminal(name));
    let x = cfg.terminal("x");
    cfg.rule(s).rhs([a, x])
        .rule(a).rhs([x]).epsilon();

    let binarized = BinarizedCfg::from_cfg(&cfg);
    let units = binarized.unit_derivation_matrix();
    // `S ::= x` appears once `A` is nulled.
    assert!(units[(s, x)]);
    assert!(units[(a, x)]);
    assert!(!units[(s, a)]);
}
