use cfg_symbol::{Symbol, SymbolSource};

#[test]
fn test_repr() {
    assert_eq!(::std::mem::size_of::<Symbol>(), 4);
}

#[test]
fn test_repr_option_optimization() {
    assert_eq!(::std::mem::size_of::<Option<Symbol>>(), 4);
}

#[test]
fn test_usize_roundtrip() {
    let sym = Symbol::from(41usize);
    assert_eq!(sym.usize(), 41);
    assert_eq!(u32::from(sym), 41);
    assert_eq!(Symbol::first().usize(), 0);
}

#[test]
fn test_named_symbols() {
    let mut source = SymbolSource::new();
    let start = source.next_sym(Some("S"));
    let [anon] = source.sym();
    assert_eq!(source.num_syms(), 2);
    assert_eq!(source.name_of(start), Some("S"));
    assert_eq!(source.name_of(anon), None);
    assert_eq!(source.iter().collect::<Vec<_>>(), vec![start, anon]);
}
