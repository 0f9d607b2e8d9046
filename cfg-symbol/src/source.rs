//! Source

use std::sync::Arc;

use crate::Symbol;

/// The name of a symbol. Cheap to clone and shareable across threads.
pub type SymbolName = Arc<str>;

/// A source of numeric symbols. Each symbol may carry a name.
#[derive(Clone, Debug, Default)]
pub struct SymbolSource {
    names: Vec<Option<SymbolName>>,
}

impl SymbolSource {
    /// Creates a source of numeric symbols with an empty symbol space.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns generated, unnamed symbols.
    pub fn sym<const N: usize>(&mut self) -> [Symbol; N] {
        let mut result = [Symbol::default(); N];
        for dest in &mut result {
            *dest = self.next_sym(None);
        }
        result
    }

    /// Generates a new unique symbol.
    ///
    /// If a name is given, it will be recorded within the symbol
    /// source.
    pub fn next_sym(&mut self, name: Option<&str>) -> Symbol {
        let ret = Symbol::from(self.names.len());
        self.names.push(name.map(SymbolName::from));
        ret
    }

    /// Returns the number of symbols in use.
    pub fn num_syms(&self) -> usize {
        self.names.len()
    }

    /// Returns the name of the given symbol, if it has one.
    pub fn name_of(&self, sym: Symbol) -> Option<&str> {
        self.names.get(sym.usize()).and_then(|name| name.as_deref())
    }

    /// Returns the list of names, indexed by symbol ID.
    pub fn names(&self) -> &[Option<SymbolName>] {
        &self.names[..]
    }

    /// Iterates over all symbols generated so far.
    pub fn iter(&self) -> impl Iterator<Item = Symbol> {
        (0..self.num_syms()).map(Symbol::from)
    }

    /// Returns an endless iterator over symbols, starting from the first ID.
    ///
    /// Useful for zipping with per-symbol data such as bit vector rows.
    pub fn generate_fresh() -> impl Iterator<Item = Symbol> {
        (0usize..).map(Symbol::from)
    }
}
