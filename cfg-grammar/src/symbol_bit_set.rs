//! Sets of symbols in the form of bit vectors.

use std::{iter, ops};

use bit_vec::{self, BitVec};

use crate::local_prelude::*;

/// A set of symbols in the form of a bit vector.
///
/// The set grows on insertion. Symbols past its end are absent.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SymbolBitSet {
    bit_vec: BitVec,
}

/// An iterator over a symbol set.
pub struct Iter<'a> {
    iter: iter::Enumerate<bit_vec::Iter<'a>>,
}

impl SymbolBitSet {
    /// Constructs an empty `SymbolBitSet`.
    pub fn new() -> Self {
        SymbolBitSet {
            bit_vec: BitVec::new(),
        }
    }

    /// Constructs a `SymbolBitSet` covering all symbols of the grammar.
    pub fn from_elem(grammar: &Cfg, elem: bool) -> Self {
        SymbolBitSet {
            bit_vec: BitVec::from_elem(grammar.num_syms(), elem),
        }
    }

    /// Adds the symbols that derive a terminal string in one step: every
    /// terminal and every nulling symbol.
    pub fn productive(&mut self, grammar: &Cfg) {
        self.union(grammar.terminal_symbols());
        self.union(&grammar.nulling_symbols());
    }

    /// Adds or removes a symbol.
    pub fn set(&mut self, index: Symbol, elem: bool) {
        let idx = index.usize();
        if idx >= self.bit_vec.len() {
            if !elem {
                return;
            }
            self.bit_vec.grow(idx + 1 - self.bit_vec.len(), false);
        }
        self.bit_vec.set(idx, elem);
    }

    /// Iterates over symbols in the set.
    pub fn iter(&self) -> Iter {
        Iter {
            iter: self.bit_vec.iter().enumerate(),
        }
    }

    /// Adds every symbol of `other` to this set.
    pub fn union(&mut self, other: &SymbolBitSet) {
        if self.bit_vec.len() < other.bit_vec.len() {
            self.bit_vec
                .grow(other.bit_vec.len() - self.bit_vec.len(), false);
        }
        for sym in other.iter() {
            self.set(sym, true);
        }
    }

    /// Number of symbols this set has room for.
    pub fn len(&self) -> usize {
        self.bit_vec.len()
    }

    /// Whether the set has no room for any symbol.
    pub fn is_empty(&self) -> bool {
        self.bit_vec.is_empty()
    }

    /// Number of symbols in the set.
    pub fn count(&self) -> usize {
        self.iter().count()
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = Symbol;
    fn next(&mut self) -> Option<Self::Item> {
        for (id, is_present) in &mut self.iter {
            if is_present {
                return Some(Symbol::from(id));
            }
        }
        None
    }
}

static TRUE: bool = true;
static FALSE: bool = false;

impl ops::Index<Symbol> for SymbolBitSet {
    type Output = bool;

    fn index(&self, index: Symbol) -> &Self::Output {
        if self.bit_vec.get(index.usize()).unwrap_or(false) {
            &TRUE
        } else {
            &FALSE
        }
    }
}

impl FromIterator<Symbol> for SymbolBitSet {
    fn from_iter<I: IntoIterator<Item = Symbol>>(iter: I) -> Self {
        let mut set = SymbolBitSet::new();
        for sym in iter {
            set.set(sym, true);
        }
        set
    }
}
