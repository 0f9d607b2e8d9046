//! Facts about a grammar that are computed once and consulted on every
//! recognition request.

use log::debug;

use cfg_grammar::{Cfg, SymbolBitSet};
use cfg_symbol::Symbol;
use cfg_symbol_bit_matrix::{CfgSymbolBitMatrixExt, ReachabilityMatrix};

use crate::first::{FirstChars, FirstSets};

/// Nullable, FIRST and productive sets of a grammar.
#[derive(Clone, Debug)]
pub struct GrammarAnalysis {
    nullable: SymbolBitSet,
    productive: SymbolBitSet,
    first: FirstSets,
    reachability: ReachabilityMatrix,
    defined: Vec<Symbol>,
    undefined: Vec<Symbol>,
}

impl GrammarAnalysis {
    /// Analyzes the grammar.
    pub fn new(grammar: &Cfg) -> Self {
        let mut nullable = grammar.nulling_symbols();
        grammar.rhs_closure_for_all(&mut nullable);

        let mut productive = SymbolBitSet::new();
        productive.productive(grammar);
        grammar.rhs_closure_for_all(&mut productive);

        let first = FirstSets::new(grammar, &nullable);
        let reachability = grammar.reachability_matrix().reflexive();
        let defined: Vec<Symbol> = grammar.defined_symbols().collect();
        let undefined: Vec<Symbol> = grammar
            .nonterminal_symbols()
            .filter(|&sym| grammar.alternatives(sym).next().is_none())
            .collect();

        debug!(
            "analyzed grammar: {} nonterminals, {} nullable, {} productive, {} without rules",
            defined.len(),
            defined.iter().filter(|&&sym| nullable[sym]).count(),
            defined.iter().filter(|&&sym| productive[sym]).count(),
            undefined.len(),
        );

        GrammarAnalysis {
            nullable,
            productive,
            first,
            reachability,
            defined,
            undefined,
        }
    }

    /// Whether the symbol derives the empty string.
    pub fn is_nullable(&self, sym: Symbol) -> bool {
        self.nullable[sym]
    }

    /// Whether the symbol derives at least one string of terminals.
    pub fn is_productive(&self, sym: Symbol) -> bool {
        self.productive[sym]
    }

    /// Returns the set of nullable symbols.
    pub fn nullable(&self) -> &SymbolBitSet {
        &self.nullable
    }

    /// Returns the characters that can begin a non-empty string derived
    /// from the nonterminal. An empty set means nothing is known.
    pub fn first_chars(&self, sym: Symbol) -> Option<&FirstChars> {
        self.first.get(sym)
    }

    /// Returns the FIRST sets.
    pub fn first_sets(&self) -> &FirstSets {
        &self.first
    }

    /// Decides cheaply that `sym` cannot derive `input`.
    ///
    /// Returns `Some(false)` when the nonterminal is unproductive, when the
    /// input is empty and the nonterminal is not nullable, or when the
    /// first character of the input is not in a non-empty FIRST set.
    /// Returns `None` when the full algorithm has to decide. Never returns
    /// `Some(true)`.
    pub fn quick_reject(&self, sym: Symbol, input: &str) -> Option<bool> {
        if !self.productive[sym] {
            return Some(false);
        }
        match input.chars().next() {
            None if !self.nullable[sym] => Some(false),
            None => None,
            Some(ch) => match self.first.get(sym) {
                Some(first) if !first.is_empty() && !first.contains(&ch) => Some(false),
                _ => None,
            },
        }
    }

    /// Lists defined nonterminals that can't be reached from `start`.
    pub fn unreachable(&self, start: Symbol) -> Vec<Symbol> {
        self.defined
            .iter()
            .copied()
            .filter(|&sym| !self.reachability.reaches(start, sym))
            .collect()
    }

    /// Lists nonterminals that are used, but have no alternatives.
    pub fn undefined(&self) -> &[Symbol] {
        &self.undefined[..]
    }
}
