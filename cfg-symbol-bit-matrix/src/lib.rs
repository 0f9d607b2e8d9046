//! Matrices of relations between grammar symbols: reachability and unit
//! derivation.

#![deny(unsafe_code)]
#![deny(missing_docs)]

use std::ops::{self, Deref, DerefMut};

use bit_matrix::BitMatrix;
use log::trace;

use cfg_grammar::{BinarizedCfg, BinarizedRuleRhs, Cfg};
use cfg_symbol::{Symbol, SymbolSource};

/// A matrix that represents a relation `R(A, B)` between two symbols.
#[derive(Clone, Debug)]
pub struct SymbolBitMatrix {
    bit_matrix: BitMatrix,
}

/// A direct derivation matrix.
#[derive(Clone, Debug)]
pub struct DirectDerivationMatrix(SymbolBitMatrix);
/// A reachability matrix.
#[derive(Clone, Debug)]
pub struct ReachabilityMatrix(SymbolBitMatrix);
/// A unit derivation matrix. `(A, B)` is set when `A ⇒+ B` through
/// rules of the form `A ::= B` only.
#[derive(Clone, Debug)]
pub struct UnitDerivationMatrix(SymbolBitMatrix);

impl SymbolBitMatrix {
    fn new(num_syms: usize) -> Self {
        SymbolBitMatrix {
            bit_matrix: BitMatrix::new(num_syms, num_syms),
        }
    }

    fn set(&mut self, row: Symbol, col: Symbol, included: bool) {
        self.bit_matrix.set(row.usize(), col.usize(), included);
    }

    /// Returns the number of symbols this matrix relates.
    pub fn num_syms(&self) -> usize {
        self.bit_matrix.size().0
    }

    /// Creates an iterator over symbols which appear in the given row.
    pub fn iter_row_syms(&self, row: Symbol) -> impl Iterator<Item = Symbol> + '_ {
        self.bit_matrix
            .iter_row(row.usize())
            .zip(SymbolSource::generate_fresh())
            .filter_map(|(present, sym)| if present { Some(sym) } else { None })
    }

    /// Creates an iterator over symbols which appear in the given column.
    pub fn iter_col_syms(&self, col: Symbol) -> impl Iterator<Item = Symbol> + '_ {
        (0..self.num_syms())
            .zip(SymbolSource::generate_fresh())
            .filter_map(move |(row, sym)| {
                if self.bit_matrix[(row, col.usize())] {
                    Some(sym)
                } else {
                    None
                }
            })
    }
}

impl Deref for SymbolBitMatrix {
    type Target = BitMatrix;
    fn deref(&self) -> &Self::Target {
        &self.bit_matrix
    }
}

impl DerefMut for SymbolBitMatrix {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.bit_matrix
    }
}

impl Deref for DirectDerivationMatrix {
    type Target = SymbolBitMatrix;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Deref for ReachabilityMatrix {
    type Target = SymbolBitMatrix;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Deref for UnitDerivationMatrix {
    type Target = SymbolBitMatrix;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

static TRUE: bool = true;
static FALSE: bool = false;

impl ops::Index<(Symbol, Symbol)> for SymbolBitMatrix {
    type Output = bool;
    fn index(&self, index: (Symbol, Symbol)) -> &Self::Output {
        let (rows, cols) = self.bit_matrix.size();
        let (row, col) = (index.0.usize(), index.1.usize());
        if row < rows && col < cols && self.bit_matrix[(row, col)] {
            &TRUE
        } else {
            &FALSE
        }
    }
}

impl ReachabilityMatrix {
    /// A symbol is reachable from itself.
    pub fn reflexive(mut self) -> Self {
        self.0.reflexive_closure();
        self
    }

    /// Whether `to` is reachable from `from`.
    pub fn reaches(&self, from: Symbol, to: Symbol) -> bool {
        self.0[(from, to)]
    }
}

impl DirectDerivationMatrix {
    /// Returns the derivation matrix.
    pub fn reachability(mut self) -> ReachabilityMatrix {
        self.0.transitive_closure();
        ReachabilityMatrix(self.0)
    }
}

impl UnitDerivationMatrix {
    /// Iterates over symbols `A` such that `A ⇒+ sym` through unit rules.
    pub fn derived_by(&self, sym: Symbol) -> impl Iterator<Item = Symbol> + '_ {
        self.0.iter_col_syms(sym)
    }
}

/// Extension traits for building matrices that represent relation between symbols,
/// `R(A, B)` where `A`: [`Symbol`], `B`: [`Symbol`].
pub trait CfgSymbolBitMatrixExt {
    /// Creates the empty matrix of size `|S|x|S|` where `S`: set of symbols.
    fn empty_matrix(&self) -> SymbolBitMatrix;
    /// Computes the direct derivation matrix.
    fn direct_derivation_matrix(&self) -> DirectDerivationMatrix;
    /// Computes the reachability matrix.
    fn reachability_matrix(&self) -> ReachabilityMatrix {
        self.direct_derivation_matrix().reachability()
    }
    /// Computes the unit derivation matrix.
    ///
    /// A unit derivation is defined with a grammar rule such as:
    /// ```ignore
    /// A ::= B;
    /// ```
    fn unit_derivation_matrix(&self) -> UnitDerivationMatrix;
}

impl CfgSymbolBitMatrixExt for Cfg {
    fn empty_matrix(&self) -> SymbolBitMatrix {
        SymbolBitMatrix::new(self.num_syms())
    }

    fn direct_derivation_matrix(&self) -> DirectDerivationMatrix {
        let mut derivation = self.empty_matrix();

        for rule in self.rules() {
            for &sym in rule.rhs.symbols() {
                derivation.set(rule.lhs, sym, true);
            }
        }

        DirectDerivationMatrix(derivation)
    }

    fn unit_derivation_matrix(&self) -> UnitDerivationMatrix {
        let mut unit_derivation = self.empty_matrix();

        for rule in self.rules() {
            // A rule of form `A ::= A` is a self-loop, not a cycle.
            if let [single] = *rule.rhs.symbols() {
                if single != rule.lhs {
                    unit_derivation.set(rule.lhs, single, true);
                }
            }
        }

        unit_derivation.transitive_closure();
        UnitDerivationMatrix(unit_derivation)
    }
}

impl CfgSymbolBitMatrixExt for BinarizedCfg {
    fn empty_matrix(&self) -> SymbolBitMatrix {
        SymbolBitMatrix::new(self.num_syms())
    }

    fn direct_derivation_matrix(&self) -> DirectDerivationMatrix {
        let mut derivation = self.empty_matrix();

        for rule in self.rules() {
            derivation.set(rule.lhs(), rule.rhs0(), true);
            if let Some(rhs1) = rule.rhs1() {
                derivation.set(rule.lhs(), rhs1, true);
            }
        }

        DirectDerivationMatrix(derivation)
    }

    fn unit_derivation_matrix(&self) -> UnitDerivationMatrix {
        let mut unit_derivation = self.empty_matrix();
        let mut unit_rules = 0;

        for rule in self.rules() {
            if let BinarizedRuleRhs::One([single]) = rule.rhs() {
                if single != rule.lhs() {
                    unit_derivation.set(rule.lhs(), single, true);
                    unit_rules += 1;
                }
            }
        }

        trace!("closing {} unit rules", unit_rules);
        unit_derivation.transitive_closure();
        UnitDerivationMatrix(unit_derivation)
    }
}
