//! Binarized rules are rules that have one or two symbols on the right-hand side.
//! A binarized grammar contains only such rules, and no epsilon rules.

use std::cmp::Ordering;
use std::collections::HashSet;

use log::trace;

use crate::local_prelude::*;

use self::BinarizedRuleRhs::*;

/// Representation for grammars where right-hand sides of all rules have one or two symbols.
///
/// Epsilon rules are eliminated. Each rule that was made shorter by the
/// elimination remembers which symbol was nulled.
#[derive(Clone, Debug)]
pub struct BinarizedCfg {
    /// The binarized grammar, which keeps names for all symbols, including
    /// the ones generated during binarization.
    grammar: Cfg,
    /// The array of rules.
    rules: Vec<BinarizedRule>,
    /// Symbols that derive the empty string.
    nullable: SymbolBitSet,
}

/// Compact representation of a binarized rule.
#[derive(Copy, Clone, Debug)]
pub struct BinarizedRule {
    lhs: Symbol,
    rhs: BinarizedRuleRhs,
    eliminated: Option<NullingEliminated>,
}

/// Compact representation of a binarized rule's RHS.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum BinarizedRuleRhs {
    /// RHS with one symbol.
    One([Symbol; 1]),
    /// RHS with two symbols.
    Two([Symbol; 2]),
}

/// Records a symbol removed from a two-symbol rule because it is nullable.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum NullingEliminated {
    /// `A ::= B C` became `A ::= C`, with `B` nulled.
    Left(Symbol),
    /// `A ::= B C` became `A ::= B`, with `C` nulled.
    Right(Symbol),
}

impl BinarizedCfg {
    /// Creates a BinarizedCfg by binarizing a context-free grammar and
    /// eliminating its nulling rules.
    ///
    /// The language represented by the grammar is preserved, except for the
    /// empty string. Whether the empty string is in the language can be read
    /// from [`fn is_nullable`].
    ///
    /// [`fn is_nullable`]: Self::is_nullable
    pub fn from_cfg(cfg: &Cfg) -> Self {
        let grammar = cfg.binarize();
        let mut nullable = grammar.nulling_symbols();
        grammar.rhs_closure_for_all(&mut nullable);

        let mut rules = Vec::with_capacity(grammar.rules().count() * 2);
        let mut seen = HashSet::new();
        let mut push = |rule: BinarizedRule| {
            if rule.rhs == One([rule.lhs]) {
                // A ::= A derives nothing new.
                return;
            }
            if seen.insert((rule.lhs, rule.rhs)) {
                rules.push(rule);
            }
        };
        for rule in grammar.rules() {
            match *rule.rhs.symbols() {
                [] => {}
                [single] => push(BinarizedRule {
                    lhs: rule.lhs,
                    rhs: One([single]),
                    eliminated: None,
                }),
                [left, right] => {
                    push(BinarizedRule {
                        lhs: rule.lhs,
                        rhs: Two([left, right]),
                        eliminated: None,
                    });
                    if nullable[left] {
                        push(BinarizedRule {
                            lhs: rule.lhs,
                            rhs: One([right]),
                            eliminated: Some(NullingEliminated::Left(left)),
                        });
                    }
                    if nullable[right] {
                        push(BinarizedRule {
                            lhs: rule.lhs,
                            rhs: One([left]),
                            eliminated: Some(NullingEliminated::Right(right)),
                        });
                    }
                }
                _ => unreachable!("binarize left a rule with more than two symbols"),
            }
        }
        trace!(
            "eliminated nulling rules: {} binarized rules, {} nullable symbols",
            rules.len(),
            nullable.count()
        );
        BinarizedCfg {
            grammar,
            rules,
            nullable,
        }
    }

    /// Returns the binarized grammar that this rule set was made from.
    ///
    /// It names every symbol, including symbols generated by binarization,
    /// and still contains the epsilon rules.
    pub fn grammar(&self) -> &Cfg {
        &self.grammar
    }

    /// Returns the list of rules.
    pub fn rules(&self) -> &[BinarizedRule] {
        &self.rules[..]
    }

    /// Whether the symbol derives the empty string.
    pub fn is_nullable(&self, sym: Symbol) -> bool {
        self.nullable[sym]
    }

    /// Returns the set of nullable symbols.
    pub fn nullable(&self) -> &SymbolBitSet {
        &self.nullable
    }

    /// Returns the number of symbols in use.
    pub fn num_syms(&self) -> usize {
        self.grammar.num_syms()
    }

    /// Sorts the rule array.
    pub fn sort(&mut self) {
        self.rules.sort();
    }
}

impl BinarizedRule {
    /// Returns the LHS.
    pub fn lhs(&self) -> Symbol {
        self.lhs
    }

    /// Returns the RHS.
    pub fn rhs(&self) -> BinarizedRuleRhs {
        self.rhs
    }

    /// Returns the first symbol.
    pub fn rhs0(&self) -> Symbol {
        match self.rhs {
            One(slice) => slice[0],
            Two(slice) => slice[0],
        }
    }

    /// Returns the second symbol, if present.
    pub fn rhs1(&self) -> Option<Symbol> {
        match self.rhs {
            One(_) => None,
            Two(slice) => Some(slice[1]),
        }
    }

    /// Returns the symbol nulled when this rule was created, if any.
    pub fn eliminated(&self) -> Option<NullingEliminated> {
        self.eliminated
    }
}

impl PartialEq for BinarizedRule {
    fn eq(&self, other: &Self) -> bool {
        (self.lhs, &self.rhs) == (other.lhs, &other.rhs)
    }
}

impl PartialOrd for BinarizedRule {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BinarizedRule {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.lhs, &self.rhs).cmp(&(other.lhs, &other.rhs))
    }
}

impl Eq for BinarizedRule {}
