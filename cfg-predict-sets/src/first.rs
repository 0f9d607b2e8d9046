//! FIRST sets over characters.

use std::collections::{BTreeMap, BTreeSet};

use cfg_grammar::{Cfg, SymbolBitSet};
use cfg_symbol::Symbol;

/// The set of characters that can begin a non-empty string.
pub type FirstChars = BTreeSet<char>;

/// Collector of character FIRST sets.
#[derive(Clone, Debug)]
pub struct FirstSets {
    map: BTreeMap<Symbol, FirstChars>,
    changed: bool,
}

impl FirstSets {
    /// Compute all FIRST sets of the grammar.
    ///
    /// We define a binary relation FIRST(N, S), in which N is related to S
    /// if the grammar has a production of the form `N ⸬= α S β`, where
    /// α is a nullable string of symbols. A terminal contributes the first
    /// character of its literal.
    ///
    /// We compute the transitive closure of this relation.
    pub fn new(grammar: &Cfg, nullable: &SymbolBitSet) -> Self {
        let mut this = FirstSets {
            map: BTreeMap::new(),
            changed: true,
        };

        this.collect_from(grammar, nullable);
        this
    }

    /// Returns the FIRST set of a nonterminal, or `None` when nothing
    /// non-empty is known to start with it.
    pub fn get(&self, sym: Symbol) -> Option<&FirstChars> {
        self.map.get(&sym)
    }

    /// Returns a reference to all FIRST sets.
    pub fn first_sets(&self) -> &BTreeMap<Symbol, FirstChars> {
        &self.map
    }

    /// Calculates the FIRST set for a string of symbols.
    pub fn first_set_for_string(
        &self,
        grammar: &Cfg,
        nullable: &SymbolBitSet,
        string: &[Symbol],
    ) -> FirstChars {
        let mut result = FirstChars::new();
        for &sym in string {
            match grammar.literal(sym) {
                Some(literal) => {
                    if let Some(ch) = literal.chars().next() {
                        result.insert(ch);
                    }
                }
                None => {
                    if let Some(set) = self.map.get(&sym) {
                        result.extend(set.iter().copied());
                    }
                }
            }
            if !nullable[sym] {
                break;
            }
        }
        result
    }

    fn collect_from(&mut self, grammar: &Cfg, nullable: &SymbolBitSet) {
        while self.changed {
            self.changed = false;
            for rule in grammar.rules() {
                let lookahead = self.first_set_for_string(grammar, nullable, rule.rhs.symbols());
                if lookahead.is_empty() {
                    continue;
                }
                let first_set = self.map.entry(rule.lhs).or_default();
                let prev_cardinality = first_set.len();
                first_set.extend(lookahead);
                self.changed |= prev_cardinality != first_set.len();
            }
        }
    }
}
