//! Maps each symbol to the rules it occurs in.

use std::collections::BTreeMap;

use crate::local_prelude::*;

type RuleIndex = usize;

/// Rule indices by symbol, split by the side of the rule the symbol
/// occurs on.
pub struct OccurenceMap {
    occurences: BTreeMap<Symbol, Occurences>,
    empty_occurences: Occurences,
}

/// Two `Vec`s of rule indices.
#[derive(Clone, Default)]
pub struct Occurences {
    lhs: Vec<RuleIndex>,
    rhs: Vec<RuleIndex>,
}

impl OccurenceMap {
    /// Indexes the given rules by position.
    pub fn from_rules<'a>(rules: impl Iterator<Item = &'a CfgRule>) -> Self {
        let mut occurences: BTreeMap<Symbol, Occurences> = BTreeMap::new();
        for (i, rule) in rules.enumerate() {
            occurences.entry(rule.lhs).or_default().lhs.push(i);
            let mut rhs_syms = rule.rhs.symbols().to_vec();
            rhs_syms.sort();
            rhs_syms.dedup();
            for rhs_sym in rhs_syms {
                occurences.entry(rhs_sym).or_default().rhs.push(i);
            }
        }
        OccurenceMap {
            occurences,
            empty_occurences: Occurences::default(),
        }
    }

    /// Returns the occurences of a symbol.
    pub fn get(&self, sym: Symbol) -> &Occurences {
        self.occurences.get(&sym).unwrap_or(&self.empty_occurences)
    }
}

impl Occurences {
    /// Rules that have the symbol as their LHS.
    pub fn lhs(&self) -> &[RuleIndex] {
        &self.lhs[..]
    }

    /// Rules that mention the symbol on their RHS, each listed once.
    pub fn rhs(&self) -> &[RuleIndex] {
        &self.rhs[..]
    }
}
