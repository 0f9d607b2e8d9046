//! Grammar rules can be built with the builder pattern.

use crate::local_prelude::*;

/// The rule builder.
pub struct RuleBuilder<'a> {
    lhs: Option<Symbol>,
    grammar: &'a mut Cfg,
}

impl<'a> RuleBuilder<'a> {
    /// Creates a rule builder.
    pub fn new(grammar: &'a mut Cfg) -> Self {
        RuleBuilder { lhs: None, grammar }
    }
}

impl<'a> RuleBuilder<'a> {
    /// Starts building a new rule with the given LHS.
    pub fn rule(mut self, lhs: Symbol) -> Self {
        self.grammar.declare(lhs);
        self.lhs = Some(lhs);
        self
    }

    /// Adds a rule alternative to the grammar. An empty RHS is an epsilon
    /// alternative.
    ///
    /// # Panics
    ///
    /// Panics if no LHS was given with [`fn rule`].
    ///
    /// [`fn rule`]: Self::rule
    pub fn rhs<S>(self, syms: S) -> Self
    where
        S: AsRef<[Symbol]>,
    {
        let lhs = self.lhs.expect("rule builder used without an LHS");
        self.grammar.add_rule(CfgRule::new(lhs, syms));
        self
    }

    /// Adds an epsilon alternative.
    pub fn epsilon(self) -> Self {
        let empty: [Symbol; 0] = [];
        self.rhs(empty)
    }
}
