//! Definitions of the context-free grammar type and its rules.

use std::collections::HashMap;
use std::fmt::{self, Write};
use std::sync::Arc;

use log::trace;

use crate::local_prelude::*;
use crate::occurence_map::OccurenceMap;
use crate::rule_builder::RuleBuilder;

/// Context-free grammar type.
///
/// A grammar maps each nonterminal to an ordered list of alternatives.
/// Terminals are literal strings. Symbols of both kinds are interned by
/// name, so the same name always yields the same symbol.
#[derive(Clone, Debug, Default)]
pub struct Cfg {
    /// The symbol source. Every symbol carries a name.
    sym_source: SymbolSource,
    /// The set of terminal symbols.
    lexemes: SymbolBitSet,
    /// The set of nonterminals that appear on the left-hand side of a rule.
    defined: SymbolBitSet,
    /// The array of rules, in declaration order.
    rules: Vec<CfgRule>,
    /// Rule indices by LHS symbol ID.
    lhs_index: Vec<Vec<usize>>,
    nonterminals: HashMap<SymbolName, Symbol>,
    terminals: HashMap<SymbolName, Symbol>,
    /// Counter for synthetic symbol names.
    gensym: usize,
}

/// The right-hand side of a rule.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Alternative {
    /// The empty string.
    Epsilon,
    /// A non-empty sequence of symbols.
    Symbols(Arc<[Symbol]>),
}

/// Standard grammar rule representation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CfgRule {
    /// The rule's left-hand side symbol.
    pub lhs: Symbol,
    /// The rule's right-hand side.
    pub rhs: Alternative,
}

/// Used only for [`fn rhs_closure`].
///
/// [`fn rhs_closure`]: Cfg::rhs_closure
#[derive(Eq, PartialEq, Clone, Copy)]
pub enum RhsPropertyMode {
    /// If **all** symbols on the RHS have the property,
    /// the LHS has it too.
    All,
    /// If **any** symbol on the RHS has the property,
    /// the LHS has it too.
    Any,
}

impl Alternative {
    /// Builds an alternative from a list of symbols. An empty list is `Epsilon`.
    pub fn new(syms: impl AsRef<[Symbol]>) -> Self {
        let syms = syms.as_ref();
        if syms.is_empty() {
            Alternative::Epsilon
        } else {
            Alternative::Symbols(syms.into())
        }
    }

    /// Returns the symbols of this alternative. Empty for `Epsilon`.
    pub fn symbols(&self) -> &[Symbol] {
        match self {
            Alternative::Epsilon => &[],
            Alternative::Symbols(syms) => &syms[..],
        }
    }

    /// Whether this is the epsilon alternative.
    pub fn is_epsilon(&self) -> bool {
        matches!(self, Alternative::Epsilon)
    }

    /// Number of symbols on the right-hand side.
    pub fn len(&self) -> usize {
        self.symbols().len()
    }

    /// Same as [`fn is_epsilon`].
    ///
    /// [`fn is_epsilon`]: Self::is_epsilon
    pub fn is_empty(&self) -> bool {
        self.is_epsilon()
    }
}

impl Cfg {
    /// Creates an empty context-free grammar.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the nonterminal with the given name, creating it when needed.
    pub fn nonterminal(&mut self, name: &str) -> Symbol {
        if let Some(&sym) = self.nonterminals.get(name) {
            return sym;
        }
        let sym = self.sym_source.next_sym(Some(name));
        self.nonterminals.insert(name.into(), sym);
        sym
    }

    /// Returns the terminal for the given literal, creating it when needed.
    pub fn terminal(&mut self, literal: &str) -> Symbol {
        if let Some(&sym) = self.terminals.get(literal) {
            return sym;
        }
        let sym = self.sym_source.next_sym(Some(literal));
        self.lexemes.set(sym, true);
        self.terminals.insert(literal.into(), sym);
        sym
    }

    /// Generates a fresh nonterminal that cannot be looked up by name.
    ///
    /// Used for symbols introduced by grammar transformations.
    pub fn fresh_nonterminal(&mut self, hint: &str) -> Symbol {
        let name = format!("{}#{}", hint, self.gensym);
        self.gensym += 1;
        self.sym_source.next_sym(Some(&name[..]))
    }

    /// Looks up a nonterminal by name.
    pub fn symbol(&self, name: &str) -> Option<Symbol> {
        self.nonterminals.get(name).copied()
    }

    /// Looks up a terminal by its literal.
    pub fn terminal_symbol(&self, literal: &str) -> Option<Symbol> {
        self.terminals.get(literal).copied()
    }

    /// Returns the name of a symbol. For terminals, this is the literal.
    pub fn name(&self, sym: Symbol) -> &str {
        self.sym_source.name_of(sym).unwrap_or("?")
    }

    /// Returns the name of a symbol as a cheaply cloned handle.
    pub fn shared_name(&self, sym: Symbol) -> SymbolName {
        self.sym_source
            .names()
            .get(sym.usize())
            .and_then(|name| name.clone())
            .unwrap_or_else(|| SymbolName::from("?"))
    }

    /// Returns the literal of a terminal, or `None` for a nonterminal.
    pub fn literal(&self, sym: Symbol) -> Option<&str> {
        if self.is_terminal(sym) {
            self.sym_source.name_of(sym)
        } else {
            None
        }
    }

    /// Whether the symbol is a terminal.
    pub fn is_terminal(&self, sym: Symbol) -> bool {
        self.lexemes[sym]
    }

    /// Whether the symbol appears on the left-hand side of some rule.
    pub fn is_defined(&self, sym: Symbol) -> bool {
        self.defined[sym]
    }

    /// Returns the number of symbols in use.
    pub fn num_syms(&self) -> usize {
        self.sym_source.num_syms()
    }

    /// Allows access to the symbol source through a reference.
    pub fn sym_source(&self) -> &SymbolSource {
        &self.sym_source
    }

    /// Returns the set of terminal symbols.
    pub fn terminal_symbols(&self) -> &SymbolBitSet {
        &self.lexemes
    }

    /// Iterates over all nonterminals, defined or not.
    pub fn nonterminal_symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.sym_source.iter().filter(move |&sym| !self.is_terminal(sym))
    }

    /// Iterates over nonterminals that have at least one rule, in order of
    /// their first declaration.
    pub fn defined_symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        let mut seen = SymbolBitSet::new();
        self.rules.iter().filter_map(move |rule| {
            if seen[rule.lhs] {
                None
            } else {
                seen.set(rule.lhs, true);
                Some(rule.lhs)
            }
        })
    }

    /// Marks a nonterminal as defined, even if it has no alternatives yet.
    pub fn declare(&mut self, lhs: Symbol) {
        debug_assert!(!self.is_terminal(lhs), "a terminal cannot be a rule's LHS");
        self.defined.set(lhs, true);
    }

    /// Starts building a new rule.
    pub fn rule(&mut self, lhs: Symbol) -> RuleBuilder<'_> {
        RuleBuilder::new(self).rule(lhs)
    }

    /// Adds a rule to the grammar.
    pub fn add_rule(&mut self, rule: CfgRule) {
        self.declare(rule.lhs);
        let idx = rule.lhs.usize();
        if self.lhs_index.len() <= idx {
            self.lhs_index.resize(idx + 1, vec![]);
        }
        self.lhs_index[idx].push(self.rules.len());
        self.rules.push(rule);
    }

    /// Returns an iterator over the list of grammar rules.
    pub fn rules(&self) -> impl Iterator<Item = &CfgRule> {
        self.rules.iter()
    }

    /// Returns the alternatives of the given nonterminal in declaration order.
    pub fn alternatives(&self, lhs: Symbol) -> impl Iterator<Item = &Alternative> {
        self.lhs_index
            .get(lhs.usize())
            .map(|indices| &indices[..])
            .unwrap_or(&[])
            .iter()
            .map(move |&i| &self.rules[i].rhs)
    }

    /// Returns the length of the longest right-hand side.
    pub fn max_rhs_len(&self) -> usize {
        self.rules.iter().map(|rule| rule.rhs.len()).max().unwrap_or(0)
    }

    /// Returns the set of symbols that derive the empty string in one step:
    /// left-hand sides of epsilon rules, and terminals with an empty literal.
    pub fn nulling_symbols(&self) -> SymbolBitSet {
        let mut set = SymbolBitSet::from_elem(self, false);
        for rule in self.rules() {
            if rule.rhs.is_epsilon() {
                set.set(rule.lhs, true);
            }
        }
        for (literal, &sym) in &self.terminals {
            if literal.is_empty() {
                set.set(sym, true);
            }
        }
        set
    }

    /// If **all** symbols on the RHS have the property, the LHS has it too.
    /// Updates the given symbol set according to the above, and does it
    /// transitively.
    pub fn rhs_closure_for_all(&self, property: &mut SymbolBitSet) {
        self.rhs_closure(property, RhsPropertyMode::All)
    }

    /// If **any** symbols on the RHS have the property, the LHS has it too.
    /// Updates the given symbol set according to the above, and does it
    /// transitively.
    pub fn rhs_closure_for_any(&self, property: &mut SymbolBitSet) {
        self.rhs_closure(property, RhsPropertyMode::Any)
    }

    /// If **any** or **all** symbols on the RHS have the property, the LHS
    /// has it too.
    /// Updates the given symbol set according to the above, and does it
    /// transitively.
    pub fn rhs_closure(&self, property: &mut SymbolBitSet, property_mode: RhsPropertyMode) {
        let mut work_stack: Vec<Symbol> = property.iter().collect();

        let occurence_map = OccurenceMap::from_rules(self.rules());

        while let Some(work_sym) = work_stack.pop() {
            for &rule_id in occurence_map.get(work_sym).rhs() {
                let rule = &self.rules[rule_id];
                let mut rhs_iter = rule.rhs.symbols().iter();
                let get_property = |&sym: &Symbol| property[sym];
                let rhs_satifies_property = match property_mode {
                    RhsPropertyMode::All => rhs_iter.all(get_property),
                    RhsPropertyMode::Any => rhs_iter.any(get_property),
                };
                if !property[rule.lhs] && rhs_satifies_property {
                    property.set(rule.lhs, true);
                    work_stack.push(rule.lhs);
                }
            }
        }
    }

    /// Returns a weakly equivalent grammar where every right-hand side has
    /// at most two symbols. Epsilon alternatives are kept.
    ///
    /// Rewrites `LHS ⸬= A B C … X Y Z` to:
    /// ____________________
    /// | LHS ⸬= S0  Z
    /// | S0  ⸬= S1  Y
    /// | S1  ⸬= S2  X
    /// | …
    /// | Sn  ⸬= A   B
    pub fn binarize(&self) -> Cfg {
        let mut result = self.clone();
        result.rules.clear();
        result.lhs_index.clear();
        for rule in self.rules() {
            let rhs = rule.rhs.symbols();
            if rhs.len() <= 2 {
                result.add_rule(rule.clone());
                continue;
            }
            let lhs_name = self.name(rule.lhs).to_string();
            let mut lhs = rule.lhs;
            let mut tail = rhs.len();
            while tail > 2 {
                let next = result.fresh_nonterminal(&lhs_name);
                result.add_rule(CfgRule {
                    lhs,
                    rhs: Alternative::new([next, rhs[tail - 1]]),
                });
                lhs = next;
                tail -= 1;
            }
            result.add_rule(CfgRule {
                lhs,
                rhs: Alternative::new(&rhs[..2]),
            });
        }
        trace!(
            "binarized {} rules into {} rules",
            self.rules.len(),
            result.rules.len()
        );
        result
    }

    /// Formats the grammar to a `String`. The output looks like this:
    ///
    /// ```ignore
    /// S → "a" S | ε
    /// A → x y
    /// ```
    ///
    /// Alternatives of one nonterminal are joined on a single line, in
    /// declaration order.
    pub fn stringify_to_bnf(&self) -> String {
        let mut result = String::new();
        for lhs in self.defined_symbols() {
            let alternatives = self
                .alternatives(lhs)
                .map(|alt| self.stringify_alternative(alt))
                .collect::<Vec<_>>()
                .join(" | ");
            writeln!(&mut result, "{} → {}", self.name(lhs), alternatives)
                .expect("writing to String failed");
        }
        result
    }

    /// Formats a single right-hand side, quoting terminals where needed.
    pub fn stringify_alternative(&self, alternative: &Alternative) -> String {
        match alternative {
            Alternative::Epsilon => "ε".to_string(),
            Alternative::Symbols(syms) => syms
                .iter()
                .map(|&sym| self.stringify_sym(sym))
                .collect::<Vec<_>>()
                .join(" "),
        }
    }

    /// Formats one symbol, quoting a terminal if it would be read back as
    /// something else.
    pub fn stringify_sym(&self, sym: Symbol) -> String {
        let name = self.name(sym);
        if self.is_terminal(sym) && self.needs_quotes(name) {
            let mut quoted = String::with_capacity(name.len() + 2);
            quoted.push('"');
            for ch in name.chars() {
                if ch == '"' || ch == '\\' {
                    quoted.push('\\');
                }
                quoted.push(ch);
            }
            quoted.push('"');
            quoted
        } else {
            name.to_string()
        }
    }

    fn needs_quotes(&self, literal: &str) -> bool {
        literal.is_empty()
            || self.nonterminals.contains_key(literal)
            || literal == "ε"
            || literal == "None"
            || literal.contains(|ch: char| ch.is_whitespace() || ch == '|' || ch == '"')
            || looks_like_nonterminal(literal)
    }
}

/// The naming convention for nonterminals that are used before any rule
/// defines them: at least two characters, at least one uppercase ASCII
/// letter and no lowercase letter.
pub fn looks_like_nonterminal(token: &str) -> bool {
    token.chars().count() >= 2
        && token.chars().any(|ch| ch.is_ascii_uppercase())
        && !token.chars().any(|ch| ch.is_lowercase())
}

impl fmt::Display for Cfg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.stringify_to_bnf())
    }
}

impl CfgRule {
    /// Creates a new rule.
    pub fn new(lhs: Symbol, rhs: impl AsRef<[Symbol]>) -> Self {
        CfgRule {
            lhs,
            rhs: Alternative::new(rhs),
        }
    }
}
