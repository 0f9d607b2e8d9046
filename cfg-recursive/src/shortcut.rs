//! Structural shortcuts propose how to split the input for one alternative.
//!
//! A proposal is only a guess. The matcher checks every piece with the
//! general algorithm and falls back to the full search when any piece
//! fails, so a shortcut can make a search faster, but can't change its
//! verdict. It can change which derivation is reported.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Range;
use std::sync::Arc;

use cfg_grammar::Cfg;
use cfg_symbol::Symbol;

/// A partition of the input for one alternative.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Proposal {
    /// Index of the alternative among the LHS's alternatives.
    pub alternative: usize,
    /// Byte range of the input for each symbol of the alternative, in
    /// order. The ranges must be contiguous and cover the input.
    pub pieces: Vec<Range<usize>>,
}

/// Proposes partitions of the input.
pub trait StructuralShortcut: Send + Sync {
    /// Proposes a partition of `input` for one of the alternatives of
    /// `lhs`, or `None` to leave it to the general search.
    fn propose(&self, grammar: &Cfg, lhs: Symbol, input: &str) -> Option<Proposal>;
}

/// Shortcuts keyed by nonterminal.
#[derive(Clone, Default)]
pub struct Shortcuts {
    entries: Vec<(Option<Symbol>, Arc<dyn StructuralShortcut>)>,
}

impl Shortcuts {
    /// Creates an empty set of shortcuts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a shortcut for one nonterminal.
    pub fn insert<S>(&mut self, lhs: Symbol, shortcut: S) -> &mut Self
    where
        S: StructuralShortcut + 'static,
    {
        self.entries.push((Some(lhs), Arc::new(shortcut)));
        self
    }

    /// Registers a shortcut for every nonterminal.
    pub fn insert_for_all<S>(&mut self, shortcut: S) -> &mut Self
    where
        S: StructuralShortcut + 'static,
    {
        self.entries.push((None, Arc::new(shortcut)));
        self
    }

    /// Iterates over shortcuts that apply to the nonterminal, in order of
    /// registration.
    pub fn for_symbol(&self, lhs: Symbol) -> impl Iterator<Item = &dyn StructuralShortcut> {
        self.entries
            .iter()
            .filter(move |(key, _)| key.map_or(true, |key| key == lhs))
            .map(|(_, shortcut)| &**shortcut)
    }

    /// Whether no shortcuts are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Identifies the registered shortcuts. Clones share an identity, and
    /// so do all empty sets. Sets built from separate registrations
    /// differ even when the shortcuts are of the same type, as long as
    /// both are alive.
    pub fn identity(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        for (lhs, shortcut) in &self.entries {
            lhs.hash(&mut hasher);
            (Arc::as_ptr(shortcut) as *const () as usize).hash(&mut hasher);
        }
        hasher.finish()
    }
}

impl fmt::Debug for Shortcuts {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Shortcuts")
            .field("len", &self.entries.len())
            .finish()
    }
}

/// Splits the input on the terminals of an alternative.
///
/// Each terminal is found at its leftmost occurrence after the previous
/// piece, except that a terminal ending the alternative is anchored at the
/// end of the input. At most one nonterminal may stand between two
/// terminals; alternatives with more, or with no terminals, are skipped.
#[derive(Clone, Copy, Debug, Default)]
pub struct AnchoredShortcut;

impl StructuralShortcut for AnchoredShortcut {
    fn propose(&self, grammar: &Cfg, lhs: Symbol, input: &str) -> Option<Proposal> {
        grammar
            .alternatives(lhs)
            .enumerate()
            .find_map(|(alternative, alt)| {
                anchored_pieces(grammar, alt.symbols(), input).map(|pieces| Proposal {
                    alternative,
                    pieces,
                })
            })
    }
}

fn anchored_pieces(grammar: &Cfg, syms: &[Symbol], input: &str) -> Option<Vec<Range<usize>>> {
    if syms.len() < 2 || !syms.iter().any(|&sym| grammar.is_terminal(sym)) {
        return None;
    }
    let mut pieces = Vec::with_capacity(syms.len());
    let mut cursor = 0;
    let mut pending = false;
    for (i, &sym) in syms.iter().enumerate() {
        let Some(literal) = grammar.literal(sym) else {
            if pending {
                return None;
            }
            pending = true;
            continue;
        };
        let rest = &input[cursor..];
        let at = if !pending {
            if !rest.starts_with(literal) {
                return None;
            }
            cursor
        } else if i == syms.len() - 1 {
            if !rest.ends_with(literal) {
                return None;
            }
            input.len() - literal.len()
        } else {
            cursor + rest.find(literal)?
        };
        if pending {
            pieces.push(cursor..at);
            pending = false;
        }
        pieces.push(at..at + literal.len());
        cursor = at + literal.len();
    }
    if pending {
        pieces.push(cursor..input.len());
    } else if cursor != input.len() {
        return None;
    }
    Some(pieces)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grammar() -> (Cfg, Symbol) {
        let mut cfg = Cfg::new();
        let [s, e, t] = ["S", "E", "T"].map(|name| cfg.nonterminal(name));
        let [open, close, plus] = ["(", ")", "+"].map(|lit| cfg.terminal(lit));
        cfg.rule(s).rhs([open, e, close]).rhs([e, plus, t]).rhs([e, t]);
        (cfg, s)
    }

    #[test]
    fn test_anchored_at_both_ends() {
        let (cfg, s) = grammar();
        let proposal = AnchoredShortcut.propose(&cfg, s, "(a)(b)").unwrap();
        assert_eq!(proposal.alternative, 0);
        assert_eq!(proposal.pieces, vec![0..1, 1..5, 5..6]);
    }

    #[test]
    fn test_leftmost_anchor() {
        let (cfg, s) = grammar();
        let proposal = AnchoredShortcut.propose(&cfg, s, "a+b+c").unwrap();
        assert_eq!(proposal.alternative, 1);
        assert_eq!(proposal.pieces, vec![0..1, 1..2, 2..5]);
    }

    #[test]
    fn test_no_anchor() {
        let (cfg, s) = grammar();
        assert_eq!(AnchoredShortcut.propose(&cfg, s, "ab"), None);
    }
}
