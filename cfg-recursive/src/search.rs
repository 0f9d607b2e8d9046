//! One recognition call: the memo, the in-progress guard and the budgets.

use std::collections::HashMap;
use std::time::Instant;

use log::trace;

use cfg_derivation::DerivationStep;
use cfg_grammar::Alternative;
use cfg_symbol::Symbol;

use crate::matcher::RecursiveMatcher;
use crate::shortcut::Proposal;

/// Stack depth of the shallowest pair still under evaluation that a
/// failure depended on.
type Taint = usize;

/// The failure holds no matter what is still under evaluation.
const EXACT: Taint = usize::MAX;

/// Steps of a subtree, or the taint of a failure.
type Found = Result<Vec<DerivationStep>, Taint>;

pub(crate) struct Search<'m, 'a, 'i> {
    matcher: &'m RecursiveMatcher<'a>,
    memo: HashMap<(Symbol, &'i str), Found>,
    in_progress: HashMap<(Symbol, &'i str), usize>,
    depth: usize,
    deadline: Option<Instant>,
    timed_out: bool,
    too_deep: bool,
    calls: usize,
}

impl<'m, 'a, 'i> Search<'m, 'a, 'i> {
    pub(crate) fn new(matcher: &'m RecursiveMatcher<'a>, deadline: Option<Instant>) -> Self {
        Search {
            matcher,
            memo: HashMap::new(),
            in_progress: HashMap::new(),
            depth: 0,
            deadline,
            timed_out: false,
            too_deep: false,
            calls: 0,
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls
    }

    pub(crate) fn memo_len(&self) -> usize {
        self.memo.len()
    }

    pub(crate) fn timed_out(&self) -> bool {
        self.timed_out
    }

    /// Whether some pair was nested deeper than the matcher allows.
    pub(crate) fn too_deep(&self) -> bool {
        self.too_deep
    }

    /// Whether the search gave up, for lack of time or of stack.
    fn stopped(&self) -> bool {
        self.timed_out || self.too_deep
    }

    fn out_of_time(&mut self) -> bool {
        if !self.timed_out {
            if let Some(deadline) = self.deadline {
                self.timed_out = Instant::now() >= deadline;
            }
        }
        self.stopped()
    }

    /// Derives `input` from a single symbol.
    pub(crate) fn derive(&mut self, sym: Symbol, input: &'i str) -> Found {
        self.calls += 1;
        if self.out_of_time() {
            return Err(EXACT);
        }
        let grammar = self.matcher.grammar();
        if let Some(literal) = grammar.literal(sym) {
            return if input == literal {
                Ok(self.terminal_step(sym, input))
            } else {
                Err(EXACT)
            };
        }

        let key = (sym, input);
        if let Some(found) = self.memo.get(&key) {
            return found.clone();
        }
        if let Some(&depth) = self.in_progress.get(&key) {
            trace!("`{}` re-entered on {:?}", grammar.name(sym), input);
            return Err(depth);
        }
        if self.matcher.analysis().quick_reject(sym, input) == Some(false) {
            self.remember(key, Err(EXACT));
            return Err(EXACT);
        }

        let depth = self.depth;
        if depth >= self.matcher.max_depth() {
            trace!("`{}` nested {} deep, giving up", grammar.name(sym), depth);
            self.too_deep = true;
            return Err(EXACT);
        }
        self.depth += 1;
        self.in_progress.insert(key, depth);
        let found = match self.try_shortcuts(sym, input) {
            Some(steps) => Ok(steps),
            None => self.search_alternatives(sym, input),
        };
        self.in_progress.remove(&key);
        self.depth -= 1;

        // A failure that depended only on this pair, or on pairs deeper in
        // the stack, no longer depends on anything under evaluation.
        let found = match found {
            Err(taint) if taint >= depth => Err(EXACT),
            other => other,
        };
        if matches!(found, Ok(_) | Err(EXACT)) {
            self.remember(key, found.clone());
        }
        found
    }

    fn remember(&mut self, key: (Symbol, &'i str), found: Found) {
        if self.matcher.memoizes() && !self.stopped() {
            self.memo.insert(key, found);
        }
    }

    fn search_alternatives(&mut self, lhs: Symbol, input: &'i str) -> Found {
        let grammar = self.matcher.grammar();
        let mut taint = EXACT;
        for alternative in grammar.alternatives(lhs) {
            match self.derive_alternative(lhs, alternative, input) {
                Ok(steps) => return Ok(steps),
                Err(alt_taint) => taint = taint.min(alt_taint),
            }
            if self.stopped() {
                break;
            }
        }
        Err(taint)
    }

    fn derive_alternative(
        &mut self,
        lhs: Symbol,
        alternative: &'a Alternative,
        input: &'i str,
    ) -> Found {
        match alternative {
            Alternative::Epsilon if input.is_empty() => Ok(self.epsilon_step(lhs)),
            Alternative::Epsilon => Err(EXACT),
            Alternative::Symbols(syms) => {
                let children = self.derive_sequence(syms, input)?;
                Ok(self.expansion(lhs, syms, children))
            }
        }
    }

    /// Splits `input` among `syms`, left to right. The first split that
    /// works wins.
    fn derive_sequence(&mut self, syms: &'a [Symbol], input: &'i str) -> Found {
        let Some((&first, rest)) = syms.split_first() else {
            return if input.is_empty() { Ok(vec![]) } else { Err(EXACT) };
        };
        if rest.is_empty() {
            return self.derive(first, input);
        }
        let grammar = self.matcher.grammar();
        if let Some(literal) = grammar.literal(first) {
            let Some(remainder) = input.strip_prefix(literal) else {
                return Err(EXACT);
            };
            let mut steps = self.terminal_step(first, literal);
            steps.extend(self.derive_sequence(rest, remainder)?);
            return Ok(steps);
        }

        let next_literal = grammar.literal(rest[0]);
        let nullable = self.matcher.analysis().is_nullable(first);
        let mut taint = EXACT;
        for split in split_points(input, nullable) {
            let (head, tail) = input.split_at(split);
            if next_literal.map_or(false, |literal| !tail.starts_with(literal)) {
                continue;
            }
            match self.derive(first, head) {
                Ok(mut steps) => match self.derive_sequence(rest, tail) {
                    Ok(more) => {
                        steps.extend(more);
                        return Ok(steps);
                    }
                    Err(rest_taint) => taint = taint.min(rest_taint),
                },
                Err(head_taint) => taint = taint.min(head_taint),
            }
            if self.stopped() {
                break;
            }
        }
        Err(taint)
    }

    fn try_shortcuts(&mut self, lhs: Symbol, input: &'i str) -> Option<Vec<DerivationStep>> {
        let shortcuts = self.matcher.shortcuts_for()?;
        let grammar = self.matcher.grammar();
        for shortcut in shortcuts.for_symbol(lhs) {
            let Some(proposal) = shortcut.propose(grammar, lhs, input) else {
                continue;
            };
            if let Some(steps) = self.verify(lhs, &proposal, input) {
                trace!("shortcut for `{}` verified", grammar.name(lhs));
                return Some(steps);
            }
            trace!("shortcut for `{}` failed, falling back", grammar.name(lhs));
        }
        None
    }

    /// Checks every piece of a proposed partition with the general search.
    fn verify(
        &mut self,
        lhs: Symbol,
        proposal: &Proposal,
        input: &'i str,
    ) -> Option<Vec<DerivationStep>> {
        let grammar = self.matcher.grammar();
        let alternative = grammar.alternatives(lhs).nth(proposal.alternative)?;
        let syms = alternative.symbols();
        if syms.len() != proposal.pieces.len() || syms.is_empty() {
            return None;
        }
        let contiguous = proposal.pieces.first()?.start == 0
            && proposal.pieces.last()?.end == input.len()
            && proposal
                .pieces
                .windows(2)
                .all(|pair| pair[0].end == pair[1].start);
        if !contiguous {
            return None;
        }
        let mut children = vec![];
        for (&sym, range) in syms.iter().zip(&proposal.pieces) {
            let piece = input.get(range.clone())?;
            children.extend(self.derive(sym, piece).ok()?);
        }
        Some(self.expansion(lhs, syms, children))
    }

    fn expansion(
        &self,
        lhs: Symbol,
        rhs: &[Symbol],
        children: Vec<DerivationStep>,
    ) -> Vec<DerivationStep> {
        if !self.matcher.tracks_derivation() {
            return vec![];
        }
        let grammar = self.matcher.grammar();
        let mut steps = Vec::with_capacity(children.len() + 1);
        steps.push(DerivationStep::Expansion {
            lhs: grammar.shared_name(lhs),
            rhs: rhs.iter().map(|&sym| grammar.shared_name(sym)).collect(),
        });
        steps.extend(children);
        steps
    }

    fn epsilon_step(&self, lhs: Symbol) -> Vec<DerivationStep> {
        if !self.matcher.tracks_derivation() {
            return vec![];
        }
        vec![DerivationStep::EpsilonMatch {
            lhs: self.matcher.grammar().shared_name(lhs),
        }]
    }

    fn terminal_step(&self, terminal: Symbol, text: &str) -> Vec<DerivationStep> {
        if !self.matcher.tracks_derivation() {
            return vec![];
        }
        vec![DerivationStep::TerminalMatch {
            terminal: self.matcher.grammar().shared_name(terminal),
            text: text.to_string(),
        }]
    }
}

/// Byte offsets at which to split `input`: the empty prefix first when
/// allowed, then every prefix of one or more characters.
fn split_points(input: &str, nullable: bool) -> impl Iterator<Item = usize> + '_ {
    let empty = if nullable { Some(0) } else { None };
    let non_empty = input
        .char_indices()
        .skip(1)
        .map(|(offset, _)| offset)
        .chain(if input.is_empty() { None } else { Some(input.len()) });
    empty.into_iter().chain(non_empty)
}

#[cfg(test)]
mod tests {
    use super::split_points;

    #[test]
    fn test_split_points() {
        assert_eq!(split_points("abc", false).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(split_points("abc", true).collect::<Vec<_>>(), vec![0, 1, 2, 3]);
        assert_eq!(split_points("aé", false).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(split_points("", true).collect::<Vec<_>>(), vec![0]);
        assert_eq!(split_points("", false).count(), 0);
    }
}
