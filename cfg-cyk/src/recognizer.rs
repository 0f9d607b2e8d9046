use std::collections::{HashMap, HashSet, VecDeque};
use std::iter;

use log::{debug, trace};

use cfg_derivation::{Derivation, DerivationStep, RecognitionResult, RecognizeError};
use cfg_grammar::{BinarizedCfg, BinarizedRuleRhs, Cfg, NullingEliminated};
use cfg_symbol::Symbol;
use cfg_symbol_bit_matrix::CfgSymbolBitMatrixExt;

use crate::table::{Backpointer, Cell, Table};

/// Options for building a CYK recognizer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CykOptions {
    /// Bring any grammar into binarized, epsilon-free form first. When
    /// off, grammars with longer or empty alternatives are refused.
    pub binarize: bool,
}

impl Default for CykOptions {
    fn default() -> Self {
        CykOptions { binarize: true }
    }
}

/// A CYK recognizer for one grammar.
///
/// Construction does the grammar work once: binarization, nulling
/// elimination, the rule index and the unit closure. Recognition
/// allocates a fresh table per call.
#[derive(Clone, Debug)]
pub struct CykRecognizer {
    binarized: BinarizedCfg,
    /// Terminals with non-empty literals, and their length in characters.
    leaves: Vec<(Symbol, usize)>,
    /// Two-symbol rules by RHS.
    binary: HashMap<(Symbol, Symbol), Vec<usize>>,
    /// For each symbol `B`, every `A ≠ B` with `A ⇒+ B` by unit rules.
    unit_parents: Vec<Vec<Symbol>>,
    /// One-symbol rules by LHS.
    unit_rules: Vec<Vec<usize>>,
}

impl CykRecognizer {
    /// Prepares the grammar for recognition.
    pub fn new(grammar: &Cfg, options: CykOptions) -> Result<Self, RecognizeError> {
        if !options.binarize {
            if let Some(rule) = grammar
                .rules()
                .find(|rule| rule.rhs.len() > 2 || rule.rhs.is_epsilon())
            {
                return Err(RecognizeError::NotBinary {
                    lhs: grammar.name(rule.lhs).to_string(),
                    len: rule.rhs.len(),
                });
            }
        }
        let binarized = BinarizedCfg::from_cfg(grammar);
        let num_syms = binarized.num_syms();

        let mut binary: HashMap<(Symbol, Symbol), Vec<usize>> = HashMap::new();
        let mut unit_rules = vec![vec![]; num_syms];
        let mut used = HashSet::new();
        for (idx, rule) in binarized.rules().iter().enumerate() {
            match rule.rhs() {
                BinarizedRuleRhs::Two([left, right]) => {
                    binary.entry((left, right)).or_default().push(idx);
                    used.extend([left, right]);
                }
                BinarizedRuleRhs::One([child]) => {
                    unit_rules[rule.lhs().usize()].push(idx);
                    used.insert(child);
                }
            }
        }

        let inner = binarized.grammar();
        let mut leaves: Vec<(Symbol, usize)> = used
            .into_iter()
            .filter_map(|sym| inner.literal(sym).map(|literal| (sym, literal.chars().count())))
            .filter(|&(_, len)| len > 0)
            .collect();
        leaves.sort();

        let units = binarized.unit_derivation_matrix();
        let unit_parents = (0..num_syms)
            .map(Symbol::from)
            .map(|sym| units.derived_by(sym).filter(|&parent| parent != sym).collect())
            .collect();

        debug!(
            "CYK grammar: {} rules, {} binary right-hand sides, {} terminals",
            binarized.rules().len(),
            binary.len(),
            leaves.len()
        );

        Ok(CykRecognizer {
            binarized,
            leaves,
            binary,
            unit_parents,
            unit_rules,
        })
    }

    /// Returns the binarized grammar the recognizer works with.
    pub fn binarized(&self) -> &BinarizedCfg {
        &self.binarized
    }

    /// Decides whether `start` derives `input`.
    ///
    /// The result is always complete.
    pub fn recognize(
        &self,
        start: Symbol,
        input: &str,
        track_derivation: bool,
    ) -> Result<RecognitionResult, RecognizeError> {
        let grammar = self.binarized.grammar();
        if grammar.is_terminal(start) || grammar.alternatives(start).next().is_none() {
            return Err(RecognizeError::UndefinedStart(grammar.name(start).to_string()));
        }
        let root = DerivationStep::Start {
            root: grammar.shared_name(start),
        };

        if input.is_empty() {
            if !self.binarized.is_nullable(start) {
                return Ok(RecognitionResult::rejected());
            }
            let mut derivation = Derivation::new();
            if track_derivation {
                derivation.push(root);
                derivation.push(DerivationStep::EpsilonMatch {
                    lhs: grammar.shared_name(start),
                });
            }
            return Ok(RecognitionResult::accepted(derivation));
        }

        let offsets: Vec<usize> = input
            .char_indices()
            .map(|(offset, _)| offset)
            .chain(iter::once(input.len()))
            .collect();
        let table = self.fill(input, &offsets);
        let n = offsets.len() - 1;
        let accepted = table.cell(0, n).contains(start);
        debug!(
            "CYK over {} chars: {} entries, accepted: {}",
            n,
            table.filled(),
            accepted
        );
        if !accepted {
            return Ok(RecognitionResult::rejected());
        }
        let mut derivation = Derivation::new();
        if track_derivation {
            derivation.push(root);
            let mut walk = Walk {
                recognizer: self,
                table: &table,
                input,
                offsets: &offsets,
                steps: vec![],
            };
            walk.run(start, 0, n);
            derivation.extend(walk.steps);
        }
        Ok(RecognitionResult::accepted(derivation))
    }

    fn fill(&self, input: &str, offsets: &[usize]) -> Table {
        let n = offsets.len() - 1;
        let rules = self.binarized.rules();
        let mut table = Table::new(n);
        for len in 1..=n {
            for start in 0..=n - len {
                let mut cell = Cell::default();
                let text = &input[offsets[start]..offsets[start + len]];
                for &(terminal, _) in self.leaves.iter().filter(|&&(_, l)| l == len) {
                    if self.binarized.grammar().literal(terminal) == Some(text) {
                        cell.add(terminal, Backpointer::Leaf);
                    }
                }
                for split in 1..len {
                    let left = table.cell(start, split);
                    let right = table.cell(start + split, len - split);
                    for &b in left.present() {
                        for &c in right.present() {
                            for &rule in self.binary.get(&(b, c)).into_iter().flatten() {
                                cell.add(rules[rule].lhs(), Backpointer::Binary { rule, split });
                            }
                        }
                    }
                }
                let found = cell.present().len();
                for idx in 0..found {
                    let child = cell.present()[idx];
                    for &parent in &self.unit_parents[child.usize()] {
                        cell.add(parent, Backpointer::Unit { child });
                    }
                }
                trace!("span {}+{}: {} symbols", start, len, cell.present().len());
                table.set(start, len, cell);
            }
        }
        table
    }

    /// Finds the shortest chain of unit rules from `from` down to `to`.
    fn unit_path(&self, from: Symbol, to: Symbol) -> Vec<usize> {
        let rules = self.binarized.rules();
        let mut via: HashMap<Symbol, usize> = HashMap::new();
        let mut queue = VecDeque::from([from]);
        while let Some(sym) = queue.pop_front() {
            if sym == to {
                break;
            }
            for &rule in &self.unit_rules[sym.usize()] {
                let child = rules[rule].rhs0();
                if child != from && !via.contains_key(&child) {
                    via.insert(child, rule);
                    queue.push_back(child);
                }
            }
        }
        let mut path = vec![];
        let mut cur = to;
        while cur != from {
            let Some(&rule) = via.get(&cur) else { break };
            path.push(rule);
            cur = rules[rule].lhs();
        }
        path.reverse();
        path
    }
}

/// Pre-order walk of backpointers, with an explicit stack so that deep
/// derivations don't exhaust the thread's stack.
struct Walk<'a> {
    recognizer: &'a CykRecognizer,
    table: &'a Table,
    input: &'a str,
    offsets: &'a [usize],
    steps: Vec<DerivationStep>,
}

/// Work left for the walk, popped last in first out.
enum Task {
    /// Expand a symbol over a span.
    Symbol { sym: Symbol, start: usize, len: usize },
    /// Emit a step once everything pushed after it is done.
    Step(DerivationStep),
}

impl<'a> Walk<'a> {
    fn run(&mut self, sym: Symbol, start: usize, len: usize) {
        let mut tasks = vec![Task::Symbol { sym, start, len }];
        while let Some(task) = tasks.pop() {
            match task {
                Task::Symbol { sym, start, len } => self.symbol(sym, start, len, &mut tasks),
                Task::Step(step) => self.steps.push(step),
            }
        }
    }

    fn symbol(&mut self, sym: Symbol, start: usize, len: usize, tasks: &mut Vec<Task>) {
        let grammar = self.recognizer.binarized.grammar();
        match self.table.cell(start, len).backpointer(sym) {
            Some(Backpointer::Leaf) => {
                let text = &self.input[self.offsets[start]..self.offsets[start + len]];
                self.steps.push(DerivationStep::TerminalMatch {
                    terminal: grammar.shared_name(sym),
                    text: text.to_string(),
                });
            }
            Some(Backpointer::Unit { child }) => {
                let path = self.recognizer.unit_path(sym, child);
                self.unit_chain(&path, tasks);
                tasks.push(Task::Symbol {
                    sym: child,
                    start,
                    len,
                });
            }
            Some(Backpointer::Binary { rule, split }) => {
                let rule = self.recognizer.binarized.rules()[rule];
                let (left, right) = (rule.rhs0(), rule.rhs1().unwrap_or(rule.rhs0()));
                self.steps.push(DerivationStep::BinaryExpansion {
                    lhs: grammar.shared_name(rule.lhs()),
                    left: grammar.shared_name(left),
                    right: grammar.shared_name(right),
                });
                tasks.push(Task::Symbol {
                    sym: right,
                    start: start + split,
                    len: len - split,
                });
                tasks.push(Task::Symbol {
                    sym: left,
                    start,
                    len: split,
                });
            }
            None => {}
        }
    }

    /// Emits the expansions along a chain of unit rules. Symbols nulled on
    /// the right are matched after the chain's end, innermost first.
    fn unit_chain(&mut self, path: &[usize], tasks: &mut Vec<Task>) {
        let grammar = self.recognizer.binarized.grammar();
        for &rule in path {
            let rule = self.recognizer.binarized.rules()[rule];
            let lhs = grammar.shared_name(rule.lhs());
            let kept = grammar.shared_name(rule.rhs0());
            match rule.eliminated() {
                None => {
                    self.steps.push(DerivationStep::UnaryExpansion { lhs, rhs: kept });
                }
                Some(NullingEliminated::Left(nulled)) => {
                    let nulled = grammar.shared_name(nulled);
                    self.steps.push(DerivationStep::BinaryExpansion {
                        lhs,
                        left: nulled.clone(),
                        right: kept,
                    });
                    self.steps.push(DerivationStep::EpsilonMatch { lhs: nulled });
                }
                Some(NullingEliminated::Right(nulled)) => {
                    let nulled = grammar.shared_name(nulled);
                    self.steps.push(DerivationStep::BinaryExpansion {
                        lhs,
                        left: kept,
                        right: nulled.clone(),
                    });
                    tasks.push(Task::Step(DerivationStep::EpsilonMatch { lhs: nulled }));
                }
            }
        }
    }
}
