//! The span table.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use cfg_symbol::Symbol;

/// How a symbol came to cover a span. Only the first way found is kept.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Backpointer {
    /// A terminal whose literal is exactly the span's text.
    Leaf,
    /// A chain of unit rules down to `child`, which covers the same span.
    Unit { child: Symbol },
    /// A two-symbol rule, with `split` characters covered by its first
    /// symbol.
    Binary { rule: usize, split: usize },
}

/// The symbols that cover one span, in the order they were found.
#[derive(Clone, Debug, Default)]
pub(crate) struct Cell {
    present: Vec<Symbol>,
    back: HashMap<Symbol, Backpointer>,
}

impl Cell {
    /// Adds a symbol unless it's already present.
    pub(crate) fn add(&mut self, sym: Symbol, back: Backpointer) {
        if let Entry::Vacant(entry) = self.back.entry(sym) {
            entry.insert(back);
            self.present.push(sym);
        }
    }

    pub(crate) fn contains(&self, sym: Symbol) -> bool {
        self.back.contains_key(&sym)
    }

    pub(crate) fn present(&self) -> &[Symbol] {
        &self.present[..]
    }

    pub(crate) fn backpointer(&self, sym: Symbol) -> Option<Backpointer> {
        self.back.get(&sym).copied()
    }
}

/// Cells indexed by start offset and length, both in characters.
pub(crate) struct Table {
    len: usize,
    cells: Vec<Cell>,
}

impl Table {
    pub(crate) fn new(len: usize) -> Self {
        Table {
            len,
            cells: vec![Cell::default(); len * len],
        }
    }

    fn index(&self, start: usize, len: usize) -> usize {
        debug_assert!(len >= 1 && start + len <= self.len);
        start * self.len + len - 1
    }

    pub(crate) fn cell(&self, start: usize, len: usize) -> &Cell {
        &self.cells[self.index(start, len)]
    }

    pub(crate) fn set(&mut self, start: usize, len: usize, cell: Cell) {
        let idx = self.index(start, len);
        self.cells[idx] = cell;
    }

    pub(crate) fn filled(&self) -> usize {
        self.cells.iter().map(|cell| cell.present.len()).sum()
    }
}
