use std::num::NonZeroU32;

/// A common grammar symbol type.
///
/// Internally, the ID is shifted by one so that `Option<Symbol>` is as
/// small as `Symbol`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Hash, Eq, Ord, PartialEq, PartialOrd)]
pub struct Symbol {
    n: NonZeroU32,
}

impl Default for Symbol {
    fn default() -> Self {
        Self::first()
    }
}

impl Symbol {
    /// The symbol with ID zero.
    pub fn first() -> Self {
        Symbol { n: NonZeroU32::MIN }
    }

    /// Cast the symbol's ID to `usize`.
    #[inline]
    pub fn usize(self) -> usize {
        self.n.get() as usize - 1
    }
}

impl From<usize> for Symbol {
    #[inline]
    fn from(id: usize) -> Self {
        let id = u32::try_from(id).expect("symbol ID out of range");
        Symbol {
            n: NonZeroU32::new(id.wrapping_add(1)).expect("ran out of Symbol space?"),
        }
    }
}

impl From<Symbol> for u32 {
    #[inline]
    fn from(sym: Symbol) -> u32 {
        sym.n.get() - 1
    }
}

impl From<Symbol> for usize {
    #[inline]
    fn from(sym: Symbol) -> usize {
        sym.usize()
    }
}
