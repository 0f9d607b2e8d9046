//! Decides membership of a string in the language of a context-free
//! grammar by trying every alternative and every split of the input,
//! with memoization, a time budget and a nesting limit.

#![deny(unsafe_code)]
#![deny(missing_docs)]

mod matcher;
mod search;
pub mod shortcut;

pub use crate::matcher::{RecursiveMatcher, DEFAULT_DEPTH_LIMIT};
pub use crate::shortcut::{AnchoredShortcut, Proposal, Shortcuts, StructuralShortcut};
