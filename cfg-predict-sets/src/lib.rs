//! Grammar analysis: nullable, FIRST and productive sets, and a cheap
//! rejection test built on them.

#![deny(unsafe_code)]
#![deny(missing_docs)]

pub mod analysis;
pub mod first;

pub use self::analysis::GrammarAnalysis;
pub use self::first::{FirstChars, FirstSets};
