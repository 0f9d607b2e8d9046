//! The CYK algorithm over the binarized, epsilon-free form of a grammar.

#![deny(unsafe_code)]
#![deny(missing_docs)]

mod recognizer;
mod table;

pub use crate::recognizer::{CykOptions, CykRecognizer};
