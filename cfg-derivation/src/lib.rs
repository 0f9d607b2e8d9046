//! Derivations that witness membership of a string in the language of a
//! grammar, and the results recognizers return.

#![deny(unsafe_code)]
#![deny(missing_docs)]

mod derivation;
mod error;
mod result;
mod step;

pub use crate::derivation::Derivation;
pub use crate::error::RecognizeError;
pub use crate::result::{RecognitionResult, Verdict};
pub use crate::step::DerivationStep;
