//! Decides whether strings belong to the language of a context-free
//! grammar, and shows how they are derived.
//!
//! ```
//! use cfg_membership::{Recognizer, RecognizerConfig, Verdict};
//!
//! let recognizer = Recognizer::from_text("S → a S b | ε", RecognizerConfig::default()).unwrap();
//! let result = recognizer.recognize("S", "aabb").unwrap();
//! assert_eq!(result.verdict(), Verdict::Accepted);
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]

mod batch;
mod cache;
mod config;
mod recognizer;

pub use crate::cache::ResultCache;
pub use crate::config::{RecognizerConfig, Strategy};
pub use crate::recognizer::Recognizer;

pub use cfg_cyk::{CykOptions, CykRecognizer};
pub use cfg_derivation::{Derivation, DerivationStep, RecognitionResult, RecognizeError, Verdict};
pub use cfg_grammar::Cfg;
pub use cfg_load::{CfgLoadExt, LoadOptions, LoadWarning};
pub use cfg_predict_sets::GrammarAnalysis;
pub use cfg_recursive::{
    AnchoredShortcut, Proposal, RecursiveMatcher, Shortcuts, StructuralShortcut, DEFAULT_DEPTH_LIMIT,
};
pub use cfg_symbol::Symbol;
