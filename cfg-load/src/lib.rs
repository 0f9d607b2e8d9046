//! Allows us to load context-free grammars from
//! line-oriented grammar text.
//!
//! ```text
//! S → a S b | ε
//! T := "x y" T
//!    | None
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]

pub mod basic;
mod lexer;

use std::fmt;

use cfg_grammar::Cfg;

pub use crate::basic::CfgLoadExt;

/// Options for loading grammar text.
#[derive(Clone, Debug)]
pub struct LoadOptions {
    /// Unquoted tokens that stand for the empty string.
    pub epsilon_glyphs: Vec<String>,
    /// Treat undeclared tokens such as `EXPR` as nonterminals.
    pub uppercase_nonterminals: bool,
}

/// A grammar loaded from text, along with everything that was skipped
/// or guessed while loading it.
#[derive(Clone, Debug)]
pub struct Loaded {
    /// The grammar.
    pub grammar: Cfg,
    /// Lines that were skipped and symbols that were classified by
    /// naming convention.
    pub warnings: Vec<LoadWarning>,
}

/// Something that didn't stop the grammar from loading, but might not be
/// what the author meant.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LoadWarning {
    /// A line has no production delimiter, or nothing before it.
    SkippedLine {
        /// One-indexed line number.
        line: usize,
        /// The line, trimmed.
        text: String,
    },
    /// A token names no declared nonterminal, but looks like one.
    ImplicitNonterminal {
        /// The token.
        name: String,
        /// One-indexed line number of the first use.
        line: usize,
    },
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions {
            epsilon_glyphs: vec!["ε".to_string(), "None".to_string()],
            uppercase_nonterminals: true,
        }
    }
}

impl LoadOptions {
    /// Sets the epsilon glyphs.
    pub fn epsilon_glyphs<I, S>(mut self, glyphs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.epsilon_glyphs = glyphs.into_iter().map(Into::into).collect();
        self
    }

    /// Enables or disables the naming convention for undeclared
    /// nonterminals.
    pub fn uppercase_nonterminals(mut self, enabled: bool) -> Self {
        self.uppercase_nonterminals = enabled;
        self
    }

    fn is_epsilon(&self, token: &str) -> bool {
        self.epsilon_glyphs.iter().any(|glyph| glyph == token)
    }
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LoadWarning::SkippedLine { line, text } => {
                write!(f, "line {}: skipped, no production: {}", line, text)
            }
            LoadWarning::ImplicitNonterminal { name, line } => {
                write!(
                    f,
                    "line {}: `{}` has no rules, treated as a nonterminal",
                    line, name
                )
            }
        }
    }
}
