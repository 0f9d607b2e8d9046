use std::fmt;

/// Represents a recognition request that can't be served.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RecognizeError {
    /// The start symbol has no rules.
    UndefinedStart(String),
    /// A CYK recognizer without binarization got a rule it can't handle.
    NotBinary {
        /// Name of the rule's LHS.
        lhs: String,
        /// Number of symbols on the rule's RHS.
        len: usize,
    },
}

impl fmt::Display for RecognizeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RecognizeError::UndefinedStart(name) => {
                write!(f, "start symbol `{}` is not defined by any rule", name)
            }
            RecognizeError::NotBinary { lhs, len } => {
                write!(
                    f,
                    "rule for `{}` has {} symbols on its right-hand side, binarization is off",
                    lhs, len
                )
            }
        }
    }
}

impl std::error::Error for RecognizeError {}
