use std::fmt;

use crate::derivation::Derivation;

/// The outcome of one recognition request.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RecognitionResult {
    /// Whether the input is in the language.
    pub accepted: bool,
    /// A witnessing derivation. Empty when rejected, or when derivations
    /// are not tracked.
    pub derivation: Derivation,
    /// `false` when the time budget ran out. `accepted` is then `false`,
    /// which doesn't prove the input is outside the language.
    pub complete: bool,
}

/// The three states of a recognition result.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Verdict {
    /// The input is in the language.
    Accepted,
    /// The input is not in the language.
    Rejected,
    /// The time budget ran out before a decision was made.
    Incomplete,
}

impl RecognitionResult {
    /// An accepted result with the given witness.
    pub fn accepted(derivation: Derivation) -> Self {
        RecognitionResult {
            accepted: true,
            derivation,
            complete: true,
        }
    }

    /// A rejected result.
    pub fn rejected() -> Self {
        RecognitionResult {
            accepted: false,
            derivation: Derivation::new(),
            complete: true,
        }
    }

    /// A result for a search that ran out of time.
    pub fn incomplete() -> Self {
        RecognitionResult {
            accepted: false,
            derivation: Derivation::new(),
            complete: false,
        }
    }

    /// Returns the verdict.
    pub fn verdict(&self) -> Verdict {
        match (self.accepted, self.complete) {
            (true, _) => Verdict::Accepted,
            (false, true) => Verdict::Rejected,
            (false, false) => Verdict::Incomplete,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Verdict::Accepted => f.write_str("accepted"),
            Verdict::Rejected => f.write_str("rejected"),
            Verdict::Incomplete => f.write_str("incomplete (timeout)"),
        }
    }
}
