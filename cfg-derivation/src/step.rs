use cfg_symbol::SymbolName;

/// One step of a derivation.
///
/// Steps name symbols rather than number them, so that a derivation can
/// be displayed without the grammar.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum DerivationStep {
    /// The pseudo step `Start → root`.
    Start {
        /// The start symbol.
        root: SymbolName,
    },
    /// `lhs → rhs`, for any number of symbols.
    Expansion {
        /// The symbol being expanded.
        lhs: SymbolName,
        /// The alternative that was chosen.
        rhs: Vec<SymbolName>,
    },
    /// `lhs → rhs` with a single symbol.
    UnaryExpansion {
        /// The symbol being expanded.
        lhs: SymbolName,
        /// The only symbol of the alternative.
        rhs: SymbolName,
    },
    /// `lhs → left right`.
    BinaryExpansion {
        /// The symbol being expanded.
        lhs: SymbolName,
        /// The first symbol of the alternative.
        left: SymbolName,
        /// The second symbol of the alternative.
        right: SymbolName,
    },
    /// `lhs ⇒* ε`.
    EpsilonMatch {
        /// The symbol that derives the empty string.
        lhs: SymbolName,
    },
    /// A terminal matched against the input.
    TerminalMatch {
        /// The terminal's literal.
        terminal: SymbolName,
        /// The input text it matched.
        text: String,
    },
}

impl DerivationStep {
    /// Renders the rule of this step, such as `A → x y`.
    pub fn rule(&self) -> String {
        match self {
            DerivationStep::Start { root } => format!("Start → {}", root),
            DerivationStep::TerminalMatch { .. } => "Terminal match".to_string(),
            other => format!("{} → {}", other.application(), other.result()),
        }
    }

    /// Renders the symbol this step applies to.
    pub fn application(&self) -> String {
        match self {
            DerivationStep::Start { .. } => "Start".to_string(),
            DerivationStep::Expansion { lhs, .. }
            | DerivationStep::UnaryExpansion { lhs, .. }
            | DerivationStep::BinaryExpansion { lhs, .. }
            | DerivationStep::EpsilonMatch { lhs } => lhs.to_string(),
            DerivationStep::TerminalMatch { terminal, .. } => terminal.to_string(),
        }
    }

    /// Renders the text this step produces.
    pub fn result(&self) -> String {
        match self {
            DerivationStep::Start { root } => root.to_string(),
            DerivationStep::Expansion { rhs, .. } if rhs.is_empty() => "ε".to_string(),
            DerivationStep::Expansion { rhs, .. } => rhs.join(" "),
            DerivationStep::UnaryExpansion { rhs, .. } => rhs.to_string(),
            DerivationStep::BinaryExpansion { left, right, .. } => format!("{} {}", left, right),
            DerivationStep::EpsilonMatch { .. } => "ε".to_string(),
            DerivationStep::TerminalMatch { text, .. } => text.clone(),
        }
    }

    /// The symbols this step puts in place of its application, or `None`
    /// for a terminal match.
    pub(crate) fn produced(&self) -> Option<Vec<SymbolName>> {
        match self {
            DerivationStep::Start { root } => Some(vec![root.clone()]),
            DerivationStep::Expansion { rhs, .. } => Some(rhs.clone()),
            DerivationStep::UnaryExpansion { rhs, .. } => Some(vec![rhs.clone()]),
            DerivationStep::BinaryExpansion { left, right, .. } => {
                Some(vec![left.clone(), right.clone()])
            }
            DerivationStep::EpsilonMatch { .. } => Some(vec![]),
            DerivationStep::TerminalMatch { .. } => None,
        }
    }
}
