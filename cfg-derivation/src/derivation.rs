use std::slice;

use cfg_symbol::SymbolName;

use crate::step::DerivationStep;

/// An ordered sequence of derivation steps.
///
/// Recognizers emit steps in pre-order: a parent before its children,
/// children left to right.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Derivation {
    steps: Vec<DerivationStep>,
}

enum Item {
    Pending(SymbolName),
    Matched(String),
}

impl Derivation {
    /// Creates an empty derivation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a step.
    pub fn push(&mut self, step: DerivationStep) {
        self.steps.push(step);
    }

    /// Returns the steps.
    pub fn steps(&self) -> &[DerivationStep] {
        &self.steps[..]
    }

    /// Iterates over the steps.
    pub fn iter(&self) -> slice::Iter<'_, DerivationStep> {
        self.steps.iter()
    }

    /// Returns the number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether there are no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Returns the input text matched by each terminal, left to right.
    pub fn leaves(&self) -> Vec<&str> {
        self.steps
            .iter()
            .filter_map(|step| match step {
                DerivationStep::TerminalMatch { text, .. } => Some(&text[..]),
                _ => None,
            })
            .collect()
    }

    /// Replays the steps as a leftmost derivation and returns the
    /// sentential form reached after each step.
    ///
    /// Each step rewrites the leftmost pending occurrence of the symbol it
    /// applies to. A step with nothing to rewrite leaves the form as it is.
    pub fn sentential_forms(&self) -> Vec<String> {
        let mut form: Vec<Item> = vec![];
        let mut result = Vec::with_capacity(self.steps.len());
        for step in &self.steps {
            if let DerivationStep::Start { root } = step {
                form = vec![Item::Pending(root.clone())];
            } else {
                let application = step.application();
                let position = form.iter().position(|item| match item {
                    Item::Pending(name) => **name == application,
                    Item::Matched(_) => false,
                });
                if let Some(position) = position {
                    match step.produced() {
                        Some(syms) => {
                            let tail = form.split_off(position + 1);
                            form.pop();
                            form.extend(syms.into_iter().map(Item::Pending));
                            form.extend(tail);
                        }
                        None => form[position] = Item::Matched(step.result()),
                    }
                }
            }
            result.push(render(&form));
        }
        result
    }
}

fn render(form: &[Item]) -> String {
    if form.is_empty() {
        return "ε".to_string();
    }
    form.iter()
        .map(|item| match item {
            Item::Pending(name) => &name[..],
            Item::Matched(text) => &text[..],
        })
        .collect::<Vec<_>>()
        .join(" ")
}

impl From<Vec<DerivationStep>> for Derivation {
    fn from(steps: Vec<DerivationStep>) -> Self {
        Derivation { steps }
    }
}

impl Extend<DerivationStep> for Derivation {
    fn extend<I: IntoIterator<Item = DerivationStep>>(&mut self, iter: I) {
        self.steps.extend(iter);
    }
}

impl FromIterator<DerivationStep> for Derivation {
    fn from_iter<I: IntoIterator<Item = DerivationStep>>(iter: I) -> Self {
        Derivation {
            steps: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Derivation {
    type Item = &'a DerivationStep;
    type IntoIter = slice::Iter<'a, DerivationStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for Derivation {
    type Item = DerivationStep;
    type IntoIter = std::vec::IntoIter<DerivationStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.into_iter()
    }
}
