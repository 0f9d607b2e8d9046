//! Loading of line-oriented grammar text.

use std::collections::HashSet;

use log::{debug, warn};

use cfg_grammar::{looks_like_nonterminal, Cfg, CfgRule, Symbol};

use crate::lexer::{Lexer, Token};
use crate::{LoadOptions, LoadWarning, Loaded};

/// Production delimiters. At the same position, the longer one wins.
const DELIMITERS: [&str; 4] = ["::=", ":=", "→", "->"];

/// Allows loading a grammar from text.
pub trait CfgLoadExt {
    /// Loads a grammar with the default options. Never fails: lines that
    /// can't be read are skipped and reported in [`Loaded::warnings`].
    fn load(text: &str) -> Loaded;
    /// Loads a grammar with the given options.
    fn load_with(text: &str, options: &LoadOptions) -> Loaded;
}

struct Production<'a> {
    lhs: &'a str,
    line: usize,
    rhs: Vec<(usize, &'a str)>,
}

impl CfgLoadExt for Cfg {
    fn load(text: &str) -> Loaded {
        Self::load_with(text, &LoadOptions::default())
    }

    fn load_with(text: &str, options: &LoadOptions) -> Loaded {
        let mut warnings = vec![];
        let productions = split_productions(text, &mut warnings);

        let mut grammar = Cfg::new();
        let mut declared = HashSet::new();
        // Forward references are allowed, so all left-hand sides come first.
        for production in &productions {
            let lhs = grammar.nonterminal(production.lhs);
            grammar.declare(lhs);
            declared.insert(production.lhs);
        }

        let mut implicit = HashSet::new();
        for production in &productions {
            let lhs = grammar.nonterminal(production.lhs);
            if production.rhs.is_empty() {
                grammar.add_rule(CfgRule::new(lhs, Vec::<Symbol>::new()));
                continue;
            }
            for &(line, rhs) in &production.rhs {
                for alternative in Lexer::alternatives(rhs) {
                    let mut syms = vec![];
                    for token in alternative {
                        match token {
                            Token::Quoted(literal) => {
                                if !literal.is_empty() {
                                    syms.push(grammar.terminal(&literal));
                                }
                            }
                            Token::Word(word) if options.is_epsilon(&word) => {}
                            Token::Word(word) if declared.contains(&word[..]) => {
                                syms.push(grammar.nonterminal(&word));
                            }
                            Token::Word(word)
                                if options.uppercase_nonterminals
                                    && looks_like_nonterminal(&word) =>
                            {
                                if implicit.insert(word.clone()) {
                                    warn!("line {}: `{}` has no rules", line, word);
                                    warnings.push(LoadWarning::ImplicitNonterminal {
                                        name: word.clone(),
                                        line,
                                    });
                                }
                                syms.push(grammar.nonterminal(&word));
                            }
                            Token::Word(word) => {
                                syms.push(grammar.terminal(&word));
                            }
                        }
                    }
                    grammar.add_rule(CfgRule::new(lhs, syms));
                }
            }
        }
        debug!(
            "loaded {} rules for {} nonterminals, {} warnings",
            grammar.rules().count(),
            productions.len(),
            warnings.len()
        );
        Loaded { grammar, warnings }
    }
}

/// Groups lines into productions. Repeated left-hand sides are merged,
/// and continuation lines attach to the production above them.
fn split_productions<'a>(text: &'a str, warnings: &mut Vec<LoadWarning>) -> Vec<Production<'a>> {
    let mut productions: Vec<Production<'a>> = vec![];
    let mut current: Option<usize> = None;
    for (i, line) in text.lines().enumerate() {
        let line_no = i + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with("//") {
            continue;
        }
        if let Some(rest) = line.strip_prefix('|') {
            match current {
                Some(idx) => productions[idx].rhs.push((line_no, rest)),
                None => skip(line_no, line, warnings),
            }
            continue;
        }
        let Some((lhs, rhs)) = split_delimiter(line) else {
            skip(line_no, line, warnings);
            continue;
        };
        if lhs.is_empty() {
            skip(line_no, line, warnings);
            continue;
        }
        let idx = match productions.iter().position(|p| p.lhs == lhs) {
            Some(idx) => idx,
            None => {
                productions.push(Production {
                    lhs,
                    line: line_no,
                    rhs: vec![],
                });
                productions.len() - 1
            }
        };
        // An empty right-hand side followed by continuation lines is only
        // a header.
        if !rhs.is_empty() {
            productions[idx].rhs.push((line_no, rhs));
        }
        current = Some(idx);
    }
    for production in &productions {
        debug!("line {}: production for `{}`", production.line, production.lhs);
    }
    productions
}

/// Splits a line at its earliest production delimiter.
fn split_delimiter(line: &str) -> Option<(&str, &str)> {
    DELIMITERS
        .iter()
        .filter_map(|delim| line.find(delim).map(|pos| (pos, *delim)))
        .min_by_key(|&(pos, delim)| (pos, usize::MAX - delim.len()))
        .map(|(pos, delim)| (line[..pos].trim(), line[pos + delim.len()..].trim()))
}

fn skip(line: usize, text: &str, warnings: &mut Vec<LoadWarning>) {
    debug!("line {}: skipped: {}", line, text);
    warnings.push(LoadWarning::SkippedLine {
        line,
        text: text.to_string(),
    });
}

#[cfg(test)]
mod tests {
    use super::split_delimiter;

    #[test]
    fn test_split_delimiter() {
        assert_eq!(split_delimiter("A ::= b"), Some(("A", "b")));
        assert_eq!(split_delimiter("A := b"), Some(("A", "b")));
        assert_eq!(split_delimiter("A → b := c"), Some(("A", "b := c")));
        assert_eq!(split_delimiter("A -> "), Some(("A", "")));
        assert_eq!(split_delimiter("A b"), None);
    }
}
