//! Library for building context-free grammars, with the transformations
//! recognizers need: RHS closure, binarization and nulling elimination.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications
)]

pub mod binarized_cfg;
pub mod cfg;
pub mod occurence_map;
pub mod rule_builder;
pub mod symbol_bit_set;

pub use crate::binarized_cfg::{BinarizedCfg, BinarizedRule, BinarizedRuleRhs, NullingEliminated};
pub use crate::cfg::{looks_like_nonterminal, Alternative, Cfg, CfgRule, RhsPropertyMode};
pub use crate::rule_builder::RuleBuilder;
pub use crate::symbol_bit_set::SymbolBitSet;
pub use cfg_symbol::{Symbol, SymbolName, SymbolSource};

pub(crate) mod local_prelude {
    pub use crate::cfg::{Cfg, CfgRule};
    pub use crate::symbol_bit_set::SymbolBitSet;
    pub use cfg_symbol::{Symbol, SymbolName, SymbolSource};
}
