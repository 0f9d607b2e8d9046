use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use cfg_membership::{RecognizerConfig, Strategy};

#[derive(Parser, Debug)]
#[command(name = "cfg-check", version, about)]
pub struct Cli {
    /// File containing the grammar
    pub grammar: PathBuf,

    /// File with one candidate string per line (default: stdin)
    pub strings: Option<PathBuf>,

    /// Start symbol
    #[arg(short, long, value_name = "SYMBOL", default_value = "S")]
    pub start: String,

    /// Use the CYK recognizer instead of the recursive matcher
    #[arg(long)]
    pub cyk: bool,

    /// Print verdicts only
    #[arg(long)]
    pub no_derivation: bool,

    /// Disable memoization
    #[arg(long)]
    pub no_memo: bool,

    /// Time budget per string, in milliseconds (0: no budget)
    #[arg(long, value_name = "MS")]
    pub time_budget_ms: Option<u64>,

    /// Deepest nesting of nonterminals the recursive matcher follows
    #[arg(long, value_name = "LEVELS")]
    pub depth_limit: Option<usize>,

    /// Worker threads (default: available parallelism)
    #[arg(long, value_name = "N")]
    pub threads: Option<usize>,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    pub fn config(&self) -> RecognizerConfig {
        let mut config = RecognizerConfig::default()
            .strategy(if self.cyk {
                Strategy::Cyk
            } else {
                Strategy::Recursive
            })
            .track_derivation(!self.no_derivation)
            .memoize(!self.no_memo);
        if let Some(ms) = self.time_budget_ms {
            config = config.time_budget((ms > 0).then(|| Duration::from_millis(ms)));
        }
        if let Some(threads) = self.threads {
            config = config.threads(threads);
        }
        if let Some(limit) = self.depth_limit {
            config = config.depth_limit(limit);
        }
        config
    }
}
