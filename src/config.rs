use std::num::NonZeroUsize;
use std::thread;
use std::time::Duration;

use cfg_recursive::DEFAULT_DEPTH_LIMIT;

/// Which engine decides membership.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Strategy {
    /// Memoized recursive descent over every alternative and split.
    #[default]
    Recursive,
    /// The CYK algorithm over the binarized grammar.
    Cyk,
}

/// Settings for a [`Recognizer`].
///
/// [`Recognizer`]: crate::Recognizer
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecognizerConfig {
    /// The engine.
    pub strategy: Strategy,
    /// Build a derivation for accepted strings.
    pub track_derivation: bool,
    /// Memoize within a call, and allow results to be cached across
    /// calls.
    pub memoize: bool,
    /// Wall-clock limit for one string. Only the recursive matcher runs
    /// out of time.
    pub time_budget: Option<Duration>,
    /// Worker threads for batches.
    pub threads: usize,
    /// How deeply the recursive matcher may nest nonterminals before it
    /// gives up with an incomplete result. Batch workers get a stack large
    /// enough for it. Single calls run on the caller's stack.
    pub depth_limit: usize,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        RecognizerConfig {
            strategy: Strategy::Recursive,
            track_derivation: true,
            memoize: true,
            time_budget: Some(Duration::from_secs(10)),
            threads: thread::available_parallelism().map_or(1, NonZeroUsize::get),
            depth_limit: DEFAULT_DEPTH_LIMIT,
        }
    }
}

impl RecognizerConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the engine.
    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets whether derivations are built.
    pub fn track_derivation(mut self, enabled: bool) -> Self {
        self.track_derivation = enabled;
        self
    }

    /// Sets whether results are memoized.
    pub fn memoize(mut self, enabled: bool) -> Self {
        self.memoize = enabled;
        self
    }

    /// Sets the time budget for one string, or removes it.
    pub fn time_budget(mut self, budget: Option<Duration>) -> Self {
        self.time_budget = budget;
        self
    }

    /// Sets the number of worker threads. Zero means one.
    pub fn threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }

    /// Sets the nesting limit of the recursive matcher.
    pub fn depth_limit(mut self, limit: usize) -> Self {
        self.depth_limit = limit;
        self
    }
}
