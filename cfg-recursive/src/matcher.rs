use std::time::{Duration, Instant};

use log::{debug, warn};

use cfg_derivation::{Derivation, DerivationStep, RecognitionResult, RecognizeError};
use cfg_grammar::Cfg;
use cfg_predict_sets::GrammarAnalysis;
use cfg_symbol::Symbol;

use crate::search::Search;
use crate::shortcut::Shortcuts;

/// How many nonterminals may be under evaluation at once, one inside the
/// other, unless [`fn depth_limit`] says otherwise. Fits in the 2 MiB
/// stack of a spawned thread.
///
/// [`fn depth_limit`]: RecursiveMatcher::depth_limit
pub const DEFAULT_DEPTH_LIMIT: usize = 1_000;

/// The recursive matcher.
///
/// Borrows the grammar and its analysis. Every call to [`fn matches`]
/// starts with a fresh memo, so one matcher can serve many threads.
///
/// [`fn matches`]: Self::matches
#[derive(Clone, Copy)]
pub struct RecursiveMatcher<'a> {
    grammar: &'a Cfg,
    analysis: &'a GrammarAnalysis,
    shortcuts: Option<&'a Shortcuts>,
    track_derivation: bool,
    memoize: bool,
    time_budget: Option<Duration>,
    depth_limit: usize,
}

impl<'a> RecursiveMatcher<'a> {
    /// Creates a matcher that tracks derivations, memoizes, and has no time
    /// budget. Nesting is limited to [`DEFAULT_DEPTH_LIMIT`].
    pub fn new(grammar: &'a Cfg, analysis: &'a GrammarAnalysis) -> Self {
        RecursiveMatcher {
            grammar,
            analysis,
            shortcuts: None,
            track_derivation: true,
            memoize: true,
            time_budget: None,
            depth_limit: DEFAULT_DEPTH_LIMIT,
        }
    }

    /// Whether to build a derivation for accepted input.
    pub fn track_derivation(mut self, enabled: bool) -> Self {
        self.track_derivation = enabled;
        self
    }

    /// Whether to remember results for `(symbol, substring)` pairs within
    /// one call.
    pub fn memoize(mut self, enabled: bool) -> Self {
        self.memoize = enabled;
        self
    }

    /// Limits the wall-clock time of one call.
    pub fn time_budget(mut self, budget: Option<Duration>) -> Self {
        self.time_budget = budget;
        self
    }

    /// Limits how deeply nonterminals may nest during one call. Each level
    /// takes a few stack frames, so the calling thread's stack must be
    /// large enough for the limit.
    pub fn depth_limit(mut self, limit: usize) -> Self {
        self.depth_limit = limit;
        self
    }

    /// Uses structural shortcuts to propose partitions before the general
    /// search.
    pub fn shortcuts(mut self, shortcuts: &'a Shortcuts) -> Self {
        self.shortcuts = Some(shortcuts);
        self
    }

    pub(crate) fn grammar(&self) -> &'a Cfg {
        self.grammar
    }

    pub(crate) fn analysis(&self) -> &'a GrammarAnalysis {
        self.analysis
    }

    pub(crate) fn shortcuts_for(&self) -> Option<&'a Shortcuts> {
        self.shortcuts
    }

    pub(crate) fn tracks_derivation(&self) -> bool {
        self.track_derivation
    }

    pub(crate) fn memoizes(&self) -> bool {
        self.memoize
    }

    pub(crate) fn max_depth(&self) -> usize {
        self.depth_limit
    }

    /// Decides whether `start` derives `input`.
    ///
    /// Fails only when `start` isn't a nonterminal with rules. Running out
    /// of time, or nesting deeper than the depth limit, gives an incomplete
    /// result instead.
    pub fn matches(&self, start: Symbol, input: &str) -> Result<RecognitionResult, RecognizeError> {
        if self.grammar.is_terminal(start) || self.grammar.alternatives(start).next().is_none() {
            return Err(RecognizeError::UndefinedStart(
                self.grammar.name(start).to_string(),
            ));
        }
        let deadline = self
            .time_budget
            .and_then(|budget| Instant::now().checked_add(budget));
        let mut search = Search::new(self, deadline);
        let found = search.derive(start, input);
        debug!(
            "recursive match of {} chars from `{}`: {} calls, {} memo entries, accepted: {}",
            input.chars().count(),
            self.grammar.name(start),
            search.calls(),
            search.memo_len(),
            found.is_ok(),
        );
        let result = match found {
            Ok(steps) => {
                let mut derivation = Derivation::new();
                if self.track_derivation {
                    derivation.push(DerivationStep::Start {
                        root: self.grammar.shared_name(start),
                    });
                    derivation.extend(steps);
                }
                RecognitionResult::accepted(derivation)
            }
            Err(_) if search.too_deep() => {
                warn!(
                    "recursive match of {} chars nested deeper than {}",
                    input.chars().count(),
                    self.depth_limit
                );
                RecognitionResult::incomplete()
            }
            Err(_) if search.timed_out() => {
                warn!(
                    "recursive match of {} chars ran out of time",
                    input.chars().count()
                );
                RecognitionResult::incomplete()
            }
            Err(_) => RecognitionResult::rejected(),
        };
        Ok(result)
    }
}
