use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use log::debug;

use cfg_cyk::{CykOptions, CykRecognizer};
use cfg_derivation::{RecognitionResult, RecognizeError};
use cfg_grammar::Cfg;
use cfg_load::{CfgLoadExt, LoadOptions, LoadWarning};
use cfg_predict_sets::GrammarAnalysis;
use cfg_recursive::{RecursiveMatcher, Shortcuts};
use cfg_symbol::Symbol;

use crate::cache::{CacheKey, ResultCache};
use crate::config::{RecognizerConfig, Strategy};

/// A grammar, its analysis, and the engine chosen to recognize strings.
///
/// The grammar and analysis are shared read-only, so a recognizer can be
/// cloned cheaply and used from many threads.
#[derive(Clone, Debug)]
pub struct Recognizer {
    grammar: Arc<Cfg>,
    analysis: Arc<GrammarAnalysis>,
    cyk: Option<Arc<CykRecognizer>>,
    shortcuts: Shortcuts,
    config: RecognizerConfig,
    warnings: Vec<LoadWarning>,
    fingerprint: u64,
}

impl Recognizer {
    /// Prepares a grammar for recognition.
    pub fn new(grammar: Cfg, config: RecognizerConfig) -> Result<Self, RecognizeError> {
        let analysis = GrammarAnalysis::new(&grammar);
        let fingerprint = fingerprint(&grammar);
        let mut recognizer = Recognizer {
            grammar: Arc::new(grammar),
            analysis: Arc::new(analysis),
            cyk: None,
            shortcuts: Shortcuts::new(),
            config: RecognizerConfig::default(),
            warnings: vec![],
            fingerprint,
        };
        recognizer.set_config(config)?;
        Ok(recognizer)
    }

    /// Loads grammar text with the default options and prepares it.
    pub fn from_text(text: &str, config: RecognizerConfig) -> Result<Self, RecognizeError> {
        Self::from_text_with(text, &LoadOptions::default(), config)
    }

    /// Loads grammar text and prepares it. Load warnings are kept.
    pub fn from_text_with(
        text: &str,
        options: &LoadOptions,
        config: RecognizerConfig,
    ) -> Result<Self, RecognizeError> {
        let loaded = Cfg::load_with(text, options);
        let mut recognizer = Self::new(loaded.grammar, config)?;
        recognizer.warnings = loaded.warnings;
        Ok(recognizer)
    }

    /// Replaces the configuration. Switching to CYK prepares the
    /// binarized grammar once.
    pub fn set_config(&mut self, config: RecognizerConfig) -> Result<(), RecognizeError> {
        if config.strategy == Strategy::Cyk && self.cyk.is_none() {
            let cyk = CykRecognizer::new(&self.grammar, CykOptions::default())?;
            self.cyk = Some(Arc::new(cyk));
        }
        self.config = config;
        Ok(())
    }

    /// Uses structural shortcuts in the recursive matcher.
    pub fn with_shortcuts(mut self, shortcuts: Shortcuts) -> Self {
        self.shortcuts = shortcuts;
        self
    }

    /// Returns the grammar.
    pub fn grammar(&self) -> &Cfg {
        &self.grammar
    }

    /// Returns facts about the grammar.
    pub fn analysis(&self) -> &GrammarAnalysis {
        &self.analysis
    }

    /// Returns the configuration.
    pub fn config(&self) -> &RecognizerConfig {
        &self.config
    }

    /// Returns what the loader skipped or guessed.
    pub fn warnings(&self) -> &[LoadWarning] {
        &self.warnings
    }

    /// A hash of the grammar's text form. Equal grammars have equal
    /// fingerprints within one build.
    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    /// Looks up a start symbol by name.
    pub fn start_symbol(&self, name: &str) -> Result<Symbol, RecognizeError> {
        self.grammar
            .symbol(name)
            .filter(|&sym| self.grammar.alternatives(sym).next().is_some())
            .ok_or_else(|| RecognizeError::UndefinedStart(name.to_string()))
    }

    /// Decides whether `start` derives `input`.
    pub fn recognize(&self, start: &str, input: &str) -> Result<RecognitionResult, RecognizeError> {
        let start = self.start_symbol(start)?;
        self.recognize_symbol(start, input)
    }

    /// Like [`fn recognize`], but consults and fills a cache first.
    /// Incomplete results aren't cached. The cache is bypassed when
    /// memoization is off.
    ///
    /// [`fn recognize`]: Self::recognize
    pub fn recognize_cached(
        &self,
        cache: &mut ResultCache,
        start: &str,
        input: &str,
    ) -> Result<RecognitionResult, RecognizeError> {
        if !self.config.memoize {
            return self.recognize(start, input);
        }
        let key = self.cache_key(start, input);
        if let Some(result) = cache.get(&key) {
            return Ok(result.clone());
        }
        let result = self.recognize(start, input)?;
        if result.complete {
            cache.insert(key, result.clone());
        }
        Ok(result)
    }

    pub(crate) fn recognize_symbol(
        &self,
        start: Symbol,
        input: &str,
    ) -> Result<RecognitionResult, RecognizeError> {
        match (self.config.strategy, &self.cyk) {
            (Strategy::Cyk, Some(cyk)) => cyk.recognize(start, input, self.config.track_derivation),
            _ => self.matcher().matches(start, input),
        }
    }

    fn matcher(&self) -> RecursiveMatcher<'_> {
        let matcher = RecursiveMatcher::new(&self.grammar, &self.analysis)
            .track_derivation(self.config.track_derivation)
            .memoize(self.config.memoize)
            .time_budget(self.config.time_budget)
            .depth_limit(self.config.depth_limit);
        if self.shortcuts.is_empty() {
            matcher
        } else {
            matcher.shortcuts(&self.shortcuts)
        }
    }

    fn cache_key(&self, start: &str, input: &str) -> CacheKey {
        CacheKey {
            fingerprint: self.fingerprint,
            start: start.to_string(),
            strategy: self.config.strategy,
            track_derivation: self.config.track_derivation,
            shortcuts: self.shortcuts.identity(),
            input: input.to_string(),
        }
    }
}

fn fingerprint(grammar: &Cfg) -> u64 {
    let mut hasher = DefaultHasher::new();
    grammar.stringify_to_bnf().hash(&mut hasher);
    let fingerprint = hasher.finish();
    debug!(
        "grammar with {} rules has fingerprint {:016x}",
        grammar.rules().count(),
        fingerprint
    );
    fingerprint
}
