//! Term suggester.

use search_dsl_shared::{param_enum, DslError};

use crate::core::{impl_suggester_builder, AnalyzedSuggesterBuilder, Suggester};
use crate::suggesters::SuggestMode;

param_enum! {
    /// Sort order of the suggestions of each term.
    pub enum TermSuggestSort("sort", "search-suggesters.html", Lower) {
        Score => "score",
        Frequency => "frequency",
    }
}

param_enum! {
    /// String distance used to compare suggested terms.
    pub enum StringDistance("string_distance", "search-suggesters.html", Lower) {
        Internal => "internal",
        DamerauLevenshtein => "damerau_levenshtein",
        Levenshtein => "levenshtein",
        JaroWinkler => "jaro_winkler",
        Ngram => "ngram",
    }
}

/// Suggests terms based on edit distance.
#[derive(Debug, Clone)]
pub struct TermSuggester {
    inner: Suggester,
}

impl TermSuggester {
    pub fn new(label: impl Into<String>) -> Result<Self, DslError> {
        Ok(Self {
            inner: Suggester::new("term", label)?,
        })
    }

    pub fn sort(mut self, sort: TermSuggestSort) -> Self {
        self.inner.set("sort", sort);
        self
    }

    pub fn suggest_mode(mut self, mode: SuggestMode) -> Self {
        self.inner.set("suggest_mode", mode);
        self
    }

    /// Maximum edit distance of candidate suggestions, 1 or 2.
    pub fn max_edits(mut self, max_edits: u8) -> Self {
        self.inner.set("max_edits", u32::from(max_edits));
        self
    }

    /// Number of leading characters that must match.
    pub fn prefix_length(mut self, length: u32) -> Self {
        self.inner.set("prefix_length", length);
        self
    }

    pub fn min_word_length(mut self, length: u32) -> Self {
        self.inner.set("min_word_length", length);
        self
    }

    /// Factor applied to `size` to inspect more candidates per shard.
    pub fn max_inspections(mut self, factor: u32) -> Self {
        self.inner.set("max_inspections", factor);
        self
    }

    /// Minimum number (or fraction, if below 1) of documents a suggestion
    /// must appear in.
    pub fn min_doc_freq(mut self, freq: f64) -> Self {
        self.inner.set("min_doc_freq", freq);
        self
    }

    /// Maximum number (or fraction, if below 1) of documents a suggest text
    /// token may appear in to be corrected.
    pub fn max_term_freq(mut self, freq: f64) -> Self {
        self.inner.set("max_term_freq", freq);
        self
    }

    pub fn string_distance(mut self, distance: StringDistance) -> Self {
        self.inner.set("string_distance", distance);
        self
    }
}

impl_suggester_builder!(TermSuggester);
impl AnalyzedSuggesterBuilder for TermSuggester {}
