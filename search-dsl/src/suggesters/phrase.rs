//! Phrase suggester.

use search_dsl_shared::{param_enum, DslError, DslValue, OptionsBag, Serializable};

use crate::core::{impl_suggester_builder, AnalyzedSuggesterBuilder, Script, Suggester};
use crate::suggesters::SuggestMode;

param_enum! {
    /// Smoothing model balancing weight between frequent and infrequent grams.
    pub enum SmoothingKind("smoothing", "search-suggesters.html", Lower) {
        StupidBackoff => "stupid_backoff",
        Laplace => "laplace",
        LinearInterpolation => "linear_interpolation",
    }
}

/// Smoothing model of a [`PhraseSuggester`] with its parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SmoothingModel {
    StupidBackoff { discount: f64 },
    Laplace { alpha: f64 },
    LinearInterpolation { trigram: f64, bigram: f64, unigram: f64 },
}

impl SmoothingModel {
    pub fn kind(&self) -> SmoothingKind {
        match self {
            Self::StupidBackoff { .. } => SmoothingKind::StupidBackoff,
            Self::Laplace { .. } => SmoothingKind::Laplace,
            Self::LinearInterpolation { .. } => SmoothingKind::LinearInterpolation,
        }
    }
}

impl From<SmoothingModel> for DslValue {
    fn from(model: SmoothingModel) -> Self {
        let mut params = OptionsBag::new();
        match model {
            SmoothingModel::StupidBackoff { discount } => params.set("discount", discount),
            SmoothingModel::Laplace { alpha } => params.set("alpha", alpha),
            SmoothingModel::LinearInterpolation {
                trigram,
                bigram,
                unigram,
            } => {
                params.set("trigram_lambda", trigram);
                params.set("bigram_lambda", bigram);
                params.set("unigram_lambda", unigram);
            }
        }

        let mut body = OptionsBag::new();
        body.set(model.kind().as_str(), params);
        body.into()
    }
}

/// Candidate generator of a [`PhraseSuggester`].
#[derive(Debug, Clone)]
pub struct DirectGenerator {
    opts: OptionsBag,
}

impl DirectGenerator {
    pub fn new(field: impl Into<String>) -> Self {
        let mut opts = OptionsBag::new();
        opts.set("field", field.into());
        Self { opts }
    }

    pub fn size(mut self, size: u32) -> Self {
        self.opts.set("size", size);
        self
    }

    pub fn suggest_mode(mut self, mode: SuggestMode) -> Self {
        self.opts.set("suggest_mode", mode);
        self
    }

    pub fn max_edits(mut self, max_edits: u8) -> Self {
        self.opts.set("max_edits", u32::from(max_edits));
        self
    }

    pub fn prefix_length(mut self, length: u32) -> Self {
        self.opts.set("prefix_length", length);
        self
    }

    pub fn min_word_length(mut self, length: u32) -> Self {
        self.opts.set("min_word_length", length);
        self
    }

    pub fn max_inspections(mut self, factor: u32) -> Self {
        self.opts.set("max_inspections", factor);
        self
    }

    pub fn min_doc_freq(mut self, freq: f64) -> Self {
        self.opts.set("min_doc_freq", freq);
        self
    }

    pub fn max_term_freq(mut self, freq: f64) -> Self {
        self.opts.set("max_term_freq", freq);
        self
    }

    /// Analyzer applied to each token before it is passed to the generator.
    pub fn pre_filter(mut self, analyzer: impl Into<String>) -> Self {
        self.opts.set("pre_filter", analyzer.into());
        self
    }

    /// Analyzer applied to each generated token.
    pub fn post_filter(mut self, analyzer: impl Into<String>) -> Self {
        self.opts.set("post_filter", analyzer.into());
        self
    }
}

impl Serializable for DirectGenerator {
    fn to_value(&self) -> Result<DslValue, DslError> {
        Ok(self.opts.clone().into())
    }

    fn capability(&self) -> &'static str {
        "DirectGenerator"
    }
}

impl From<DirectGenerator> for DslValue {
    fn from(generator: DirectGenerator) -> Self {
        DslValue::entity(generator)
    }
}

search_dsl_shared::impl_json_serialize!(DirectGenerator);

/// Suggests corrected phrases using n-gram language models.
#[derive(Debug, Clone)]
pub struct PhraseSuggester {
    inner: Suggester,
}

impl PhraseSuggester {
    pub fn new(label: impl Into<String>) -> Result<Self, DslError> {
        Ok(Self {
            inner: Suggester::new("phrase", label)?,
        })
    }

    /// Maximum size of the n-grams in the field.
    pub fn gram_size(mut self, size: u32) -> Self {
        self.inner.set("gram_size", size);
        self
    }

    /// Likelihood of a term being misspelled even if it exists.
    pub fn real_word_error_likelihood(mut self, likelihood: f64) -> Self {
        self.inner.set("real_word_error_likelihood", likelihood);
        self
    }

    /// Score factor the input phrase must beat for a suggestion to be
    /// returned.
    pub fn confidence(mut self, confidence: f64) -> Self {
        self.inner.set("confidence", confidence);
        self
    }

    /// Maximum number (or fraction, if below 1) of misspelled terms.
    pub fn max_errors(mut self, max_errors: f64) -> Self {
        self.inner.set("max_errors", max_errors);
        self
    }

    /// Separator between terms in the bigram field.
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.inner.set("separator", separator.into());
        self
    }

    /// Surround changed tokens with `pre_tag` and `post_tag`.
    pub fn highlight(mut self, pre_tag: impl Into<String>, post_tag: impl Into<String>) -> Self {
        let mut highlight = OptionsBag::new();
        highlight.set("pre_tag", pre_tag.into());
        highlight.set("post_tag", post_tag.into());
        self.inner.set("highlight", highlight);
        self
    }

    /// Check each suggestion against `query`, dropping those without
    /// matches unless `prune` is set.
    pub fn collate(mut self, query: Script, prune: bool) -> Self {
        let mut collate = OptionsBag::new();
        collate.set("query", query);
        collate.set("prune", prune);
        self.inner.set("collate", collate);
        self
    }

    pub fn smoothing(mut self, model: SmoothingModel) -> Self {
        self.inner.set("smoothing", model);
        self
    }

    /// Add a candidate generator.
    pub fn direct_generator(mut self, generator: DirectGenerator) -> Self {
        self.inner.push("direct_generator", generator);
        self
    }

    /// Maximum number of tokens considered.
    pub fn token_limit(mut self, limit: u32) -> Self {
        self.inner.set("token_limit", limit);
        self
    }

    pub fn force_unigrams(mut self, enabled: bool) -> Self {
        self.inner.set("force_unigrams", enabled);
        self
    }
}

impl_suggester_builder!(PhraseSuggester);
impl AnalyzedSuggesterBuilder for PhraseSuggester {}
