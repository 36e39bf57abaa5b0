//! Rewrite method of multi-term queries.

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use search_dsl_shared::{DslConfig, DslError, DslValue};

const REWRITE_DOC: &str = "query-dsl-multi-term-rewrite.html";
const ACCEPTED: &str = "'constant_score', 'scoring_boolean', 'constant_score_boolean', \
                        'top_terms_N', 'top_terms_boost_N' or 'top_terms_blended_freqs_N'";

/// How a multi-term query is rewritten into primitive queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rewrite {
    ConstantScore,
    ScoringBoolean,
    ConstantScoreBoolean,
    TopTerms(NonZeroU32),
    TopTermsBoost(NonZeroU32),
    TopTermsBlendedFreqs(NonZeroU32),
}

impl Rewrite {
    /// Parse a received value using `config` for diagnostics.
    ///
    /// Matching is case-insensitive. The `top_terms` variants take their
    /// size from the numeric suffix, which must be a positive decimal number
    /// without sign or leading zeros.
    pub fn parse_with(value: &str, config: &DslConfig) -> Result<Self, DslError> {
        let normalized = value.to_lowercase();
        let sized = |prefix: &str| {
            normalized
                .strip_prefix(prefix)
                .filter(|size| size.bytes().all(|b| b.is_ascii_digit()))
                .filter(|size| !size.starts_with('0'))
                .and_then(|size| size.parse::<NonZeroU32>().ok())
        };

        let parsed = match normalized.as_str() {
            "constant_score" => Some(Self::ConstantScore),
            "scoring_boolean" => Some(Self::ScoringBoolean),
            "constant_score_boolean" => Some(Self::ConstantScoreBoolean),
            _ => sized("top_terms_blended_freqs_")
                .map(Self::TopTermsBlendedFreqs)
                .or_else(|| sized("top_terms_boost_").map(Self::TopTermsBoost))
                .or_else(|| sized("top_terms_").map(Self::TopTerms)),
        };

        parsed.ok_or_else(|| {
            config
                .invalid_param(REWRITE_DOC, "rewrite", ACCEPTED)
                .raise(value)
        })
    }
}

impl fmt::Display for Rewrite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConstantScore => f.write_str("constant_score"),
            Self::ScoringBoolean => f.write_str("scoring_boolean"),
            Self::ConstantScoreBoolean => f.write_str("constant_score_boolean"),
            Self::TopTerms(size) => write!(f, "top_terms_{}", size),
            Self::TopTermsBoost(size) => write!(f, "top_terms_boost_{}", size),
            Self::TopTermsBlendedFreqs(size) => write!(f, "top_terms_blended_freqs_{}", size),
        }
    }
}

impl FromStr for Rewrite {
    type Err = DslError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse_with(value, &DslConfig::default())
    }
}

impl From<Rewrite> for DslValue {
    fn from(rewrite: Rewrite) -> Self {
        DslValue::from(rewrite.to_string())
    }
}
