//! Completion suggester.

use search_dsl_shared::{DslError, DslValue, OptionsBag};

use crate::core::{impl_suggester_builder, Suggester};

/// Fuzzy matching options of a [`CompletionSuggester`].
#[derive(Debug, Clone, Default)]
pub struct FuzzyOptions {
    opts: OptionsBag,
}

impl FuzzyOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fuzziness(mut self, fuzziness: impl Into<DslValue>) -> Self {
        self.opts.set("fuzziness", fuzziness);
        self
    }

    pub fn transpositions(mut self, enabled: bool) -> Self {
        self.opts.set("transpositions", enabled);
        self
    }

    /// Minimum input length before fuzzy suggestions are returned.
    pub fn min_length(mut self, length: u32) -> Self {
        self.opts.set("min_length", length);
        self
    }

    pub fn prefix_length(mut self, length: u32) -> Self {
        self.opts.set("prefix_length", length);
        self
    }

    /// Measure edit distance in Unicode code points instead of bytes.
    pub fn unicode_aware(mut self, enabled: bool) -> Self {
        self.opts.set("unicode_aware", enabled);
        self
    }
}

impl From<FuzzyOptions> for DslValue {
    fn from(options: FuzzyOptions) -> Self {
        if options.opts.is_empty() {
            true.into()
        } else {
            options.opts.into()
        }
    }
}

/// Search-as-you-type suggestions from a `completion` field.
#[derive(Debug, Clone)]
pub struct CompletionSuggester {
    inner: Suggester,
}

impl CompletionSuggester {
    pub fn new(label: impl Into<String>) -> Result<Self, DslError> {
        Ok(Self {
            inner: Suggester::new("completion", label)?,
        })
    }

    /// Prefix to complete.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.inner.set_outer("prefix", prefix.into());
        self
    }

    /// Regular expression the completions must match.
    pub fn regex(mut self, regex: impl Into<String>) -> Self {
        self.inner.set_outer("regex", regex.into());
        self
    }

    /// Match the prefix with typos. Default options serialize as `true`.
    pub fn fuzzy(mut self, options: FuzzyOptions) -> Self {
        self.inner.set("fuzzy", options);
        self
    }

    /// Drop suggestions with the same text.
    pub fn skip_duplicates(mut self, enabled: bool) -> Self {
        self.inner.set("skip_duplicates", enabled);
        self
    }

    /// Restrict suggestions to the given values of context `name`.
    pub fn context<I>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<DslValue>,
    {
        let values: Vec<DslValue> = values.into_iter().map(Into::into).collect();
        match self.inner.opts_mut().get_mut("contexts") {
            Some(DslValue::Object(contexts)) => contexts.set(name, values),
            _ => {
                let mut contexts = OptionsBag::new();
                contexts.set(name, values);
                self.inner.set("contexts", contexts);
            }
        }
        self
    }
}

impl_suggester_builder!(CompletionSuggester);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SuggesterBuilder;
    use search_dsl_shared::Serializable;
    use serde_json::json;

    #[test]
    fn test_completion() {
        let suggester = CompletionSuggester::new("song-suggest")
            .unwrap()
            .prefix("nir")
            .field("suggest")
            .skip_duplicates(true);
        assert_eq!(
            serde_json::to_string(&suggester).unwrap(),
            r#"{"song-suggest":{"completion":{"field":"suggest","skip_duplicates":true},"prefix":"nir"}}"#
        );
    }

    #[test]
    fn test_fuzzy_completion() {
        let default = CompletionSuggester::new("s")
            .unwrap()
            .field("suggest")
            .fuzzy(FuzzyOptions::new());
        assert_eq!(
            default.to_json().unwrap()["s"]["completion"]["fuzzy"],
            json!(true)
        );

        let tuned = CompletionSuggester::new("s")
            .unwrap()
            .fuzzy(FuzzyOptions::new().fuzziness(2).unicode_aware(true));
        assert_eq!(
            tuned.to_json().unwrap()["s"]["completion"]["fuzzy"],
            json!({ "fuzziness": 2, "unicode_aware": true })
        );
    }

    #[test]
    fn test_contexts() {
        let suggester = CompletionSuggester::new("place_suggestion")
            .unwrap()
            .regex("tim.*")
            .field("suggest")
            .size(10)
            .context("place_type", ["cafe", "restaurants"])
            .context("location", [json!({ "lat": 43.662, "lon": -79.38 })]);
        assert_eq!(
            suggester.to_json().unwrap(),
            json!({
                "place_suggestion": {
                    "regex": "tim.*",
                    "completion": {
                        "field": "suggest",
                        "size": 10,
                        "contexts": {
                            "place_type": ["cafe", "restaurants"],
                            "location": [{ "lat": 43.662, "lon": -79.38 }]
                        }
                    }
                }
            })
        );
    }
}
