//! `_source` filtering.

use search_dsl_shared::{DslValue, OptionsBag};

/// Which parts of `_source` are returned with each hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceFilter {
    /// Return the whole source, or none of it.
    Enabled(bool),
    /// Return only fields matching these patterns.
    Fields(Vec<String>),
    /// Include and exclude patterns.
    Filter {
        includes: Vec<String>,
        excludes: Vec<String>,
    },
}

impl SourceFilter {
    pub fn includes_excludes<I, E, S, T>(includes: I, excludes: E) -> Self
    where
        I: IntoIterator<Item = S>,
        E: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        Self::Filter {
            includes: includes.into_iter().map(Into::into).collect(),
            excludes: excludes.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<bool> for SourceFilter {
    fn from(enabled: bool) -> Self {
        Self::Enabled(enabled)
    }
}

impl From<&str> for SourceFilter {
    fn from(field: &str) -> Self {
        Self::Fields(vec![field.to_string()])
    }
}

impl From<Vec<&str>> for SourceFilter {
    fn from(fields: Vec<&str>) -> Self {
        Self::Fields(fields.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for SourceFilter {
    fn from(fields: Vec<String>) -> Self {
        Self::Fields(fields)
    }
}

impl From<SourceFilter> for DslValue {
    fn from(filter: SourceFilter) -> Self {
        match filter {
            SourceFilter::Enabled(enabled) => enabled.into(),
            SourceFilter::Fields(mut fields) if fields.len() == 1 => fields.remove(0).into(),
            SourceFilter::Fields(fields) => fields.into(),
            SourceFilter::Filter { includes, excludes } => {
                let mut body = OptionsBag::new();
                if !includes.is_empty() {
                    body.set("includes", includes);
                }
                if !excludes.is_empty() {
                    body.set("excludes", excludes);
                }
                body.into()
            }
        }
    }
}
