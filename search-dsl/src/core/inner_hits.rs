//! Inner hits returned with nested or collapsed results.

use search_dsl_shared::{DslError, DslValue, OptionsBag, Serializable};

use crate::core::{Highlight, Script, Sort, SourceFilter};

/// Inner hits definition.
#[derive(Debug, Clone, Default)]
pub struct InnerHits {
    opts: OptionsBag,
    script_fields: Option<OptionsBag>,
}

impl InnerHits {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of the inner hits in the response.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.opts.set("name", name.into());
        self
    }

    pub fn from(mut self, from: u32) -> Self {
        self.opts.set("from", from);
        self
    }

    pub fn size(mut self, size: u32) -> Self {
        self.opts.set("size", size);
        self
    }

    /// Add a sort criterion.
    pub fn sort(mut self, sort: impl Into<Sort>) -> Self {
        self.opts.push("sort", sort.into());
        self
    }

    pub fn highlight(mut self, highlight: Highlight) -> Self {
        self.opts.set("highlight", highlight);
        self
    }

    pub fn source(mut self, source: impl Into<SourceFilter>) -> Self {
        self.opts.set("_source", source.into());
        self
    }

    pub fn explain(mut self, explain: bool) -> Self {
        self.opts.set("explain", explain);
        self
    }

    pub fn version(mut self, version: bool) -> Self {
        self.opts.set("version", version);
        self
    }

    /// Add a field computed by `script` for each inner hit.
    pub fn script_field(mut self, name: impl Into<String>, script: Script) -> Self {
        let mut field = OptionsBag::new();
        field.set("script", script);
        self.script_fields
            .get_or_insert_with(OptionsBag::new)
            .set(name, field);
        self
    }

    pub fn docvalue_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        self.opts.set("docvalue_fields", fields);
        self
    }
}

impl Serializable for InnerHits {
    fn to_value(&self) -> Result<DslValue, DslError> {
        let mut body = self.opts.clone();
        if let Some(script_fields) = &self.script_fields {
            body.set("script_fields", script_fields.clone());
        }
        Ok(body.into())
    }

    fn capability(&self) -> &'static str {
        "InnerHits"
    }
}

impl From<InnerHits> for DslValue {
    fn from(inner_hits: InnerHits) -> Self {
        DslValue::entity(inner_hits)
    }
}

search_dsl_shared::impl_json_serialize!(InnerHits);
