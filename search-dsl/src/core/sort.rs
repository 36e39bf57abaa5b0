//! Sort entity.

use search_dsl_shared::{param_enum, DslError, DslValue, OptionsBag, Serializable};

use crate::core::{AnyQuery, Script};

param_enum! {
    /// Sort direction.
    pub enum SortOrder("order", "sort-search-results.html", Lower) {
        Asc => "asc",
        Desc => "desc",
    }
}

param_enum! {
    /// How multi-valued fields are reduced to one sort value.
    pub enum SortMode("mode", "sort-search-results.html", Lower) {
        Min => "min",
        Max => "max",
        Sum => "sum",
        Avg => "avg",
        Median => "median",
    }
}

param_enum! {
    /// Type of the value computed by a scripted sort.
    pub enum ScriptSortType("type", "sort-search-results.html", Lower) {
        Number => "number",
        String => "string",
        Version => "version",
    }
}

#[derive(Debug, Clone)]
enum SortTarget {
    Field(String),
    Script(Script, ScriptSortType),
}

/// Sort on a field or on a script.
///
/// A field sort without options serializes to the bare field name, and one
/// with only an order to `{ <field>: <order> }`.
#[derive(Debug, Clone)]
pub struct Sort {
    target: SortTarget,
    opts: OptionsBag,
    nested: Option<OptionsBag>,
}

impl Sort {
    /// Sort on `field`.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            target: SortTarget::Field(field.into()),
            opts: OptionsBag::new(),
            nested: None,
        }
    }

    /// Sort on relevance score.
    pub fn score() -> Self {
        Self::new("_score")
    }

    /// Sort on the value computed by `script`.
    pub fn script(script: Script, sort_type: ScriptSortType) -> Self {
        Self {
            target: SortTarget::Script(script, sort_type),
            opts: OptionsBag::new(),
            nested: None,
        }
    }

    /// Sort direction.
    pub fn order(mut self, order: SortOrder) -> Self {
        self.opts.set("order", order);
        self
    }

    /// Reduction applied to multi-valued fields.
    pub fn mode(mut self, mode: SortMode) -> Self {
        self.opts.set("mode", mode);
        self
    }

    /// Placement or replacement value for documents missing the field,
    /// e.g. `_last`, `_first` or a custom value.
    pub fn missing(mut self, missing: impl Into<DslValue>) -> Self {
        self.opts.set("missing", missing);
        self
    }

    /// Type assumed for indices where the field is not mapped.
    pub fn unmapped_type(mut self, unmapped_type: impl Into<String>) -> Self {
        self.opts.set("unmapped_type", unmapped_type.into());
        self
    }

    /// Nested object path to sort within.
    pub fn nested_path(mut self, path: impl Into<String>) -> Self {
        self.nested
            .get_or_insert_with(OptionsBag::new)
            .set("path", path.into());
        self
    }

    /// Filter that nested objects must match to be considered.
    pub fn nested_filter(mut self, filter: impl Into<AnyQuery>) -> Self {
        self.nested
            .get_or_insert_with(OptionsBag::new)
            .set("filter", filter.into());
        self
    }

    /// Cast numeric values to this type before sorting.
    pub fn numeric_type(mut self, numeric_type: impl Into<String>) -> Self {
        self.opts.set("numeric_type", numeric_type.into());
        self
    }

    /// Date format of the sort values.
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.opts.set("format", format.into());
        self
    }

    fn options(&self) -> OptionsBag {
        let mut opts = self.opts.clone();
        if let Some(nested) = &self.nested {
            opts.set("nested", nested.clone());
        }
        opts
    }
}

impl From<&str> for Sort {
    fn from(field: &str) -> Self {
        Sort::new(field)
    }
}

impl Serializable for Sort {
    fn to_value(&self) -> Result<DslValue, DslError> {
        let opts = self.options();
        let mut body = OptionsBag::new();
        match &self.target {
            SortTarget::Field(field) => {
                if opts.is_empty() {
                    return Ok(DslValue::from(field.as_str()));
                }
                match opts.get("order") {
                    Some(order) if opts.len() == 1 => body.set(field.as_str(), order.clone()),
                    _ => body.set(field.as_str(), opts),
                }
            }
            SortTarget::Script(script, sort_type) => {
                let mut inner = OptionsBag::new();
                inner.set("type", *sort_type);
                inner.set("script", script.clone());
                for (key, value) in opts {
                    inner.set(key, value);
                }
                body.set("_script", inner);
            }
        }
        Ok(body.into())
    }

    fn capability(&self) -> &'static str {
        "Sort"
    }
}

impl From<Sort> for DslValue {
    fn from(sort: Sort) -> Self {
        DslValue::entity(sort)
    }
}

search_dsl_shared::impl_json_serialize!(Sort);
