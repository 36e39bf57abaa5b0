//! Highlighting of matched fragments.

use search_dsl_shared::{param_enum, DslError, DslValue, OptionsBag, Serializable};

use crate::core::AnyQuery;

param_enum! {
    /// Highlighter implementation.
    pub enum HighlightType("type", "highlighting.html", Lower) {
        Unified => "unified",
        Plain => "plain",
        Fvh => "fvh",
        Postings => "postings",
    }
}

param_enum! {
    /// Encoding of the highlighted snippets.
    pub enum Encoder("encoder", "highlighting.html", Lower) {
        Default => "default",
        Html => "html",
    }
}

param_enum! {
    /// How text is broken into snippets by the plain highlighter.
    pub enum Fragmenter("fragmenter", "highlighting.html", Lower) {
        Simple => "simple",
        Span => "span",
    }
}

param_enum! {
    /// Sort order of highlighted fragments.
    pub enum HighlightOrder("order", "highlighting.html", Lower) {
        Score => "score",
    }
}

param_enum! {
    /// How highlighted fragments are broken up.
    pub enum BoundaryScanner("boundary_scanner", "highlighting.html", Lower) {
        Chars => "chars",
        Sentence => "sentence",
        Word => "word",
    }
}

/// Options accepted both globally and per highlighted field.
pub trait HighlightOptions: Sized {
    #[doc(hidden)]
    fn opts_mut(&mut self) -> &mut OptionsBag;

    /// Set an arbitrary option.
    fn option(mut self, key: impl Into<String>, value: impl Into<DslValue>) -> Self {
        self.opts_mut().set(key, value);
        self
    }

    /// Highlighter to use.
    fn highlight_type(self, highlight_type: HighlightType) -> Self {
        self.option("type", highlight_type)
    }

    /// Tags inserted before highlighted text.
    fn pre_tags<I, S>(self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tags: Vec<String> = tags.into_iter().map(Into::into).collect();
        self.option("pre_tags", tags)
    }

    /// Tags inserted after highlighted text.
    fn post_tags<I, S>(self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tags: Vec<String> = tags.into_iter().map(Into::into).collect();
        self.option("post_tags", tags)
    }

    /// Size of each highlighted fragment in characters.
    fn fragment_size(self, size: u32) -> Self {
        self.option("fragment_size", size)
    }

    /// Maximum number of fragments returned.
    fn number_of_fragments(self, count: u32) -> Self {
        self.option("number_of_fragments", count)
    }

    /// Amount of text returned when nothing matched.
    fn no_match_size(self, size: u32) -> Self {
        self.option("no_match_size", size)
    }

    /// Sort order of fragments.
    fn order(self, order: HighlightOrder) -> Self {
        self.option("order", order)
    }

    /// Highlight only fields that matched the query.
    fn require_field_match(self, require: bool) -> Self {
        self.option("require_field_match", require)
    }

    /// Query used for highlighting instead of the search query.
    fn highlight_query(self, query: impl Into<AnyQuery>) -> Self {
        self.option("highlight_query", query.into())
    }

    /// Snippet encoding.
    fn encoder(self, encoder: Encoder) -> Self {
        self.option("encoder", encoder)
    }

    /// Snippet splitting for the plain highlighter.
    fn fragmenter(self, fragmenter: Fragmenter) -> Self {
        self.option("fragmenter", fragmenter)
    }

    /// How fragments are broken up.
    fn boundary_scanner(self, scanner: BoundaryScanner) -> Self {
        self.option("boundary_scanner", scanner)
    }

    /// Characters acting as boundaries for the `chars` scanner.
    fn boundary_chars(self, chars: impl Into<String>) -> Self {
        self.option("boundary_chars", chars.into())
    }

    /// How far to scan for boundary characters.
    fn boundary_max_scan(self, max_scan: u32) -> Self {
        self.option("boundary_max_scan", max_scan)
    }

    /// Fields whose matches are combined into this one (`fvh` only).
    fn matched_fields<I, S>(self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        self.option("matched_fields", fields)
    }
}

/// Per-field highlighting settings.
#[derive(Debug, Clone, Default)]
pub struct HighlightField {
    opts: OptionsBag,
}

impl HighlightField {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HighlightOptions for HighlightField {
    fn opts_mut(&mut self) -> &mut OptionsBag {
        &mut self.opts
    }
}

/// Highlight configuration of a search request.
///
/// Serializes as `{ fields: { .. }, ..global options }`.
#[derive(Debug, Clone, Default)]
pub struct Highlight {
    fields: Vec<(String, HighlightField)>,
    opts: OptionsBag,
}

impl Highlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Highlight `field` with the global settings.
    pub fn field(self, field: impl Into<String>) -> Self {
        self.field_with(field, HighlightField::new())
    }

    /// Highlight `field` with its own settings. Replaces earlier settings
    /// for the same field.
    pub fn field_with(mut self, field: impl Into<String>, settings: HighlightField) -> Self {
        let field = field.into();
        match self.fields.iter_mut().find(|(name, _)| *name == field) {
            Some((_, existing)) => *existing = settings,
            None => self.fields.push((field, settings)),
        }
        self
    }

    /// Highlight every field in `fields` with the global settings.
    pub fn fields<I, S>(self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        fields
            .into_iter()
            .fold(self, |highlight, field| highlight.field(field))
    }

    /// Tag schema applied to highlighted text, e.g. `styled`.
    pub fn tags_schema(self, schema: impl Into<String>) -> Self {
        self.option("tags_schema", schema.into())
    }
}

impl HighlightOptions for Highlight {
    fn opts_mut(&mut self) -> &mut OptionsBag {
        &mut self.opts
    }
}

impl Serializable for Highlight {
    fn to_value(&self) -> Result<DslValue, DslError> {
        let fields: OptionsBag = self
            .fields
            .iter()
            .map(|(name, settings)| (name.clone(), settings.opts.clone()))
            .collect();

        let mut body = OptionsBag::new();
        body.set("fields", fields);
        for (key, value) in self.opts.iter() {
            body.set(key, value.clone());
        }
        Ok(body.into())
    }

    fn capability(&self) -> &'static str {
        "Highlight"
    }
}

impl From<Highlight> for DslValue {
    fn from(highlight: Highlight) -> Self {
        DslValue::entity(highlight)
    }
}

search_dsl_shared::impl_json_serialize!(Highlight);
