//! Script entity used by script queries, script fields, scripted sorts and
//! values-source aggregations.

use search_dsl_shared::{DslError, DslValue, OptionsBag, Serializable};

/// A script, either inline source or a reference to a stored script.
#[derive(Debug, Clone)]
pub struct Script {
    body: OptionsBag,
    params: Option<OptionsBag>,
}

impl Script {
    /// Script given by its source.
    pub fn inline(source: impl Into<String>) -> Self {
        let mut body = OptionsBag::new();
        body.set("source", source.into());
        Self { body, params: None }
    }

    /// Script stored in the cluster under `id`.
    pub fn stored(id: impl Into<String>) -> Self {
        let mut body = OptionsBag::new();
        body.set("id", id.into());
        Self { body, params: None }
    }

    /// Scripting language, `painless` by default on the server.
    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.body.set("lang", lang.into());
        self
    }

    /// Add one named parameter.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<DslValue>) -> Self {
        self.params
            .get_or_insert_with(OptionsBag::new)
            .set(key, value);
        self
    }

    /// Replace all parameters.
    pub fn params<K, V, I>(mut self, params: I) -> Self
    where
        K: Into<String>,
        V: Into<DslValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        self.params = Some(params.into_iter().collect());
        self
    }
}

impl Serializable for Script {
    fn to_value(&self) -> Result<DslValue, DslError> {
        let mut body = self.body.clone();
        if let Some(params) = &self.params {
            body.set("params", params.clone());
        }
        Ok(body.into())
    }

    fn capability(&self) -> &'static str {
        "Script"
    }
}

impl From<Script> for DslValue {
    fn from(script: Script) -> Self {
        DslValue::entity(script)
    }
}

search_dsl_shared::impl_json_serialize!(Script);
