//! Configuration types for the DSL builders.

use tracing::warn;
use url::Url;

use crate::validation::{invalid_param, AcceptedValues, InvalidParam};

/// Default base URL of the query DSL reference documentation.
pub const DEFAULT_DOCS_BASE_URL: &str =
    "https://www.elastic.co/guide/en/elasticsearch/reference/current/";

/// Configuration for parameter validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DslConfig {
    /// Base URL that documentation paths are resolved against when building
    /// reference links for invalid parameter diagnostics. `None` reports no
    /// reference link.
    pub docs_base_url: Option<Url>,
    /// Whether to emit the advisory diagnostic events before an invalid
    /// parameter error is returned.
    pub log_diagnostics: bool,
}

impl Default for DslConfig {
    fn default() -> Self {
        Self {
            docs_base_url: Url::parse(DEFAULT_DOCS_BASE_URL).ok(),
            log_diagnostics: true,
        }
    }
}

impl DslConfig {
    /// Create a config that does not emit diagnostic events.
    pub fn quiet() -> Self {
        Self {
            log_diagnostics: false,
            ..Self::default()
        }
    }

    /// Create a config with a custom documentation base URL.
    pub fn with_docs_base_url(docs_base_url: Url) -> Self {
        Self {
            docs_base_url: Some(docs_base_url),
            ..Self::default()
        }
    }

    /// Create a config that reports no reference links.
    pub fn without_docs() -> Self {
        Self {
            docs_base_url: None,
            ..Self::default()
        }
    }

    /// Resolve a documentation page against the configured base URL.
    pub fn reference_url(&self, path: &str) -> Option<Url> {
        let base = self.docs_base_url.as_ref()?;
        match base.join(path) {
            Ok(url) => Some(url),
            Err(error) => {
                warn!(base = %base, path, %error, "Could not resolve reference URL");
                None
            }
        }
    }

    /// Build an invalid parameter raiser bound to a documentation page.
    pub fn invalid_param(
        &self,
        path: &str,
        param: &str,
        accepted: impl Into<AcceptedValues>,
    ) -> InvalidParam {
        let reference_url = self
            .reference_url(path)
            .map(String::from)
            .unwrap_or_default();
        let raiser = invalid_param(reference_url, param, accepted);
        if self.log_diagnostics {
            raiser
        } else {
            raiser.quiet()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DslConfig::default();
        assert_eq!(
            config.docs_base_url.as_ref().map(Url::as_str),
            Some(DEFAULT_DOCS_BASE_URL)
        );
        assert!(config.log_diagnostics);
    }

    #[test]
    fn test_quiet_config() {
        let config = DslConfig::quiet();
        assert!(!config.log_diagnostics);
        assert_eq!(config.docs_base_url, DslConfig::default().docs_base_url);
    }

    #[test]
    fn test_reference_url_joins_path() {
        let config = DslConfig::default();
        assert_eq!(
            config.reference_url("query-dsl-match-query.html").unwrap().as_str(),
            "https://www.elastic.co/guide/en/elasticsearch/reference/current/query-dsl-match-query.html"
        );
    }

    #[test]
    fn test_reference_url_custom_base() {
        let base = Url::parse("https://docs.example.com/search/7.x/").unwrap();
        let config = DslConfig::with_docs_base_url(base);
        assert_eq!(
            config.reference_url("search-request-sort.html").unwrap().as_str(),
            "https://docs.example.com/search/7.x/search-request-sort.html"
        );
    }

    #[test]
    fn test_no_docs_base_reports_no_link() {
        let config = DslConfig::without_docs();
        assert!(config.reference_url("page.html").is_none());

        let raiser = config.invalid_param("page.html", "order", vec!["asc", "desc"]);
        assert_eq!(raiser.reference_url(), None);
    }

    #[test]
    fn test_invalid_param_uses_config() {
        let config = DslConfig::quiet();
        let raiser = config.invalid_param("page.html", "order", vec!["asc", "desc"]);
        assert_eq!(
            raiser.reference_url(),
            Some("https://www.elastic.co/guide/en/elasticsearch/reference/current/page.html")
        );
        let err = raiser.raise("up");
        assert_eq!(err.param(), Some("order"));
    }
}
