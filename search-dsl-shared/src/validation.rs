//! Parameter validation helpers.
//!
//! [`invalid_param`] builds a reusable raiser for "must be one of" constraints
//! bound to a reference URL, a parameter name and the accepted values.
//! Normalizing the received value is left to the caller; the
//! [`param_enum!`](crate::param_enum) macro does it for enumerated
//! parameters before consulting the raiser.

use std::fmt;

use tracing::{info, warn};

use crate::errors::DslError;

/// Accepted values of a constrained parameter, as shown in error messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcceptedValues {
    /// A free-form description, rendered verbatim.
    Description(String),
    /// A set of literal values, rendered as a list.
    Set(Vec<String>),
}

impl fmt::Display for AcceptedValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Description(description) => f.write_str(description),
            Self::Set(values) => write!(f, "{:?}", values),
        }
    }
}

impl From<&str> for AcceptedValues {
    fn from(description: &str) -> Self {
        Self::Description(description.to_string())
    }
}

impl From<String> for AcceptedValues {
    fn from(description: String) -> Self {
        Self::Description(description)
    }
}

impl From<Vec<&str>> for AcceptedValues {
    fn from(values: Vec<&str>) -> Self {
        Self::Set(values.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for AcceptedValues {
    fn from(values: &[&str]) -> Self {
        Self::Set(values.iter().map(|v| v.to_string()).collect())
    }
}

/// Case normalization applied to a received value before it is matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    Lower,
    Upper,
}

impl Case {
    /// Normalize `value` to this case.
    pub fn normalize(self, value: &str) -> String {
        match self {
            Self::Lower => value.to_lowercase(),
            Self::Upper => value.to_uppercase(),
        }
    }
}

/// Raiser for invalid values of one parameter.
#[derive(Debug, Clone)]
pub struct InvalidParam {
    reference_url: Option<String>,
    param: String,
    accepted: AcceptedValues,
    log_diagnostics: bool,
}

/// Build a raiser for invalid values of `param`.
///
/// An empty `reference_url` means no reference link is reported.
pub fn invalid_param(
    reference_url: impl Into<String>,
    param: impl Into<String>,
    accepted: impl Into<AcceptedValues>,
) -> InvalidParam {
    let reference_url = reference_url.into();
    InvalidParam {
        reference_url: (!reference_url.is_empty()).then_some(reference_url),
        param: param.into(),
        accepted: accepted.into(),
        log_diagnostics: true,
    }
}

impl InvalidParam {
    /// Disable the advisory diagnostic events.
    pub fn quiet(mut self) -> Self {
        self.log_diagnostics = false;
        self
    }

    /// Name of the parameter this raiser reports on.
    pub fn param(&self) -> &str {
        &self.param
    }

    /// Documentation page reported alongside the diagnostics, if any.
    pub fn reference_url(&self) -> Option<&str> {
        self.reference_url.as_deref()
    }

    /// Accepted values of the parameter.
    pub fn accepted(&self) -> &AcceptedValues {
        &self.accepted
    }

    /// Build the error for a rejected value.
    ///
    /// There is no success path: the result is meant to be returned as
    /// `Err(..)` by the caller.
    pub fn raise(&self, actual: impl fmt::Display) -> DslError {
        self.raise_with_url(actual, None)
    }

    /// Same as [`raise`](Self::raise), reporting `reference_url` instead of
    /// the bound one.
    pub fn raise_with_url(
        &self,
        actual: impl fmt::Display,
        reference_url: Option<&str>,
    ) -> DslError {
        let actual = actual.to_string();

        if self.log_diagnostics {
            if let Some(url) = reference_url.or(self.reference_url.as_deref()) {
                info!(reference_url = %url, "See {}", url);
            }
            warn!(param = %self.param, value = %actual, "Got '{}' - '{}'", self.param, actual);
        }

        DslError::invalid_param(&self.param, self.accepted.to_string(), actual)
    }
}

/// Declare an enumerated parameter.
///
/// The generated type maps each variant to its wire value, parses received
/// strings after normalizing them to the declared case, and reports unknown
/// values through [`invalid_param`] with the documentation page resolved by
/// the [`DslConfig`](crate::DslConfig) in use.
///
/// ```ignore
/// param_enum! {
///     /// Boolean logic used to interpret text in the query value.
///     pub enum Operator("operator", "query-dsl-match-query.html", Lower) {
///         And => "and",
///         Or => "or",
///     }
/// }
/// ```
#[macro_export]
macro_rules! param_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident ($param:literal, $doc_path:literal, $case:ident) {
            $($(#[$vmeta:meta])* $variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Every accepted value, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Name of the parameter on the wire.
            pub const PARAM: &'static str = $param;

            /// Wire value of this variant.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }

            /// Parse a received value using `config` for diagnostics.
            pub fn parse_with(
                value: &str,
                config: &$crate::DslConfig,
            ) -> Result<Self, $crate::DslError> {
                let normalized = $crate::Case::$case.normalize(value);
                Self::ALL
                    .iter()
                    .copied()
                    .find(|candidate| candidate.as_str() == normalized)
                    .ok_or_else(|| {
                        let accepted: Vec<&str> = Self::ALL.iter().map(|v| v.as_str()).collect();
                        config.invalid_param($doc_path, $param, accepted).raise(value)
                    })
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::DslError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                Self::parse_with(value, &$crate::DslConfig::default())
            }
        }

        impl ::std::convert::TryFrom<&str> for $name {
            type Error = $crate::DslError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$name> for $crate::DslValue {
            fn from(value: $name) -> Self {
                $crate::DslValue::from(value.as_str())
            }
        }
    };
}
