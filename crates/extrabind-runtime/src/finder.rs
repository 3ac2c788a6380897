//! Extra lookup over the three kinds of extra sources

use crate::{Bundle, ExtraValue, RuntimeError, RuntimeResult};
use serde::{Deserialize, Serialize};

/// Where a source keeps its extras.
///
/// A generated extraction routine is handed one of these together with the
/// matching [`ExtraSource`]; it never touches the source directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Finder {
    /// Screen-like source whose extras arrive with its launch request
    Activity,
    /// Embedded component whose extras are its arguments
    Fragment,
    /// A raw bundle
    Bundle,
}

impl Finder {
    /// Look up a value by key; `Ok(None)` is the null lookup result.
    pub fn get_extra<'a>(
        &self,
        source: &'a dyn ExtraSource,
        key: &str,
    ) -> RuntimeResult<Option<&'a ExtraValue>> {
        if source.kind() != *self {
            return Err(RuntimeError::SourceMismatch {
                expected: self.to_string(),
                actual: source.kind().to_string(),
            });
        }
        Ok(source.extras().and_then(|extras| extras.get(key)))
    }
}

impl std::fmt::Display for Finder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Finder::Activity => write!(f, "activity"),
            Finder::Fragment => write!(f, "fragment"),
            Finder::Bundle => write!(f, "bundle"),
        }
    }
}

/// Anything extras can be read from
pub trait ExtraSource {
    /// The finder that knows how to read this source
    fn kind(&self) -> Finder;

    /// The extras, if the source carries any
    fn extras(&self) -> Option<&Bundle>;
}

impl ExtraSource for Bundle {
    fn kind(&self) -> Finder {
        Finder::Bundle
    }

    fn extras(&self) -> Option<&Bundle> {
        Some(self)
    }
}

/// Activity-like source: extras come from the launch request and may be absent.
#[derive(Debug, Clone, Default)]
pub struct ActivitySource {
    extras: Option<Bundle>,
}

impl ActivitySource {
    /// Source launched with the given extras
    pub fn new(extras: Bundle) -> Self {
        Self {
            extras: Some(extras),
        }
    }

    /// Source launched without any extras
    pub fn without_extras() -> Self {
        Self::default()
    }
}

impl ExtraSource for ActivitySource {
    fn kind(&self) -> Finder {
        Finder::Activity
    }

    fn extras(&self) -> Option<&Bundle> {
        self.extras.as_ref()
    }
}

/// Fragment-like source: extras are the component's arguments.
#[derive(Debug, Clone, Default)]
pub struct FragmentSource {
    arguments: Option<Bundle>,
}

impl FragmentSource {
    pub fn new(arguments: Bundle) -> Self {
        Self {
            arguments: Some(arguments),
        }
    }

    pub fn without_arguments() -> Self {
        Self::default()
    }
}

impl ExtraSource for FragmentSource {
    fn kind(&self) -> Finder {
        Finder::Fragment
    }

    fn extras(&self) -> Option<&Bundle> {
        self.arguments.as_ref()
    }
}
