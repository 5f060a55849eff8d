//! Override record data structures

use serde::{Deserialize, Serialize};

/// A single parameter name token from a `<paramnames>` list.
///
/// Keyword-only parameters are written with a trailing `=` in the token form
/// (`'replace='`); positional parameters carry the bare name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamName {
    pub name: String,
    pub keyword_only: bool,
}

impl ParamName {
    /// Create a positional parameter name
    pub fn positional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            keyword_only: false,
        }
    }

    /// Create a keyword-only parameter name
    pub fn keyword(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            keyword_only: true,
        }
    }

    /// Parse a token from a paramnames list, honoring the trailing `=` marker
    pub fn from_token(token: &str) -> Self {
        match token.strip_suffix('=') {
            Some(name) => Self::keyword(name),
            None => Self::positional(token),
        }
    }

    /// Convert back to the token form used in the source format
    pub fn token(&self) -> String {
        if self.keyword_only {
            format!("{}=", self.name)
        } else {
            self.name.clone()
        }
    }
}

/// A parsed documentation override for one external API symbol
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideRecord {
    /// Fully-qualified dotted namespace, unique within a registry
    pub namespace: String,
    /// Human-readable call signature; descriptive only, never executed
    pub signature: Option<String>,
    /// Ordered parameter name tokens, positional then keyword
    pub param_names: Vec<ParamName>,
    /// Free-text documentation body, may embed usage examples
    pub description: String,
    /// 1-based source line where the block starts
    pub line: u32,
}

impl OverrideRecord {
    /// Create a record with no signature and no parameters.
    ///
    /// `line` stays 1-based: records built in code rather than parsed from a
    /// source file report line 1.
    pub fn new(namespace: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            signature: None,
            param_names: Vec::new(),
            description: description.into(),
            line: 1,
        }
    }

    /// Names of the positional parameters, in declaration order
    pub fn positional_params(&self) -> impl Iterator<Item = &str> {
        self.param_names
            .iter()
            .filter(|p| !p.keyword_only)
            .map(|p| p.name.as_str())
    }

    /// Names of the keyword-only parameters, in declaration order
    pub fn keyword_params(&self) -> impl Iterator<Item = &str> {
        self.param_names
            .iter()
            .filter(|p| p.keyword_only)
            .map(|p| p.name.as_str())
    }

    /// Look up one parameter token by name
    pub fn param(&self, name: &str) -> Option<&ParamName> {
        self.param_names.iter().find(|p| p.name == name)
    }
}
