//! In-memory override registry
//!
//! Built once from a source file, immutable afterwards. Lookup is exact
//! namespace match only; a duplicate namespace in the source fails the load.

use std::collections::HashMap;
use std::path::Path;

use crate::parser::{self, ParseError};
use crate::record::OverrideRecord;

/// Error type for registry operations
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("duplicate namespace {namespace:?} (first declared at line {first_line}, redeclared at line {line})")]
    DuplicateNamespace {
        namespace: String,
        first_line: u32,
        line: u32,
    },
    #[error("namespace {namespace:?} not found")]
    NotFound { namespace: String },
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Registry of docstring overrides keyed by namespace
#[derive(Debug, Clone, Default)]
pub struct OverrideRegistry {
    records: Vec<OverrideRecord>,
    index: HashMap<String, usize>,
}

impl OverrideRegistry {
    /// Load a registry from override source text
    pub fn load_str(input: &str) -> Result<Self, RegistryError> {
        let mut registry = Self::default();
        for record in parser::parse(input)? {
            if let Some(&existing) = registry.index.get(&record.namespace) {
                return Err(RegistryError::DuplicateNamespace {
                    namespace: record.namespace,
                    first_line: registry.records[existing].line,
                    line: record.line,
                });
            }
            registry
                .index
                .insert(record.namespace.clone(), registry.records.len());
            registry.records.push(record);
        }
        Ok(registry)
    }

    /// Load a registry from an override source file
    pub fn load_path(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::load_str(&input)
    }

    /// Look up a record by exact namespace; a miss is `NotFound`
    pub fn lookup(&self, namespace: &str) -> Result<&OverrideRecord, RegistryError> {
        self.get(namespace).ok_or_else(|| RegistryError::NotFound {
            namespace: namespace.to_string(),
        })
    }

    /// Non-erroring lookup by exact namespace
    pub fn get(&self, namespace: &str) -> Option<&OverrideRecord> {
        self.index.get(namespace).map(|&i| &self.records[i])
    }

    /// All records, in source order
    pub fn records(&self) -> impl Iterator<Item = &OverrideRecord> {
        self.records.iter()
    }

    /// All namespaces, in source order
    pub fn namespaces(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.namespace.as_str())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Serialize all records as JSON for the documentation generator
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.records)
    }
}
