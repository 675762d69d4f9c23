//! @dose
//! purpose: This module defines the ReferenceExtractor trait, the narrow seam between the
//!     pipeline and the textual heuristics that find a file's declared namespace and the
//!     same-namespace modules it references. ExtractorFactory hands out the extractor for
//!     a Language.
//!
//! when-editing:
//!     - !New languages must be registered in ExtractorFactory::new()
//!     - !Callers only depend on the trait, so a real parser can replace the regex one
//!
//! invariants:
//!     - Extraction never fails on content; only reading a file can fail
//!     - same_namespace_references returns identifiers in first-seen order without duplicates
//!
//! do-not:
//!     - Never resolve references to paths here (see dependency::namespace_to_path)

mod elixir;

use crate::types::{Language, NamespaceReference};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

pub use elixir::ElixirExtractor;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Trait for language-specific reference extractors
pub trait ReferenceExtractor: Send + Sync {
    /// Returns the language name (e.g., "elixir")
    fn language_name(&self) -> &'static str;

    /// The first top-level module declared in the source, if any
    fn declared_namespace(&self, source: &str) -> Option<NamespaceReference>;

    /// Modules referenced by the source that live under the given namespace root
    fn same_namespace_references(&self, source: &str, root: &str) -> Vec<NamespaceReference>;

    /// Declared namespace root plus every same-namespace reference in the source.
    /// A source without a module declaration yields no references.
    fn extract_references(&self, source: &str) -> Vec<NamespaceReference> {
        let Some(declared) = self.declared_namespace(source) else {
            return Vec::new();
        };
        let root = declared.split('.').next().unwrap_or(declared.as_str());
        self.same_namespace_references(source, root)
    }

    /// Read a file and extract its references
    fn read_references(&self, path: &Path) -> Result<Vec<NamespaceReference>, ExtractError> {
        let source = fs::read_to_string(path).map_err(|source| ExtractError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(self.extract_references(&source))
    }
}

/// Factory for looking up extractors by language
pub struct ExtractorFactory {
    extractors: HashMap<Language, Arc<dyn ReferenceExtractor>>,
}

impl ExtractorFactory {
    pub fn new() -> Self {
        let mut extractors: HashMap<Language, Arc<dyn ReferenceExtractor>> = HashMap::new();
        extractors.insert(Language::Elixir, Arc::new(ElixirExtractor::new()));
        Self { extractors }
    }

    pub fn get(&self, language: Language) -> Option<&dyn ReferenceExtractor> {
        self.extractors.get(&language).map(|e| e.as_ref())
    }
}

impl Default for ExtractorFactory {
    fn default() -> Self {
        Self::new()
    }
}
