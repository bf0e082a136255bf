//! The vocabulary store: a triple store plus SKOS semantics.
//!
//! `VocabularyStore` owns the [`TripleStore`] handle and adds extension
//! inference on load. Materialization, hierarchy queries and walks live in
//! their own modules as further `impl` blocks on this type.

use std::path::Path;

use navocab_core::{NamespaceTable, Result};

use crate::config::StoreConfig;
use crate::inference::ExtensionOutcome;
use crate::rows::Bindings;
use crate::triple_store::{LoadedGraph, SparqlSource, TripleStore};

/// What one `load` call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOutcome {
    /// Triples parsed from the document.
    pub triple_count: usize,
    /// The concept scheme the document declares, if any.
    pub vocabulary: Option<String>,
    /// Result of extension inference for that scheme.
    pub extension: ExtensionOutcome,
}

/// SKOS vocabularies held in a triple store.
#[derive(Debug)]
pub struct VocabularyStore {
    triples: TripleStore,
}

impl VocabularyStore {
    /// Open the store described by `config`.
    pub fn open(config: &StoreConfig) -> Result<Self> {
        Ok(Self {
            triples: TripleStore::open(config)?,
        })
    }

    /// Open a fresh in-memory store.
    pub fn in_memory() -> Result<Self> {
        Ok(Self {
            triples: TripleStore::in_memory()?,
        })
    }

    /// Wrap an already opened triple store.
    pub fn from_triples(triples: TripleStore) -> Self {
        Self { triples }
    }

    pub fn triples(&self) -> &TripleStore {
        &self.triples
    }

    /// Load a vocabulary document and infer what it extends.
    pub fn load(&mut self, source: impl AsRef<Path>, format: Option<&str>) -> Result<LoadOutcome> {
        self.load_with_bindings(source, format, &[])
    }

    /// [`VocabularyStore::load`] with extra namespace bindings.
    pub fn load_with_bindings(
        &mut self,
        source: impl AsRef<Path>,
        format: Option<&str>,
        bindings: &[(&str, &str)],
    ) -> Result<LoadOutcome> {
        let loaded = self
            .triples
            .load_with_bindings(source, format, bindings)?;
        self.after_load(&loaded)
    }

    /// Load a vocabulary document held in memory.
    pub fn load_str(&mut self, text: &str, format: &str) -> Result<LoadOutcome> {
        let loaded = self.triples.load_str(text, format)?;
        self.after_load(&loaded)
    }

    fn after_load(&mut self, loaded: &LoadedGraph) -> Result<LoadOutcome> {
        let (vocabulary, extension) = self.infer_extension(loaded)?;
        Ok(LoadOutcome {
            triple_count: loaded.len(),
            vocabulary,
            extension,
        })
    }

    // ─── Name resolution ───────────────────────────────────────────────────

    pub fn namespaces(&self) -> &NamespaceTable {
        self.triples.namespaces()
    }

    pub fn bind(&mut self, prefix: &str, uri: &str, override_existing: bool) -> Result<bool> {
        self.triples.bind(prefix, uri, override_existing)
    }

    /// Expand `prefix:local` to a full IRI; anything else is unchanged.
    pub fn expand(&self, name: &str) -> String {
        self.triples.expand(name)
    }

    /// Compact an IRI to `prefix:local`; anything else is unchanged.
    pub fn compact(&self, iri: &str) -> String {
        self.triples.compact(iri)
    }

    // ─── Raw access ────────────────────────────────────────────────────────

    /// Trimmed, non-empty values of `subject predicate ?o`. Both names may be
    /// prefixed.
    pub fn objects(&self, subject: &str, predicate: &str) -> Result<Vec<String>> {
        self.triples
            .objects(&self.expand(subject), &self.expand(predicate))
    }

    /// Run a query projecting `?value`.
    pub fn values(&self, sparql: &str, bindings: &Bindings) -> Result<Vec<String>> {
        self.triples.values(sparql, bindings)
    }

    pub fn len(&self) -> Result<usize> {
        self.triples.len()
    }

    pub fn is_empty(&self) -> Result<bool> {
        self.triples.is_empty()
    }

    /// Flush and release the store.
    pub fn close(self) -> Result<()> {
        self.triples.close()
    }

    pub(crate) fn triples_mut(&mut self) -> &mut TripleStore {
        &mut self.triples
    }
}
