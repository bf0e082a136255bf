//! Repository traits implemented by the vocabulary store.
//!
//! Every method accepts full IRIs or `prefix:local` names.

use crate::{Concept, Result, Vocabulary};

/// Concept scheme lookups.
pub trait VocabularyRepository {
    /// Materialize the concept scheme `uri`.
    ///
    /// Fails with [`crate::Error::VocabularyNotFound`] when no scheme matches.
    fn vocabulary(&self, uri: &str) -> Result<Vocabulary>;

    /// The scheme that extends no other scheme.
    ///
    /// Fails with [`crate::Error::NoBaseVocabulary`] when every scheme
    /// extends something (or there are no schemes).
    fn base_vocabulary(&self) -> Result<Vocabulary>;

    /// IRIs of every concept scheme in the store.
    fn vocabularies(&self) -> Result<Vec<String>>;
}

/// Concept lookups.
pub trait ConceptRepository {
    /// Materialize the concept `identifier`.
    ///
    /// An identifier with no triples yields a concept with empty fields
    /// rather than an error.
    fn concept(&self, identifier: &str) -> Result<Concept>;

    /// IRIs of all `skos:Concept` instances, optionally restricted to those
    /// in (or top concepts of) `vocabulary`.
    fn concepts(&self, vocabulary: Option<&str>) -> Result<Vec<String>>;

    /// Every concept that is the top concept of some scheme.
    ///
    /// Fails with [`crate::Error::NoTopConcept`] when there is none.
    fn top_concept(&self) -> Result<Vec<Concept>>;
}

/// One-hop and transitive hierarchy queries.
pub trait HierarchyRepository {
    /// Direct parents of `concept`, optionally only those in `vocabulary`.
    fn broader(&self, concept: &str, vocabulary: Option<&str>) -> Result<Vec<String>>;

    /// Direct children of `concept`, optionally only those in `vocabulary`.
    fn narrower(&self, concept: &str, vocabulary: Option<&str>) -> Result<Vec<String>>;

    /// Every scheme `vocabulary` transitively extends.
    fn vocab_path(&self, vocabulary: &str) -> Result<Vec<String>>;

    /// Every scheme that transitively extends `vocabulary`.
    fn vocab_tree(&self, vocabulary: &str) -> Result<Vec<String>>;
}
