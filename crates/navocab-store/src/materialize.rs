//! Concept and vocabulary materialization.
//!
//! Records are rebuilt from the triples on every call; nothing is cached.

use tracing::{debug, instrument, trace};

use navocab_core::terms::{
    DCTERMS_SOURCE, NOTE_PREDICATES, RDFS_SUB_PROPERTY_OF, SKOS_ALT_LABEL, SKOS_BROADER,
    SKOS_DEFINITION, SKOS_EXAMPLE, SKOS_HISTORY_NOTE, SKOS_IN_SCHEME, SKOS_PREF_LABEL,
    SKOS_RELATED, SKOS_TOP_CONCEPT_OF,
};
use navocab_core::{
    Concept, ConceptRepository, Error, HierarchyRepository, Result, Vocabulary,
    VocabularyRepository,
};

use crate::queries;
use crate::rows::{named_node, Bindings, VocabularyRow};
use crate::store::VocabularyStore;
use crate::triple_store::SparqlSource;

impl VocabularyStore {
    /// First scheme `vocabulary` extends: an `rdfs:subPropertyOf` target,
    /// else an `skos:inScheme` target.
    fn extends_of(&self, vocabulary: &str) -> Result<Option<String>> {
        for predicate in [RDFS_SUB_PROPERTY_OF, SKOS_IN_SCHEME] {
            let found = self
                .triples()
                .objects(vocabulary, predicate)?
                .into_iter()
                .find(|target| target != vocabulary);
            if found.is_some() {
                return Ok(found);
            }
        }
        Ok(None)
    }

    /// Materialize every concept, optionally only those of `vocabulary`.
    pub fn concept_list(&self, vocabulary: Option<&str>) -> Result<Vec<Concept>> {
        self.concepts(vocabulary)?
            .iter()
            .map(|uri| self.concept(uri))
            .collect()
    }
}

impl VocabularyRepository for VocabularyStore {
    #[instrument(
        skip(self),
        fields(subsystem = "store", component = "materialize", op = "vocabulary")
    )]
    fn vocabulary(&self, uri: &str) -> Result<Vocabulary> {
        let uri = self.expand(uri);
        let Some(node) = named_node(&uri) else {
            return Err(Error::VocabularyNotFound(uri));
        };
        let rows: Vec<VocabularyRow> = self
            .triples()
            .select(queries::VOCABULARY, &Bindings::new().bind("vocabulary", node))?;
        let Some(row) = rows.into_iter().next() else {
            return Err(Error::VocabularyNotFound(uri));
        };

        let extends = self.extends_of(&uri)?;
        debug!(vocabulary = %uri, extends = ?extends, "Materialized vocabulary");
        Ok(Vocabulary {
            history: self.triples().objects(&uri, SKOS_HISTORY_NOTE)?,
            uri: row.uri,
            label: row.label.unwrap_or_default(),
            description: row.definition.unwrap_or_default(),
            extends,
            source_repository: row.repository,
        })
    }

    fn base_vocabulary(&self) -> Result<Vocabulary> {
        let roots = self
            .triples()
            .values(&queries::base_vocabularies(), &Bindings::new())?;
        let Some(root) = roots.first() else {
            return Err(Error::NoBaseVocabulary);
        };
        if roots.len() > 1 {
            debug!(candidates = ?roots, base = %root, "Several base vocabularies, using the first");
        }
        self.vocabulary(root)
    }

    fn vocabularies(&self) -> Result<Vec<String>> {
        self.triples().values(queries::SCHEMES, &Bindings::new())
    }
}

impl ConceptRepository for VocabularyStore {
    fn concept(&self, identifier: &str) -> Result<Concept> {
        let uri = self.expand(identifier);
        let triples = self.triples();
        trace!(concept = %uri, "Materializing concept");

        let mut label = triples.objects(&uri, SKOS_PREF_LABEL)?;
        label.extend(triples.objects(&uri, SKOS_ALT_LABEL)?);

        let mut notes = Vec::new();
        for predicate in NOTE_PREDICATES {
            notes.extend(triples.objects(&uri, predicate)?);
        }

        let vocabulary = match triples.objects(&uri, SKOS_IN_SCHEME)?.into_iter().next() {
            Some(scheme) => Some(scheme),
            None => triples
                .objects(&uri, SKOS_TOP_CONCEPT_OF)?
                .into_iter()
                .next(),
        };

        Ok(Concept {
            name: Concept::local_name(&uri).to_string(),
            label,
            definition: triples
                .objects(&uri, SKOS_DEFINITION)?
                .join("\n")
                .trim()
                .to_string(),
            broader: triples.objects(&uri, SKOS_BROADER)?,
            narrower: self.narrower(&uri, None)?,
            vocabulary,
            history: triples.objects(&uri, SKOS_HISTORY_NOTE)?,
            sources: triples.objects(&uri, DCTERMS_SOURCE)?,
            notes,
            related: triples.objects(&uri, SKOS_RELATED)?,
            example: triples.objects(&uri, SKOS_EXAMPLE)?,
            uri,
        })
    }

    fn concepts(&self, vocabulary: Option<&str>) -> Result<Vec<String>> {
        match vocabulary {
            None => self.triples().values(queries::CONCEPTS, &Bindings::new()),
            Some(vocabulary) => {
                let Some(node) = named_node(&self.expand(vocabulary)) else {
                    return Ok(Vec::new());
                };
                self.triples().values(
                    queries::CONCEPTS_IN_VOCABULARY,
                    &Bindings::new().bind("vocabulary", node),
                )
            }
        }
    }

    #[instrument(
        skip(self),
        fields(subsystem = "store", component = "materialize", op = "top_concept")
    )]
    fn top_concept(&self) -> Result<Vec<Concept>> {
        let uris = self
            .triples()
            .values(queries::TOP_CONCEPTS, &Bindings::new())?;
        debug!(result_count = uris.len(), "Found top concepts");
        if uris.is_empty() {
            return Err(Error::NoTopConcept);
        }
        uris.iter().map(|uri| self.concept(uri)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"
@prefix skos: <http://www.w3.org/2004/02/skos/core#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
@prefix dcterms: <http://purl.org/dc/terms/> .
@prefix schema: <https://schema.org/> .
@prefix t: <https://example.net/t/> .

t:vocab a skos:ConceptScheme ;
    skos:prefLabel "Test Vocabulary" ;
    skos:definition "For tests." ;
    skos:historyNote "Created" ;
    schema:codeRepository "https://example.net/repo" .

t:root a skos:Concept ;
    skos:topConceptOf t:vocab ;
    skos:prefLabel "Root" ;
    skos:altLabel "Everything" ;
    skos:definition "  The root.  " ;
    skos:scopeNote "Scope" ;
    rdfs:comment "Comment" ;
    dcterms:source "Book" ;
    skos:example "An example" .

t:leaf a skos:Concept ;
    skos:inScheme t:vocab ;
    skos:broader t:root ;
    skos:related t:root .

t:placeholder a skos:Concept ;
    skos:topConceptOf t:vocab .
"#;

    fn loaded() -> VocabularyStore {
        let mut s = VocabularyStore::in_memory().unwrap();
        s.load_str(DOC, "text/turtle").unwrap();
        s
    }

    #[test]
    fn test_vocabulary_fields() {
        let s = loaded();
        let v = s.vocabulary("t:vocab").unwrap();
        assert_eq!(v.uri, "https://example.net/t/vocab");
        assert_eq!(v.label, "Test Vocabulary");
        assert_eq!(v.description, "For tests.");
        assert_eq!(v.history, vec!["Created".to_string()]);
        assert_eq!(v.source_repository.as_deref(), Some("https://example.net/repo"));
        assert!(v.is_base());
    }

    #[test]
    fn test_unknown_vocabulary_is_not_found() {
        let s = loaded();
        let err = s.vocabulary("t:root").unwrap_err();
        assert!(matches!(err, Error::VocabularyNotFound(_)));
        assert!(err.is_not_found());
        assert!(s.vocabulary("not an iri").is_err());
    }

    #[test]
    fn test_base_vocabulary() {
        let s = loaded();
        assert_eq!(s.base_vocabulary().unwrap().uri, "https://example.net/t/vocab");
        let empty = VocabularyStore::in_memory().unwrap();
        assert!(matches!(empty.base_vocabulary(), Err(Error::NoBaseVocabulary)));
    }

    #[test]
    fn test_concept_fields() {
        let s = loaded();
        let c = s.concept("t:root").unwrap();
        assert_eq!(c.uri, "https://example.net/t/root");
        assert_eq!(c.name, "root");
        assert_eq!(c.label, vec!["Root".to_string(), "Everything".to_string()]);
        assert_eq!(c.definition, "The root.");
        assert_eq!(c.broader, Vec::<String>::new());
        assert_eq!(c.narrower, vec!["https://example.net/t/leaf".to_string()]);
        assert_eq!(c.vocabulary.as_deref(), Some("https://example.net/t/vocab"));
        assert_eq!(c.notes, vec!["Scope".to_string(), "Comment".to_string()]);
        assert_eq!(c.sources, vec!["Book".to_string()]);
        assert_eq!(c.example, vec!["An example".to_string()]);

        let leaf = s.concept("https://example.net/t/leaf").unwrap();
        assert_eq!(leaf.broader, vec!["https://example.net/t/root".to_string()]);
        assert_eq!(leaf.related, vec!["https://example.net/t/root".to_string()]);
        assert_eq!(leaf.vocabulary.as_deref(), Some("https://example.net/t/vocab"));
        assert_eq!(leaf.display_label(), "leaf");
    }

    #[test]
    fn test_unknown_concept_is_empty_not_an_error() {
        let s = loaded();
        let c = s.concept("t:missing").unwrap();
        assert_eq!(c.name, "missing");
        assert!(c.label.is_empty());
        assert!(c.definition.is_empty());
        assert_eq!(c.vocabulary, None);
    }

    #[test]
    fn test_materialization_is_value_equal() {
        let s = loaded();
        assert_eq!(s.concept("t:root").unwrap(), s.concept("t:root").unwrap());
        assert_eq!(
            s.concept("t:root").unwrap(),
            s.concept("https://example.net/t/root").unwrap()
        );
    }

    #[test]
    fn test_concepts_with_and_without_filter() {
        let s = loaded();
        assert_eq!(s.concepts(None).unwrap().len(), 3);
        let mut in_vocab = s.concepts(Some("t:vocab")).unwrap();
        in_vocab.sort();
        assert_eq!(in_vocab.len(), 3);
        assert!(s.concepts(Some("t:other")).unwrap().is_empty());
        assert!(s.concepts(Some("no such thing")).unwrap().is_empty());
    }

    #[test]
    fn test_top_concept_skips_placeholders() {
        let s = loaded();
        let top = s.top_concept().unwrap();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].uri, "https://example.net/t/root");
    }

    #[test]
    fn test_no_top_concept() {
        let s = VocabularyStore::in_memory().unwrap();
        assert!(matches!(s.top_concept(), Err(Error::NoTopConcept)));
    }

    #[test]
    fn test_concept_list() {
        let s = loaded();
        let all = s.concept_list(None).unwrap();
        assert_eq!(all.len(), 3);
        assert!(navocab_core::find_concept("https://example.net/t/leaf", &all).is_some());
    }
}
