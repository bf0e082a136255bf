//! IRIs of the RDF, RDFS and SKOS terms navocab reads and writes.

// =============================================================================
// NAMESPACES
// =============================================================================

pub const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const RDFS_NS: &str = "http://www.w3.org/2000/01/rdf-schema#";
pub const OWL_NS: &str = "http://www.w3.org/2002/07/owl#";
pub const SKOS_NS: &str = "http://www.w3.org/2004/02/skos/core#";
pub const OBO_NS: &str = "http://purl.obolibrary.org/obo/";
pub const DCTERMS_NS: &str = "http://purl.org/dc/terms/";
pub const SCHEMA_NS: &str = "https://schema.org/";
pub const XSD_NS: &str = "http://www.w3.org/2001/XMLSchema#";
pub const GEOSCIML_NS: &str = "http://resource.geosciml.org/classifier/cgi/lithology";

/// Prefixes every namespace table starts with.
pub const STANDARD_PREFIXES: [(&str, &str); 9] = [
    ("rdf", RDF_NS),
    ("rdfs", RDFS_NS),
    ("owl", OWL_NS),
    ("skos", SKOS_NS),
    ("obo", OBO_NS),
    ("dcterms", DCTERMS_NS),
    ("schema", SCHEMA_NS),
    ("xsd", XSD_NS),
    ("geosciml", GEOSCIML_NS),
];

// =============================================================================
// TERMS
// =============================================================================

pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

pub const RDFS_COMMENT: &str = "http://www.w3.org/2000/01/rdf-schema#comment";

/// Predicate recording that one concept scheme extends another.
pub const RDFS_SUB_PROPERTY_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subPropertyOf";

pub const SKOS_CONCEPT: &str = "http://www.w3.org/2004/02/skos/core#Concept";
pub const SKOS_CONCEPT_SCHEME: &str = "http://www.w3.org/2004/02/skos/core#ConceptScheme";
pub const SKOS_PREF_LABEL: &str = "http://www.w3.org/2004/02/skos/core#prefLabel";
pub const SKOS_ALT_LABEL: &str = "http://www.w3.org/2004/02/skos/core#altLabel";
pub const SKOS_DEFINITION: &str = "http://www.w3.org/2004/02/skos/core#definition";
pub const SKOS_BROADER: &str = "http://www.w3.org/2004/02/skos/core#broader";
pub const SKOS_IN_SCHEME: &str = "http://www.w3.org/2004/02/skos/core#inScheme";
pub const SKOS_TOP_CONCEPT_OF: &str = "http://www.w3.org/2004/02/skos/core#topConceptOf";
pub const SKOS_HISTORY_NOTE: &str = "http://www.w3.org/2004/02/skos/core#historyNote";
pub const SKOS_NOTE: &str = "http://www.w3.org/2004/02/skos/core#note";
pub const SKOS_EDITORIAL_NOTE: &str = "http://www.w3.org/2004/02/skos/core#editorialNote";
pub const SKOS_SCOPE_NOTE: &str = "http://www.w3.org/2004/02/skos/core#scopeNote";
pub const SKOS_CHANGE_NOTE: &str = "http://www.w3.org/2004/02/skos/core#changeNote";
pub const SKOS_RELATED: &str = "http://www.w3.org/2004/02/skos/core#related";
pub const SKOS_EXAMPLE: &str = "http://www.w3.org/2004/02/skos/core#example";

pub const DCTERMS_SOURCE: &str = "http://purl.org/dc/terms/source";

/// Annotation pointing at a vocabulary's source repository.
pub const SCHEMA_CODE_REPOSITORY: &str = "https://schema.org/codeRepository";

/// Predicates whose values are collected into `Concept::notes`, in order.
pub const NOTE_PREDICATES: [&str; 5] = [
    SKOS_NOTE,
    SKOS_EDITORIAL_NOTE,
    SKOS_SCOPE_NOTE,
    SKOS_CHANGE_NOTE,
    RDFS_COMMENT,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terms_live_in_their_namespace() {
        for term in [SKOS_CONCEPT, SKOS_BROADER, SKOS_IN_SCHEME, SKOS_EXAMPLE] {
            assert!(term.starts_with(SKOS_NS), "{term}");
        }
        assert!(RDF_TYPE.starts_with(RDF_NS));
        assert!(RDFS_SUB_PROPERTY_OF.starts_with(RDFS_NS));
        assert!(DCTERMS_SOURCE.starts_with(DCTERMS_NS));
        assert!(SCHEMA_CODE_REPOSITORY.starts_with(SCHEMA_NS));
    }

    #[test]
    fn test_standard_prefixes_are_unique() {
        let mut prefixes: Vec<_> = STANDARD_PREFIXES.iter().map(|(p, _)| *p).collect();
        prefixes.sort_unstable();
        prefixes.dedup();
        assert_eq!(prefixes.len(), STANDARD_PREFIXES.len());
    }
}
