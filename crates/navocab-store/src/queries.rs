//! SPARQL text for every query the store issues.
//!
//! Queries project a single `?value` column unless noted otherwise. Input
//! variables (`?concept`, `?vocabulary`) are bound by the caller through a
//! trailing `VALUES` block, see [`crate::rows::Bindings`].

/// Prepended to every query before parsing.
pub const PREFIX_HEADER: &str = "\
PREFIX rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#>
PREFIX rdfs: <http://www.w3.org/2000/01/rdf-schema#>
PREFIX owl: <http://www.w3.org/2002/07/owl#>
PREFIX skos: <http://www.w3.org/2004/02/skos/core#>
PREFIX dcterms: <http://purl.org/dc/terms/>
PREFIX schema: <https://schema.org/>
PREFIX xsd: <http://www.w3.org/2001/XMLSchema#>
";

/// Predicates that link a concept scheme to the scheme it extends.
const EXTENDS_PATH: &str = "rdfs:subPropertyOf|skos:inScheme";

// =============================================================================
// VOCABULARIES
// =============================================================================

/// Every concept scheme.
pub const SCHEMES: &str = r#"
SELECT DISTINCT ?value
WHERE {
    ?value rdf:type skos:ConceptScheme .
}"#;

/// Scheme header fields. Bind `?vocabulary`. Projects
/// `?vocabulary ?label ?definition ?repository`.
pub const VOCABULARY: &str = r#"
SELECT ?vocabulary ?label ?definition ?repository
WHERE {
    ?vocabulary rdf:type skos:ConceptScheme .
    OPTIONAL { ?vocabulary skos:prefLabel ?label . }
    OPTIONAL { ?vocabulary skos:definition ?definition . }
    OPTIONAL { ?vocabulary schema:codeRepository ?repository . }
}"#;

/// Schemes with at least one non-type triple and no outgoing extension edge.
pub fn base_vocabularies() -> String {
    format!(
        r#"
SELECT DISTINCT ?value
WHERE {{
    ?value rdf:type skos:ConceptScheme .
    ?value ?predicate ?other .
    FILTER (?predicate != rdf:type)
    FILTER NOT EXISTS {{ ?value {EXTENDS_PATH} ?parent . }}
}}"#
    )
}

/// Any explicit extension edge out of a scheme, whether or not the target is
/// loaded. Bind `?vocabulary`.
pub fn explicit_extends() -> String {
    format!(
        r#"
SELECT DISTINCT ?value
WHERE {{
    ?vocabulary {EXTENDS_PATH} ?value .
    FILTER (?value != ?vocabulary)
}}"#
    )
}

/// Schemes transitively extended by `?vocabulary`.
pub fn vocab_path() -> String {
    format!(
        r#"
SELECT DISTINCT ?value
WHERE {{
    ?vocabulary ({EXTENDS_PATH})+ ?value .
    FILTER (?value != ?vocabulary)
}}"#
    )
}

/// Schemes that transitively extend `?vocabulary`.
pub fn vocab_tree() -> String {
    format!(
        r#"
SELECT DISTINCT ?value
WHERE {{
    ?value ({EXTENDS_PATH})+ ?vocabulary .
    ?value rdf:type skos:ConceptScheme .
    FILTER (?value != ?vocabulary)
}}"#
    )
}

/// Schemes that directly extend `?vocabulary`.
pub fn vocab_children() -> String {
    format!(
        r#"
SELECT DISTINCT ?value
WHERE {{
    ?value {EXTENDS_PATH} ?vocabulary .
    ?value rdf:type skos:ConceptScheme .
    FILTER (?value != ?vocabulary)
}}"#
    )
}

// =============================================================================
// CONCEPTS
// =============================================================================

/// Every `skos:Concept`.
pub const CONCEPTS: &str = r#"
SELECT DISTINCT ?value
WHERE {
    ?value rdf:type skos:Concept .
}"#;

/// Concepts in, or top concepts of, `?vocabulary`.
pub const CONCEPTS_IN_VOCABULARY: &str = r#"
SELECT DISTINCT ?value
WHERE {
    ?value skos:inScheme|skos:topConceptOf ?vocabulary .
    ?value rdf:type skos:Concept .
}"#;

/// Top concepts that carry at least one predicate beyond their typing and
/// the top concept edge itself.
pub const TOP_CONCEPTS: &str = r#"
SELECT DISTINCT ?value
WHERE {
    ?value rdf:type skos:Concept .
    ?value skos:topConceptOf ?scheme .
    ?value ?predicate ?other .
    FILTER (?predicate != rdf:type && ?predicate != skos:topConceptOf)
}"#;

/// Targets of every `skos:broader` edge.
pub const BROADER_TARGETS: &str = r#"
SELECT DISTINCT ?value
WHERE {
    ?child skos:broader ?value .
}"#;

// =============================================================================
// HIERARCHY
// =============================================================================

/// Direct parents of `?concept`.
pub const BROADER: &str = r#"
SELECT ?value
WHERE {
    ?concept skos:broader ?value .
}"#;

/// Direct parents of `?concept` belonging to `?vocabulary`.
pub const BROADER_IN_VOCABULARY: &str = r#"
SELECT DISTINCT ?value
WHERE {
    ?concept skos:broader ?value .
    ?value skos:inScheme|skos:topConceptOf ?vocabulary .
}"#;

/// Direct children of `?concept`.
pub const NARROWER: &str = r#"
SELECT ?value
WHERE {
    ?value skos:broader ?concept .
}"#;

/// Direct children of `?concept` belonging to `?vocabulary`.
pub const NARROWER_IN_VOCABULARY: &str = r#"
SELECT DISTINCT ?value
WHERE {
    ?value skos:broader ?concept .
    ?value skos:inScheme|skos:topConceptOf ?vocabulary .
}"#;

// =============================================================================
// VALIDATION
// =============================================================================

pub const SCHEMES_WITHOUT_LABEL: &str = r#"
SELECT DISTINCT ?value
WHERE {
    ?value rdf:type skos:ConceptScheme .
    FILTER NOT EXISTS { ?value skos:prefLabel ?label . }
}"#;

pub const CONCEPTS_WITHOUT_LABEL: &str = r#"
SELECT DISTINCT ?value
WHERE {
    ?value rdf:type skos:Concept .
    FILTER NOT EXISTS { ?value skos:prefLabel ?label . }
}"#;

pub const CONCEPTS_WITHOUT_SCHEME: &str = r#"
SELECT DISTINCT ?value
WHERE {
    ?value rdf:type skos:Concept .
    FILTER NOT EXISTS { ?value skos:inScheme|skos:topConceptOf ?scheme . }
}"#;

/// Projects `?subject ?value`: a broader edge whose target is not a concept.
pub const BROADER_NOT_CONCEPT: &str = r#"
SELECT DISTINCT ?subject ?value
WHERE {
    ?subject skos:broader ?value .
    FILTER NOT EXISTS { ?value rdf:type skos:Concept . }
}"#;

/// Concepts reachable from themselves through `skos:broader`.
pub const BROADER_CYCLES: &str = r#"
SELECT DISTINCT ?value
WHERE {
    ?value skos:broader+ ?value .
}"#;
