//! End-to-end behaviour of the vocabulary store over the three fixture
//! vocabularies in `tests/data`: a minimal base vocabulary, an extension of
//! it, and an extension of the extension.

use std::path::PathBuf;

use navocab_store::{
    ConceptRepository, Error, ExtensionOutcome, HierarchyRepository, VocabularyRepository,
    VocabularyStore,
};

const MINIMAL_VOCAB: &str = "https://example.net/my/minimal/vocab";
const EXTENSION_VOCAB: &str = "https://example.net/my/extension/vocab";
const EXTENSION2_VOCAB: &str = "https://example.net/my/extension2/vocab";
const THING: &str = "https://example.net/my/minimal/thing";
const SOLID: &str = "https://example.net/my/minimal/solid";
const LIQUID: &str = "https://example.net/my/extension/liquid";

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

fn store_with(names: &[&str]) -> VocabularyStore {
    let mut store = VocabularyStore::in_memory().expect("open in-memory store");
    for name in names {
        store.load(fixture(name), None).expect("load fixture");
    }
    store
}

fn store_for_all() -> VocabularyStore {
    store_with(&[
        "example.ttl",
        "extension_example.ttl",
        "extension_extension.ttl",
    ])
}

fn sorted(mut values: Vec<String>) -> Vec<String> {
    values.sort();
    values
}

#[test]
fn test_top_concept() {
    let store = store_with(&["example.ttl"]);
    let top = store.top_concept().unwrap();
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].uri, THING);
}

#[test]
fn test_concepts() {
    let store = store_with(&["example.ttl", "extension_example.ttl"]);
    let concepts = store.concepts(None).unwrap();
    assert_eq!(concepts.len(), 4);
    for uri in [LIQUID, THING, SOLID] {
        assert!(concepts.contains(&uri.to_string()), "{uri}");
    }

    let all = store_for_all();
    assert_eq!(all.concepts(None).unwrap().len(), 4);
}

#[test]
fn test_concepts_in_vocabulary() {
    let store = store_for_all();
    assert_eq!(
        sorted(store.concepts(Some("eg:vocab")).unwrap()),
        vec![SOLID.to_string(), THING.to_string()]
    );
    assert_eq!(store.concepts(Some(EXTENSION_VOCAB)).unwrap().len(), 2);
}

#[test]
fn test_vocabularies() {
    let store = store_for_all();
    assert_eq!(
        sorted(store.vocabularies().unwrap()),
        vec![
            EXTENSION_VOCAB.to_string(),
            EXTENSION2_VOCAB.to_string(),
            MINIMAL_VOCAB.to_string(),
        ]
    );
}

#[test]
fn test_vocabulary() {
    let store = store_for_all();
    let v = store.vocabulary(MINIMAL_VOCAB).unwrap();
    assert_eq!(v.label, "Minimal Example Vocabulary");
    assert_eq!(v.extends, None);
    assert_eq!(
        v.source_repository.as_deref(),
        Some("https://example.net/my/minimal/repository")
    );
    assert_eq!(v.history.len(), 1);

    let v = store.vocabulary(EXTENSION_VOCAB).unwrap();
    assert_eq!(v.label, "Simple Vocabulary Extension");
    assert_eq!(v.extends.as_deref(), Some(MINIMAL_VOCAB));
}

#[test]
fn test_vocabulary_not_found() {
    let store = store_for_all();
    let err = store
        .vocabulary("https://example.net/my/missing/vocab")
        .unwrap_err();
    assert!(matches!(err, Error::VocabularyNotFound(_)));
}

#[test]
fn test_base_vocabulary() {
    let store = store_for_all();
    assert_eq!(store.base_vocabulary().unwrap().uri, MINIMAL_VOCAB);
}

#[test]
fn test_vocabulary_path() {
    let store = store_for_all();
    assert_eq!(
        sorted(store.vocab_path(EXTENSION2_VOCAB).unwrap()),
        vec![EXTENSION_VOCAB.to_string(), MINIMAL_VOCAB.to_string()]
    );
    assert!(store.vocab_path(MINIMAL_VOCAB).unwrap().is_empty());
}

#[test]
fn test_vocabulary_tree() {
    let store = store_for_all();
    assert_eq!(
        sorted(store.vocab_tree("eg:vocab").unwrap()),
        vec![EXTENSION_VOCAB.to_string(), EXTENSION2_VOCAB.to_string()]
    );

    let walked: Vec<(String, usize)> = store
        .walk_vocab_tree(MINIMAL_VOCAB, 0)
        .collect::<navocab_store::Result<_>>()
        .unwrap();
    assert_eq!(
        walked,
        vec![
            (MINIMAL_VOCAB.to_string(), 0),
            (EXTENSION_VOCAB.to_string(), 1),
            (EXTENSION2_VOCAB.to_string(), 2),
        ]
    );
}

#[test]
fn test_broader() {
    let store = store_for_all();
    let beer = store.concept("ext2:beer").unwrap();
    let res = store.broader(&beer.uri, None).unwrap();
    assert_eq!(res[0], LIQUID);
}

#[test]
fn test_narrower() {
    let store = store_for_all();
    let thing = store.concept("eg:thing").unwrap();
    assert_eq!(
        sorted(store.narrower(&thing.uri, None).unwrap()),
        vec![LIQUID.to_string(), SOLID.to_string()]
    );
    assert_eq!(
        store.narrower(THING, Some(EXTENSION_VOCAB)).unwrap(),
        vec![LIQUID.to_string()]
    );
}

#[test]
fn test_walk_narrower() {
    let store = store_for_all();
    let thing = store.concept("eg:thing").unwrap();
    let walked: Vec<(String, usize)> = store
        .walk_narrower(&thing.uri, 1)
        .collect::<navocab_store::Result<_>>()
        .unwrap();
    assert_eq!(walked.len(), 4);
}

#[test]
fn test_walk_narrower_depths_step_by_one() {
    let store = store_for_all();
    let walked: Vec<(String, usize)> = store
        .walk_narrower(THING, 1)
        .collect::<navocab_store::Result<_>>()
        .unwrap();

    // Pre-order: every entry is at most one level below the entry before it,
    // and the first entry is at the start level.
    assert_eq!(walked[0].1, 1);
    for pair in walked.windows(2) {
        assert!(pair[1].1 <= pair[0].1 + 1, "{:?}", pair);
    }
    // Each entry's depth is its parent's depth plus one.
    for (uri, depth) in &walked {
        let parents = store.broader(uri, None).unwrap();
        let parent_depth = if parents.contains(&THING.to_string()) {
            0
        } else {
            walked
                .iter()
                .find(|(candidate, _)| parents.contains(candidate))
                .map(|(_, d)| *d)
                .unwrap()
        };
        assert_eq!(*depth, parent_depth + 1, "{uri}");
    }
}

#[test]
fn test_walk_broader() {
    let store = store_for_all();
    let walked: Vec<(String, usize)> = store
        .walk_broader("ext2:beer", 0)
        .collect::<navocab_store::Result<_>>()
        .unwrap();
    let uris: Vec<&str> = walked.iter().map(|(uri, _)| uri.as_str()).collect();
    assert_eq!(
        uris,
        vec!["https://example.net/my/extension2/beer", LIQUID, THING]
    );
    let depths: Vec<usize> = walked.iter().map(|(_, d)| *d).collect();
    assert_eq!(depths, vec![0, 1, 2]);
}

#[test]
fn test_round_trip_membership() {
    let store = store_for_all();
    for uri in store.concepts(None).unwrap() {
        let concept = store.concept(&uri).unwrap();
        for parent in &concept.broader {
            assert!(
                store.concept(parent).unwrap().narrower.contains(&uri),
                "{uri} missing from narrower of {parent}"
            );
        }
    }
}

#[test]
fn test_concept_record() {
    let store = store_for_all();
    let solid = store.concept("eg:solid").unwrap();
    assert_eq!(solid.name, "solid");
    assert_eq!(solid.label, vec!["Solid".to_string(), "Solid material".to_string()]);
    assert_eq!(solid.definition, "A thing that keeps its shape.");
    assert_eq!(solid.broader, vec![THING.to_string()]);
    assert!(solid.narrower.is_empty());
    assert_eq!(solid.vocabulary.as_deref(), Some(MINIMAL_VOCAB));
    assert_eq!(solid.sources, vec!["Common usage".to_string()]);
    assert_eq!(solid.example, vec!["A rock".to_string()]);

    let thing = store.concept(THING).unwrap();
    assert_eq!(thing.vocabulary.as_deref(), Some(MINIMAL_VOCAB));
    assert_eq!(thing.notes.len(), 1);
}

#[test]
fn test_load_outcomes() {
    let mut store = VocabularyStore::in_memory().unwrap();
    let base = store.load(fixture("example.ttl"), None).unwrap();
    assert_eq!(base.vocabulary.as_deref(), Some(MINIMAL_VOCAB));
    assert_eq!(base.extension, ExtensionOutcome::Base);

    let ext = store.load(fixture("extension_example.ttl"), None).unwrap();
    assert_eq!(
        ext.extension,
        ExtensionOutcome::Inferred(vec![MINIMAL_VOCAB.to_string()])
    );

    let ext2 = store
        .load(fixture("extension_extension.ttl"), Some("text/turtle"))
        .unwrap();
    assert_eq!(
        ext2.extension,
        ExtensionOutcome::Inferred(vec![EXTENSION_VOCAB.to_string()])
    );
}

#[test]
fn test_loading_twice_is_idempotent() {
    let mut store = store_for_all();
    let size = store.len().unwrap();
    let before = store.vocabulary(EXTENSION_VOCAB).unwrap();

    for name in ["example.ttl", "extension_example.ttl", "extension_extension.ttl"] {
        store.load(fixture(name), None).unwrap();
    }

    assert_eq!(store.len().unwrap(), size);
    assert_eq!(store.vocabulary(EXTENSION_VOCAB).unwrap(), before);
    assert_eq!(
        store
            .objects(EXTENSION_VOCAB, "rdfs:subPropertyOf")
            .unwrap()
            .len(),
        1
    );
}

#[test]
fn test_extension_before_base_is_not_inferred() {
    let mut store = VocabularyStore::in_memory().unwrap();
    let ext = store.load(fixture("extension_example.ttl"), None).unwrap();
    assert_eq!(ext.extension, ExtensionOutcome::Unresolved);
    store.load(fixture("example.ttl"), None).unwrap();

    assert_eq!(store.vocabulary(EXTENSION_VOCAB).unwrap().extends, None);
    assert!(store.vocab_path(EXTENSION_VOCAB).unwrap().is_empty());
}

#[test]
fn test_prefixes_from_documents() {
    let store = store_for_all();
    assert_eq!(store.expand("ext2:beer"), "https://example.net/my/extension2/beer");
    assert_eq!(store.compact(LIQUID), "ext:liquid");
    assert_eq!(store.compact(&store.expand("eg:solid")), "eg:solid");
    let absolute = "https://example.org/not/bound";
    assert_eq!(store.expand(absolute), absolute);
    assert_eq!(store.compact(absolute), absolute);
}

#[test]
fn test_parse_error_propagates() {
    let mut store = store_with(&["example.ttl"]);
    let size = store.len().unwrap();
    let err = store
        .load_str("@prefix eg: <https://example.net/> .\neg:a eg:b", "text/turtle")
        .unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
    assert_eq!(store.len().unwrap(), size);
}

#[test]
fn test_validation_of_fixtures() {
    let store = store_for_all();
    let report = navocab_store::validate(store.triples()).unwrap();
    assert!(report.conforms, "{:?}", report.issues);
}
