//! Nested JSON concept tree for web UI pickers.
//!
//! Output shape, one object per concept:
//!
//! ```json
//! { "<concept iri>": { "label": { "en": "Label" }, "children": [ ... ] } }
//! ```

use serde_json::{json, Map, Value};
use tracing::{debug, info, instrument};

use navocab_store::defaults::{LABEL_LANGUAGE, UI_TREE_MAX_DEPTH};
use navocab_store::{ConceptRepository, Error, Result, VocabularyRepository, VocabularyStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiNode {
    pub concept: String,
    pub label: String,
    pub children: Vec<UiNode>,
}

impl UiNode {
    pub fn to_json(&self) -> Value {
        let children: Vec<Value> = self.children.iter().map(UiNode::to_json).collect();
        let mut label = Map::new();
        label.insert(LABEL_LANGUAGE.to_string(), Value::String(self.label.clone()));
        let mut entry = Map::new();
        entry.insert(
            self.concept.clone(),
            json!({ "label": label, "children": children }),
        );
        Value::Object(entry)
    }

    /// Number of concepts in this subtree, including this one.
    pub fn concept_count(&self) -> usize {
        1 + self.children.iter().map(UiNode::concept_count).sum::<usize>()
    }
}

/// Node for `uri` and the vocabulary the concept belongs to.
fn node(store: &VocabularyStore, uri: &str) -> Result<(UiNode, Option<String>)> {
    let concept = store.concept(uri)?;
    let label = match concept.label.first() {
        Some(label) => label.clone(),
        None => store.compact(uri),
    };
    let entry = UiNode {
        concept: concept.uri,
        label,
        children: Vec::new(),
    };
    Ok((entry, concept.vocabulary))
}

/// Pop the innermost open node and attach it to its parent.
fn close_last(open: &mut Vec<UiNode>) {
    if open.len() < 2 {
        return;
    }
    if let Some(done) = open.pop() {
        if let Some(parent) = open.last_mut() {
            parent.children.push(done);
        }
    }
}

/// Tree rooted at the first top concept. Unless `extensions` is set only
/// concepts of the base vocabulary are followed.
pub fn concept_tree(store: &VocabularyStore, extensions: bool) -> Result<UiNode> {
    bounded_concept_tree(store, extensions, UI_TREE_MAX_DEPTH)
}

/// As [`concept_tree`], descending at most `max_depth` levels below the root.
#[instrument(
    skip(store),
    fields(subsystem = "render", component = "uijson", op = "concept_tree")
)]
pub fn bounded_concept_tree(
    store: &VocabularyStore,
    extensions: bool,
    max_depth: usize,
) -> Result<UiNode> {
    let base = store.base_vocabulary()?;
    info!(vocabulary = %base.uri, "Using vocabulary");
    let top = store.top_concept()?;
    let root_uri = top
        .first()
        .map(|c| c.uri.clone())
        .ok_or(Error::NoTopConcept)?;
    debug!(concept = %root_uri, "Using root concept");

    let (root, _) = node(store, &root_uri)?;
    // open[d] is the node at depth d whose children are still being read
    let mut open = vec![root];
    let mut skip_below: Option<usize> = None;
    for step in store.walk_narrower(&root_uri, 1).max_depth(max_depth) {
        let (uri, depth) = step?;
        if let Some(limit) = skip_below {
            if depth > limit {
                continue;
            }
            skip_below = None;
        }
        let (entry, vocabulary) = node(store, &uri)?;
        if !extensions && vocabulary.as_deref() != Some(base.uri.as_str()) {
            skip_below = Some(depth);
            continue;
        }
        while open.len() > depth {
            close_last(&mut open);
        }
        open.push(entry);
    }
    while open.len() > 1 {
        close_last(&mut open);
    }
    open.pop().ok_or(Error::NoTopConcept)
}
