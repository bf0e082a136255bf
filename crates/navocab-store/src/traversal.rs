//! Hierarchy queries and depth-first walks.
//!
//! Walks are pull-based iterators over an explicit work stack, yielding
//! `(identifier, depth)` in pre-order. Each call to a `walk_*` method starts
//! a fresh walk; abandoning one part way needs no cleanup. Each node's
//! neighbours are fetched only when the walk moves past that node.
//!
//! Concept walks are not cycle guarded: a cyclic `skos:broader` graph makes
//! them run forever unless bounded with [`Walk::max_depth`]. The vocabulary
//! tree walk never re-enters a scheme already on its current path.

use tracing::{instrument, trace};

use navocab_core::{Error, HierarchyRepository, Result};

use crate::queries;
use crate::rows::{named_node, Bindings};
use crate::store::VocabularyStore;
use crate::triple_store::SparqlSource;

// =============================================================================
// ONE-HOP AND TRANSITIVE QUERIES
// =============================================================================

impl VocabularyStore {
    /// Run a hierarchy query binding `?concept` and, when given,
    /// `?vocabulary`. Names that are not IRIs match nothing.
    fn hierarchy_query(
        &self,
        unfiltered: &str,
        filtered: &str,
        concept: &str,
        vocabulary: Option<&str>,
    ) -> Result<Vec<String>> {
        let Some(concept) = named_node(&self.expand(concept)) else {
            return Ok(Vec::new());
        };
        let bindings = Bindings::new().bind("concept", concept);
        match vocabulary {
            None => self.triples().values(unfiltered, &bindings),
            Some(vocabulary) => {
                let Some(vocabulary) = named_node(&self.expand(vocabulary)) else {
                    return Ok(Vec::new());
                };
                self.triples()
                    .values(filtered, &bindings.bind("vocabulary", vocabulary))
            }
        }
    }

    fn scheme_query(&self, sparql: &str, vocabulary: &str) -> Result<Vec<String>> {
        let Some(vocabulary) = named_node(&self.expand(vocabulary)) else {
            return Ok(Vec::new());
        };
        self.triples()
            .values(sparql, &Bindings::new().bind("vocabulary", vocabulary))
    }

    /// Schemes that directly extend `vocabulary`.
    pub fn vocab_children(&self, vocabulary: &str) -> Result<Vec<String>> {
        self.scheme_query(&queries::vocab_children(), vocabulary)
    }
}

impl HierarchyRepository for VocabularyStore {
    fn broader(&self, concept: &str, vocabulary: Option<&str>) -> Result<Vec<String>> {
        self.hierarchy_query(
            queries::BROADER,
            queries::BROADER_IN_VOCABULARY,
            concept,
            vocabulary,
        )
    }

    fn narrower(&self, concept: &str, vocabulary: Option<&str>) -> Result<Vec<String>> {
        self.hierarchy_query(
            queries::NARROWER,
            queries::NARROWER_IN_VOCABULARY,
            concept,
            vocabulary,
        )
    }

    #[instrument(
        skip(self),
        fields(subsystem = "traversal", component = "vocabulary", op = "vocab_path")
    )]
    fn vocab_path(&self, vocabulary: &str) -> Result<Vec<String>> {
        self.scheme_query(&queries::vocab_path(), vocabulary)
    }

    #[instrument(
        skip(self),
        fields(subsystem = "traversal", component = "vocabulary", op = "vocab_tree")
    )]
    fn vocab_tree(&self, vocabulary: &str) -> Result<Vec<String>> {
        self.scheme_query(&queries::vocab_tree(), vocabulary)
    }
}

// =============================================================================
// WALKS
// =============================================================================

/// Edge family a [`Walk`] follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Concept to its `skos:broader` children.
    Narrower,
    /// Concept to its `skos:broader` parents.
    Broader,
    /// Scheme to the schemes extending it.
    Extensions,
}

#[derive(Debug)]
struct Frame {
    uri: String,
    depth: usize,
    /// Edges followed from the start node.
    hops: usize,
    /// Schemes from the root down to this frame, excluding it. Only kept for
    /// [`Edge::Extensions`].
    ancestors: Vec<String>,
}

/// Lazy depth-first walk yielding `(identifier, depth)`.
#[derive(Debug)]
pub struct Walk<'a> {
    store: &'a VocabularyStore,
    edge: Edge,
    max_depth: Option<usize>,
    stack: Vec<Frame>,
    /// Frame whose neighbours have not been pushed yet.
    pending: Option<Frame>,
    failed: bool,
}

impl<'a> Walk<'a> {
    fn new(store: &'a VocabularyStore, edge: Edge, start: &str, level: usize, yield_start: bool) -> Self {
        let start = Frame {
            uri: store.expand(start),
            depth: level,
            hops: 0,
            ancestors: Vec::new(),
        };
        let (stack, pending) = if yield_start {
            (vec![start], None)
        } else {
            // Children of the start are yielded at `level` itself.
            let pending = Frame {
                depth: level.wrapping_sub(1),
                ..start
            };
            (Vec::new(), Some(pending))
        };
        Self {
            store,
            edge,
            max_depth: None,
            stack,
            pending,
            failed: false,
        }
    }

    /// Stop descending after `hops` edges from the start node. The start
    /// itself is not counted, so `max_depth(1)` keeps direct neighbours.
    pub fn max_depth(mut self, hops: usize) -> Self {
        self.max_depth = Some(hops);
        self
    }

    fn within_bound(&self, hops: usize) -> bool {
        match self.max_depth {
            Some(max) => hops <= max,
            None => true,
        }
    }

    fn neighbours(&self, uri: &str) -> Result<Vec<String>> {
        match self.edge {
            Edge::Narrower => self.store.narrower(uri, None),
            Edge::Broader => self.store.broader(uri, None),
            Edge::Extensions => self.store.vocab_children(uri),
        }
    }

    fn expand(&mut self, frame: Frame) -> Result<()> {
        let depth = frame.depth.wrapping_add(1);
        let hops = frame.hops + 1;
        if !self.within_bound(hops) {
            return Ok(());
        }
        let mut neighbours = self.neighbours(&frame.uri)?;
        let ancestors = if self.edge == Edge::Extensions {
            neighbours.retain(|n| *n != frame.uri && !frame.ancestors.contains(n));
            let mut path = frame.ancestors;
            path.push(frame.uri);
            path
        } else {
            Vec::new()
        };
        trace!(edge = ?self.edge, depth, count = neighbours.len(), "Expanding node");
        for uri in neighbours.into_iter().rev() {
            self.stack.push(Frame {
                uri,
                depth,
                hops,
                ancestors: ancestors.clone(),
            });
        }
        Ok(())
    }
}

impl Iterator for Walk<'_> {
    type Item = Result<(String, usize)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        if let Some(frame) = self.pending.take() {
            if let Err(e) = self.expand(frame) {
                self.failed = true;
                return Some(Err(e));
            }
        }
        let frame = self.stack.pop()?;
        let item = (frame.uri.clone(), frame.depth);
        self.pending = Some(frame);
        Some(Ok(item))
    }
}

impl VocabularyStore {
    /// Every descendant of `concept`, pre-order. Direct children are at
    /// depth `level`, their children at `level + 1`, and so on. The concept
    /// itself is not yielded.
    pub fn walk_narrower(&self, concept: &str, level: usize) -> Walk<'_> {
        Walk::new(self, Edge::Narrower, concept, level, false)
    }

    /// `concept` at depth `level`, then each ancestor one level further up.
    /// Every branch of a multi-parent concept is followed.
    pub fn walk_broader(&self, concept: &str, level: usize) -> Walk<'_> {
        Walk::new(self, Edge::Broader, concept, level, true)
    }

    /// `vocabulary` at depth `level`, then the schemes extending it, one
    /// level per extension hop.
    pub fn walk_vocab_tree(&self, vocabulary: &str, level: usize) -> Walk<'_> {
        Walk::new(self, Edge::Extensions, vocabulary, level, true)
    }

    /// Ancestor path of `concept` from its first root down to the concept.
    ///
    /// Follows the first broader parent at each step.
    pub fn root_path(&self, concept: &str) -> Result<Vec<String>> {
        let mut path = vec![self.expand(concept)];
        loop {
            let Some(current) = path.last() else { break };
            let Some(parent) = self.broader(current, None)?.into_iter().next() else {
                break;
            };
            if path.contains(&parent) {
                return Err(Error::InvalidInput(format!(
                    "Concept '{}' is on a broader cycle",
                    parent
                )));
            }
            path.push(parent);
        }
        path.reverse();
        Ok(path)
    }
}
