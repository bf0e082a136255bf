//! Vocabulary extension inference.
//!
//! After each load the concept scheme declared by the new document is
//! linked to the schemes it extends. An explicit `rdfs:subPropertyOf` or
//! `skos:inScheme` edge between schemes wins. Otherwise the vocabularies of
//! the concepts its concepts are narrower than become parents, and one
//! `rdfs:subPropertyOf` edge per parent is written to the store.
//!
//! Parents must already be loaded: an extension loaded before its base
//! stays unresolved.

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use navocab_core::terms::RDFS_SUB_PROPERTY_OF;
use navocab_core::{ConceptRepository, Result};

use crate::queries;
use crate::rows::{named_node, Bindings};
use crate::store::VocabularyStore;
use crate::triple_store::{LoadedGraph, SparqlSource};

/// How the extension of a freshly loaded scheme was settled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "extends", rename_all = "snake_case")]
pub enum ExtensionOutcome {
    /// The document declares no concept scheme.
    NoScheme,
    /// The scheme already had extension edges; nothing was written.
    Explicit(Vec<String>),
    /// Edges to these schemes were inferred and written.
    Inferred(Vec<String>),
    /// Every broader edge stays inside the scheme.
    Base,
    /// Broader concepts outside the scheme exist but none belongs to a
    /// loaded vocabulary.
    Unresolved,
}

impl ExtensionOutcome {
    /// Parent schemes recorded for the loaded vocabulary.
    pub fn parents(&self) -> &[String] {
        match self {
            Self::Explicit(parents) | Self::Inferred(parents) => parents,
            Self::NoScheme | Self::Base | Self::Unresolved => &[],
        }
    }
}

impl VocabularyStore {
    /// Settle the extension of the scheme declared in `loaded`.
    ///
    /// Scheme detection looks only at `loaded`; membership of broader
    /// concepts is resolved against the whole store.
    #[instrument(
        skip(self, loaded),
        fields(
            subsystem = "inference",
            component = "extension",
            op = "infer_extends",
            source = loaded.source()
        )
    )]
    pub(crate) fn infer_extension(
        &mut self,
        loaded: &LoadedGraph,
    ) -> Result<(Option<String>, ExtensionOutcome)> {
        let schemes = loaded.values(queries::SCHEMES, &Bindings::new())?;
        let Some(vocabulary) = schemes.first().cloned() else {
            warn!("Loaded vocabulary does not specify skos:ConceptScheme");
            return Ok((None, ExtensionOutcome::NoScheme));
        };
        if schemes.len() > 1 {
            warn!(
                vocabulary = %vocabulary,
                scheme_count = schemes.len(),
                "Loaded document declares several concept schemes, using the first"
            );
        }
        info!(vocabulary = %vocabulary, "Loaded vocabulary");

        let Some(node) = named_node(&vocabulary) else {
            warn!(vocabulary = %vocabulary, "Loaded concept scheme has no IRI");
            return Ok((Some(vocabulary), ExtensionOutcome::Unresolved));
        };

        let explicit = self.triples().values(
            &queries::explicit_extends(),
            &Bindings::new().bind("vocabulary", node),
        )?;
        if !explicit.is_empty() {
            info!(vocabulary = %vocabulary, extends = ?explicit, "Extension is explicit");
            return Ok((Some(vocabulary), ExtensionOutcome::Explicit(explicit)));
        }

        let targets = loaded.values(queries::BROADER_TARGETS, &Bindings::new())?;
        let mut parents: Vec<String> = Vec::new();
        let mut unresolved = 0usize;
        for target in &targets {
            match self.concept(target)?.vocabulary {
                Some(owner) if owner == vocabulary => {}
                Some(owner) if named_node(&owner).is_some() => {
                    if !parents.contains(&owner) {
                        parents.push(owner);
                    }
                }
                _ => {
                    unresolved += 1;
                    debug!(concept = %target, "Broader concept belongs to no known vocabulary");
                }
            }
        }

        if parents.is_empty() {
            if unresolved > 0 {
                warn!(
                    vocabulary = %vocabulary,
                    unresolved,
                    "Cannot determine the vocabulary extended by the loaded vocabulary; load base vocabularies first"
                );
                return Ok((Some(vocabulary), ExtensionOutcome::Unresolved));
            }
            debug!(vocabulary = %vocabulary, "No broader concept outside the loaded vocabulary");
            return Ok((Some(vocabulary), ExtensionOutcome::Base));
        }

        if parents.len() > 1 {
            warn!(
                vocabulary = %vocabulary,
                extends = ?parents,
                "Loaded vocabulary extends more than one vocabulary"
            );
        }
        for parent in &parents {
            self.triples_mut()
                .insert(&vocabulary, RDFS_SUB_PROPERTY_OF, parent)?;
            info!(vocabulary = %vocabulary, extends = %parent, "Inferred vocabulary extension");
        }
        Ok((Some(vocabulary), ExtensionOutcome::Inferred(parents)))
    }
}
