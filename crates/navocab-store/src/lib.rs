//! # navocab-store
//!
//! RDF triple store layer for navocab.
//!
//! This crate provides:
//! - A triple store adapter over oxigraph (in-memory or on disk)
//! - Store configuration from TOML or environment variables
//! - Vocabulary extension inference on load
//! - Concept and vocabulary materialization
//! - Broader/narrower and vocabulary extension walks
//! - Structural validation of loaded vocabularies
//!
//! ## Example
//!
//! ```rust,no_run
//! use navocab_store::{StoreConfig, VocabularyStore};
//!
//! fn main() -> navocab_store::Result<()> {
//!     let mut store = VocabularyStore::open(&StoreConfig::default())?;
//!     store.load("vocabularies/material_type.ttl", None)?;
//!     store.load("vocabularies/material_extension.ttl", None)?;
//!
//!     for step in store.walk_narrower("mat:material", 1) {
//!         let (uri, depth) = step?;
//!         println!("{}{}", "  ".repeat(depth), store.compact(&uri));
//!     }
//!     Ok(())
//! }
//! ```
pub mod config;
pub mod inference;
pub mod materialize;
pub mod queries;
pub mod rows;
pub mod store;
pub mod traversal;
pub mod triple_store;
pub mod validate;

// Re-export core types
pub use navocab_core::*;

pub use config::{ConfigError, ConfigResult, StorageLocation, StoreConfig};
pub use inference::ExtensionOutcome;
pub use rows::{Bindings, EdgeRow, FromSolution, ValueRow, VocabularyRow};
pub use store::{LoadOutcome, VocabularyStore};
pub use traversal::{Edge, Walk};
pub use triple_store::{resolve_format, LoadedGraph, SparqlSource, TripleStore};
pub use validate::{validate, IssueKind, ValidationIssue, ValidationReport};
