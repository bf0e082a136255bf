//! # navocab-core
//!
//! Core types, traits, and abstractions for navocab, a semantic layer for
//! SKOS vocabularies held in an RDF store.
//!
//! This crate provides the value types (`Concept`, `Vocabulary`), the error
//! type, the prefix table used to expand and compact names, and the
//! repository traits the store crate implements.

pub mod defaults;
pub mod error;
pub mod logging;
pub mod models;
pub mod namespaces;
pub mod terms;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::*;
pub use namespaces::{Namespace, NamespaceTable};
pub use traits::*;
