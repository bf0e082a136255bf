//! Prefix table for expanding `prefix:local` names and compacting IRIs.
//!
//! Both directions are lenient: anything that cannot be expanded or
//! compacted comes back unchanged, so absolute IRIs pass straight through.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::terms::STANDARD_PREFIXES;

/// A single prefix binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Namespace {
    pub prefix: String,
    pub uri: String,
}

/// Mutable prefix -> namespace table, in binding order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceTable {
    bindings: Vec<Namespace>,
}

impl Default for NamespaceTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl NamespaceTable {
    /// A table with no bindings.
    pub fn empty() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// A table holding the standard RDF/SKOS prefixes.
    pub fn standard() -> Self {
        let mut table = Self::empty();
        for (prefix, uri) in STANDARD_PREFIXES {
            table.bind(prefix, uri, true);
        }
        table
    }

    /// Bind `prefix` to `uri`.
    ///
    /// With `override_existing` false, an already bound prefix or namespace
    /// keeps its current binding. With it true, the new binding replaces both
    /// the old namespace of `prefix` and the old prefix of `uri`.
    /// Returns whether the table changed.
    pub fn bind(&mut self, prefix: &str, uri: &str, override_existing: bool) -> bool {
        if self
            .bindings
            .iter()
            .any(|ns| ns.prefix == prefix && ns.uri == uri)
        {
            return false;
        }
        let conflict = self
            .bindings
            .iter()
            .any(|ns| ns.prefix == prefix || ns.uri == uri);
        if conflict && !override_existing {
            return false;
        }
        self.bindings
            .retain(|ns| ns.prefix != prefix && ns.uri != uri);
        trace!(prefix, uri, "Bound namespace");
        self.bindings.push(Namespace {
            prefix: prefix.to_string(),
            uri: uri.to_string(),
        });
        true
    }

    /// Namespace bound to `prefix`, if any.
    pub fn namespace(&self, prefix: &str) -> Option<&str> {
        self.bindings
            .iter()
            .find(|ns| ns.prefix == prefix)
            .map(|ns| ns.uri.as_str())
    }

    /// Every binding as `(prefix, uri)` in binding order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.bindings
            .iter()
            .map(|ns| (ns.prefix.as_str(), ns.uri.as_str()))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Expand `prefix:local` to a full IRI.
    ///
    /// Unbound prefixes and strings that already look like absolute IRIs
    /// (`scheme://...`) are returned unchanged.
    pub fn expand(&self, name: &str) -> String {
        let Some((prefix, local)) = name.split_once(':') else {
            return name.to_string();
        };
        if local.starts_with("//") {
            return name.to_string();
        }
        match self.namespace(prefix) {
            Some(uri) => format!("{uri}{local}"),
            None => name.to_string(),
        }
    }

    /// Compact a full IRI to `prefix:local` using the longest matching
    /// namespace. Returns the input when no namespace yields a plain local
    /// name.
    pub fn compact(&self, iri: &str) -> String {
        self.bindings
            .iter()
            .filter_map(|ns| {
                let local = iri.strip_prefix(ns.uri.as_str())?;
                is_local_name(local).then_some((ns, local))
            })
            .max_by_key(|(ns, _)| ns.uri.len())
            .map(|(ns, local)| format!("{}:{}", ns.prefix, local))
            .unwrap_or_else(|| iri.to_string())
    }
}

fn is_local_name(local: &str) -> bool {
    !local.is_empty() && !local.contains(['/', '#', ':', '?', ' '])
}
