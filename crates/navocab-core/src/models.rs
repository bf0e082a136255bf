//! SKOS vocabulary and concept records.
//!
//! Both types are plain values built fresh from the triple store on every
//! request. Two records materialized from the same data compare equal.

use serde::{Deserialize, Serialize};

// =============================================================================
// CONCEPT
// =============================================================================

/// A SKOS concept with its hierarchy edges denormalized onto it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Concept {
    /// Concept IRI.
    pub uri: String,

    /// Local part of the IRI: the text after the last `#`, or after the
    /// last `/` when there is no `#`.
    pub name: String,

    /// `skos:prefLabel` values followed by `skos:altLabel` values.
    pub label: Vec<String>,

    /// All `skos:definition` values joined by newlines, trimmed.
    pub definition: String,

    /// Parent concept IRIs (`skos:broader`).
    pub broader: Vec<String>,

    /// Child concept IRIs, found by inverse lookup of `skos:broader`.
    pub narrower: Vec<String>,

    /// Scheme from `skos:inScheme`, else from `skos:topConceptOf`.
    pub vocabulary: Option<String>,

    /// `skos:historyNote` values.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<String>,

    /// `dcterms:source` values.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<String>,

    /// Note, editorial, scope and change notes, then `rdfs:comment`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,

    /// `skos:related` values.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related: Vec<String>,

    /// `skos:example` values.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub example: Vec<String>,
}

impl Concept {
    /// Local name of an IRI as used for [`Concept::name`].
    pub fn local_name(uri: &str) -> &str {
        let separator = if uri.contains('#') { '#' } else { '/' };
        uri.rsplit(separator).next().unwrap_or(uri)
    }

    /// Preferred label, or the local name when the concept has no label.
    pub fn display_label(&self) -> &str {
        self.label
            .first()
            .map(String::as_str)
            .unwrap_or(self.name.as_str())
    }

    /// Alternate labels (everything after the preferred one).
    pub fn alt_labels(&self) -> &[String] {
        self.label.get(1..).unwrap_or(&[])
    }

    /// Anchor id used for intra-document markdown links.
    pub fn md_anchor(&self) -> String {
        let label = self.display_label().trim();
        let label = label.rsplit('/').next().unwrap_or(label);
        label
            .trim()
            .to_lowercase()
            .replace([',', '\''], "")
            .replace(' ', "-")
    }

    /// Markdown link to this concept's section.
    pub fn md_link(&self, fixed_width: bool) -> String {
        if fixed_width {
            format!("[`{}`](#{})", self.display_label(), self.md_anchor())
        } else {
            format!("[{}](#{})", self.display_label(), self.md_anchor())
        }
    }
}

/// Find a concept by IRI in an already materialized list.
pub fn find_concept<'a>(uri: &str, concepts: &'a [Concept]) -> Option<&'a Concept> {
    concepts.iter().find(|c| c.uri == uri)
}

// =============================================================================
// VOCABULARY
// =============================================================================

/// A SKOS concept scheme.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vocabulary {
    pub uri: String,

    /// `skos:prefLabel` of the scheme.
    pub label: String,

    /// `skos:definition` of the scheme.
    pub description: String,

    /// Scheme this one extends, `None` for a base vocabulary.
    ///
    /// A scheme may extend several parents; this holds the first one found.
    /// Use the vocabulary path/tree traversals for the full set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,

    /// `skos:historyNote` values.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<String>,

    /// `schema:codeRepository` of the scheme.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_repository: Option<String>,
}

impl Vocabulary {
    pub fn is_base(&self) -> bool {
        self.extends.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn concept(uri: &str, labels: &[&str]) -> Concept {
        Concept {
            uri: uri.to_string(),
            name: Concept::local_name(uri).to_string(),
            label: labels.iter().map(|l| l.to_string()).collect(),
            definition: String::new(),
            broader: vec![],
            narrower: vec![],
            vocabulary: None,
            history: vec![],
            sources: vec![],
            notes: vec![],
            related: vec![],
            example: vec![],
        }
    }

    #[test]
    fn test_local_name_prefers_fragment() {
        assert_eq!(Concept::local_name("https://example.net/a/b#c"), "c");
        assert_eq!(Concept::local_name("https://example.net/a/thing"), "thing");
        assert_eq!(Concept::local_name("thing"), "thing");
    }

    #[test]
    fn test_display_label_falls_back_to_name() {
        let c = concept("https://example.net/my/minimal/thing", &[]);
        assert_eq!(c.display_label(), "thing");
        let c = concept("https://example.net/my/minimal/thing", &["Thing", "Stuff"]);
        assert_eq!(c.display_label(), "Thing");
        assert_eq!(c.alt_labels(), &["Stuff".to_string()]);
    }

    #[test]
    fn test_md_anchor() {
        let c = concept("https://example.net/x", &["Rock, Sediment or Soil's Material"]);
        assert_eq!(c.md_anchor(), "rock-sediment-or-soils-material");
    }

    #[test]
    fn test_md_link() {
        let c = concept("https://example.net/x", &["Any Material"]);
        assert_eq!(c.md_link(false), "[Any Material](#any-material)");
        assert_eq!(c.md_link(true), "[`Any Material`](#any-material)");
    }

    #[test]
    fn test_content_equality() {
        let a = concept("https://example.net/x", &["X"]);
        let b = concept("https://example.net/x", &["X"]);
        assert_eq!(a, b);
        let c = concept("https://example.net/x", &["Y"]);
        assert_ne!(a, c);
    }

    #[test]
    fn test_find_concept() {
        let list = vec![
            concept("https://example.net/a", &[]),
            concept("https://example.net/b", &[]),
        ];
        assert_eq!(
            find_concept("https://example.net/b", &list).map(|c| c.name.as_str()),
            Some("b")
        );
        assert!(find_concept("https://example.net/c", &list).is_none());
    }

    #[test]
    fn test_concept_serialization_skips_empty_annotations() {
        let c = concept("https://example.net/a", &["A"]);
        let json = serde_json::to_value(&c).unwrap();
        assert!(json.get("history").is_none());
        assert_eq!(json["label"][0], "A");
        let back: Concept = serde_json::from_value(json).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn test_vocabulary_is_base() {
        let v = Vocabulary {
            uri: "https://example.net/my/minimal/vocab".into(),
            label: "Minimal".into(),
            description: String::new(),
            extends: None,
            history: vec![],
            source_repository: None,
        };
        assert!(v.is_base());
        let ext = Vocabulary {
            extends: Some(v.uri.clone()),
            ..v
        };
        assert!(!ext.is_base());
    }
}
