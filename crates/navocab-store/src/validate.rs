//! Structural checks on a loaded vocabulary.
//!
//! Problems are collected into a report rather than raised, so one run
//! shows everything that needs fixing.

use std::fmt;

use serde::Serialize;
use tracing::{info, instrument};

use navocab_core::Result;

use crate::queries;
use crate::rows::{Bindings, EdgeRow};
use crate::triple_store::{SparqlSource, TripleStore};

/// Kind of structural problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    SchemeWithoutLabel,
    ConceptWithoutLabel,
    ConceptWithoutScheme,
    BroaderNotConcept,
    BroaderCycle,
}

impl IssueKind {
    pub fn description(&self) -> &'static str {
        match self {
            Self::SchemeWithoutLabel => "concept scheme has no skos:prefLabel",
            Self::ConceptWithoutLabel => "concept has no skos:prefLabel",
            Self::ConceptWithoutScheme => {
                "concept has neither skos:inScheme nor skos:topConceptOf"
            }
            Self::BroaderNotConcept => "skos:broader target is not a skos:Concept",
            Self::BroaderCycle => "concept is its own broader ancestor",
        }
    }
}

/// One problem found on one node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub kind: IssueKind,
    /// The node the problem is reported on.
    pub focus: String,
    /// Related node, such as the offending broader target.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.focus, self.kind.description())?;
        if let Some(value) = &self.value {
            write!(f, " ({})", value)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub conforms: bool,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn count(&self, kind: IssueKind) -> usize {
        self.issues.iter().filter(|i| i.kind == kind).count()
    }
}

/// Run every structural check against the dataset.
#[instrument(
    skip(store),
    fields(subsystem = "store", component = "validate", op = "validate")
)]
pub fn validate(store: &TripleStore) -> Result<ValidationReport> {
    let none = Bindings::new();
    let mut issues = Vec::new();

    let node_checks = [
        (IssueKind::SchemeWithoutLabel, queries::SCHEMES_WITHOUT_LABEL),
        (IssueKind::ConceptWithoutLabel, queries::CONCEPTS_WITHOUT_LABEL),
        (IssueKind::ConceptWithoutScheme, queries::CONCEPTS_WITHOUT_SCHEME),
        (IssueKind::BroaderCycle, queries::BROADER_CYCLES),
    ];
    for (kind, sparql) in node_checks {
        for focus in store.values(sparql, &none)? {
            issues.push(ValidationIssue {
                kind,
                focus,
                value: None,
            });
        }
    }

    for EdgeRow { subject, value } in store.select::<EdgeRow>(queries::BROADER_NOT_CONCEPT, &none)? {
        issues.push(ValidationIssue {
            kind: IssueKind::BroaderNotConcept,
            focus: subject,
            value: Some(value),
        });
    }

    issues.sort_by(|a, b| (a.kind, &a.focus).cmp(&(b.kind, &b.focus)));
    let report = ValidationReport {
        conforms: issues.is_empty(),
        issues,
    };
    info!(
        conforms = report.conforms,
        issue_count = report.issues.len(),
        "Validated vocabulary structure"
    );
    Ok(report)
}
