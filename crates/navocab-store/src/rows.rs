//! Typed query rows and named bindings.
//!
//! Each query reads its solutions into a fixed-shape record implementing
//! [`FromSolution`]. Missing required variables are query errors; missing
//! `OPTIONAL` variables become `None`.

use std::collections::BTreeMap;

use oxigraph::model::{NamedNode, Term};
use oxigraph::sparql::QuerySolution;

use navocab_core::{Error, Result};

/// Named IRI bindings applied to a query as a trailing `VALUES` block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    vars: Vec<(String, NamedNode)>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `var` (without the leading `?`) to an already parsed IRI.
    pub fn bind(mut self, var: &str, value: NamedNode) -> Self {
        self.vars.retain(|(name, _)| name != var);
        self.vars.push((var.to_string(), value));
        self
    }

    /// Bind `var` to `iri`, failing when `iri` is not a valid absolute IRI.
    pub fn iri(self, var: &str, iri: &str) -> Result<Self> {
        let node = NamedNode::new(iri)
            .map_err(|e| Error::InvalidInput(format!("Invalid IRI '{}': {}", iri, e)))?;
        Ok(self.bind(var, node))
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Render the `VALUES` clause, or an empty string when nothing is bound.
    pub fn values_clause(&self) -> String {
        if self.vars.is_empty() {
            return String::new();
        }
        let names: Vec<String> = self.vars.iter().map(|(name, _)| format!("?{name}")).collect();
        let values: Vec<String> = self.vars.iter().map(|(_, node)| node.to_string()).collect();
        format!(
            "\nVALUES ({}) {{ ({}) }}\n",
            names.join(" "),
            values.join(" ")
        )
    }
}

/// Parse `iri` as a named node, `None` when it is not an absolute IRI.
pub fn named_node(iri: &str) -> Option<NamedNode> {
    NamedNode::new(iri).ok()
}

/// Lexical value of a term: the IRI, the literal's text, or the blank node id.
pub fn term_value(term: &Term) -> String {
    match term {
        Term::NamedNode(node) => node.as_str().to_string(),
        Term::Literal(literal) => literal.value().to_string(),
        Term::BlankNode(node) => node.as_str().to_string(),
        #[allow(unreachable_patterns)]
        other => other.to_string(),
    }
}

/// A record built from one query solution.
pub trait FromSolution: Sized {
    fn from_solution(solution: &QuerySolution) -> Result<Self>;
}

fn required(solution: &QuerySolution, var: &str) -> Result<String> {
    solution
        .get(var)
        .map(term_value)
        .ok_or_else(|| Error::Query(format!("Query solution is missing ?{var}")))
}

fn optional(solution: &QuerySolution, var: &str) -> Option<String> {
    solution.get(var).map(term_value)
}

/// Single `?value` column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueRow(pub String);

impl FromSolution for ValueRow {
    fn from_solution(solution: &QuerySolution) -> Result<Self> {
        required(solution, "value").map(ValueRow)
    }
}

/// Header fields of a concept scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabularyRow {
    pub uri: String,
    pub label: Option<String>,
    pub definition: Option<String>,
    pub repository: Option<String>,
}

impl FromSolution for VocabularyRow {
    fn from_solution(solution: &QuerySolution) -> Result<Self> {
        Ok(Self {
            uri: required(solution, "vocabulary")?,
            label: optional(solution, "label"),
            definition: optional(solution, "definition"),
            repository: optional(solution, "repository"),
        })
    }
}

/// A `?subject ?value` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeRow {
    pub subject: String,
    pub value: String,
}

impl FromSolution for EdgeRow {
    fn from_solution(solution: &QuerySolution) -> Result<Self> {
        Ok(Self {
            subject: required(solution, "subject")?,
            value: required(solution, "value")?,
        })
    }
}

/// Untyped row for ad-hoc queries: every bound variable by name.
impl FromSolution for BTreeMap<String, String> {
    fn from_solution(solution: &QuerySolution) -> Result<Self> {
        Ok(solution
            .iter()
            .map(|(var, term)| (var.as_str().to_string(), term_value(term)))
            .collect())
    }
}
