//! Triple store adapter over oxigraph.
//!
//! All triples live in one named graph whose IRI is the store identifier,
//! and every query runs with that graph as its default graph. Several
//! datasets can therefore share one on-disk location.
//!
//! Loading parses the whole document before writing anything, then adds the
//! triples to the dataset and hands back a [`LoadedGraph`] holding only
//! those triples.

use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Instant;

use oxigraph::io::{RdfFormat, RdfParser};
use oxigraph::model::{GraphName, NamedNode, Quad};
use oxigraph::sparql::{Query, QueryResults};
use oxigraph::store::Store;
use regex::Regex;
use sha2::{Digest, Sha256};
use tracing::{debug, info, instrument, trace};

use navocab_core::{Error, NamespaceTable, Result};

use crate::config::{StorageLocation, StoreConfig};
use crate::queries::PREFIX_HEADER;
use crate::rows::{named_node, term_value, Bindings, FromSolution, ValueRow};

/// Stem of the per-dataset namespace table file inside a store directory.
const NAMESPACES_FILE_STEM: &str = "namespaces";

// =============================================================================
// FORMATS
// =============================================================================

/// Resolve a media type (`text/turtle`), a file extension (`ttl`) or a
/// format name (`turtle`) to a parser format.
pub fn resolve_format(format: &str) -> Result<RdfFormat> {
    let lower = format.trim().to_ascii_lowercase();
    let by_name = match lower.as_str() {
        "turtle" => Some(RdfFormat::Turtle),
        "ntriples" | "n-triples" => Some(RdfFormat::NTriples),
        "nquads" | "n-quads" => Some(RdfFormat::NQuads),
        "xml" | "rdfxml" | "rdf/xml" => Some(RdfFormat::RdfXml),
        "trig" => Some(RdfFormat::TriG),
        "n3" => Some(RdfFormat::N3),
        _ => None,
    };
    by_name
        .or_else(|| RdfFormat::from_media_type(&lower))
        .or_else(|| RdfFormat::from_extension(lower.trim_start_matches('.')))
        .ok_or_else(|| Error::InvalidInput(format!("Unknown RDF format: {}", format)))
}

/// Prefix declarations found in a document's text, in document order.
///
/// Covers `@prefix`/`PREFIX` lines (Turtle, TriG, N3) and `xmlns:` attributes
/// (RDF/XML). Empty prefixes and relative namespaces are skipped.
fn declared_prefixes(text: &str, format: RdfFormat) -> Vec<(String, String)> {
    static TURTLE: OnceLock<Regex> = OnceLock::new();
    static XML: OnceLock<Regex> = OnceLock::new();

    let re = match format {
        RdfFormat::Turtle | RdfFormat::TriG | RdfFormat::N3 => TURTLE.get_or_init(|| {
            Regex::new(r"(?mi)^\s*(?:@prefix|PREFIX)\s+([A-Za-z][\w.-]*)?:\s*<([^>]*)>")
                .expect("static regex is valid")
        }),
        RdfFormat::RdfXml => XML.get_or_init(|| {
            Regex::new(r#"xmlns:([A-Za-z][\w.-]*)\s*=\s*"([^"]*)""#).expect("static regex is valid")
        }),
        _ => return Vec::new(),
    };

    re.captures_iter(text)
        .filter_map(|caps| {
            let prefix = caps.get(1)?.as_str();
            let uri = caps.get(2)?.as_str();
            named_node(uri)?;
            Some((prefix.to_string(), uri.to_string()))
        })
        .collect()
}

// =============================================================================
// QUERY EVALUATION
// =============================================================================

/// Anything that answers typed SELECT queries.
pub trait SparqlSource {
    /// Run `sparql` (with the standard prefix header and `bindings` applied)
    /// and read each solution into `R`.
    fn select<R: FromSolution>(&self, sparql: &str, bindings: &Bindings) -> Result<Vec<R>>;

    /// Run a query projecting `?value` and return the values.
    fn values(&self, sparql: &str, bindings: &Bindings) -> Result<Vec<String>> {
        Ok(self
            .select::<ValueRow>(sparql, bindings)?
            .into_iter()
            .map(|ValueRow(value)| value)
            .collect())
    }
}

fn select_from<R: FromSolution>(
    store: &Store,
    default_graph: Option<&NamedNode>,
    sparql: &str,
    bindings: &Bindings,
) -> Result<Vec<R>> {
    let text = format!("{}{}{}", PREFIX_HEADER, sparql, bindings.values_clause());
    let mut query = Query::parse(&text, None).map_err(Error::query)?;
    if let Some(graph) = default_graph {
        query
            .dataset_mut()
            .set_default_graph(vec![GraphName::NamedNode(graph.clone())]);
    }

    match store.query(query).map_err(Error::query)? {
        QueryResults::Solutions(solutions) => {
            let mut rows = Vec::new();
            for solution in solutions {
                let solution = solution.map_err(Error::query)?;
                rows.push(R::from_solution(&solution)?);
            }
            trace!(result_count = rows.len(), "Query evaluated");
            Ok(rows)
        }
        QueryResults::Boolean(_) | QueryResults::Graph(_) => Err(Error::Query(
            "Only SELECT queries are supported".to_string(),
        )),
    }
}

// =============================================================================
// LOADED GRAPH
// =============================================================================

/// The triples added by one load, queryable on their own.
pub struct LoadedGraph {
    store: Store,
    source: String,
    triple_count: usize,
}

impl LoadedGraph {
    /// Where the triples came from (path or `<memory>`).
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Number of triples parsed from the document.
    pub fn len(&self) -> usize {
        self.triple_count
    }

    pub fn is_empty(&self) -> bool {
        self.triple_count == 0
    }
}

impl SparqlSource for LoadedGraph {
    fn select<R: FromSolution>(&self, sparql: &str, bindings: &Bindings) -> Result<Vec<R>> {
        select_from(&self.store, None, sparql, bindings)
    }
}

impl std::fmt::Debug for LoadedGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedGraph")
            .field("source", &self.source)
            .field("triple_count", &self.triple_count)
            .finish()
    }
}

// =============================================================================
// TRIPLE STORE
// =============================================================================

/// Handle to the vocabulary dataset.
///
/// Mutating operations take `&mut self`: the store supports a single writer,
/// and borrowing enforces that within a process.
pub struct TripleStore {
    store: Store,
    graph: NamedNode,
    location: StorageLocation,
    default_format: RdfFormat,
    namespaces: NamespaceTable,
}

impl TripleStore {
    /// Open the store described by `config`, creating it when missing.
    #[instrument(
        skip(config),
        fields(subsystem = "store", component = "triple_store", op = "open")
    )]
    pub fn open(config: &StoreConfig) -> Result<Self> {
        config.validate()?;
        let graph = NamedNode::new(config.identifier.as_str())
            .map_err(|e| Error::Config(format!("Invalid store identifier: {}", e)))?;
        let default_format = resolve_format(&config.format)?;

        let store = match &config.location {
            StorageLocation::Memory => Store::new().map_err(Error::storage)?,
            StorageLocation::Path(path) => {
                fs::create_dir_all(path)?;
                Store::open(path).map_err(Error::storage)?
            }
        };

        let namespaces_path = namespaces_path(&config.location, graph.as_str());
        let mut namespaces = NamespaceTable::standard();
        if config.purge {
            store
                .clear_graph(graph.as_ref())
                .map_err(Error::storage)?;
            if let Some(path) = namespaces_path.as_ref().filter(|p| p.exists()) {
                fs::remove_file(path)?;
            }
            info!(
                subsystem = "store",
                identifier = %config.identifier,
                "Purged existing dataset"
            );
        } else if let Some(path) = namespaces_path.as_ref().filter(|p| p.exists()) {
            namespaces = serde_json::from_str(&fs::read_to_string(path)?)?;
            debug!(
                path = %path.display(),
                bindings = namespaces.len(),
                "Restored namespace table"
            );
        }

        let triples = Self {
            store,
            graph,
            location: config.location.clone(),
            default_format,
            namespaces,
        };

        info!(
            subsystem = "store",
            component = "triple_store",
            op = "open",
            location = %triples.location,
            identifier = %config.identifier,
            triple_count = triples.len()?,
            "Opened triple store"
        );
        Ok(triples)
    }

    /// Open a fresh in-memory store with default settings.
    pub fn in_memory() -> Result<Self> {
        Self::open(&StoreConfig::default())
    }

    /// IRI of the named graph holding the dataset.
    pub fn identifier(&self) -> &str {
        self.graph.as_str()
    }

    pub fn location(&self) -> &StorageLocation {
        &self.location
    }

    /// Number of triples in the dataset.
    pub fn len(&self) -> Result<usize> {
        self.store
            .quads_for_pattern(None, None, None, Some(self.graph.as_ref().into()))
            .try_fold(0, |count, quad| quad.map(|_| count + 1))
            .map_err(Error::storage)
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    // ─── Loading ───────────────────────────────────────────────────────────

    /// Load a document from a file.
    ///
    /// `format` is a media type, extension or format name. When absent the
    /// file extension decides, falling back to the configured format.
    pub fn load(&mut self, source: impl AsRef<Path>, format: Option<&str>) -> Result<LoadedGraph> {
        self.load_with_bindings(source, format, &[])
    }

    /// Load a document from a file, then bind extra `(prefix, namespace)`
    /// pairs into the namespace table.
    pub fn load_with_bindings(
        &mut self,
        source: impl AsRef<Path>,
        format: Option<&str>,
        bindings: &[(&str, &str)],
    ) -> Result<LoadedGraph> {
        let path = source.as_ref();
        let format = match format {
            Some(format) => resolve_format(format)?,
            None => path
                .extension()
                .and_then(|ext| ext.to_str())
                .and_then(RdfFormat::from_extension)
                .unwrap_or(self.default_format),
        };

        let mut content = Vec::new();
        fs::File::open(path)?.read_to_end(&mut content)?;
        let base_iri = fs::canonicalize(path)
            .ok()
            .map(|abs| format!("file://{}", abs.display()));

        self.load_bytes(
            &content,
            base_iri.as_deref(),
            format,
            &path.display().to_string(),
            bindings,
        )
    }

    /// Load a document from a reader.
    pub fn load_reader(
        &mut self,
        mut reader: impl Read,
        base_iri: Option<&str>,
        format: &str,
    ) -> Result<LoadedGraph> {
        let format = resolve_format(format)?;
        let mut content = Vec::new();
        reader.read_to_end(&mut content)?;
        self.load_bytes(&content, base_iri, format, "<reader>", &[])
    }

    /// Load a document held in memory.
    pub fn load_str(&mut self, text: &str, format: &str) -> Result<LoadedGraph> {
        let format = resolve_format(format)?;
        self.load_bytes(text.as_bytes(), None, format, "<memory>", &[])
    }

    #[instrument(
        skip(self, content, base_iri, format, bindings),
        fields(subsystem = "store", component = "triple_store", op = "load")
    )]
    fn load_bytes(
        &mut self,
        content: &[u8],
        base_iri: Option<&str>,
        format: RdfFormat,
        source: &str,
        bindings: &[(&str, &str)],
    ) -> Result<LoadedGraph> {
        let start = Instant::now();

        let mut parser = RdfParser::from_format(format).rename_blank_nodes();
        if let Some(base) = base_iri.filter(|base| named_node(base).is_some()) {
            parser = parser
                .with_base_iri(base)
                .map_err(|e| Error::Parse(format!("{}: {}", source, e)))?;
        }
        let quads = parser
            .for_reader(content)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| Error::Parse(format!("{}: {}", source, e)))?;

        let staging = Store::new().map_err(Error::storage)?;
        staging
            .extend(quads.iter().map(|q| {
                Quad::new(
                    q.subject.clone(),
                    q.predicate.clone(),
                    q.object.clone(),
                    GraphName::DefaultGraph,
                )
            }))
            .map_err(Error::storage)?;
        let triple_count = staging.len().map_err(Error::storage)?;

        let graph = &self.graph;
        self.store
            .extend(
                quads
                    .into_iter()
                    .map(|q| Quad::new(q.subject, q.predicate, q.object, graph.clone())),
            )
            .map_err(Error::storage)?;

        let mut rebound = false;
        let text = String::from_utf8_lossy(content);
        for (prefix, uri) in declared_prefixes(&text, format) {
            rebound |= self.namespaces.bind(&prefix, &uri, true);
        }
        for (prefix, uri) in bindings {
            rebound |= self.namespaces.bind(prefix, uri, true);
        }
        if rebound {
            self.save_namespaces()?;
        }

        info!(
            subsystem = "store",
            component = "triple_store",
            op = "load",
            source,
            triple_count,
            duration_ms = start.elapsed().as_millis() as u64,
            "Loaded document"
        );

        Ok(LoadedGraph {
            store: staging,
            source: source.to_string(),
            triple_count,
        })
    }

    // ─── Reading and writing ───────────────────────────────────────────────

    /// Trimmed, non-empty lexical values of `subject predicate ?o`.
    ///
    /// A subject or predicate that is not an absolute IRI has no objects.
    pub fn objects(&self, subject: &str, predicate: &str) -> Result<Vec<String>> {
        let (Some(subject), Some(predicate)) = (named_node(subject), named_node(predicate)) else {
            return Ok(Vec::new());
        };
        let mut values = Vec::new();
        for quad in self.store.quads_for_pattern(
            Some(subject.as_ref().into()),
            Some(predicate.as_ref()),
            None,
            Some(self.graph.as_ref().into()),
        ) {
            let quad = quad.map_err(Error::storage)?;
            let value = term_value(&quad.object);
            let value = value.trim();
            if !value.is_empty() {
                values.push(value.to_string());
            }
        }
        Ok(values)
    }

    /// Add the triple `subject predicate object` between three IRIs.
    /// Returns false when it was already present.
    pub fn insert(&mut self, subject: &str, predicate: &str, object: &str) -> Result<bool> {
        let iri = |value: &str| {
            NamedNode::new(value)
                .map_err(|e| Error::InvalidInput(format!("Invalid IRI '{}': {}", value, e)))
        };
        let quad = Quad::new(iri(subject)?, iri(predicate)?, iri(object)?, self.graph.clone());
        self.store.insert(&quad).map_err(Error::storage)
    }

    /// Run an ad-hoc SELECT and return each solution as a name -> value map.
    pub fn query_rows(
        &self,
        sparql: &str,
        bindings: &Bindings,
    ) -> Result<Vec<BTreeMap<String, String>>> {
        self.select(sparql, bindings)
    }

    // ─── Namespaces ────────────────────────────────────────────────────────

    pub fn namespaces(&self) -> &NamespaceTable {
        &self.namespaces
    }

    /// Bind `prefix` to `uri`. Returns whether the table changed.
    pub fn bind(&mut self, prefix: &str, uri: &str, override_existing: bool) -> Result<bool> {
        let changed = self.namespaces.bind(prefix, uri, override_existing);
        if changed {
            self.save_namespaces()?;
        }
        Ok(changed)
    }

    /// Expand `prefix:local`; anything else comes back unchanged.
    pub fn expand(&self, name: &str) -> String {
        self.namespaces.expand(name)
    }

    /// Compact an IRI to `prefix:local`; anything else comes back unchanged.
    pub fn compact(&self, iri: &str) -> String {
        self.namespaces.compact(iri)
    }

    fn save_namespaces(&self) -> Result<()> {
        if let Some(path) = namespaces_path(&self.location, self.graph.as_str()) {
            fs::write(&path, serde_json::to_string_pretty(&self.namespaces)?)?;
            trace!(path = %path.display(), "Saved namespace table");
        }
        Ok(())
    }

    /// Flush pending writes and release the store.
    pub fn close(self) -> Result<()> {
        self.save_namespaces()?;
        if self.location.is_persistent() {
            self.store.flush().map_err(Error::storage)?;
        }
        info!(
            subsystem = "store",
            component = "triple_store",
            op = "close",
            location = %self.location,
            "Closed triple store"
        );
        Ok(())
    }
}

impl SparqlSource for TripleStore {
    fn select<R: FromSolution>(&self, sparql: &str, bindings: &Bindings) -> Result<Vec<R>> {
        select_from(&self.store, Some(&self.graph), sparql, bindings)
    }
}

impl std::fmt::Debug for TripleStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TripleStore")
            .field("identifier", &self.graph.as_str())
            .field("location", &self.location)
            .finish()
    }
}

/// Namespace table file of the dataset `identifier`. Datasets sharing a
/// directory each get their own file.
fn namespaces_path(location: &StorageLocation, identifier: &str) -> Option<PathBuf> {
    match location {
        StorageLocation::Memory => None,
        StorageLocation::Path(dir) => {
            let digest = hex::encode(Sha256::digest(identifier.as_bytes()));
            Some(dir.join(format!("{}-{}.json", NAMESPACES_FILE_STEM, &digest[..16])))
        }
    }
}
