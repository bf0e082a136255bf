//! Structured logging field names shared by the navocab crates.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | A command cannot complete |
//! | WARN  | Ambiguous input, processing continues with degraded inference |
//! | INFO  | Store open/close, document loads, inferred extensions |
//! | DEBUG | Decision points, intermediate values, config choices |
//! | TRACE | Per-row iteration, traversal steps |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Subsystem originating the log event.
/// Values: "store", "inference", "traversal", "render"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "triple_store", "extension", "materialize"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "open", "load", "infer_extends", "walk_narrower"
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Concept scheme IRI being operated on.
pub const VOCABULARY: &str = "vocabulary";

/// Concept IRI being operated on.
pub const CONCEPT: &str = "concept";

/// Source document location.
pub const SOURCE: &str = "source";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of triples parsed or stored.
pub const TRIPLE_COUNT: &str = "triple_count";

/// Number of rows returned by a query.
pub const RESULT_COUNT: &str = "result_count";
