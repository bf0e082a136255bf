//! Centralized default constants for navocab.
//!
//! All crates reference these constants instead of repeating literals.

// =============================================================================
// STORE
// =============================================================================

/// Identifier of the persisted dataset (named graph holding all vocabularies).
pub const STORE_IDENTIFIER: &str = "https://w3id.org/isample/vocabulary";

/// Storage location meaning "keep everything in memory".
pub const STORE_LOCATION: &str = "default";

/// Alternative spelling accepted for the in-memory location.
pub const MEMORY_LOCATION: &str = ":memory:";

/// Media type of source documents when none is given.
pub const FORMAT: &str = "text/turtle";

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Directory below the user config dir holding navocab settings.
pub const CONFIG_DIR: &str = "navocab";

/// Store configuration file name.
pub const CONFIG_FILE: &str = "store.toml";

/// Environment variable naming the storage location.
pub const ENV_STORE: &str = "NAVOCAB_STORE";

/// Environment variable naming the store identifier.
pub const ENV_STORE_ID: &str = "NAVOCAB_STORE_ID";

/// Environment variable requesting purge-on-open.
pub const ENV_PURGE: &str = "NAVOCAB_PURGE";

/// Environment variable naming the default source format.
pub const ENV_FORMAT: &str = "NAVOCAB_FORMAT";

// =============================================================================
// TRAVERSAL AND RENDERING
// =============================================================================

/// Depth limit used by the JSON tree renderer.
pub const UI_TREE_MAX_DEPTH: usize = 100;

/// Concepts with fewer ancestors-or-self than this are treated as roots
/// when a document declares no top concept.
pub const FALLBACK_ROOT_PATH_LEN: usize = 3;

/// Language tag used for labels in the JSON tree.
pub const LABEL_LANGUAGE: &str = "en";
