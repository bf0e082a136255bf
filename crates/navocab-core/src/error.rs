//! Error types for navocab.

use std::fmt::Display;

use thiserror::Error;

/// Result type alias using navocab's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for navocab operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The underlying triple store failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// A source document could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// Reading a source document or the store location failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No concept scheme matches the requested identifier
    #[error("Vocabulary '{0}' not found")]
    VocabularyNotFound(String),

    /// No concept scheme is a root of the extension forest
    #[error("No base vocabulary found")]
    NoBaseVocabulary,

    /// No concept is marked as the top concept of a scheme
    #[error("No top concept found")]
    NoTopConcept,

    /// SPARQL syntax or evaluation failure
    #[error("Query error: {0}")]
    Query(String),

    /// Invalid input (identifier, binding, format name)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Wrap a storage engine failure.
    pub fn storage(e: impl Display) -> Self {
        Error::Storage(e.to_string())
    }

    /// Wrap a SPARQL parse or evaluation failure.
    pub fn query(e: impl Display) -> Self {
        Error::Query(e.to_string())
    }

    /// True for every "nothing matched" condition.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::VocabularyNotFound(_) | Error::NoBaseVocabulary | Error::NoTopConcept
        )
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_vocabulary_not_found() {
        let err = Error::VocabularyNotFound("https://example.net/vocab".to_string());
        assert_eq!(
            err.to_string(),
            "Vocabulary 'https://example.net/vocab' not found"
        );
    }

    #[test]
    fn test_error_display_no_top_concept() {
        assert_eq!(Error::NoTopConcept.to_string(), "No top concept found");
    }

    #[test]
    fn test_error_display_no_base_vocabulary() {
        assert_eq!(
            Error::NoBaseVocabulary.to_string(),
            "No base vocabulary found"
        );
    }

    #[test]
    fn test_error_display_parse() {
        let err = Error::Parse("unexpected token at line 3".to_string());
        assert_eq!(err.to_string(), "Parse error: unexpected token at line 3");
    }

    #[test]
    fn test_storage_constructor() {
        let err = Error::storage("disk full");
        assert!(matches!(err, Error::Storage(ref m) if m == "disk full"));
    }

    #[test]
    fn test_query_constructor() {
        let err = Error::query(format_args!("bad token {}", 7));
        assert_eq!(err.to_string(), "Query error: bad token 7");
    }

    #[test]
    fn test_is_not_found() {
        assert!(Error::VocabularyNotFound("x".into()).is_not_found());
        assert!(Error::NoBaseVocabulary.is_not_found());
        assert!(Error::NoTopConcept.is_not_found());
        assert!(!Error::Parse("x".into()).is_not_found());
        assert!(!Error::storage("x").is_not_found());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.ttl");
        let err: Error = io_err.into();
        match err {
            Error::Io(_) => {}
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<i32>("not a number").unwrap_err();
        let err: Error = json_err.into();
        assert!(err.to_string().starts_with("Serialization error:"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }
}
