//! Catalog error types

use std::path::PathBuf;
use thiserror::Error;

/// Failures that stop a catalog call outright.
///
/// Entries that are merely malformed never produce one of these; they are
/// skipped during extraction.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The document has no top-level `products` object
    #[error("Catalog document has no 'products' field")]
    MissingProducts,

    /// The document is not JSON, or `products` is not an object
    #[error("Failed to parse catalog JSON")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },

    /// Failed to read a local catalog file
    #[error("Failed to read catalog file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Transport-level failure talking to the catalog server
    #[error("Failed to fetch catalog from {url}")]
    Request {
        url: String,
        /// False when the request itself is malformed and retrying cannot help
        transient: bool,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The catalog server answered with a non-success status
    #[error("Catalog server returned HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    /// Every attempt allowed by the retry policy failed
    #[error("Giving up on {target} after {attempts} attempts")]
    RetriesExhausted {
        target: String,
        attempts: u32,
        #[source]
        source: Box<CatalogError>,
    },
}

impl CatalogError {
    /// Whether another attempt could plausibly succeed
    pub fn is_transient(&self) -> bool {
        match self {
            CatalogError::Request { transient, .. } => *transient,
            CatalogError::HttpStatus { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}

#[cfg(test)]
mod error_tests {
    use super::*;

    #[test]
    fn test_server_errors_are_transient() {
        let err = CatalogError::HttpStatus {
            url: "https://example.com".to_string(),
            status: 503,
        };
        assert!(err.is_transient());

        let err = CatalogError::HttpStatus {
            url: "https://example.com".to_string(),
            status: 429,
        };
        assert!(err.is_transient());
    }

    #[test]
    fn test_client_errors_are_not_transient() {
        let err = CatalogError::HttpStatus {
            url: "https://example.com".to_string(),
            status: 404,
        };
        assert!(!err.is_transient());
        assert!(!CatalogError::MissingProducts.is_transient());
    }

    #[test]
    fn test_request_errors_follow_their_flag() {
        let err = |transient| CatalogError::Request {
            url: "ftp://example.com".to_string(),
            transient,
            source: "builder error".into(),
        };
        assert!(err(true).is_transient());
        assert!(!err(false).is_transient());
    }

    #[test]
    fn test_exhausted_message_names_attempts() {
        let err = CatalogError::RetriesExhausted {
            target: "https://example.com/catalog.json".to_string(),
            attempts: 5,
            source: Box::new(CatalogError::HttpStatus {
                url: "https://example.com/catalog.json".to_string(),
                status: 502,
            }),
        };
        assert_eq!(
            err.to_string(),
            "Giving up on https://example.com/catalog.json after 5 attempts"
        );
    }
}
